//! Backgammon rules above the single-die level.
//!
//! `Position` knows how to move one piece by one die. This module turns a
//! whole roll into the set of legal turn results.

pub mod movegen;

pub use movegen::MoveGenerator;
