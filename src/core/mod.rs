//! Core engine types: sides, positions, dice, layouts, RNG, errors.
//!
//! Everything here is a small value type. Positions are `Copy` and are
//! shared between rollout workers by copying, never by reference.

pub mod player;
pub mod rng;
pub mod layout;
pub mod position;
pub mod dice;
pub mod error;

pub use player::{Side, SideMap};
pub use rng::{GameRng, GameRngState};
pub use layout::{Layout, MAX_PIECES};
pub use position::{mirror, Position, BAR, OFF_BOARD, POINTS, SLOTS};
pub use dice::{DiceSequence, Roll};
pub use error::{EvalError, LayoutError, MoveError};
