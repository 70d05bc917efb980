//! Error types for move application and evaluation.

use thiserror::Error;

use super::player::Side;

/// A single-die move that cannot be applied to a position.
///
/// Returned by `Position::apply_move`. The source position is never modified,
/// so the caller can simply discard the move.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("start index {start} is outside the bar and points 0..=24")]
    SourceOutOfRange { start: usize },

    #[error("move distance must be at least 1")]
    ZeroDistance,

    #[error("no piece to move at index {start}")]
    EmptySource { start: usize },

    #[error("destination point {point} is held by {count} opposing pieces")]
    Blocked { point: usize, count: u8 },

    #[error("slot {slot} of {side} cannot hold another piece")]
    SlotOverflow { side: Side, slot: usize },
}

/// Evaluator-level errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("invalid rollout config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, EvalError>;

/// An initial layout that cannot start a game.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("layout slot {slot} is outside the bar and points 0..=24")]
    SlotOutOfRange { slot: usize },

    #[error("{side} would start with {total} pieces, more than {max}")]
    TooManyPieces { side: Side, total: u32, max: u32 },
}
