//! # bg-rollout
//!
//! A backgammon move-selection engine that ranks the moves available for a
//! roll by playing many randomized games from each of them.
//!
//! ## Design Principles
//!
//! 1. **Value Positions**: A `Position` is a small `Copy` type. Moves return
//!    new positions; nothing is shared mutably between workers.
//!
//! 2. **Deterministic**: All randomness flows from one master seed through
//!    forked `GameRng` streams, so an evaluation can be replayed exactly.
//!
//! 3. **Configuration Over Convention**: Trial count, turn ceiling, draw
//!    weight, policy probabilities and starting layout live in `RolloutConfig`.
//!
//! ## Modules
//!
//! - `core`: Sides, positions, dice, layouts, RNG, errors
//! - `rules`: Turn-level move generation
//! - `rollout`: Selection policies, rollout simulator, parallel evaluator
//! - `render`: Text board rendering

pub mod core;
pub mod rules;
pub mod rollout;
pub mod render;

// Re-export commonly used types
pub use crate::core::{
    GameRng, GameRngState,
    Layout, Position, Roll,
    Side, SideMap,
    EvalError, LayoutError, MoveError,
};

pub use crate::rules::MoveGenerator;

pub use crate::rollout::{
    CandidateScore, Evaluation, EvaluationStats, ParallelEvaluator,
    HeuristicPolicy, RandomPolicy, SelectionPolicy,
    RolloutConfig, RolloutSimulator, RolloutStatus, Tally, WorkerFailure,
};

pub use crate::render::BoardView;
