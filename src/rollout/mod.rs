//! Monte Carlo rollout evaluation.
//!
//! ## Overview
//!
//! Every legal result of the mover's roll is a candidate. Each candidate gets
//! its own worker thread, which plays `trials` complete games from it with
//! the opponent moving first, and counts how often the mover ends up winning.
//!
//! - **Policies**: rollouts are driven by a `SelectionPolicy` (heuristic by default)
//! - **Reproducible**: workers draw from forks of one master seed
//! - **Fault isolated**: a panicking worker is reported, not fatal
//!
//! ## Usage
//!
//! ```rust
//! use bg_rollout::core::{Position, Roll, Side};
//! use bg_rollout::rollout::{ParallelEvaluator, RolloutConfig};
//!
//! let config = RolloutConfig::default().with_trials(4).with_max_turns(40);
//! let mut evaluator = ParallelEvaluator::new(config).unwrap();
//!
//! let evaluation = evaluator.evaluate_with_roll(&Position::default(), Roll::new(3, 1), Side::A);
//! if let Some(best) = evaluation.best() {
//!     println!("best candidate #{} scored {:.2}", best.index, best.score);
//! }
//! ```

pub mod config;
pub mod policy;
pub mod simulator;
pub mod stats;
pub mod evaluator;

pub use config::RolloutConfig;
pub use policy::{HeuristicPolicy, RandomPolicy, SelectionPolicy};
pub use simulator::{GameState, RolloutSimulator, RolloutStatus};
pub use stats::{EvaluationStats, Tally};
pub use evaluator::{CandidateScore, Evaluation, ParallelEvaluator, WorkerFailure};
