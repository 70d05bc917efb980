//! Rollout and evaluation configuration parameters.

use serde::{Deserialize, Serialize};

use crate::core::error::{EvalError, Result};
use crate::core::Layout;

/// Rollout configuration parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RolloutConfig {
    /// Rollouts run for each first-ply candidate.
    pub trials: u32,

    /// Turn ceiling per rollout. A game still running at the ceiling is drawn.
    pub max_turns: u32,

    /// Weight of a drawn rollout in a candidate's score.
    pub draw_weight: f64,

    /// Chance that the lone-piece protection tier is consulted for a candidate.
    pub protection_probability: f64,

    /// Chance that the capture tier is consulted for a candidate.
    pub capture_probability: f64,

    /// Master seed. Worker streams are forked from it in candidate order.
    pub seed: u64,

    /// Starting layout for new games.
    pub layout: Layout,
}

impl Default for RolloutConfig {
    fn default() -> Self {
        Self {
            trials: 50,
            max_turns: 300,
            draw_weight: 0.3,
            protection_probability: 0.5,
            capture_probability: 0.5,
            seed: 42,
            layout: Layout::standard(),
        }
    }
}

impl RolloutConfig {
    /// Set the number of rollouts per candidate.
    pub fn with_trials(mut self, trials: u32) -> Self {
        self.trials = trials;
        self
    }

    /// Set the turn ceiling per rollout.
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Set the draw weight.
    pub fn with_draw_weight(mut self, weight: f64) -> Self {
        self.draw_weight = weight;
        self
    }

    /// Set the tier 2 and tier 3 probabilities of the heuristic policy.
    pub fn with_tier_probabilities(mut self, protection: f64, capture: f64) -> Self {
        self.protection_probability = protection;
        self.capture_probability = capture;
        self
    }

    /// Set the master seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the starting layout.
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Reject settings the evaluator cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.trials == 0 {
            return Err(EvalError::InvalidConfig("trials must be at least 1".into()));
        }
        if self.max_turns == 0 {
            return Err(EvalError::InvalidConfig("max_turns must be at least 1".into()));
        }
        for (name, value) in [
            ("draw_weight", self.draw_weight),
            ("protection_probability", self.protection_probability),
            ("capture_probability", self.capture_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(EvalError::InvalidConfig(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }
        Ok(())
    }
}
