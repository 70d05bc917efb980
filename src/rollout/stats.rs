//! Rollout tallies and evaluation statistics.

use serde::{Deserialize, Serialize};

use crate::core::Side;

use super::simulator::RolloutStatus;

/// Outcome counts for one candidate, from the original mover's perspective.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl Tally {
    /// Create an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished rollout for `mover`.
    ///
    /// `InProgress` is counted as a draw; the simulator never returns it
    /// from `run`.
    pub fn record(&mut self, status: RolloutStatus, mover: Side) {
        match status {
            RolloutStatus::Won(side) if side == mover => self.wins += 1,
            RolloutStatus::Won(_) => self.losses += 1,
            RolloutStatus::Drawn | RolloutStatus::InProgress => self.draws += 1,
        }
    }

    /// Rollouts recorded.
    #[must_use]
    pub fn trials(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// `(wins + draw_weight * draws) / trials`, or 0 with no trials.
    #[must_use]
    pub fn score(&self, draw_weight: f64) -> f64 {
        let trials = self.trials();
        if trials == 0 {
            0.0
        } else {
            (f64::from(self.wins) + draw_weight * f64::from(self.draws)) / f64::from(trials)
        }
    }

    /// Add another tally into this one.
    pub fn merge(&mut self, other: &Tally) {
        self.wins += other.wins;
        self.losses += other.losses;
        self.draws += other.draws;
    }
}

/// Statistics collected during one evaluation.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EvaluationStats {
    /// First-ply candidates generated.
    pub candidates: u32,

    /// Workers that panicked.
    pub failures: u32,

    /// Rollouts completed across all successful workers.
    pub rollouts: u32,

    /// Combined outcome counts of all successful workers.
    pub totals: Tally,

    /// Wall-clock time of the evaluation (microseconds).
    pub time_us: u64,
}

impl EvaluationStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculate rollouts per second.
    #[must_use]
    pub fn rollouts_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            f64::from(self.rollouts) / (self.time_us as f64 / 1_000_000.0)
        }
    }

    /// Fraction of all rollouts that hit the turn ceiling.
    #[must_use]
    pub fn draw_rate(&self) -> f64 {
        if self.rollouts == 0 {
            0.0
        } else {
            f64::from(self.totals.draws) / f64::from(self.rollouts)
        }
    }
}
