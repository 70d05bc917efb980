//! Move-selection policies that drive self-play rollouts.
//!
//! Policies are trait-based so a rollout can be driven by anything that
//! picks one position out of the legal set:
//! - `HeuristicPolicy`: bear off > protect a lone piece > capture > random
//! - `RandomPolicy`: uniform choice, useful as a baseline

use crate::core::{GameRng, Position, Side};

use super::config::RolloutConfig;

// =============================================================================
// Selection Policy
// =============================================================================

/// Policy for choosing one turn result out of the legal set.
pub trait SelectionPolicy: Send + Sync {
    /// Pick one of `candidates`, each compared against the pre-move `before`.
    ///
    /// Returns `None` only when `candidates` is empty; the caller treats
    /// that as a pass. The returned position has its bear-off flag cleared.
    fn select(
        &self,
        before: &Position,
        candidates: &[Position],
        side: Side,
        rng: &mut GameRng,
    ) -> Option<Position>;
}

/// Fixed-priority heuristic used for rollouts.
///
/// Candidates are scanned in order against four tiers:
///
/// 1. **Bear-off**: the first candidate with fewer pieces in play wins, and
///    no later candidate can displace it.
/// 2. **Protection**: a candidate with fewer lone pieces than before.
///    Consulted per candidate with probability `protection_probability`.
/// 3. **Capture**: a candidate that put an opposing piece on the bar.
///    Consulted per candidate with probability `capture_probability`.
/// 4. **Random**: if no tier fired, a uniform choice.
///
/// Once a tier fires it stays closed for the rest of the scan, so a later
/// capture never displaces an earlier protection, but a later bear-off
/// displaces either.
#[derive(Clone, Debug)]
pub struct HeuristicPolicy {
    pub protection_probability: f64,
    pub capture_probability: f64,
}

impl Default for HeuristicPolicy {
    fn default() -> Self {
        Self {
            protection_probability: 0.5,
            capture_probability: 0.5,
        }
    }
}

impl HeuristicPolicy {
    /// Policy with explicit tier probabilities.
    #[must_use]
    pub fn new(protection_probability: f64, capture_probability: f64) -> Self {
        Self {
            protection_probability,
            capture_probability,
        }
    }

    /// Policy using the tier probabilities of a rollout config.
    #[must_use]
    pub fn from_config(config: &RolloutConfig) -> Self {
        Self::new(config.protection_probability, config.capture_probability)
    }

    /// Always consult tiers 2 and 3.
    #[must_use]
    pub fn deterministic() -> Self {
        Self::new(1.0, 1.0)
    }
}

impl SelectionPolicy for HeuristicPolicy {
    fn select(
        &self,
        before: &Position,
        candidates: &[Position],
        side: Side,
        rng: &mut GameRng,
    ) -> Option<Position> {
        if candidates.is_empty() {
            return None;
        }

        let mut chosen: Option<usize> = None;
        let mut bear_off_open = true;
        let mut protection_open = true;
        let mut capture_open = true;

        for (i, candidate) in candidates.iter().enumerate() {
            if !bear_off_open {
                break;
            }
            if bears_off(before, candidate, side) {
                chosen = Some(i);
                bear_off_open = false;
            } else if protection_open {
                if rng.gen_bool(self.protection_probability) && protects_lone(before, candidate, side) {
                    chosen = Some(i);
                    protection_open = false;
                } else if capture_open
                    && rng.gen_bool(self.capture_probability)
                    && captures(before, candidate, side)
                {
                    chosen = Some(i);
                    capture_open = false;
                }
            }
        }

        let mut picked = match chosen {
            Some(i) => candidates[i],
            None => *rng.choose(candidates)?,
        };
        picked.clear_borne_off();
        Some(picked)
    }
}

/// Uniform random selection policy.
#[derive(Clone, Debug, Default)]
pub struct RandomPolicy;

impl SelectionPolicy for RandomPolicy {
    fn select(
        &self,
        _before: &Position,
        candidates: &[Position],
        _side: Side,
        rng: &mut GameRng,
    ) -> Option<Position> {
        let mut picked = *rng.choose(candidates)?;
        picked.clear_borne_off();
        Some(picked)
    }
}

// =============================================================================
// Tier Tests
// =============================================================================

/// The move took at least one of `side`'s pieces out of play.
#[must_use]
pub fn bears_off(before: &Position, after: &Position, side: Side) -> bool {
    after.total_pieces(side) < before.total_pieces(side)
}

/// The move left `side` with fewer lone pieces.
#[must_use]
pub fn protects_lone(before: &Position, after: &Position, side: Side) -> bool {
    after.exposed_points(side) < before.exposed_points(side)
}

/// The move sent at least one opposing piece to the bar.
#[must_use]
pub fn captures(before: &Position, after: &Position, side: Side) -> bool {
    let opponent = side.opponent();
    after.bar(opponent) > before.bar(opponent)
}
