//! Parallel Monte Carlo evaluation of first-ply candidates.
//!
//! One scoped worker thread per candidate. Each worker owns a copy of its
//! candidate and a fork of the master RNG, runs the full trial budget, and
//! sends its tally over a channel exactly once. The coordinator joins every
//! worker, turns panics into [`WorkerFailure`]s, and ranks the rest.

use std::any::Any;
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use log::{debug, info, trace, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::error::Result;
use crate::core::{GameRng, Position, Roll, Side};
use crate::rules::MoveGenerator;

use super::config::RolloutConfig;
use super::policy::{HeuristicPolicy, SelectionPolicy};
use super::simulator::RolloutSimulator;
use super::stats::{EvaluationStats, Tally};

// =============================================================================
// Results
// =============================================================================

/// A scored first-ply candidate.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CandidateScore {
    /// Index in the generated candidate list.
    pub index: usize,
    pub position: Position,
    pub tally: Tally,
    /// `(wins + draw_weight * draws) / trials`, in [0, 1].
    pub score: f64,
}

/// A worker that panicked instead of reporting a tally.
#[derive(Error, Clone, Debug)]
#[error("worker for candidate {candidate_index} failed: {message}")]
pub struct WorkerFailure {
    pub candidate_index: usize,
    pub candidate: Position,
    pub message: String,
}

/// Outcome of one evaluation.
#[derive(Clone, Debug)]
pub struct Evaluation {
    /// Roll the candidates were generated from.
    pub roll: Roll,

    /// Side that played the roll; scores are from its perspective.
    pub mover: Side,

    /// Successful candidates, best first. Equal scores keep candidate order.
    pub ranked: Vec<CandidateScore>,

    /// Candidates excluded from the ranking, in candidate order.
    pub failures: Vec<WorkerFailure>,

    pub stats: EvaluationStats,
}

impl Evaluation {
    /// Highest-scoring candidate, if any worker succeeded.
    #[must_use]
    pub fn best(&self) -> Option<&CandidateScore> {
        self.ranked.first()
    }
}

// =============================================================================
// Evaluator
// =============================================================================

/// Ranks the moves available for a roll by rollout win rate.
pub struct ParallelEvaluator {
    config: RolloutConfig,
    generator: MoveGenerator,
    policy: Box<dyn SelectionPolicy>,
    rng: GameRng,
}

impl ParallelEvaluator {
    /// Create an evaluator driven by the heuristic policy.
    ///
    /// Fails if the config does not validate.
    pub fn new(config: RolloutConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            policy: Box::new(HeuristicPolicy::from_config(&config)),
            rng: GameRng::new(config.seed),
            generator: MoveGenerator::new(),
            config,
        })
    }

    /// Set a custom rollout policy.
    pub fn with_policy<P: SelectionPolicy + 'static>(mut self, policy: P) -> Self {
        self.policy = Box::new(policy);
        self
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &RolloutConfig {
        &self.config
    }

    /// Starting position built from the configured layout.
    #[must_use]
    pub fn opening_position(&self) -> Position {
        Position::from_layout(&self.config.layout)
    }

    /// Roll for `mover` and evaluate from the configured starting layout.
    pub fn evaluate_opening(&mut self, mover: Side) -> Evaluation {
        let position = self.opening_position();
        self.evaluate(&position, mover)
    }

    /// Roll for `mover` from the master stream, then evaluate that roll.
    pub fn evaluate(&mut self, position: &Position, mover: Side) -> Evaluation {
        let roll = Roll::random(&mut self.rng);
        self.evaluate_with_roll(position, roll, mover)
    }

    /// Evaluate every legal result of `roll` for `mover`.
    pub fn evaluate_with_roll(&mut self, position: &Position, roll: Roll, mover: Side) -> Evaluation {
        let candidates = self.generator.legal_moves(position, roll, mover);
        self.evaluate_candidates(&candidates, roll, mover)
    }

    /// Score an explicit candidate list.
    ///
    /// Worker `i` gets the `i+1`-th fork of the master stream, so the same
    /// seed and candidate list always produce the same ranking.
    pub fn evaluate_candidates(&mut self, candidates: &[Position], roll: Roll, mover: Side) -> Evaluation {
        let start = Instant::now();
        debug!(
            "evaluating {} candidates for {mover} on {roll}: {} trials, {} turn ceiling",
            candidates.len(),
            self.config.trials,
            self.config.max_turns
        );

        let streams: Vec<GameRng> = candidates.iter().map(|_| self.rng.fork()).collect();
        let policy: &dyn SelectionPolicy = self.policy.as_ref();
        let config = &self.config;

        let (tx, rx) = mpsc::channel::<(usize, Tally)>();
        let mut failures = Vec::new();

        thread::scope(|scope| {
            let handles: Vec<_> = candidates
                .iter()
                .copied()
                .zip(streams)
                .enumerate()
                .map(|(index, (candidate, rng))| {
                    let tx = tx.clone();
                    scope.spawn(move || {
                        let tally = run_trials(candidate, mover, policy, config, rng);
                        debug!("candidate {index}: {tally:?}");
                        // The receiver outlives the scope
                        let _ = tx.send((index, tally));
                    })
                })
                .collect();

            for (index, handle) in handles.into_iter().enumerate() {
                if let Err(payload) = handle.join() {
                    let failure = WorkerFailure {
                        candidate_index: index,
                        candidate: candidates[index],
                        message: panic_message(payload.as_ref()),
                    };
                    warn!("{failure}");
                    failures.push(failure);
                }
            }
        });
        drop(tx);

        let draw_weight = self.config.draw_weight;
        let mut ranked: Vec<CandidateScore> = rx
            .into_iter()
            .map(|(index, tally)| CandidateScore {
                index,
                position: candidates[index],
                tally,
                score: tally.score(draw_weight),
            })
            .collect();
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.index.cmp(&b.index)));

        let mut stats = EvaluationStats::new();
        stats.candidates = candidates.len() as u32;
        stats.failures = failures.len() as u32;
        for entry in &ranked {
            stats.totals.merge(&entry.tally);
        }
        stats.rollouts = stats.totals.trials();
        stats.time_us = start.elapsed().as_micros() as u64;

        match ranked.first() {
            Some(best) => info!(
                "ranked {} candidates ({} failed) in {} us; best #{} scored {:.3}",
                ranked.len(),
                failures.len(),
                stats.time_us,
                best.index,
                best.score
            ),
            None => info!("no candidates ranked ({} failed)", failures.len()),
        }

        Evaluation {
            roll,
            mover,
            ranked,
            failures,
            stats,
        }
    }
}

/// Run the trial budget for one candidate. The opponent moves first.
fn run_trials(
    candidate: Position,
    mover: Side,
    policy: &dyn SelectionPolicy,
    config: &RolloutConfig,
    mut rng: GameRng,
) -> Tally {
    let mut tally = Tally::new();
    for trial in 0..config.trials {
        let mut sim = RolloutSimulator::new(candidate, mover.opponent(), policy, config.max_turns);
        let status = sim.run(&mut rng);
        trace!("trial {trial}: {status:?} after {} turns", sim.state().turns);
        tally.record(status, mover);
    }
    tally
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "worker panicked".to_string()
    }
}
