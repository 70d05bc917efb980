//! Single-game rollout state machine.
//!
//! A rollout alternates sides: roll, enumerate legal moves, let the policy
//! pick one, hand the turn over. It ends when the side that just moved has
//! no pieces left, or is drawn when the turn ceiling is reached.

use serde::{Deserialize, Serialize};

use crate::core::{GameRng, Position, Roll, Side};
use crate::rules::MoveGenerator;

use super::policy::SelectionPolicy;

/// Where a rollout stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RolloutStatus {
    InProgress,
    /// The side bore off its last piece.
    Won(Side),
    /// The turn ceiling was reached without a winner.
    Drawn,
}

impl RolloutStatus {
    /// Whether the rollout has finished.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, RolloutStatus::InProgress)
    }
}

/// Mutable per-game state.
#[derive(Clone, Debug)]
pub struct GameState {
    /// Current board.
    pub position: Position,

    /// Last roll issued; `Roll::NONE` before the first turn.
    pub roll: Roll,

    /// Side to move next.
    pub to_move: Side,

    /// Legal results of the last roll for the side that played it.
    pub legal: Vec<Position>,

    /// Turns played so far, passes included.
    pub turns: u32,
}

impl GameState {
    /// Fresh state with `to_move` about to roll.
    #[must_use]
    pub fn new(position: Position, to_move: Side) -> Self {
        Self {
            position,
            roll: Roll::NONE,
            to_move,
            legal: Vec::new(),
            turns: 0,
        }
    }

    /// Classify the state against a turn ceiling.
    #[must_use]
    pub fn status(&self, max_turns: u32) -> RolloutStatus {
        let just_moved = self.to_move.opponent();
        if self.position.total_pieces(just_moved) == 0 {
            RolloutStatus::Won(just_moved)
        } else if self.turns >= max_turns {
            RolloutStatus::Drawn
        } else {
            RolloutStatus::InProgress
        }
    }
}

/// Plays one game to completion with a selection policy.
pub struct RolloutSimulator<'a> {
    generator: MoveGenerator,
    policy: &'a dyn SelectionPolicy,
    max_turns: u32,
    state: GameState,
}

impl<'a> RolloutSimulator<'a> {
    /// Start a rollout from `position` with `to_move` rolling first.
    pub fn new(position: Position, to_move: Side, policy: &'a dyn SelectionPolicy, max_turns: u32) -> Self {
        Self {
            generator: MoveGenerator::new(),
            policy,
            max_turns,
            state: GameState::new(position, to_move),
        }
    }

    /// Current game state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> RolloutStatus {
        self.state.status(self.max_turns)
    }

    /// Play a single turn. Does nothing once the rollout has finished.
    pub fn step(&mut self, rng: &mut GameRng) -> RolloutStatus {
        let status = self.status();
        if status.is_terminal() {
            return status;
        }

        let side = self.state.to_move;
        self.state.roll = Roll::random(rng);
        self.state.legal = self.generator.legal_moves(&self.state.position, self.state.roll, side);

        // No candidates is a pass
        if let Some(next) = self.policy.select(&self.state.position, &self.state.legal, side, rng) {
            self.state.position = next;
        }

        self.state.to_move = side.opponent();
        self.state.turns += 1;
        self.status()
    }

    /// Play turns until the rollout finishes.
    pub fn run(&mut self, rng: &mut GameRng) -> RolloutStatus {
        loop {
            let status = self.step(rng);
            if status.is_terminal() {
                return status;
            }
        }
    }
}
