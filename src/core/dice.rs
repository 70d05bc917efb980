//! Dice rolls.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::rng::GameRng;

/// Die values to play for one turn: two for a plain roll, four for a double.
pub type DiceSequence = SmallVec<[u8; 4]>;

/// A pair of dice. `(0, 0)` means no roll has been issued yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Roll(pub u8, pub u8);

impl Roll {
    /// No roll issued yet; yields no moves.
    pub const NONE: Roll = Roll(0, 0);

    /// Create a roll from two die values.
    #[must_use]
    pub const fn new(a: u8, b: u8) -> Self {
        Self(a, b)
    }

    /// Roll two dice.
    pub fn random(rng: &mut GameRng) -> Self {
        let a = rng.roll_die();
        let b = rng.roll_die();
        Self(a, b)
    }

    /// Whether this is the `(0, 0)` placeholder.
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == 0 && self.1 == 0
    }

    /// Both dice show the same value.
    #[must_use]
    pub const fn is_double(self) -> bool {
        self.0 == self.1
    }

    /// Die values played this turn, in order.
    #[must_use]
    pub fn dice_sequence(self) -> DiceSequence {
        if self.is_none() {
            SmallVec::new()
        } else if self.is_double() {
            SmallVec::from_buf([self.0; 4])
        } else {
            let mut seq = SmallVec::new();
            seq.push(self.0);
            seq.push(self.1);
            seq
        }
    }
}

impl std::fmt::Display for Roll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}
