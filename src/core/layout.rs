//! Initial piece layouts.
//!
//! A `Layout` is the configurable starting point for a game. Each side's
//! counts use that side's own numbering (index 0 = bar, 1..=24 = points),
//! so a symmetric layout lists the same slots for both sides.

use serde::{Deserialize, Serialize};

use super::error::LayoutError;
use super::player::{Side, SideMap};
use super::position::SLOTS;

/// Most pieces a side may start with.
pub const MAX_PIECES: u32 = 15;

/// Starting piece counts for both sides.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    /// Human-readable name (for logging and the CLI).
    pub name: String,

    /// Per-side counts indexed by slot (bar + 24 points + unused 25).
    pub slots: SideMap<[u8; SLOTS]>,
}

impl Layout {
    /// Build a layout where both sides place `count` pieces on each listed slot.
    pub fn symmetric(
        name: impl Into<String>,
        points: &[(usize, u8)],
    ) -> Result<Self, LayoutError> {
        let mut counts = [0u8; SLOTS];
        for &(slot, count) in points {
            if slot > 24 {
                return Err(LayoutError::SlotOutOfRange { slot });
            }
            counts[slot] = counts[slot].saturating_add(count);
        }
        Self {
            name: name.into(),
            slots: SideMap::with_value(counts),
        }
        .checked()
    }

    /// Build a layout from separate per-side slot lists.
    pub fn from_points(
        name: impl Into<String>,
        a: &[(usize, u8)],
        b: &[(usize, u8)],
    ) -> Result<Self, LayoutError> {
        let mut slots = SideMap::with_value([0u8; SLOTS]);
        for (side, points) in [(Side::A, a), (Side::B, b)] {
            for &(slot, count) in points {
                if slot > 24 {
                    return Err(LayoutError::SlotOutOfRange { slot });
                }
                slots[side][slot] = slots[side][slot].saturating_add(count);
            }
        }
        Self {
            name: name.into(),
            slots,
        }
        .checked()
    }

    /// Standard 15-piece backgammon setup: 2/5/3/5 on points 1/12/17/19.
    #[must_use]
    pub fn standard() -> Self {
        let mut counts = [0u8; SLOTS];
        counts[1] = 2;
        counts[12] = 5;
        counts[17] = 3;
        counts[19] = 5;
        Self {
            name: "standard".to_string(),
            slots: SideMap::with_value(counts),
        }
    }

    /// Short-race stack: 6/3/3 on points 1/3/5 for each side.
    #[must_use]
    pub fn stacked() -> Self {
        let mut counts = [0u8; SLOTS];
        counts[1] = 6;
        counts[3] = 3;
        counts[5] = 3;
        Self {
            name: "stacked".to_string(),
            slots: SideMap::with_value(counts),
        }
    }

    /// Total pieces a side starts with.
    #[must_use]
    pub fn pieces(&self, side: Side) -> u32 {
        self.slots[side].iter().map(|&c| u32::from(c)).sum()
    }

    fn checked(self) -> Result<Self, LayoutError> {
        for side in Side::BOTH {
            let total = self.pieces(side);
            if total > MAX_PIECES {
                return Err(LayoutError::TooManyPieces {
                    side,
                    total,
                    max: MAX_PIECES,
                });
            }
        }
        Ok(self)
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::standard()
    }
}
