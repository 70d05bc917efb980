//! Board position: piece counts for both sides and single-die transitions.
//!
//! ## Slot numbering
//!
//! Each side stores 26 slots in its own direction of travel:
//!
//! - `0`: the bar (captured pieces waiting to re-enter)
//! - `1..=24`: points, entered at 1 and borne off past 24
//! - `25`: unused; a piece reaching it leaves play
//!
//! A side's point `p` is the opponent's point `25 - p` (see [`mirror`]).
//! There is no slot for borne-off pieces: a side's total only ever shrinks
//! by bearing off.
//!
//! ## Value semantics
//!
//! `Position` is `Copy`. Applying a move returns a new position and never
//! touches the source. Equality and hashing look at the piece counts only;
//! the one-shot bear-off flag is ignored.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::error::MoveError;
use super::layout::Layout;
use super::player::{Side, SideMap};

/// Slots per side (bar + 24 points + the unused off-board slot).
pub const SLOTS: usize = 26;

/// Bar slot index.
pub const BAR: usize = 0;

/// Number of board points.
pub const POINTS: usize = 24;

/// Destination index at which a piece leaves play.
pub const OFF_BOARD: usize = 25;

/// Map a point in one side's numbering to the opponent's numbering.
#[inline]
#[must_use]
pub const fn mirror(point: usize) -> usize {
    OFF_BOARD - point
}

/// A backgammon position.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Position {
    pieces: SideMap<[u8; SLOTS]>,

    /// Set when the move that produced this position bore a piece off.
    borne_off: bool,
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.pieces == other.pieces
    }
}

impl Eq for Position {}

impl Hash for Position {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pieces.hash(state);
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::from_layout(&Layout::standard())
    }
}

impl Position {
    /// A board with no pieces at all.
    #[must_use]
    pub fn empty() -> Self {
        Self::from_slots([0; SLOTS], [0; SLOTS])
    }

    /// Build a position from raw per-side slot counts.
    #[must_use]
    pub fn from_slots(a: [u8; SLOTS], b: [u8; SLOTS]) -> Self {
        Self {
            pieces: SideMap::new(|side| match side {
                Side::A => a,
                Side::B => b,
            }),
            borne_off: false,
        }
    }

    /// Build the starting position for a layout.
    #[must_use]
    pub fn from_layout(layout: &Layout) -> Self {
        Self {
            pieces: layout.slots,
            borne_off: false,
        }
    }

    // === Queries ===

    /// All 26 slot counts for a side.
    #[must_use]
    pub fn pieces(&self, side: Side) -> &[u8; SLOTS] {
        &self.pieces[side]
    }

    /// Pieces a side has on the bar.
    #[must_use]
    pub fn bar(&self, side: Side) -> u8 {
        self.pieces[side][BAR]
    }

    /// Pieces a side has on a slot (in that side's numbering).
    #[must_use]
    pub fn point(&self, side: Side, slot: usize) -> u8 {
        self.pieces[side][slot]
    }

    /// Pieces a side still has in play (bar + points).
    #[must_use]
    pub fn total_pieces(&self, side: Side) -> u32 {
        self.pieces[side].iter().map(|&c| u32::from(c)).sum()
    }

    /// Number of points holding exactly one of the side's pieces.
    #[must_use]
    pub fn exposed_points(&self, side: Side) -> usize {
        self.pieces[side][1..=POINTS].iter().filter(|&&c| c == 1).count()
    }

    /// Who occupies a board point, given in side A's numbering.
    ///
    /// Returns `None` for an empty point or an index outside 1..=24.
    #[must_use]
    pub fn occupant(&self, point: usize) -> Option<(Side, u8)> {
        if !(1..=POINTS).contains(&point) {
            return None;
        }
        let a = self.pieces[Side::A][point];
        let b = self.pieces[Side::B][mirror(point)];
        if a > 0 {
            Some((Side::A, a))
        } else if b > 0 {
            Some((Side::B, b))
        } else {
            None
        }
    }

    /// Whether the move that produced this position bore a piece off.
    #[must_use]
    pub fn just_borne_off(&self) -> bool {
        self.borne_off
    }

    /// Consume the bear-off flag.
    pub fn clear_borne_off(&mut self) {
        self.borne_off = false;
    }

    // === Transitions ===

    /// Whether a piece of `side` moving `distance` from `start` may land.
    ///
    /// Bearing off is always allowed. Otherwise the destination is free
    /// unless the opponent holds two or more pieces there.
    #[must_use]
    pub fn is_destination_free(&self, start: usize, distance: usize, side: Side) -> bool {
        let spot = OFF_BOARD as i64 - start as i64 - distance as i64;
        if spot <= 0 {
            return true;
        }
        self.pieces[side.opponent()][spot as usize] < 2
    }

    /// Move one piece of `side` from `start` by `distance`, returning the new position.
    ///
    /// Landing on a lone opposing piece sends it to the opponent's bar.
    /// Reaching or passing the off-board index removes the piece from play
    /// and sets the bear-off flag.
    pub fn apply_move(&self, start: usize, distance: usize, side: Side) -> Result<Position, MoveError> {
        if start > POINTS {
            return Err(MoveError::SourceOutOfRange { start });
        }
        if distance == 0 {
            return Err(MoveError::ZeroDistance);
        }
        if self.pieces[side][start] == 0 {
            return Err(MoveError::EmptySource { start });
        }

        let mut next = *self;
        next.borne_off = false;

        let dest = start + distance;
        if dest >= OFF_BOARD {
            next.pieces[side][start] -= 1;
            next.borne_off = true;
            return Ok(next);
        }

        let opponent = side.opponent();
        let spot = mirror(dest);
        let held = self.pieces[opponent][spot];
        if held >= 2 {
            return Err(MoveError::Blocked { point: dest, count: held });
        }

        next.pieces[side][start] -= 1;
        next.pieces[side][dest] = next.pieces[side][dest]
            .checked_add(1)
            .ok_or(MoveError::SlotOverflow { side, slot: dest })?;
        if held == 1 {
            next.pieces[opponent][BAR] = next.pieces[opponent][BAR]
                .checked_add(held)
                .ok_or(MoveError::SlotOverflow { side: opponent, slot: BAR })?;
            next.pieces[opponent][spot] = 0;
        }
        Ok(next)
    }

    /// Every position reachable by playing one die of value `die`.
    ///
    /// Pieces on the bar must re-enter first: while the bar is occupied only
    /// the re-entry move is considered. Results are ordered by source slot.
    #[must_use]
    pub fn legal_single_point_moves(&self, die: u8, side: Side) -> Vec<Position> {
        let distance = usize::from(die);
        if distance == 0 {
            return Vec::new();
        }

        if self.bar(side) > 0 {
            if !self.is_destination_free(BAR, distance, side) {
                return Vec::new();
            }
            return self.apply_move(BAR, distance, side).into_iter().collect();
        }

        (1..=POINTS)
            .filter(|&slot| self.pieces[side][slot] > 0)
            .filter(|&slot| self.is_destination_free(slot, distance, side))
            .filter_map(|slot| self.apply_move(slot, distance, side).ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    fn slots(points: &[(usize, u8)]) -> [u8; SLOTS] {
        let mut s = [0u8; SLOTS];
        for &(i, c) in points {
            s[i] = c;
        }
        s
    }

    #[test]
    fn test_mirror() {
        assert_eq!(mirror(1), 24);
        assert_eq!(mirror(24), 1);
        assert_eq!(mirror(12), 13);
    }

    #[test]
    fn test_apply_move_simple() {
        let pos = Position::from_slots(slots(&[(1, 2)]), slots(&[]));
        let next = pos.apply_move(1, 3, Side::A).unwrap();

        assert_eq!(next.point(Side::A, 1), 1);
        assert_eq!(next.point(Side::A, 4), 1);
        assert_eq!(next.total_pieces(Side::A), 2);
        assert!(!next.just_borne_off());

        // Source untouched
        assert_eq!(pos.point(Side::A, 1), 2);
    }

    #[test]
    fn test_apply_move_capture() {
        // A moves 1 -> 5, B has a lone piece on its point 20 (= A's 5)
        let pos = Position::from_slots(slots(&[(1, 2)]), slots(&[(20, 1), (3, 2)]));
        let next = pos.apply_move(1, 4, Side::A).unwrap();

        assert_eq!(next.point(Side::A, 5), 1);
        assert_eq!(next.point(Side::B, 20), 0);
        assert_eq!(next.bar(Side::B), 1);
        assert_eq!(next.total_pieces(Side::B), 3);
    }

    #[test]
    fn test_apply_move_capture_for_side_b() {
        let pos = Position::from_slots(slots(&[(22, 1)]), slots(&[(1, 1)]));
        // B 1 -> 3 lands on A's 22
        let next = pos.apply_move(1, 2, Side::B).unwrap();

        assert_eq!(next.point(Side::B, 3), 1);
        assert_eq!(next.point(Side::A, 22), 0);
        assert_eq!(next.bar(Side::A), 1);
    }

    #[test]
    fn test_apply_move_blocked() {
        let pos = Position::from_slots(slots(&[(1, 1)]), slots(&[(20, 2)]));
        let err = pos.apply_move(1, 4, Side::A).unwrap_err();
        assert_eq!(err, MoveError::Blocked { point: 5, count: 2 });
    }

    #[test]
    fn test_apply_move_bear_off() {
        let pos = Position::from_slots(slots(&[(22, 1), (24, 1)]), slots(&[]));

        let exact = pos.apply_move(22, 3, Side::A).unwrap();
        assert!(exact.just_borne_off());
        assert_eq!(exact.total_pieces(Side::A), 1);

        let overshoot = pos.apply_move(24, 6, Side::A).unwrap();
        assert!(overshoot.just_borne_off());
        assert_eq!(overshoot.total_pieces(Side::A), 1);
    }

    #[test]
    fn test_apply_move_invalid() {
        let pos = Position::from_slots(slots(&[(3, 1)]), slots(&[]));

        assert_eq!(
            pos.apply_move(25, 1, Side::A).unwrap_err(),
            MoveError::SourceOutOfRange { start: 25 }
        );
        assert_eq!(pos.apply_move(3, 0, Side::A).unwrap_err(), MoveError::ZeroDistance);
        assert_eq!(
            pos.apply_move(4, 1, Side::A).unwrap_err(),
            MoveError::EmptySource { start: 4 }
        );
    }

    #[test]
    fn test_apply_move_reports_full_bar() {
        let pos = Position::from_slots(slots(&[(1, 1)]), slots(&[(0, u8::MAX), (23, 1)]));
        let err = pos.apply_move(1, 1, Side::A).unwrap_err();

        assert_eq!(err, MoveError::SlotOverflow { side: Side::B, slot: BAR });
        assert!(pos.legal_single_point_moves(1, Side::A).is_empty());
    }

    #[test]
    fn test_destination_free() {
        let pos = Position::from_slots(slots(&[(1, 1)]), slots(&[(20, 2), (21, 1)]));

        assert!(!pos.is_destination_free(1, 4, Side::A)); // B holds 2 on A's 5
        assert!(pos.is_destination_free(1, 3, Side::A)); // lone B piece on A's 4
        assert!(pos.is_destination_free(1, 2, Side::A)); // empty
        assert!(pos.is_destination_free(20, 6, Side::A)); // bearing off
    }

    #[test]
    fn test_single_point_moves_from_points() {
        let pos = Position::from_slots(slots(&[(1, 1), (6, 2), (10, 1)]), slots(&[(14, 2)]));
        // B's 14 is A's 11: 6 -> 11 is blocked for die 5
        let moves = pos.legal_single_point_moves(5, Side::A);

        assert_eq!(moves.len(), 2);
        assert_eq!(moves[0].point(Side::A, 1), 0); // 1 -> 6 first
        assert_eq!(moves[0].point(Side::A, 6), 3);
        assert_eq!(moves[1].point(Side::A, 15), 1); // 10 -> 15
    }

    #[test]
    fn test_single_point_moves_reentry_is_exclusive() {
        let pos = Position::from_slots(slots(&[(0, 1), (5, 3)]), slots(&[]));
        let moves = pos.legal_single_point_moves(2, Side::A);

        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].bar(Side::A), 0);
        assert_eq!(moves[0].point(Side::A, 2), 1);
    }

    #[test]
    fn test_single_point_moves_reentry_blocked() {
        // B holds A's 3 (B's 22)
        let pos = Position::from_slots(slots(&[(0, 1), (5, 3)]), slots(&[(22, 2)]));
        assert!(pos.legal_single_point_moves(3, Side::A).is_empty());
    }

    #[test]
    fn test_equality_ignores_bear_off_flag() {
        let pos = Position::from_slots(slots(&[(24, 2)]), slots(&[]));
        let moved = pos.apply_move(24, 1, Side::A).unwrap();
        let mut cleared = moved;
        cleared.clear_borne_off();

        assert!(moved.just_borne_off());
        assert_eq!(moved, cleared);

        let mut set = FxHashSet::default();
        set.insert(moved);
        assert!(set.contains(&cleared));
    }

    #[test]
    fn test_exposed_points() {
        let pos = Position::from_slots(slots(&[(0, 1), (2, 1), (3, 2), (9, 1)]), slots(&[]));
        // Bar piece does not count
        assert_eq!(pos.exposed_points(Side::A), 2);
    }

    #[test]
    fn test_occupant() {
        let pos = Position::from_layout(&Layout::standard());

        assert_eq!(pos.occupant(1), Some((Side::A, 2)));
        assert_eq!(pos.occupant(24), Some((Side::B, 2)));
        assert_eq!(pos.occupant(2), None);
        assert_eq!(pos.occupant(0), None);
    }
}
