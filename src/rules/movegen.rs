//! Turn-level move generation.
//!
//! Combines single-die moves (`Position::legal_single_point_moves`) into the
//! set of positions reachable by playing a whole roll:
//!
//! - **Plain roll**: both orders (a then b, b then a), unioned.
//! - **Double**: the same die four times, carrying a frontier forward. When a
//!   step has no legal move the previous frontier is the result.
//!
//! A player uses as many dice as the position allows. If nothing at all can
//! be played the result is the unchanged position; only `Roll::NONE` yields
//! an empty set. Results are deduplicated by position equality and keep
//! first-seen order, so generation is deterministic.

use rustc_hash::FxHashSet;

use crate::core::{Position, Roll, Side};

/// Enumerates legal turn results for a side.
#[derive(Clone, Copy, Debug, Default)]
pub struct MoveGenerator;

impl MoveGenerator {
    /// Create a move generator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Every distinct position `side` can reach by playing `roll` from `position`.
    #[must_use]
    pub fn legal_moves(&self, position: &Position, roll: Roll, side: Side) -> Vec<Position> {
        if roll.is_none() {
            return Vec::new();
        }

        if roll.is_double() {
            let (frontier, _played) = self.play_sequence(position, &roll.dice_sequence(), side);
            return frontier;
        }

        let Roll(a, b) = roll;
        let mut seen = FxHashSet::default();
        let mut full = Vec::new();
        for order in [[a, b], [b, a]] {
            let (frontier, played) = self.play_sequence(position, &order, side);
            if played == 2 {
                push_unique(&mut full, &mut seen, frontier);
            }
        }
        if !full.is_empty() {
            return full;
        }

        // Only one die fits: take every single-die result from either die
        let mut single = Vec::new();
        for die in [a, b] {
            push_unique(&mut single, &mut seen, position.legal_single_point_moves(die, side));
        }
        if !single.is_empty() {
            return single;
        }

        vec![clean(*position)]
    }

    /// Play dice in order, breadth-first, stopping at the first die that
    /// cannot be played from any frontier position.
    ///
    /// Returns the final frontier and how many dice were played.
    #[must_use]
    pub fn play_sequence(&self, position: &Position, dice: &[u8], side: Side) -> (Vec<Position>, usize) {
        let mut frontier = vec![clean(*position)];
        let mut played = 0;

        for &die in dice {
            let mut seen = FxHashSet::default();
            let mut next = Vec::new();
            for pos in &frontier {
                push_unique(&mut next, &mut seen, pos.legal_single_point_moves(die, side));
            }
            if next.is_empty() {
                break;
            }
            frontier = next;
            played += 1;
        }

        (frontier, played)
    }
}

/// Append positions not seen before, keeping first-seen order.
fn push_unique(out: &mut Vec<Position>, seen: &mut FxHashSet<Position>, positions: Vec<Position>) {
    for pos in positions {
        if seen.insert(pos) {
            out.push(pos);
        }
    }
}

fn clean(mut position: Position) -> Position {
    position.clear_borne_off();
    position
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SLOTS;

    fn slots(points: &[(usize, u8)]) -> [u8; SLOTS] {
        let mut s = [0u8; SLOTS];
        for &(i, c) in points {
            s[i] = c;
        }
        s
    }

    #[test]
    fn test_no_roll_yields_nothing() {
        let pos = Position::default();
        assert!(MoveGenerator::new().legal_moves(&pos, Roll::NONE, Side::A).is_empty());
    }

    #[test]
    fn test_plain_roll_single_piece() {
        let pos = Position::from_slots(slots(&[(1, 1)]), slots(&[]));
        let moves = MoveGenerator::new().legal_moves(&pos, Roll::new(2, 3), Side::A);

        // Both orders end on point 6
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].point(Side::A, 6), 1);
    }

    #[test]
    fn test_plain_roll_unions_orders() {
        // B holds A's 3, so only the 3-then-2 order gets through
        let pos = Position::from_slots(slots(&[(1, 1)]), slots(&[(22, 2)]));
        let moves = MoveGenerator::new().legal_moves(&pos, Roll::new(2, 3), Side::A);

        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].point(Side::A, 6), 1);
    }

    #[test]
    fn test_plain_roll_two_pieces() {
        let pos = Position::from_slots(slots(&[(1, 1), (10, 1)]), slots(&[]));
        let moves = MoveGenerator::new().legal_moves(&pos, Roll::new(1, 2), Side::A);

        // {1->4}, {10->13}, {1->2,10->12}, {1->3,10->11}
        assert_eq!(moves.len(), 4);
        let distinct: FxHashSet<_> = moves.iter().copied().collect();
        assert_eq!(distinct.len(), moves.len());
    }

    #[test]
    fn test_plain_roll_partial_when_second_die_blocked() {
        // B holds A's 6 and A's 12: only 1 -> 7 with the 6 can be played
        let pos = Position::from_slots(slots(&[(1, 1)]), slots(&[(19, 2), (13, 2)]));
        let moves = MoveGenerator::new().legal_moves(&pos, Roll::new(5, 6), Side::A);

        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].point(Side::A, 7), 1);
    }

    #[test]
    fn test_fully_blocked_roll_keeps_position() {
        let pos = Position::from_slots(slots(&[(0, 1)]), slots(&[(22, 2), (21, 2)]));
        let moves = MoveGenerator::new().legal_moves(&pos, Roll::new(3, 4), Side::A);

        assert_eq!(moves, vec![pos]);
    }

    #[test]
    fn test_double_moves_four_times() {
        let pos = Position::from_slots(slots(&[(1, 1)]), slots(&[]));
        let moves = MoveGenerator::new().legal_moves(&pos, Roll::new(2, 2), Side::A);

        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].point(Side::A, 9), 1);
    }

    #[test]
    fn test_double_stops_when_frontier_empties() {
        // 1 -> 4 -> 7, then A's 10 (B's 15) is blocked
        let pos = Position::from_slots(slots(&[(1, 1)]), slots(&[(15, 2)]));
        let (frontier, played) = MoveGenerator::new().play_sequence(&pos, &[3, 3, 3, 3], Side::A);

        assert_eq!(played, 2);
        assert_eq!(frontier.len(), 1);
        assert_eq!(frontier[0].point(Side::A, 7), 1);
    }

    #[test]
    fn test_reentry_before_other_moves() {
        let pos = Position::from_slots(slots(&[(0, 1), (10, 2)]), slots(&[]));
        let moves = MoveGenerator::new().legal_moves(&pos, Roll::new(3, 5), Side::A);

        for m in &moves {
            assert_eq!(m.bar(Side::A), 0, "re-entry is mandatory");
        }
        // Enter with 3 or 5, then play the other die with any piece
        assert!(moves.iter().any(|m| m.point(Side::A, 8) == 1));
        assert!(moves.iter().any(|m| m.point(Side::A, 3) == 1 && m.point(Side::A, 15) == 1));
    }

    #[test]
    fn test_bearing_off_both_pieces() {
        let pos = Position::from_slots(slots(&[(23, 1), (24, 1)]), slots(&[]));
        let moves = MoveGenerator::new().legal_moves(&pos, Roll::new(1, 2), Side::A);

        assert!(moves.iter().all(|m| m.total_pieces(Side::A) < 2));
        assert!(moves.iter().any(|m| m.total_pieces(Side::A) == 0));
    }
}
