//! Text rendering of a position.
//!
//! Points are shown in side A's numbering: the top row runs 13..24 left to
//! right, the bottom row 12..1, so A travels counter-clockwise. Each cell is
//! the owner letter and piece count (`A02`), or blank.

use std::fmt;

use crate::core::{Layout, Position, Side, POINTS};

/// Display adapter for a position, optionally with its starting layout.
///
/// With a layout, borne-off counts are derived as starting pieces minus
/// pieces still in play.
#[derive(Clone, Copy, Debug)]
pub struct BoardView<'a> {
    position: &'a Position,
    layout: Option<&'a Layout>,
}

impl<'a> BoardView<'a> {
    #[must_use]
    pub fn new(position: &'a Position) -> Self {
        Self { position, layout: None }
    }

    /// Show borne-off counts relative to `layout`.
    #[must_use]
    pub fn with_layout(mut self, layout: &'a Layout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Three-character cell for a point in A's numbering.
    #[must_use]
    pub fn cell(&self, point: usize) -> String {
        match self.position.occupant(point) {
            Some((side, count)) => format!("{}{:02}", side.letter(), count),
            None => "   ".to_string(),
        }
    }

    /// Pieces `side` has borne off, if a layout is attached.
    #[must_use]
    pub fn borne_off(&self, side: Side) -> Option<u32> {
        self.layout
            .map(|layout| layout.pieces(side).saturating_sub(self.position.total_pieces(side)))
    }

    fn write_row(&self, f: &mut fmt::Formatter<'_>, points: impl Iterator<Item = usize> + Clone) -> fmt::Result {
        for point in points.clone() {
            write!(f, " {point:>2} ")?;
        }
        writeln!(f)?;
        write!(f, "|")?;
        for point in points {
            write!(f, "{}|", self.cell(point))?;
        }
        writeln!(f)
    }
}

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let half = POINTS / 2;
        self.write_row(f, half + 1..=POINTS)?;
        self.write_row(f, (1..=half).rev())?;

        write!(
            f,
            "bar: A {}  B {}",
            self.position.bar(Side::A),
            self.position.bar(Side::B)
        )?;
        if let (Some(a), Some(b)) = (self.borne_off(Side::A), self.borne_off(Side::B)) {
            write!(f, "   off: A {a}  B {b}")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&BoardView::new(self), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_rows() {
        let position = Position::default();
        let text = BoardView::new(&position).to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 5);
        // Top row: B's 12 is A's 13, B's 1 is A's 24
        assert!(lines[1].starts_with("|B05|"));
        assert!(lines[1].ends_with("|B02|"));
        // Bottom row ends at A's point 1
        assert!(lines[3].starts_with("|A05|"));
        assert!(lines[3].ends_with("|A02|"));
        assert_eq!(lines[4], "bar: A 0  B 0");
    }

    #[test]
    fn test_cells() {
        let position = Position::default();
        let view = BoardView::new(&position);
        assert_eq!(view.cell(1), "A02");
        assert_eq!(view.cell(2), "   ");
        assert_eq!(view.cell(8), "B03");
    }

    #[test]
    fn test_borne_off_with_layout() {
        let layout = Layout::standard();
        let position = Position::from_layout(&layout)
            .apply_move(19, 6, Side::A)
            .unwrap();

        let view = BoardView::new(&position).with_layout(&layout);
        assert_eq!(view.borne_off(Side::A), Some(1));
        assert_eq!(view.borne_off(Side::B), Some(0));
        assert!(view.to_string().contains("off: A 1  B 0"));
        assert_eq!(BoardView::new(&position).borne_off(Side::A), None);
    }

    #[test]
    fn test_position_display_matches_view() {
        let position = Position::default();
        assert_eq!(position.to_string(), BoardView::new(&position).to_string());
    }
}
