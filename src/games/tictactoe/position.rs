//! Square identities on the 3x3 board.
//!
//! A position is a `(row, col)` pair with both coordinates in `0..3`. The
//! presentation layer addresses squares by a two-character code, row digit
//! then column digit (`"00"` .. `"22"`).

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Slot of the score vector for the `\` diagonal.
pub const BACKSLASH_SLOT: usize = 6;
/// Slot of the score vector for the `/` diagonal.
pub const SLASH_SLOT: usize = 7;

/// A position on the tic-tac-toe board.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize,
)]
#[display("{row}{col}")]
#[serde(into = "String", try_from = "String")]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    /// Top-left corner.
    pub const TOP_LEFT: Position = Position { row: 0, col: 0 };
    /// Top-right corner.
    pub const TOP_RIGHT: Position = Position { row: 0, col: 2 };
    /// Center square.
    pub const CENTER: Position = Position { row: 1, col: 1 };
    /// Bottom-left corner.
    pub const BOTTOM_LEFT: Position = Position { row: 2, col: 0 };
    /// Bottom-right corner.
    pub const BOTTOM_RIGHT: Position = Position { row: 2, col: 2 };

    /// All 9 positions in reading order (row 0 first, column 0 first).
    pub const ALL: [Position; 9] = [
        Position { row: 0, col: 0 },
        Position { row: 0, col: 1 },
        Position { row: 0, col: 2 },
        Position { row: 1, col: 0 },
        Position { row: 1, col: 1 },
        Position { row: 1, col: 2 },
        Position { row: 2, col: 0 },
        Position { row: 2, col: 1 },
        Position { row: 2, col: 2 },
    ];

    /// The four corners.
    pub const CORNERS: [Position; 4] = [
        Position::TOP_LEFT,
        Position::TOP_RIGHT,
        Position::BOTTOM_LEFT,
        Position::BOTTOM_RIGHT,
    ];

    /// Creates a position, `None` if either coordinate is off the board.
    pub fn new(row: u8, col: u8) -> Option<Self> {
        (row < 3 && col < 3).then_some(Self { row, col })
    }

    /// Converts position to board index (0-8, row-major).
    pub fn to_index(self) -> usize {
        usize::from(self.row * 3 + self.col)
    }

    /// Returns true for the four corner squares.
    pub fn is_corner(self) -> bool {
        self.row != 1 && self.col != 1
    }

    /// Score-vector slots this square contributes to.
    ///
    /// The column coordinate selects the row-line slot (0-2) and the row
    /// coordinate selects the column-line slot (3-5). Engine and heuristic
    /// both rely on this exact mapping.
    pub fn lines(self) -> impl Iterator<Item = usize> {
        let (row, col) = (usize::from(self.row), usize::from(self.col));
        [
            Some(col),
            Some(row + 3),
            (row == col).then_some(BACKSLASH_SLOT),
            (row + col == 2).then_some(SLASH_SLOT),
        ]
        .into_iter()
        .flatten()
    }

    /// Two-character code: row digit followed by column digit.
    pub fn code(self) -> String {
        self.to_string()
    }

    /// Decodes a two-character code produced by the presentation layer.
    ///
    /// # Panics
    ///
    /// Panics on a malformed code. Codes come from the board's own markup, so
    /// a bad one is a programming error rather than a game condition. Use
    /// [`str::parse`] for untrusted input.
    #[track_caller]
    pub fn from_code(code: &str) -> Self {
        match code.parse() {
            Ok(pos) => pos,
            Err(e) => panic!("{e}"),
        }
    }

    /// Label for this position (for display).
    pub fn label(self) -> &'static str {
        const LABELS: [&str; 9] = [
            "Top-left",
            "Top-center",
            "Top-right",
            "Middle-left",
            "Center",
            "Middle-right",
            "Bottom-left",
            "Bottom-center",
            "Bottom-right",
        ];
        LABELS[self.to_index()]
    }
}

/// Error returned when text is not a valid two-digit square code.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Malformed square code {:?}: expected row and column digits 0-2", input)]
pub struct PositionParseError {
    /// The rejected input.
    pub input: String,
}

impl FromStr for Position {
    type Err = PositionParseError;

    #[instrument]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || PositionParseError {
            input: s.to_string(),
        };
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(err());
        }
        let digit = |b: u8| b.is_ascii_digit().then(|| b - b'0');
        match (digit(bytes[0]), digit(bytes[1])) {
            (Some(row), Some(col)) => Position::new(row, col).ok_or_else(err),
            _ => Err(err()),
        }
    }
}

impl From<Position> for String {
    fn from(pos: Position) -> Self {
        pos.code()
    }
}

impl TryFrom<String> for Position {
    type Error = PositionParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_use_crossed_mapping() {
        let top_middle = Position::new(0, 1).unwrap();
        assert_eq!(top_middle.lines().collect::<Vec<_>>(), vec![1, 3]);

        let bottom_left = Position::new(2, 0).unwrap();
        assert_eq!(bottom_left.lines().collect::<Vec<_>>(), vec![0, 5, SLASH_SLOT]);
    }

    #[test]
    fn test_center_touches_four_lines() {
        assert_eq!(
            Position::CENTER.lines().collect::<Vec<_>>(),
            vec![1, 4, BACKSLASH_SLOT, SLASH_SLOT]
        );
    }

    #[test]
    fn test_code_round_trip() {
        for pos in Position::ALL {
            assert_eq!(Position::from_code(&pos.code()), pos);
        }
    }

    #[test]
    fn test_display_is_row_then_column() {
        assert_eq!(Position::BOTTOM_LEFT.to_string(), "20");
        assert_eq!(Position::TOP_RIGHT.code(), "02");
    }

    #[test]
    fn test_parse_rejects_malformed_codes() {
        for bad in ["", "0", "000", "30", "03", "a1", "g00", "-1"] {
            assert!(bad.parse::<Position>().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    #[should_panic(expected = "Malformed square code")]
    fn test_from_code_panics_on_malformed_code() {
        Position::from_code("9x");
    }

    #[test]
    fn test_corners() {
        let corners: Vec<_> = Position::ALL.into_iter().filter(|p| p.is_corner()).collect();
        assert_eq!(corners.len(), 4);
        assert!(Position::CORNERS.iter().all(|p| corners.contains(p)));
    }

    #[test]
    fn test_serde_uses_code() {
        let json = serde_json::to_string(&Position::BOTTOM_LEFT).unwrap();
        assert_eq!(json, "\"20\"");
        let back: Position = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Position::BOTTOM_LEFT);
    }
}
