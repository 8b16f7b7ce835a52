//! Derived line scores for the 3x3 board.
//!
//! The score vector has one slot per line: `[row1, row2, row3, col1, col2,
//! col3, diagonal\, diagonal/]`. X marks add +1 to every line they sit on and
//! O marks add -1, so a slot of 3 or -3 means the line is complete.

use super::position::Position;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Number of lines on the board (3 rows, 3 columns, 2 diagonals).
pub const LINE_COUNT: usize = 8;

/// Value of a slot whose line is fully owned by one player.
pub const FULL_LINE: i8 = 3;

/// One signed slot per line.
pub type ScoreVector = [i8; LINE_COUNT];

/// Adds `sign` to every slot the square at `pos` belongs to.
pub fn apply_to(slots: &mut ScoreVector, pos: Position, sign: i8) {
    for line in pos.lines() {
        slots[line] += sign;
    }
}

/// Returns +1 if any slot is complete for X, -1 if any is complete for O, 0
/// otherwise. Stops at the first complete slot in slot order.
pub fn winning_sign(slots: &ScoreVector) -> i8 {
    slots
        .iter()
        .find(|&&s| s.abs() == FULL_LINE)
        .map_or(0, |s| s.signum())
}

/// Sum of all eight slots.
pub fn sum(slots: &ScoreVector) -> i32 {
    slots.iter().fold(0, |acc, &s| acc + i32::from(s))
}

/// Number of slots holding exactly `value`.
pub fn count(slots: &ScoreVector, value: i8) -> usize {
    slots.iter().filter(|&&s| s == value).count()
}

/// Maintains the score vector for one game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTracker {
    slots: ScoreVector,
}

impl ScoreTracker {
    /// Creates a tracker with every slot at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a mark at `pos`. Called exactly once per accepted move.
    #[instrument(skip(self), fields(slots = ?self.slots))]
    pub fn apply(&mut self, pos: Position, sign: i8) {
        debug_assert!(sign == 1 || sign == -1, "score sign must be +1 or -1");
        apply_to(&mut self.slots, pos, sign);
    }

    /// Copy of the current vector.
    pub fn snapshot(&self) -> ScoreVector {
        self.slots
    }

    /// Sign of the player owning a complete line, 0 if none.
    pub fn winning_sign(&self) -> i8 {
        winning_sign(&self.slots)
    }
}
