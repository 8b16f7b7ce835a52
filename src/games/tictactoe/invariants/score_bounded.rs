//! Score bound invariant: every slot stays within [-3, 3].

use super::super::score::FULL_LINE;
use super::super::{GameState, GameView};
use super::Invariant;

/// Invariant: no line slot leaves the range a three-cell line can produce.
pub struct ScoreBoundedInvariant;

impl Invariant<GameState> for ScoreBoundedInvariant {
    fn holds(state: &GameState) -> bool {
        state.score().iter().all(|s| s.abs() <= FULL_LINE)
    }

    fn description() -> &'static str {
        "Every score slot lies within [-3, 3]"
    }
}
