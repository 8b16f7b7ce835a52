//! Turn count invariant: one turn per occupied square.

use super::super::{GameState, GameView};
use super::Invariant;

/// Invariant: the turn counter equals the number of marks on the board.
///
/// Since moves are only accepted from the player matching the turn parity,
/// this also pins the X/O counts to differ by at most one.
pub struct TurnCountInvariant;

impl Invariant<GameState> for TurnCountInvariant {
    fn holds(state: &GameState) -> bool {
        usize::from(state.turn()) == state.board().occupied()
    }

    fn description() -> &'static str {
        "Turn counter equals number of occupied squares"
    }
}
