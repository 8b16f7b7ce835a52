//! Score consistency invariant: the score vector is derivable from the board.

use super::super::score::{ScoreVector, apply_to};
use super::super::{GameState, GameView, Position, Square};
use super::Invariant;

/// Invariant: the tracked vector equals the vector recomputed from occupancy.
///
/// Together with the bound check this gives the win rule: a slot reaches
/// ±3 only when all three of its cells hold the same mark.
pub struct ScoreConsistentInvariant;

/// Recomputes the score vector from scratch.
pub fn recompute(state: &GameState) -> ScoreVector {
    let mut slots = ScoreVector::default();
    for pos in Position::ALL {
        if let Square::Occupied(player) = state.board().get(pos) {
            apply_to(&mut slots, pos, player.sign());
        }
    }
    slots
}

impl Invariant<GameState> for ScoreConsistentInvariant {
    fn holds(state: &GameState) -> bool {
        recompute(state) == state.score()
    }

    fn description() -> &'static str {
        "Score vector matches board occupancy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::Player;

    #[test]
    fn test_corrupted_board_violates() {
        let mut state = GameState::new();
        assert!(ScoreConsistentInvariant::holds(&state));

        state.corrupt_square(Position::TOP_LEFT, Square::Occupied(Player::X));
        assert!(!ScoreConsistentInvariant::holds(&state));
    }
}
