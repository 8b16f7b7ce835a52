//! Game state and the move transition.

use super::action::{Move, MoveRejected};
use super::position::Position;
use super::score::{ScoreTracker, ScoreVector};
use super::types::{Board, GameStatus, Outcome, Player, Square};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Read-only view of a game, as consumed by computer opponents.
pub trait GameView {
    /// Number of accepted moves so far.
    fn turn(&self) -> u8;

    /// Copy of the current score vector.
    fn score(&self) -> ScoreVector;

    /// Unoccupied squares in reading order.
    fn empty_squares(&self) -> Vec<Position>;
}

/// Complete state of one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    score: ScoreTracker,
    turn: u8,
    status: GameStatus,
}

impl GameState {
    /// Creates the initial state: empty board, zero scores, X to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            score: ScoreTracker::new(),
            turn: 0,
            status: GameStatus::InProgress,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Outcome of the game, `None` while in progress.
    pub fn winner(&self) -> Option<Outcome> {
        self.status.outcome()
    }

    /// Player whose turn it is.
    pub fn to_move(&self) -> Player {
        Player::for_turn(self.turn)
    }

    /// Validates and applies a move.
    ///
    /// All checks run before anything is written, so a rejected move leaves
    /// the state exactly as it was.
    #[instrument(skip(self), fields(turn = self.turn, status = ?self.status))]
    pub(super) fn apply(&mut self, action: Move) -> Result<GameStatus, MoveRejected> {
        let Move { player, position } = action;

        if !self.status.is_in_progress() {
            debug!("Rejected move: game over");
            return Err(MoveRejected::GameOver);
        }
        if player != self.to_move() {
            debug!("Rejected move: out of turn");
            return Err(MoveRejected::WrongTurn(player));
        }
        if !self.board.is_empty(position) {
            debug!("Rejected move: square occupied");
            return Err(MoveRejected::SquareOccupied(position));
        }

        self.board.set(position, Square::Occupied(player));
        self.turn += 1;
        self.score.apply(position, player.sign());
        self.update_status();

        debug!(%action, score = ?self.score.snapshot(), "Move accepted");
        self.check_invariants();

        Ok(self.status)
    }

    /// Updates game status after a move.
    fn update_status(&mut self) {
        if let Some(winner) = Player::from_sign(self.score.winning_sign()) {
            info!(%winner, turn = self.turn, "Game won");
            self.status = GameStatus::Won(winner);
        } else if self.turn >= 9 {
            info!("Game drawn");
            self.status = GameStatus::Draw;
        }
    }

    #[cfg(any(debug_assertions, feature = "verification"))]
    fn check_invariants(&self) {
        use super::invariants::{EngineInvariants, InvariantSet};

        if let Err(violations) = EngineInvariants::check_all(self) {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            panic!("Postcondition failed: {descriptions}");
        }
    }

    #[cfg(not(any(debug_assertions, feature = "verification")))]
    fn check_invariants(&self) {}
}

impl GameView for GameState {
    fn turn(&self) -> u8 {
        self.turn
    }

    fn score(&self) -> ScoreVector {
        self.score.snapshot()
    }

    fn empty_squares(&self) -> Vec<Position> {
        Position::ALL
            .into_iter()
            .filter(|pos| self.board.is_empty(*pos))
            .collect()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl GameState {
    /// Overwrites a square without touching turn or scores.
    pub(super) fn corrupt_square(&mut self, pos: Position, square: Square) {
        self.board.set(pos, square);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(row: u8, col: u8) -> Position {
        Position::new(row, col).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let state = GameState::new();
        assert_eq!(state.turn(), 0);
        assert_eq!(state.score(), [0; 8]);
        assert_eq!(state.status(), GameStatus::InProgress);
        assert_eq!(state.empty_squares(), Position::ALL.to_vec());
    }

    #[test]
    fn test_rejected_move_changes_nothing() {
        let mut state = GameState::new();
        state.apply(Move::new(Player::X, at(1, 1))).unwrap();
        let before = state.clone();

        let result = state.apply(Move::new(Player::O, at(1, 1)));
        assert_eq!(result, Err(MoveRejected::SquareOccupied(at(1, 1))));
        assert_eq!(state, before);
    }

    #[test]
    fn test_empty_squares_keep_reading_order() {
        let mut state = GameState::new();
        state.apply(Move::new(Player::X, at(0, 1))).unwrap();
        state.apply(Move::new(Player::O, at(2, 0))).unwrap();
        assert_eq!(
            state.empty_squares(),
            vec![at(0, 0), at(0, 2), at(1, 0), at(1, 1), at(1, 2), at(2, 1), at(2, 2)]
        );
    }
}
