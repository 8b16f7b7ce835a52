//! Tic-tac-toe game engine.
//!
//! The engine owns one [`GameState`] and, optionally, a computer
//! [`Opponent`]. Every mutation takes `&mut self` and runs to completion,
//! including the opponent's immediate reply, before returning.

use super::action::{Move, MoveRejected};
use super::opponent::Opponent;
use super::position::Position;
use super::score::ScoreVector;
use super::state::{GameState, GameView};
use super::types::{GameStatus, Outcome, Player};
use crate::config::GameConfig;
use rand::Rng;
use rand::rngs::StdRng;
use tracing::{debug, instrument, warn};

/// Tic-tac-toe game engine.
#[derive(Debug, Clone)]
pub struct GameEngine<R = StdRng> {
    state: GameState,
    opponent: Option<Opponent<R>>,
}

impl GameEngine<StdRng> {
    /// Creates a two-human game.
    #[instrument]
    pub fn new() -> Self {
        Self::with_opponent(None)
    }

    /// Resets the game, installing the opponent described by `config`.
    ///
    /// If the computer plays first it moves before this returns.
    #[instrument(skip(self))]
    pub fn reset(&mut self, config: &GameConfig) {
        let opponent = config
            .opponent()
            .as_ref()
            .map(|o| Opponent::new(o.side(), *o.skill()));
        self.reset_with(opponent);
    }
}

impl<R: Rng> GameEngine<R> {
    /// Creates a game against `opponent` (or two humans when `None`).
    pub fn with_opponent(opponent: Option<Opponent<R>>) -> Self {
        let mut engine = Self {
            state: GameState::new(),
            opponent: None,
        };
        engine.reset_with(opponent);
        engine
    }

    /// Clears the board, scores, turn and winner and installs `opponent`.
    ///
    /// If the opponent plays X it takes the first move immediately.
    #[instrument(skip(self, opponent), fields(
        opponent_side = ?opponent.as_ref().map(|o| o.side()),
        skill = ?opponent.as_ref().map(|o| o.skill())
    ))]
    pub fn reset_with(&mut self, opponent: Option<Opponent<R>>) {
        self.state = GameState::new();
        self.opponent = opponent;
        debug!("Game reset");
        self.reply_if_due();
    }

    /// Submits a move for `player`.
    ///
    /// Illegal moves (game over, out of turn, occupied square) are rejected
    /// without changing anything. After an accepted move that keeps the game
    /// going, a configured opponent whose turn it is replies at once.
    #[instrument(skip(self), fields(turn = self.state.turn()))]
    pub fn submit_move(&mut self, player: Player, pos: Position) -> Result<GameStatus, MoveRejected> {
        let status = self.state.apply(Move::new(player, pos))?;
        if status.is_in_progress() {
            self.reply_if_due();
        }
        Ok(self.state.status())
    }

    /// Plays `pos` for whoever is to move; the entry point for a board click.
    pub fn play(&mut self, pos: Position) -> Result<GameStatus, MoveRejected> {
        let player = self.state.to_move();
        self.submit_move(player, pos)
    }

    /// Lets the configured opponent move if the game is live and it is its turn.
    fn reply_if_due(&mut self) {
        let Some(opponent) = self.opponent.as_mut() else {
            return;
        };
        if !self.state.status().is_in_progress() || self.state.to_move() != opponent.side() {
            return;
        }

        let side = opponent.side();
        let Some(pos) = opponent.choose(&self.state) else {
            return;
        };
        if let Err(rejection) = self.state.apply(Move::new(side, pos)) {
            warn!(%rejection, square = %pos, "Opponent move rejected");
        }
    }

    /// Returns the current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns the configured opponent, if any.
    pub fn opponent(&self) -> Option<&Opponent<R>> {
        self.opponent.as_ref()
    }

    /// Number of accepted moves so far.
    pub fn turn(&self) -> u8 {
        self.state.turn()
    }

    /// Copy of the current score vector.
    pub fn score(&self) -> ScoreVector {
        self.state.score()
    }

    /// Unoccupied squares in reading order.
    pub fn empty_squares(&self) -> Vec<Position> {
        self.state.empty_squares()
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.state.status()
    }

    /// Outcome of the game, `None` while in progress.
    pub fn winner(&self) -> Option<Outcome> {
        self.state.winner()
    }

    /// Player whose turn it is.
    pub fn to_move(&self) -> Player {
        self.state.to_move()
    }
}

impl<R> GameView for GameEngine<R> {
    fn turn(&self) -> u8 {
        self.state.turn()
    }

    fn score(&self) -> ScoreVector {
        self.state.score()
    }

    fn empty_squares(&self) -> Vec<Position> {
        self.state.empty_squares()
    }
}

impl Default for GameEngine<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::SkillLevel;
    use rand::SeedableRng;

    fn at(row: u8, col: u8) -> Position {
        Position::new(row, col).unwrap()
    }

    #[test]
    fn test_computer_first_moves_during_reset() {
        let opponent = Opponent::with_rng(Player::X, SkillLevel::Trivial, StdRng::seed_from_u64(0));
        let engine = GameEngine::with_opponent(Some(opponent));
        assert_eq!(engine.turn(), 1);
        assert_eq!(engine.score(), [1, 0, 0, 1, 0, 0, 1, 0]);
        assert_eq!(engine.to_move(), Player::O);
    }

    #[test]
    fn test_computer_replies_after_human_move() {
        let opponent = Opponent::with_rng(Player::O, SkillLevel::Trivial, StdRng::seed_from_u64(0));
        let mut engine = GameEngine::with_opponent(Some(opponent));
        assert_eq!(engine.turn(), 0);

        engine.play(Position::CENTER).unwrap();
        assert_eq!(engine.turn(), 2);
        assert!(!engine.empty_squares().contains(&at(0, 0)));
        assert_eq!(engine.to_move(), Player::X);
    }

    #[test]
    fn test_rejected_move_skips_reply() {
        let opponent = Opponent::with_rng(Player::O, SkillLevel::Trivial, StdRng::seed_from_u64(0));
        let mut engine = GameEngine::with_opponent(Some(opponent));
        engine.play(Position::CENTER).unwrap();
        let before = engine.state().clone();

        assert_eq!(
            engine.play(Position::CENTER),
            Err(MoveRejected::SquareOccupied(Position::CENTER))
        );
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut engine = GameEngine::new();
        engine.play(at(0, 0)).unwrap();
        engine.play(at(1, 1)).unwrap();

        engine.reset(&GameConfig::two_players());
        assert_eq!(engine.turn(), 0);
        assert_eq!(engine.score(), [0; 8]);
        assert_eq!(engine.empty_squares().len(), 9);
        assert_eq!(engine.winner(), None);
        assert!(engine.opponent().is_none());
    }

    #[test]
    fn test_reset_from_config_installs_opponent() {
        let mut engine = GameEngine::new();
        engine.reset(&GameConfig::against_computer(true, SkillLevel::Heuristic));
        let opponent = engine.opponent().unwrap();
        assert_eq!(opponent.side(), Player::X);
        assert_eq!(opponent.skill(), SkillLevel::Heuristic);
        assert_eq!(engine.turn(), 1);
    }
}
