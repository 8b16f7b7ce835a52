//! Tic-tac-toe: rules engine, line scores and computer opponent.

mod action;
mod engine;
mod heuristic;
pub mod invariants;
mod opponent;
mod position;
mod score;
mod state;
mod types;

pub use action::{Move, MoveRejected};
pub use engine::GameEngine;
pub use heuristic::{baseline, rank};
pub use opponent::{Opponent, SkillLevel};
pub use position::{BACKSLASH_SLOT, Position, PositionParseError, SLASH_SLOT};
pub use score::{FULL_LINE, LINE_COUNT, ScoreTracker, ScoreVector};
pub use state::{GameState, GameView};
pub use types::{Board, GameStatus, Outcome, Player, Square};
