//! Linescore - tic-tac-toe rules engine with a line-score opponent
//!
//! The board is summarized by an 8-slot score vector (3 rows, 3 columns,
//! 2 diagonals). The engine uses it for win detection and the computer
//! opponent ranks candidate moves from it without scanning the grid.
//!
//! # Architecture
//!
//! - **ScoreTracker**: the score vector and win detection over it
//! - **GameEngine**: turn order, occupancy, terminal states, computer replies
//! - **Opponent**: trivial, random and heuristic move selection
//!
//! # Example
//!
//! ```
//! use linescore::{GameConfig, GameEngine, Position, SkillLevel};
//!
//! let mut engine = GameEngine::new();
//! engine.reset(&GameConfig::against_computer(false, SkillLevel::Heuristic));
//!
//! // Human plays the center; the computer answers before `play` returns.
//! engine.play(Position::CENTER).unwrap();
//! assert_eq!(engine.turn(), 2);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod analysis;
mod config;
mod games;

// Crate-level exports - Self-play and rank reports
pub use analysis::{CandidateRank, RankReport, Tally, play_match, run_series};

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig, OpponentConfig};

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    BACKSLASH_SLOT, Board, FULL_LINE, GameEngine, GameState, GameStatus, GameView, LINE_COUNT,
    Move, MoveRejected, Opponent, Outcome, Player, Position, PositionParseError, SLASH_SLOT,
    ScoreTracker, ScoreVector, SkillLevel, Square, baseline, rank,
};

// Crate-level exports - Invariants
pub use games::tictactoe::invariants;
