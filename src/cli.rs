//! Command-line interface for linescore.

use clap::{Parser, Subcommand};

/// Linescore - tic-tac-toe against a line-score heuristic
#[derive(Parser, Debug)]
#[command(name = "linescore")]
#[command(about = "Tic-tac-toe rules engine and computer opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal, entering squares as two digits (row, column)
    Play {
        /// TOML file with game settings (overridden by the flags below)
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Play against another human instead of the computer
        #[arg(long)]
        no_computer: bool,

        /// Let the computer open the game as X (`--computer-first false` turns it off)
        #[arg(long, num_args = 0..=1, default_missing_value = "true")]
        computer_first: Option<bool>,

        /// Computer skill: 0 trivial, 1 random, 2 heuristic
        #[arg(short, long)]
        skill: Option<u8>,
    },

    /// Let the computer play against itself and report the tallies
    Selfplay {
        /// Skill of the X player (all levels when omitted)
        #[arg(long)]
        first: Option<u8>,

        /// Skill of the O player (all levels when omitted)
        #[arg(long)]
        second: Option<u8>,

        /// Games per pairing
        #[arg(short, long, default_value = "100")]
        games: u32,

        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Replay moves and print the heuristic rank of every empty square as JSON
    Rank {
        /// Square codes to replay, e.g. "00 11 01"
        #[arg(short, long, default_value = "")]
        moves: String,

        /// Seed for the opening corner bonus
        #[arg(long)]
        seed: Option<u64>,
    },
}
