//! Linescore - Unified CLI
//!
//! Terminal front end for the tic-tac-toe engine.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use linescore::{GameConfig, GameEngine, Position, RankReport, SkillLevel, run_series};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            no_computer,
            computer_first,
            skill,
        } => run_play(config, no_computer, computer_first, skill),
        Command::Selfplay {
            first,
            second,
            games,
            seed,
        } => run_selfplay(first, second, games, seed),
        Command::Rank { moves, seed } => run_rank(&moves, seed),
    }
}

/// Builds the game settings from an optional file and command-line overrides.
#[instrument]
fn load_config(
    path: Option<PathBuf>,
    no_computer: bool,
    computer_first: Option<bool>,
    skill: Option<u8>,
) -> Result<GameConfig> {
    let base = match path {
        Some(path) => GameConfig::from_file(&path)?,
        None => GameConfig::default(),
    };
    Ok(base.with_overrides(no_computer, computer_first, skill.map(SkillLevel::from)))
}

fn rng_from(seed: Option<u64>) -> StdRng {
    seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64)
}

/// Interactive game on stdin/stdout.
fn run_play(
    config: Option<PathBuf>,
    no_computer: bool,
    computer_first: Option<bool>,
    skill: Option<u8>,
) -> Result<()> {
    let config = load_config(config, no_computer, computer_first, skill)?;
    info!(?config, "Starting terminal game");

    let mut engine = GameEngine::new();
    engine.reset(&config);

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut lines = stdin.lock().lines();

    loop {
        writeln!(stdout, "\n{}\n", engine.state().board().display())?;
        if let Some(outcome) = engine.winner() {
            writeln!(stdout, "{outcome}. Enter r to play again or q to quit.")?;
        } else {
            writeln!(stdout, "{} to move. Enter a square (row then column), r to restart or q to quit.", engine.to_move())?;
        }
        stdout.flush()?;

        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line.context("Failed to read from stdin")?;
        match line.trim() {
            "q" | "quit" => return Ok(()),
            "r" | "restart" => engine.reset(&config),
            input => match input.parse::<Position>() {
                Ok(pos) => {
                    if let Err(rejection) = engine.play(pos) {
                        writeln!(stdout, "{rejection}")?;
                    }
                }
                Err(e) => writeln!(stdout, "{e}")?,
            },
        }
    }
}

/// Computer-vs-computer series.
fn run_selfplay(first: Option<u8>, second: Option<u8>, games: u32, seed: Option<u64>) -> Result<()> {
    let levels = |choice: Option<u8>| -> Vec<SkillLevel> {
        match choice {
            Some(level) => vec![SkillLevel::from(level)],
            None => SkillLevel::iter().collect(),
        }
    };
    let mut rng = rng_from(seed);

    for x in levels(first) {
        for o in levels(second) {
            let tally = run_series(x, o, games, &mut rng);
            println!("{tally}");
        }
    }
    Ok(())
}

/// Replays `moves` and prints the rank report as JSON.
fn run_rank(moves: &str, seed: Option<u64>) -> Result<()> {
    let mut engine = GameEngine::new();
    for code in moves.split_whitespace() {
        let pos: Position = code.parse()?;
        engine
            .play(pos)
            .with_context(|| format!("Cannot replay move {code}"))?;
        debug!(square = %pos, "Replayed move");
    }

    let report = RankReport::for_engine(&engine, &mut rng_from(seed));
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
