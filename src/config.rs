//! Game configuration.

use crate::games::tictactoe::{Player, SkillLevel};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Computer opponent settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct OpponentConfig {
    /// True when the computer plays X and opens the game.
    #[serde(default)]
    computer_first: bool,

    /// Skill level 0 (trivial), 1 (random) or 2 (heuristic).
    #[serde(default = "default_skill")]
    skill: SkillLevel,
}

fn default_skill() -> SkillLevel {
    SkillLevel::Heuristic
}

impl OpponentConfig {
    /// Creates opponent settings.
    pub fn new(computer_first: bool, skill: SkillLevel) -> Self {
        Self {
            computer_first,
            skill,
        }
    }

    /// Side the computer plays.
    pub fn side(&self) -> Player {
        if self.computer_first { Player::X } else { Player::O }
    }
}

impl Default for OpponentConfig {
    fn default() -> Self {
        Self::new(false, default_skill())
    }
}

/// Settings applied on every reset.
///
/// The default is a human moving first against the heuristic computer.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Computer opponent, `None` for two human players.
    #[serde(default)]
    opponent: Option<OpponentConfig>,
}

impl GameConfig {
    /// Two human players.
    pub fn two_players() -> Self {
        Self { opponent: None }
    }

    /// Human against the computer.
    pub fn against_computer(computer_first: bool, skill: SkillLevel) -> Self {
        Self {
            opponent: Some(OpponentConfig::new(computer_first, skill)),
        }
    }

    /// Builds a configuration from the three reset switches.
    #[instrument]
    pub fn from_switches(with_computer: bool, computer_first: bool, skill: SkillLevel) -> Self {
        if with_computer {
            Self::against_computer(computer_first, skill)
        } else {
            Self::two_players()
        }
    }

    /// Applies command-line overrides on top of loaded settings.
    ///
    /// `no_computer` wins over everything else. Without it, a two-player
    /// configuration stays two-player unless a computer flag is given; each
    /// given flag replaces the matching opponent field.
    #[instrument]
    pub fn with_overrides(
        self,
        no_computer: bool,
        computer_first: Option<bool>,
        skill: Option<SkillLevel>,
    ) -> Self {
        if no_computer {
            return Self::two_players();
        }
        let opponent = match self.opponent {
            Some(opponent) => opponent,
            None if computer_first.is_none() && skill.is_none() => return self,
            None => OpponentConfig::default(),
        };
        Self::against_computer(
            computer_first.unwrap_or(opponent.computer_first),
            skill.unwrap_or(opponent.skill),
        )
    }

    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(opponent = ?config.opponent, "Config loaded successfully");
        Ok(config)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            opponent: Some(OpponentConfig::default()),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
