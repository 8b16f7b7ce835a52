//! Computer opponent.
//!
//! An opponent owns no reference to a game. It is handed a [`GameView`] each
//! time it has to move and answers with a square; the engine then submits
//! that square through the same validation as a human move.

use super::heuristic;
use super::position::Position;
use super::state::GameView;
use super::types::Player;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Strategy used by a computer opponent.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::EnumIter,
)]
#[serde(from = "u8", into = "u8")]
pub enum SkillLevel {
    /// Always takes the first empty square in reading order.
    #[default]
    Trivial,
    /// Picks uniformly among empty squares.
    Random,
    /// Ranks every empty square with the line-score heuristic.
    Heuristic,
}

impl From<u8> for SkillLevel {
    /// Maps 0, 1, 2 to the three levels. Any other level plays trivially.
    fn from(level: u8) -> Self {
        match level {
            0 => SkillLevel::Trivial,
            1 => SkillLevel::Random,
            2 => SkillLevel::Heuristic,
            other => {
                warn!(level = other, "Unknown skill level, using trivial opponent");
                SkillLevel::Trivial
            }
        }
    }
}

impl From<SkillLevel> for u8 {
    fn from(skill: SkillLevel) -> Self {
        match skill {
            SkillLevel::Trivial => 0,
            SkillLevel::Random => 1,
            SkillLevel::Heuristic => 2,
        }
    }
}

/// A computer player bound to one side.
#[derive(Debug, Clone)]
pub struct Opponent<R = StdRng> {
    side: Player,
    skill: SkillLevel,
    rng: R,
}

impl Opponent<StdRng> {
    /// Creates an opponent seeded from the operating system.
    #[instrument]
    pub fn new(side: Player, skill: SkillLevel) -> Self {
        Self::with_rng(side, skill, StdRng::from_entropy())
    }
}

impl<R: Rng> Opponent<R> {
    /// Creates an opponent drawing its randomness from `rng`.
    pub fn with_rng(side: Player, skill: SkillLevel, rng: R) -> Self {
        Self { side, skill, rng }
    }

    /// Side this opponent plays.
    pub fn side(&self) -> Player {
        self.side
    }

    /// Strategy this opponent uses.
    pub fn skill(&self) -> SkillLevel {
        self.skill
    }

    /// Picks a square to play, `None` if the board is full.
    #[instrument(skip(self, view), fields(side = %self.side, skill = ?self.skill, turn = view.turn()))]
    pub fn choose<V: GameView + ?Sized>(&mut self, view: &V) -> Option<Position> {
        let squares = view.empty_squares();
        let choice = match self.skill {
            SkillLevel::Trivial => squares.first().copied(),
            SkillLevel::Random => self.pick_random(&squares),
            SkillLevel::Heuristic => self.pick_best(view, &squares),
        };
        debug!(choice = ?choice, "Opponent chose square");
        choice
    }

    /// Ranks `candidate` for this opponent's side; see [`heuristic::rank`].
    pub fn rank<V: GameView + ?Sized>(&mut self, view: &V, candidate: Option<Position>) -> i32 {
        heuristic::rank(view, self.side, candidate, &mut self.rng)
    }

    fn pick_random(&mut self, squares: &[Position]) -> Option<Position> {
        squares.choose(&mut self.rng).copied()
    }

    /// Scans candidates in order, keeping the most extreme rank for this side.
    ///
    /// A candidate equal to the best so far replaces the pick on a coin flip,
    /// so later ties are favored over earlier ones.
    fn pick_best<V: GameView + ?Sized>(&mut self, view: &V, squares: &[Position]) -> Option<Position> {
        let mut best = self.rank(view, None);
        let mut pick = None;

        for &pos in squares {
            let rank = self.rank(view, Some(pos));
            let better = match self.side {
                Player::X => rank > best,
                Player::O => rank < best,
            };
            if better {
                best = rank;
                pick = Some(pos);
            }
            if rank == best && self.rng.gen_bool(0.5) {
                pick = Some(pos);
            }
        }

        pick.or_else(|| {
            debug!(baseline = best, "No candidate beat the baseline, picking at random");
            self.pick_random(squares)
        })
    }
}
