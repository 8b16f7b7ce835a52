//! Computer-vs-computer matches and rank reports.

use crate::games::tictactoe::{
    GameEngine, Opponent, Outcome, Player, Position, ScoreVector, SkillLevel, baseline,
    rank,
};
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

/// Results of a series of games between two computer players.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    /// Skill of the X player.
    pub first: SkillLevel,
    /// Skill of the O player.
    pub second: SkillLevel,
    /// Games won by X.
    pub first_wins: u32,
    /// Games won by O.
    pub second_wins: u32,
    /// Drawn games.
    pub draws: u32,
}

impl Tally {
    /// Records one finished game.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Winner(Player::X) => self.first_wins += 1,
            Outcome::Winner(Player::O) => self.second_wins += 1,
            Outcome::Draw => self.draws += 1,
        }
    }

    /// Number of games recorded.
    pub fn games(&self) -> u32 {
        self.first_wins + self.second_wins + self.draws
    }
}

impl std::fmt::Display for Tally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "X {:?} vs O {:?}: {} X wins, {} O wins, {} draws",
            self.first, self.second, self.first_wins, self.second_wins, self.draws
        )
    }
}

/// Plays one game between two opponents on a fresh engine.
///
/// Each computer is asked for a square on its turn and the square goes
/// through [`GameEngine::submit_move`] like any other move.
#[instrument(skip_all, fields(first = ?first.skill(), second = ?second.skill()))]
pub fn play_match<R: Rng>(first: &mut Opponent<R>, second: &mut Opponent<R>) -> Option<Outcome> {
    let mut engine: GameEngine<R> = GameEngine::with_opponent(None);

    while engine.winner().is_none() {
        let mover = match engine.to_move() {
            Player::X => &mut *first,
            Player::O => &mut *second,
        };
        let side = mover.side();
        let Some(pos) = mover.choose(&engine) else {
            warn!("Opponent found no square on a live board");
            return None;
        };
        if let Err(rejection) = engine.submit_move(side, pos) {
            warn!(%rejection, "Computer move rejected");
            return None;
        }
    }

    let outcome = engine.winner();
    debug!(?outcome, turns = engine.turn(), "Match finished");
    outcome
}

/// Plays `games` matches between the two skill levels.
#[instrument(skip(rng))]
pub fn run_series<R: Rng + SeedableRng>(
    first: SkillLevel,
    second: SkillLevel,
    games: u32,
    rng: &mut R,
) -> Tally {
    let mut tally = Tally {
        first,
        second,
        ..Tally::default()
    };
    let mut x = Opponent::with_rng(Player::X, first, R::seed_from_u64(rng.next_u64()));
    let mut o = Opponent::with_rng(Player::O, second, R::seed_from_u64(rng.next_u64()));

    for _ in 0..games {
        if let Some(outcome) = play_match(&mut x, &mut o) {
            tally.record(outcome);
        }
    }
    info!(%tally, "Series finished");
    tally
}

/// Heuristic rank of one empty square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CandidateRank {
    /// Square code.
    pub square: Position,
    /// Rank for the side to move.
    pub rank: i32,
}

/// Snapshot of a position and how the heuristic sees each reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankReport {
    /// Number of accepted moves.
    pub turn: u8,
    /// Side to move.
    pub to_move: Player,
    /// Current score vector.
    pub score: ScoreVector,
    /// Rank with no move applied.
    pub baseline: i32,
    /// Every empty square in reading order.
    pub candidates: Vec<CandidateRank>,
    /// Outcome, if the game is over.
    pub outcome: Option<Outcome>,
}

impl RankReport {
    /// Ranks every empty square for the player to move.
    #[instrument(skip_all, fields(turn = engine.turn()))]
    pub fn for_engine<E: Rng, R: Rng>(engine: &GameEngine<E>, rng: &mut R) -> Self {
        let to_move = engine.to_move();
        let score = engine.score();
        let candidates = engine
            .empty_squares()
            .into_iter()
            .map(|square| CandidateRank {
                square,
                rank: rank(engine, to_move, Some(square), &mut *rng),
            })
            .collect();

        Self {
            turn: engine.turn(),
            to_move,
            score,
            baseline: baseline(&score),
            candidates,
            outcome: engine.winner(),
        }
    }
}
