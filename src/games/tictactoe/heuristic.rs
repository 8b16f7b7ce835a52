//! Move ranking over the score vector.
//!
//! Ranks are signed: positive numbers favor X, negative numbers favor O. The
//! rank of a candidate is the sum of the score vector after the move plus a
//! handful of opening and tactical bonuses. It is a greedy positional
//! heuristic, not a search.

use super::position::{BACKSLASH_SLOT, Position, SLASH_SLOT};
use super::score::{self, FULL_LINE, ScoreVector};
use super::state::GameView;
use super::types::Player;
use rand::Rng;
use tracing::{instrument, trace};

/// Upper bound (exclusive) of the random first-move corner bonus.
const OPENING_CORNER_SPREAD: i32 = 10;
/// Bonus for taking a corner on the diagonal currently leading at turn 2.
const DIAGONAL_CORNER_BONUS: i32 = 10;
/// Turn-3 nudge applied by the diagonal and open-line checks.
const TURN_THREE_NUDGE: i32 = 2;
/// Minimum number of empty lines that triggers the turn-3 open-line nudge.
const TURN_THREE_OPEN_LINES: usize = 5;
/// Bonus for breaking up one of the opponent's two-in-a-line.
const BLOCK_BONUS: i32 = 20;
/// Bonus for completing a line.
const WIN_BONUS: i32 = 30;

/// Rank of the current position with no move applied.
pub fn baseline(slots: &ScoreVector) -> i32 {
    score::sum(slots)
}

/// Ranks a candidate move for `side`.
///
/// With `candidate == None` this is the [`baseline`] of the current vector.
/// The view is never modified; the move is applied to a private copy.
#[instrument(skip(view, rng), fields(turn = view.turn()))]
pub fn rank<V, R>(view: &V, side: Player, candidate: Option<Position>, rng: &mut R) -> i32
where
    V: GameView + ?Sized,
    R: Rng,
{
    let before = view.score();
    let Some(pos) = candidate else {
        return baseline(&before);
    };

    let sign = side.sign();
    let scale = i32::from(sign);
    let opponent_pair = -2 * sign;
    let base_pairs = score::count(&before, opponent_pair);

    let mut after = before;
    score::apply_to(&mut after, pos, sign);

    let mut bonus = 0;
    match view.turn() {
        0 if pos.is_corner() => {
            bonus += scale * rng.gen_range(0..OPENING_CORNER_SPREAD);
        }
        2 if leading_diagonal_corners(&before).contains(&pos) => {
            bonus += scale * DIAGONAL_CORNER_BONUS;
        }
        3 => {
            if after[BACKSLASH_SLOT] + after[SLASH_SLOT] == -1 {
                bonus += TURN_THREE_NUDGE;
            }
            if score::count(&after, 0) >= TURN_THREE_OPEN_LINES {
                bonus -= TURN_THREE_NUDGE;
            }
        }
        _ => {}
    }

    if score::count(&after, opponent_pair) < base_pairs {
        bonus += scale * BLOCK_BONUS;
    }
    if after.contains(&(FULL_LINE * sign)) {
        bonus += scale * WIN_BONUS;
    }

    let rank = score::sum(&after) + bonus;
    trace!(square = %pos, ?after, bonus, rank, "Ranked candidate");
    rank
}

/// Corners of whichever diagonal has the higher score, none on a tie.
fn leading_diagonal_corners(slots: &ScoreVector) -> &'static [Position] {
    const BACKSLASH_CORNERS: &[Position] = &[Position::TOP_LEFT, Position::BOTTOM_RIGHT];
    const SLASH_CORNERS: &[Position] = &[Position::BOTTOM_LEFT, Position::TOP_RIGHT];

    match slots[BACKSLASH_SLOT].cmp(&slots[SLASH_SLOT]) {
        std::cmp::Ordering::Greater => BACKSLASH_CORNERS,
        std::cmp::Ordering::Less => SLASH_CORNERS,
        std::cmp::Ordering::Equal => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{GameState, Move};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn at(row: u8, col: u8) -> Position {
        Position::new(row, col).unwrap()
    }

    fn replay(moves: &[(u8, u8)]) -> GameState {
        let mut state = GameState::new();
        for &(row, col) in moves {
            let player = state.to_move();
            state.apply(Move::new(player, at(row, col))).unwrap();
        }
        state
    }

    #[test]
    fn test_baseline_is_plain_sum() {
        let state = replay(&[(0, 0), (1, 1), (0, 1)]);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(state.score(), [1, 0, 0, 2, -1, 0, 0, -1]);
        assert_eq!(rank(&state, Player::O, None, &mut rng), 1);
        assert_eq!(rank(&state, Player::X, None, &mut rng), 1);
    }

    #[test]
    fn test_rank_does_not_mutate_view() {
        let state = replay(&[(0, 0), (1, 1)]);
        let before = state.clone();
        let mut rng = StdRng::seed_from_u64(2);
        for pos in state.empty_squares() {
            rank(&state, Player::X, Some(pos), &mut rng);
        }
        assert_eq!(state, before);
    }

    #[test]
    fn test_opening_corner_bonus_is_bounded() {
        let state = GameState::new();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            // A corner on an empty board touches three lines.
            let r = rank(&state, Player::X, Some(Position::TOP_LEFT), &mut rng);
            assert!((3..=12).contains(&r), "rank {r}");
            let r = rank(&state, Player::O, Some(Position::BOTTOM_LEFT), &mut rng);
            assert!((-12..=-3).contains(&r), "rank {r}");
        }
        // Edges get no bonus.
        assert_eq!(rank(&state, Player::X, Some(at(0, 1)), &mut rng), 2);
        assert_eq!(rank(&state, Player::X, Some(Position::CENTER), &mut rng), 4);
    }

    #[test]
    fn test_turn_two_prefers_leading_diagonal_corner() {
        // X takes the top-left corner, O an edge: the backslash diagonal leads.
        let state = replay(&[(0, 0), (0, 1)]);
        let mut rng = StdRng::seed_from_u64(4);
        assert!(state.score()[BACKSLASH_SLOT] > state.score()[SLASH_SLOT]);

        // (2,2): slots 2, 5, 6 -> sum 1 + 3 = 4, plus 10.
        assert_eq!(rank(&state, Player::X, Some(Position::BOTTOM_RIGHT), &mut rng), 14);
        // (2,0): slots 0, 5, 7 -> sum 4, not on the leading diagonal.
        assert_eq!(rank(&state, Player::X, Some(Position::BOTTOM_LEFT), &mut rng), 4);
    }

    #[test]
    fn test_turn_three_nudges() {
        let state = replay(&[(0, 0), (1, 1), (0, 1)]);
        let mut rng = StdRng::seed_from_u64(5);
        // (1,0): diagonals sum to -1 (+2), five empty lines (-2).
        assert_eq!(rank(&state, Player::O, Some(at(1, 0)), &mut rng), -1);
        // (1,2): diagonals sum to -1 (+2), three empty lines.
        assert_eq!(rank(&state, Player::O, Some(at(1, 2)), &mut rng), 1);
    }

    #[test]
    fn test_block_bonus() {
        let state = replay(&[(0, 0), (1, 1), (0, 1)]);
        let mut rng = StdRng::seed_from_u64(6);
        // O on (0,2) breaks X's pair: sum -2, block -20.
        assert_eq!(rank(&state, Player::O, Some(at(0, 2)), &mut rng), -22);
    }

    #[test]
    fn test_win_bonus() {
        let state = replay(&[(0, 0), (1, 0), (0, 1), (2, 1)]);
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(state.score(), [0, 0, 0, 2, -1, -1, 1, 0]);
        // (0,2) completes slot 3: sum 4 plus 30.
        assert_eq!(rank(&state, Player::X, Some(at(0, 2)), &mut rng), 34);
        assert_eq!(rank(&state, Player::X, Some(Position::CENTER), &mut rng), 5);
    }

    #[test]
    fn test_leading_diagonal_corners_tie_is_empty() {
        assert!(leading_diagonal_corners(&[0; 8]).is_empty());
    }
}
