use log::debug;
use rand::Rng;
use rayon::prelude::*;
use tictactoe_core::{Board, Mark, Move};

use crate::opening::opening_move;

/// Finds the optimal move for the side to play, or `None` on a finished game.
///
/// The empty board is answered with a uniformly random opening; every other
/// position is searched exhaustively to terminal depth, so away from the
/// empty board the result is a deterministic function of the board.
pub fn search_best_move(board: &Board) -> Option<Move> {
    best_move_with(board, &mut rand::thread_rng())
}

/// As [`search_best_move`], with the caller supplying the randomness used
/// for the empty-board opening. Nothing else in the search draws from `rng`.
pub fn best_move_with<R: Rng>(board: &Board, rng: &mut R) -> Option<Move> {
    if board.is_terminal() {
        return None;
    }

    if let Some(opening) = opening_move(board, rng) {
        debug!("opening move {opening} chosen at random");
        return Some(opening);
    }

    let to_move = board.turn();

    // Sibling branches share no state, so the root fans out across threads.
    let mut candidates: Vec<(Move, i32)> = board
        .legal_moves()
        .into_par_iter()
        .map(|mv| {
            let child = board.apply(mv).expect("legal move applies cleanly");
            let value = match to_move {
                Mark::X => min_value(&child),
                Mark::O => max_value(&child),
            };
            (mv, value)
        })
        .collect();

    // Ties resolve to the earliest coordinate in row-major order, independent
    // of the order the parallel evaluations finished in.
    candidates.sort_by_key(|&(mv, _)| (mv.row, mv.col));

    let mut best: Option<(Move, i32)> = None;
    for (mv, value) in candidates {
        debug!("candidate {mv} evaluates to {value}");
        let improves = match best {
            None => true,
            Some((_, best_value)) => match to_move {
                Mark::X => value > best_value,
                Mark::O => value < best_value,
            },
        };
        if improves {
            best = Some((mv, value));
        }
    }

    let (mv, value) = best.expect("non-terminal board has at least one move");
    debug!("{to_move} plays {mv} with value {value}");
    Some(mv)
}

/// Value of `board` with the maximizer (X) to move, assuming optimal play.
fn max_value(board: &Board) -> i32 {
    if board.is_terminal() {
        return board.score();
    }
    let mut value = i32::MIN;
    for mv in board.legal_moves() {
        let child = board.apply(mv).expect("legal move applies cleanly");
        value = value.max(min_value(&child));
    }
    value
}

/// Value of `board` with the minimizer (O) to move, assuming optimal play.
fn min_value(board: &Board) -> i32 {
    if board.is_terminal() {
        return board.score();
    }
    let mut value = i32::MAX;
    for mv in board.legal_moves() {
        let child = board.apply(mv).expect("legal move applies cleanly");
        value = value.min(max_value(&child));
    }
    value
}
