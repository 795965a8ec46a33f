use rand::seq::SliceRandom;
use rand::Rng;
use tictactoe_core::{Board, Move};

/// Uniformly random opening for the empty board, `None` for any other
/// position.
///
/// All nine openings are symmetric-optimal, so drawing one at random skips
/// the most expensive search of the game. This is the engine's only
/// non-deterministic output.
pub fn opening_move<R: Rng>(board: &Board, rng: &mut R) -> Option<Move> {
    if board.occupied_count() != 0 {
        return None;
    }
    board.legal_moves().choose(rng).copied()
}
