use rand::rngs::StdRng;
use rand::SeedableRng;
use tictactoe_core::{Board, Move};

use crate::search::best_move_with;

/// Engine facade owning the randomness used for the opening move.
///
/// Apart from the empty-board opening, [`choose_move`](Self::choose_move) is
/// a deterministic function of the board it is given.
pub struct TicTacToeAi {
    rng: StdRng,
}

impl TicTacToeAi {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// A reproducible engine: the same seed opens the same way.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// The optimal move for the side to play, or `None` on a finished game.
    pub fn choose_move(&mut self, board: &Board) -> Option<Move> {
        best_move_with(board, &mut self.rng)
    }
}

impl Default for TicTacToeAi {
    fn default() -> Self {
        Self::new()
    }
}
