pub mod ai;
pub mod opening;
pub mod search;

pub use ai::TicTacToeAi;
pub use opening::opening_move;
pub use search::search_best_move;
