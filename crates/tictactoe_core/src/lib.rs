// Core tic-tac-toe game logic modules
pub mod board;
pub mod mark;
pub mod moves;

// Re-export main types for convenience
pub use board::{Board, IllegalMoveError, Outcome};
pub use mark::Mark;
pub use moves::Move;
