//! Core Connect Four rules: board representation, players, legality and
//! four-in-a-row detection.

mod board;
mod player;
mod win;

pub use board::{is_valid_move, Board, Cell, CENTER_COL, COLS, ROWS};
pub use player::Player;
pub use win::{completes_four, winner};
