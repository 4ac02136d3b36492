//! Core Connect Four game logic: board representation, player types, the
//! immutable state snapshot and the pure reducer that moves between snapshots.

mod action;
mod board;
mod player;
mod reducer;
mod state;

pub use action::Action;
pub use board::{Board, Cell, DropError, Move, CELLS, COLS, ROWS};
pub use player::Player;
pub use reducer::{reduce, FirstPlayer, Transition};
pub use state::{Flags, GameState, DRAW_TURN, FIRST_TURN, MIN_WIN_TURN};
