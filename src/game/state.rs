use serde::{Deserialize, Serialize};

use super::board::{Board, Move, CELLS};
use super::player::Player;

/// Turn counter value of a freshly cleared game.
pub const FIRST_TURN: u32 = 1;
/// Earliest turn at which a 4-in-a-row can exist under alternating play.
pub const MIN_WIN_TURN: u32 = 8;
/// Turn counter once every cell has been filled.
pub const DRAW_TURN: u32 = CELLS as u32 + 1;

/// Phase flags of a round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flags {
    pub started: bool,
    pub is_draw: bool,
    pub is_win: bool,
    pub is_done: bool,
    pub last_move_invalid: bool,
}

/// One immutable snapshot of the game. Transitions clone and replace it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub(super) board: Board,
    pub(super) current_player: Player,
    pub(super) turn_count: u32,
    pub(super) move_history: Vec<Move>,
    pub(super) flags: Flags,
}

impl GameState {
    /// Fresh state: empty board, empty history, turn 1, all flags cleared.
    pub fn initial(first_player: Player) -> Self {
        GameState {
            board: Board::new(),
            current_player: first_player,
            turn_count: FIRST_TURN,
            move_history: Vec::new(),
            flags: Flags::default(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    /// Successful placements, oldest first
    pub fn move_history(&self) -> &[Move] {
        &self.move_history
    }

    pub fn last_move(&self) -> Option<Move> {
        self.move_history.last().copied()
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn is_started(&self) -> bool {
        self.flags.started
    }

    /// A round has ended in a win or a draw
    pub fn is_over(&self) -> bool {
        self.flags.is_win || self.flags.is_draw
    }
}
