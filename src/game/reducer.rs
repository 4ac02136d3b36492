//! Pure transition function: `(state, action) -> next state`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::action::Action;
use super::board::{DropError, Move};
use super::player::Player;
use super::state::GameState;
use crate::error::EngineError;

/// How a cleared game picks who moves first.
#[derive(Debug, Clone)]
pub enum FirstPlayer {
    /// Uniformly random between the two players.
    Random(StdRng),
    /// Always the same player.
    Fixed(Player),
}

impl FirstPlayer {
    pub fn random() -> Self {
        FirstPlayer::Random(StdRng::from_os_rng())
    }

    pub fn seeded(seed: u64) -> Self {
        FirstPlayer::Random(StdRng::seed_from_u64(seed))
    }

    pub fn pick(&mut self) -> Player {
        match self {
            FirstPlayer::Random(rng) => {
                if rng.random_bool(0.5) {
                    Player::One
                } else {
                    Player::Two
                }
            }
            FirstPlayer::Fixed(player) => *player,
        }
    }
}

/// Result of reducing one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The action was a no-op; the previous snapshot stays current.
    Unchanged,
    /// A new snapshot replaces the previous one.
    Replaced(GameState),
}

/// Compute the state that follows `action`.
///
/// `state` is never modified; every change is made on a copy.
pub fn reduce(
    state: &GameState,
    action: Action,
    first_player: &mut FirstPlayer,
) -> Result<Transition, EngineError> {
    let next = match action {
        Action::Start => {
            let mut next = state.clone();
            next.flags.started = true;
            next
        }
        Action::AddPiece { column } => add_piece(state, column)?,
        Action::NextPlayer => {
            if state.flags.last_move_invalid {
                return Ok(Transition::Unchanged);
            }
            let mut next = state.clone();
            next.current_player = state.current_player.other();
            next
        }
        Action::Win => {
            let mut next = state.clone();
            next.flags.is_win = true;
            next.flags.is_done = true;
            next.flags.started = false;
            next
        }
        Action::Draw => {
            let mut next = state.clone();
            next.flags.is_draw = true;
            next.flags.is_done = true;
            next.flags.started = false;
            next.turn_count += 1;
            next
        }
        Action::Clear => GameState::initial(first_player.pick()),
        Action::Unknown => return Ok(Transition::Unchanged),
    };

    Ok(Transition::Replaced(next))
}

fn add_piece(state: &GameState, column: usize) -> Result<GameState, EngineError> {
    let mut next = state.clone();

    match next.board.drop_piece(column, state.current_player) {
        Ok(row) => {
            next.move_history.push(Move::new(column, row));
            next.flags.last_move_invalid = false;
            next.turn_count += 1;
        }
        // Full column: board, history and turn counter stay as they were
        Err(DropError::ColumnFull) => next.flags.last_move_invalid = true,
        Err(DropError::InvalidColumn) => return Err(EngineError::InvalidColumn { column }),
    }

    Ok(next)
}
