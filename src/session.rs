//! Orchestration over the store: one call per user interaction.
//!
//! A placement is always the same sequence: `ADDPIECE`, run the detector
//! (which may dispatch `DRAW` itself), then `WIN` if the move completed a
//! line or `NEXTPLAYER` otherwise. The session owns that contract so front
//! ends only translate input into [`Session::play`] and
//! [`Session::new_round`].

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::config::GameConfig;
use crate::detector::{self, LINE_LENGTH};
use crate::error::EngineError;
use crate::game::{Action, GameState, Move, Player};
use crate::store::Store;

/// What a single call to [`Session::play`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// The round is not running; nothing was dispatched.
    Ignored,
    /// The column was full; the same player moves again.
    Invalid { column: usize },
    /// The piece landed and the turn passed.
    Continue { next: Player },
    /// The piece completed a line.
    Won {
        winner: Player,
        line: [Move; LINE_LENGTH],
    },
    /// The piece filled the board without a line.
    Draw,
}

#[derive(Debug)]
pub struct Session {
    store: Store,
}

impl Session {
    pub fn new(store: Store) -> Self {
        Session { store }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(Store::from_config(config))
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Mutable access for subscribing listeners.
    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    pub fn state(&self) -> Arc<GameState> {
        self.store.state()
    }

    /// Reset to a fresh game and start it.
    #[instrument(skip(self))]
    pub fn new_round(&mut self) -> Result<Arc<GameState>, EngineError> {
        self.store.dispatch(Action::Clear)?;
        let state = self.store.dispatch(Action::Start)?;
        info!(first = state.current_player().name(), "round started");
        Ok(state)
    }

    /// Drop the current player's piece into `column` and settle the turn.
    #[instrument(skip(self))]
    pub fn play(&mut self, column: usize) -> Result<PlayOutcome, EngineError> {
        if !self.store.state().is_started() {
            return Ok(PlayOutcome::Ignored);
        }

        self.store.dispatch(Action::AddPiece { column })?;
        let detection = detector::detect_outcome(&mut self.store)?;

        if let (true, Some(line)) = (detection.won, detection.line) {
            let state = self.store.dispatch(Action::Win)?;
            let winner = state.current_player();
            info!(winner = winner.name(), turn = state.turn_count(), "round won");
            return Ok(PlayOutcome::Won { winner, line });
        }

        let state = self.store.dispatch(Action::NextPlayer)?;
        let flags = state.flags();
        Ok(if flags.last_move_invalid {
            PlayOutcome::Invalid { column }
        } else if flags.is_draw {
            info!(turn = state.turn_count(), "round drawn");
            PlayOutcome::Draw
        } else {
            PlayOutcome::Continue {
                next: state.current_player(),
            }
        })
    }

    /// Start a new round and play `columns` in order.
    ///
    /// Stops at the first win or draw; any remaining columns are skipped.
    /// Returns the final snapshot.
    pub fn replay(&mut self, columns: &[usize]) -> Result<Arc<GameState>, EngineError> {
        self.new_round()?;
        for (index, &column) in columns.iter().enumerate() {
            match self.play(column)? {
                PlayOutcome::Won { .. } | PlayOutcome::Draw => {
                    let skipped = columns.len() - index - 1;
                    if skipped > 0 {
                        warn!(skipped, "round ended before the replay finished");
                    }
                    break;
                }
                PlayOutcome::Ignored
                | PlayOutcome::Invalid { .. }
                | PlayOutcome::Continue { .. } => {}
            }
        }
        Ok(self.state())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Store::new())
    }
}
