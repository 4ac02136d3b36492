//! The state store: owns the current snapshot, applies actions through the
//! reducer and notifies subscribers after every successful dispatch.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::GameConfig;
use crate::error::EngineError;
use crate::game::{reduce, Action, FirstPlayer, GameState, Transition};

/// Callback invoked with the new snapshot after each dispatch.
pub type Listener = Box<dyn FnMut(&GameState)>;

/// Handle returned by [`Store::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub struct Store {
    state: Arc<GameState>,
    first_player: FirstPlayer,
    strict_actions: bool,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl Store {
    /// Store with an OS-seeded random starting player.
    pub fn new() -> Self {
        Self::with_first_player(FirstPlayer::random())
    }

    /// Store whose starting players follow a deterministic sequence.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_first_player(FirstPlayer::seeded(seed))
    }

    pub fn with_first_player(mut first_player: FirstPlayer) -> Self {
        let state = GameState::initial(first_player.pick());
        Store {
            state: Arc::new(state),
            first_player,
            strict_actions: false,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        let first_player = match (config.first_player, config.seed) {
            (Some(player), _) => FirstPlayer::Fixed(player),
            (None, Some(seed)) => FirstPlayer::seeded(seed),
            (None, None) => FirstPlayer::random(),
        };
        Self::with_first_player(first_player).strict_actions(config.strict_actions)
    }

    /// Reject unrecognized actions with [`EngineError::UnknownAction`]
    /// instead of ignoring them.
    pub fn strict_actions(mut self, strict: bool) -> Self {
        self.strict_actions = strict;
        self
    }

    /// Current snapshot
    pub fn state(&self) -> Arc<GameState> {
        Arc::clone(&self.state)
    }

    /// Apply `action` and notify subscribers.
    ///
    /// No-op actions return the previous snapshot (the same `Arc`). On error
    /// the state is untouched and no subscriber is called.
    pub fn dispatch(&mut self, action: Action) -> Result<Arc<GameState>, EngineError> {
        if action == Action::Unknown {
            if self.strict_actions {
                return Err(EngineError::UnknownAction);
            }
            warn!("ignoring unrecognized action");
        }

        match reduce(&self.state, action, &mut self.first_player)? {
            Transition::Replaced(next) => self.state = Arc::new(next),
            Transition::Unchanged => debug!(action = action.name(), "no-op"),
        }

        if let Action::AddPiece { column } = action {
            if self.state.flags().last_move_invalid {
                warn!(column, "column is full, move rejected");
            }
        }
        debug!(
            action = action.name(),
            turn = self.state.turn_count(),
            player = self.state.current_player().number(),
            "dispatched"
        );

        for (_, listener) in self.listeners.iter_mut() {
            listener(self.state.as_ref());
        }

        Ok(self.state())
    }

    /// Register a listener called after every dispatch, in registration order.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&GameState) + 'static,
    {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("strict_actions", &self.strict_actions)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
