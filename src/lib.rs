//! # Connect Four store
//!
//! A two-player Connect Four engine built around a single authoritative state
//! store. Actions go in, immutable snapshots come out, and subscribers are
//! notified after every dispatch. Win detection scans the move history for
//! four in a row; a draw is declared once every cell is filled.
//!
//! ## Modules
//!
//! - [`game`]: Board, players, actions, state snapshot and the pure reducer
//! - [`store`]: Dispatch, snapshot access and subscriber notification
//! - [`detector`]: Move-history win scan and draw detection
//! - [`session`]: Play sequencing: place, detect, then win or next player
//! - [`ui`]: Terminal front end
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod config;
pub mod detector;
pub mod error;
pub mod game;
pub mod session;
pub mod store;
pub mod ui;

pub use detector::{detect_outcome, Detection};
pub use error::{ConfigError, EngineError};
pub use game::{Action, GameState, Player};
pub use session::{PlayOutcome, Session};
pub use store::{ListenerId, Store};
