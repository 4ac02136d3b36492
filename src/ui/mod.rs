//! Terminal front end: translates key presses into session calls and paints
//! the current snapshot.

mod app;
mod game_view;

pub use app::App;
