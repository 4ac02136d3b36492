use std::cell::Cell as SharedCell;
use std::io;
use std::rc::Rc;

use crossterm::event::{self, Event, KeyCode, KeyEvent};
use ratatui::{backend::Backend, Terminal};
use tracing::error;

use crate::detector::LINE_LENGTH;
use crate::game::{Move, COLS};
use crate::session::{PlayOutcome, Session};

pub struct App {
    session: Session,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
    /// Last placed piece, kept current by a store subscriber.
    last_move: Rc<SharedCell<Option<Move>>>,
    winning_line: Option<[Move; LINE_LENGTH]>,
}

impl App {
    pub fn new(mut session: Session) -> Self {
        let last_move = Rc::new(SharedCell::new(session.state().last_move()));
        let tracker = Rc::clone(&last_move);
        session
            .store_mut()
            .subscribe(move |state| tracker.set(state.last_move()));

        App {
            session,
            selected_column: COLS / 2, // Start in middle
            should_quit: false,
            message: Some("Press S to start a game".to_string()),
            last_move,
            winning_line: None,
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: Into<io::Error>,
    {
        loop {
            terminal
                .draw(|f| self.render(f))
                .map_err(Into::<io::Error>::into)?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < COLS {
                    self.selected_column += 1;
                }
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if let Some(column) = c.to_digit(10).map(|d| d as usize) {
                    if (1..=COLS).contains(&column) {
                        self.selected_column = column - 1;
                        self.drop_piece();
                    }
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char('s') | KeyCode::Char('r') => {
                self.start_round();
            }
            _ => {}
        }
    }

    fn start_round(&mut self) {
        self.winning_line = None;
        self.selected_column = COLS / 2;
        match self.session.new_round() {
            Ok(state) => {
                self.message = Some(format!("{} goes first", state.current_player().name()));
            }
            Err(e) => {
                error!(error = %e, "failed to start round");
                self.message = Some(format!("Could not start: {e}"));
            }
        }
    }

    /// Drop piece in selected column
    fn drop_piece(&mut self) {
        self.message = match self.session.play(self.selected_column) {
            Ok(PlayOutcome::Ignored) => {
                if self.session.state().is_over() {
                    Some("Game over! Press S to play again.".to_string())
                } else {
                    Some("Press S to start a game".to_string())
                }
            }
            Ok(PlayOutcome::Invalid { .. }) => Some("Column is full!".to_string()),
            Ok(PlayOutcome::Continue { .. }) => None,
            Ok(PlayOutcome::Won { winner, line }) => {
                self.winning_line = Some(line);
                Some(format!("{} wins!", winner.name()))
            }
            Ok(PlayOutcome::Draw) => Some("It's a draw!".to_string()),
            Err(e) => {
                error!(error = %e, column = self.selected_column, "move failed");
                Some(format!("Move failed: {e}"))
            }
        };
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(
            frame,
            &self.session.state(),
            &super::game_view::Highlights {
                selected_column: self.selected_column,
                last_move: self.last_move.get(),
                winning_line: self.winning_line,
            },
            &self.message,
        );
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(Session::default())
    }
}
