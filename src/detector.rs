//! Win and draw detection.
//!
//! A win is found by walking the move history from the newest placement back
//! to the oldest and probing the eight compass directions from each one. A
//! candidate line is four cells at offsets 0..=3 from the anchor; it counts
//! only if every cell is on the grid and holds the same piece.
//!
//! A draw is the sentinel turn [`DRAW_TURN`] reached without a winning line.
//! Draw detection dispatches [`Action::Draw`] itself, while win detection only
//! reports; the caller decides whether to dispatch [`Action::Win`].

use tracing::info;

use crate::error::EngineError;
use crate::game::{Action, Board, Cell, GameState, Move, DRAW_TURN, MIN_WIN_TURN};
use crate::store::Store;

/// Unit steps as (column delta, row delta), clockwise from "up".
pub const DIRECTIONS: [(isize, isize); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Pieces needed in a line to win.
pub const LINE_LENGTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detection {
    pub won: bool,
    /// The four cells of the winning line, anchor first.
    pub line: Option<[Move; LINE_LENGTH]>,
}

/// The line of four starting at `anchor` and stepping by `direction`, if every
/// cell is on the board and holds the same piece.
pub fn line_from(
    board: &Board,
    anchor: Move,
    (dx, dy): (isize, isize),
) -> Option<[Move; LINE_LENGTH]> {
    let origin = Cell::Occupied(match board.get(anchor.column, anchor.row) {
        Cell::Occupied(player) => player,
        Cell::Empty => return None,
    });

    let mut line = [anchor; LINE_LENGTH];
    for (step, slot) in line.iter_mut().enumerate().skip(1) {
        let step = step as isize;
        let column = anchor.column as isize + dx * step;
        let row = anchor.row as isize + dy * step;
        if board.at(column, row)? != origin {
            return None;
        }
        *slot = Move::new(column as usize, row as usize);
    }
    Some(line)
}

/// First winning line found scanning the history newest to oldest.
///
/// Always `None` after an invalid move or before turn [`MIN_WIN_TURN`].
pub fn winning_line(state: &GameState) -> Option<[Move; LINE_LENGTH]> {
    if state.flags().last_move_invalid || state.turn_count() < MIN_WIN_TURN {
        return None;
    }

    state.move_history().iter().rev().find_map(|&anchor| {
        DIRECTIONS
            .iter()
            .find_map(|&direction| line_from(state.board(), anchor, direction))
    })
}

/// The state sits on the draw sentinel: every cell filled by a valid move.
pub fn is_draw_turn(state: &GameState) -> bool {
    !state.flags().last_move_invalid && state.turn_count() == DRAW_TURN
}

/// Inspect the store's current state after a placement.
///
/// Returns whether the last move won. When the board has filled without a
/// winner this dispatches [`Action::Draw`] before returning `won = false`.
pub fn detect_outcome(store: &mut Store) -> Result<Detection, EngineError> {
    let state = store.state();

    if let Some(line) = winning_line(&state) {
        return Ok(Detection {
            won: true,
            line: Some(line),
        });
    }

    if is_draw_turn(&state) {
        info!(turn = state.turn_count(), "board full without a winner");
        store.dispatch(Action::Draw)?;
    }

    Ok(Detection {
        won: false,
        line: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{FirstPlayer, Player, COLS};

    fn store() -> Store {
        Store::with_first_player(FirstPlayer::Fixed(Player::One))
    }

    /// Alternate players through `columns`, as a session would.
    fn play(store: &mut Store, columns: &[usize]) {
        for &column in columns {
            store.dispatch(Action::AddPiece { column }).unwrap();
            store.dispatch(Action::NextPlayer).unwrap();
        }
    }

    /// Place pieces for one player only (no turn change).
    fn place(store: &mut Store, columns: &[usize]) {
        for &column in columns {
            store.dispatch(Action::AddPiece { column }).unwrap();
        }
    }

    #[test]
    fn test_horizontal_win() {
        let mut store = store();
        // Player one: 0,1,2,3 on row 5; player two stacks on top
        play(&mut store, &[0, 0, 1, 1, 2, 2, 3]);
        assert_eq!(store.state().turn_count(), 8);

        let detection = detect_outcome(&mut store).unwrap();
        assert!(detection.won);
        let line = detection.line.unwrap();
        assert!(line.iter().all(|m| m.row == 5));
        assert_eq!(line[0], Move::new(3, 5));
    }

    #[test]
    fn test_vertical_win() {
        let mut store = store();
        play(&mut store, &[4, 5, 4, 5, 4, 5, 4]);
        let detection = detect_outcome(&mut store).unwrap();
        assert!(detection.won);
        assert!(detection.line.unwrap().iter().all(|m| m.column == 4));
    }

    #[test]
    fn test_diagonal_win() {
        let mut board = Board::new();
        // Build (0,5),(1,4),(2,3),(3,2) for player one on filler
        board.drop_piece(0, Player::One).unwrap();
        board.drop_piece(1, Player::Two).unwrap();
        board.drop_piece(1, Player::One).unwrap();
        board.drop_piece(2, Player::Two).unwrap();
        board.drop_piece(2, Player::Two).unwrap();
        board.drop_piece(2, Player::One).unwrap();
        board.drop_piece(3, Player::Two).unwrap();
        board.drop_piece(3, Player::Two).unwrap();
        board.drop_piece(3, Player::Two).unwrap();
        board.drop_piece(3, Player::One).unwrap();

        let line = line_from(&board, Move::new(0, 5), (1, -1)).unwrap();
        assert_eq!(
            line,
            [
                Move::new(0, 5),
                Move::new(1, 4),
                Move::new(2, 3),
                Move::new(3, 2)
            ]
        );
        // Same line probed from the other end
        assert!(line_from(&board, Move::new(3, 2), (-1, 1)).is_some());
    }

    #[test]
    fn test_diagonal_win_through_store() {
        let mut store = store();
        // One: 0, 1, 2, 3 climbing; Two fills underneath
        play(&mut store, &[0, 1, 1, 2, 2, 3, 2, 3, 3, 6, 3]);
        let detection = detect_outcome(&mut store).unwrap();
        assert!(detection.won);
    }

    #[test]
    fn test_line_off_grid_is_rejected() {
        let mut board = Board::new();
        for column in 4..COLS {
            board.drop_piece(column, Player::One).unwrap();
        }
        // Three in a row at the edge: stepping right from column 5 leaves the grid
        assert!(line_from(&board, Move::new(5, 5), (1, 0)).is_none());
        assert!(line_from(&board, Move::new(6, 5), (1, 1)).is_none());
        assert!(line_from(&board, Move::new(4, 5), (1, 0)).is_none());
        // Pointing downward from the bottom row
        assert!(line_from(&board, Move::new(4, 5), (0, 1)).is_none());
    }

    #[test]
    fn test_no_wraparound_across_columns() {
        let mut board = Board::new();
        for column in [5, 6] {
            board.drop_piece(column, Player::One).unwrap();
        }
        for column in [0, 1] {
            board.drop_piece(column, Player::One).unwrap();
        }
        assert!(DIRECTIONS
            .iter()
            .all(|&dir| line_from(&board, Move::new(5, 5), dir).is_none()));
    }

    #[test]
    fn test_mixed_line_does_not_win() {
        let mut board = Board::new();
        board.drop_piece(0, Player::One).unwrap();
        board.drop_piece(1, Player::One).unwrap();
        board.drop_piece(2, Player::Two).unwrap();
        board.drop_piece(3, Player::One).unwrap();
        assert!(line_from(&board, Move::new(0, 5), (1, 0)).is_none());
    }

    #[test]
    fn test_too_early_to_win() {
        let mut store = store();
        // Four pieces for the same player without turn changes: turn 5
        place(&mut store, &[0, 1, 2, 3]);
        assert_eq!(store.state().turn_count(), 5);
        assert!(winning_line(&store.state()).is_none());
        assert!(!detect_outcome(&mut store).unwrap().won);
    }

    #[test]
    fn test_invalid_move_never_wins() {
        let mut store = store();
        // Player one fills column 0 (turn 7) and owns row 5 of columns 1..=3
        place(&mut store, &[0, 0, 0, 0, 0, 0, 1, 2, 3]);
        assert!(winning_line(&store.state()).is_some());

        store.dispatch(Action::AddPiece { column: 0 }).unwrap();
        let state = store.state();
        assert!(state.flags().last_move_invalid);
        assert!(winning_line(&state).is_none());
        assert!(!detect_outcome(&mut store).unwrap().won);
    }

    /// Column order filling the board with no four-in-a-row under alternating
    /// play (player one moves first).
    const DRAW_SEQUENCE: [usize; 42] = [
        0, 1, 0, 1, 0, 1, //
        1, 0, 1, 0, 1, 0, //
        2, 3, 2, 3, 2, 3, //
        3, 2, 3, 2, 3, 2, //
        4, 5, 4, 5, 4, 5, //
        5, 4, 5, 4, 5, 4, //
        6, 6, 6, 6, 6, 6,
    ];

    #[test]
    fn test_full_board_without_line_dispatches_draw() {
        let mut store = store();
        for (index, &column) in DRAW_SEQUENCE.iter().enumerate() {
            store.dispatch(Action::AddPiece { column }).unwrap();
            let detection = detect_outcome(&mut store).unwrap();
            assert!(!detection.won, "unexpected win at placement {index}");
            store.dispatch(Action::NextPlayer).unwrap();
        }

        let state = store.state();
        assert!(state.board().is_full());
        assert!(state.flags().is_draw);
        assert!(!state.flags().is_win);
        assert!(!state.flags().started);
        assert_eq!(state.turn_count(), DRAW_TURN + 1);
    }

    #[test]
    fn test_draw_not_declared_twice() {
        let mut store = store();
        for &column in DRAW_SEQUENCE.iter() {
            store.dispatch(Action::AddPiece { column }).unwrap();
            store.dispatch(Action::NextPlayer).unwrap();
        }
        assert_eq!(store.state().turn_count(), DRAW_TURN);
        detect_outcome(&mut store).unwrap();
        detect_outcome(&mut store).unwrap();
        assert_eq!(store.state().turn_count(), DRAW_TURN + 1);
    }
}
