use std::fmt;

use serde::{Deserialize, Serialize};

use super::player::Player;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;
pub const CELLS: usize = ROWS * COLS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Occupied(Player),
}

/// A placed piece, addressed as (column, row). Row 0 is the top, row 5 the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub column: usize,
    pub row: usize,
}

impl Move {
    pub fn new(column: usize, row: usize) -> Self {
        Move { column, row }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    columns: [[Cell; ROWS]; COLS],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropError {
    ColumnFull,
    InvalidColumn,
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            columns: [[Cell::Empty; ROWS]; COLS],
        }
    }

    /// Get the cell at (column, row). Panics if either index is out of range.
    pub fn get(&self, column: usize, row: usize) -> Cell {
        self.columns[column][row]
    }

    /// Signed lookup used by line scans: `None` when the position is off the grid.
    pub fn at(&self, column: isize, row: isize) -> Option<Cell> {
        let column = usize::try_from(column).ok()?;
        let row = usize::try_from(row).ok()?;
        self.columns.get(column)?.get(row).copied()
    }

    /// Number of pieces in a column
    pub fn height(&self, column: usize) -> usize {
        self.columns
            .get(column)
            .map_or(0, |cells| cells.iter().filter(|c| **c != Cell::Empty).count())
    }

    /// Check if a column is full
    pub fn is_column_full(&self, column: usize) -> bool {
        if column >= COLS {
            return true;
        }
        self.columns[column][0] != Cell::Empty
    }

    /// Row a piece dropped into `column` would land in, or `None` if the column is full
    pub fn landing_row(&self, column: usize) -> Option<usize> {
        let cells = self.columns.get(column)?;
        (0..ROWS).rev().find(|&row| cells[row] == Cell::Empty)
    }

    /// Drop a piece in a column, returns the row where it landed
    pub fn drop_piece(&mut self, column: usize, player: Player) -> Result<usize, DropError> {
        if column >= COLS {
            return Err(DropError::InvalidColumn);
        }

        let row = self.landing_row(column).ok_or(DropError::ColumnFull)?;
        self.columns[column][row] = Cell::Occupied(player);
        Ok(row)
    }

    /// Total pieces on the board
    pub fn piece_count(&self) -> usize {
        (0..COLS).map(|column| self.height(column)).sum()
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|column| self.is_column_full(column))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Plain-text rendering, top row first: `-` empty, `X` player one, `O` player two.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..ROWS {
            let line: Vec<&str> = (0..COLS)
                .map(|column| match self.get(column, row) {
                    Cell::Empty => "-",
                    Cell::Occupied(player) => player.symbol(),
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        let footer: Vec<String> = (0..COLS).map(|column| column.to_string()).collect();
        write!(f, "{}", footer.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        for column in 0..COLS {
            for row in 0..ROWS {
                assert_eq!(board.get(column, row), Cell::Empty);
            }
        }
        assert_eq!(board.piece_count(), 0);
    }

    #[test]
    fn test_drop_piece() {
        let mut board = Board::new();

        let row = board.drop_piece(3, Player::One).unwrap();
        assert_eq!(row, 5); // Should land at bottom
        assert_eq!(board.get(3, 5), Cell::Occupied(Player::One));

        let row = board.drop_piece(3, Player::Two).unwrap();
        assert_eq!(row, 4); // Should land on top of first piece
        assert_eq!(board.get(3, 4), Cell::Occupied(Player::Two));
        assert_eq!(board.height(3), 2);
    }

    #[test]
    fn test_column_fills_bottom_up() {
        let mut board = Board::new();
        let rows: Vec<usize> = (0..ROWS)
            .map(|_| board.drop_piece(0, Player::One).unwrap())
            .collect();
        assert_eq!(rows, vec![5, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_column_full() {
        let mut board = Board::new();

        for _ in 0..ROWS {
            board.drop_piece(0, Player::One).unwrap();
        }

        assert!(board.is_column_full(0));
        assert_eq!(board.landing_row(0), None);
        assert_eq!(board.drop_piece(0, Player::Two), Err(DropError::ColumnFull));
    }

    #[test]
    fn test_invalid_column() {
        let mut board = Board::new();
        assert_eq!(
            board.drop_piece(7, Player::One),
            Err(DropError::InvalidColumn)
        );
        assert!(board.is_column_full(7));
    }

    #[test]
    fn test_full_board() {
        let mut board = Board::new();
        for column in 0..COLS {
            for _ in 0..ROWS {
                board.drop_piece(column, Player::One).unwrap();
            }
        }
        assert!(board.is_full());
        assert_eq!(board.piece_count(), CELLS);
    }

    #[test]
    fn test_signed_lookup_rejects_off_grid() {
        let board = Board::new();
        assert_eq!(board.at(0, 0), Some(Cell::Empty));
        assert_eq!(board.at(6, 5), Some(Cell::Empty));
        assert_eq!(board.at(-1, 0), None);
        assert_eq!(board.at(0, -1), None);
        assert_eq!(board.at(7, 0), None);
        assert_eq!(board.at(0, 6), None);
    }

    #[test]
    fn test_display() {
        let mut board = Board::new();
        board.drop_piece(0, Player::One).unwrap();
        board.drop_piece(1, Player::Two).unwrap();
        let text = board.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), ROWS + 1);
        assert_eq!(lines[0], "- - - - - - -");
        assert_eq!(lines[5], "X O - - - - -");
        assert_eq!(lines[6], "0 1 2 3 4 5 6");
    }
}
