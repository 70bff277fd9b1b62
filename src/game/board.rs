use std::fmt;

use crate::error::MoveError;

use super::player::Player;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;
pub const CENTER_COL: usize = COLS / 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    One,
    Two,
}

impl Cell {
    /// The player whose token occupies this cell, if any.
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::One => Some(Player::One),
            Cell::Two => Some(Player::Two),
        }
    }

    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::One => 'X',
            Cell::Two => 'O',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Build a board from text rows, top row first. `.` is empty, `X` is
    /// player 1 and `O` is player 2. Gravity is not checked, so this can
    /// describe positions that legal play never reaches.
    pub fn from_rows(rows: [&str; ROWS]) -> Option<Self> {
        let mut board = Board::new();
        for (row, text) in rows.iter().enumerate() {
            let chars: Vec<char> = text.chars().collect();
            if chars.len() != COLS {
                return None;
            }
            for (col, ch) in chars.into_iter().enumerate() {
                board.cells[row][col] = match ch {
                    '.' => Cell::Empty,
                    'X' | 'x' | '1' => Cell::One,
                    'O' | 'o' | '2' => Cell::Two,
                    _ => return None,
                };
            }
        }
        Some(board)
    }

    /// Get the cell at a specific position
    /// Row 0 is the top, row 5 is the bottom
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Check if a column is full. Out-of-range columns count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= COLS {
            return true;
        }
        self.cells[0][col] != Cell::Empty
    }

    /// Drop a token for `player` into `col`, returning the row where it landed.
    /// The board is left untouched on error.
    pub fn place(&mut self, col: usize, player: Player) -> Result<usize, MoveError> {
        if col >= COLS {
            return Err(MoveError::ColumnOutOfRange { column: col });
        }

        for row in (0..ROWS).rev() {
            if self.cells[row][col] == Cell::Empty {
                self.cells[row][col] = player.to_cell();
                return Ok(row);
            }
        }

        Err(MoveError::ColumnFull { column: col })
    }

    /// Columns whose top cell is still empty, in ascending order.
    pub fn valid_moves(&self) -> Vec<usize> {
        (0..COLS).filter(|&col| !self.is_column_full(col)).collect()
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| self.is_column_full(col))
    }

    /// Number of tokens on the board.
    pub fn token_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell != Cell::Empty)
            .count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
        }
        Ok(())
    }
}

/// Whether a move into `col` is legal: the index is on the board and the
/// column still has an empty cell, scanning from the bottom row upward.
pub fn is_valid_move(board: &Board, col: usize) -> bool {
    if col >= COLS {
        return false;
    }
    (0..ROWS).rev().any(|row| board.get(row, col) == Cell::Empty)
}
