use std::fmt;

use thiserror::Error;

use crate::types::{Cell, Position, Side};

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("expected 8 rows, got {0}")]
    RowCount(usize),
    #[error("row {row} has {len} cells, expected 8")]
    RowWidth { row: usize, len: usize },
    #[error("unknown cell {ch:?} at row {row}")]
    UnknownCell { row: usize, ch: char },
    #[error("expected 64 cells, got {0}")]
    CellCount(usize),
    #[error("invalid cell value {0} (expected 0, 1 or 2)")]
    CellValue(u8),
}

/// Reversi position: the grid plus the side to move.
///
/// `BoardState` is `Copy`; rule application always produces a new value, so
/// concurrent searches never share a mutable grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardState {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
    to_move: Side,
}

impl BoardState {
    /// Creates the initial board:
    /// black on (3,3) and (4,4), white on (4,3) and (3,4), white to move.
    pub fn new() -> Self {
        let mut cells = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        cells[3][3] = Cell::Black;
        cells[3][4] = Cell::White;
        cells[4][3] = Cell::White;
        cells[4][4] = Cell::Black;
        Self {
            cells,
            to_move: Side::White,
        }
    }

    /// Parses eight rows of `B`, `W` and `.` (or space). `|` separators are ignored,
    /// so the output of `Display` parses back.
    pub fn from_rows(rows: &[&str], to_move: Side) -> Result<Self, BoardError> {
        if rows.len() != BOARD_SIZE {
            return Err(BoardError::RowCount(rows.len()));
        }

        let mut cells = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        for (y, row) in rows.iter().enumerate() {
            let parsed: Vec<Cell> = row
                .chars()
                .filter(|&ch| ch != '|')
                .map(|ch| match ch {
                    'B' | 'b' => Ok(Cell::Black),
                    'W' | 'w' => Ok(Cell::White),
                    '.' | ' ' => Ok(Cell::Empty),
                    other => Err(BoardError::UnknownCell { row: y, ch: other }),
                })
                .collect::<Result<_, _>>()?;
            if parsed.len() != BOARD_SIZE {
                return Err(BoardError::RowWidth {
                    row: y,
                    len: parsed.len(),
                });
            }
            cells[y].copy_from_slice(&parsed);
        }

        Ok(Self { cells, to_move })
    }

    /// Builds a board from row-major `0/1/2` values, the encoding `to_array` produces.
    pub fn from_array(values: &[u8], to_move: Side) -> Result<Self, BoardError> {
        if values.len() != NUM_SQUARES {
            return Err(BoardError::CellCount(values.len()));
        }

        let mut cells = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        for (idx, &value) in values.iter().enumerate() {
            cells[idx / BOARD_SIZE][idx % BOARD_SIZE] = match value {
                0 => Cell::Empty,
                1 => Cell::Black,
                2 => Cell::White,
                other => return Err(BoardError::CellValue(other)),
            };
        }

        Ok(Self { cells, to_move })
    }

    pub fn to_move(&self) -> Side {
        self.to_move
    }

    /// Returns the cell at `pos`; off-board positions read as empty.
    pub fn cell(&self, pos: Position) -> Cell {
        if !pos.in_bounds() {
            return Cell::Empty;
        }
        self.cells[pos.y as usize][pos.x as usize]
    }

    pub(crate) fn set(&mut self, pos: Position, cell: Cell) {
        debug_assert!(pos.in_bounds(), "set() outside the board: {pos}");
        self.cells[pos.y as usize][pos.x as usize] = cell;
    }

    pub(crate) fn switch_turn(&mut self) {
        self.to_move = self.to_move.opponent();
    }

    /// Same grid with the given side to move.
    pub fn with_turn(&self, to_move: Side) -> Self {
        Self {
            cells: self.cells,
            to_move,
        }
    }

    /// Iterates all positions with their cell in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.cells.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, &cell)| (Position::new(x as i8, y as i8), cell))
        })
    }

    /// Returns `(black_count, white_count)`.
    pub fn count(&self) -> (u8, u8) {
        self.iter().fold((0, 0), |(black, white), (_, cell)| match cell {
            Cell::Black => (black + 1, white),
            Cell::White => (black, white + 1),
            Cell::Empty => (black, white),
        })
    }

    /// Returns the number of empty squares.
    pub fn empty_count(&self) -> u8 {
        let (black, white) = self.count();
        NUM_SQUARES as u8 - black - white
    }

    /// Static evaluation: `side`'s discs minus the opponent's discs.
    pub fn disc_differential(&self, side: Side) -> i32 {
        let (black, white) = self.count();
        let diff = black as i32 - white as i32;
        if side.is_black() { diff } else { -diff }
    }

    /// Converts board to row-major `Vec<u8>` where 0=empty, 1=black, 2=white.
    pub fn to_array(&self) -> Vec<u8> {
        self.iter().map(|(_, cell)| cell.to_u8()).collect()
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                let ch = match cell {
                    Cell::Empty => ' ',
                    Cell::Black => 'B',
                    Cell::White => 'W',
                };
                write!(f, "|{ch}")?;
            }
            writeln!(f, "|")?;
        }
        Ok(())
    }
}
