//! board representation - fixed width, row-major cells, row 0 is the floor
//! a spawn margin sits on top of the visible rows so pieces can enter above the stack

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Piece;

/// Rows above the visible region reserved for spawning.
pub const SPAWN_MARGIN: usize = 4;

/// Widest board accepted by [`Board::from_rows`].
pub const MAX_WIDTH: usize = 32;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Garbage,
    Piece(Piece),
}

impl Cell {
    #[inline(always)]
    pub fn is_filled(self) -> bool {
        !matches!(self, Cell::Empty)
    }

    /// `.`, `_` and space are empty, `G`, `#` and `X` are garbage, piece letters keep their kind.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '.' | '_' | ' ' => Some(Cell::Empty),
            'G' | 'g' | '#' | 'X' | 'x' => Some(Cell::Garbage),
            other => Piece::from_char(other).map(Cell::Piece),
        }
    }

    pub fn letter(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Garbage => 'G',
            Cell::Piece(piece) => piece.letter(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("board width {width} is outside 1..={}", MAX_WIDTH)]
    InvalidWidth { width: usize },
    #[error("row {row} has {found} cells, expected {expected}")]
    RowWidth {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("{rows} rows do not fit in a board of height {height}")]
    TooManyRows { rows: usize, height: usize },
    #[error("unknown cell character {ch:?} in row {row}")]
    UnknownCell { ch: char, row: usize },
}

/// Fixed-width, variable-height playfield.
/// Row 0 is the bottom; `height() = visible_height + SPAWN_MARGIN`.
#[derive(Clone, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(try_from = "BoardRows", into = "BoardRows")]
pub struct Board {
    width: usize,
    visible_height: usize,
    cells: Vec<Cell>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WIDTH, Self::DEFAULT_VISIBLE_HEIGHT)
    }
}

impl Board {
    pub const DEFAULT_WIDTH: usize = 4;
    pub const DEFAULT_VISIBLE_HEIGHT: usize = 20;

    pub fn new(width: usize, visible_height: usize) -> Self {
        assert!(
            (1..=MAX_WIDTH).contains(&width),
            "board width {width} is outside 1..={MAX_WIDTH}"
        );
        Self {
            width,
            visible_height,
            cells: vec![Cell::Empty; width * (visible_height + SPAWN_MARGIN)],
        }
    }

    /// Build a board from text rows listed top to bottom; the last row is the floor.
    pub fn from_rows<S: AsRef<str>>(
        width: usize,
        visible_height: usize,
        rows: &[S],
    ) -> Result<Self, BoardError> {
        if !(1..=MAX_WIDTH).contains(&width) {
            return Err(BoardError::InvalidWidth { width });
        }
        let mut board = Self::new(width, visible_height);
        if rows.len() > board.height() {
            return Err(BoardError::TooManyRows {
                rows: rows.len(),
                height: board.height(),
            });
        }

        for (y, text) in rows.iter().rev().enumerate() {
            let text = text.as_ref();
            let found = text.chars().count();
            if found != width {
                return Err(BoardError::RowWidth {
                    row: y,
                    found,
                    expected: width,
                });
            }
            for (x, ch) in text.chars().enumerate() {
                let cell = Cell::from_char(ch).ok_or(BoardError::UnknownCell { ch, row: y })?;
                board.set(x, y, cell);
            }
        }
        Ok(board)
    }

    #[inline(always)]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline(always)]
    pub fn visible_height(&self) -> usize {
        self.visible_height
    }

    #[inline(always)]
    pub fn height(&self) -> usize {
        self.visible_height + SPAWN_MARGIN
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn get(&self, x: usize, y: usize) -> Cell {
        self.cells[self.index(x, y)]
    }

    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        self.get(x, y).is_filled()
    }

    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        let idx = self.index(x, y);
        self.cells[idx] = cell;
    }

    /// Collision lookup in signed coordinates.
    /// Walls and the floor are occupied; the space above the top row is not.
    #[inline]
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        if x < 0 || x >= self.width as i32 || y < 0 {
            return true;
        }
        if y >= self.height() as i32 {
            return false;
        }
        self.is_filled(x as usize, y as usize)
    }

    pub fn row(&self, y: usize) -> &[Cell] {
        let start = self.index(0, y);
        &self.cells[start..start + self.width]
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y).iter().all(|cell| cell.is_filled())
    }

    pub fn is_row_empty(&self, y: usize) -> bool {
        self.row(y).iter().all(|cell| !cell.is_filled())
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_filled()).count()
    }

    /// Number of rows up to and including the highest non-empty one.
    pub fn stack_height(&self) -> usize {
        (0..self.height())
            .rev()
            .find(|&y| !self.is_row_empty(y))
            .map_or(0, |y| y + 1)
    }

    /// Remove every full row and pad the top with empty rows, keeping the height.
    pub fn clear_lines(&mut self) -> u8 {
        let total = self.cells.len();
        let mut kept = Vec::with_capacity(total);
        let mut cleared = 0u8;
        for row in self.cells.chunks(self.width) {
            if row.iter().all(|cell| cell.is_filled()) {
                cleared += 1;
            } else {
                kept.extend_from_slice(row);
            }
        }
        if cleared > 0 {
            kept.resize(total, Cell::Empty);
            self.cells = kept;
        }
        cleared
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for y in (0..self.visible_height).rev() {
            write!(f, "|")?;
            for cell in self.row(y) {
                write!(f, "{}", cell.letter())?;
            }
            writeln!(f, "|")?;
        }
        write!(f, "+{}+", "-".repeat(self.width))
    }
}

/// Serialized form: dimensions plus the occupied part of the stack, top row first.
#[derive(Serialize, Deserialize)]
struct BoardRows {
    width: usize,
    visible_height: usize,
    rows: Vec<String>,
}

impl From<Board> for BoardRows {
    fn from(board: Board) -> Self {
        let rows = (0..board.stack_height())
            .rev()
            .map(|y| board.row(y).iter().map(|cell| cell.letter()).collect())
            .collect();
        Self {
            width: board.width,
            visible_height: board.visible_height,
            rows,
        }
    }
}

impl TryFrom<BoardRows> for Board {
    type Error = BoardError;

    fn try_from(repr: BoardRows) -> Result<Self, Self::Error> {
        Board::from_rows(repr.width, repr.visible_height, &repr.rows)
    }
}
