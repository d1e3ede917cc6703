//! Field module - the fixed-size playing grid
//!
//! The field is a 21x10 grid where each cell is empty or holds the kind of the
//! piece that locked there. Uses a flat array for cache locality and so that a
//! field can be copied without allocating.
//!
//! Coordinates are `(row, col)`: rows 0..21 top to bottom, cols 0..10 left to right.
//! Merging and line clearing return new fields instead of mutating in place.

use arrayvec::ArrayVec;

use crate::pieces::Piece;
use crate::types::{Cell, Position, FIELD_HEIGHT, FIELD_WIDTH};

/// Rows in the field, as a `usize`
pub const HEIGHT: usize = FIELD_HEIGHT as usize;

/// Columns in the field, as a `usize`
pub const WIDTH: usize = FIELD_WIDTH as usize;

/// Total number of cells on the field
const FIELD_SIZE: usize = WIDTH * HEIGHT;

/// The playing field - 21 rows x 10 columns in row-major order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    cells: [Cell; FIELD_SIZE],
}

/// Result of [`Field::clear_lines`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineClear {
    pub field: Field,
    pub lines_cleared: u32,
    /// Indices of the removed rows in the input field, bottom to top
    pub rows: ArrayVec<usize, HEIGHT>,
}

impl Field {
    /// Create an empty field
    pub fn new() -> Self {
        Self {
            cells: [None; FIELD_SIZE],
        }
    }

    #[inline(always)]
    fn index(row: i8, col: i8) -> Option<usize> {
        if row < 0 || row >= FIELD_HEIGHT as i8 || col < 0 || col >= FIELD_WIDTH as i8 {
            return None;
        }
        Some((row as usize) * WIDTH + (col as usize))
    }

    pub fn width(&self) -> u8 {
        FIELD_WIDTH
    }

    pub fn height(&self) -> u8 {
        FIELD_HEIGHT
    }

    /// Cell at `(row, col)`, or `None` when out of bounds
    pub fn get(&self, row: i8, col: i8) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Set a cell. Returns false if out of bounds.
    pub fn set(&mut self, row: i8, col: i8, cell: Cell) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// In bounds and empty
    pub fn is_vacant(&self, row: i8, col: i8) -> bool {
        matches!(self.get(row, col), Some(None))
    }

    /// In bounds and filled
    pub fn is_occupied(&self, row: i8, col: i8) -> bool {
        matches!(self.get(row, col), Some(Some(_)))
    }

    /// One row of cells.
    ///
    /// # Panics
    ///
    /// Panics if `row >= HEIGHT`.
    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * WIDTH;
        &self.cells[start..start + WIDTH]
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(WIDTH)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        row < HEIGHT && self.row(row).iter().all(|cell| cell.is_some())
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy of this field with the piece's cells written in its color.
    ///
    /// Cells outside the grid are skipped; callers only merge placements that
    /// passed the collision check.
    pub fn merge(&self, piece: &Piece, rotation: usize, position: Position) -> Field {
        let mut merged = self.clone();
        for &offset in piece.cells(rotation) {
            let cell = position + offset;
            merged.set(cell.row, cell.col, Some(piece.kind()));
        }
        merged
    }

    /// Remove every full row and pad the top with empty rows.
    ///
    /// Surviving rows keep their relative order and the result always has
    /// exactly `HEIGHT` rows.
    pub fn clear_lines(&self) -> LineClear {
        let mut cells = self.cells;
        let mut rows = ArrayVec::new();
        let mut write_row = HEIGHT;

        // Two pointers, scanning bottom to top: full rows are skipped,
        // everything else is compacted downward.
        for read_row in (0..HEIGHT).rev() {
            if self.is_row_full(read_row) {
                rows.push(read_row);
                continue;
            }
            write_row -= 1;
            if write_row != read_row {
                let src = read_row * WIDTH;
                cells.copy_within(src..src + WIDTH, write_row * WIDTH);
            }
        }

        cells[..write_row * WIDTH].fill(None);

        LineClear {
            field: Field { cells },
            lines_cleared: rows.len() as u32,
            rows,
        }
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new()
    }
}
