//! Pieces module - the seven tetromino shapes and their rotation states
//!
//! Every rotation state is written down as a 4x4 character grid where `x`
//! marks an occupied cell. The grids are parsed once, on first use, into
//! `(row, col)` offsets inside the bounding box.
//!
//! Rotation index 0 is the spawn orientation. Moving to the next index is a
//! clockwise turn. The square has a single state.

use std::sync::OnceLock;

use arrayvec::ArrayVec;

use crate::rng::SimpleRng;
use crate::types::{PieceKind, Position};

/// Occupied offsets of one rotation state
pub type Shape = [Position; 4];

/// Upper bound on rotation states per piece
pub const MAX_ROTATIONS: usize = 4;

type Grid = [&'static str; 4];

const I_GRIDS: &[Grid] = &[
    ["    ", "xxxx", "    ", "    "],
    ["  x ", "  x ", "  x ", "  x "],
    ["    ", "    ", "xxxx", "    "],
    [" x  ", " x  ", " x  ", " x  "],
];

const J_GRIDS: &[Grid] = &[
    ["    ", " x  ", " xxx", "    "],
    ["    ", "  xx", "  x ", "  x "],
    ["    ", "    ", " xxx", "   x"],
    ["    ", "  x ", "  x ", " xx "],
];

const L_GRIDS: &[Grid] = &[
    ["    ", "   x", " xxx", "    "],
    ["    ", "  x ", "  x ", "  xx"],
    ["    ", "    ", " xxx", " x  "],
    ["    ", " xx ", "  x ", "  x "],
];

const O_GRIDS: &[Grid] = &[["    ", " xx ", " xx ", "    "]];

const S_GRIDS: &[Grid] = &[
    ["    ", "  xx", " xx ", "    "],
    ["    ", "  x ", "  xx", "   x"],
    ["    ", "    ", "  xx", " xx "],
    ["    ", " x  ", " xx ", "  x "],
];

const Z_GRIDS: &[Grid] = &[
    ["    ", " xx ", "  xx", "    "],
    ["    ", "   x", "  xx", "  x "],
    ["    ", "    ", " xx ", "  xx"],
    ["    ", "  x ", " xx ", " x  "],
];

const T_GRIDS: &[Grid] = &[
    ["    ", "  x ", " xxx", "    "],
    ["    ", "  x ", "  xx", "  x "],
    ["    ", "    ", " xxx", "  x "],
    ["    ", "  x ", " xx ", "  x "],
];

/// A piece: its kind (identity and color tag) plus its rotation states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    rotations: ArrayVec<Shape, MAX_ROTATIONS>,
}

impl Piece {
    fn from_grids(kind: PieceKind, grids: &[Grid]) -> Self {
        Self {
            kind,
            rotations: grids.iter().map(parse_rotation).collect(),
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Number of rotation states (4, or 1 for the square)
    pub fn rotation_count(&self) -> usize {
        self.rotations.len()
    }

    /// Occupied offsets for a rotation state.
    ///
    /// # Panics
    ///
    /// Panics if `rotation >= self.rotation_count()`.
    pub fn cells(&self, rotation: usize) -> &Shape {
        &self.rotations[rotation]
    }

    pub fn rotations(&self) -> &[Shape] {
        &self.rotations
    }
}

/// Parse one 4x4 grid into offsets, in reading order.
fn parse_rotation(grid: &Grid) -> Shape {
    let mut cells = ArrayVec::<Position, 4>::new();
    for (row, line) in grid.iter().enumerate() {
        for (col, ch) in line.chars().enumerate() {
            if ch == 'x' {
                cells.push(Position::new(row as i8, col as i8));
            }
        }
    }
    match cells.into_inner() {
        Ok(shape) => shape,
        Err(_) => panic!("rotation grid must mark exactly 4 cells"),
    }
}

fn grids_for(kind: PieceKind) -> &'static [Grid] {
    match kind {
        PieceKind::I => I_GRIDS,
        PieceKind::J => J_GRIDS,
        PieceKind::L => L_GRIDS,
        PieceKind::O => O_GRIDS,
        PieceKind::S => S_GRIDS,
        PieceKind::Z => Z_GRIDS,
        PieceKind::T => T_GRIDS,
    }
}

static CATALOG: OnceLock<[Piece; 7]> = OnceLock::new();

/// All seven pieces in catalog order (I, J, L, O, S, Z, T)
pub fn all_pieces() -> &'static [Piece] {
    CATALOG.get_or_init(|| PieceKind::ALL.map(|kind| Piece::from_grids(kind, grids_for(kind))))
}

/// Catalog entry for a kind
pub fn piece(kind: PieceKind) -> &'static Piece {
    &all_pieces()[kind.index()]
}

/// Uniform, independent draw from the catalog
pub fn random_piece(rng: &mut SimpleRng) -> &'static Piece {
    let pieces = all_pieces();
    &pieces[rng.next_range(pieces.len() as u32) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rotation_reads_rows_then_columns() {
        let shape = parse_rotation(&["    ", " x  ", " xxx", "    "]);
        assert_eq!(
            shape,
            [
                Position::new(1, 1),
                Position::new(2, 1),
                Position::new(2, 2),
                Position::new(2, 3),
            ]
        );
    }

    #[test]
    #[should_panic(expected = "exactly 4 cells")]
    fn test_parse_rotation_rejects_short_grid() {
        parse_rotation(&["    ", " x  ", " xx ", "    "]);
    }

    #[test]
    fn test_catalog_is_built_once() {
        let a = all_pieces().as_ptr();
        let b = all_pieces().as_ptr();
        assert_eq!(a, b);
    }

    #[test]
    fn test_piece_lookup_matches_kind() {
        for kind in PieceKind::ALL {
            assert_eq!(piece(kind).kind(), kind);
        }
    }
}
