//! Geometry module - pure movement, rotation and collision rules
//!
//! Nothing here touches game state. Every legality decision in the engine goes
//! through [`collides`].

use crate::field::Field;
use crate::pieces::Piece;
use crate::types::Position;

/// Previous rotation state, wrapping at 0
pub fn rotate_left(piece: &Piece, rotation: usize) -> usize {
    if rotation == 0 {
        piece.rotation_count() - 1
    } else {
        rotation - 1
    }
}

/// Next rotation state, wrapping at the last one
pub fn rotate_right(piece: &Piece, rotation: usize) -> usize {
    if rotation + 1 >= piece.rotation_count() {
        0
    } else {
        rotation + 1
    }
}

pub fn move_left(position: Position) -> Position {
    Position::new(position.row, position.col.saturating_sub(1))
}

pub fn move_right(position: Position) -> Position {
    Position::new(position.row, position.col.saturating_add(1))
}

pub fn move_down(position: Position) -> Position {
    Position::new(position.row.saturating_add(1), position.col)
}

/// True if any occupied cell of the placement is outside the field or on a
/// filled cell. Stops at the first violation.
pub fn collides(field: &Field, piece: &Piece, rotation: usize, position: Position) -> bool {
    piece.cells(rotation).iter().any(|&offset| {
        let cell = position + offset;
        !field.is_vacant(cell.row, cell.col)
    })
}

/// Resting place of a piece dropped straight down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ghost {
    pub position: Position,
    /// Rows between the start position and `position`
    pub drops: u32,
}

/// Step down until the next step would collide.
///
/// A start position that already collides is returned unchanged with zero drops.
pub fn ghost_position(field: &Field, piece: &Piece, rotation: usize, position: Position) -> Ghost {
    let mut ghost = Ghost { position, drops: 0 };
    loop {
        let next = move_down(ghost.position);
        if collides(field, piece, rotation, next) {
            return ghost;
        }
        ghost.position = next;
        ghost.drops += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::piece;
    use crate::types::{PieceKind, FIELD_HEIGHT};

    #[test]
    fn test_square_has_single_rotation() {
        let o = piece(PieceKind::O);
        assert_eq!(rotate_left(o, 0), 0);
        assert_eq!(rotate_right(o, 0), 0);
    }

    #[test]
    fn test_rotation_wraps() {
        let t = piece(PieceKind::T);
        assert_eq!(rotate_left(t, 0), 3);
        assert_eq!(rotate_right(t, 3), 0);
        assert_eq!(rotate_right(t, 1), 2);
    }

    #[test]
    fn test_collides_against_walls_floor_and_ceiling() {
        let field = Field::new();
        let i = piece(PieceKind::I);

        // Horizontal I occupies offset row 1, cols 0..4.
        assert!(!collides(&field, i, 0, Position::new(-1, 0)));
        assert!(collides(&field, i, 0, Position::new(-2, 0)));
        assert!(collides(&field, i, 0, Position::new(0, -1)));
        assert!(collides(&field, i, 0, Position::new(0, 7)));
        assert!(!collides(&field, i, 0, Position::new(FIELD_HEIGHT as i8 - 2, 6)));
        assert!(collides(&field, i, 0, Position::new(FIELD_HEIGHT as i8 - 1, 6)));
    }

    #[test]
    fn test_collides_against_filled_cell() {
        let mut field = Field::new();
        field.set(5, 5, Some(PieceKind::Z));
        let o = piece(PieceKind::O);

        // O occupies offsets (1,1) (1,2) (2,1) (2,2).
        assert!(collides(&field, o, 0, Position::new(4, 3)));
        assert!(!collides(&field, o, 0, Position::new(4, 5)));
    }

    #[test]
    fn test_ghost_on_empty_field() {
        let field = Field::new();
        let i = piece(PieceKind::I);
        let ghost = ghost_position(&field, i, 0, Position::new(-1, 3));
        assert_eq!(ghost.position, Position::new(19, 3));
        assert_eq!(ghost.drops, 20);
    }

    #[test]
    fn test_ghost_stops_on_stack() {
        let mut field = Field::new();
        field.set(10, 4, Some(PieceKind::L));
        let i = piece(PieceKind::I);
        let ghost = ghost_position(&field, i, 0, Position::new(-1, 3));
        // Cells on row 9 sit right on top of the filled cell.
        assert_eq!(ghost.position, Position::new(8, 3));
        assert_eq!(ghost.drops, 9);
    }
}
