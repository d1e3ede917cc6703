//! Field grid, merge and line clearing

mod common;

use blockfall::core::pieces::piece;
use blockfall::core::Field;
use blockfall::types::{PieceKind, Position, FIELD_HEIGHT, FIELD_WIDTH};
use common::fill_row_except;

#[test]
fn test_new_field_is_empty() {
    let field = Field::new();
    assert_eq!(field.width(), FIELD_WIDTH);
    assert_eq!(field.height(), FIELD_HEIGHT);
    assert_eq!(field.occupied_count(), 0);
    assert!(field.rows().all(|row| row.iter().all(|cell| cell.is_none())));
}

#[test]
fn test_out_of_bounds_access() {
    let mut field = Field::new();
    assert_eq!(field.get(-1, 0), None);
    assert_eq!(field.get(21, 0), None);
    assert_eq!(field.get(0, 10), None);
    assert_eq!(field.get(0, -1), None);
    assert_eq!(field.get(20, 9), Some(None));

    assert!(!field.set(21, 0, Some(PieceKind::T)));
    assert!(!field.is_vacant(-1, 4));
    assert!(!field.is_occupied(-1, 4));
    assert_eq!(field.occupied_count(), 0);
}

#[test]
fn test_merge_leaves_source_untouched() {
    let field = Field::new();
    let merged = field.merge(piece(PieceKind::O), 0, Position::new(18, 0));

    assert_eq!(field.occupied_count(), 0);
    assert_eq!(merged.occupied_count(), 4);
    for (row, col) in [(19, 1), (19, 2), (20, 1), (20, 2)] {
        assert_eq!(merged.get(row, col), Some(Some(PieceKind::O)));
    }
}

#[test]
fn test_clear_lines_compacts_survivors() {
    common::init_logging();

    let mut field = Field::new();
    fill_row_except(&mut field, 20, &[]);
    fill_row_except(&mut field, 18, &[]);
    field.set(19, 0, Some(PieceKind::L));
    field.set(17, 5, Some(PieceKind::S));

    let clear = field.clear_lines();
    assert_eq!(clear.lines_cleared, 2);
    assert_eq!(clear.rows.as_slice(), &[20, 18]);

    let out = clear.field;
    assert_eq!(out.occupied_count(), 2);
    assert_eq!(out.get(20, 0), Some(Some(PieceKind::L)));
    assert_eq!(out.get(19, 5), Some(Some(PieceKind::S)));
    assert!(out.rows().take(19).all(|row| row.iter().all(|c| c.is_none())));
}

#[test]
fn test_clear_lines_without_full_rows_is_identity() {
    let mut field = Field::new();
    fill_row_except(&mut field, 20, &[4]);
    fill_row_except(&mut field, 10, &[0, 9]);

    let clear = field.clear_lines();
    assert_eq!(clear.lines_cleared, 0);
    assert!(clear.rows.is_empty());
    assert_eq!(clear.field, field);
}

#[test]
fn test_clear_every_row() {
    let mut field = Field::new();
    for row in 0..FIELD_HEIGHT as i8 {
        fill_row_except(&mut field, row, &[]);
    }

    let clear = field.clear_lines();
    assert_eq!(clear.lines_cleared, FIELD_HEIGHT as u32);
    assert_eq!(clear.field, Field::new());
}
