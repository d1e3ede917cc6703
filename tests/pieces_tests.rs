//! Piece catalog shapes and the random draw

use std::collections::HashSet;

use blockfall::core::pieces::{all_pieces, piece, random_piece};
use blockfall::core::SimpleRng;
use blockfall::types::{PieceKind, Position};

fn p(row: i8, col: i8) -> Position {
    Position::new(row, col)
}

#[test]
fn test_catalog_order_and_rotation_counts() {
    let pieces = all_pieces();
    assert_eq!(pieces.len(), 7);
    for (entry, kind) in pieces.iter().zip(PieceKind::ALL) {
        assert_eq!(entry.kind(), kind);
        let expected = if kind == PieceKind::O { 1 } else { 4 };
        assert_eq!(entry.rotation_count(), expected, "{kind:?}");
    }
}

#[test]
fn test_every_shape_is_four_distinct_cells_in_the_box() {
    for entry in all_pieces() {
        for shape in entry.rotations() {
            let unique: HashSet<_> = shape.iter().collect();
            assert_eq!(unique.len(), 4);
            assert!(shape
                .iter()
                .all(|c| (0..4).contains(&c.row) && (0..4).contains(&c.col)));
        }
    }
}

#[test]
fn test_rotation_states_differ() {
    for entry in all_pieces() {
        let states: HashSet<Vec<Position>> = entry
            .rotations()
            .iter()
            .map(|shape| {
                let mut cells = shape.to_vec();
                cells.sort_by_key(|c| (c.row, c.col));
                cells
            })
            .collect();
        assert_eq!(states.len(), entry.rotation_count());
    }
}

#[test]
fn test_spawn_orientations() {
    assert_eq!(piece(PieceKind::I).cells(0), &[p(1, 0), p(1, 1), p(1, 2), p(1, 3)]);
    assert_eq!(piece(PieceKind::O).cells(0), &[p(1, 1), p(1, 2), p(2, 1), p(2, 2)]);
    assert_eq!(piece(PieceKind::T).cells(0), &[p(1, 2), p(2, 1), p(2, 2), p(2, 3)]);
    assert_eq!(piece(PieceKind::J).cells(0), &[p(1, 1), p(2, 1), p(2, 2), p(2, 3)]);
    assert_eq!(piece(PieceKind::L).cells(0), &[p(1, 3), p(2, 1), p(2, 2), p(2, 3)]);
}

#[test]
fn test_vertical_i_is_one_column() {
    let i = piece(PieceKind::I);
    assert!(i.cells(1).iter().all(|c| c.col == 2));
    assert!(i.cells(3).iter().all(|c| c.col == 1));
}

#[test]
fn test_random_piece_is_roughly_uniform() {
    let mut rng = SimpleRng::new(99);
    let mut counts = [0u32; 7];
    for _ in 0..7000 {
        counts[random_piece(&mut rng).kind().index()] += 1;
    }
    for (kind, count) in PieceKind::ALL.iter().zip(counts) {
        assert!((700..=1300).contains(&count), "{kind:?} drawn {count} times");
    }
}

#[test]
fn test_random_sequence_is_seeded() {
    let draw = |seed| {
        let mut rng = SimpleRng::new(seed);
        (0..32)
            .map(|_| random_piece(&mut rng).kind())
            .collect::<Vec<_>>()
    };
    assert_eq!(draw(2024), draw(2024));
    assert_ne!(draw(2024), draw(2025));
}
