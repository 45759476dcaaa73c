//! Quilt board and time board integration tests.

use std::collections::BTreeSet;

use patchwork::board::{QuiltBoard, TimeBoard};
use patchwork::core::GameRng;
use patchwork::patch::{Patch, PatchCatalog, Shape};

type PlacementKey = (u8, u8, u8, u8);

fn key(transformation: patchwork::patch::Transformation, row: u8, column: u8) -> PlacementKey {
    (
        transformation.rotation.quarter_turns(),
        transformation.orientation as u8,
        row,
        column,
    )
}

/// Every offset of every unique transform, checked tile by tile.
fn brute_force_placements(board: &QuiltBoard, patch: &Patch) -> BTreeSet<PlacementKey> {
    let mut found = BTreeSet::new();
    for transformed in patch.unique_transformations() {
        let shape = &transformed.shape;
        for row in 0..QuiltBoard::ROWS {
            for column in 0..QuiltBoard::COLUMNS {
                let fits = shape.cells().all(|(r, c)| {
                    row + r < QuiltBoard::ROWS
                        && column + c < QuiltBoard::COLUMNS
                        && !board.get(row + r, column + c)
                });
                if fits {
                    found.insert(key(transformed.transformation, row, column));
                }
            }
        }
    }
    found
}

fn sliding_placements(board: &QuiltBoard, patch: &Patch) -> BTreeSet<PlacementKey> {
    board
        .placements(patch)
        .map(|p| key(p.transformation, p.row, p.column))
        .collect()
}

fn scattered_board(seed: u64, tiles: usize) -> QuiltBoard {
    let single = PatchCatalog::special_patch(0).shape();
    let mut rng = GameRng::new(seed);
    let mut board = QuiltBoard::new();
    for _ in 0..tiles {
        let row = rng.gen_range(0..QuiltBoard::ROWS);
        let column = rng.gen_range(0..QuiltBoard::COLUMNS);
        if !board.get(row, column) {
            board.add_patch(single, 0, row, column);
        }
    }
    board
}

// =============================================================================
// Placement search
// =============================================================================

#[test]
fn test_placements_match_brute_force_on_empty_board() {
    let board = QuiltBoard::new();
    for patch in PatchCatalog::regular_patches()
        .iter()
        .chain(std::iter::once(PatchCatalog::starting_patch()))
    {
        assert_eq!(
            sliding_placements(&board, patch),
            brute_force_placements(&board, patch),
            "patch {}",
            patch.id
        );
    }
}

#[test]
fn test_placements_match_brute_force_on_scattered_boards() {
    for seed in 0..8 {
        let board = scattered_board(seed, 10 + 5 * seed as usize);
        for patch in PatchCatalog::regular_patches() {
            assert_eq!(
                sliding_placements(&board, patch),
                brute_force_placements(&board, patch),
                "seed {seed} patch {}",
                patch.id
            );
        }
    }
}

#[test]
fn test_placements_have_no_duplicates() {
    let board = scattered_board(3, 20);
    for patch in PatchCatalog::regular_patches() {
        let count = board.placements(patch).count();
        assert_eq!(count, sliding_placements(&board, patch).len());
    }
}

#[test]
fn test_unique_transformations_counts() {
    let count = |id: u8| PatchCatalog::patch(id).unique_transformations().len();

    // 2×2 square
    assert_eq!(count(9), 1);
    // straight line of five
    assert_eq!(count(27), 2);
    // plus sign
    assert_eq!(count(17), 1);
    // asymmetric L-like pieces
    assert_eq!(count(14), 8);
}

#[test]
fn test_tiles_filled_matches_popcount() {
    for seed in 0..4 {
        let board = scattered_board(seed, 40);
        assert_eq!(board.tiles_filled(), board.tiles().count_ones());
        assert_eq!(board.is_full(), board.tiles_filled() == 81);
        assert_eq!(board.score(), -2 * board.tiles_free() as i32);
    }
}

#[test]
fn test_full_board_has_no_placements() {
    let mut board = QuiltBoard::new();
    let row = Shape::from_rows(&["XXXXX"]);
    let rest = Shape::from_rows(&["XXXX"]);
    for r in 0..QuiltBoard::ROWS {
        board.add_patch(&row, 0, r, 0);
        board.add_patch(&rest, 0, r, 5);
    }

    assert!(board.is_full());
    assert_eq!(board.score(), 0);
    assert_eq!(board.placements(PatchCatalog::special_patch(0)).count(), 0);
}

// =============================================================================
// Time board
// =============================================================================

#[test]
fn test_time_board_layout() {
    let board = TimeBoard::new();

    assert_eq!(board.button_income_triggers_in_range(0..TimeBoard::CELLS), 9);
    assert_eq!(board.special_patches_remaining(), 5);
    assert_eq!(
        board.special_patches_in_range(0..TimeBoard::CELLS).collect::<Vec<_>>(),
        TimeBoard::SPECIAL_PATCH_CELLS.to_vec()
    );
}

#[test]
fn test_time_board_ranges_are_clamped() {
    let board = TimeBoard::new();

    assert_eq!(board.button_income_triggers_in_range(50..100), 1);
    #[allow(clippy::reversed_empty_ranges)]
    let backwards = 30..20;
    assert_eq!(board.button_income_triggers_in_range(backwards), 0);
}
