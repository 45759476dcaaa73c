//! Placement pruning by local fit.
//!
//! Every filled cell of a candidate placement looks at its 3×3 Moore
//! neighbourhood on the board after placement; each empty neighbour is a
//! gap the placement leaves behind. Cells outside the board count as
//! filled, so edge and corner placements are preferred.

use smallvec::SmallVec;

use crate::board::QuiltBoard;
use crate::core::{Action, GameState};
use crate::patch::{PatchCatalog, Shape};

const STRIDE: u32 = QuiltBoard::COLUMNS as u32;

/// Fit of `shape` placed at `(row, column)`; higher is tighter, `0` is a
/// placement without any empty neighbour.
#[must_use]
pub fn placement_fit(board: &QuiltBoard, shape: &Shape, row: u8, column: u8) -> i32 {
    let tiles = board.tiles() | shape.mask_at(row, column);
    let mut gaps = 0;
    for (shape_row, shape_column) in shape.cells() {
        let (r, c) = (i32::from(row + shape_row), i32::from(column + shape_column));
        for dr in -1..=1 {
            for dc in -1..=1 {
                let (nr, nc) = (r + dr, c + dc);
                if !(0..i32::from(QuiltBoard::ROWS)).contains(&nr)
                    || !(0..i32::from(QuiltBoard::COLUMNS)).contains(&nc)
                {
                    continue;
                }
                if tiles & (1u128 << (nr as u32 * STRIDE + nc as u32)) == 0 {
                    gaps += 1;
                }
            }
        }
    }
    -gaps
}

/// Fit of a placement action on the mover's board; `None` for walking.
#[must_use]
pub fn action_fit(state: &GameState, action: &Action) -> Option<i32> {
    let board = &state.current().quilt_board;
    match *action {
        Action::Walk => None,
        Action::SpecialPatchPlacement {
            patch_id,
            row,
            column,
        } => Some(placement_fit(board, PatchCatalog::patch(patch_id).shape(), row, column)),
        Action::PatchPlacement {
            patch_id,
            transformation,
            row,
            column,
            ..
        } => {
            let shape = PatchCatalog::patch(patch_id).transformed(transformation)?;
            Some(placement_fit(board, shape, row, column))
        }
    }
}

/// Keep walking plus the `k` best-fitting placements of each purchase slot
/// (special placements form their own group).
///
/// Surviving actions keep their relative order within a group; ties keep
/// generation order.
#[must_use]
pub fn top_actions(state: &GameState, actions: Vec<Action>, k: usize) -> Vec<Action> {
    // walk, special, slot 0, slot 1, slot 2
    let mut groups: [SmallVec<[(i32, Action); 32]>; 5] = Default::default();
    let mut walk = None;

    for action in actions {
        let group = match action {
            Action::Walk => {
                walk = Some(action);
                continue;
            }
            Action::SpecialPatchPlacement { .. } => 1,
            Action::PatchPlacement { slot, .. } => 2 + slot as usize,
        };
        let fit = action_fit(state, &action).unwrap_or(i32::MIN);
        groups[group].push((fit, action));
    }

    let mut kept: Vec<Action> = walk.into_iter().collect();
    for group in &mut groups {
        group.sort_by(|a, b| b.0.cmp(&a.0));
        kept.extend(group.iter().take(k).map(|(_, action)| *action));
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Patchwork, RulesEngine};

    #[test]
    fn test_corner_fits_better_than_center() {
        let board = QuiltBoard::new();
        let single = PatchCatalog::special_patch(0).shape();

        // corner: 3 in-bounds neighbours, all empty
        assert_eq!(placement_fit(&board, single, 0, 0), -3);
        // edge: 5
        assert_eq!(placement_fit(&board, single, 0, 4), -5);
        // center: 8
        assert_eq!(placement_fit(&board, single, 4, 4), -8);
    }

    #[test]
    fn test_filling_a_hole_is_perfect() {
        let mut board = QuiltBoard::new();
        let block = Shape::from_rows(&["XXX", "X.X", "XXX"]);
        board.add_patch(&block, 0, 0, 0);
        let single = PatchCatalog::special_patch(0).shape();

        assert_eq!(placement_fit(&board, single, 1, 1), 0);
    }

    #[test]
    fn test_top_actions_keeps_walk_and_k_per_slot() {
        let engine = Patchwork::new();
        let state = engine.initial_state(Some(7));
        let actions = engine.valid_actions(&state);

        let kept = top_actions(&state, actions.clone(), 2);

        assert!(kept.iter().any(Action::is_walking));
        for slot in 0..3u8 {
            let total = actions
                .iter()
                .filter(|a| matches!(a, Action::PatchPlacement { slot: s, .. } if *s == slot))
                .count();
            let count = kept
                .iter()
                .filter(|a| matches!(a, Action::PatchPlacement { slot: s, .. } if *s == slot))
                .count();
            assert_eq!(count, total.min(2));
        }
        assert!(kept.iter().all(|a| actions.contains(a)));
    }

    #[test]
    fn test_top_actions_prefers_tight_fits() {
        let engine = Patchwork::new();
        let state = engine.initial_state(Some(7));
        let actions = engine.valid_actions(&state);

        let kept = top_actions(&state, actions.clone(), 1);
        for action in kept.iter().filter(|a| a.is_patch_placement()) {
            let Action::PatchPlacement { slot, .. } = *action else {
                unreachable!()
            };
            let best = actions
                .iter()
                .filter(|a| matches!(a, Action::PatchPlacement { slot: s, .. } if *s == slot))
                .filter_map(|a| action_fit(&state, a))
                .max();
            assert_eq!(action_fit(&state, action), best);
        }
    }
}
