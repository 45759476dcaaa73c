//! The Patchwork rules.

use im::Vector;
use log::trace;
use smallvec::SmallVec;

use super::engine::{RulesEngine, Termination};
use crate::board::{QuiltBoard, TimeBoard};
use crate::core::{
    Action, ActionId, GameRng, GameState, PatchworkError, PlayerId, PlayerState, Result,
};
use crate::patch::{Patch, PatchCatalog};

/// The Patchwork rules engine.
///
/// Stateless: all game data lives in [`GameState`] and every randomised
/// operation takes its [`GameRng`] from the caller.
#[derive(Clone, Copy, Debug, Default)]
pub struct Patchwork;

impl Patchwork {
    /// Buttons each player starts with.
    pub const STARTING_BUTTONS: i32 = 5;
    /// Bonus for the first move that completes a quilt board.
    pub const FULL_BOARD_BONUS: i32 = 7;
    /// Random placement attempts a rollout makes on an empty board.
    pub const RANDOM_PLACEMENT_ATTEMPTS: u32 = 448;

    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Fresh game with default player names.
    ///
    /// `seed` fixes the order of the draw pile; `None` draws one from the OS.
    ///
    /// ```
    /// use patchwork::rules::{Patchwork, RulesEngine};
    ///
    /// let engine = Patchwork::new();
    /// let state = engine.initial_state(Some(0));
    /// assert_eq!(state.patches.len(), 33);
    /// assert!(!engine.is_terminated(&state));
    /// ```
    #[must_use]
    pub fn initial_state(&self, seed: Option<u64>) -> GameState {
        self.initial_state_with_names(seed, "Player 1", "Player 2")
    }

    /// Fresh game: regular patches shuffled by `seed`, the starting patch at
    /// the end of the queue, both players on cell 0 with 5 buttons.
    #[must_use]
    pub fn initial_state_with_names(
        &self,
        seed: Option<u64>,
        player_1_name: &str,
        player_2_name: &str,
    ) -> GameState {
        let mut rng = GameRng::new(seed.unwrap_or_else(rand::random));
        let mut patches: Vec<u8> = PatchCatalog::regular_patches().iter().map(|p| p.id).collect();
        rng.shuffle(&mut patches);
        patches.push(PatchCatalog::STARTING_PATCH_ID);

        GameState {
            patches: Vector::from(patches),
            time_board: TimeBoard::new(),
            players: [
                PlayerState::new(player_1_name, 0, Self::STARTING_BUTTONS),
                PlayerState::new(player_2_name, 0, Self::STARTING_BUTTONS),
            ],
            current_player: PlayerId::PLAYER_1,
            special_patch_placement: None,
        }
    }

    /// Whether `action` is legal in `state`.
    #[must_use]
    pub fn is_legal(&self, state: &GameState, action: &Action) -> bool {
        self.check_legal(state, action).is_ok()
    }

    /// Direct legality check, equivalent to membership in
    /// [`RulesEngine::valid_actions`] without enumerating them.
    ///
    /// # Errors
    ///
    /// [`PatchworkError::InvalidAction`] naming the violated rule.
    pub fn check_legal(&self, state: &GameState, action: &Action) -> Result<()> {
        if let Some(reason) = action.out_of_range() {
            return Err(PatchworkError::MalformedAction(reason));
        }
        let invalid = |reason| {
            Err(PatchworkError::InvalidAction {
                action: action.id(),
                reason,
            })
        };

        if state.is_terminated() {
            return invalid("the game is over");
        }

        let player = state.current();
        let board = &player.quilt_board;

        if let Some(pending) = state.pending_special_patch() {
            return match *action {
                Action::SpecialPatchPlacement {
                    patch_id,
                    row,
                    column,
                } => {
                    if patch_id != pending.id {
                        invalid("a different special patch is pending")
                    } else if !board.is_valid_placement(pending.shape(), row, column) {
                        invalid("special patch does not fit at that position")
                    } else {
                        Ok(())
                    }
                }
                _ => invalid("a special patch must be placed first"),
            };
        }

        match *action {
            Action::Walk => Ok(()),
            Action::SpecialPatchPlacement { .. } => invalid("no special patch is pending"),
            Action::PatchPlacement {
                slot,
                patch_id,
                transformation,
                row,
                column,
            } => {
                let Some(&queued) = state.patches.get(slot as usize) else {
                    return invalid("purchase slot is empty");
                };
                if queued != patch_id {
                    return invalid("patch does not match the purchase slot");
                }
                let patch = PatchCatalog::patch(patch_id);
                if i32::from(patch.button_cost) > player.button_balance {
                    return invalid("not enough buttons");
                }
                let Some(shape) = patch.transformed(transformation) else {
                    return invalid("transformation duplicates another one");
                };
                if !board.is_valid_placement(shape, row, column) {
                    return invalid("patch does not fit at that position");
                }
                Ok(())
            }
        }
    }

    /// Rebuild the full action for `id` against `state`'s purchase queue.
    ///
    /// # Errors
    ///
    /// [`PatchworkError::InvalidAction`] if the id is not legal in `state`.
    pub fn action_from_id(&self, state: &GameState, id: ActionId) -> Result<Action> {
        let invalid = |reason| PatchworkError::InvalidAction { action: id, reason };

        let action = if id.is_walking() {
            Action::Walk
        } else if id.is_special_patch_placement() {
            let patch = state
                .pending_special_patch()
                .ok_or_else(|| invalid("no special patch is pending"))?;
            let (row, column) = id.position().ok_or_else(|| invalid("malformed id"))?;
            Action::SpecialPatchPlacement {
                patch_id: patch.id,
                row,
                column,
            }
        } else {
            let slot = id.patch_slot().ok_or_else(|| invalid("malformed id"))?;
            let (row, column) = id.position().ok_or_else(|| invalid("malformed id"))?;
            let transformation = id
                .transformation()
                .ok_or_else(|| invalid("malformed id"))?;
            let patch_id = *state
                .patches
                .get(slot as usize)
                .ok_or_else(|| invalid("purchase slot is empty"))?;
            Action::PatchPlacement {
                slot,
                patch_id,
                transformation,
                row,
                column,
            }
        };

        self.check_legal(state, &action)?;
        Ok(action)
    }

    /// Pass the turn iff the player who just moved is strictly ahead.
    fn pass_turn_if_ahead(state: &mut GameState) {
        let mover = state.current_player;
        if state.player(mover).position > state.player(mover.other()).position {
            state.current_player = mover.other();
        }
    }

    fn award_full_board_bonus(player: &mut PlayerState) {
        if player.quilt_board.is_full() {
            player.button_balance += Self::FULL_BOARD_BONUS;
        }
    }

    /// Move the current player `time_cost` cells, pay out crossed income
    /// triggers and resolve a crossed special patch.
    fn advance(state: &mut GameState, time_cost: u8) {
        let mover = state.current_player;
        let old = state.player(mover).position;
        let new = old.saturating_add(time_cost).min(TimeBoard::MAX_POSITION);
        let crossed = old as usize + 1..new as usize + 1;

        let triggers = state.time_board.button_income_triggers_in_range(crossed.clone());
        let special = state.time_board.special_patches_in_range(crossed).next();
        state.time_board.set_player_position(mover, old, new);

        let player = state.player_mut(mover);
        player.position = new;
        player.button_balance += triggers as i32 * player.quilt_board.button_income() as i32;
        let board_full = player.quilt_board.is_full();

        if let Some(cell) = special {
            state.time_board.clear_special_patch(cell);
            if board_full {
                trace!("{mover} discards the special patch at cell {cell}, quilt board is full");
                state.current_player = mover.other();
                return;
            } else {
                trace!("{mover} collects the special patch at cell {cell}");
                state.special_patch_placement = Some(cell);
                return;
            }
        }

        Self::pass_turn_if_ahead(state);
    }
}

impl RulesEngine for Patchwork {
    fn valid_actions(&self, state: &GameState) -> Vec<Action> {
        if state.is_terminated() {
            return Vec::new();
        }

        let player = state.current();
        let board = &player.quilt_board;

        if let Some(patch) = state.pending_special_patch() {
            return board.valid_actions_for_special_patch(patch);
        }

        let mut actions = vec![Action::Walk];
        for (slot, patch) in state.visible_patches() {
            if !is_affordable(patch, player.button_balance, board) {
                continue;
            }
            actions.extend(board.valid_actions_for_patch(patch, slot));
        }
        actions
    }

    fn apply(&self, state: &GameState, action: &Action) -> Result<GameState> {
        self.check_legal(state, action)?;

        let mut next = state.clone();
        let mover = next.current_player;

        let time_cost = match *action {
            Action::SpecialPatchPlacement {
                patch_id,
                row,
                column,
            } => {
                let patch = PatchCatalog::patch(patch_id);
                let player = next.player_mut(mover);
                player
                    .quilt_board
                    .add_patch(patch.shape(), patch.button_income, row, column);
                Self::award_full_board_bonus(player);
                next.special_patch_placement = None;
                next.current_player = mover.other();
                return Ok(next);
            }
            Action::Walk => {
                let own = i32::from(next.current().position);
                let other = i32::from(next.other().position);
                // a mover already ahead still walks one cell
                let time_cost = (other - own + 1).clamp(1, i32::from(u8::MAX));
                next.player_mut(mover).button_balance += time_cost;
                time_cost as u8
            }
            Action::PatchPlacement {
                slot,
                patch_id,
                transformation,
                row,
                column,
            } => {
                let patch = PatchCatalog::patch(patch_id);
                let shape = patch.transformed(transformation).ok_or(
                    PatchworkError::InvalidAction {
                        action: action.id(),
                        reason: "transformation duplicates another one",
                    },
                )?;

                let player = next.player_mut(mover);
                player
                    .quilt_board
                    .add_patch(shape, patch.button_income, row, column);
                player.button_balance -= i32::from(patch.button_cost);
                Self::award_full_board_bonus(player);

                // patches before the bought one move to the back
                let mut front = std::mem::take(&mut next.patches);
                let mut rest = front.split_off(slot as usize);
                rest.pop_front();
                rest.append(front);
                next.patches = rest;

                patch.time_cost
            }
        };

        Self::advance(&mut next, time_cost);
        Ok(next)
    }

    fn score(&self, state: &GameState, player: PlayerId) -> i32 {
        state.player(player).score()
    }

    fn termination(&self, state: &GameState) -> Termination {
        let player_1_score = self.score(state, PlayerId::PLAYER_1);
        let player_2_score = self.score(state, PlayerId::PLAYER_2);
        if state.is_terminated() {
            Termination::finished(player_1_score, player_2_score)
        } else {
            Termination::running(player_1_score, player_2_score)
        }
    }

    fn sample_random_action(&self, state: &GameState, rng: &mut GameRng) -> Action {
        let player = state.current();
        let board = &player.quilt_board;

        if let Some(patch) = state.pending_special_patch() {
            let mut cells: [u8; QuiltBoard::TILES as usize] = std::array::from_fn(|i| i as u8);
            rng.shuffle(&mut cells);
            return cells
                .into_iter()
                .map(|cell| (cell / QuiltBoard::COLUMNS, cell % QuiltBoard::COLUMNS))
                .find(|&(row, column)| !board.get(row, column))
                .map_or(Action::Walk, |(row, column)| Action::SpecialPatchPlacement {
                    patch_id: patch.id,
                    row,
                    column,
                });
        }

        let mut candidates: SmallVec<[(u8, &Patch); 3]> = state
            .visible_patches()
            .filter(|(_, patch)| is_affordable(patch, player.button_balance, board))
            .collect();
        if candidates.is_empty() {
            return Action::Walk;
        }
        rng.shuffle(&mut candidates);

        let attempts =
            (f64::from(Self::RANDOM_PLACEMENT_ATTEMPTS) * (1.0 - board.fill_fraction())) as usize;
        for attempt in 0..attempts {
            let (slot, patch) = candidates[attempt % candidates.len()];
            let Some(transformed) = rng.choose(patch.unique_transformations()) else {
                continue;
            };
            let shape = &transformed.shape;
            let row = rng.gen_range(0..=QuiltBoard::ROWS - shape.rows());
            let column = rng.gen_range(0..=QuiltBoard::COLUMNS - shape.columns());
            if board.is_valid_placement(shape, row, column) {
                return Action::PatchPlacement {
                    slot,
                    patch_id: patch.id,
                    transformation: transformed.transformation,
                    row,
                    column,
                };
            }
        }

        Action::Walk
    }
}

/// Cheap pre-filter: the player can pay for `patch` and has enough free
/// tiles for it.
fn is_affordable(patch: &Patch, button_balance: i32, board: &QuiltBoard) -> bool {
    i32::from(patch.button_cost) <= button_balance && patch.tile_count() <= board.tiles_free()
}
