//! Action representation and the dense action-id codec.
//!
//! Every action maps to a unique id in `0..2026`:
//!
//! | ids          | action                                              |
//! |--------------|-----------------------------------------------------|
//! | `0`          | walk                                                |
//! | `1..=81`     | special patch at `row * 9 + column + 1`             |
//! | `82..=2025`  | `((((slot*9 + row)*9 + column)*4 + rot)*2 + orient) + 82` |
//!
//! Most patch-placement ids are never legal for a given shape; the range is
//! sized for the full `slot × row × column × rotation × orientation` product.
//! Equality and hashing of an [`Action`] go through its id.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use super::state::GameState;
use crate::board::QuiltBoard;
use crate::patch::{Orientation, Rotation, Transformation};

/// A move in the game.
#[derive(Clone, Copy, Debug)]
pub enum Action {
    /// Advance to just ahead of the opponent (one cell if already ahead),
    /// earning a button per cell.
    Walk,
    /// Place the pending special patch.
    SpecialPatchPlacement { patch_id: u8, row: u8, column: u8 },
    /// Buy the patch in purchase slot `slot` and place it.
    PatchPlacement {
        slot: u8,
        patch_id: u8,
        transformation: Transformation,
        row: u8,
        column: u8,
    },
}

impl Action {
    /// Encode this action.
    ///
    /// Only meaningful when [`Action::out_of_range`] is `None`; other
    /// actions get an arbitrary id instead of overflowing.
    #[must_use]
    pub fn id(&self) -> ActionId {
        let columns = u16::from(QuiltBoard::COLUMNS);
        let rows = u16::from(QuiltBoard::ROWS);
        match *self {
            Action::Walk => ActionId::WALKING,
            Action::SpecialPatchPlacement { row, column, .. } => ActionId(
                u16::from(row)
                    .wrapping_mul(columns)
                    .wrapping_add(u16::from(column))
                    .wrapping_add(ActionId::FIRST_SPECIAL_PATCH_PLACEMENT),
            ),
            Action::PatchPlacement {
                slot,
                transformation,
                row,
                column,
                ..
            } => {
                let mut id = u16::from(slot);
                id = id.wrapping_mul(rows).wrapping_add(u16::from(row));
                id = id.wrapping_mul(columns).wrapping_add(u16::from(column));
                id = id.wrapping_mul(4) + u16::from(transformation.rotation.quarter_turns());
                id = id.wrapping_mul(2) + transformation.orientation as u16;
                ActionId(id.wrapping_add(ActionId::FIRST_PATCH_PLACEMENT))
            }
        }
    }

    /// Why this action cannot be encoded, if one of its fields lies outside
    /// the board or the purchase slots.
    #[must_use]
    pub fn out_of_range(&self) -> Option<&'static str> {
        match *self {
            Action::Walk => None,
            Action::PatchPlacement { slot, .. }
                if usize::from(slot) >= GameState::VISIBLE_PATCHES =>
            {
                Some("purchase slot out of range")
            }
            Action::SpecialPatchPlacement { row, column, .. }
            | Action::PatchPlacement { row, column, .. } => (row >= QuiltBoard::ROWS
                || column >= QuiltBoard::COLUMNS)
                .then_some("position outside the quilt board"),
        }
    }

    #[must_use]
    pub fn is_walking(&self) -> bool {
        matches!(self, Action::Walk)
    }

    #[must_use]
    pub fn is_special_patch_placement(&self) -> bool {
        matches!(self, Action::SpecialPatchPlacement { .. })
    }

    #[must_use]
    pub fn is_patch_placement(&self) -> bool {
        matches!(self, Action::PatchPlacement { .. })
    }

    /// Board offset for either kind of placement.
    #[must_use]
    pub fn position(&self) -> Option<(u8, u8)> {
        match *self {
            Action::Walk => None,
            Action::SpecialPatchPlacement { row, column, .. }
            | Action::PatchPlacement { row, column, .. } => Some((row, column)),
        }
    }

    /// The catalog id of the patch being placed.
    #[must_use]
    pub fn patch_id(&self) -> Option<u8> {
        match *self {
            Action::Walk => None,
            Action::SpecialPatchPlacement { patch_id, .. }
            | Action::PatchPlacement { patch_id, .. } => Some(patch_id),
        }
    }
}

impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Action {}

impl Hash for Action {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Action::Walk => write!(f, "Walking"),
            Action::SpecialPatchPlacement {
                patch_id,
                row,
                column,
            } => write!(f, "Special patch {patch_id} at ({row}, {column})"),
            Action::PatchPlacement {
                slot,
                patch_id,
                transformation,
                row,
                column,
            } => write!(
                f,
                "Patch {patch_id} from slot {} at ({row}, {column}), {transformation}",
                slot + 1
            ),
        }
    }
}

/// Compact action identifier in `0..2026`.
///
/// Ids classify an action without the state it was generated from; turning
/// one back into a full [`Action`] needs the state's purchase queue (see
/// `Patchwork::action_from_id`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActionId(u16);

impl ActionId {
    pub const WALKING: ActionId = ActionId(0);
    /// Total number of ids.
    pub const AMOUNT: u16 = 2026;

    const FIRST_SPECIAL_PATCH_PLACEMENT: u16 = 1;
    const FIRST_PATCH_PLACEMENT: u16 = 82;
    /// Ids per purchase slot: 9 rows × 9 columns × 4 rotations × 2 orientations.
    const PER_SLOT: u16 = 648;

    /// Wrap a raw id, rejecting anything outside `0..2026`.
    ///
    /// ```
    /// use patchwork::core::ActionId;
    ///
    /// assert!(ActionId::from_raw(2025).is_some());
    /// assert!(ActionId::from_raw(2026).is_none());
    /// ```
    #[must_use]
    pub const fn from_raw(id: u16) -> Option<Self> {
        if id < Self::AMOUNT {
            Some(ActionId(id))
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn is_walking(self) -> bool {
        self.0 == 0
    }

    #[inline]
    #[must_use]
    pub const fn is_special_patch_placement(self) -> bool {
        self.0 >= Self::FIRST_SPECIAL_PATCH_PLACEMENT && self.0 < Self::FIRST_PATCH_PLACEMENT
    }

    #[inline]
    #[must_use]
    pub const fn is_patch_placement(self) -> bool {
        self.0 >= Self::FIRST_PATCH_PLACEMENT && self.0 < Self::AMOUNT
    }

    #[must_use]
    pub const fn is_first_patch_taken(self) -> bool {
        self.is_slot(0)
    }

    #[must_use]
    pub const fn is_second_patch_taken(self) -> bool {
        self.is_slot(1)
    }

    #[must_use]
    pub const fn is_third_patch_taken(self) -> bool {
        self.is_slot(2)
    }

    const fn is_slot(self, slot: u16) -> bool {
        let start = Self::FIRST_PATCH_PLACEMENT + slot * Self::PER_SLOT;
        self.0 >= start && self.0 < start + Self::PER_SLOT
    }

    /// Purchase slot of a patch placement.
    #[must_use]
    pub fn patch_slot(self) -> Option<u8> {
        self.is_patch_placement()
            .then(|| ((self.0 - Self::FIRST_PATCH_PLACEMENT) / Self::PER_SLOT) as u8)
    }

    /// Board offset of either kind of placement.
    #[must_use]
    pub fn position(self) -> Option<(u8, u8)> {
        let columns = u16::from(QuiltBoard::COLUMNS);
        let rows = u16::from(QuiltBoard::ROWS);
        if self.is_special_patch_placement() {
            let index = self.0 - Self::FIRST_SPECIAL_PATCH_PLACEMENT;
            Some(((index / columns) as u8, (index % columns) as u8))
        } else if self.is_patch_placement() {
            let cell = (self.0 - Self::FIRST_PATCH_PLACEMENT) / 8;
            Some((((cell / columns) % rows) as u8, (cell % columns) as u8))
        } else {
            None
        }
    }

    /// Rotation and orientation of a patch placement.
    #[must_use]
    pub fn transformation(self) -> Option<Transformation> {
        self.is_patch_placement().then(|| {
            let raw = self.0 - Self::FIRST_PATCH_PLACEMENT;
            let orientation = if raw % 2 == 0 {
                Orientation::Normal
            } else {
                Orientation::Flipped
            };
            let rotation = Rotation::from_quarter_turns(((raw / 2) % 4) as u8);
            Transformation::new(rotation, orientation)
        })
    }
}

impl From<Action> for ActionId {
    fn from(action: Action) -> Self {
        action.id()
    }
}

impl From<&Action> for ActionId {
    fn from(action: &Action) -> Self {
        action.id()
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_walking() {
            return write!(f, "{} (walking)", self.0);
        }
        match (self.patch_slot(), self.position(), self.transformation()) {
            (Some(slot), Some((row, column)), Some(transformation)) => write!(
                f,
                "{} (slot {} at ({row}, {column}), {transformation})",
                self.0,
                slot + 1
            ),
            (None, Some((row, column)), _) => {
                write!(f, "{} (special patch at ({row}, {column}))", self.0)
            }
            _ => write!(f, "{} (invalid)", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placement(slot: u8, transformation: Transformation, row: u8, column: u8) -> Action {
        Action::PatchPlacement {
            slot,
            patch_id: 1,
            transformation,
            row,
            column,
        }
    }

    #[test]
    fn test_walking_id() {
        assert_eq!(Action::Walk.id(), ActionId::WALKING);
        assert!(ActionId::WALKING.is_walking());
        assert!(!ActionId::WALKING.is_patch_placement());
        assert_eq!(ActionId::WALKING.to_string(), "0 (walking)");
    }

    #[test]
    fn test_special_patch_ids() {
        let first = Action::SpecialPatchPlacement {
            patch_id: 33,
            row: 0,
            column: 0,
        };
        let last = Action::SpecialPatchPlacement {
            patch_id: 33,
            row: 8,
            column: 8,
        };
        assert_eq!(first.id().as_u16(), 1);
        assert_eq!(last.id().as_u16(), 81);
        assert!(last.id().is_special_patch_placement());
        assert_eq!(last.id().position(), Some((8, 8)));
        assert_eq!(last.id().patch_slot(), None);
    }

    #[test]
    fn test_patch_placement_id_bounds() {
        let first = placement(0, Transformation::IDENTITY, 0, 0);
        assert_eq!(first.id().as_u16(), 82);

        let last = placement(
            2,
            Transformation::new(Rotation::TwoSeventy, Orientation::Flipped),
            8,
            8,
        );
        assert_eq!(last.id().as_u16(), 2025);
    }

    #[test]
    fn test_slot_ranges() {
        let slot_start = |slot| placement(slot, Transformation::IDENTITY, 0, 0).id();
        assert_eq!(slot_start(1).as_u16(), 730);
        assert_eq!(slot_start(2).as_u16(), 1378);

        assert!(ActionId::from_raw(729).is_some_and(ActionId::is_first_patch_taken));
        assert!(ActionId::from_raw(730).is_some_and(ActionId::is_second_patch_taken));
        assert!(ActionId::from_raw(1377).is_some_and(ActionId::is_second_patch_taken));
        assert!(ActionId::from_raw(1378).is_some_and(ActionId::is_third_patch_taken));
    }

    #[test]
    fn test_decode_patch_placement() {
        let transformation = Transformation::new(Rotation::OneEighty, Orientation::Flipped);
        let id = placement(1, transformation, 4, 7).id();
        assert_eq!(id.patch_slot(), Some(1));
        assert_eq!(id.position(), Some((4, 7)));
        assert_eq!(id.transformation(), Some(transformation));
    }

    #[test]
    fn test_equality_by_id() {
        let a = placement(0, Transformation::IDENTITY, 1, 1);
        let b = Action::PatchPlacement {
            slot: 0,
            patch_id: 17,
            transformation: Transformation::IDENTITY,
            row: 1,
            column: 1,
        };
        assert_eq!(a, b);
        assert_ne!(a, Action::Walk);
    }

    #[test]
    fn test_display() {
        let action = placement(0, Transformation::IDENTITY, 2, 3);
        assert_eq!(action.to_string(), "Patch 1 from slot 1 at (2, 3), 0° normal");
        assert_eq!(
            action.id().to_string(),
            format!("{} (slot 1 at (2, 3), 0° normal)", action.id().as_u16())
        );
    }

    #[test]
    fn test_out_of_range_fields() {
        assert_eq!(Action::Walk.out_of_range(), None);
        assert_eq!(placement(2, Transformation::IDENTITY, 8, 8).out_of_range(), None);
        assert!(placement(3, Transformation::IDENTITY, 0, 0).out_of_range().is_some());
        assert!(placement(200, Transformation::IDENTITY, 0, 0).out_of_range().is_some());
        assert!(placement(0, Transformation::IDENTITY, 255, 0).out_of_range().is_some());
        assert!(placement(0, Transformation::IDENTITY, 0, 9).out_of_range().is_some());

        let special = Action::SpecialPatchPlacement {
            patch_id: 33,
            row: 200,
            column: 0,
        };
        assert!(special.out_of_range().is_some());
    }

    #[test]
    fn test_malformed_actions_encode_without_overflow() {
        let huge = placement(255, Transformation::IDENTITY, 255, 255);
        let copy = huge;
        assert!(huge.out_of_range().is_some());
        assert_eq!(huge.id(), copy.id());
        assert_ne!(huge, Action::Walk);
    }
}
