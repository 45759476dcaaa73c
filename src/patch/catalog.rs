//! The static patch table.
//!
//! Ids `1..=32` are the regular patches, id `0` is the starting patch that
//! sits at the end of the draw pile, and ids `33..=37` are the special 1×1
//! patches handed out by the time board.

use smallvec::SmallVec;
use std::fmt;
use std::sync::OnceLock;

use super::shape::{Shape, Transformation};

/// A shape together with the transformation that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TransformedShape {
    pub transformation: Transformation,
    pub shape: Shape,
}

/// An immutable catalog patch.
///
/// Two patches with the same id are the same patch for ownership and
/// pricing; the individual placements are described by
/// [`TransformedShape`]s.
#[derive(Clone, Debug)]
pub struct Patch {
    pub id: u8,
    pub button_cost: u8,
    pub time_cost: u8,
    pub button_income: u8,
    shape: Shape,
    transformations: SmallVec<[TransformedShape; 8]>,
}

impl PartialEq for Patch {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Patch {}

impl Patch {
    fn new(id: u8, rows: &[&str], button_cost: u8, time_cost: u8, button_income: u8) -> Self {
        let shape = Shape::from_rows(rows);
        Self {
            id,
            button_cost,
            time_cost,
            button_income,
            shape,
            transformations: unique_transformations(&shape),
        }
    }

    /// The untransformed shape.
    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[must_use]
    pub fn tile_count(&self) -> u32 {
        self.shape.tile_count()
    }

    /// Distinct rotations/reflections, identity first.
    #[must_use]
    pub fn unique_transformations(&self) -> &[TransformedShape] {
        &self.transformations
    }

    /// The shape for a transformation, if it is one of the unique ones.
    ///
    /// Transformations that duplicate an earlier one are not part of the
    /// action space and return `None`.
    #[must_use]
    pub fn transformed(&self, transformation: Transformation) -> Option<&Shape> {
        self.transformations
            .iter()
            .find(|t| t.transformation == transformation)
            .map(|t| &t.shape)
    }

    #[must_use]
    pub fn is_starting_patch(&self) -> bool {
        self.id == PatchCatalog::STARTING_PATCH_ID
    }

    #[must_use]
    pub fn is_special(&self) -> bool {
        self.id >= PatchCatalog::FIRST_SPECIAL_PATCH_ID
    }
}

impl fmt::Display for Patch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.shape)?;
        writeln!(f, "Income: {}", self.button_income)?;
        writeln!(f, "Button cost: {}", self.button_cost)?;
        write!(f, "Time cost: {}", self.time_cost)
    }
}

/// Collect the distinct transformed shapes, keeping the first transformation
/// (normal orientation first, then ascending rotation) that yields each.
fn unique_transformations(shape: &Shape) -> SmallVec<[TransformedShape; 8]> {
    let mut unique: SmallVec<[TransformedShape; 8]> = SmallVec::new();
    for transformation in Transformation::ALL {
        let transformed = shape.transformed(transformation);
        if unique.iter().all(|t| t.shape != transformed) {
            unique.push(TransformedShape {
                transformation,
                shape: transformed,
            });
        }
    }
    unique
}

/// (id, tiles, button cost, time cost, button income)
#[rustfmt::skip]
const REGULAR_PATCHES: [(u8, &[&str], u8, u8, u8); 32] = [
    (1,  &["X..", "XX.", ".XX"],                 10, 4, 3),
    (2,  &[".XXX.", "XXXXX", ".XXX."],           5,  3, 1),
    (3,  &[".XX", ".XX", "XX."],                 8,  6, 3),
    (4,  &[".XX", "XX."],                        7,  6, 3),
    (5,  &["X.", "XX", "XX", ".X"],              4,  2, 0),
    (6,  &[".X.", ".XX", "XX.", ".X."],          2,  1, 0),
    (7,  &["X.X", "XXX", "X.X"],                 2,  3, 0),
    (8,  &["X.", "XX", "XX"],                    2,  2, 0),
    (9,  &["XX", "XX"],                          6,  5, 2),
    (10, &[".X", ".X", "XX", "X."],              2,  3, 1),
    (11, &["...X", "XXXX", "X..."],              1,  2, 0),
    (12, &["XX", "XX", ".X", ".X"],              10, 5, 3),
    (13, &[".X.", ".X.", ".X.", "XXX"],          7,  2, 2),
    (14, &[".X", ".X", "XX"],                    4,  6, 2),
    (15, &[".XX.", "XXXX"],                      7,  4, 2),
    (16, &["XX", ".X", ".X", "XX"],              1,  5, 1),
    (17, &[".X.", "XXX", ".X."],                 5,  4, 2),
    (18, &["X...", "XXXX"],                      10, 3, 2),
    (19, &["..X", "XXX"],                        4,  2, 1),
    (20, &["..X..", "XXXXX", "..X.."],           1,  4, 1),
    (21, &[".X", "XX"],                          1,  3, 0),
    (22, &["X.X", "XXX"],                        1,  2, 0),
    (23, &[".X", "XX"],                          3,  1, 0),
    (24, &[".X", "XX", ".X"],                    2,  2, 0),
    (25, &["XXX"],                               2,  2, 0),
    (26, &[".X", "XX", "X."],                    3,  2, 1),
    (27, &["XXXXX"],                             7,  1, 1),
    (28, &["XXXX"],                              3,  3, 1),
    (29, &[".X.", ".X.", "XXX"],                 5,  5, 2),
    (30, &[".X.", "XXX", "X.X"],                 3,  6, 2),
    (31, &["..X.", "XXXX"],                      3,  4, 1),
    (32, &[".X..", "XXXX", ".X.."],              0,  3, 1),
];

/// Lookup into the static patch table.
pub struct PatchCatalog;

impl PatchCatalog {
    /// Id of the 1×2 starting patch.
    pub const STARTING_PATCH_ID: u8 = 0;
    /// Number of regular patches, excluding the starting patch.
    pub const AMOUNT_OF_REGULAR_PATCHES: usize = 32;
    /// Id of the first special patch.
    pub const FIRST_SPECIAL_PATCH_ID: u8 = 33;
    /// Number of special patches on the time board.
    pub const AMOUNT_OF_SPECIAL_PATCHES: usize = 5;

    fn table() -> &'static [Patch] {
        static TABLE: OnceLock<Vec<Patch>> = OnceLock::new();
        TABLE.get_or_init(|| {
            let mut table = Vec::with_capacity(
                1 + Self::AMOUNT_OF_REGULAR_PATCHES + Self::AMOUNT_OF_SPECIAL_PATCHES,
            );
            table.push(Patch::new(Self::STARTING_PATCH_ID, &["XX"], 2, 1, 0));
            for (id, rows, button_cost, time_cost, button_income) in REGULAR_PATCHES {
                table.push(Patch::new(id, rows, button_cost, time_cost, button_income));
            }
            for ordinal in 0..Self::AMOUNT_OF_SPECIAL_PATCHES as u8 {
                table.push(Patch::new(Self::FIRST_SPECIAL_PATCH_ID + ordinal, &["X"], 0, 0, 0));
            }
            table
        })
    }

    /// Look up a patch by id (starting, regular or special).
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a catalog id; ids only originate from the
    /// catalog itself.
    #[must_use]
    pub fn patch(id: u8) -> &'static Patch {
        &Self::table()[id as usize]
    }

    /// The regular patches in catalog order.
    #[must_use]
    pub fn regular_patches() -> &'static [Patch] {
        &Self::table()[1..=Self::AMOUNT_OF_REGULAR_PATCHES]
    }

    #[must_use]
    pub fn starting_patch() -> &'static Patch {
        Self::patch(Self::STARTING_PATCH_ID)
    }

    /// The special patch with the given ordinal (`0..5`).
    #[must_use]
    pub fn special_patch(ordinal: usize) -> &'static Patch {
        debug_assert!(ordinal < Self::AMOUNT_OF_SPECIAL_PATCHES);
        Self::patch(Self::FIRST_SPECIAL_PATCH_ID + ordinal as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::{Orientation, Rotation};

    #[test]
    fn test_catalog_ids_match_positions() {
        for id in 0..38u8 {
            assert_eq!(PatchCatalog::patch(id).id, id);
        }
        assert_eq!(PatchCatalog::regular_patches().len(), 32);
        assert!(PatchCatalog::starting_patch().is_starting_patch());
        assert!(PatchCatalog::special_patch(4).is_special());
        assert!(!PatchCatalog::patch(32).is_special());
    }

    #[test]
    fn test_shapes_fit_in_five_by_five() {
        for id in 0..38u8 {
            let patch = PatchCatalog::patch(id);
            assert!(patch.shape().rows() <= 5 && patch.shape().columns() <= 5);
            assert!(patch.tile_count() >= 1);
        }
    }

    #[test]
    fn test_unique_transformation_counts() {
        // 2x2 square: fully symmetric
        assert_eq!(PatchCatalog::patch(9).unique_transformations().len(), 1);
        // plus sign
        assert_eq!(PatchCatalog::patch(17).unique_transformations().len(), 1);
        // straight line of 4
        assert_eq!(PatchCatalog::patch(28).unique_transformations().len(), 2);
        // L-tromino: rotations only, flips coincide
        assert_eq!(PatchCatalog::patch(21).unique_transformations().len(), 4);
        // L-tetromino: chiral
        assert_eq!(PatchCatalog::patch(19).unique_transformations().len(), 8);
        // special patch
        assert_eq!(PatchCatalog::special_patch(0).unique_transformations().len(), 1);
    }

    #[test]
    fn test_identity_is_first_transformation() {
        for id in 0..38u8 {
            let patch = PatchCatalog::patch(id);
            let first = patch.unique_transformations()[0];
            assert_eq!(first.transformation, Transformation::IDENTITY);
            assert_eq!(&first.shape, patch.shape());
        }
    }

    #[test]
    fn test_transformed_rejects_duplicates() {
        let square = PatchCatalog::patch(9);
        assert!(square.transformed(Transformation::IDENTITY).is_some());
        assert!(square
            .transformed(Transformation::new(Rotation::Ninety, Orientation::Normal))
            .is_none());
    }

    #[test]
    fn test_unique_transformations_are_distinct() {
        for id in 0..38u8 {
            let transformations = PatchCatalog::patch(id).unique_transformations();
            for (i, a) in transformations.iter().enumerate() {
                for b in &transformations[i + 1..] {
                    assert_ne!(a.shape, b.shape, "patch {id} has duplicate transforms");
                }
            }
        }
    }

    #[test]
    fn test_costs() {
        let patch = PatchCatalog::patch(1);
        assert_eq!(patch.button_cost, 10);
        assert_eq!(patch.time_cost, 4);
        assert_eq!(patch.button_income, 3);

        let start = PatchCatalog::starting_patch();
        assert_eq!((start.button_cost, start.time_cost, start.button_income), (2, 1, 0));
    }
}
