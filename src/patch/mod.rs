//! Patch catalog: tile shapes, costs and their unique symmetries.

mod catalog;
mod shape;

pub use catalog::{Patch, PatchCatalog, TransformedShape};
pub use shape::{Orientation, Rotation, Shape, Transformation};
