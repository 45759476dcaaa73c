//! Boards: each player's quilt and the shared time track.

mod quilt;
mod time;

pub use quilt::{Placement, QuiltBoard};
pub use time::{CellFlags, TimeBoard};
