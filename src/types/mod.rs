//! Shared types used throughout the library.

mod axis;
mod block;

pub use axis::Axis;
pub use block::{Block, WoodType, WOOD_CATALOG};
