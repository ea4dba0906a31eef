//! Spritesheet slicing and tile synchronization.
//!
//! Spritesheets exported to the downloads directory are cut into numbered
//! 16x16 tiles in a scratch directory, then merged into the pack so that only
//! tiles whose pixels changed are rewritten.

pub mod sync;
pub mod tools;

pub use sync::{sync_sprites, SpriteCategory, SyncOutcome, SyncReport, TilePlan};
pub use tools::{ImageSpriteTools, SpriteTools};

/// Edge length of a tile in pixels.
pub const TILE_SIZE: u32 = 16;
