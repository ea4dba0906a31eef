//! # Knotted Wood Packer
//!
//! Maintenance tooling for a connected-texture log resource pack.
//!
//! ## Overview
//!
//! Each log block has a directory of random side variants and a directory of
//! end-grain overlay tiles. Both are produced by slicing spritesheets exported
//! to a downloads directory. The packer keeps those tiles, the per-block
//! property files, and the shared `logs_*` overlay groups in sync.
//!
//! ## Quick Start
//!
//! ```ignore
//! use knotted_wood_packer::{Command, Packer, PackerConfig, WoodType};
//!
//! let config = PackerConfig::from_env(None, None)?;
//! let packer = Packer::new(config);
//!
//! packer.run(&Command::Register(WoodType::new("cherry")?))?;
//! packer.run(&Command::RefreshAll)?;
//! ```

pub mod config;
pub mod error;
pub mod packer;
pub mod resource_pack;
pub mod sprites;
pub mod types;

// Re-export main types for convenience
pub use config::PackerConfig;
pub use error::{PackerError, Result};
pub use packer::{BlockReport, Command, Packer, RunReport};
pub use resource_pack::{merge_match_blocks, ArchiveReport, DirProbe, OverlayUpdate};
pub use sprites::{ImageSpriteTools, SpriteCategory, SpriteTools, SyncOutcome, SyncReport, TilePlan};
pub use types::{Axis, Block, WoodType, WOOD_CATALOG};
