//! Tile synchronization between a staging directory and the live pack.

use super::tools::SpriteTools;
use super::TILE_SIZE;
use crate::config::PackerConfig;
use crate::error::{PackerError, Result};
use crate::resource_pack::probe::probe;
use crate::types::Block;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Downloads subdirectory holding the tile-0 sprite for each block.
pub const DEFAULTS_DIR: &str = "log-sprite-defaults";

/// Top tile the slicer produces that has no place in the overlay layout.
pub const EXCLUDED_TOP_TILE: u32 = 47;

/// The two tile sets every log block has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpriteCategory {
    /// Side textures; tile 0 is the block's default sprite.
    Variants,
    /// End-grain overlay textures.
    Tops,
}

impl SpriteCategory {
    pub const ALL: [SpriteCategory; 2] = [SpriteCategory::Variants, SpriteCategory::Tops];

    /// Downloads subdirectory the spritesheets are exported to.
    pub fn source_subdir(&self) -> &'static str {
        match self {
            SpriteCategory::Variants => "log-spritesheet-variants",
            SpriteCategory::Tops => "log-spritesheet-tops",
        }
    }

    /// Index of the first sliced tile.
    pub fn start_index(&self) -> u32 {
        match self {
            SpriteCategory::Variants => 1,
            SpriteCategory::Tops => 0,
        }
    }

    /// Live tile directory for a block.
    pub fn live_dir<'a>(&self, block: &'a Block) -> &'a Path {
        match self {
            SpriteCategory::Variants => &block.variants_dir,
            SpriteCategory::Tops => &block.tops_dir,
        }
    }

    /// Spritesheet path for a block.
    pub fn spritesheet(&self, config: &PackerConfig, block: &Block) -> PathBuf {
        config
            .download(self.source_subdir())
            .join(block.sprite_file_name())
    }
}

impl std::fmt::Display for SpriteCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpriteCategory::Variants => write!(f, "variants"),
            SpriteCategory::Tops => write!(f, "tops"),
        }
    }
}

/// Changes needed to bring a live tile directory in line with a staged one.
///
/// File names are sorted within each list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TilePlan {
    /// Staged tiles missing from the live directory.
    pub add: Vec<String>,
    /// Tiles present in both whose pixels differ.
    pub replace: Vec<String>,
    /// Live tiles that are no longer staged.
    pub remove: Vec<String>,
    /// Tiles present in both with identical pixels.
    pub keep: Vec<String>,
}

impl TilePlan {
    /// Compare every staged file with the live `*.png` files.
    pub fn compute(tools: &dyn SpriteTools, staging: &Path, live: &Path) -> Result<Self> {
        let desired: BTreeSet<String> = probe(staging)?.contents.into_iter().collect();
        let current: BTreeSet<String> = probe(live)?
            .with_extension("png")
            .map(String::from)
            .collect();

        let mut plan = TilePlan {
            remove: current.difference(&desired).cloned().collect(),
            ..Default::default()
        };

        for name in &desired {
            if !current.contains(name) {
                plan.add.push(name.clone());
            } else if tools.images_equal(&staging.join(name), &live.join(name))? {
                plan.keep.push(name.clone());
            } else {
                plan.replace.push(name.clone());
            }
        }

        Ok(plan)
    }

    /// Delete stale tiles, then copy added and changed ones.
    ///
    /// Every step is idempotent, so an interrupted apply is repaired by
    /// running the sync again.
    pub fn apply(&self, staging: &Path, live: &Path) -> Result<()> {
        std::fs::create_dir_all(live)?;

        for name in &self.remove {
            std::fs::remove_file(live.join(name))?;
        }
        for name in self.add.iter().chain(&self.replace) {
            std::fs::copy(staging.join(name), live.join(name))?;
        }
        Ok(())
    }

    /// Whether applying the plan would change anything.
    pub fn is_noop(&self) -> bool {
        self.add.is_empty() && self.replace.is_empty() && self.remove.is_empty()
    }
}

/// Result of a completed sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub category: SpriteCategory,
    #[serde(flatten)]
    pub plan: TilePlan,
    /// Files the optimizer shrank.
    pub optimized: usize,
}

/// Outcome of syncing one category for one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SyncOutcome {
    /// No spritesheet was exported for the block; nothing was touched.
    MissingSpritesheet { category: SpriteCategory },
    Synced(SyncReport),
}

/// Slice the latest spritesheet for a block and merge the tiles into the pack.
///
/// Live tiles are only written when they are new or their pixels changed,
/// and tiles the new sheet no longer produces are deleted.
pub fn sync_sprites(
    config: &PackerConfig,
    tools: &dyn SpriteTools,
    block: &Block,
    category: SpriteCategory,
) -> Result<SyncOutcome> {
    let sheet = category.spritesheet(config, block);
    if !sheet.is_file() {
        log::warn!("Spritesheet ({}) for '{}' not found", category, block.name);
        return Ok(SyncOutcome::MissingSpritesheet { category });
    }

    let default_sprite = match category {
        SpriteCategory::Variants => {
            let path = config.download(DEFAULTS_DIR).join(block.sprite_file_name());
            if !path.is_file() {
                return Err(PackerError::ResourceNotFound(format!(
                    "default sprite {}",
                    path.display()
                )));
            }
            Some(path)
        }
        SpriteCategory::Tops => None,
    };

    std::fs::create_dir_all(&config.scratch_dir)?;
    let staging = tempfile::Builder::new()
        .prefix(&format!("{}-{}-", block.name, category))
        .tempdir_in(&config.scratch_dir)?;

    let sliced = tools.slice(&sheet, TILE_SIZE, category.start_index(), staging.path())?;
    log::debug!("Sliced {} {} tiles for {}", sliced.len(), category, block.name);

    if let Some(default_sprite) = default_sprite {
        std::fs::copy(&default_sprite, staging.path().join("0.png"))?;
    }
    if category == SpriteCategory::Tops {
        let excluded = staging.path().join(format!("{}.png", EXCLUDED_TOP_TILE));
        if excluded.exists() {
            std::fs::remove_file(excluded)?;
        }
    }

    let live = category.live_dir(block);
    let plan = TilePlan::compute(tools, staging.path(), live)?;
    plan.apply(staging.path(), live)?;

    let optimized = tools.optimize_dir(live)?;
    staging.close()?;

    log::info!(
        "{} {}: {} added, {} replaced, {} removed, {} unchanged",
        block.name,
        category,
        plan.add.len(),
        plan.replace.len(),
        plan.remove.len(),
        plan.keep.len()
    );

    Ok(SyncOutcome::Synced(SyncReport {
        category,
        plan,
        optimized,
    }))
}
