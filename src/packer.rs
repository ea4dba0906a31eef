//! Command dispatch.
//!
//! A [`Packer`] runs one command at a time against a [`PackerConfig`]. Each
//! block goes through the same staged pipeline: property files, overlay groups,
//! then sprites. Bulk refreshes run blocks strictly one after another because
//! every block writes to the shared overlay files.

use crate::config::PackerConfig;
use crate::error::{PackerError, Result};
use crate::resource_pack::{
    check_templates, instantiate_properties, package, probe, update_overlays, ArchiveReport,
    OverlayUpdate,
};
use crate::sprites::{sync_sprites, ImageSpriteTools, SpriteCategory, SpriteTools, SyncOutcome};
use crate::types::{Block, WoodType, WOOD_CATALOG};
use serde::Serialize;

/// A packer command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a block's directories (if needed) and populate them.
    Register(WoodType),
    /// Regenerate an already registered block.
    Refresh(WoodType),
    /// Refresh every block in [`WOOD_CATALOG`].
    RefreshAll,
    /// Zip the pack.
    Repackage,
}

/// What a block pipeline did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockReport {
    pub block: String,
    /// Whether either block directory existed before the command ran.
    pub existed: bool,
    pub overlays: Vec<OverlayUpdate>,
    pub sprites: Vec<SyncOutcome>,
}

/// Result of running a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "kebab-case")]
pub enum RunReport {
    Register(BlockReport),
    Refresh(BlockReport),
    RefreshAll { blocks: Vec<BlockReport> },
    Repackage(ArchiveReport),
}

/// Runs packer commands.
pub struct Packer {
    config: PackerConfig,
    tools: Box<dyn SpriteTools>,
}

impl Packer {
    /// Create a packer using the `image`-backed sprite tools.
    pub fn new(config: PackerConfig) -> Self {
        Self::with_tools(config, Box::new(ImageSpriteTools))
    }

    /// Create a packer with custom sprite tools.
    pub fn with_tools(config: PackerConfig, tools: Box<dyn SpriteTools>) -> Self {
        Self { config, tools }
    }

    pub fn config(&self) -> &PackerConfig {
        &self.config
    }

    /// Run a command.
    pub fn run(&self, command: &Command) -> Result<RunReport> {
        match command {
            Command::Register(wood) => self.register(wood).map(RunReport::Register),
            Command::Refresh(wood) => self.refresh(wood).map(RunReport::Refresh),
            Command::RefreshAll => self
                .refresh_all()
                .map(|blocks| RunReport::RefreshAll { blocks }),
            Command::Repackage => package(&self.config).map(RunReport::Repackage),
        }
    }

    /// Register a block, creating its directories.
    ///
    /// An existing block is regenerated in place after a warning.
    pub fn register(&self, wood: &WoodType) -> Result<BlockReport> {
        check_templates(&self.config)?;

        let block = wood.block(&self.config);
        let variants = probe(&block.variants_dir)?;
        let tops = probe(&block.tops_dir)?;

        let existed = variants.exists || tops.exists;
        if existed {
            log::warn!("Wood type '{}' already exists", wood);
        }
        if !variants.exists {
            std::fs::create_dir_all(&block.variants_dir)?;
        }
        if !tops.exists {
            std::fs::create_dir_all(&block.tops_dir)?;
        }

        self.update_block(block, existed)
    }

    /// Regenerate a registered block.
    pub fn refresh(&self, wood: &WoodType) -> Result<BlockReport> {
        let block = wood.block(&self.config);
        let variants = probe(&block.variants_dir)?;
        let tops = probe(&block.tops_dir)?;

        if !variants.exists || !tops.exists {
            return Err(PackerError::UnknownWoodType(wood.to_string()));
        }
        check_templates(&self.config)?;

        self.update_block(block, true)
    }

    /// Refresh every catalogued wood type in order.
    ///
    /// A failing block does not stop the run; the failures are collected and
    /// returned as [`PackerError::Batch`] once every block has been tried.
    pub fn refresh_all(&self) -> Result<Vec<BlockReport>> {
        let mut blocks = Vec::new();
        let mut failed = Vec::new();

        for id in WOOD_CATALOG {
            let result = WoodType::new(*id).and_then(|wood| self.refresh(&wood));
            match result {
                Ok(report) => blocks.push(report),
                Err(e) => {
                    log::error!("{}: {}", id, e);
                    failed.push(id.to_string());
                }
            }
        }

        if failed.is_empty() {
            Ok(blocks)
        } else {
            Err(PackerError::Batch(failed))
        }
    }

    fn update_block(&self, block: Block, existed: bool) -> Result<BlockReport> {
        log::info!("Updating {}", block.name);

        instantiate_properties(&self.config, &block)?;
        let overlays = update_overlays(&self.config, &block)?;

        let mut sprites = Vec::with_capacity(SpriteCategory::ALL.len());
        for category in SpriteCategory::ALL {
            sprites.push(sync_sprites(
                &self.config,
                self.tools.as_ref(),
                &block,
                category,
            )?);
        }

        Ok(BlockReport {
            block: block.name,
            existed,
            overlays,
            sprites,
        })
    }
}
