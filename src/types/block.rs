//! Wood types and the paths derived from them.

use crate::config::PackerConfig;
use crate::error::{PackerError, Result};
use std::path::PathBuf;

/// Every wood type shipped by the pack, in refresh order.
pub const WOOD_CATALOG: &[&str] = &[
    "acacia",
    "birch",
    "cherry",
    "dark_oak",
    "jungle",
    "mangrove",
    "oak",
    "spruce",
    "stripped_acacia",
    "stripped_birch",
    "stripped_cherry",
    "stripped_dark_oak",
    "stripped_jungle",
    "stripped_mangrove",
    "stripped_oak",
    "stripped_spruce",
];

/// A validated wood type identifier, e.g. "oak" or "stripped_birch".
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WoodType(String);

impl WoodType {
    /// Validate a wood type identifier.
    ///
    /// Only lowercase ASCII letters, digits and underscores are accepted, since the
    /// identifier ends up in directory names and `matchBlocks` tokens.
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
        if valid {
            Ok(Self(id))
        } else {
            Err(PackerError::InvalidWoodType(id))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derive the block for this wood type.
    pub fn block(&self, config: &PackerConfig) -> Block {
        Block::new(self, config)
    }
}

impl std::fmt::Display for WoodType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A log block and the pack directories that belong to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Block name, e.g. "oak_log".
    pub name: String,
    /// Directory holding the variant tiles and `<name>.properties`.
    pub variants_dir: PathBuf,
    /// Directory holding the top tiles and `ctm.properties`.
    pub tops_dir: PathBuf,
}

impl Block {
    pub fn new(wood: &WoodType, config: &PackerConfig) -> Self {
        let name = format!("{}_log", wood);
        Self {
            variants_dir: config.ctm_dir().join(&name),
            tops_dir: config.overlays_dir().join(format!("{}_top", name)),
            name,
        }
    }

    /// Property file describing the variant tiles.
    pub fn variants_properties(&self) -> PathBuf {
        self.variants_dir.join(format!("{}.properties", self.name))
    }

    /// Property file describing the top tiles.
    pub fn tops_properties(&self) -> PathBuf {
        self.tops_dir.join("ctm.properties")
    }

    /// File name of this block's spritesheets and default sprite in the downloads directory.
    pub fn sprite_file_name(&self) -> String {
        format!("{}.png", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_paths() {
        let config = PackerConfig::new("/pack", "/dl");
        let block = WoodType::new("stripped_birch").unwrap().block(&config);

        assert_eq!(block.name, "stripped_birch_log");
        assert_eq!(
            block.variants_dir,
            PathBuf::from("/pack/assets/minecraft/optifine/ctm/stripped_birch_log")
        );
        assert_eq!(
            block.tops_dir,
            PathBuf::from("/pack/assets/minecraft/optifine/ctm/_overlays/stripped_birch_log_top")
        );
        assert_eq!(
            block.variants_properties(),
            block.variants_dir.join("stripped_birch_log.properties")
        );
        assert_eq!(block.tops_properties(), block.tops_dir.join("ctm.properties"));
        assert_eq!(block.sprite_file_name(), "stripped_birch_log.png");
    }

    #[test]
    fn test_block_is_stable() {
        let config = PackerConfig::new("/pack", "/dl");
        let oak = WoodType::new("oak").unwrap();
        assert_eq!(oak.block(&config), oak.block(&config));
    }

    #[test]
    fn test_invalid_wood_types() {
        assert!(matches!(WoodType::new(""), Err(PackerError::InvalidWoodType(_))));
        assert!(WoodType::new("Oak").is_err());
        assert!(WoodType::new("oak log").is_err());
        assert!(WoodType::new("../oak").is_err());
    }

    #[test]
    fn test_catalog_is_valid() {
        for id in WOOD_CATALOG {
            assert!(WoodType::new(*id).is_ok(), "{} should be valid", id);
        }
    }
}
