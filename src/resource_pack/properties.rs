//! Per-block property files instantiated from templates.

use crate::config::PackerConfig;
use crate::error::{PackerError, Result};
use crate::types::Block;
use std::path::{Path, PathBuf};

/// Token replaced by the block name in every template.
pub const PLACEHOLDER: &str = "TEMPLATE_LOG";

/// Template for `<block>/<block>.properties`.
pub const VARIANTS_TEMPLATE: &str = "template_log.properties";
/// Template for `_overlays/<block>_top/ctm.properties`.
pub const TOPS_TEMPLATE: &str = "top.ctm.properties";

/// Resolve both templates, failing if either is missing.
///
/// Commands call this before touching the pack so a broken checkout aborts
/// without side effects.
pub fn check_templates(config: &PackerConfig) -> Result<[PathBuf; 2]> {
    let variants = config.template(VARIANTS_TEMPLATE);
    let tops = config.template(TOPS_TEMPLATE);
    for template in [&variants, &tops] {
        if !template.is_file() {
            return Err(PackerError::MissingTemplate(template.display().to_string()));
        }
    }
    Ok([variants, tops])
}

/// Write the variant and top property files for a block.
///
/// Both block directories must already exist.
pub fn instantiate_properties(config: &PackerConfig, block: &Block) -> Result<()> {
    let [variants, tops] = check_templates(config)?;

    instantiate(&variants, &block.variants_properties(), &block.name)?;
    instantiate(&tops, &block.tops_properties(), &block.name)?;
    Ok(())
}

fn instantiate(template: &Path, destination: &Path, block_name: &str) -> Result<()> {
    let contents = std::fs::read_to_string(template).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => {
            PackerError::MissingTemplate(template.display().to_string())
        }
        _ => e.into(),
    })?;

    std::fs::write(destination, contents.replace(PLACEHOLDER, block_name))?;
    log::debug!("Wrote {}", destination.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WoodType;

    fn setup() -> (tempfile::TempDir, PackerConfig) {
        let root = tempfile::tempdir().unwrap();
        let config = PackerConfig::new(root.path().join("pack"), root.path().join("dl"));
        std::fs::create_dir_all(&config.templates_dir).unwrap();
        (root, config)
    }

    #[test]
    fn test_instantiate_replaces_every_placeholder() {
        let (_root, config) = setup();
        std::fs::write(
            config.template(VARIANTS_TEMPLATE),
            "matchBlocks=TEMPLATE_LOG\nmethod=random\nsource=TEMPLATE_LOG\n",
        )
        .unwrap();
        std::fs::write(config.template(TOPS_TEMPLATE), "matchBlocks=TEMPLATE_LOG:axis=y\n")
            .unwrap();

        let block = WoodType::new("cherry").unwrap().block(&config);
        std::fs::create_dir_all(&block.variants_dir).unwrap();
        std::fs::create_dir_all(&block.tops_dir).unwrap();

        instantiate_properties(&config, &block).unwrap();

        assert_eq!(
            std::fs::read_to_string(block.variants_properties()).unwrap(),
            "matchBlocks=cherry_log\nmethod=random\nsource=cherry_log\n"
        );
        assert_eq!(
            std::fs::read_to_string(block.tops_properties()).unwrap(),
            "matchBlocks=cherry_log:axis=y\n"
        );
    }

    #[test]
    fn test_missing_template() {
        let (_root, config) = setup();
        std::fs::write(config.template(VARIANTS_TEMPLATE), "x").unwrap();

        let err = check_templates(&config).unwrap_err();
        assert!(matches!(err, PackerError::MissingTemplate(path) if path.ends_with(TOPS_TEMPLATE)));
    }

    #[test]
    fn test_missing_destination_dir() {
        let (_root, config) = setup();
        std::fs::write(config.template(VARIANTS_TEMPLATE), "x").unwrap();
        std::fs::write(config.template(TOPS_TEMPLATE), "y").unwrap();

        let block = WoodType::new("oak").unwrap().block(&config);
        assert!(matches!(
            instantiate_properties(&config, &block),
            Err(PackerError::Io(_))
        ));
    }
}
