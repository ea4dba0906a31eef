//! Paths the packer works against, resolved once at startup.

use crate::error::{PackerError, Result};
use std::path::{Path, PathBuf};

/// Environment variable naming the resource pack checkout.
pub const WORK_DIR_VAR: &str = "WORKDIR";
/// Environment variable naming the directory exported spritesheets land in.
pub const DOWNLOADS_VAR: &str = "DOWNLOADS";

/// Configuration for every packer operation.
///
/// Components receive this by reference; nothing else reads the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackerConfig {
    /// Root of the resource pack (contains `assets/` and `pack.mcmeta`).
    pub work_dir: PathBuf,
    /// Directory holding the exported spritesheets and default sprites.
    pub downloads_dir: PathBuf,
    /// Directory holding the property templates.
    pub templates_dir: PathBuf,
    /// Parent directory for per-block staging directories.
    pub scratch_dir: PathBuf,
    /// Destination of `repackage`.
    pub archive_path: PathBuf,
}

impl PackerConfig {
    /// Create a configuration with default derived paths.
    pub fn new(work_dir: impl Into<PathBuf>, downloads_dir: impl Into<PathBuf>) -> Self {
        let work_dir = work_dir.into();
        let downloads_dir = downloads_dir.into();

        let templates_dir = work_dir.join("knotted-wood-packer").join("templates");
        let archive_name = work_dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "resource-pack".to_string());
        let archive_path = downloads_dir.join(format!("{}.zip", archive_name));

        Self {
            work_dir,
            downloads_dir,
            templates_dir,
            scratch_dir: std::env::temp_dir(),
            archive_path,
        }
    }

    /// Build the configuration from `WORKDIR` and `DOWNLOADS`.
    ///
    /// Explicit values take precedence over the environment.
    pub fn from_env(work_dir: Option<PathBuf>, downloads_dir: Option<PathBuf>) -> Result<Self> {
        let work_dir = match work_dir {
            Some(dir) => dir,
            None => env_path(WORK_DIR_VAR)?,
        };
        let downloads_dir = match downloads_dir {
            Some(dir) => dir,
            None => env_path(DOWNLOADS_VAR)?,
        };
        Ok(Self::new(work_dir, downloads_dir))
    }

    /// Override the templates directory.
    pub fn with_templates_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.templates_dir = dir.into();
        self
    }

    /// Override the scratch root.
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = dir.into();
        self
    }

    /// Override the archive destination.
    pub fn with_archive_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.archive_path = path.into();
        self
    }

    /// `assets/minecraft/optifine/ctm` inside the pack.
    pub fn ctm_dir(&self) -> PathBuf {
        self.work_dir
            .join("assets")
            .join("minecraft")
            .join("optifine")
            .join("ctm")
    }

    /// Overlay directory holding the `logs_*` groups and the top tiles.
    pub fn overlays_dir(&self) -> PathBuf {
        self.ctm_dir().join("_overlays")
    }

    /// Path of a template by file name.
    pub fn template(&self, name: &str) -> PathBuf {
        self.templates_dir.join(name)
    }

    /// Path of a download subdirectory.
    pub fn download(&self, subdir: impl AsRef<Path>) -> PathBuf {
        self.downloads_dir.join(subdir)
    }
}

fn env_path(var: &'static str) -> Result<PathBuf> {
    match std::env::var_os(var) {
        Some(value) if !value.to_string_lossy().trim().is_empty() => Ok(PathBuf::from(value)),
        _ => Err(PackerError::MissingEnv(var)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_paths() {
        let config = PackerConfig::new("/packs/knotted", "/home/me/Downloads");

        assert_eq!(
            config.ctm_dir(),
            PathBuf::from("/packs/knotted/assets/minecraft/optifine/ctm")
        );
        assert_eq!(
            config.overlays_dir(),
            PathBuf::from("/packs/knotted/assets/minecraft/optifine/ctm/_overlays")
        );
        assert_eq!(
            config.templates_dir,
            PathBuf::from("/packs/knotted/knotted-wood-packer/templates")
        );
        assert_eq!(
            config.archive_path,
            PathBuf::from("/home/me/Downloads/knotted.zip")
        );
    }

    #[test]
    fn test_explicit_paths_skip_environment() {
        let config = PackerConfig::from_env(
            Some(PathBuf::from("/work")),
            Some(PathBuf::from("/downloads")),
        )
        .unwrap();
        assert_eq!(config.work_dir, PathBuf::from("/work"));
        assert_eq!(config.downloads_dir, PathBuf::from("/downloads"));
    }

    #[test]
    fn test_overrides() {
        let config = PackerConfig::new("/work", "/downloads")
            .with_templates_dir("/tpl")
            .with_scratch_dir("/scratch")
            .with_archive_path("/out/pack.zip");
        assert_eq!(
            config.template("top.ctm.properties"),
            PathBuf::from("/tpl/top.ctm.properties")
        );
        assert_eq!(config.scratch_dir, PathBuf::from("/scratch"));
        assert_eq!(config.archive_path, PathBuf::from("/out/pack.zip"));
    }
}
