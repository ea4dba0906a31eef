//! Packaging the pack as a ZIP archive.

use crate::config::PackerConfig;
use crate::error::{PackerError, Result};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;

const PACK_META: &str = "pack.mcmeta";
const PACK_ICON: &str = "pack.png";
const ASSETS_DIR: &str = "assets";

/// Summary of a written archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveReport {
    /// Where the archive was written.
    pub path: PathBuf,
    /// Number of files stored.
    pub entries: usize,
}

/// Zip `pack.mcmeta`, `pack.png` and `assets/` into `config.archive_path`.
///
/// Entries are sorted and carry a fixed timestamp, so an unchanged pack
/// produces an identical archive.
pub fn package(config: &PackerConfig) -> Result<ArchiveReport> {
    let root = &config.work_dir;
    if !root.join(PACK_META).is_file() {
        return Err(PackerError::InvalidResourcePack(format!(
            "No {} found in {}",
            PACK_META,
            root.display()
        )));
    }

    let mut files = vec![root.join(PACK_META)];
    if root.join(PACK_ICON).is_file() {
        files.push(root.join(PACK_ICON));
    }
    let assets = root.join(ASSETS_DIR);
    if assets.is_dir() {
        collect_files(&assets, &mut files)?;
    }

    let mut entries: Vec<(String, PathBuf)> = files
        .into_iter()
        .map(|path| (entry_name(root, &path), path))
        .collect();
    entries.sort();

    if let Some(parent) = config.archive_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(&config.archive_path)?;
    let mut zip = zip::ZipWriter::new(file);
    let options = SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default())
        .unix_permissions(0o644);

    for (name, path) in &entries {
        let data = std::fs::read(path)?;
        zip.start_file(name.as_str(), options)?;
        zip.write_all(&data)?;
    }
    zip.finish()?;

    log::info!(
        "Packaged {} files into {}",
        entries.len(),
        config.archive_path.display()
    );

    Ok(ArchiveReport {
        path: config.archive_path.clone(),
        entries: entries.len(),
    })
}

/// Collect files recursively, skipping dot-files and dot-directories.
fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }

        let path = entry.path();
        if entry.file_type()?.is_dir() {
            collect_files(&path, files)?;
        } else {
            files.push(path);
        }
    }
    Ok(())
}

fn entry_name(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
