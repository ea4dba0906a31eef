//! Overlay match lists.
//!
//! Each `_overlays/logs_*/ctm.properties` file starts with a
//! `matchBlocks=` line listing `<block>:axis=<axis>` tokens. Registering a block
//! adds it to every group with the group's axis, keeping each list
//! deduplicated and sorted so repeated runs produce identical files.

use crate::config::PackerConfig;
use crate::error::Result;
use crate::resource_pack::probe::probe;
use crate::types::{Axis, Block};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

const MATCH_BLOCKS: &str = "matchBlocks=";
const GROUP_PREFIX: &str = "logs";
const OVERLAY_FILE: &str = "ctm.properties";

/// What happened to one overlay group during a merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlayUpdate {
    /// Group directory name, e.g. "logs_x".
    pub group: String,
    /// Axis the block was registered with, or `None` if the group was skipped.
    pub axis: Option<Axis>,
    /// Whether the file contents changed.
    pub changed: bool,
}

/// Format a match token.
pub fn match_token(block_name: &str, axis: Axis) -> String {
    format!("{}:axis={}", block_name, axis)
}

/// Merge a token into the `matchBlocks=` header of an overlay file.
///
/// Tokens are trimmed, deduplicated and sorted; everything after the first line
/// is kept. The result is trimmed and ends with exactly one newline.
pub fn merge_match_blocks(contents: &str, token: &str) -> String {
    let (header, rest) = match contents.split_once('\n') {
        Some((header, rest)) => (header, Some(rest)),
        None => (contents, None),
    };

    let list = header.strip_prefix(MATCH_BLOCKS).unwrap_or(header);
    let tokens: BTreeSet<&str> = list
        .split(' ')
        .map(str::trim)
        .chain(std::iter::once(token.trim()))
        .filter(|t| !t.is_empty())
        .collect();

    let mut merged = String::with_capacity(contents.len() + token.len() + 1);
    merged.push_str(MATCH_BLOCKS);
    merged.push_str(&tokens.into_iter().collect::<Vec<_>>().join(" "));
    if let Some(rest) = rest {
        merged.push('\n');
        merged.push_str(rest);
    }

    let mut merged = merged.trim().to_string();
    merged.push('\n');
    merged
}

/// Find every overlay group file, sorted by path.
pub fn discover_overlays(config: &PackerConfig) -> Result<Vec<PathBuf>> {
    let overlays_dir = config.overlays_dir();
    let listing = probe(&overlays_dir)?;

    let mut files = Vec::new();
    for name in listing.contents.iter().filter(|n| n.starts_with(GROUP_PREFIX)) {
        let file = overlays_dir.join(name).join(OVERLAY_FILE);
        if file.is_file() {
            files.push(file);
        }
    }
    files.sort();
    Ok(files)
}

/// Register a block in every overlay group.
///
/// Groups whose name has no known axis are skipped with a warning and left
/// untouched.
pub fn update_overlays(config: &PackerConfig, block: &Block) -> Result<Vec<OverlayUpdate>> {
    let mut updates = Vec::new();

    for file in discover_overlays(config)? {
        let group = group_name(&file);

        let Some(axis) = Axis::from_overlay_group(&group) else {
            log::warn!("Overlay group '{}' has no known axis, skipping", group);
            updates.push(OverlayUpdate {
                group,
                axis: None,
                changed: false,
            });
            continue;
        };

        let contents = std::fs::read_to_string(&file)?;
        let merged = merge_match_blocks(&contents, &match_token(&block.name, axis));
        let changed = merged != contents;
        if changed {
            std::fs::write(&file, &merged)?;
            log::debug!("Added {} to overlay group {}", block.name, group);
        }

        updates.push(OverlayUpdate {
            group,
            axis: Some(axis),
            changed,
        });
    }

    Ok(updates)
}

fn group_name(file: &Path) -> String {
    file.parent()
        .and_then(Path::file_name)
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}
