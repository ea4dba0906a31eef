//! Resource pack maintenance.
//!
//! This module handles the plain-text side of the pack: probing block
//! directories, instantiating per-block property files, merging blocks into the
//! shared overlay groups, and packaging the finished pack as a ZIP archive.

pub mod archive;
pub mod overlay;
pub mod probe;
pub mod properties;

pub use archive::{package, ArchiveReport};
pub use overlay::{merge_match_blocks, update_overlays, OverlayUpdate};
pub use probe::{probe, DirProbe};
pub use properties::{check_templates, instantiate_properties, PLACEHOLDER};
