//! Error types for the wood packer.

use thiserror::Error;

/// Result type alias using PackerError.
pub type Result<T> = std::result::Result<T, PackerError>;

/// Main error type for pack maintenance operations.
#[derive(Error, Debug)]
pub enum PackerError {
    /// Failed to write a ZIP archive.
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Failed to serialize a report.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to read, write or process an image.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required environment variable is not set.
    #[error("shell variable '{0}' not defined")]
    MissingEnv(&'static str),

    /// A command that needs a wood type was given none.
    #[error("log wood type must be provided")]
    MissingWoodType,

    /// Wood type identifier is empty or has characters that cannot appear in a block name.
    #[error("invalid wood type '{0}'")]
    InvalidWoodType(String),

    /// The block was never registered.
    #[error("unknown wood type '{0}'")]
    UnknownWoodType(String),

    /// A property template is missing from the templates directory.
    #[error("template not found: {0}")]
    MissingTemplate(String),

    /// A required source file is missing.
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    /// Spritesheet cannot be cut into whole tiles.
    #[error("Invalid spritesheet {path}: {reason}")]
    InvalidSpritesheet { path: String, reason: String },

    /// Invalid resource pack structure.
    #[error("Invalid resource pack: {0}")]
    InvalidResourcePack(String),

    /// One or more blocks failed during a bulk refresh.
    #[error("failed to refresh: {}", .0.join(", "))]
    Batch(Vec<String>),
}
