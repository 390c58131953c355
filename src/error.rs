//! Error types for rendering and output.

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop a render from producing its image.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Output could not be opened or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// PNG encoding or saving failed.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Configuration file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    ConfigRead {
        /// Path that was being read
        path: PathBuf,
        /// Underlying I/O failure
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for a render configuration.
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration values violate a renderer precondition.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Output path has an extension no sink can write.
    #[error("unsupported output format '{0}', expected .ppm or .png")]
    UnsupportedFormat(String),

    /// Rows handed to a sink do not match the announced dimensions.
    #[error("raster mismatch: {0}")]
    Raster(String),

    /// A P3 document could not be parsed.
    #[error("malformed P3 image: {0}")]
    Parse(String),
}
