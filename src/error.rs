//! Error types for monogrid.
//!
//! Layout itself never fails: malformed documents lay out to a defined result.
//! Errors only come from constructing font metrics, parsing role markers and
//! loading style configuration or front matter.

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by fallible monogrid operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A character cell dimension was zero, negative, NaN or infinite.
    #[error("invalid character cell metrics: width={width}px height={height}px")]
    InvalidMetrics {
        /// Offending glyph advance width in pixels.
        width: f64,
        /// Offending line height in pixels.
        height: f64,
    },

    /// A class marker did not name any recognized layout role.
    #[error("unknown layout role `{0}`")]
    UnknownRole(String),

    /// The style configuration file could not be read.
    #[error("failed to read style config {path}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Style configuration or front matter was not valid TOML for
    /// [`crate::config::StyleConfig`] or [`crate::header::FrontMatter`].
    #[error("failed to parse TOML: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
