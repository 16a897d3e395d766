//! # Diagnostics Error Types

use std::path::PathBuf;
use thiserror::Error;

/// Errors from writing diagnostic output or reading channel configuration.
#[derive(Error, Debug)]
pub enum DebugError {
    /// A file could not be created, read or written.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A profile could not be encoded.
    #[error("serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Channel configuration is not valid.
    #[error("invalid channel configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for diagnostics operations.
pub type DebugResult<T> = Result<T, DebugError>;
