//! # UI Error Types
//!
//! Layout itself never fails. The only fallible surface is loading
//! configuration for an explicit theme reload.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reloading UI configuration.
#[derive(Error, Debug)]
pub enum UiError {
    /// The configuration file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file was read but is not valid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for UI operations.
pub type UiResult<T> = Result<T, UiError>;
