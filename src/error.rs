//! Error types for the sanitizer library
//!
//! Unsafe input is never reported through this type: it is neutralized and
//! returned as safe output. `SanitizeError` covers the two remaining channels:
//! faults raised while walking a value (swallowed per composite by the
//! orchestrator) and construction-time misconfiguration.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the sanitizer and its configuration loaders
#[derive(Debug, Error)]
pub enum SanitizeError {
    /// A composite value nested deeper than the configured limit
    #[error("maximum nesting depth of {max_depth} exceeded")]
    DepthExceeded { max_depth: usize },

    /// An HTML filtering engine failed to process a string
    #[error("html filter failed: {0}")]
    Filter(String),

    /// Filter options could not be decoded
    #[error("invalid filter options: {0}")]
    InvalidOptions(#[from] serde_json::Error),

    /// A configuration file could not be read
    #[error("failed to read configuration file {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, SanitizeError>;
