//! Error types for glob expansion.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while expanding a glob pattern.
#[derive(Debug, Error)]
pub enum GlobError {
    /// The pattern could not be compiled.
    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The pattern text.
        pattern: String,
        /// The underlying globset error.
        #[source]
        source: globset::Error,
    },

    /// The root directory could not be traversed.
    #[error("Failed to traverse {}: {message}", path.display())]
    WalkError {
        /// The directory being traversed.
        path: PathBuf,
        /// Error message.
        message: String,
    },
}
