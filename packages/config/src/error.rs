//! Error types for configuration loading.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading pattern files and settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a pattern or settings file.
    #[error("Failed to read {}: {source}", path.display())]
    ReadError {
        /// Path to the file that couldn't be read.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML settings file.
    #[error("Failed to parse TOML settings {}: {source}", path.display())]
    TomlParseError {
        /// Path to the file that couldn't be parsed.
        path: PathBuf,
        /// The underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// Unknown collision policy name.
    #[error("Unknown collision policy '{0}' (expected 'overwrite' or 'keep')")]
    UnknownCollisionPolicy(String),
}
