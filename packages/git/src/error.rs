//! Error types for git operations.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// Failed to open repository.
    #[error("Failed to open repository at {}: {source}", path.display())]
    OpenError {
        /// Path that was attempted.
        path: PathBuf,
        /// The underlying git2 error.
        #[source]
        source: git2::Error,
    },

    /// Failed to discover repository.
    #[error("Failed to discover repository from {}: {source}", path.display())]
    DiscoverError {
        /// Path that was attempted.
        path: PathBuf,
        /// The underlying git2 error.
        #[source]
        source: git2::Error,
    },

    /// Repository has no working directory.
    #[error("Repository has no working directory (bare repository)")]
    BareRepository,

    /// Failed to read the index.
    #[error("Failed to read repository index: {0}")]
    IndexError(#[source] git2::Error),

    /// Failed to check whether a path is ignored.
    #[error("Failed to check ignore status of {}: {source}", path.display())]
    IgnoreCheckError {
        /// Path that was checked.
        path: PathBuf,
        /// The underlying git2 error.
        #[source]
        source: git2::Error,
    },

    /// Failed to get repository status.
    #[error("Failed to get repository status: {0}")]
    StatusError(#[source] git2::Error),
}
