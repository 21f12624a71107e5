//! Error types for worktree provisioning.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use thiserror::Error;

use crate::conflict::ConflictReport;

/// Errors that abort a provisioning run before anything is written.
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// Entries claimed by both the copy and the symlink patterns.
    #[error("{0}")]
    Conflicts(ConflictReport),

    /// The ignore oracle could not answer.
    #[error("Ignore check failed: {0}")]
    Oracle(#[from] sw_git::GitError),

    /// A pattern could not be expanded.
    #[error("Glob expansion failed: {0}")]
    Glob(#[from] sw_glob::GlobError),

    /// The base or destination root is unusable.
    #[error("Invalid root {}: {reason}", path.display())]
    InvalidRoot {
        /// The offending root.
        path: PathBuf,
        /// Why it was rejected.
        reason: String,
    },
}

/// Errors from a single copy or symlink action.
///
/// These are collected into the manifest; they never abort the run.
#[derive(Debug, Error)]
pub enum OperationError {
    /// IO error during file operation.
    #[error("IO error at {}: {source}", path.display())]
    IoError {
        /// Path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create symlink.
    #[error("Failed to create symlink {} -> {}: {error}", link.display(), points_to.display())]
    SymlinkError {
        /// Where the link was being created.
        link: PathBuf,
        /// What the link would point to.
        points_to: PathBuf,
        /// The underlying IO error.
        #[source]
        error: std::io::Error,
    },

    /// The source entry disappeared after it was resolved.
    #[error("Source no longer exists: {}", path.display())]
    SourceMissing {
        /// The missing source.
        path: PathBuf,
    },

    /// Something other than the expected link already occupies the destination.
    #[error("Destination already exists: {}", path.display())]
    TargetOccupied {
        /// The occupied destination.
        path: PathBuf,
    },

    /// Copy module error.
    #[error(transparent)]
    Copy(#[from] sw_copy::CopyError),
}
