//! Repository discovery and basic operations.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::{Path, PathBuf};

use git2::Repository;

use crate::error::GitError;

/// Open a git repository at the specified path.
///
/// # Arguments
///
/// * `path` - Path to the repository root
///
/// # Errors
///
/// * If the path is not a git repository
/// * If the repository cannot be opened
pub fn open_repo(path: &Path) -> Result<Repository, GitError> {
    log::debug!("Opening repository at {}", path.display());

    Repository::open(path).map_err(|e| GitError::OpenError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Discover a git repository by searching upward from the given path.
///
/// # Arguments
///
/// * `path` - Path to start searching from
///
/// # Errors
///
/// * If no repository is found
pub fn discover_repo(path: &Path) -> Result<Repository, GitError> {
    log::debug!("Discovering repository from {}", path.display());

    Repository::discover(path).map_err(|e| GitError::DiscoverError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Get the root directory of a repository.
///
/// # Arguments
///
/// * `repo` - The repository
///
/// # Errors
///
/// * If the repository is bare (has no working directory)
pub fn get_repo_root(repo: &Repository) -> Result<PathBuf, GitError> {
    repo.workdir()
        .map(Path::to_path_buf)
        .ok_or(GitError::BareRepository)
}
