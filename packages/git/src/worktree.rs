//! Worktree operations.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use git2::Repository;

use crate::error::GitError;
use crate::repo::get_repo_root;

/// Get the root of the main (canonical) worktree of a repository.
///
/// When `repo` was opened from a linked worktree, this resolves the checkout
/// that owns the shared git directory instead of the linked worktree itself.
///
/// # Arguments
///
/// * `repo` - The repository, opened from any of its worktrees
///
/// # Errors
///
/// * If the shared repository cannot be opened
/// * If the main repository is bare
pub fn main_worktree_root(repo: &Repository) -> Result<PathBuf, GitError> {
    if !repo.is_worktree() {
        return get_repo_root(repo);
    }

    let common_dir = repo.commondir();
    log::debug!(
        "Resolving main worktree from common dir {}",
        common_dir.display()
    );

    let main = Repository::open(common_dir).map_err(|e| GitError::OpenError {
        path: common_dir.to_path_buf(),
        source: e,
    })?;

    get_repo_root(&main)
}
