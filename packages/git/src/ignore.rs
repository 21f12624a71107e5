//! Ignore-status queries.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::{Path, PathBuf};

use git2::{Repository, Status, StatusOptions};

use crate::error::GitError;
use crate::repo::{get_repo_root, open_repo};

/// Answers whether paths are excluded from version control.
///
/// Paths are relative to the repository root.
pub trait IgnoreOracle {
    /// Return the subset of `candidates` that is ignored, in input order.
    ///
    /// Tracked paths are never reported, even when an ignore rule matches them.
    ///
    /// # Errors
    ///
    /// * If the ignore status cannot be determined
    fn filter_ignored(&self, candidates: &[PathBuf]) -> Result<Vec<PathBuf>, GitError>;

    /// Whether at least one ignored entry exists anywhere below `dir`.
    ///
    /// # Errors
    ///
    /// * If the repository status cannot be read
    fn contains_ignored(&self, dir: &Path) -> Result<bool, GitError>;

    /// Whether a single path is ignored.
    ///
    /// # Errors
    ///
    /// * If the ignore status cannot be determined
    fn is_ignored(&self, path: &Path) -> Result<bool, GitError> {
        Ok(!self.filter_ignored(&[path.to_path_buf()])?.is_empty())
    }
}

/// [`IgnoreOracle`] backed by a git repository's ignore rules and index.
pub struct RepoIgnoreOracle {
    repo: Repository,
}

impl RepoIgnoreOracle {
    /// Open the repository whose working directory is `root`.
    ///
    /// # Errors
    ///
    /// * If `root` is not a repository
    /// * If the repository is bare
    pub fn open(root: &Path) -> Result<Self, GitError> {
        let repo = open_repo(root)?;
        get_repo_root(&repo)?;
        Ok(Self { repo })
    }

    /// Wrap an already opened repository.
    #[must_use]
    pub const fn new(repo: Repository) -> Self {
        Self { repo }
    }
}

impl std::fmt::Debug for RepoIgnoreOracle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepoIgnoreOracle")
            .field("workdir", &self.repo.workdir())
            .finish()
    }
}

impl IgnoreOracle for RepoIgnoreOracle {
    fn filter_ignored(&self, candidates: &[PathBuf]) -> Result<Vec<PathBuf>, GitError> {
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let index = self.repo.index().map_err(GitError::IndexError)?;
        let mut ignored = Vec::new();

        for candidate in candidates {
            if index.get_path(candidate, 0).is_some() {
                log::trace!("{} is tracked", candidate.display());
                continue;
            }

            let is_ignored =
                self.repo
                    .is_path_ignored(candidate)
                    .map_err(|e| GitError::IgnoreCheckError {
                        path: candidate.clone(),
                        source: e,
                    })?;

            if is_ignored {
                ignored.push(candidate.clone());
            }
        }

        log::debug!(
            "{} of {} candidates are ignored",
            ignored.len(),
            candidates.len()
        );
        Ok(ignored)
    }

    fn contains_ignored(&self, dir: &Path) -> Result<bool, GitError> {
        let pathspec = dir
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        let mut opts = StatusOptions::new();
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(true)
            .recurse_ignored_dirs(true)
            .exclude_submodules(true)
            .pathspec(pathspec);

        let statuses = self
            .repo
            .statuses(Some(&mut opts))
            .map_err(GitError::StatusError)?;

        let found = statuses.iter().any(|entry| {
            entry.status().contains(Status::IGNORED)
                && entry
                    .path()
                    .is_some_and(|path| Path::new(path.trim_end_matches('/')).starts_with(dir))
        });

        log::debug!(
            "{} {} ignored entries",
            dir.display(),
            if found { "contains" } else { "has no" }
        );
        Ok(found)
    }
}
