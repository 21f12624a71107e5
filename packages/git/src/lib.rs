//! Git operations for sw.
//!
//! This crate provides git operations using the `git2` library, including:
//!
//! * Repository discovery and information
//! * Locating the main worktree from any linked worktree
//! * Ignore-status queries through the [`IgnoreOracle`] trait
//!
//! # Example
//!
//! ```rust,ignore
//! use sw_git::{IgnoreOracle, RepoIgnoreOracle};
//!
//! let oracle = RepoIgnoreOracle::open(&base_root)?;
//! let ignored = oracle.filter_ignored(&[".env".into(), "README.md".into()])?;
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod ignore;
mod repo;
mod worktree;

pub use error::GitError;
pub use ignore::{IgnoreOracle, RepoIgnoreOracle};
pub use repo::{discover_repo, get_repo_root, open_repo};
pub use worktree::main_worktree_root;
