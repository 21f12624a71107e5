//! Provisioning of gitignored files into new worktrees.
//!
//! A run resolves the copy and symlink pattern sets of a base checkout to
//! ignored entries, refuses to continue when an entry is claimed by both, and
//! then copies or links every entry into the destination worktree.
//!
//! # Example
//!
//! ```rust,ignore
//! use sw_config::{discover_settings, load_config};
//! use sw_git::RepoIgnoreOracle;
//! use sw_glob::FsGlob;
//! use sw_provision::{ProvisionEngine, ProvisionRequest, format_manifest};
//!
//! let settings = discover_settings(&base_root)?;
//! let collision = settings.on_collision;
//! let config = load_config(&base_root, settings)?;
//! let oracle = RepoIgnoreOracle::open(&base_root)?;
//!
//! let engine = ProvisionEngine::new(&FsGlob, &oracle, collision);
//! let manifest = engine.run(&ProvisionRequest::from_config(&config, &dest_root), |_, _| {})?;
//!
//! for line in format_manifest(&manifest) {
//!     println!("{line}");
//! }
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod apply;
mod conflict;
mod copy;
mod error;
mod plan;
mod report;
mod resolve;
mod symlink;

pub use apply::{ActionFailure, ActionRecord, Manifest, apply_actions, execute_action};
pub use conflict::{Conflict, ConflictReport, find_conflicts};
pub use copy::{copy_entry_directory, copy_entry_file};
pub use error::{OperationError, ProvisionError};
pub use plan::{Action, ActionKind, plan_actions};
pub use report::{format_actions, format_line, format_manifest};
pub use resolve::{PatternResolver, ResolvedEntry, ResolvedSet};
pub use symlink::create_symlink;

use std::path::Path;

use sw_config::{CollisionPolicy, LoadedConfig, PatternSet};
use sw_copy::CopyProgress;
use sw_git::IgnoreOracle;
use sw_glob::GlobExpander;

/// Result of a single provisioning operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationResult {
    /// The entry was newly created.
    Created,
    /// A directory was merged into one that already existed.
    Merged,
    /// The destination was already in place and left untouched.
    Exists,
}

impl std::fmt::Display for OperationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Merged => write!(f, "merged"),
            Self::Exists => write!(f, "exists"),
        }
    }
}

/// Inputs of one provisioning run.
#[derive(Debug, Clone, Copy)]
pub struct ProvisionRequest<'a> {
    /// Absolute path of the base checkout.
    pub base_root: &'a Path,
    /// Absolute path of the new worktree.
    pub dest_root: &'a Path,
    /// Patterns of entries to copy.
    pub copy_patterns: &'a PatternSet,
    /// Patterns of entries to symlink.
    pub symlink_patterns: &'a PatternSet,
}

impl<'a> ProvisionRequest<'a> {
    /// A request provisioning `dest_root` from a loaded configuration.
    #[must_use]
    pub fn from_config(config: &'a LoadedConfig, dest_root: &'a Path) -> Self {
        Self {
            base_root: &config.base_root,
            dest_root,
            copy_patterns: &config.copy_patterns,
            symlink_patterns: &config.symlink_patterns,
        }
    }

    /// Check that both roots are absolute, existing directories.
    ///
    /// # Errors
    ///
    /// * If either root is relative, missing, or not a directory
    pub fn validate(&self) -> Result<(), ProvisionError> {
        for root in [self.base_root, self.dest_root] {
            let reason = if !root.is_absolute() {
                "path is not absolute"
            } else if !root.exists() {
                "directory does not exist"
            } else if !root.is_dir() {
                "not a directory"
            } else {
                continue;
            };

            return Err(ProvisionError::InvalidRoot {
                path: root.to_path_buf(),
                reason: reason.to_string(),
            });
        }

        Ok(())
    }
}

/// Runs the resolve, conflict check, and apply pipeline.
#[derive(Debug)]
pub struct ProvisionEngine<'a, G: ?Sized, O: ?Sized> {
    glob: &'a G,
    oracle: &'a O,
    collision: CollisionPolicy,
}

impl<'a, G, O> ProvisionEngine<'a, G, O>
where
    G: GlobExpander + ?Sized,
    O: IgnoreOracle + ?Sized,
{
    /// Create an engine.
    ///
    /// # Arguments
    ///
    /// * `glob` - Pattern expansion against the filesystem
    /// * `oracle` - Ignore status of the base checkout
    /// * `collision` - Policy for copied files that already exist in the destination
    #[must_use]
    pub const fn new(glob: &'a G, oracle: &'a O, collision: CollisionPolicy) -> Self {
        Self {
            glob,
            oracle,
            collision,
        }
    }

    /// Resolve both pattern sets and compute the actions, without writing anything.
    ///
    /// # Errors
    ///
    /// * If a root is invalid
    /// * If the ignore oracle fails
    /// * If any entry is claimed by both pattern sets
    pub fn plan(&self, request: &ProvisionRequest<'_>) -> Result<Vec<Action>, ProvisionError> {
        request.validate()?;

        let resolver = PatternResolver::new(self.glob, self.oracle);
        let copy = resolver.resolve(request.copy_patterns, request.base_root)?;
        let symlink = resolver.resolve(request.symlink_patterns, request.base_root)?;

        let conflicts = find_conflicts(&copy, &symlink);
        if !conflicts.is_empty() {
            return Err(ProvisionError::Conflicts(ConflictReport {
                conflicts,
                copy_source: request.copy_patterns.source_name(),
                symlink_source: request.symlink_patterns.source_name(),
            }));
        }

        let actions = plan_actions(&copy, &symlink, request.base_root, request.dest_root);
        log::debug!("Planned {} actions", actions.len());

        Ok(actions)
    }

    /// Plan and execute a provisioning run.
    ///
    /// Individual action failures end up in [`Manifest::failures`].
    ///
    /// # Arguments
    ///
    /// * `request` - Roots and pattern sets of the run
    /// * `on_progress` - Callback for directory copy progress
    ///
    /// # Errors
    ///
    /// * Any error from [`Self::plan`]; nothing is written in that case
    pub fn run<F>(
        &self,
        request: &ProvisionRequest<'_>,
        on_progress: F,
    ) -> Result<Manifest, ProvisionError>
    where
        F: Fn(&Action, &CopyProgress) + Sync,
    {
        let actions = self.plan(request)?;
        Ok(apply_actions(&actions, self.collision, on_progress))
    }
}
