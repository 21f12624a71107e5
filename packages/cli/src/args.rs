//! CLI argument definitions.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use clap::Parser;
use sw_config::CollisionPolicy;

/// CLI arguments for sw-provision.
#[derive(Debug, Parser)]
#[command(
    name = "sw-provision",
    about = "Copy or symlink gitignored files from the base checkout into a new worktree",
    version
)]
pub struct Args {
    /// Path to the new worktree.
    #[arg(index = 1)]
    pub target_path: PathBuf,

    /// Base checkout to provision from (defaults to the main worktree).
    #[arg(long)]
    pub base: Option<PathBuf>,

    /// Copy-pattern file to use instead of the configured one.
    #[arg(long = "copy-patterns")]
    pub copy_patterns: Option<PathBuf>,

    /// Symlink-pattern file to use instead of the configured one.
    #[arg(long = "symlink-patterns")]
    pub symlink_patterns: Option<PathBuf>,

    /// What to do with copied files that already exist (overwrite or keep).
    #[arg(long = "on-collision")]
    pub on_collision: Option<CollisionPolicy>,

    /// Print the planned actions without touching the worktree.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Disable progress bars (useful for CI environments).
    #[arg(long = "no-progress")]
    pub no_progress: bool,

    /// Enable verbose output.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Args {
    /// Determine if we should show progress bars.
    #[must_use]
    pub const fn should_show_progress(&self) -> bool {
        !self.no_progress && !self.dry_run
    }
}
