//! File copying for sw worktree provisioning.
//!
//! This crate provides the copy primitives used when provisioning a worktree:
//!
//! * Byte-exact single file copies (skip or overwrite an existing target)
//! * Directory copies that merge into an already existing target
//! * Parallel directory enumeration using `jwalk`
//! * Parallel file copying using `rayon`
//! * Copy-on-write support via `reflink-copy` (APFS, Btrfs, `ReFS`)
//! * Progress callbacks for UI integration
//!
//! # Example
//!
//! ```rust,ignore
//! use sw_copy::{copy_directory, CopyProgress, ExistingFile};
//!
//! copy_directory(source, target, ExistingFile::Overwrite, |progress: &CopyProgress| {
//!     println!("{}/{} files copied", progress.files_copied, progress.files_total);
//! })?;
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod copy;
mod error;
mod progress;

pub use copy::{CopyResult, ExistingFile, copy_directory, copy_file, overwrite_file};
pub use error::CopyError;
pub use progress::{CopyProgress, ProgressTracker};
