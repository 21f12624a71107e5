//! Glob pattern resolution with parallel directory traversal for sw.
//!
//! Patterns are always expanded against an explicit root directory, so
//! callers never need to change the process working directory.
//!
//! # Example
//!
//! ```rust,ignore
//! use sw_glob::{FsGlob, GlobExpander};
//!
//! for found in FsGlob::new().expand(&base_root, "backend/db/store/*.db")? {
//!     println!("{}", found.relative.display());
//! }
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod expand;

pub use error::GlobError;
pub use expand::{EntryKind, FsGlob, GlobExpander, GlobMatch};
