//! Detection of entries claimed by both pattern sets.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fmt;
use std::path::PathBuf;

use crate::resolve::{ResolvedEntry, ResolvedSet};

/// An entry that is both copied and symlinked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    /// Normalized path relative to the base root.
    pub path: PathBuf,
    /// Whether the copy side claimed it as a directory.
    pub is_directory: bool,
    /// Copy pattern that claimed the entry.
    pub copy_pattern: String,
    /// Symlink pattern that claimed the entry.
    pub symlink_pattern: String,
}

impl Conflict {
    fn display_path(&self) -> String {
        ResolvedEntry {
            path: self.path.clone(),
            is_directory: self.is_directory,
            pattern: String::new(),
        }
        .display_path()
    }
}

/// Every entry present in both resolved sets, in copy-set order.
#[must_use]
pub fn find_conflicts(copy: &ResolvedSet, symlink: &ResolvedSet) -> Vec<Conflict> {
    copy.iter()
        .filter_map(|entry| {
            symlink.get(&entry.path).map(|linked| Conflict {
                path: entry.path.clone(),
                is_directory: entry.is_directory,
                copy_pattern: entry.pattern.clone(),
                symlink_pattern: linked.pattern.clone(),
            })
        })
        .collect()
}

/// All conflicts of one run, with the pattern files they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictReport {
    /// The conflicting entries.
    pub conflicts: Vec<Conflict>,
    /// Name of the copy pattern file.
    pub copy_source: String,
    /// Name of the symlink pattern file.
    pub symlink_source: String,
}

impl ConflictReport {
    /// One message per conflicting path.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.conflicts
            .iter()
            .map(|conflict| {
                format!(
                    "{} is listed in both {} ('{}') and {} ('{}')",
                    conflict.display_path(),
                    self.copy_source,
                    conflict.copy_pattern,
                    self.symlink_source,
                    conflict.symlink_pattern,
                )
            })
            .collect()
    }
}

impl fmt::Display for ConflictReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} path(s) claimed by both {} and {}",
            self.conflicts.len(),
            self.copy_source,
            self.symlink_source
        )
    }
}
