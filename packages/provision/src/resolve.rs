//! Pattern resolution: from pattern text to ignored filesystem entries.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use sw_config::{Pattern, PatternSet};
use sw_git::IgnoreOracle;
use sw_glob::{GlobError, GlobExpander, GlobMatch};

use crate::error::ProvisionError;

/// An ignored entry of the base checkout selected by a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntry {
    /// Normalized path relative to the base root.
    pub path: PathBuf,
    /// Whether the entry stands for a whole directory tree.
    pub is_directory: bool,
    /// The pattern that claimed the entry.
    pub pattern: String,
}

impl ResolvedEntry {
    /// The path with `/` separators, and a trailing `/` for directories.
    #[must_use]
    pub fn display_path(&self) -> String {
        let mut display = self
            .path
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        if self.is_directory {
            display.push('/');
        }
        display
    }
}

/// Resolved entries in first-claimed order, without duplicates.
#[derive(Debug, Clone, Default)]
pub struct ResolvedSet {
    entries: Vec<ResolvedEntry>,
    seen: HashSet<PathBuf>,
}

impl ResolvedSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry unless its path was already claimed.
    ///
    /// Returns whether the entry was added.
    pub fn insert(&mut self, entry: ResolvedEntry) -> bool {
        if self.seen.insert(entry.path.clone()) {
            self.entries.push(entry);
            true
        } else {
            false
        }
    }

    /// Whether `path` has been claimed.
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.seen.contains(path)
    }

    /// The entry claiming `path`, if any.
    #[must_use]
    pub fn get(&self, path: &Path) -> Option<&ResolvedEntry> {
        if !self.contains(path) {
            return None;
        }
        self.entries.iter().find(|entry| entry.path == path)
    }

    /// Iterate over entries in resolution order.
    pub fn iter(&self) -> std::slice::Iter<'_, ResolvedEntry> {
        self.entries.iter()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a ResolvedSet {
    type Item = &'a ResolvedEntry;
    type IntoIter = std::slice::Iter<'a, ResolvedEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Resolves pattern sets against a base checkout.
///
/// Only entries that exist and are confirmed ignored by the oracle are
/// produced. Patterns that match nothing are skipped silently.
#[derive(Debug)]
pub struct PatternResolver<'a, G: ?Sized, O: ?Sized> {
    glob: &'a G,
    oracle: &'a O,
}

impl<'a, G, O> PatternResolver<'a, G, O>
where
    G: GlobExpander + ?Sized,
    O: IgnoreOracle + ?Sized,
{
    /// Create a resolver from a glob capability and an ignore oracle.
    #[must_use]
    pub const fn new(glob: &'a G, oracle: &'a O) -> Self {
        Self { glob, oracle }
    }

    /// Resolve every pattern of `patterns`, in declaration order.
    ///
    /// An entry claimed by an earlier pattern is not added again.
    ///
    /// # Errors
    ///
    /// * If the ignore oracle fails
    /// * If the filesystem cannot be traversed
    pub fn resolve(
        &self,
        patterns: &PatternSet,
        base_root: &Path,
    ) -> Result<ResolvedSet, ProvisionError> {
        let mut resolved = ResolvedSet::new();

        for pattern in patterns {
            let Some(normalized) = pattern.normalized() else {
                log::warn!(
                    "Skipping pattern '{pattern}' in {}: it does not name anything inside the repository",
                    patterns.source.display()
                );
                continue;
            };

            let entries = if pattern.is_directory {
                self.resolve_directories(pattern, &normalized, base_root)?
            } else {
                self.resolve_files(pattern, &normalized, base_root)?
            };

            for entry in entries {
                let display = entry.display_path();
                if !resolved.insert(entry) {
                    log::debug!("{display} already claimed by an earlier pattern ('{pattern}')");
                }
            }
        }

        log::debug!(
            "Resolved {} entries from {}",
            resolved.len(),
            patterns.source.display()
        );
        Ok(resolved)
    }

    /// A directory pattern qualifies when the directory is ignored itself or
    /// holds at least one ignored entry (for rules like `*.db`).
    fn resolve_directories(
        &self,
        pattern: &Pattern,
        normalized: &str,
        base_root: &Path,
    ) -> Result<Vec<ResolvedEntry>, ProvisionError> {
        let dirs: Vec<PathBuf> = self
            .expand(pattern, normalized, base_root)?
            .into_iter()
            .filter(GlobMatch::is_dir)
            .map(|found| found.relative)
            .collect();

        if dirs.is_empty() {
            log::debug!("Directory pattern '{pattern}' matched no directory");
            return Ok(Vec::new());
        }

        let ignored: HashSet<PathBuf> = self.oracle.filter_ignored(&dirs)?.into_iter().collect();
        let mut entries = Vec::new();

        for dir in dirs {
            if ignored.contains(&dir) || self.oracle.contains_ignored(&dir)? {
                entries.push(ResolvedEntry {
                    path: dir,
                    is_directory: true,
                    pattern: pattern.raw.clone(),
                });
            } else {
                log::debug!(
                    "Skipping {}: neither ignored nor holding ignored files",
                    dir.display()
                );
            }
        }

        Ok(entries)
    }

    /// File patterns keep regular files only, filtered by one oracle batch.
    fn resolve_files(
        &self,
        pattern: &Pattern,
        normalized: &str,
        base_root: &Path,
    ) -> Result<Vec<ResolvedEntry>, ProvisionError> {
        let files: Vec<PathBuf> = self
            .expand(pattern, normalized, base_root)?
            .into_iter()
            .filter(GlobMatch::is_file)
            .map(|found| found.relative)
            .collect();

        if files.is_empty() {
            log::debug!("Pattern '{pattern}' matched no files");
            return Ok(Vec::new());
        }

        let ignored: HashSet<PathBuf> = self.oracle.filter_ignored(&files)?.into_iter().collect();

        Ok(files
            .into_iter()
            .filter(|file| ignored.contains(file))
            .map(|file| ResolvedEntry {
                path: file,
                is_directory: false,
                pattern: pattern.raw.clone(),
            })
            .collect())
    }

    fn expand(
        &self,
        pattern: &Pattern,
        normalized: &str,
        base_root: &Path,
    ) -> Result<Vec<GlobMatch>, ProvisionError> {
        match self.glob.expand(base_root, normalized) {
            Ok(found) => Ok(found),
            Err(e @ GlobError::InvalidPattern { .. }) => {
                log::warn!("Skipping pattern '{pattern}': {e}");
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }
}
