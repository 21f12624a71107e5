//! Configuration types for sw.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default name of the copy-pattern file in the base checkout.
pub const DEFAULT_COPY_PATTERNS_FILE: &str = ".worktreeinclude";

/// Default name of the symlink-pattern file in the base checkout.
pub const DEFAULT_SYMLINK_PATTERNS_FILE: &str = ".worktreelink";

/// Name of the optional settings file in the base checkout.
pub const SETTINGS_FILE: &str = ".sw.toml";

/// A single inclusion pattern read from a pattern file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    /// The pattern text as written (trailing whitespace removed).
    pub raw: String,
    /// Whether the pattern names a directory (written with a trailing separator).
    pub is_directory: bool,
}

impl Pattern {
    /// Parse one line of a pattern file.
    ///
    /// Returns `None` for blank lines and `#` comments.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim_end();
        let content = line.trim_start();

        if content.is_empty() || content.starts_with('#') {
            return None;
        }

        let is_directory = line.chars().next_back().is_some_and(std::path::is_separator);

        Some(Self {
            raw: line.to_string(),
            is_directory,
        })
    }

    /// The pattern as a clean, `/`-separated path relative to the base root.
    ///
    /// A leading `/` anchors the pattern at the base root, which is where every
    /// pattern is evaluated anyway, so it is dropped. `./` segments, repeated
    /// separators and the trailing directory separator are removed.
    ///
    /// Returns `None` when nothing is left or the pattern escapes the root.
    #[must_use]
    pub fn normalized(&self) -> Option<String> {
        let body = self.raw.trim_start_matches('/');
        if body.is_empty() {
            return None;
        }

        let cleaned = path_clean::clean(body);
        let mut parts = Vec::new();

        for component in cleaned.components() {
            match component {
                Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
            }
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join("/"))
        }
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

/// An ordered list of patterns loaded from one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternSet {
    /// File the patterns were read from (it may not exist).
    pub source: PathBuf,
    /// Patterns in declaration order.
    pub patterns: Vec<Pattern>,
}

impl PatternSet {
    /// An empty set attributed to `source`.
    #[must_use]
    pub fn empty(source: &Path) -> Self {
        Self {
            source: source.to_path_buf(),
            patterns: Vec::new(),
        }
    }

    /// Iterate over the patterns in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Pattern> {
        self.patterns.iter()
    }

    /// Number of patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the set has no patterns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// File name of the source, for messages.
    #[must_use]
    pub fn source_name(&self) -> String {
        self.source.file_name().map_or_else(
            || self.source.to_string_lossy().to_string(),
            |name| name.to_string_lossy().to_string(),
        )
    }
}

impl<'a> IntoIterator for &'a PatternSet {
    type Item = &'a Pattern;
    type IntoIter = std::slice::Iter<'a, Pattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// What to do when a copied file already exists in the destination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Replace the existing file with the base checkout's copy.
    #[default]
    Overwrite,
    /// Leave the existing file untouched.
    Keep,
}

impl std::fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overwrite => write!(f, "overwrite"),
            Self::Keep => write!(f, "keep"),
        }
    }
}

impl FromStr for CollisionPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "overwrite" => Ok(Self::Overwrite),
            "keep" => Ok(Self::Keep),
            other => Err(ConfigError::UnknownCollisionPolicy(other.to_string())),
        }
    }
}

/// Settings read from the optional settings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Copy-pattern file, relative to the base root unless absolute.
    pub copy_patterns_file: String,

    /// Symlink-pattern file, relative to the base root unless absolute.
    pub symlink_patterns_file: String,

    /// Policy for files that already exist in the destination.
    pub on_collision: CollisionPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            copy_patterns_file: DEFAULT_COPY_PATTERNS_FILE.to_string(),
            symlink_patterns_file: DEFAULT_SYMLINK_PATTERNS_FILE.to_string(),
            on_collision: CollisionPolicy::default(),
        }
    }
}

/// Everything needed to provision a worktree from one base checkout.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// The base checkout the patterns apply to.
    pub base_root: PathBuf,
    /// Effective settings.
    pub settings: Settings,
    /// Patterns for entries to copy.
    pub copy_patterns: PatternSet,
    /// Patterns for entries to symlink.
    pub symlink_patterns: PatternSet,
}
