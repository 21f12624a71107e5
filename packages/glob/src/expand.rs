//! Glob expansion relative to an explicit root directory.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};

use crate::error::GlobError;

/// Characters that make a pattern component non-literal.
const GLOB_META: &[char] = &['*', '?', '[', ']', '{', '}', '\\'];

/// What a matched path turned out to be (symlinks are followed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A regular file.
    File,
    /// A directory.
    Directory,
    /// Anything else, including dangling symlinks.
    Other,
}

/// A filesystem entry matched by a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobMatch {
    /// Path relative to the expansion root.
    pub relative: PathBuf,
    /// Kind of the entry.
    pub kind: EntryKind,
}

impl GlobMatch {
    /// Whether the match is a regular file.
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    /// Whether the match is a directory.
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Expands patterns into existing filesystem entries.
pub trait GlobExpander {
    /// Expand `pattern` against the filesystem below `root`.
    ///
    /// The pattern is `/`-separated and relative to `root`. A pattern that
    /// matches nothing yields an empty list.
    ///
    /// # Errors
    ///
    /// * If the pattern is not a valid glob
    fn expand(&self, root: &Path, pattern: &str) -> Result<Vec<GlobMatch>, GlobError>;
}

/// Glob expansion over the real filesystem.
///
/// * `*` and `?` never match `/`
/// * matching is case sensitive
/// * dotfiles are matched by wildcards like any other name
/// * `**` matches any number of directories
/// * `.git` directories are never descended into
///
/// Results come back in depth-first, name-sorted order. The process working
/// directory is never consulted.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsGlob;

impl FsGlob {
    /// Create a new filesystem glob expander.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl GlobExpander for FsGlob {
    fn expand(&self, root: &Path, pattern: &str) -> Result<Vec<GlobMatch>, GlobError> {
        let components: Vec<&str> = pattern.split('/').filter(|c| !c.is_empty()).collect();
        if components.is_empty() {
            return Ok(Vec::new());
        }

        let pattern = components.join("/");
        let matcher = compile(&pattern)?;

        // Walk from the deepest literal directory; the last component is always
        // matched during the walk so that names compare case-sensitively.
        let prefix_len = components
            .iter()
            .take(components.len() - 1)
            .take_while(|c| !c.contains(GLOB_META))
            .count();
        let start = components[..prefix_len]
            .iter()
            .fold(root.to_path_buf(), |path, c| path.join(c));

        if !start.is_dir() {
            log::debug!("Glob '{pattern}': {} is not a directory", start.display());
            return Ok(Vec::new());
        }

        let recursive = components.iter().any(|c| c.contains("**"));
        let max_depth = if recursive {
            usize::MAX
        } else {
            components.len() - prefix_len
        };

        let walker = jwalk::WalkDir::new(&start)
            .skip_hidden(false)
            .follow_links(false)
            .sort(true)
            .min_depth(1)
            .max_depth(max_depth)
            .process_read_dir(|_depth, _path, _state, children| {
                children.retain(|child| {
                    child
                        .as_ref()
                        .map_or(true, |entry| entry.file_name().to_str() != Some(".git"))
                });
            });

        let mut matches = Vec::new();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::debug!("Glob '{pattern}': skipping unreadable entry: {e}");
                    continue;
                }
            };

            let path = entry.path();
            let Ok(relative) = path.strip_prefix(root) else {
                continue;
            };

            if matcher.is_match(to_slash(relative)) {
                matches.push(GlobMatch {
                    relative: relative.to_path_buf(),
                    kind: entry_kind(&path),
                });
            }
        }

        log::debug!("Glob '{pattern}' matched {} entries", matches.len());
        Ok(matches)
    }
}

/// Compile a pattern with path-aware, case-sensitive semantics.
fn compile(pattern: &str) -> Result<GlobMatcher, GlobError> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .case_insensitive(false)
        .backslash_escape(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|e| GlobError::InvalidPattern {
            pattern: pattern.to_string(),
            source: e,
        })
}

/// Render a relative path with `/` separators.
fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn entry_kind(path: &Path) -> EntryKind {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => EntryKind::File,
        Ok(meta) if meta.is_dir() => EntryKind::Directory,
        _ => EntryKind::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, rel).unwrap();
    }

    fn relatives(matches: &[GlobMatch]) -> Vec<String> {
        matches.iter().map(|m| to_slash(&m.relative)).collect()
    }

    #[test]
    fn test_star_does_not_cross_separator() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "top.db");
        touch(dir.path(), "sub/nested.db");

        let matches = FsGlob::new().expand(dir.path(), "*.db").unwrap();

        assert_eq!(relatives(&matches), vec!["top.db"]);
    }

    #[test]
    fn test_star_matches_dotfiles() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), ".env");
        touch(dir.path(), ".env.local");
        touch(dir.path(), "readme.md");

        let matches = FsGlob::new().expand(dir.path(), ".env*").unwrap();
        assert_eq!(relatives(&matches), vec![".env", ".env.local"]);

        let all = FsGlob::new().expand(dir.path(), "*").unwrap();
        assert_eq!(relatives(&all), vec![".env", ".env.local", "readme.md"]);
    }

    #[test]
    fn test_question_mark_and_case_sensitivity() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a1.db");
        touch(dir.path(), "a22.db");
        touch(dir.path(), "b1.DB");

        let matches = FsGlob::new().expand(dir.path(), "?1.db").unwrap();
        assert_eq!(relatives(&matches), vec!["a1.db"]);

        let upper = FsGlob::new().expand(dir.path(), "*.DB").unwrap();
        assert_eq!(relatives(&upper), vec!["b1.DB"]);
    }

    #[test]
    fn test_nested_literal_prefix() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "backend/db/store/test.db");
        touch(dir.path(), "backend/db/store/cache.db");
        touch(dir.path(), "backend/db/store/readme.txt");
        touch(dir.path(), "backend/db/other.db");

        let matches = FsGlob::new()
            .expand(dir.path(), "backend/db/store/*.db")
            .unwrap();

        assert_eq!(
            relatives(&matches),
            vec!["backend/db/store/cache.db", "backend/db/store/test.db"]
        );
        assert!(matches.iter().all(GlobMatch::is_file));
    }

    #[test]
    fn test_wildcard_directory_component() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "apps/web/.env");
        touch(dir.path(), "apps/api/.env");
        touch(dir.path(), "apps/api/deep/.env");

        let matches = FsGlob::new().expand(dir.path(), "apps/*/.env").unwrap();

        assert_eq!(relatives(&matches), vec!["apps/api/.env", "apps/web/.env"]);
    }

    #[test]
    fn test_literal_pattern() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "CLAUDE.local.md");

        let matches = FsGlob::new().expand(dir.path(), "CLAUDE.local.md").unwrap();
        assert_eq!(relatives(&matches), vec!["CLAUDE.local.md"]);

        let missing = FsGlob::new().expand(dir.path(), "missing.md").unwrap();
        assert!(missing.is_empty());

        let missing_dir = FsGlob::new().expand(dir.path(), "nope/*.md").unwrap();
        assert!(missing_dir.is_empty());
    }

    #[test]
    fn test_directory_kind() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "cache/data.bin");
        touch(dir.path(), "cache.txt");

        let matches = FsGlob::new().expand(dir.path(), "cache*").unwrap();

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].kind, EntryKind::Directory);
        assert_eq!(matches[1].kind, EntryKind::File);
    }

    #[test]
    fn test_double_star_recurses_and_skips_git() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a/.env");
        touch(dir.path(), "a/b/c/.env");
        touch(dir.path(), ".git/.env");

        let matches = FsGlob::new().expand(dir.path(), "**/.env").unwrap();

        assert_eq!(relatives(&matches), vec!["a/.env", "a/b/c/.env"]);
    }

    #[test]
    fn test_invalid_pattern() {
        let dir = TempDir::new().unwrap();
        let err = FsGlob::new().expand(dir.path(), "[abc").unwrap_err();
        assert!(matches!(err, GlobError::InvalidPattern { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_is_other() {
        let dir = TempDir::new().unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join("link.env"))
            .unwrap();

        let matches = FsGlob::new().expand(dir.path(), "*.env").unwrap();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].kind, EntryKind::Other);
    }
}
