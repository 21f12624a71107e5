//! Line-oriented pattern file loader.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::ConfigError;
use crate::types::{Pattern, PatternSet};

/// Parse the contents of a pattern file.
///
/// Blank lines and lines whose first non-whitespace character is `#` are skipped.
#[must_use]
pub fn parse_patterns(content: &str) -> Vec<Pattern> {
    content.lines().filter_map(Pattern::parse).collect()
}

/// Load a pattern file.
///
/// A file that does not exist yields an empty set: provisioning is opt-in, so
/// a repository without pattern files simply provisions nothing.
///
/// # Errors
///
/// * If the file exists but cannot be read as UTF-8 text
pub fn load_pattern_file(path: &Path) -> Result<PatternSet, ConfigError> {
    log::debug!("Loading patterns from {}", path.display());

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::debug!("No pattern file at {}", path.display());
            return Ok(PatternSet::empty(path));
        }
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    let patterns = parse_patterns(&content);
    log::debug!("Loaded {} patterns from {}", patterns.len(), path.display());

    Ok(PatternSet {
        source: path.to_path_buf(),
        patterns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_parse_patterns() {
        let patterns = parse_patterns(
            "# secrets\n.env\n\n   \nconfig/local/\n  # indented\nbackend/db/store/*.db\n",
        );

        let raw: Vec<&str> = patterns.iter().map(|p| p.raw.as_str()).collect();
        assert_eq!(raw, vec![".env", "config/local/", "backend/db/store/*.db"]);
        assert!(!patterns[0].is_directory);
        assert!(patterns[1].is_directory);
    }

    #[test]
    fn test_parse_patterns_crlf() {
        let patterns = parse_patterns(".env\r\nlogs/\r\n");
        assert_eq!(patterns.len(), 2);
        assert_eq!(patterns[0].raw, ".env");
        assert!(patterns[1].is_directory);
    }

    #[test]
    fn test_load_pattern_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# copied into every worktree").unwrap();
        writeln!(file, ".env").unwrap();
        writeln!(file, "CLAUDE.local.md").unwrap();

        let set = load_pattern_file(file.path()).unwrap();

        assert_eq!(set.source, file.path());
        assert_eq!(set.len(), 2);
        assert_eq!(set.patterns[1].raw, "CLAUDE.local.md");
    }

    #[test]
    fn test_load_missing_pattern_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".worktreelink");

        let set = load_pattern_file(&path).unwrap();

        assert!(set.is_empty());
        assert_eq!(set.source, path);
    }

    #[test]
    fn test_load_directory_is_error() {
        let dir = TempDir::new().unwrap();
        assert!(load_pattern_file(dir.path()).is_err());
    }
}
