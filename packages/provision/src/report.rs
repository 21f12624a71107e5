//! Line-oriented action log.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use crate::apply::{ActionRecord, Manifest};
use crate::plan::{Action, ActionKind};

/// Format one report line.
#[must_use]
pub fn format_line(kind: ActionKind, path: &str) -> String {
    format!("{:<4}  {path}", kind.label())
}

/// Lines for everything a run copied, then everything it linked.
///
/// An empty manifest produces no lines.
#[must_use]
pub fn format_manifest(manifest: &Manifest) -> Vec<String> {
    manifest
        .copied
        .iter()
        .chain(&manifest.linked)
        .map(|record: &ActionRecord| {
            format_line(record.action.kind, &record.action.entry.display_path())
        })
        .collect()
}

/// Lines for planned actions, as a dry run shows them.
#[must_use]
pub fn format_actions(actions: &[Action]) -> Vec<String> {
    actions
        .iter()
        .map(|action| format_line(action.kind, &action.entry.display_path()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OperationResult;
    use crate::resolve::ResolvedEntry;
    use std::path::PathBuf;

    fn record(kind: ActionKind, path: &str, is_directory: bool) -> ActionRecord {
        ActionRecord {
            action: Action {
                kind,
                entry: ResolvedEntry {
                    path: PathBuf::from(path),
                    is_directory,
                    pattern: path.to_string(),
                },
                source: PathBuf::from("/base").join(path),
                target: PathBuf::from("/dest").join(path),
            },
            result: OperationResult::Created,
        }
    }

    #[test]
    fn test_empty_manifest_has_no_lines() {
        assert!(format_manifest(&Manifest::default()).is_empty());
    }

    #[test]
    fn test_copies_before_links() {
        let manifest = Manifest {
            copied: vec![
                record(ActionKind::Copy, ".env", false),
                record(ActionKind::Copy, "a/b", true),
            ],
            linked: vec![record(ActionKind::Symlink, "CLAUDE.local.md", false)],
            ..Manifest::default()
        };

        assert_eq!(
            format_manifest(&manifest),
            vec!["copy  .env", "copy  a/b/", "link  CLAUDE.local.md"]
        );
    }

    #[test]
    fn test_unchanged_entries_are_not_reported() {
        let manifest = Manifest {
            unchanged: vec![record(ActionKind::Symlink, "shared", true)],
            ..Manifest::default()
        };

        assert!(format_manifest(&manifest).is_empty());
    }

    #[test]
    fn test_planned_actions() {
        let actions = vec![record(ActionKind::Symlink, "node_modules", true).action];

        assert_eq!(format_actions(&actions), vec!["link  node_modules/"]);
    }
}
