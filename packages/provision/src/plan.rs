//! Turning resolved sets into concrete actions.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::{Path, PathBuf};

use crate::resolve::{ResolvedEntry, ResolvedSet};

/// How an entry is provisioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// Copy the file or directory tree.
    Copy,
    /// Link to the entry in the base checkout.
    Symlink,
}

impl ActionKind {
    /// Fixed report label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Copy => "copy",
            Self::Symlink => "link",
        }
    }
}

/// A single provisioning step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// Copy or symlink.
    pub kind: ActionKind,
    /// The resolved entry being provisioned.
    pub entry: ResolvedEntry,
    /// Absolute path of the entry in the base checkout.
    pub source: PathBuf,
    /// Absolute path the entry is provisioned at.
    pub target: PathBuf,
}

impl Action {
    fn new(kind: ActionKind, entry: &ResolvedEntry, base_root: &Path, dest_root: &Path) -> Self {
        Self {
            kind,
            source: base_root.join(&entry.path),
            target: dest_root.join(&entry.path),
            entry: entry.clone(),
        }
    }
}

/// Build the ordered action list.
///
/// Copy entries not claimed by the symlink set come first, then every
/// symlink entry, each in resolution order.
#[must_use]
pub fn plan_actions(
    copy: &ResolvedSet,
    symlink: &ResolvedSet,
    base_root: &Path,
    dest_root: &Path,
) -> Vec<Action> {
    let copies = copy
        .iter()
        .filter(|entry| !symlink.contains(&entry.path))
        .map(|entry| Action::new(ActionKind::Copy, entry, base_root, dest_root));

    let links = symlink
        .iter()
        .map(|entry| Action::new(ActionKind::Symlink, entry, base_root, dest_root));

    copies.chain(links).collect()
}
