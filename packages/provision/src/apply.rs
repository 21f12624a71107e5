//! Best-effort execution of planned actions.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use sw_config::CollisionPolicy;
use sw_copy::CopyProgress;

use crate::OperationResult;
use crate::copy::{copy_entry_directory, copy_entry_file};
use crate::error::OperationError;
use crate::plan::{Action, ActionKind};
use crate::symlink::create_symlink;

/// An action that completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRecord {
    /// The executed action.
    pub action: Action,
    /// What happened at the destination.
    pub result: OperationResult,
}

/// An action that failed and was skipped.
#[derive(Debug)]
pub struct ActionFailure {
    /// The skipped action.
    pub action: Action,
    /// Why it failed.
    pub error: OperationError,
}

/// What a provisioning run actually did.
#[derive(Debug, Default)]
pub struct Manifest {
    /// Entries written by copy actions, in action order.
    pub copied: Vec<ActionRecord>,
    /// Links created, in action order.
    pub linked: Vec<ActionRecord>,
    /// Actions whose destination was already in the desired state.
    pub unchanged: Vec<ActionRecord>,
    /// Actions that failed.
    pub failures: Vec<ActionFailure>,
}

impl Manifest {
    /// Whether nothing was copied or linked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.copied.is_empty() && self.linked.is_empty()
    }
}

/// Perform one action.
///
/// # Errors
///
/// * If the copy or symlink operation fails
pub fn execute_action<F>(
    action: &Action,
    policy: CollisionPolicy,
    on_progress: F,
) -> Result<OperationResult, OperationError>
where
    F: Fn(&CopyProgress) + Sync,
{
    match (action.kind, action.entry.is_directory) {
        (ActionKind::Copy, true) => {
            copy_entry_directory(&action.source, &action.target, policy, on_progress)
        }
        (ActionKind::Copy, false) => {
            copy_entry_file(&action.source, &action.target, policy, on_progress)
        }
        (ActionKind::Symlink, _) => create_symlink(&action.source, &action.target),
    }
}

/// Perform every action in order.
///
/// A failing action is logged and recorded; the remaining actions still run.
pub fn apply_actions<F>(actions: &[Action], policy: CollisionPolicy, on_progress: F) -> Manifest
where
    F: Fn(&Action, &CopyProgress) + Sync,
{
    let mut manifest = Manifest::default();

    for action in actions {
        let display = action.entry.display_path();
        log::debug!("{} {display}", action.kind.label());

        match execute_action(action, policy, |progress| on_progress(action, progress)) {
            Ok(OperationResult::Exists) => {
                log::debug!("{display} is already in place");
                manifest.unchanged.push(ActionRecord {
                    action: action.clone(),
                    result: OperationResult::Exists,
                });
            }
            Ok(result) => {
                let record = ActionRecord {
                    action: action.clone(),
                    result,
                };
                match action.kind {
                    ActionKind::Copy => manifest.copied.push(record),
                    ActionKind::Symlink => manifest.linked.push(record),
                }
            }
            Err(e) => {
                log::warn!("Failed to {} {display}: {e}", action.kind.label());
                manifest.failures.push(ActionFailure {
                    action: action.clone(),
                    error: e,
                });
            }
        }
    }

    log::info!(
        "Provisioned {} copies and {} links ({} unchanged, {} failed)",
        manifest.copied.len(),
        manifest.linked.len(),
        manifest.unchanged.len(),
        manifest.failures.len()
    );

    manifest
}
