//! Copy actions on top of `sw_copy`.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::Path;

use sw_config::CollisionPolicy;
use sw_copy::{CopyProgress, CopyResult, ExistingFile};

use crate::OperationResult;
use crate::error::OperationError;

const fn existing_file(policy: CollisionPolicy) -> ExistingFile {
    match policy {
        CollisionPolicy::Overwrite => ExistingFile::Overwrite,
        CollisionPolicy::Keep => ExistingFile::Keep,
    }
}

fn into_result(result: CopyResult, source: &Path) -> Result<OperationResult, OperationError> {
    match result {
        CopyResult::Created { .. } => Ok(OperationResult::Created),
        CopyResult::Merged { .. } => Ok(OperationResult::Merged),
        CopyResult::Exists => Ok(OperationResult::Exists),
        CopyResult::SourceNotFound => Err(OperationError::SourceMissing {
            path: source.to_path_buf(),
        }),
    }
}

/// Copy a single file, preserving its bytes.
///
/// An existing file at `target` is replaced or kept according to `policy`.
///
/// # Errors
///
/// * If the source vanished
/// * If the copy fails
pub fn copy_entry_file<F>(
    source: &Path,
    target: &Path,
    policy: CollisionPolicy,
    on_progress: F,
) -> Result<OperationResult, OperationError>
where
    F: Fn(&CopyProgress),
{
    let result = match existing_file(policy) {
        ExistingFile::Overwrite => sw_copy::overwrite_file(source, target, on_progress)?,
        ExistingFile::Keep => sw_copy::copy_file(source, target, on_progress)?,
    };

    into_result(result, source)
}

/// Copy a directory tree to exactly `target`, merging into it if it exists.
///
/// # Errors
///
/// * If the source vanished
/// * If `target` exists but is not a directory
/// * If any file copy fails
pub fn copy_entry_directory<F>(
    source: &Path,
    target: &Path,
    policy: CollisionPolicy,
    on_progress: F,
) -> Result<OperationResult, OperationError>
where
    F: Fn(&CopyProgress) + Sync,
{
    let result = sw_copy::copy_directory(source, target, existing_file(policy), on_progress)?;

    into_result(result, source)
}
