//! Symlink creation.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs;
use std::path::Path;

use crate::OperationResult;
use crate::error::OperationError;

/// Create a symlink at `target` pointing at the absolute path `source`.
///
/// Nothing at `target` is ever removed. A link that already points at
/// `source` is reported as [`OperationResult::Exists`].
///
/// # Arguments
///
/// * `source` - Absolute path of the entry in the base checkout
/// * `target` - Where the link is created
///
/// # Errors
///
/// * If `source` does not exist
/// * If `target` is occupied by anything else
/// * If the link or its parent directories cannot be created
pub fn create_symlink(source: &Path, target: &Path) -> Result<OperationResult, OperationError> {
    log::debug!(
        "Creating symlink: {} -> {}",
        target.display(),
        source.display()
    );

    if !source.exists() {
        return Err(OperationError::SourceMissing {
            path: source.to_path_buf(),
        });
    }

    if target.is_symlink() {
        let current = fs::read_link(target).map_err(|e| OperationError::IoError {
            path: target.to_path_buf(),
            source: e,
        })?;

        if current == source {
            log::debug!("Symlink already points at {}", source.display());
            return Ok(OperationResult::Exists);
        }

        return Err(OperationError::TargetOccupied {
            path: target.to_path_buf(),
        });
    }

    if target.exists() {
        return Err(OperationError::TargetOccupied {
            path: target.to_path_buf(),
        });
    }

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| OperationError::IoError {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    link(source, target).map_err(|e| OperationError::SymlinkError {
        link: target.to_path_buf(),
        points_to: source.to_path_buf(),
        error: e,
    })?;

    Ok(OperationResult::Created)
}

#[cfg(unix)]
fn link(source: &Path, target: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(source, target)
}

#[cfg(windows)]
fn link(source: &Path, target: &Path) -> std::io::Result<()> {
    if source.is_dir() {
        std::os::windows::fs::symlink_dir(source, target)
    } else {
        std::os::windows::fs::symlink_file(source, target)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_creates_absolute_link() {
        let base = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        let source = base.path().join("CLAUDE.local.md");
        fs::write(&source, "notes").unwrap();
        let target = dest.path().join("docs/CLAUDE.local.md");

        let result = create_symlink(&source, &target).unwrap();

        assert_eq!(result, OperationResult::Created);
        assert_eq!(fs::read_link(&target).unwrap(), source);
        assert!(fs::read_link(&target).unwrap().is_absolute());

        fs::write(&source, "updated").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "updated");
    }

    #[test]
    fn test_existing_link_to_same_source() {
        let base = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        let source = base.path().join("shared");
        fs::create_dir(&source).unwrap();
        let target = dest.path().join("shared");
        std::os::unix::fs::symlink(&source, &target).unwrap();

        assert_eq!(
            create_symlink(&source, &target).unwrap(),
            OperationResult::Exists
        );
    }

    #[test]
    fn test_occupied_target_is_left_alone() {
        let base = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        let source = base.path().join(".env");
        fs::write(&source, "SECRET=1").unwrap();
        let target = dest.path().join(".env");
        fs::write(&target, "LOCAL=1").unwrap();

        let err = create_symlink(&source, &target).unwrap_err();

        assert!(matches!(err, OperationError::TargetOccupied { .. }));
        assert_eq!(fs::read_to_string(&target).unwrap(), "LOCAL=1");
    }

    #[test]
    fn test_link_to_other_source_is_occupied() {
        let base = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        let source = base.path().join("a");
        let other = base.path().join("b");
        fs::write(&source, "a").unwrap();
        fs::write(&other, "b").unwrap();
        let target = dest.path().join("a");
        std::os::unix::fs::symlink(&other, &target).unwrap();

        let err = create_symlink(&source, &target).unwrap_err();

        assert!(matches!(err, OperationError::TargetOccupied { .. }));
        assert_eq!(fs::read_link(&target).unwrap(), other);
    }

    #[test]
    fn test_missing_source() {
        let base = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();

        let err = create_symlink(&base.path().join("gone"), &dest.path().join("gone")).unwrap_err();

        assert!(matches!(err, OperationError::SourceMissing { .. }));
        assert!(!dest.path().join("gone").is_symlink());
    }
}
