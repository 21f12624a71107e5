//! Parallel file copying implementation.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use rayon::prelude::*;

use crate::error::CopyError;
use crate::progress::{CopyProgress, ProgressTracker};

/// What to do with a file that already exists at the target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExistingFile {
    /// Replace it with the source file.
    #[default]
    Overwrite,
    /// Leave it untouched.
    Keep,
}

/// Result of a copy operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyResult {
    /// Files were copied into a new target.
    Created {
        /// Number of files copied.
        files_copied: u64,
    },
    /// Files were merged into a directory that already existed.
    Merged {
        /// Number of files written.
        files_copied: u64,
        /// Number of existing files left untouched.
        files_kept: u64,
    },
    /// Target already exists, operation skipped.
    Exists,
    /// Source does not exist, operation skipped.
    SourceNotFound,
}

/// Entry collected during directory enumeration.
#[derive(Debug, Clone)]
struct FileEntry {
    source: PathBuf,
    target: PathBuf,
    is_symlink: bool,
}

/// Everything below a source directory, mapped onto the target.
#[derive(Debug, Default)]
struct Tree {
    dirs: Vec<PathBuf>,
    files: Vec<FileEntry>,
}

/// Copy a single file with progress callback.
///
/// Only copies if target doesn't exist.
///
/// # Errors
///
/// * If the copy operation fails
pub fn copy_file<F>(source: &Path, target: &Path, on_progress: F) -> Result<CopyResult, CopyError>
where
    F: Fn(&CopyProgress),
{
    log::debug!("Copying file: {} -> {}", source.display(), target.display());

    if !source.exists() {
        log::debug!("Source does not exist");
        return Ok(CopyResult::SourceNotFound);
    }

    if target.exists() || target.is_symlink() {
        log::debug!("Target already exists");
        return Ok(CopyResult::Exists);
    }

    write_single_file(source, target, &on_progress)
}

/// Copy a single file, overwriting if it exists.
///
/// An existing symlink at the target is replaced rather than written through.
///
/// # Errors
///
/// * If the copy operation fails
pub fn overwrite_file<F>(
    source: &Path,
    target: &Path,
    on_progress: F,
) -> Result<CopyResult, CopyError>
where
    F: Fn(&CopyProgress),
{
    log::debug!(
        "Overwriting file: {} -> {}",
        source.display(),
        target.display()
    );

    if !source.exists() {
        log::debug!("Source does not exist");
        return Ok(CopyResult::SourceNotFound);
    }

    if target.is_symlink() {
        remove_entry(target)?;
    }

    write_single_file(source, target, &on_progress)
}

fn write_single_file<F>(
    source: &Path,
    target: &Path,
    on_progress: &F,
) -> Result<CopyResult, CopyError>
where
    F: Fn(&CopyProgress),
{
    let label = Some(source.to_string_lossy().to_string());
    on_progress(&CopyProgress::new(1, 0, label.clone()));

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| CopyError::CreateDirError {
            path: parent.to_path_buf(),
            io_error: e,
        })?;
    }

    copy_file_with_reflink(source, target)?;

    on_progress(&CopyProgress::new(1, 1, label));

    Ok(CopyResult::Created { files_copied: 1 })
}

/// Copy a directory tree with parallel enumeration and copying.
///
/// The full tree is reproduced at `target`, including empty sub-directories.
/// Symlinks inside the tree are recreated as symlinks. When `target` already
/// exists the source contents are merged into it, and files present on both
/// sides are handled according to `on_existing`.
///
/// # Arguments
///
/// * `source` - Source directory path
/// * `target` - Target directory path
/// * `on_existing` - Policy for files that already exist in the target
/// * `on_progress` - Callback for progress updates (called periodically, not for every file)
///
/// # Errors
///
/// * If `target` exists but is not a real directory
/// * If enumeration fails
/// * If any file copy fails (fail-fast behavior)
pub fn copy_directory<F>(
    source: &Path,
    target: &Path,
    on_existing: ExistingFile,
    on_progress: F,
) -> Result<CopyResult, CopyError>
where
    F: Fn(&CopyProgress) + Sync,
{
    log::debug!(
        "Copying directory: {} -> {}",
        source.display(),
        target.display()
    );

    if !source.exists() {
        log::debug!("Source does not exist");
        return Ok(CopyResult::SourceNotFound);
    }

    let merging = target.exists() || target.is_symlink();
    if merging && (target.is_symlink() || !target.is_dir()) {
        return Err(CopyError::NotADirectory {
            path: target.to_path_buf(),
        });
    }
    if merging {
        log::debug!("Target exists, merging into {}", target.display());
    }

    // Phase 1: Enumerate everything using jwalk (parallel)
    let tree = enumerate_directory(source, target)?;
    let total_files = tree.files.len() as u64;

    log::debug!(
        "Found {} files in {} directories to copy",
        total_files,
        tree.dirs.len()
    );

    for dir in std::iter::once(target).chain(tree.dirs.iter().map(PathBuf::as_path)) {
        fs::create_dir_all(dir).map_err(|e| CopyError::CreateDirError {
            path: dir.to_path_buf(),
            io_error: e,
        })?;
    }

    let tracker = ProgressTracker::new();
    tracker.set_total(total_files);
    on_progress(&tracker.snapshot(None));

    // Phase 2: Copy files in parallel using rayon
    let kept = AtomicU64::new(0);
    let tracker_ref = &tracker;
    let on_progress_ref = &on_progress;

    tree.files
        .par_iter()
        .try_for_each(|entry| -> Result<(), CopyError> {
            if entry.target.exists() || entry.target.is_symlink() {
                match on_existing {
                    ExistingFile::Keep => {
                        log::trace!("Keeping existing {}", entry.target.display());
                        kept.fetch_add(1, Ordering::SeqCst);
                    }
                    ExistingFile::Overwrite => {
                        if entry.is_symlink || entry.target.is_symlink() {
                            remove_entry(&entry.target)?;
                        }
                        copy_entry(entry)?;
                    }
                }
            } else {
                copy_entry(entry)?;
            }

            tracker_ref.increment_copied();

            // Report progress (not every file to avoid overhead)
            let done = tracker_ref.copied();
            if done % 100 == 0 || done == total_files {
                on_progress_ref(
                    &tracker_ref.snapshot(Some(entry.source.to_string_lossy().to_string())),
                );
            }

            Ok(())
        })?;

    on_progress(&tracker.snapshot(None));

    let files_kept = kept.load(Ordering::SeqCst);
    let files_copied = total_files - files_kept;

    Ok(if merging {
        CopyResult::Merged {
            files_copied,
            files_kept,
        }
    } else {
        CopyResult::Created { files_copied }
    })
}

/// Enumerate a directory tree using jwalk for parallel traversal.
fn enumerate_directory(source: &Path, target: &Path) -> Result<Tree, CopyError> {
    let mut tree = Tree::default();

    for entry in jwalk::WalkDir::new(source)
        .skip_hidden(false)
        .follow_links(false)
        .sort(true)
        .min_depth(1)
    {
        let entry = entry.map_err(|e| CopyError::EnumerationError {
            path: source.to_path_buf(),
            message: e.to_string(),
        })?;

        let source_path = entry.path();
        let rel_path =
            source_path
                .strip_prefix(source)
                .map_err(|_| CopyError::EnumerationError {
                    path: source_path.clone(),
                    message: "Failed to strip prefix".to_string(),
                })?;
        let target_path = target.join(rel_path);

        let file_type = entry.file_type();
        if file_type.is_dir() {
            tree.dirs.push(target_path);
        } else {
            tree.files.push(FileEntry {
                source: source_path.clone(),
                target: target_path,
                is_symlink: file_type.is_symlink(),
            });
        }
    }

    Ok(tree)
}

fn copy_entry(entry: &FileEntry) -> Result<(), CopyError> {
    if entry.is_symlink {
        copy_symlink(&entry.source, &entry.target)
    } else {
        copy_file_with_reflink(&entry.source, &entry.target)
    }
}

fn remove_entry(path: &Path) -> Result<(), CopyError> {
    fs::remove_file(path).map_err(|e| CopyError::RemoveError {
        path: path.to_path_buf(),
        io_error: e,
    })
}

/// Copy a single file, trying reflink first then falling back to regular copy.
fn copy_file_with_reflink(source: &Path, target: &Path) -> Result<(), CopyError> {
    // Copy-on-write is instant on APFS/Btrfs/ReFS; it refuses existing targets.
    if reflink_copy::reflink(source, target).is_ok() {
        log::trace!("Reflinked {} -> {}", source.display(), target.display());
        return Ok(());
    }

    fs::copy(source, target).map_err(|e| CopyError::FileCopyError {
        source_path: source.to_path_buf(),
        target_path: target.to_path_buf(),
        io_error: e,
    })?;
    log::trace!("Copied {} -> {}", source.display(), target.display());
    Ok(())
}

/// Recreate a symlink at `target` with the same link text as `source`.
fn copy_symlink(source: &Path, target: &Path) -> Result<(), CopyError> {
    let link_target = fs::read_link(source).map_err(|e| CopyError::ReadLinkError {
        path: source.to_path_buf(),
        io_error: e,
    })?;

    let to_error = |e| CopyError::CreateSymlinkError {
        path: target.to_path_buf(),
        io_error: e,
    };

    #[cfg(unix)]
    std::os::unix::fs::symlink(&link_target, target).map_err(to_error)?;

    #[cfg(windows)]
    {
        let resolved = source.parent().map_or(link_target.clone(), |p| p.join(&link_target));
        if resolved.is_dir() {
            std::os::windows::fs::symlink_dir(&link_target, target).map_err(to_error)?;
        } else {
            std::os::windows::fs::symlink_file(&link_target, target).map_err(to_error)?;
        }
    }

    log::trace!(
        "Symlinked {} -> {} (target: {})",
        source.display(),
        target.display(),
        link_target.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[test]
    fn test_copy_file_creates_new() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("source.txt");
        let target = dir.path().join("nested/deeper/target.txt");

        fs::write(&source, "hello world").unwrap();

        let progress_count = AtomicU64::new(0);
        let result = copy_file(&source, &target, |_| {
            progress_count.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

        assert_eq!(result, CopyResult::Created { files_copied: 1 });
        assert_eq!(fs::read_to_string(&target).unwrap(), "hello world");
        assert!(progress_count.load(Ordering::SeqCst) >= 1);
    }

    #[test]
    fn test_copy_file_exists() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("source.txt");
        let target = dir.path().join("target.txt");

        fs::write(&source, "source content").unwrap();
        fs::write(&target, "target content").unwrap();

        let result = copy_file(&source, &target, |_| {}).unwrap();

        assert_eq!(result, CopyResult::Exists);
        assert_eq!(fs::read_to_string(&target).unwrap(), "target content");
    }

    #[test]
    fn test_copy_file_source_not_found() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("nonexistent.txt");
        let target = dir.path().join("target.txt");

        let result = copy_file(&source, &target, |_| {}).unwrap();

        assert_eq!(result, CopyResult::SourceNotFound);
        assert!(!target.exists());
    }

    #[test]
    fn test_copy_file_is_byte_exact() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("blob.bin");
        let target = dir.path().join("copy.bin");
        let bytes: Vec<u8> = (0..=255).cycle().take(10_000).collect();

        fs::write(&source, &bytes).unwrap();
        copy_file(&source, &target, |_| {}).unwrap();

        assert_eq!(fs::read(&target).unwrap(), bytes);
    }

    #[test]
    fn test_overwrite_file() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("source.txt");
        let target = dir.path().join("target.txt");

        fs::write(&source, "new content").unwrap();
        fs::write(&target, "old content").unwrap();

        let result = overwrite_file(&source, &target, |_| {}).unwrap();

        assert_eq!(result, CopyResult::Created { files_copied: 1 });
        assert_eq!(fs::read_to_string(&target).unwrap(), "new content");
    }

    #[cfg(unix)]
    #[test]
    fn test_overwrite_file_replaces_symlink() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("source.txt");
        let elsewhere = dir.path().join("elsewhere.txt");
        let target = dir.path().join("target.txt");

        fs::write(&source, "new content").unwrap();
        fs::write(&elsewhere, "must survive").unwrap();
        std::os::unix::fs::symlink(&elsewhere, &target).unwrap();

        overwrite_file(&source, &target, |_| {}).unwrap();

        assert!(!target.is_symlink());
        assert_eq!(fs::read_to_string(&target).unwrap(), "new content");
        assert_eq!(fs::read_to_string(&elsewhere).unwrap(), "must survive");
    }

    #[test]
    fn test_copy_directory() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("source_dir");
        let target = dir.path().join("a/b/target_dir");

        fs::create_dir_all(source.join("subdir")).unwrap();
        fs::create_dir_all(source.join("empty")).unwrap();
        fs::write(source.join("file1.txt"), "content1").unwrap();
        fs::write(source.join(".hidden"), "dot").unwrap();
        fs::write(source.join("subdir/file2.txt"), "content2").unwrap();

        let progress_updates = Arc::new(AtomicU64::new(0));
        let progress_updates_clone = Arc::clone(&progress_updates);

        let result = copy_directory(&source, &target, ExistingFile::Overwrite, move |_| {
            progress_updates_clone.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

        assert_eq!(result, CopyResult::Created { files_copied: 3 });
        assert_eq!(
            fs::read_to_string(target.join("file1.txt")).unwrap(),
            "content1"
        );
        assert_eq!(
            fs::read_to_string(target.join("subdir/file2.txt")).unwrap(),
            "content2"
        );
        assert_eq!(fs::read_to_string(target.join(".hidden")).unwrap(), "dot");
        assert!(target.join("empty").is_dir());
        assert!(progress_updates.load(Ordering::SeqCst) >= 1);
    }

    #[test]
    fn test_copy_directory_merges_into_existing() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("src/b");
        let target = dir.path().join("dest/b");

        fs::create_dir_all(source.join("inner")).unwrap();
        fs::write(source.join("local.db"), "db").unwrap();
        fs::write(source.join("inner/cache.bin"), "cache").unwrap();
        fs::create_dir_all(&target).unwrap();
        fs::write(target.join("keep.txt"), "keep").unwrap();

        let result = copy_directory(&source, &target, ExistingFile::Overwrite, |_| {}).unwrap();

        assert_eq!(
            result,
            CopyResult::Merged {
                files_copied: 2,
                files_kept: 0
            }
        );
        assert_eq!(fs::read_to_string(target.join("keep.txt")).unwrap(), "keep");
        assert_eq!(fs::read_to_string(target.join("local.db")).unwrap(), "db");
        assert!(target.join("inner/cache.bin").is_file());
        assert!(!target.join("b").exists());
    }

    #[test]
    fn test_copy_directory_collision_policies() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("source");
        let target = dir.path().join("target");

        fs::create_dir_all(&source).unwrap();
        fs::create_dir_all(&target).unwrap();
        fs::write(source.join("shared.txt"), "from source").unwrap();
        fs::write(source.join("new.txt"), "new").unwrap();
        fs::write(target.join("shared.txt"), "from target").unwrap();

        let kept = copy_directory(&source, &target, ExistingFile::Keep, |_| {}).unwrap();
        assert_eq!(
            kept,
            CopyResult::Merged {
                files_copied: 1,
                files_kept: 1
            }
        );
        assert_eq!(
            fs::read_to_string(target.join("shared.txt")).unwrap(),
            "from target"
        );

        let overwritten =
            copy_directory(&source, &target, ExistingFile::Overwrite, |_| {}).unwrap();
        assert_eq!(
            overwritten,
            CopyResult::Merged {
                files_copied: 2,
                files_kept: 0
            }
        );
        assert_eq!(
            fs::read_to_string(target.join("shared.txt")).unwrap(),
            "from source"
        );
    }

    #[test]
    fn test_copy_directory_target_is_file() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("source");
        let target = dir.path().join("target");

        fs::create_dir_all(&source).unwrap();
        fs::write(&target, "not a directory").unwrap();

        let err = copy_directory(&source, &target, ExistingFile::Overwrite, |_| {}).unwrap_err();
        assert!(matches!(err, CopyError::NotADirectory { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_directory_preserves_symlinks() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("source");
        let target = dir.path().join("target");

        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("real.txt"), "real").unwrap();
        std::os::unix::fs::symlink("real.txt", source.join("alias.txt")).unwrap();

        copy_directory(&source, &target, ExistingFile::Overwrite, |_| {}).unwrap();

        assert!(target.join("alias.txt").is_symlink());
        assert_eq!(
            fs::read_link(target.join("alias.txt")).unwrap(),
            PathBuf::from("real.txt")
        );
    }
}
