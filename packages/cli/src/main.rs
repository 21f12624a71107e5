//! sw-provision CLI entry point.
//!
//! Copies or symlinks gitignored files from the base checkout into a freshly
//! created worktree, as listed in the base checkout's pattern files.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod args;
mod output;
mod progress;

use std::env;
use std::path::{Path, PathBuf};

use clap::Parser;

use args::Args;
use progress::ProgressManager;
use sw_config::{Settings, discover_settings, load_config};
use sw_git::{RepoIgnoreOracle, discover_repo, main_worktree_root};
use sw_glob::FsGlob;
use sw_provision::{
    ProvisionEngine, ProvisionError, ProvisionRequest, format_actions, format_manifest,
};

fn main() {
    let args = Args::parse();

    // Set up logging
    if args.verbose {
        // SAFETY: We're setting this before any other threads are spawned
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    pretty_env_logger::init();

    if let Err(e) = run(&args) {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}

/// Main application logic.
fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let cwd = env::current_dir()?;
    let target_path = absolutize(&cwd, &args.target_path);

    if !target_path.is_dir() {
        return Err(format!("Target path does not exist: {}", target_path.display()).into());
    }

    let base_root = match &args.base {
        Some(base) => absolutize(&cwd, base),
        None => main_worktree_root(&discover_repo(&target_path)?)?,
    };

    if same_dir(&base_root, &target_path) {
        return Err("Cannot provision the base checkout into itself.".into());
    }

    log::debug!(
        "Provisioning {} from {}",
        target_path.display(),
        base_root.display()
    );

    let settings = apply_overrides(discover_settings(&base_root)?, args, &cwd);
    let collision = settings.on_collision;
    let config = load_config(&base_root, settings)?;

    let oracle = RepoIgnoreOracle::open(&base_root)?;
    let glob = FsGlob::new();
    let engine = ProvisionEngine::new(&glob, &oracle, collision);
    let request = ProvisionRequest::from_config(&config, &target_path);

    if args.dry_run {
        let actions = engine.plan(&request).inspect_err(print_conflicts)?;
        output::print_lines(&format_actions(&actions));
        return Ok(());
    }

    let progress_mgr = ProgressManager::new(args.should_show_progress());
    let manifest = engine
        .run(&request, |action, progress| progress_mgr.update(action, progress))
        .inspect_err(print_conflicts)?;
    progress_mgr.clear();

    for failure in &manifest.failures {
        output::print_warning(&format!(
            "Skipped {}: {}",
            failure.action.entry.display_path(),
            failure.error
        ));
    }

    output::print_lines(&format_manifest(&manifest));
    Ok(())
}

/// Print one line per conflicting path.
fn print_conflicts(error: &ProvisionError) {
    if let ProvisionError::Conflicts(report) = error {
        for line in report.lines() {
            output::print_error(&line);
        }
    }
}

/// Apply command-line overrides on top of the base checkout's settings.
fn apply_overrides(mut settings: Settings, args: &Args, cwd: &Path) -> Settings {
    if let Some(path) = &args.copy_patterns {
        settings.copy_patterns_file = absolutize(cwd, path).to_string_lossy().to_string();
    }
    if let Some(path) = &args.symlink_patterns {
        settings.symlink_patterns_file = absolutize(cwd, path).to_string_lossy().to_string();
    }
    if let Some(policy) = args.on_collision {
        settings.on_collision = policy;
    }
    settings
}

/// Make `path` absolute against `cwd` and clean it.
fn absolutize(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path_clean::clean(path)
    } else {
        path_clean::clean(cwd.join(path))
    }
}

fn same_dir(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sw_config::CollisionPolicy;
    use tempfile::TempDir;

    #[test]
    fn test_absolutize() {
        let cwd = Path::new("/work/repo");

        assert_eq!(
            absolutize(cwd, Path::new("../feature")),
            PathBuf::from("/work/feature")
        );
        assert_eq!(
            absolutize(cwd, Path::new("/tmp/./x")),
            PathBuf::from("/tmp/x")
        );
    }

    #[test]
    fn test_overrides_replace_settings() {
        let args = Args::try_parse_from([
            "sw-provision",
            "feature",
            "--copy-patterns",
            "include.txt",
            "--on-collision",
            "keep",
        ])
        .unwrap();

        let settings = apply_overrides(Settings::default(), &args, Path::new("/work"));

        assert_eq!(settings.copy_patterns_file, "/work/include.txt");
        assert_eq!(
            settings.symlink_patterns_file,
            Settings::default().symlink_patterns_file
        );
        assert_eq!(settings.on_collision, CollisionPolicy::Keep);
    }

    #[test]
    fn test_same_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a");
        std::fs::create_dir(&nested).unwrap();

        assert!(same_dir(dir.path(), &nested.join("..")));
        assert!(!same_dir(dir.path(), &nested));
    }
}
