//! Progress bars for directory copies.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use sw_copy::CopyProgress;
use sw_provision::{Action, ActionKind};

/// Progress bar manager for copy actions.
///
/// Bars are drawn on stderr so stdout only carries report lines.
pub struct ProgressManager {
    multi: MultiProgress,
    enabled: bool,
    bars: Mutex<HashMap<PathBuf, ProgressBar>>,
}

impl ProgressManager {
    /// Create a new progress manager.
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            multi: MultiProgress::with_draw_target(ProgressDrawTarget::stderr()),
            enabled,
            bars: Mutex::new(HashMap::new()),
        }
    }

    /// Feed a progress update for `action`.
    ///
    /// Only directory copies with more than one file get a bar. The bar is
    /// removed once the copy completes.
    pub fn update(&self, action: &Action, progress: &CopyProgress) {
        if !self.enabled
            || action.kind != ActionKind::Copy
            || !action.entry.is_directory
            || progress.files_total <= 1
        {
            return;
        }

        let mut bars = self.bars.lock().unwrap_or_else(PoisonError::into_inner);

        if progress.is_complete() {
            if let Some(bar) = bars.remove(&action.target) {
                bar.finish_and_clear();
            }
            return;
        }

        bars.entry(action.target.clone())
            .or_insert_with(|| self.create_file_bar(&action.entry.display_path(), progress.files_total))
            .set_position(progress.files_copied);
    }

    /// Create a progress bar for a directory copy.
    fn create_file_bar(&self, label: &str, total: u64) -> ProgressBar {
        let pb = self.multi.add(ProgressBar::new(total));
        if let Ok(style) =
            ProgressStyle::default_bar().template("  {prefix:<30} [{bar:25.green/dim}] {pos}/{len} files")
        {
            pb.set_style(style.progress_chars("━━─"));
        }
        pb.set_prefix(label.to_string());
        pb
    }

    /// Clear any active progress bars (for clean output after completion).
    pub fn clear(&self) {
        let mut bars = self.bars.lock().unwrap_or_else(PoisonError::into_inner);
        for (_, bar) in bars.drain() {
            bar.finish_and_clear();
        }
        self.multi.clear().ok();
    }
}
