//! Terminal progress reporting for synthesis runs
//!
//! Adapted from the teacher's `ProgressManager`, which juggles one
//! `MultiProgress` across several concurrently-tracked files, switching to
//! a single batch bar once the file count crosses a threshold to avoid
//! terminal spam. This core processes one sample at a time rather than
//! several files concurrently, so the per-file bar collapses into a single
//! per-run bar driven straight off `SynthesisObserver` callbacks (cells
//! collapsed out of the grid's total); the batch bar and its
//! threshold-switch survive unchanged for the CLI's outer loop over
//! multiple input files.

use crate::algorithm::executor::SynthesisObserver;
use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use crate::spatial::grid::Grid;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

static FILE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:30.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Files: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Coordinates a batch progress bar across files and a per-run progress bar
/// across collapses within the file currently being processed
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    file_bar: Option<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            file_bar: None,
        }
    }

    /// Initialize the batch bar if more than one file will be processed
    pub fn initialize(&mut self, file_count: usize) {
        if file_count > 1 {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }
    }

    /// Configure the per-run bar for a new file
    ///
    /// Suppressed once the batch is large enough that an extra per-cell bar
    /// per file would just add noise.
    pub fn start_file(&mut self, path: &Path, cell_count: usize, file_count: usize) {
        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS {
            self.file_bar = None;
            return;
        }

        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let bar = ProgressBar::new(cell_count as u64);
        bar.set_style(FILE_STYLE.clone());
        bar.set_message(name);
        self.file_bar = Some(self.multi_progress.add(bar));
    }

    /// Mark the current file as finished and advance the batch bar
    pub fn complete_file(&mut self) {
        if let Some(bar) = self.file_bar.take() {
            bar.finish_and_clear();
        }
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("done");
        }
        let _ = self.multi_progress.clear();
    }
}

impl SynthesisObserver for ProgressManager {
    fn on_attempt_start(&mut self, _attempt: usize) {
        if let Some(ref bar) = self.file_bar {
            bar.set_position(0);
        }
    }

    fn on_collapse(&mut self, grid: &Grid, _position: (usize, usize), _tile_id: usize) {
        if let Some(ref bar) = self.file_bar {
            bar.set_position(grid.collapsed_count() as u64);
        }
    }
}
