//! Command-line interface for running synthesis over one or more PNG samples
//!
//! Adapted from the teacher's `Cli`/`FileProcessor` pair: a `clap` derive
//! struct for arguments and an orchestrator that walks a file or directory,
//! skips files whose output already exists, and drives progress reporting
//! around the actual work. The actual work here is `extract_tiles ->
//! build_adjacency -> synthesize -> render -> save` rather than the
//! teacher's greedy-stochastic pipeline, and there is no prefill/rotation/
//! mirroring surface since those are out of scope (`spec.md` Non-goals).

use crate::algorithm::adjacency::build_adjacency;
use crate::algorithm::executor::{SynthesisObserver, synthesize};
use crate::io::configuration::{DEFAULT_GRID_DIMENSION, DEFAULT_SEED, DEFAULT_TILE_SIZE, OUTPUT_SUFFIX};
use crate::io::error::{Result, invalid_input};
use crate::io::image::{load_sample, render, save};
use crate::io::progress::ProgressManager;
use crate::io::visualization::VisualizationCapture;
use crate::spatial::grid::Grid;
use crate::spatial::tiles::extract_tiles;
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "overlap-wfc")]
#[command(
    author,
    version,
    about = "Synthesize textures from a sample using overlapping-model wave function collapse"
)]
/// Command-line arguments for the synthesis tool
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input PNG sample file or directory of samples to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Size in pixels of the square overlapping window used to extract tiles
    #[arg(short = 't', long, default_value_t = DEFAULT_TILE_SIZE)]
    pub tile_size: usize,

    /// Output grid width in tiles
    #[arg(short = 'w', long)]
    pub width: Option<usize>,

    /// Output grid height in tiles
    #[arg(short = 'H', long)]
    pub height: Option<usize>,

    /// Export an animated GIF of the collapse sequence alongside the output
    #[arg(short, long)]
    pub visualize: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if their output already exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    fn grid_dimensions(&self) -> (usize, usize) {
        match (self.width, self.height) {
            (Some(w), Some(h)) => (w, h),
            (Some(w), None) => (w, w),
            (None, Some(h)) => (h, h),
            (None, None) => (DEFAULT_GRID_DIMENSION, DEFAULT_GRID_DIMENSION),
        }
    }
}

/// Forwards observer callbacks to a progress reporter and, when enabled, a
/// GIF frame capture at the same time
struct HostObserver<'o, 'v> {
    progress: Option<&'o mut ProgressManager>,
    visualization: Option<&'o mut VisualizationCapture<'v>>,
}

impl SynthesisObserver for HostObserver<'_, '_> {
    fn on_attempt_start(&mut self, attempt: usize) {
        if let Some(ref mut p) = self.progress {
            p.on_attempt_start(attempt);
        }
    }

    fn on_collapse(&mut self, grid: &Grid, position: (usize, usize), tile_id: usize) {
        if let Some(ref mut p) = self.progress {
            p.on_collapse(grid, position, tile_id);
        }
        if let Some(ref mut v) = self.visualization {
            v.on_collapse(grid, position, tile_id);
        }
    }

    fn on_backtrack(&mut self, attempt: usize, discarded_decisions: usize) {
        if let Some(ref mut p) = self.progress {
            p.on_backtrack(attempt, discarded_decisions);
        }
    }

    fn on_attempt_end(&mut self, attempt: usize, succeeded: bool) {
        if let Some(ref mut p) = self.progress {
            p.on_attempt_end(attempt, succeeded);
        }
    }
}

/// Orchestrates batch processing of PNG samples with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, sample loading, or synthesis
    /// fails for any file.
    pub fn process(&mut self) -> Result<()> {
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for file in &files {
            self.process_file(file, files.len())?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if self.cli.target.is_file() {
            if self.cli.target.extension().and_then(|s| s.to_str()) == Some("png") {
                if self.should_process_file(&self.cli.target) {
                    Ok(vec![self.cli.target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(invalid_input(
                    "target",
                    &self.cli.target.display(),
                    &"must be a PNG file",
                ))
            }
        } else if self.cli.target.is_dir() {
            let mut files = Vec::new();
            let entries = std::fs::read_dir(&self.cli.target).map_err(|source| {
                crate::io::error::AlgorithmError::FileSystem {
                    path: self.cli.target.clone(),
                    operation: "read directory",
                    source,
                }
            })?;
            for entry in entries {
                let entry = entry.map_err(|source| crate::io::error::AlgorithmError::FileSystem {
                    path: self.cli.target.clone(),
                    operation: "read directory entry",
                    source,
                })?;
                let path = entry.path();
                if path.extension().and_then(|s| s.to_str()) == Some("png")
                    && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_input(
                "target",
                &self.cli.target.display(),
                &"must be an existing PNG file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::output_path(input_path);
        if output_path.exists() {
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!("Skipping: {} (output exists)", input_path.display());
            }
            false
        } else {
            true
        }
    }

    #[allow(clippy::print_stderr)]
    fn process_file(&mut self, input_path: &Path, file_count: usize) -> Result<()> {
        let output_path = Self::output_path(input_path);
        let (pixels, sample_width, sample_height) = load_sample(input_path)?;
        let mut tile_set = extract_tiles(&pixels, sample_width, sample_height, self.cli.tile_size)?;
        build_adjacency(&mut tile_set);

        let (grid_width, grid_height) = self.cli.grid_dimensions();

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(input_path, grid_width * grid_height, file_count);
        }

        let mut visualization = self.cli.visualize.then(|| VisualizationCapture::new(&tile_set));

        let grid = {
            let mut host = HostObserver {
                progress: self.progress_manager.as_mut(),
                visualization: visualization.as_mut(),
            };
            synthesize(&tile_set, grid_width, grid_height, self.cli.seed, &mut host, |_| false)?
        };

        let image = render(&grid, &tile_set);
        save(&image, &output_path)?;

        if let Some(capture) = visualization {
            let viz_path = Self::visualization_path(input_path);
            if let Err(err) = capture.export_gif(&viz_path) {
                if !self.cli.quiet {
                    eprintln!("Warning: visualization export failed: {err}");
                }
            }
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file();
        }

        Ok(())
    }

    fn output_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let extension = input_path.extension().unwrap_or_default();
        let output_name = format!(
            "{}{}.{}",
            stem.to_string_lossy(),
            OUTPUT_SUFFIX,
            extension.to_string_lossy()
        );

        input_path.parent().map_or_else(
            || PathBuf::from(&output_name),
            |parent| parent.join(&output_name),
        )
    }

    fn visualization_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let viz_name = format!("{}_visualization.gif", stem.to_string_lossy());

        input_path.parent().map_or_else(
            || PathBuf::from(&viz_name),
            |parent| parent.join(&viz_name),
        )
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used)]

    use super::*;

    #[test]
    fn output_path_inserts_suffix_before_extension() {
        let input = PathBuf::from("/samples/bricks.png");
        let output = FileProcessor::output_path(&input);
        assert_eq!(output, PathBuf::from("/samples/bricks_result.png"));
    }

    #[test]
    fn visualization_path_uses_gif_extension() {
        let input = PathBuf::from("/samples/bricks.png");
        let viz = FileProcessor::visualization_path(&input);
        assert_eq!(viz, PathBuf::from("/samples/bricks_visualization.gif"));
    }

    #[test]
    fn grid_dimensions_defaults_to_square_default() {
        let cli = Cli {
            target: PathBuf::from("x.png"),
            seed: 1,
            tile_size: 3,
            width: None,
            height: None,
            visualize: false,
            quiet: true,
            no_skip: false,
        };
        assert_eq!(cli.grid_dimensions(), (DEFAULT_GRID_DIMENSION, DEFAULT_GRID_DIMENSION));
    }

    #[test]
    fn grid_dimensions_width_only_is_square() {
        let cli = Cli {
            target: PathBuf::from("x.png"),
            seed: 1,
            tile_size: 3,
            width: Some(10),
            height: None,
            visualize: false,
            quiet: true,
            no_skip: false,
        };
        assert_eq!(cli.grid_dimensions(), (10, 10));
    }
}
