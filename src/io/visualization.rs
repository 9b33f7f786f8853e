//! Frame capture and GIF export of a synthesis run
//!
//! Adapted from the teacher's `VisualizationCapture`/`export_gif`, which
//! records placement events and renders them into a GIF on demand. This
//! core already has a full-grid `render` function (`io::image::render`), so
//! there is no need to replay individual placement events through a
//! bespoke frame renderer: `VisualizationCapture` just renders the whole
//! grid again on every collapse, the same `Frame::from_parts` and
//! `GifEncoder::encode_frames` path the teacher uses to write the result.

use crate::algorithm::executor::SynthesisObserver;
use crate::io::configuration::GIF_FRAME_DELAY_MS;
use crate::io::error::{AlgorithmError, Result};
use crate::io::image::render;
use crate::spatial::grid::Grid;
use crate::spatial::tiles::TileSet;
use image::codecs::gif::GifEncoder;
use image::{Delay, Frame};
use std::path::Path;

/// Captures one rendered frame per deliberate collapse, for later export as
/// an animated GIF
pub struct VisualizationCapture<'a> {
    tile_set: &'a TileSet,
    frames: Vec<Frame>,
}

impl<'a> VisualizationCapture<'a> {
    /// Create a capture bound to `tile_set`, used to render each frame
    pub fn new(tile_set: &'a TileSet) -> Self {
        Self {
            tile_set,
            frames: Vec::new(),
        }
    }

    /// Number of frames captured so far
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Export the captured frames as a GIF
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if no frames were captured, `FileSystem` if
    /// the output directory cannot be created or the file cannot be opened,
    /// or `ImageExport` if the GIF encoder fails.
    pub fn export_gif(&self, path: &Path) -> Result<()> {
        if self.frames.is_empty() {
            return Err(crate::io::error::invalid_input(
                "visualization_capture",
                &0usize,
                &"no frames were captured during synthesis",
            ));
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| AlgorithmError::FileSystem {
                    path: parent.to_path_buf(),
                    operation: "create directory",
                    source,
                })?;
            }
        }

        let file = std::fs::File::create(path).map_err(|source| AlgorithmError::FileSystem {
            path: path.to_path_buf(),
            operation: "create file",
            source,
        })?;

        let mut encoder = GifEncoder::new(file);
        encoder
            .encode_frames(self.frames.iter().cloned())
            .map_err(|source| AlgorithmError::ImageExport {
                path: path.to_path_buf(),
                source,
            })
    }
}

impl SynthesisObserver for VisualizationCapture<'_> {
    fn on_collapse(&mut self, grid: &Grid, _position: (usize, usize), _tile_id: usize) {
        let image = render(grid, self.tile_set);
        let delay = Delay::from_numer_denom_ms(GIF_FRAME_DELAY_MS, 1);
        self.frames.push(Frame::from_parts(image, 0, 0, delay));
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used)]

    use super::*;
    use crate::algorithm::adjacency::build_adjacency;
    use crate::algorithm::executor::{NullObserver, synthesize};
    use crate::spatial::pixel::Pixel;
    use crate::spatial::tiles::extract_tiles;
    use tempfile::tempdir;

    fn checkerboard_tile_set() -> TileSet {
        let r = Pixel::new(255, 0, 0, 255);
        let g = Pixel::new(0, 255, 0, 255);
        let sample = vec![r, g, g, r];
        let mut set = extract_tiles(&sample, 2, 2, 2).unwrap();
        build_adjacency(&mut set);
        set
    }

    #[test]
    fn capture_records_one_frame_per_collapse() {
        let tile_set = checkerboard_tile_set();
        let mut capture = VisualizationCapture::new(&tile_set);
        let grid = synthesize(&tile_set, 4, 4, 3, &mut capture, |_| false).unwrap();
        assert_eq!(capture.frame_count(), grid.collapsed_count());
    }

    #[test]
    fn export_gif_rejects_an_empty_capture() {
        let tile_set = checkerboard_tile_set();
        let capture = VisualizationCapture::new(&tile_set);
        let dir = tempdir().unwrap();
        let result = capture.export_gif(&dir.path().join("out.gif"));
        assert!(result.is_err());
    }

    #[test]
    fn export_gif_writes_a_file() {
        let tile_set = checkerboard_tile_set();
        let mut capture = VisualizationCapture::new(&tile_set);
        let mut observer = NullObserver;
        let _ = synthesize(&tile_set, 3, 3, 5, &mut observer, |_| false).unwrap();
        capture.on_collapse(
            &crate::spatial::grid::Grid::new(3, 3, tile_set.len()).unwrap(),
            (0, 0),
            0,
        );
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.gif");
        capture.export_gif(&path).unwrap();
        assert!(path.exists());
    }
}
