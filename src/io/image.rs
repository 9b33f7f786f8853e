//! PNG sample loading and solved-grid rendering
//!
//! Adapted from the teacher's `io::image::export_grid_as_png`, which walks a
//! bounding box of the grid and blits one tile colour per cell into an
//! `ImageBuffer`. The bounding-box cropping step has no counterpart here —
//! this core's grid is always fully collapsed before rendering, so every
//! cell contributes — but the blit-and-save shape, including wrapping
//! filesystem and image-crate errors into `AlgorithmError`, carries over
//! directly.

use crate::io::error::{AlgorithmError, Result};
use crate::spatial::grid::Grid;
use crate::spatial::pixel::Pixel;
use crate::spatial::tiles::TileSet;
use image::{GenericImageView, ImageBuffer, Rgba};
use std::path::Path;

/// Load a sample image from `path`, returning its pixels in row-major order
/// alongside its width and height
///
/// # Errors
///
/// Returns `ImageLoad` if the file cannot be opened or decoded.
pub fn load_sample(path: &Path) -> Result<(Vec<Pixel>, usize, usize)> {
    let img = image::open(path).map_err(|source| AlgorithmError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;

    let (width, height) = img.dimensions();
    let rgba = img.to_rgba8();
    let pixels = rgba.pixels().map(|p| Pixel::from_bytes(p.0)).collect();

    Ok((pixels, width as usize, height as usize))
}

/// Render a fully collapsed grid into an RGBA image
///
/// The output is `N + (grid_width - 1) * step` by `N + (grid_height - 1) *
/// step` pixels, with `step = 1` and `N = tile_set.tile_size()`: each cell's
/// tile pattern is blitted at an offset equal to its grid coordinates, so
/// adjacent tiles' overlapping regions are drawn twice and the later write
/// (the cell further along in scan order) wins. Cells that are not collapsed
/// are skipped, leaving whatever the earlier overlapping blit left behind.
pub fn render(grid: &Grid, tile_set: &TileSet) -> ImageBuffer<Rgba<u8>, Vec<u8>> {
    let tile_size = tile_set.tile_size();
    let step = 1usize;
    let width = tile_size + grid.width().saturating_sub(1) * step;
    let height = tile_size + grid.height().saturating_sub(1) * step;

    let mut image = ImageBuffer::new(width as u32, height as u32);

    for (cx, cy) in grid.coordinates() {
        let Some(tile_id) = grid.cell(cx, cy).tile_id() else {
            continue;
        };
        let pattern = tile_set.pattern(tile_id);

        for ty in 0..tile_size {
            for tx in 0..tile_size {
                let px = cx * step + tx;
                let py = cy * step + ty;
                if px < width && py < height {
                    let pixel = pattern.pixel(tx, ty);
                    image.put_pixel(px as u32, py as u32, Rgba(pixel.to_bytes()));
                }
            }
        }
    }

    image
}

/// Save a rendered image to `path`, creating parent directories as needed
///
/// # Errors
///
/// Returns `FileSystem` if the parent directory cannot be created, or
/// `ImageExport` if the PNG encoder fails.
pub fn save(image: &ImageBuffer<Rgba<u8>, Vec<u8>>, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|source| AlgorithmError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source,
            })?;
        }
    }

    image.save(path).map_err(|source| AlgorithmError::ImageExport {
        path: path.to_path_buf(),
        source,
    })
}
