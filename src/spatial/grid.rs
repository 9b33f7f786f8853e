//! Superposition grid: a bounded `width x height` array of cells, each
//! holding the set of tile ids still permitted at that position
//!
//! Adapted from the teacher's `spatial::grid::GridState`, which manages a
//! dynamically-extending, unbounded grid of probability/entropy arrays for a
//! different (greedy, growing-outward) algorithm. `spec.md` calls for a
//! fixed-size grid (`width, height in [3, 50]`) with no extension, so the
//! dynamic-extension machinery (`spatial::extension` in the teacher) has no
//! counterpart here and is not carried forward; what is kept is the
//! teacher's idea of a dedicated grid-state type owning one array per
//! concern, built on `ndarray::Array2` for cache-friendly 2D indexing.

use crate::algorithm::bitset::TileBitset;
use crate::io::configuration::{MAX_GRID_DIMENSION, MIN_GRID_DIMENSION};
use crate::io::error::{Result, invalid_input};
use crate::spatial::tiles::Direction;
use ndarray::Array2;

/// One slot in the output grid
#[derive(Clone, Debug)]
pub struct Cell {
    possible: TileBitset,
    collapsed: bool,
}

impl Cell {
    fn new(all_tiles: TileBitset) -> Self {
        Self {
            possible: all_tiles,
            collapsed: false,
        }
    }

    /// The set of tile ids still permitted at this cell
    pub const fn possible(&self) -> &TileBitset {
        &self.possible
    }

    /// Whether this cell has been committed to a single tile
    pub const fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// The committed tile id, if collapsed
    pub fn tile_id(&self) -> Option<usize> {
        self.collapsed.then(|| self.possible.single()).flatten()
    }

    /// Whether this cell has no remaining possibilities and is not
    /// collapsed — a contradiction
    pub fn is_contradiction(&self) -> bool {
        !self.collapsed && self.possible.is_empty()
    }

    /// Force this cell to a single tile id, marking it collapsed
    pub fn force_collapse(&mut self, tile_id: usize, tile_count: usize) {
        let mut only = TileBitset::new(tile_count);
        only.insert(tile_id);
        self.possible = only;
        self.collapsed = true;
    }

    /// Narrow the possibility set without collapsing (propagation outcome)
    pub fn narrow_to(&mut self, possible: TileBitset) {
        self.possible = possible;
    }
}

/// A `width x height` array of superposition cells
#[derive(Clone, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    tile_count: usize,
    cells: Array2<Cell>,
}

impl Grid {
    /// Create a new grid with every cell permitting every tile id
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `width` or `height` is outside `[3, 50]`.
    pub fn new(width: usize, height: usize, tile_count: usize) -> Result<Self> {
        if !(MIN_GRID_DIMENSION..=MAX_GRID_DIMENSION).contains(&width) {
            return Err(invalid_input(
                "width",
                &width,
                &format!("must be in [{MIN_GRID_DIMENSION}, {MAX_GRID_DIMENSION}]"),
            ));
        }
        if !(MIN_GRID_DIMENSION..=MAX_GRID_DIMENSION).contains(&height) {
            return Err(invalid_input(
                "height",
                &height,
                &format!("must be in [{MIN_GRID_DIMENSION}, {MAX_GRID_DIMENSION}]"),
            ));
        }

        let cells = Array2::from_shape_fn((height, width), |_| Cell::new(TileBitset::all(tile_count)));

        Ok(Self {
            width,
            height,
            tile_count,
            cells,
        })
    }

    /// Grid width
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Grid height
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of distinct tile ids this grid's cells range over
    pub const fn tile_count(&self) -> usize {
        self.tile_count
    }

    /// Total cell count, `width * height`
    pub const fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Immutable access to the cell at `(x, y)`
    ///
    /// # Panics
    ///
    /// Panics if `x >= self.width()` or `y >= self.height()`; every call
    /// site in this crate derives `(x, y)` from `coordinates()` or
    /// `neighbours()`, both of which only ever yield in-bounds positions.
    #[allow(clippy::indexing_slicing)]
    pub fn cell(&self, x: usize, y: usize) -> &Cell {
        &self.cells[(y, x)]
    }

    /// Mutable access to the cell at `(x, y)`
    ///
    /// # Panics
    ///
    /// Panics if `x >= self.width()` or `y >= self.height()`, see
    /// [`Self::cell`].
    #[allow(clippy::indexing_slicing)]
    pub fn cell_mut(&mut self, x: usize, y: usize) -> &mut Cell {
        &mut self.cells[(y, x)]
    }

    /// Whether `(x, y)` is within grid bounds
    pub const fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// The orthogonal neighbour of `(x, y)` in `dir`, if in bounds
    pub fn neighbour(&self, x: usize, y: usize, dir: Direction) -> Option<(usize, usize)> {
        let (dx, dy) = dir.offset();
        let nx = x as i64 + i64::from(dx);
        let ny = y as i64 + i64::from(dy);
        self.in_bounds(nx, ny).then_some((nx as usize, ny as usize))
    }

    /// All four orthogonal neighbours that lie in bounds
    pub fn neighbours(&self, x: usize, y: usize) -> impl Iterator<Item = (usize, usize, Direction)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |dir| self.neighbour(x, y, dir).map(|(nx, ny)| (nx, ny, dir)))
    }

    /// Number of collapsed cells
    pub fn collapsed_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_collapsed()).count()
    }

    /// Whether every cell is collapsed
    pub fn is_fully_collapsed(&self) -> bool {
        self.collapsed_count() == self.cell_count()
    }

    /// First cell found in contradiction, if any, as `(x, y)`
    pub fn find_contradiction(&self) -> Option<(usize, usize)> {
        for y in 0..self.height {
            for x in 0..self.width {
                if self.cell(x, y).is_contradiction() {
                    return Some((x, y));
                }
            }
        }
        None
    }

    /// Iterate over all `(x, y)` coordinates in row-major order
    pub fn coordinates(&self) -> impl Iterator<Item = (usize, usize)> + use<> {
        let width = self.width;
        let height = self.height;
        (0..height).flat_map(move |y| (0..width).map(move |x| (x, y)))
    }

    /// Solved tile ids as a row-major `width x height` array; `None` for any
    /// cell not collapsed
    pub fn solved_ids(&self) -> Vec<Option<usize>> {
        self.coordinates().map(|(x, y)| self.cell(x, y).tile_id()).collect()
    }
}
