//! Tile extraction: periodic window scan of a sample with deduplication and
//! frequency tallying
//!
//! Grounded on the teacher's `spatial::tiles::TileExtractor`, generalized
//! from a fixed 3x3 window with optional rotation/reflection transforms to
//! an `NxN` toroidal scan with no transforms (the spec's Non-goals exclude
//! rotation/reflection entirely).

use crate::io::configuration::{MAX_TILE_SIZE, MIN_TILE_SIZE};
use crate::io::error::{Result, invalid_input};
use crate::spatial::pixel::Pixel;
use std::collections::HashMap;

/// Cardinal direction used throughout adjacency and propagation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Upward (negative y)
    Up,
    /// Downward (positive y)
    Down,
    /// Leftward (negative x)
    Left,
    /// Rightward (positive x)
    Right,
}

impl Direction {
    /// All four cardinal directions, in a fixed iteration order
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// The opposite direction: `UP <-> DOWN`, `LEFT <-> RIGHT`
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Index into per-direction arrays, stable across the crate
    pub const fn index(self) -> usize {
        match self {
            Self::Up => 0,
            Self::Down => 1,
            Self::Left => 2,
            Self::Right => 3,
        }
    }

    /// Unit offset `(dx, dy)` for stepping one cell in this direction
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// A single extracted `NxN` pixel pattern
///
/// `pixels` is stored row-major: index `y * size + x`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    id: usize,
    size: usize,
    pixels: Vec<Pixel>,
}

impl Pattern {
    fn new(id: usize, size: usize, pixels: Vec<Pixel>) -> Self {
        debug_assert_eq!(pixels.len(), size * size);
        Self { id, size, pixels }
    }

    /// The pattern's id, unique within its `TileSet`, assigned in
    /// first-seen scan order
    pub const fn id(&self) -> usize {
        self.id
    }

    /// Side length of the square pattern
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Fetch the pixel at local coordinates `(x, y)`, both in `[0, size)`
    #[allow(clippy::indexing_slicing)] // caller-supplied coordinates are always produced by in-bounds loops
    pub fn pixel(&self, x: usize, y: usize) -> Pixel {
        self.pixels[y * self.size + x]
    }

    fn raw_key(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_bytes()).collect()
    }

    /// Columns `0..size-1` (all rows), used as the left-overlap signature
    pub(crate) fn left_strip(&self) -> Vec<u8> {
        self.column_strip(0, self.size - 1)
    }

    /// Columns `1..size` (all rows), used as the right-overlap signature
    pub(crate) fn right_strip(&self) -> Vec<u8> {
        self.column_strip(1, self.size)
    }

    /// Rows `0..size-1` (all columns), used as the top-overlap signature
    pub(crate) fn top_strip(&self) -> Vec<u8> {
        self.row_strip(0, self.size - 1)
    }

    /// Rows `1..size` (all columns), used as the bottom-overlap signature
    pub(crate) fn bottom_strip(&self) -> Vec<u8> {
        self.row_strip(1, self.size)
    }

    fn column_strip(&self, start: usize, end: usize) -> Vec<u8> {
        let mut key = Vec::with_capacity((end - start) * self.size * 4);
        for y in 0..self.size {
            for x in start..end {
                key.extend_from_slice(&self.pixel(x, y).to_bytes());
            }
        }
        key
    }

    fn row_strip(&self, start: usize, end: usize) -> Vec<u8> {
        let mut key = Vec::with_capacity((end - start) * self.size * 4);
        for y in start..end {
            for x in 0..self.size {
                key.extend_from_slice(&self.pixel(x, y).to_bytes());
            }
        }
        key
    }
}

/// Ordered, deduplicated set of patterns extracted from a sample, plus their
/// occurrence frequencies and (once computed) adjacency rules
pub struct TileSet {
    tile_size: usize,
    patterns: Vec<Pattern>,
    frequency: Vec<u64>,
    adjacency: Vec<[crate::algorithm::bitset::TileBitset; 4]>,
    connectivity_weight: Vec<f64>,
}

impl TileSet {
    /// Side length of every pattern in this set
    pub const fn tile_size(&self) -> usize {
        self.tile_size
    }

    /// Number of distinct tiles
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the set has no tiles (never true for a set built by
    /// `extract_tiles` against a non-empty sample)
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// All patterns, indexed by tile id
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// The pattern with the given id
    ///
    /// # Panics
    ///
    /// Panics if `id >= self.len()`; all call sites within this crate derive
    /// `id` from `0..tile_set.len()` or from a bitset already scoped to this
    /// set's capacity.
    #[allow(clippy::indexing_slicing)]
    pub fn pattern(&self, id: usize) -> &Pattern {
        &self.patterns[id]
    }

    /// Occurrence count of tile `id` in the periodic scan of the sample
    ///
    /// # Panics
    ///
    /// Panics if `id >= self.len()`, see [`Self::pattern`].
    #[allow(clippy::indexing_slicing)]
    pub fn frequency(&self, id: usize) -> u64 {
        self.frequency[id]
    }

    /// Tile ids permitted in direction `dir` relative to tile `id`
    ///
    /// # Panics
    ///
    /// Panics if `id >= self.len()`, see [`Self::pattern`].
    #[allow(clippy::indexing_slicing)]
    pub fn adjacency(&self, id: usize, dir: Direction) -> &crate::algorithm::bitset::TileBitset {
        &self.adjacency[id][dir.index()]
    }

    /// `1 + |up| + |down| + |left| + |right|` for tile `id`
    ///
    /// # Panics
    ///
    /// Panics if `id >= self.len()`, see [`Self::pattern`].
    #[allow(clippy::indexing_slicing)]
    pub fn connectivity_weight(&self, id: usize) -> f64 {
        self.connectivity_weight[id]
    }

    /// Mutable access to a tile's adjacency set for the given direction,
    /// used only by `algorithm::adjacency` while building the oracle's
    /// output.
    #[allow(clippy::indexing_slicing)]
    pub(crate) fn adjacency_mut(
        &mut self,
        id: usize,
        dir: Direction,
    ) -> &mut crate::algorithm::bitset::TileBitset {
        &mut self.adjacency[id][dir.index()]
    }

    #[allow(clippy::indexing_slicing)]
    pub(crate) fn set_connectivity_weight(&mut self, id: usize, weight: f64) {
        self.connectivity_weight[id] = weight;
    }
}

/// Extract the set of distinct `NxN` tiles from a sample image
///
/// Scans every origin `(x, y)` in `[0, width) x [0, height)`, reading the
/// `NxN` window with toroidal (wrap-around) indexing: the sample is treated
/// as if it tiled infinitely, so extraction always reads exactly
/// `width * height` windows regardless of `tile_size`. Patterns are
/// deduplicated by exact pixel equality; the returned list is in
/// first-seen scan order and frequencies sum to `width * height`.
///
/// # Errors
///
/// Returns `InvalidInput` if `tile_size` is outside `[1, 20]`, or if
/// `width == 0 || height == 0`.
pub fn extract_tiles(
    sample: &[Pixel],
    width: usize,
    height: usize,
    tile_size: usize,
) -> Result<TileSet> {
    if tile_size < MIN_TILE_SIZE || tile_size > MAX_TILE_SIZE {
        return Err(invalid_input(
            "tile_size",
            &tile_size,
            &format!("must be in [{MIN_TILE_SIZE}, {MAX_TILE_SIZE}]"),
        ));
    }
    if width == 0 || height == 0 {
        return Err(invalid_input(
            "width/height",
            &format!("{width}x{height}"),
            &"sample dimensions must both be non-zero",
        ));
    }
    if sample.len() != width * height {
        return Err(invalid_input(
            "sample",
            &sample.len(),
            &format!("expected {} pixels for a {width}x{height} sample", width * height),
        ));
    }

    let mut key_to_id: HashMap<Vec<u8>, usize> = HashMap::new();
    let mut patterns: Vec<Pattern> = Vec::new();
    let mut frequency: Vec<u64> = Vec::new();

    for origin_y in 0..height {
        for origin_x in 0..width {
            let mut window = Vec::with_capacity(tile_size * tile_size);
            for dy in 0..tile_size {
                for dx in 0..tile_size {
                    let sx = (origin_x + dx) % width;
                    let sy = (origin_y + dy) % height;
                    let pixel = sample.get(sy * width + sx).copied().unwrap_or_default();
                    window.push(pixel);
                }
            }

            let candidate = Pattern::new(patterns.len(), tile_size, window);
            let key = candidate.raw_key();

            match key_to_id.get(&key) {
                Some(&id) => {
                    if let Some(count) = frequency.get_mut(id) {
                        *count += 1;
                    }
                }
                None => {
                    let id = patterns.len();
                    key_to_id.insert(key, id);
                    patterns.push(candidate);
                    frequency.push(1);
                }
            }
        }
    }

    let tile_count = patterns.len();
    let adjacency = (0..tile_count)
        .map(|_| {
            [
                crate::algorithm::bitset::TileBitset::new(tile_count),
                crate::algorithm::bitset::TileBitset::new(tile_count),
                crate::algorithm::bitset::TileBitset::new(tile_count),
                crate::algorithm::bitset::TileBitset::new(tile_count),
            ]
        })
        .collect();

    Ok(TileSet {
        tile_size,
        patterns,
        frequency,
        adjacency,
        connectivity_weight: vec![1.0; tile_count],
    })
}
