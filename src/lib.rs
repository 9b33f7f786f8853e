//! Overlapping-model wave function collapse texture synthesis core
//!
//! Extracts the distinct `NxN` tile patterns present in a small sample image,
//! derives which tiles may legally sit next to which under the overlap-match
//! rule, and synthesizes a new grid of tile ids that is consistent with those
//! adjacency constraints by iteratively collapsing the lowest-entropy cell.

#![forbid(unsafe_code)]

/// Core solving algorithm: bitsets, adjacency, entropy, collapse, propagation,
/// history/backtracking, and the outer attempt controller.
pub mod algorithm;
/// Derived statistics and selection weights built on top of a `TileSet`.
pub mod analysis;
/// Input/output: sample loading, rendering, CLI, progress, error handling.
pub mod io;
/// Pixels, extracted tile patterns, and the superposition grid.
pub mod spatial;

pub use io::error::{AlgorithmError, Result};
