//! Lightweight tile-set diagnostics
//!
//! The teacher's `analysis::statistics` fits a smooth kernel density
//! estimate over tile occurrence to drive its density-correction bias; this
//! core has no density-correction feature (there is no Non-goal against it,
//! but nothing in `spec.md` calls for it either), so what is kept from the
//! teacher's module is narrower: a small summary type built the same way —
//! derived once from a `TileSet` and handed to the host — used here to
//! enrich `GenerationFailed` diagnostics and the CLI's summary output.

use crate::algorithm::collapse::tile_weight;
use crate::spatial::tiles::TileSet;

/// Summary statistics over a `TileSet`'s frequencies and connectivity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileSetSummary {
    /// Number of distinct tiles
    pub tile_count: usize,
    /// Total occurrences across all tiles (equals the sample's pixel count)
    pub total_occurrences: u64,
    /// Mean tile weight (the same blend used by the collapse chooser)
    pub mean_weight: f64,
    /// Highest tile weight present
    pub max_weight: f64,
    /// Number of tiles with an empty adjacency set in at least one direction
    pub isolated_tile_count: usize,
}

/// Compute a `TileSetSummary` for `tile_set`
pub fn summarize(tile_set: &TileSet) -> TileSetSummary {
    let tile_count = tile_set.len();
    let total_occurrences = (0..tile_count).map(|id| tile_set.frequency(id)).sum();

    let weights: Vec<f64> = (0..tile_count).map(|id| tile_weight(tile_set, id)).collect();
    let mean_weight = if weights.is_empty() {
        0.0
    } else {
        weights.iter().sum::<f64>() / weights.len() as f64
    };
    let max_weight = weights.iter().copied().fold(0.0_f64, f64::max);

    let isolated_tile_count = (0..tile_count)
        .filter(|&id| {
            crate::spatial::tiles::Direction::ALL
                .iter()
                .any(|&dir| tile_set.adjacency(id, dir).is_empty())
        })
        .count();

    TileSetSummary {
        tile_count,
        total_occurrences,
        mean_weight,
        max_weight,
        isolated_tile_count,
    }
}
