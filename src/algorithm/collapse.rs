//! Collapse Chooser: picks which surviving tile a selected cell commits to
//!
//! Adapted from the teacher's `analysis::weights` weighting approach (blend
//! frequency with a structural score) and `algorithm::executor`'s placement
//! step. Candidates are ordered by `w(t) = (3*frequency[t] +
//! connectivity_weight[t]) / 4` (spec.md §4.3) and tried in that
//! probability-weighted random order; the first candidate that survives a
//! one-step look-ahead against every already-collapsed orthogonal neighbour
//! is committed. If every candidate fails look-ahead (can happen since
//! look-ahead only prunes, it never backtracks on its own) the highest
//! weighted candidate is used anyway and propagation is left to detect the
//! resulting contradiction.

use crate::io::configuration::{WEIGHT_CONNECTIVITY_SHARE, WEIGHT_FREQUENCY_SHARE};
use crate::spatial::grid::Grid;
use crate::spatial::tiles::TileSet;
use rand::Rng;
use rand::seq::SliceRandom;

/// Blend of source frequency and connectivity used to weight tile choice
pub fn tile_weight(tile_set: &TileSet, tile_id: usize) -> f64 {
    let share_total = WEIGHT_FREQUENCY_SHARE + WEIGHT_CONNECTIVITY_SHARE;
    (WEIGHT_FREQUENCY_SHARE * tile_set.frequency(tile_id) as f64
        + WEIGHT_CONNECTIVITY_SHARE * tile_set.connectivity_weight(tile_id))
        / share_total
}

/// Whether `candidate` remains consistent with every collapsed orthogonal
/// neighbour of `(x, y)`
fn survives_lookahead(grid: &Grid, tile_set: &TileSet, x: usize, y: usize, candidate: usize) -> bool {
    grid.neighbours(x, y).all(|(nx, ny, dir)| {
        let neighbour = grid.cell(nx, ny);
        if !neighbour.is_collapsed() {
            return true;
        }
        let Some(neighbour_tile) = neighbour.tile_id() else {
            return true;
        };
        tile_set.adjacency(candidate, dir).contains(neighbour_tile)
    })
}

/// Choose a tile id for the cell at `(x, y)` from its current possibility set
///
/// Returns `None` if the possibility set is empty (the caller should have
/// already ruled this out via `is_contradiction`).
pub fn choose_tile(grid: &Grid, tile_set: &TileSet, x: usize, y: usize, rng: &mut impl Rng) -> Option<usize> {
    choose_tile_weighted(grid, tile_set, x, y, rng, true)
}

/// As [`choose_tile`], but draws uniformly at random among surviving
/// candidates when `frequency_weighting_enabled` is `false`, for a host
/// that set `SolverConfig::frequency_weighting_enabled = false`
pub fn choose_tile_weighted(
    grid: &Grid,
    tile_set: &TileSet,
    x: usize,
    y: usize,
    rng: &mut impl Rng,
    frequency_weighting_enabled: bool,
) -> Option<usize> {
    let candidates = grid.cell(x, y).possible().to_vec();
    if candidates.is_empty() {
        return None;
    }

    let weights: Vec<f64> = if frequency_weighting_enabled {
        candidates.iter().map(|&id| tile_weight(tile_set, id)).collect()
    } else {
        vec![1.0; candidates.len()]
    };
    let order = weighted_shuffle(&candidates, &weights, rng);

    order
        .iter()
        .find(|&&candidate| survives_lookahead(grid, tile_set, x, y, candidate))
        .copied()
        .or_else(|| order.first().copied())
}

/// Produce a random permutation of `items` biased so that higher-weighted
/// items tend to appear earlier, via weighted sampling without replacement
fn weighted_shuffle(items: &[usize], weights: &[f64], rng: &mut impl Rng) -> Vec<usize> {
    if weights.iter().all(|&w| w <= 0.0) {
        let mut shuffled = items.to_vec();
        shuffled.shuffle(rng);
        return shuffled;
    }

    let mut remaining: Vec<(usize, f64)> = items.iter().copied().zip(weights.iter().copied()).collect();
    let mut order = Vec::with_capacity(items.len());

    while !remaining.is_empty() {
        let total: f64 = remaining.iter().map(|&(_, w)| w.max(0.0)).sum();
        let pick = if total <= 0.0 {
            rng.random_range(0..remaining.len())
        } else {
            let mut target = rng.random_range(0.0..total);
            let mut index = remaining.len() - 1;
            for (i, &(_, w)) in remaining.iter().enumerate() {
                let w = w.max(0.0);
                if target < w {
                    index = i;
                    break;
                }
                target -= w;
            }
            index
        };
        order.push(remaining.remove(pick).0);
    }

    order
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used)]

    use super::*;
    use crate::algorithm::adjacency::build_adjacency;
    use crate::spatial::pixel::Pixel;
    use crate::spatial::tiles::{Direction, extract_tiles};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn checkerboard_tile_set() -> TileSet {
        let r = Pixel::new(255, 0, 0, 255);
        let g = Pixel::new(0, 255, 0, 255);
        let sample = vec![r, g, g, r];
        let mut set = extract_tiles(&sample, 2, 2, 2).unwrap();
        build_adjacency(&mut set);
        set
    }

    #[test]
    fn tile_weight_blends_frequency_and_connectivity() {
        let tile_set = checkerboard_tile_set();
        for id in 0..tile_set.len() {
            let expected = (3.0 * tile_set.frequency(id) as f64 + tile_set.connectivity_weight(id)) / 4.0;
            assert!((tile_weight(&tile_set, id) - expected).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn weighted_shuffle_is_a_permutation() {
        let items = vec![0, 1, 2, 3];
        let weights = vec![10.0, 1.0, 1.0, 1.0];
        let mut rng = StdRng::seed_from_u64(5);
        let mut order = weighted_shuffle(&items, &weights, &mut rng);
        order.sort_unstable();
        assert_eq!(order, items);
    }

    #[test]
    fn choose_tile_respects_collapsed_neighbour_constraint() {
        let tile_set = checkerboard_tile_set();
        let mut grid = Grid::new(3, 3, tile_set.len()).unwrap();
        // Force the left neighbour of (1,0) to some tile, then the chosen
        // tile at (1,0) must be adjacency-compatible to its right.
        grid.cell_mut(0, 0).force_collapse(0, tile_set.len());
        let mut rng = StdRng::seed_from_u64(11);
        let chosen = choose_tile(&grid, &tile_set, 1, 0, &mut rng).unwrap();
        assert!(tile_set.adjacency(0, Direction::Right).contains(chosen));
    }

    #[test]
    fn choose_tile_weighted_with_weighting_disabled_still_picks_a_candidate() {
        let tile_set = checkerboard_tile_set();
        let grid = Grid::new(3, 3, tile_set.len()).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let chosen = choose_tile_weighted(&grid, &tile_set, 1, 1, &mut rng, false);
        assert!(chosen.is_some());
    }

    #[test]
    fn choose_tile_returns_none_for_empty_possibility_set() {
        let tile_set = checkerboard_tile_set();
        let mut grid = Grid::new(3, 3, tile_set.len()).unwrap();
        grid.cell_mut(0, 0).narrow_to(crate::algorithm::bitset::TileBitset::new(tile_set.len()));
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(choose_tile(&grid, &tile_set, 0, 0, &mut rng), None);
    }
}
