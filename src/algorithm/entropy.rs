//! Entropy Selector: picks the next cell to collapse
//!
//! Adapted from the teacher's `algorithm::selection` module, which ranks
//! candidate placements by a weighted score and breaks ties with a small
//! random jitter. The scoring formula itself is rebuilt for the classic
//! min-entropy rule this core uses: Shannon entropy over the possibility
//! set's tile weights, nudged down for cells with more collapsed orthogonal
//! neighbours (so the solver tends to grow outward from committed regions)
//! and perturbed by a tiny uniform jitter to break exact ties without biasing
//! the search.

use crate::algorithm::collapse::tile_weight;
use crate::io::configuration::{ENTROPY_DEGREE_BONUS, ENTROPY_JITTER_SCALE};
use crate::spatial::grid::Grid;
use crate::spatial::tiles::TileSet;
use rand::Rng;

/// Weighted Shannon entropy of a cell's possibility set
///
/// Uses the same frequency/connectivity blend as `collapse::tile_weight`
/// (`w(t) = (3*frequency[t] + connectivity_weight[t]) / 4`) in place of raw
/// frequency, per spec.md §4.3/§4.4. Tiles with a single remaining
/// possibility have entropy `0.0`; an empty possibility set (a
/// contradiction) also yields `0.0` so callers must check `is_contradiction`
/// separately rather than relying on entropy to flag it.
fn shannon_entropy(tile_ids: &[usize], tile_set: &TileSet) -> f64 {
    let total: f64 = tile_ids.iter().map(|&id| tile_weight(tile_set, id)).sum();
    if total <= 0.0 || tile_ids.len() <= 1 {
        return 0.0;
    }

    -tile_ids
        .iter()
        .map(|&id| {
            let p = tile_weight(tile_set, id) / total;
            if p > 0.0 { p * p.ln() } else { 0.0 }
        })
        .sum::<f64>()
}

/// Select the uncollapsed cell with lowest adjusted entropy, or `None` if
/// every cell is already collapsed
///
/// Adjusted entropy is `shannon_entropy - 0.1 * collapsed_neighbour_count +
/// jitter`, where `jitter` is drawn uniformly from `[0, ENTROPY_JITTER_SCALE)`
/// independently per cell per call.
pub fn select_lowest_entropy_cell(grid: &Grid, tile_set: &TileSet, rng: &mut impl Rng) -> Option<(usize, usize)> {
    let mut best: Option<((usize, usize), f64)> = None;

    for (x, y) in grid.coordinates() {
        let cell = grid.cell(x, y);
        if cell.is_collapsed() {
            continue;
        }

        let tile_ids = cell.possible().to_vec();
        let collapsed_neighbours = grid
            .neighbours(x, y)
            .filter(|&(nx, ny, _)| grid.cell(nx, ny).is_collapsed())
            .count();

        let jitter = rng.random_range(0.0..ENTROPY_JITTER_SCALE);
        let score = shannon_entropy(&tile_ids, tile_set)
            + ENTROPY_DEGREE_BONUS * collapsed_neighbours as f64
            + jitter;

        match best {
            Some((_, best_score)) if best_score <= score => {}
            _ => best = Some(((x, y), score)),
        }
    }

    best.map(|(coords, _)| coords)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used)]

    use super::*;
    use crate::algorithm::adjacency::build_adjacency;
    use crate::spatial::pixel::Pixel;
    use crate::spatial::tiles::extract_tiles;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn sample_tile_set() -> TileSet {
        let r = Pixel::new(255, 0, 0, 255);
        let g = Pixel::new(0, 255, 0, 255);
        let sample = vec![r, g, g, r];
        let mut set = extract_tiles(&sample, 2, 2, 1).unwrap();
        build_adjacency(&mut set);
        set
    }

    #[test]
    fn fully_collapsed_grid_has_no_candidate() {
        let tile_set = sample_tile_set();
        let mut grid = Grid::new(3, 3, tile_set.len()).unwrap();
        for (x, y) in grid.coordinates() {
            grid.cell_mut(x, y).force_collapse(0, tile_set.len());
        }
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(select_lowest_entropy_cell(&grid, &tile_set, &mut rng), None);
    }

    #[test]
    fn collapsed_neighbours_lower_a_cells_score_versus_isolated_cell() {
        let tile_set = sample_tile_set();
        let mut grid = Grid::new(3, 3, tile_set.len()).unwrap();
        grid.cell_mut(0, 1).force_collapse(0, tile_set.len());
        grid.cell_mut(1, 0).force_collapse(0, tile_set.len());
        grid.cell_mut(1, 2).force_collapse(0, tile_set.len());
        grid.cell_mut(2, 1).force_collapse(0, tile_set.len());
        // (1,1) now has four collapsed neighbours; (somewhere else) has zero.
        let mut rng = StdRng::seed_from_u64(7);
        let chosen = select_lowest_entropy_cell(&grid, &tile_set, &mut rng);
        assert_eq!(chosen, Some((1, 1)));
    }

    #[test]
    fn single_possibility_has_zero_base_entropy() {
        let tile_set = sample_tile_set();
        assert_eq!(shannon_entropy(&[0], &tile_set), 0.0);
        assert_eq!(shannon_entropy(&[], &tile_set), 0.0);
    }

    #[test]
    fn selection_ignores_collapsed_cells() {
        let tile_set = sample_tile_set();
        let mut grid = Grid::new(3, 3, tile_set.len()).unwrap();
        grid.cell_mut(0, 0).force_collapse(0, tile_set.len());
        let mut rng = StdRng::seed_from_u64(3);
        let chosen = select_lowest_entropy_cell(&grid, &tile_set, &mut rng).unwrap();
        assert_ne!(chosen, (0, 0));
    }
}
