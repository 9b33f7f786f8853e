//! Top-k tile ranking by blended weight
//!
//! Adapted from the teacher's `analysis::weights::top_k_valid_indices`
//! min-heap idiom (`O(n log k)` selection via a bounded `BinaryHeap` of
//! `Reverse`-ordered entries) for ranking the most connected or most
//! frequent tiles in a `TileSet`, used by the CLI summary and by
//! `analysis::statistics` diagnostics.

use crate::algorithm::collapse::tile_weight;
use crate::spatial::tiles::TileSet;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

#[derive(Debug, Clone, Copy, PartialEq)]
struct RankedTile {
    tile_id: usize,
    weight: f64,
}

impl Eq for RankedTile {}

impl PartialOrd for RankedTile {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RankedTile {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.weight
            .partial_cmp(&other.weight)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| self.tile_id.cmp(&other.tile_id))
    }
}

/// The `k` tile ids with the highest `tile_weight`, descending
///
/// Uses a bounded min-heap so the cost is `O(tile_set.len() * log k)` rather
/// than a full sort.
pub fn top_k_by_weight(tile_set: &TileSet, k: usize) -> Vec<usize> {
    if k == 0 {
        return Vec::new();
    }

    let mut heap: BinaryHeap<Reverse<RankedTile>> = BinaryHeap::with_capacity(k + 1);

    for tile_id in 0..tile_set.len() {
        let weight = tile_weight(tile_set, tile_id);
        let candidate = RankedTile { tile_id, weight };

        if heap.len() < k {
            heap.push(Reverse(candidate));
        } else if let Some(Reverse(min_elem)) = heap.peek() {
            if candidate > *min_elem {
                heap.pop();
                heap.push(Reverse(candidate));
            }
        }
    }

    let mut ranked: Vec<RankedTile> = heap.into_iter().map(|Reverse(r)| r).collect();
    ranked.sort_by(|a, b| b.cmp(a));
    ranked.into_iter().map(|r| r.tile_id).collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used)]

    use super::*;
    use crate::algorithm::adjacency::build_adjacency;
    use crate::spatial::pixel::Pixel;
    use crate::spatial::tiles::extract_tiles;

    fn sample_tile_set() -> TileSet {
        let r = Pixel::new(1, 2, 3, 255);
        let g = Pixel::new(4, 5, 6, 255);
        let b = Pixel::new(7, 8, 9, 255);
        let sample = vec![r, g, b, g, r, b, b, g, r];
        let mut set = extract_tiles(&sample, 3, 3, 1).unwrap();
        build_adjacency(&mut set);
        set
    }

    #[test]
    fn top_k_returns_descending_by_weight() {
        let tile_set = sample_tile_set();
        let ranked = top_k_by_weight(&tile_set, tile_set.len());
        let weights: Vec<f64> = ranked.iter().map(|&id| tile_weight(&tile_set, id)).collect();
        for pair in weights.windows(2) {
            assert!(pair[0] >= pair[1]);
        }
    }

    #[test]
    fn top_k_caps_at_requested_size() {
        let tile_set = sample_tile_set();
        let ranked = top_k_by_weight(&tile_set, 1);
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn top_k_zero_returns_empty() {
        let tile_set = sample_tile_set();
        assert!(top_k_by_weight(&tile_set, 0).is_empty());
    }
}
