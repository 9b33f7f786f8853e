//! Adjacency Oracle: precomputes, for every ordered pair of tiles and each
//! cardinal direction, whether the overlap-compatibility rule permits that
//! pairing
//!
//! Grounded on the teacher's `spatial::tiles` pattern-matching approach
//! (build a signature, group tiles by it, match groups rather than
//! comparing every pair directly) and on the reference overlapping-model
//! implementation in `other_examples/.../gridbugs-wfc__wfc-src-overlapping.rs`,
//! whose `are_patterns_compatible` compares the `(N-1)xN` overlap slabs of
//! two patterns pixel-exact the same way `spec.md` §4.2 specifies.

use crate::spatial::tiles::{Direction, TileSet};
use std::collections::HashMap;

/// Compute and attach adjacency rules and connectivity weights to `tile_set`
///
/// For every ordered pair `(A, B)` including `A == B`, tile `B` is permitted
/// in direction `dir` relative to `A` iff the relevant `(N-1)xN` overlap
/// strips of `A` and `B` are pixel-exact equal. Self-pairs are never
/// skipped: a tile whose interior matches its own shifted window is its own
/// neighbour, and that must show up in the adjacency sets.
///
/// Implementation reduces the naive `O(n^2 * N^2)` pairwise comparison to
/// `O(n * N^2 + n^2)` by grouping tiles under a hashable signature of their
/// overlap strip and only comparing tiles whose signatures already matched.
pub fn build_adjacency(tile_set: &mut TileSet) {
    let tile_count = tile_set.len();

    let mut left_groups: HashMap<Vec<u8>, Vec<usize>> = HashMap::new();
    let mut right_groups: HashMap<Vec<u8>, Vec<usize>> = HashMap::new();
    let mut top_groups: HashMap<Vec<u8>, Vec<usize>> = HashMap::new();
    let mut bottom_groups: HashMap<Vec<u8>, Vec<usize>> = HashMap::new();

    for id in 0..tile_count {
        let pattern = tile_set.pattern(id);
        left_groups.entry(pattern.left_strip()).or_default().push(id);
        right_groups
            .entry(pattern.right_strip())
            .or_default()
            .push(id);
        top_groups.entry(pattern.top_strip()).or_default().push(id);
        bottom_groups
            .entry(pattern.bottom_strip())
            .or_default()
            .push(id);
    }

    for id in 0..tile_count {
        let pattern = tile_set.pattern(id);
        let right_key = pattern.right_strip();
        let left_key = pattern.left_strip();
        let top_key = pattern.top_strip();
        let bottom_key = pattern.bottom_strip();

        if let Some(partners) = left_groups.get(&right_key) {
            for &b in partners {
                tile_set.adjacency_mut(id, Direction::Right).insert(b);
            }
        }
        if let Some(partners) = right_groups.get(&left_key) {
            for &b in partners {
                tile_set.adjacency_mut(id, Direction::Left).insert(b);
            }
        }
        if let Some(partners) = bottom_groups.get(&top_key) {
            for &b in partners {
                tile_set.adjacency_mut(id, Direction::Up).insert(b);
            }
        }
        if let Some(partners) = top_groups.get(&bottom_key) {
            for &b in partners {
                tile_set.adjacency_mut(id, Direction::Down).insert(b);
            }
        }
    }

    for id in 0..tile_count {
        let connectivity = 1.0
            + Direction::ALL
                .iter()
                .map(|&dir| tile_set.adjacency(id, dir).count() as f64)
                .sum::<f64>();
        tile_set.set_connectivity_weight(id, connectivity);
    }
}
