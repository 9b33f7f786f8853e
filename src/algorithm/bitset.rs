//! Fixed-capacity bitset over tile ids
//!
//! The hot data structure of the solver: every cell's possibility set and
//! every tile's per-direction adjacency set is a `TileBitset`. A bitset over
//! small integer ids dominates a hash-set for both intersection speed and
//! memory at the tens-to-low-hundreds tile counts this core targets.
//! Adapted from the teacher's `algorithm::bitset::TileBitset`, switched to
//! 0-based tile ids (the teacher reserved index 0 for "empty", a concern
//! specific to its colour-grid representation that doesn't apply here).

use bitvec::prelude::*;
use std::fmt;

/// Bitset over tile ids `0..capacity`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileBitset {
    bits: BitVec,
}

impl TileBitset {
    /// An empty bitset over `capacity` tile ids
    pub fn new(capacity: usize) -> Self {
        Self {
            bits: bitvec![0; capacity],
        }
    }

    /// A bitset containing every tile id in `0..capacity`
    pub fn all(capacity: usize) -> Self {
        Self {
            bits: bitvec![1; capacity],
        }
    }

    /// Number of tile ids this bitset can represent
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Insert a tile id
    pub fn insert(&mut self, tile: usize) {
        if let Some(mut bit) = self.bits.get_mut(tile) {
            *bit = true;
        }
    }

    /// Remove a tile id
    pub fn remove(&mut self, tile: usize) {
        if let Some(mut bit) = self.bits.get_mut(tile) {
            *bit = false;
        }
    }

    /// Test tile membership
    pub fn contains(&self, tile: usize) -> bool {
        self.bits.get(tile).as_deref() == Some(&true)
    }

    /// Intersect this bitset with another in place
    pub fn intersect_with(&mut self, other: &Self) {
        self.bits &= &other.bits;
    }

    /// A new bitset containing the intersection of `self` and `other`
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.intersect_with(other);
        result
    }

    /// Whether no tile ids are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Number of tile ids present
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// All present tile ids, in ascending order
    pub fn to_vec(&self) -> Vec<usize> {
        self.bits.iter_ones().collect()
    }

    /// Iterate over present tile ids in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// The single tile id present, if this bitset contains exactly one
    pub fn single(&self) -> Option<usize> {
        if self.count() == 1 {
            self.bits.iter_ones().next()
        } else {
            None
        }
    }
}

impl fmt::Display for TileBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TileBitset({} tiles: {:?})", self.count(), self.to_vec())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used)]

    use super::*;

    #[test]
    fn intersection_keeps_common_members() {
        let mut a = TileBitset::new(10);
        a.insert(1);
        a.insert(3);
        a.insert(5);

        let mut b = TileBitset::new(10);
        b.insert(3);
        b.insert(5);
        b.insert(7);

        let intersection = a.intersection(&b);
        assert_eq!(intersection.to_vec(), vec![3, 5]);
        assert_eq!(intersection.count(), 2);
        assert!(!intersection.is_empty());
    }

    #[test]
    fn disjoint_intersection_is_empty() {
        let mut a = TileBitset::new(10);
        a.insert(1);
        let mut b = TileBitset::new(10);
        b.insert(2);

        let intersection = a.intersection(&b);
        assert!(intersection.is_empty());
        assert_eq!(intersection.count(), 0);
    }

    #[test]
    fn all_contains_every_id_in_range() {
        let set = TileBitset::all(5);
        for id in 0..5 {
            assert!(set.contains(id));
        }
        assert_eq!(set.count(), 5);
    }

    #[test]
    fn single_returns_the_sole_member() {
        let mut set = TileBitset::new(4);
        assert_eq!(set.single(), None);
        set.insert(2);
        assert_eq!(set.single(), Some(2));
        set.insert(3);
        assert_eq!(set.single(), None);
    }

    #[test]
    fn remove_clears_membership() {
        let mut set = TileBitset::all(3);
        set.remove(1);
        assert!(set.contains(0));
        assert!(!set.contains(1));
        assert!(set.contains(2));
    }

    #[test]
    fn out_of_range_insert_is_ignored_not_panicking() {
        let mut set = TileBitset::new(3);
        set.insert(10);
        assert!(!set.contains(10));
        assert_eq!(set.count(), 0);
    }
}
