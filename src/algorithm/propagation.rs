//! Propagator: worklist-based constraint narrowing
//!
//! Grounded on the teacher's `algorithm::propagation` worklist-processing
//! shape (seed a queue, pop, narrow, push affected neighbours) and on the
//! reference overlapping-model implementation's "narrow against collapsed
//! neighbours only" rule (`other_examples/.../gridbugs-wfc__wfc-src-overlapping.rs`).
//! This is AC-2 style rather than full AC-3: a cell is only re-narrowed when
//! one of its neighbours collapses or narrows, not compared pairwise against
//! every arc in the graph, which is sufficient because the constraint graph
//! here is a 4-regular grid with direction-indexed adjacency sets precomputed
//! once by the Adjacency Oracle.

use crate::spatial::grid::Grid;
use crate::spatial::tiles::TileSet;
use std::collections::VecDeque;

/// Outcome of a propagation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropagationOutcome {
    /// Propagation completed with no cell driven to an empty possibility set
    Settled,
    /// Propagation discovered a cell with no remaining possibilities
    Contradiction {
        /// Coordinates of the contradictory cell
        at: (usize, usize),
    },
}

/// Propagate constraints outward from `origin`, which must already be
/// collapsed, until the worklist drains or a contradiction is found
///
/// Only a *collapsed* cell constrains its neighbours: for each collapsed
/// cell popped from the worklist, every uncollapsed orthogonal neighbour has
/// its possibility set intersected with `tile_set.adjacency(t, dir)` for the
/// single tile `t` committed at the popped cell. A neighbour popped off the
/// worklist while still merely narrowed (not collapsed) is skipped rather
/// than used as a further narrowing source — this is AC-2, not full AC-3;
/// narrowing only ripples outward again once a neighbour is itself
/// collapsed elsewhere.
pub fn propagate(grid: &mut Grid, tile_set: &TileSet, origin: (usize, usize)) -> PropagationOutcome {
    let mut worklist: VecDeque<(usize, usize)> = VecDeque::new();
    worklist.push_back(origin);

    while let Some((x, y)) = worklist.pop_front() {
        if !grid.cell(x, y).is_collapsed() {
            continue;
        }

        let neighbours: Vec<_> = grid.neighbours(x, y).collect();
        let source_possible = grid.cell(x, y).possible().to_vec();

        for (nx, ny, dir) in neighbours {
            let neighbour = grid.cell(nx, ny);
            if neighbour.is_collapsed() {
                continue;
            }

            let mut allowed = crate::algorithm::bitset::TileBitset::new(tile_set.len());
            for &tile in &source_possible {
                for permitted in tile_set.adjacency(tile, dir).iter() {
                    allowed.insert(permitted);
                }
            }

            let before_count = neighbour.possible().count();
            let narrowed = neighbour.possible().intersection(&allowed);
            let after_count = narrowed.count();

            if after_count == 0 {
                grid.cell_mut(nx, ny).narrow_to(narrowed);
                return PropagationOutcome::Contradiction { at: (nx, ny) };
            }

            if after_count < before_count {
                grid.cell_mut(nx, ny).narrow_to(narrowed);
                worklist.push_back((nx, ny));
            }
        }
    }

    PropagationOutcome::Settled
}
