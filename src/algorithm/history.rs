//! History and Snapshot tracking for backtracking
//!
//! Adapted from the teacher's `algorithm::cache` idea of retaining bounded
//! rolling state rather than the full execution trace. Only deliberate
//! collapse decisions are recorded in the append-only history (propagation's
//! knock-on narrowing is derivable by re-running the propagator, so it is not
//! logged); every `SNAPSHOT_INTERVAL`-th decision also takes a full deep copy
//! of the grid so that `Backtracker` never has to replay more than
//! `SNAPSHOT_INTERVAL` decisions to reconstruct state at an arbitrary point.

use crate::algorithm::propagation::propagate;
use crate::io::configuration::{MAX_SNAPSHOTS, SNAPSHOT_INTERVAL};
use crate::spatial::grid::Grid;
use crate::spatial::tiles::TileSet;

/// One deliberate collapse decision: cell coordinates and the tile chosen
#[derive(Debug, Clone, Copy)]
pub struct HistoryEntry {
    /// Coordinates of the cell that was collapsed
    pub position: (usize, usize),
    /// Tile id committed at that cell
    pub tile_id: usize,
}

/// A full grid copy taken at a given point in the decision history
#[derive(Debug, Clone)]
struct Snapshot {
    history_len: usize,
    grid: Grid,
}

/// Append-only decision log plus a bounded ring of full-grid snapshots
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<HistoryEntry>,
    snapshots: Vec<Snapshot>,
    snapshot_interval: usize,
}

impl History {
    /// An empty history with no snapshots, taking one every
    /// `SNAPSHOT_INTERVAL`-th decision
    pub const fn new() -> Self {
        Self::with_snapshot_interval(SNAPSHOT_INTERVAL)
    }

    /// An empty history that takes a snapshot every `interval`-th decision,
    /// for a host overriding `SolverConfig::snapshot_interval_override`
    pub const fn with_snapshot_interval(interval: usize) -> Self {
        Self {
            entries: Vec::new(),
            snapshots: Vec::new(),
            snapshot_interval: interval,
        }
    }

    /// Number of deliberate decisions recorded so far
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no decisions have been recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record a deliberate collapse decision, taking a snapshot of `grid`
    /// every `snapshot_interval`-th entry and evicting the oldest snapshot
    /// once more than `MAX_SNAPSHOTS` are retained
    pub fn record(&mut self, position: (usize, usize), tile_id: usize, grid: &Grid) {
        self.entries.push(HistoryEntry { position, tile_id });

        if self.entries.len() % self.snapshot_interval == 0 {
            self.snapshots.push(Snapshot {
                history_len: self.entries.len(),
                grid: grid.clone(),
            });
            if self.snapshots.len() > MAX_SNAPSHOTS {
                self.snapshots.remove(0);
            }
        }
    }

    /// The most recent snapshot whose `history_len` does not exceed
    /// `target_len`, if any, as `(grid, decisions_to_replay)`
    fn nearest_snapshot_at_or_before(&self, target_len: usize) -> Option<(&Grid, usize)> {
        self.snapshots
            .iter()
            .rev()
            .find(|snapshot| snapshot.history_len <= target_len)
            .map(|snapshot| (&snapshot.grid, snapshot.history_len))
    }

    /// Truncate the decision log to `target_len` entries, discarding any
    /// snapshot taken after that point
    pub fn truncate(&mut self, target_len: usize) {
        self.entries.truncate(target_len);
        self.snapshots.retain(|s| s.history_len <= target_len);
    }

    /// Decisions in range `[from, to)`, used to replay forward from a
    /// snapshot up to (but not including) the rolled-back-to point
    ///
    /// # Panics
    ///
    /// Panics if `from > to` or `to > self.len()`; callers always derive
    /// both bounds from `self.len()` and a snapshot's recorded length.
    #[allow(clippy::indexing_slicing)]
    pub fn decisions_between(&self, from: usize, to: usize) -> &[HistoryEntry] {
        &self.entries[from..to]
    }

    /// Reconstruct the grid state as of `target_len` decisions by starting
    /// from the nearest snapshot at or before that point (or a fresh grid if
    /// none exists) and replaying the decisions in between
    ///
    /// Each replayed decision both forces its cell and re-runs propagation
    /// from it, exactly as the original forward pass did, so the
    /// reconstructed grid's collapsed cells remain arc-consistent with one
    /// another. A replay `Contradiction` is ignored: the decisions being
    /// replayed already produced a consistent grid the first time they were
    /// applied, so re-deriving it can only narrow possibility sets further,
    /// never invalidate the committed tiles themselves.
    ///
    /// # Panics
    ///
    /// Panics if `width`/`height` fail grid validation; callers always pass
    /// the dimensions of a grid that already exists.
    pub fn reconstruct(&self, target_len: usize, width: usize, height: usize, tile_set: &TileSet) -> Grid {
        let tile_count = tile_set.len();
        match self.nearest_snapshot_at_or_before(target_len) {
            Some((snapshot_grid, snapshot_len)) => {
                let mut grid = snapshot_grid.clone();
                for entry in self.decisions_between(snapshot_len, target_len) {
                    grid.cell_mut(entry.position.0, entry.position.1)
                        .force_collapse(entry.tile_id, tile_count);
                    let _ = propagate(&mut grid, tile_set, entry.position);
                }
                grid
            }
            None => {
                let mut grid = match Grid::new(width, height, tile_count) {
                    Ok(grid) => grid,
                    // `width`/`height` were already validated once, by
                    // whichever call produced the original grid this
                    // history is tracking.
                    Err(_) => unreachable!("history reconstruction given dimensions that already produced a grid"),
                };
                for entry in self.decisions_between(0, target_len) {
                    grid.cell_mut(entry.position.0, entry.position.1)
                        .force_collapse(entry.tile_id, tile_count);
                    let _ = propagate(&mut grid, tile_set, entry.position);
                }
                grid
            }
        }
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used)]

    use super::*;
    use crate::algorithm::adjacency::build_adjacency;
    use crate::spatial::pixel::Pixel;
    use crate::spatial::tiles::extract_tiles;

    fn tiny_grid() -> Grid {
        Grid::new(3, 3, 2).unwrap()
    }

    fn checkerboard_tile_set() -> TileSet {
        let r = Pixel::new(255, 0, 0, 255);
        let g = Pixel::new(0, 255, 0, 255);
        let sample = vec![r, g, g, r];
        let mut set = extract_tiles(&sample, 2, 2, 2).unwrap();
        build_adjacency(&mut set);
        set
    }

    #[test]
    fn record_appends_without_snapshot_before_interval() {
        let mut history = History::new();
        let grid = tiny_grid();
        for i in 0..SNAPSHOT_INTERVAL - 1 {
            history.record((i % 3, 0), 0, &grid);
        }
        assert_eq!(history.len(), SNAPSHOT_INTERVAL - 1);
        assert!(history.nearest_snapshot_at_or_before(history.len()).is_none());
    }

    #[test]
    fn snapshot_taken_exactly_on_interval_boundary() {
        let mut history = History::new();
        let grid = tiny_grid();
        for i in 0..SNAPSHOT_INTERVAL {
            history.record((i % 3, i / 3), 0, &grid);
        }
        let (_, snapshot_len) = history.nearest_snapshot_at_or_before(SNAPSHOT_INTERVAL).unwrap();
        assert_eq!(snapshot_len, SNAPSHOT_INTERVAL);
    }

    #[test]
    fn snapshot_ring_evicts_oldest_beyond_max_snapshots() {
        let mut history = History::new();
        let grid = tiny_grid();
        for i in 0..SNAPSHOT_INTERVAL * (MAX_SNAPSHOTS + 2) {
            history.record((i % 3, 0), 0, &grid);
        }
        assert!(history.snapshots.len() <= MAX_SNAPSHOTS);
        let oldest_retained = history.snapshots.first().unwrap().history_len;
        assert!(oldest_retained > SNAPSHOT_INTERVAL);
    }

    #[test]
    fn truncate_discards_entries_and_snapshots_past_target() {
        let mut history = History::new();
        let grid = tiny_grid();
        for i in 0..SNAPSHOT_INTERVAL * 2 {
            history.record((i % 3, 0), 0, &grid);
        }
        history.truncate(SNAPSHOT_INTERVAL);
        assert_eq!(history.len(), SNAPSHOT_INTERVAL);
        assert!(history.snapshots.iter().all(|s| s.history_len <= SNAPSHOT_INTERVAL));
    }

    #[test]
    fn reconstruct_replays_decisions_from_fresh_grid_when_no_snapshot() {
        let tile_set = checkerboard_tile_set();
        let mut history = History::new();
        let grid = tiny_grid();
        history.record((0, 0), 1, &grid);
        history.record((1, 0), 0, &grid);
        let reconstructed = history.reconstruct(2, 3, 3, &tile_set);
        assert_eq!(reconstructed.cell(0, 0).tile_id(), Some(1));
        assert_eq!(reconstructed.cell(1, 0).tile_id(), Some(0));
        assert!(!reconstructed.cell(2, 0).is_collapsed());
    }

    #[test]
    fn reconstruct_runs_propagation_after_each_replayed_decision() {
        // (0,1) and (1,0) are both orthogonal neighbours of (0,0); replaying
        // (0,0)'s collapse must narrow them via propagation, not just leave
        // them at the fresh grid's full possibility set.
        let tile_set = checkerboard_tile_set();
        let mut history = History::new();
        let grid = tiny_grid();
        history.record((0, 0), 0, &grid);
        let reconstructed = history.reconstruct(1, 3, 3, &tile_set);
        assert_eq!(reconstructed.cell(0, 0).tile_id(), Some(0));
        for (nx, ny, _) in reconstructed.neighbours(0, 0) {
            assert!(reconstructed.cell(nx, ny).possible().count() < tile_set.len());
        }
    }
}
