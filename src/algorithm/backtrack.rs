//! Backtracker: rolls the grid back to an earlier decision after a
//! contradiction
//!
//! Grounded on the teacher's `algorithm::deadlock` module, which also widens
//! its recovery radius the more consecutive failures it sees; here the
//! widening schedule operates over a count of history entries to discard
//! rather than a spatial radius, per `spec.md` §4.6's four-tier rollback
//! schedule (`io::configuration::rollback_depth`).

use crate::algorithm::history::History;
use crate::io::configuration::rollback_depth;
use crate::spatial::grid::Grid;
use crate::spatial::tiles::TileSet;

/// Tracks the consecutive-contradiction streak and computes how far back to
/// roll the grid on each failure
#[derive(Debug, Clone, Default)]
pub struct Backtracker {
    recent_contradictions: usize,
}

impl Backtracker {
    /// A fresh backtracker with no contradiction streak
    pub const fn new() -> Self {
        Self {
            recent_contradictions: 0,
        }
    }

    /// Current consecutive-contradiction count
    pub const fn recent_contradictions(&self) -> usize {
        self.recent_contradictions
    }

    /// Record a successful collapse+propagation cycle, decaying the streak
    pub fn record_success(&mut self) {
        self.recent_contradictions = self.recent_contradictions.saturating_sub(1);
    }

    /// Roll `history` and `grid` back after a contradiction
    ///
    /// The number of decisions discarded follows the adaptive schedule from
    /// `rollback_depth`, capped at half the current history length so a
    /// rollback can never discard more decisions than exist, and further
    /// capped so at least zero decisions remain (a full reset). Reconstruction
    /// re-runs propagation for every replayed decision, so the rolled-back
    /// grid is arc-consistent, not just re-collapsed.
    pub fn roll_back(&mut self, history: &mut History, grid: &mut Grid, width: usize, height: usize, tile_set: &TileSet) {
        self.recent_contradictions += 1;

        let requested = rollback_depth(self.recent_contradictions);
        let cap = (history.len() / 2).max(1).min(history.len());
        let discard = requested.min(cap).min(history.len());
        let target_len = history.len().saturating_sub(discard);

        history.truncate(target_len);
        *grid = history.reconstruct(target_len, width, height, tile_set);
    }
}
