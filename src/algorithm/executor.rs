//! Attempt Controller: drives the select/collapse/propagate/backtrack loop
//! to a finished grid, retrying from scratch when a single attempt exhausts
//! its backtrack or iteration budget
//!
//! Adapted from the teacher's `algorithm::executor::GreedyStochastic`, which
//! owns all per-run mutable state (grid, RNG, caches, optional visualization
//! capture) behind one struct and exposes a step-by-step driver loop. The
//! teacher's executor never restarts from scratch — its deadlock recovery
//! widens in place — so the outer retry-with-budget loop here, and the
//! seeded-cell warm start before the main loop, are new, grounded on
//! `spec.md` §4.6/§4.7's attempt-budget and seeding-strategy requirements.
//! `SolverConfig` exposes the subset of otherwise-constant behaviour a host
//! may want to override, the same shape as the teacher's `AlgorithmConfig`.

use crate::algorithm::backtrack::Backtracker;
use crate::algorithm::collapse::choose_tile_weighted;
use crate::algorithm::entropy::select_lowest_entropy_cell;
use crate::algorithm::history::History;
use crate::algorithm::propagation::{PropagationOutcome, propagate};
use crate::io::configuration::{max_attempts, max_backtracks_per_attempt, max_iterations_per_attempt};
use crate::io::error::{AlgorithmError, Result};
use crate::spatial::grid::Grid;
use crate::spatial::tiles::TileSet;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Overridable subset of solver behaviour; each field defaults to the
/// corresponding named constant in `io::configuration`
///
/// Mirrors the teacher's `AlgorithmConfig`, which exposes a constructor-time
/// override of otherwise-constant placement behaviour rather than a global
/// mutable setting.
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    /// When `false`, every surviving tile at a collapse is drawn uniformly
    /// at random instead of the frequency/connectivity-weighted blend
    pub frequency_weighting_enabled: bool,
    /// Overrides `io::configuration::max_attempts` when set
    pub max_attempts_override: Option<usize>,
    /// Overrides `io::configuration::SNAPSHOT_INTERVAL` when set
    pub snapshot_interval_override: Option<usize>,
}

impl SolverConfig {
    /// The default configuration: frequency weighting on, no overrides
    #[must_use]
    pub const fn new() -> Self {
        Self {
            frequency_weighting_enabled: true,
            max_attempts_override: None,
            snapshot_interval_override: None,
        }
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Hooks a host can implement to observe synthesis progress
///
/// Every method has a no-op default so a host only needs to override the
/// events it cares about; the CLI's progress bar and GIF capture (see
/// `io::progress` and `io::visualization`) are both built on this trait.
pub trait SynthesisObserver {
    /// Called once at the start of each attempt, before any cell is chosen
    fn on_attempt_start(&mut self, _attempt: usize) {}

    /// Called after a cell is deliberately collapsed and successfully
    /// propagated
    fn on_collapse(&mut self, _grid: &Grid, _position: (usize, usize), _tile_id: usize) {}

    /// Called after a contradiction triggers a rollback
    fn on_backtrack(&mut self, _attempt: usize, _discarded_decisions: usize) {}

    /// Called when an attempt ends, successfully or not
    fn on_attempt_end(&mut self, _attempt: usize, _succeeded: bool) {}
}

/// An observer that does nothing, used when a host supplies none
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl SynthesisObserver for NullObserver {}

/// Pick a handful of well-spread starting cells to collapse before the main
/// entropy-driven loop begins
///
/// `spec.md` calls for the warm start to scale with grid size: small grids
/// (`<= 50` cells) get a single random cell, mid-size grids add the four
/// corners, grids of `100..400` cells scatter a few more interior points,
/// and grids of `400` cells or more seed a coarse evenly spaced grid of
/// points instead of scattering randomly.
fn seed_positions(width: usize, height: usize, rng: &mut StdRng) -> Vec<(usize, usize)> {
    let cell_count = width * height;
    let mut seeds = Vec::new();

    let random_interior = (rng.random_range(0..width), rng.random_range(0..height));
    seeds.push(random_interior);

    if cell_count > 50 {
        seeds.push((0, 0));
        seeds.push((width - 1, 0));
        seeds.push((0, height - 1));
        seeds.push((width - 1, height - 1));
    }

    if (100..400).contains(&cell_count) {
        for _ in 0..4 {
            seeds.push((rng.random_range(0..width), rng.random_range(0..height)));
        }
    } else if cell_count >= 400 {
        let step = ((cell_count as f64).sqrt() / 5.0).round().max(1.0) as usize;
        let mut y = 0;
        while y < height {
            let mut x = 0;
            while x < width {
                seeds.push((x, y));
                x += step;
            }
            y += step;
        }
    }

    seeds.sort_unstable();
    seeds.dedup();
    seeds
}

/// Run one synthesis attempt to completion, a contradiction the backtracker
/// cannot resolve within budget, or a host cancellation
enum AttemptOutcome {
    Solved(Grid),
    Exhausted { last_contradiction: Option<(usize, usize)> },
    Cancelled { iteration: usize },
}

#[allow(clippy::too_many_arguments)]
fn run_attempt(
    tile_set: &TileSet,
    width: usize,
    height: usize,
    attempt: usize,
    rng: &mut StdRng,
    observer: &mut dyn SynthesisObserver,
    mut cancelled: impl FnMut(usize) -> bool,
    config: SolverConfig,
) -> Result<AttemptOutcome> {
    let cell_count = width * height;
    let mut grid = Grid::new(width, height, tile_set.len())?;
    let mut history = config.snapshot_interval_override.map_or_else(History::new, History::with_snapshot_interval);
    let mut backtracker = Backtracker::new();
    let mut last_contradiction = None;
    let mut backtracks_used = 0;
    let backtrack_budget = max_backtracks_per_attempt(cell_count);
    let iteration_budget = max_iterations_per_attempt(cell_count);

    observer.on_attempt_start(attempt);

    let mut warm_start: Vec<(usize, usize)> = seed_positions(width, height, rng);
    warm_start.shuffle(rng);

    for iteration in 0..iteration_budget {
        if cancelled(iteration) {
            return Ok(AttemptOutcome::Cancelled { iteration });
        }

        if grid.is_fully_collapsed() {
            return Ok(AttemptOutcome::Solved(grid));
        }

        let target = warm_start
            .iter()
            .find(|&&(x, y)| !grid.cell(x, y).is_collapsed())
            .copied()
            .or_else(|| select_lowest_entropy_cell(&grid, tile_set, rng));

        let Some((x, y)) = target else {
            return Ok(AttemptOutcome::Solved(grid));
        };

        let Some(tile_id) = choose_tile_weighted(&grid, tile_set, x, y, rng, config.frequency_weighting_enabled) else {
            last_contradiction = Some((x, y));
            if !try_recover(
                &mut grid,
                &mut history,
                &mut backtracker,
                &mut backtracks_used,
                backtrack_budget,
                width,
                height,
                tile_set,
                attempt,
                observer,
            ) {
                return Ok(AttemptOutcome::Exhausted { last_contradiction });
            }
            continue;
        };

        grid.cell_mut(x, y).force_collapse(tile_id, tile_set.len());
        history.record((x, y), tile_id, &grid);

        match propagate(&mut grid, tile_set, (x, y)) {
            PropagationOutcome::Settled => {
                backtracker.record_success();
                observer.on_collapse(&grid, (x, y), tile_id);
            }
            PropagationOutcome::Contradiction { at } => {
                last_contradiction = Some(at);
                if !try_recover(
                    &mut grid,
                    &mut history,
                    &mut backtracker,
                    &mut backtracks_used,
                    backtrack_budget,
                    width,
                    height,
                    tile_set,
                    attempt,
                    observer,
                ) {
                    return Ok(AttemptOutcome::Exhausted { last_contradiction });
                }
            }
        }
    }

    Ok(AttemptOutcome::Exhausted { last_contradiction })
}

#[allow(clippy::too_many_arguments)]
fn try_recover(
    grid: &mut Grid,
    history: &mut History,
    backtracker: &mut Backtracker,
    backtracks_used: &mut usize,
    backtrack_budget: usize,
    width: usize,
    height: usize,
    tile_set: &TileSet,
    attempt: usize,
    observer: &mut dyn SynthesisObserver,
) -> bool {
    if *backtracks_used >= backtrack_budget {
        return false;
    }
    *backtracks_used += 1;

    let before = history.len();
    backtracker.roll_back(history, grid, width, height, tile_set);
    observer.on_backtrack(attempt, before - history.len());
    true
}

/// Synthesize a `width x height` grid of tile ids consistent with
/// `tile_set`'s adjacency rules
///
/// Retries up to `max_attempts(width * height)` times from a fresh grid,
/// each attempt backtracking internally up to its own budget before giving
/// up and starting over. `cancelled` is polled once per main-loop iteration
/// across every attempt; if it ever returns `true` synthesis stops
/// immediately with `AlgorithmError::Cancelled`.
///
/// # Errors
///
/// Returns `GenerationFailed` if every attempt is exhausted without
/// reaching a fully collapsed grid, or `Cancelled` if the host's predicate
/// requests it. Returns `InvalidInput` if `width`/`height` are out of range
/// or `tile_set` is empty.
pub fn synthesize(
    tile_set: &TileSet,
    width: usize,
    height: usize,
    seed: u64,
    observer: &mut dyn SynthesisObserver,
    cancelled: impl FnMut(usize) -> bool,
) -> Result<Grid> {
    synthesize_with_config(tile_set, width, height, seed, observer, cancelled, SolverConfig::new())
}

/// As [`synthesize`], but with a host-supplied [`SolverConfig`] overriding
/// the default weighting/attempt/snapshot behaviour
///
/// # Errors
///
/// Same conditions as [`synthesize`].
#[allow(clippy::too_many_arguments)]
pub fn synthesize_with_config(
    tile_set: &TileSet,
    width: usize,
    height: usize,
    seed: u64,
    observer: &mut dyn SynthesisObserver,
    mut cancelled: impl FnMut(usize) -> bool,
    config: SolverConfig,
) -> Result<Grid> {
    if tile_set.is_empty() {
        return Err(crate::io::error::invalid_input(
            "tile_set",
            &0usize,
            &"must contain at least one tile",
        ));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let attempts = config.max_attempts_override.unwrap_or_else(|| max_attempts(width * height));
    let mut last_contradiction = None;

    for attempt in 0..attempts {
        let outcome = run_attempt(tile_set, width, height, attempt, &mut rng, observer, &mut cancelled, config)?;
        match outcome {
            AttemptOutcome::Solved(grid) => {
                observer.on_attempt_end(attempt, true);
                return Ok(grid);
            }
            AttemptOutcome::Exhausted { last_contradiction: at } => {
                observer.on_attempt_end(attempt, false);
                last_contradiction = at;
            }
            AttemptOutcome::Cancelled { iteration } => {
                return Err(AlgorithmError::Cancelled { iteration });
            }
        }
    }

    Err(AlgorithmError::GenerationFailed {
        attempts,
        grid_dimensions: (width, height),
        tile_count: tile_set.len(),
        last_contradiction,
    })
}
