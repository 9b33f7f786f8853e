//! Algorithm constants and runtime configuration defaults

/// Minimum permitted tile size
pub const MIN_TILE_SIZE: usize = 1;
/// Maximum permitted tile size
pub const MAX_TILE_SIZE: usize = 20;

/// Minimum permitted grid dimension (width or height)
pub const MIN_GRID_DIMENSION: usize = 3;
/// Maximum permitted grid dimension (width or height)
pub const MAX_GRID_DIMENSION: usize = 50;

/// Number of deliberate collapse decisions between full-grid snapshots
pub const SNAPSHOT_INTERVAL: usize = 10;
/// Maximum number of snapshots retained at once (oldest discarded first)
pub const MAX_SNAPSHOTS: usize = 5;

/// Maximum rollback depth regardless of contradiction streak length
pub const MAX_ROLLBACK_DEPTH: usize = 32;

/// Coefficient applied to the collapsed-orthogonal-neighbour count in the
/// entropy formula; negative so more-constrained cells sort first.
pub const ENTROPY_DEGREE_BONUS: f64 = -0.1;
/// Scale of the uniform jitter added to entropy for tie-breaking
pub const ENTROPY_JITTER_SCALE: f64 = 0.001;

/// Numerator weight given to source-sample frequency in the tile weight blend
pub const WEIGHT_FREQUENCY_SHARE: f64 = 3.0;
/// Numerator weight given to connectivity in the tile weight blend
pub const WEIGHT_CONNECTIVITY_SHARE: f64 = 1.0;

/// Default random seed used when a host does not supply one
pub const DEFAULT_SEED: u64 = 42;

/// Default tile size used by the CLI when `--tile-size` is not given
pub const DEFAULT_TILE_SIZE: usize = 3;
/// Default output grid width/height used by the CLI when `--width`/`--height`
/// are not given
pub const DEFAULT_GRID_DIMENSION: usize = 24;

/// Suffix added to output filenames by the CLI
pub const OUTPUT_SUFFIX: &str = "_result";
/// Delay between GIF animation frames produced by the visualization observer
pub const GIF_FRAME_DELAY_MS: u32 = 5;

/// Threshold for switching the CLI's progress display to batch mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

/// Compute the maximum number of attempts for a grid with `cells` cells
///
/// `min(12, ceil(4 + cells/15))`
pub const fn max_attempts(cells: usize) -> usize {
    let computed = 4 + cells.div_ceil(15);
    if computed < 12 { computed } else { 12 }
}

/// Compute the maximum number of backtracks for a single attempt
///
/// `min(500, cells*10)`
pub const fn max_backtracks_per_attempt(cells: usize) -> usize {
    let computed = cells * 10;
    if computed < 500 { computed } else { 500 }
}

/// Compute the maximum number of main-loop iterations for a single attempt
///
/// `3 * cells`
pub const fn max_iterations_per_attempt(cells: usize) -> usize {
    3 * cells
}

/// Compute the adaptive number of history entries to discard on contradiction
///
/// Schedule from the spec: 0-1 recent contradictions -> 2 steps, 2-3 -> 4,
/// 4-6 -> 8, more than 6 -> `MAX_ROLLBACK_DEPTH` (capped further by half the
/// current history length by the caller).
pub const fn rollback_depth(recent_contradictions: usize) -> usize {
    match recent_contradictions {
        0..=1 => 2,
        2..=3 => 4,
        4..=6 => 8,
        _ => MAX_ROLLBACK_DEPTH,
    }
}
