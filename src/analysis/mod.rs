//! Tile ranking and summary diagnostics

/// Bounded top-k tile ranking by blended weight
pub mod weights;
/// Aggregate tile-set summary statistics
pub mod statistics;
