//! Core solving algorithm: bitsets, adjacency, entropy, collapse,
//! propagation, history/backtracking, and the outer attempt controller

/// Overlap-based adjacency rule computation
pub mod adjacency;
/// Rollback on contradiction
pub mod backtrack;
/// Fixed-capacity tile-id bitset
pub mod bitset;
/// Weighted, look-ahead-checked tile choice
pub mod collapse;
/// Min-entropy cell selection
pub mod entropy;
/// Outer retry/attempt loop
pub mod executor;
/// Decision log and grid snapshots
pub mod history;
/// Worklist-based constraint narrowing
pub mod propagation;
