//! Configuration constants, error types, and all filesystem/CLI surfaces

/// Tunable constants and derived attempt/backtrack limits
pub mod configuration;
/// Command-line interface and end-to-end file processing
pub mod cli;
/// Crate error type and context helpers
pub mod error;
/// Sample loading and solved-grid rendering
pub mod image;
/// Progress bar driver implementing `SynthesisObserver`
pub mod progress;
/// Animated-GIF capture of the solve, implementing `SynthesisObserver`
pub mod visualization;
