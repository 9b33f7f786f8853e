//! Pixels, extracted tile patterns, and the superposition grid

/// Bounded grid of superposition cells
pub mod grid;
/// RGBA pixel type
pub mod pixel;
/// Tile extraction, direction, and the derived `TileSet`
pub mod tiles;
