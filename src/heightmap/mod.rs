//! Heightmaps: per-cell heights over a sprite's ground footprint.
//!
//! A heightmap gives sprites without real geometry a surface that rendering and
//! collision can query for depth ordering, occlusion and shadow placement. All
//! operations are integer-only and deterministic; replays depend on identical
//! grids on every machine.

pub mod grid;
pub mod oblique;
pub mod mask_ops;
pub mod extend;

pub use grid::Heightmap;
pub use oblique::Oblique;
pub use mask_ops::relative_height;

/// Sentinel height meaning "no ceiling".
pub const INFINITY: u8 = u8::MAX;

/// Highest height produced by arithmetic; keeps clear of [`INFINITY`].
pub const MAX_HEIGHT: u8 = INFINITY - 1;

/// Upper bound on stored cells in one heightmap.
pub const MAX_CELLS: u64 = 1 << 24;
