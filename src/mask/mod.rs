//! Masks: 2D footprint bitmaps that select which cells an operation touches.
//!
//! A mask lives in sprite space, the same space the artist draws in, with `y`
//! pointing up. Heightmap operations read masks but never modify them.

pub mod bitmap;
pub mod rows;

pub use bitmap::{Mask, MaskColumn};
