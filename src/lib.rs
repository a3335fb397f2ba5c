//! Relief - heightmap construction for pseudo-3D sprites
//!
//! Flat 2D sprites get a per-cell height surface built by short programs of
//! mask-driven instructions. Rendering and collision query that surface for
//! depth ordering and shadow placement.

pub mod core;
pub mod math;
pub mod mask;
pub mod heightmap;
pub mod instruction;
pub mod program;
