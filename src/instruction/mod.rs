//! Heightmap instructions: the operation set and a single parameterized step.

pub mod op;
pub mod instruction;
pub mod summary;

pub use op::{HeightmapOp, Parameter};
pub use instruction::HeightmapInstruction;
