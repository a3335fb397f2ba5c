//! Integer grid geometry

pub mod bounds;

pub use bounds::Bounds;
