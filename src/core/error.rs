//! Error types for heightmap construction and program persistence

use thiserror::Error;

use crate::instruction::HeightmapOp;
use crate::program::ProgramRole;

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    #[error("{op} requires a mask but none was supplied")]
    MissingMask { op: HeightmapOp },

    #[error("{op} requires a base heightmap but none was supplied")]
    MissingBaseHeightmap { op: HeightmapOp },

    #[error("instruction {index} ({op}) is not allowed in a {role:?} program")]
    OperationNotAllowed {
        index: usize,
        op: HeightmapOp,
        role: ProgramRole,
    },

    #[error("heightmap of {width}x{depth} cells exceeds the size limit")]
    HeightmapTooLarge { width: i64, depth: i64 },

    #[error("cell coordinate {0} is out of range")]
    CoordinateOutOfRange(i64),

    #[error("Invalid mask: {0}")]
    InvalidMask(String),

    #[error("Invalid oblique direction: {0}")]
    InvalidOblique(i8),

    #[error("Unknown operation code: {0}")]
    UnknownOperation(u32),

    #[error("{op} needs format version {required}, file is version {version}")]
    OperationNotInVersion {
        op: HeightmapOp,
        required: u32,
        version: u32,
    },

    #[error("mask index {index} out of range ({count} masks)")]
    MaskIndexOutOfRange { index: i64, count: usize },

    #[error("Invalid magic bytes")]
    BadMagic,

    #[error("Unsupported version: {0}")]
    UnsupportedVersion(u32),

    #[error("Limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
