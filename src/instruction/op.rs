//! Heightmap operation kinds and their persisted codes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::program::MIN_FORMAT_VERSION;

/// Heightmap operation kinds.
///
/// Codes are written to program files and replay data, so the code of a
/// shipped operation never changes. New operations take unused codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub enum HeightmapOp {
    ClearToHeight,
    SetFromFlatBaseMask,
    SetFromFlatTopMask,
    SetFromObliqueTopMask,
    SetFromRailingMask,
    SetFromFrontEdge,
    /// Format version 8 and later
    SetFlatRelative,
    /// Format version 9 and later
    SetFromSideOblique,

    // Shadow-receiver operations:
    /// Replaces the target with an extended copy of the base heightmap
    CreateExtendedObliqueFromBase,
    ExtendOblique,
    FillLeft,
    FillLeftFixedHeight,
    FillRight,
    FillRightFixedHeight,

    /// A code this build does not know. Processing ignores it.
    Unrecognized(u32),
}

/// Argument fields of an instruction that an operation reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Parameter {
    FrontEdgeDepth,
    Oblique,
    Depth,
    Slope,
    Height,
    Offset,
}

impl HeightmapOp {
    /// Every named operation, in code order.
    pub const ALL: [HeightmapOp; 14] = [
        HeightmapOp::ClearToHeight,
        HeightmapOp::SetFromFlatBaseMask,
        HeightmapOp::SetFromFlatTopMask,
        HeightmapOp::SetFromObliqueTopMask,
        HeightmapOp::SetFromRailingMask,
        HeightmapOp::SetFromFrontEdge,
        HeightmapOp::CreateExtendedObliqueFromBase,
        HeightmapOp::ExtendOblique,
        HeightmapOp::FillLeft,
        HeightmapOp::FillLeftFixedHeight,
        HeightmapOp::FillRight,
        HeightmapOp::FillRightFixedHeight,
        HeightmapOp::SetFlatRelative,
        HeightmapOp::SetFromSideOblique,
    ];

    /// Persisted code.
    pub fn code(self) -> u32 {
        match self {
            HeightmapOp::ClearToHeight => 0,
            HeightmapOp::SetFromFlatBaseMask => 1,
            HeightmapOp::SetFromFlatTopMask => 2,
            HeightmapOp::SetFromObliqueTopMask => 3,
            HeightmapOp::SetFromRailingMask => 4,
            HeightmapOp::SetFromFrontEdge => 5,
            HeightmapOp::CreateExtendedObliqueFromBase => 6,
            HeightmapOp::ExtendOblique => 7,
            HeightmapOp::FillLeft => 8,
            HeightmapOp::FillLeftFixedHeight => 9,
            HeightmapOp::FillRight => 10,
            HeightmapOp::FillRightFixedHeight => 11,
            HeightmapOp::SetFlatRelative => 12,
            HeightmapOp::SetFromSideOblique => 13,
            HeightmapOp::Unrecognized(code) => code,
        }
    }

    /// Decode a persisted code. Unknown codes are kept, not rejected.
    pub fn from_code(code: u32) -> Self {
        match code {
            0 => HeightmapOp::ClearToHeight,
            1 => HeightmapOp::SetFromFlatBaseMask,
            2 => HeightmapOp::SetFromFlatTopMask,
            3 => HeightmapOp::SetFromObliqueTopMask,
            4 => HeightmapOp::SetFromRailingMask,
            5 => HeightmapOp::SetFromFrontEdge,
            6 => HeightmapOp::CreateExtendedObliqueFromBase,
            7 => HeightmapOp::ExtendOblique,
            8 => HeightmapOp::FillLeft,
            9 => HeightmapOp::FillLeftFixedHeight,
            10 => HeightmapOp::FillRight,
            11 => HeightmapOp::FillRightFixedHeight,
            12 => HeightmapOp::SetFlatRelative,
            13 => HeightmapOp::SetFromSideOblique,
            other => HeightmapOp::Unrecognized(other),
        }
    }

    pub fn is_recognized(self) -> bool {
        !matches!(self, HeightmapOp::Unrecognized(_))
    }

    /// True if the operation reads the instruction's mask.
    pub fn requires_mask(self) -> bool {
        !matches!(
            self,
            HeightmapOp::ClearToHeight
                | HeightmapOp::FillLeft
                | HeightmapOp::FillRight
                | HeightmapOp::FillLeftFixedHeight
                | HeightmapOp::FillRightFixedHeight
                | HeightmapOp::CreateExtendedObliqueFromBase
                | HeightmapOp::ExtendOblique
                | HeightmapOp::Unrecognized(_)
        )
    }

    /// True if the operation reads the base heightmap.
    pub fn requires_base(self) -> bool {
        self == HeightmapOp::CreateExtendedObliqueFromBase
    }

    /// True for operations that belong in shadow-receiver programs.
    pub fn is_shadow_receiver_operation(self) -> bool {
        matches!(
            self,
            HeightmapOp::CreateExtendedObliqueFromBase
                | HeightmapOp::ExtendOblique
                | HeightmapOp::FillLeft
                | HeightmapOp::FillLeftFixedHeight
                | HeightmapOp::FillRight
                | HeightmapOp::FillRightFixedHeight
        )
    }

    /// First program format version that can hold this operation.
    pub fn since_version(self) -> u32 {
        match self {
            HeightmapOp::SetFlatRelative => 8,
            HeightmapOp::SetFromSideOblique => 9,
            _ => MIN_FORMAT_VERSION,
        }
    }

    /// Argument fields the operation reads, in display order.
    pub fn parameters(self) -> &'static [Parameter] {
        use Parameter::*;
        match self {
            HeightmapOp::ClearToHeight
            | HeightmapOp::SetFromFlatBaseMask
            | HeightmapOp::SetFromFlatTopMask
            | HeightmapOp::FillLeftFixedHeight
            | HeightmapOp::FillRightFixedHeight => &[Height],
            HeightmapOp::SetFromObliqueTopMask => &[FrontEdgeDepth, Oblique],
            HeightmapOp::SetFromFrontEdge => &[FrontEdgeDepth, Depth, Oblique, Slope, Offset],
            HeightmapOp::SetFlatRelative => &[Height, Offset],
            HeightmapOp::SetFromSideOblique => &[Oblique, Offset],
            HeightmapOp::CreateExtendedObliqueFromBase | HeightmapOp::ExtendOblique => &[Oblique],
            HeightmapOp::SetFromRailingMask
            | HeightmapOp::FillLeft
            | HeightmapOp::FillRight
            | HeightmapOp::Unrecognized(_) => &[],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            HeightmapOp::ClearToHeight => "ClearToHeight",
            HeightmapOp::SetFromFlatBaseMask => "SetFromFlatBaseMask",
            HeightmapOp::SetFromFlatTopMask => "SetFromFlatTopMask",
            HeightmapOp::SetFromObliqueTopMask => "SetFromObliqueTopMask",
            HeightmapOp::SetFromRailingMask => "SetFromRailingMask",
            HeightmapOp::SetFromFrontEdge => "SetFromFrontEdge",
            HeightmapOp::SetFlatRelative => "SetFlatRelative",
            HeightmapOp::SetFromSideOblique => "SetFromSideOblique",
            HeightmapOp::CreateExtendedObliqueFromBase => "CreateExtendedObliqueFromBase",
            HeightmapOp::ExtendOblique => "ExtendOblique",
            HeightmapOp::FillLeft => "FillLeft",
            HeightmapOp::FillLeftFixedHeight => "FillLeftFixedHeight",
            HeightmapOp::FillRight => "FillRight",
            HeightmapOp::FillRightFixedHeight => "FillRightFixedHeight",
            HeightmapOp::Unrecognized(_) => "Unrecognized",
        }
    }
}

impl From<u32> for HeightmapOp {
    fn from(code: u32) -> Self {
        HeightmapOp::from_code(code)
    }
}

impl From<HeightmapOp> for u32 {
    fn from(op: HeightmapOp) -> Self {
        op.code()
    }
}

impl fmt::Display for HeightmapOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeightmapOp::Unrecognized(code) => write!(f, "Unrecognized({})", code),
            op => f.write_str(op.name()),
        }
    }
}
