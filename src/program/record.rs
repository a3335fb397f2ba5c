//! Serialized instruction records and their resolution against a mask table.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};
use crate::heightmap::Oblique;
use crate::instruction::{HeightmapInstruction, HeightmapOp};
use crate::mask::Mask;

use super::{CodecConfig, HeightmapProgram};

/// An instruction as stored: the mask is an index into the program's mask table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstructionRecord {
    pub op: HeightmapOp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask: Option<usize>,
    pub height: u8,
    pub oblique: Oblique,
    pub front_edge_depth: i32,
    pub depth: i32,
    pub slope: i32,
    pub offset: i32,
}

impl Default for InstructionRecord {
    fn default() -> Self {
        Self::from_instruction(&HeightmapInstruction::new(HeightmapOp::ClearToHeight), None)
    }
}

impl InstructionRecord {
    pub fn from_instruction(instruction: &HeightmapInstruction, mask: Option<usize>) -> Self {
        Self {
            op: instruction.operation(),
            mask,
            height: instruction.height,
            oblique: instruction.oblique,
            front_edge_depth: instruction.front_edge_depth,
            depth: instruction.depth,
            slope: instruction.slope,
            offset: instruction.offset,
        }
    }
}

/// Masks of a program in first-use order, deduplicated by identity.
pub(crate) fn mask_table(program: &HeightmapProgram) -> (Vec<Arc<Mask>>, Vec<InstructionRecord>) {
    let mut masks: Vec<Arc<Mask>> = Vec::new();
    let records = program
        .iter()
        .map(|instruction| {
            let index = instruction.mask.as_ref().map(|mask| {
                masks
                    .iter()
                    .position(|m| Arc::ptr_eq(m, mask))
                    .unwrap_or_else(|| {
                        masks.push(mask.clone());
                        masks.len() - 1
                    })
            });
            InstructionRecord::from_instruction(instruction, index)
        })
        .collect();
    (masks, records)
}

/// Turn records into a program, checking them against the file version.
pub(crate) fn resolve(
    records: Vec<InstructionRecord>,
    masks: &[Arc<Mask>],
    version: u32,
    config: &CodecConfig,
) -> Result<HeightmapProgram> {
    config.check_counts(masks.len(), records.len())?;

    let mut program = HeightmapProgram::new();
    for (index, record) in records.into_iter().enumerate() {
        let op = record.op;
        if !op.is_recognized() {
            if !config.allow_unknown_ops {
                return Err(Error::UnknownOperation(op.code()));
            }
            log::warn!("Instruction {} has unknown operation code {}; it will be ignored", index, op.code());
        }
        if op.since_version() > version {
            return Err(Error::OperationNotInVersion {
                op,
                required: op.since_version(),
                version,
            });
        }

        let mut instruction = HeightmapInstruction::new(op);
        if let Some(mask_index) = record.mask {
            let mask = masks.get(mask_index).ok_or(Error::MaskIndexOutOfRange {
                index: mask_index as i64,
                count: masks.len(),
            })?;
            instruction.mask = Some(mask.clone());
        }
        instruction.height = record.height;
        instruction.oblique = record.oblique;
        instruction.front_edge_depth = record.front_edge_depth;
        instruction.depth = record.depth;
        instruction.slope = record.slope;
        instruction.offset = record.offset;

        instruction.validate(true)?;
        program.push(instruction);
    }
    Ok(program)
}
