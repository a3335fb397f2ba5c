//! JSON program documents for editors and hand-written fixtures.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::types::IVec2;
use crate::core::{Error, Result};
use crate::mask::Mask;

use super::record::{mask_table, resolve, InstructionRecord};
use super::{CodecConfig, HeightmapProgram, FORMAT_VERSION, MIN_FORMAT_VERSION};

/// A mask written as text rows, top row first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskDocument {
    pub min_x: i32,
    pub min_y: i32,
    pub rows: Vec<String>,
}

/// A whole program as a JSON-friendly document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProgramDocument {
    pub version: u32,
    #[serde(default)]
    pub masks: Vec<MaskDocument>,
    #[serde(default)]
    pub instructions: Vec<InstructionRecord>,
}

impl ProgramDocument {
    pub fn from_program(program: &HeightmapProgram) -> Self {
        let (masks, instructions) = mask_table(program);
        Self {
            version: FORMAT_VERSION,
            masks: masks
                .iter()
                .map(|mask| MaskDocument {
                    min_x: mask.bounds().min.x,
                    min_y: mask.bounds().min.y,
                    rows: mask.to_rows(),
                })
                .collect(),
            instructions,
        }
    }

    pub fn into_program(self, config: &CodecConfig) -> Result<HeightmapProgram> {
        if !(MIN_FORMAT_VERSION..=FORMAT_VERSION).contains(&self.version) {
            return Err(Error::UnsupportedVersion(self.version));
        }
        config.check_counts(self.masks.len(), self.instructions.len())?;

        let masks = self
            .masks
            .iter()
            .map(|doc| -> Result<Arc<Mask>> {
                let width = doc.rows.first().map_or(0, |r| r.chars().count());
                config.check_mask_cells(width as u64, doc.rows.len() as u64)?;
                Ok(Arc::new(Mask::from_rows(IVec2::new(doc.min_x, doc.min_y), &doc.rows)?))
            })
            .collect::<Result<Vec<_>>>()?;

        resolve(self.instructions, &masks, self.version, config)
    }
}

impl HeightmapProgram {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&ProgramDocument::from_program(self))?)
    }

    pub fn from_json(json: &str, config: &CodecConfig) -> Result<Self> {
        let document: ProgramDocument = serde_json::from_str(json)?;
        document.into_program(config)
    }
}
