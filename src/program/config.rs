//! Limits and tolerances for loading heightmap programs.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};

/// Settings applied when decoding program files and documents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Keep operation codes this build does not know (as no-ops) instead of failing.
    pub allow_unknown_ops: bool,
    /// Maximum number of masks in one program.
    pub max_masks: usize,
    /// Maximum cells in one mask.
    pub max_mask_cells: u64,
    /// Maximum number of instructions in one program.
    pub max_instructions: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            allow_unknown_ops: true,
            max_masks: 1024,
            max_mask_cells: 1 << 20,
            max_instructions: 4096,
        }
    }
}

impl CodecConfig {
    /// Load from a JSON file; missing fields keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    pub(crate) fn check_counts(&self, masks: usize, instructions: usize) -> Result<()> {
        if masks > self.max_masks {
            return Err(Error::LimitExceeded(format!(
                "{} masks (max {})",
                masks, self.max_masks
            )));
        }
        if instructions > self.max_instructions {
            return Err(Error::LimitExceeded(format!(
                "{} instructions (max {})",
                instructions, self.max_instructions
            )));
        }
        Ok(())
    }

    pub(crate) fn check_mask_cells(&self, width: u64, height: u64) -> Result<()> {
        if width > i32::MAX as u64 || height > i32::MAX as u64 || width * height > self.max_mask_cells {
            return Err(Error::LimitExceeded(format!(
                "mask of {}x{} cells (max {} cells)",
                width, height, self.max_mask_cells
            )));
        }
        Ok(())
    }
}
