//! Heightmap programs: ordered instruction lists that build a heightmap.
//!
//! Instructions run strictly in order; each sees what earlier ones left in the
//! target. The same program applied to the same starting heightmap always
//! produces the same grid.

pub mod config;
pub mod record;
pub mod codec;
pub mod document;

pub use config::CodecConfig;
pub use document::{MaskDocument, ProgramDocument};
pub use record::InstructionRecord;

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};
use crate::heightmap::Heightmap;
use crate::instruction::{HeightmapInstruction, HeightmapOp};

/// Program format version written by this build.
pub const FORMAT_VERSION: u32 = 9;

/// Oldest program format version this build reads.
pub const MIN_FORMAT_VERSION: u32 = 7;

/// What a program builds, which decides the operations it may use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProgramRole {
    /// The main heightmap of an animation frame, built from masks.
    Heightmap,
    /// A shadow receiver derived from a base heightmap.
    ShadowReceiver,
}

impl ProgramRole {
    /// Unrecognized operations are allowed everywhere; they never run.
    pub fn allows(self, op: HeightmapOp) -> bool {
        if !op.is_recognized() {
            return true;
        }
        match self {
            ProgramRole::Heightmap => !op.is_shadow_receiver_operation(),
            ProgramRole::ShadowReceiver => op.is_shadow_receiver_operation(),
        }
    }
}

/// Ordered list of heightmap instructions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HeightmapProgram {
    instructions: Vec<HeightmapInstruction>,
}

impl HeightmapProgram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, instruction: HeightmapInstruction) {
        self.instructions.push(instruction);
    }

    pub fn instructions(&self) -> &[HeightmapInstruction] {
        &self.instructions
    }

    /// Argument fields stay editable; operations do not change.
    pub fn instructions_mut(&mut self) -> &mut [HeightmapInstruction] {
        &mut self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HeightmapInstruction> {
        self.instructions.iter()
    }

    /// Check every instruction against `role` and its own preconditions.
    pub fn validate(&self, role: ProgramRole, has_base: bool) -> Result<()> {
        for (index, instruction) in self.instructions.iter().enumerate() {
            let op = instruction.operation();
            if !role.allows(op) {
                return Err(Error::OperationNotAllowed { index, op, role });
            }
            instruction.validate(has_base)?;
        }
        Ok(())
    }

    /// Run every instruction against `target` in order.
    ///
    /// Either every instruction succeeds and `target` holds the result, or an
    /// error is returned and `target` is unchanged.
    pub fn apply(&self, target: &mut Heightmap, base: Option<&Heightmap>) -> Result<()> {
        for instruction in &self.instructions {
            instruction.validate(base.is_some())?;
        }

        let mut scratch = target.clone();
        for instruction in &self.instructions {
            instruction.process(&mut scratch, base)?;
        }
        target.transplant(scratch);
        Ok(())
    }

    /// Build a main heightmap starting from an empty grid at `default_height`.
    pub fn build(&self, default_height: u8) -> Result<Heightmap> {
        self.validate(ProgramRole::Heightmap, false)?;
        let mut heightmap = Heightmap::new(default_height);
        self.apply(&mut heightmap, None)?;
        log::debug!(
            "Built heightmap {:?} from {} instructions",
            heightmap.bounds(),
            self.len()
        );
        Ok(heightmap)
    }

    /// Build a shadow receiver from `base`, which is only read.
    pub fn build_shadow_receiver(&self, base: &Heightmap) -> Result<Heightmap> {
        self.validate(ProgramRole::ShadowReceiver, true)?;
        let mut receiver = Heightmap::new(base.default_height());
        self.apply(&mut receiver, Some(base))?;
        log::debug!(
            "Built shadow receiver {:?} from {} instructions",
            receiver.bounds(),
            self.len()
        );
        Ok(receiver)
    }
}

impl FromIterator<HeightmapInstruction> for HeightmapProgram {
    fn from_iter<I: IntoIterator<Item = HeightmapInstruction>>(iter: I) -> Self {
        Self {
            instructions: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a HeightmapProgram {
    type Item = &'a HeightmapInstruction;
    type IntoIter = std::slice::Iter<'a, HeightmapInstruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.iter()
    }
}
