//! Binary program format.
//!
//! Layout (little endian):
//! ```text
//! magic "HMPG", version u32
//! mask count u32, then per mask:
//!     min x i32, min y i32, width u32, height u32, packed bits
//! instruction count u32, then per instruction:
//!     op u32, mask index i32 (-1 = none), height u8, oblique i8,
//!     front edge depth i32, depth i32, slope i32, offset i32
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::sync::Arc;

use crate::core::types::IVec2;
use crate::core::{Error, Result};
use crate::heightmap::Oblique;
use crate::instruction::HeightmapOp;
use crate::mask::Mask;

use super::record::{mask_table, resolve, InstructionRecord};
use super::{CodecConfig, HeightmapProgram, FORMAT_VERSION, MIN_FORMAT_VERSION};

const MAGIC: &[u8; 4] = b"HMPG";

impl HeightmapProgram {
    /// Write in the current format version.
    pub fn write_to(&self, writer: &mut impl Write) -> Result<()> {
        write_versioned(writer, self, FORMAT_VERSION)
    }

    /// Read a program written by this or an older version.
    pub fn read_from(reader: &mut impl Read, config: &CodecConfig) -> Result<Self> {
        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;
        if &magic != MAGIC {
            return Err(Error::BadMagic);
        }

        let version = read_u32(reader)?;
        if !(MIN_FORMAT_VERSION..=FORMAT_VERSION).contains(&version) {
            return Err(Error::UnsupportedVersion(version));
        }

        let mask_count = read_u32(reader)? as usize;
        config.check_counts(mask_count, 0)?;
        let mut masks = Vec::with_capacity(mask_count);
        for _ in 0..mask_count {
            masks.push(Arc::new(read_mask(reader, config)?));
        }

        let instruction_count = read_u32(reader)? as usize;
        config.check_counts(mask_count, instruction_count)?;
        let mut records = Vec::with_capacity(instruction_count);
        for _ in 0..instruction_count {
            records.push(read_record(reader, mask_count)?);
        }

        log::debug!(
            "Read heightmap program v{}: {} masks, {} instructions",
            version, mask_count, instruction_count
        );
        resolve(records, &masks, version, config)
    }

    /// Write to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Read from a file.
    pub fn load(path: impl AsRef<Path>, config: &CodecConfig) -> Result<Self> {
        let mut reader = BufReader::new(File::open(path)?);
        Self::read_from(&mut reader, config)
    }
}

/// Write `program` as format `version`, refusing operations that version lacks.
pub(crate) fn write_versioned(
    writer: &mut impl Write,
    program: &HeightmapProgram,
    version: u32,
) -> Result<()> {
    let (masks, records) = mask_table(program);
    if let Some(record) = records.iter().find(|r| r.op.since_version() > version) {
        return Err(Error::OperationNotInVersion {
            op: record.op,
            required: record.op.since_version(),
            version,
        });
    }

    writer.write_all(MAGIC)?;
    writer.write_all(&version.to_le_bytes())?;

    writer.write_all(&(masks.len() as u32).to_le_bytes())?;
    for mask in &masks {
        write_mask(writer, mask)?;
    }

    writer.write_all(&(records.len() as u32).to_le_bytes())?;
    for record in &records {
        write_record(writer, record)?;
    }
    Ok(())
}

fn read_u32(reader: &mut impl Read) -> Result<u32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

fn read_i32(reader: &mut impl Read) -> Result<i32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(i32::from_le_bytes(buf))
}

fn read_mask(reader: &mut impl Read, config: &CodecConfig) -> Result<Mask> {
    let min = IVec2::new(read_i32(reader)?, read_i32(reader)?);
    let width = read_u32(reader)?;
    let height = read_u32(reader)?;
    config.check_mask_cells(width as u64, height as u64)?;

    let bounds = Mask::checked_bounds(min, width as u64, height as u64)?;
    let mut bits = vec![0u8; (width as usize * height as usize).div_ceil(8)];
    reader.read_exact(&mut bits)?;
    Mask::from_packed_bytes(bounds, &bits)
}

fn write_mask(writer: &mut impl Write, mask: &Mask) -> Result<()> {
    let bounds = mask.bounds();
    writer.write_all(&bounds.min.x.to_le_bytes())?;
    writer.write_all(&bounds.min.y.to_le_bytes())?;
    writer.write_all(&(mask.width() as u32).to_le_bytes())?;
    writer.write_all(&(mask.height() as u32).to_le_bytes())?;
    writer.write_all(&mask.to_packed_bytes())?;
    Ok(())
}

fn read_record(reader: &mut impl Read, mask_count: usize) -> Result<InstructionRecord> {
    let op = HeightmapOp::from_code(read_u32(reader)?);

    let mask = match read_i32(reader)? {
        -1 => None,
        index if index >= 0 => Some(index as usize),
        index => {
            return Err(Error::MaskIndexOutOfRange {
                index: index as i64,
                count: mask_count,
            });
        }
    };

    let mut buf = [0u8; 2];
    reader.read_exact(&mut buf)?;
    let height = buf[0];
    let oblique = Oblique::from_i8(buf[1] as i8)?;

    Ok(InstructionRecord {
        op,
        mask,
        height,
        oblique,
        front_edge_depth: read_i32(reader)?,
        depth: read_i32(reader)?,
        slope: read_i32(reader)?,
        offset: read_i32(reader)?,
    })
}

fn write_record(writer: &mut impl Write, record: &InstructionRecord) -> Result<()> {
    let mask = record.mask.map_or(-1, |index| index as i32);

    writer.write_all(&record.op.code().to_le_bytes())?;
    writer.write_all(&mask.to_le_bytes())?;
    writer.write_all(&[record.height, record.oblique as i8 as u8])?;
    writer.write_all(&record.front_edge_depth.to_le_bytes())?;
    writer.write_all(&record.depth.to_le_bytes())?;
    writer.write_all(&record.slope.to_le_bytes())?;
    writer.write_all(&record.offset.to_le_bytes())?;
    Ok(())
}
