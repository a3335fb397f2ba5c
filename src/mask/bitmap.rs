//! Packed footprint bitmap.

use crate::core::types::IVec2;
use crate::core::{Error, Result};
use crate::heightmap::grid::COORD_LIMIT;
use crate::math::Bounds;

/// Lowest and highest set row of one mask column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MaskColumn {
    pub x: i32,
    pub bottom: i32,
    pub top: i32,
}

/// 2D boolean footprint in sprite space (`x` right, `y` up).
///
/// Bits are packed per row into `u64` words. Reads outside `bounds` are false.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    bounds: Bounds,
    words_per_row: usize,
    bits: Vec<u64>,
}

impl Mask {
    /// Create a cleared mask covering `bounds`.
    pub fn new(bounds: Bounds) -> Self {
        let bounds = if bounds.is_empty() { Bounds::EMPTY } else { bounds };
        let words_per_row = (bounds.width() as usize).div_ceil(64);
        Self {
            bounds,
            words_per_row,
            bits: vec![0; words_per_row * bounds.height() as usize],
        }
    }

    /// Bounds of a `width` x `height` mask at `min`, for sizes read from
    /// documents and files. Every cell must stay within [`COORD_LIMIT`].
    pub fn checked_bounds(min: IVec2, width: u64, height: u64) -> Result<Bounds> {
        let in_range = |v: i64| v.abs() <= COORD_LIMIT;
        if width == 0 || height == 0 {
            return Ok(Bounds::EMPTY);
        }
        if width > COORD_LIMIT as u64 * 2 || height > COORD_LIMIT as u64 * 2 {
            return Err(Error::InvalidMask(format!("mask of {}x{} cells", width, height)));
        }
        let last_x = min.x as i64 + width as i64 - 1;
        let last_y = min.y as i64 + height as i64 - 1;
        if !in_range(min.x as i64) || !in_range(min.y as i64) || !in_range(last_x) || !in_range(last_y) {
            return Err(Error::InvalidMask(format!(
                "mask at ({}, {}) of {}x{} cells leaves the coordinate range",
                min.x, min.y, width, height
            )));
        }
        Ok(Bounds::from_size(min, width as i32, height as i32))
    }

    /// Create a mask with every cell of `bounds` set.
    pub fn filled(bounds: Bounds) -> Self {
        let mut mask = Self::new(bounds);
        for p in mask.bounds.cells() {
            mask.set(p, true);
        }
        mask
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    #[inline]
    fn locate(&self, p: IVec2) -> Option<(usize, u64)> {
        if !self.bounds.contains(p) {
            return None;
        }
        let dx = (p.x - self.bounds.min.x) as usize;
        let dy = (p.y - self.bounds.min.y) as usize;
        Some((dy * self.words_per_row + dx / 64, 1u64 << (dx % 64)))
    }

    /// Test a cell.
    #[inline]
    pub fn get(&self, p: IVec2) -> bool {
        self.locate(p)
            .is_some_and(|(word, bit)| self.bits[word] & bit != 0)
    }

    /// Set or clear a cell. Returns false if `p` is outside the mask.
    pub fn set(&mut self, p: IVec2, value: bool) -> bool {
        match self.locate(p) {
            Some((word, bit)) => {
                if value {
                    self.bits[word] |= bit;
                } else {
                    self.bits[word] &= !bit;
                }
                true
            }
            None => false,
        }
    }

    /// Number of set cells.
    pub fn count(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// True if no cell is set.
    pub fn is_clear(&self) -> bool {
        self.bits.iter().all(|&w| w == 0)
    }

    /// Set cells in row-major order (bottom row first).
    pub fn set_cells(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.bounds.cells().filter(move |&p| self.get(p))
    }

    /// Columns holding at least one set cell, left to right.
    pub fn columns(&self) -> impl Iterator<Item = MaskColumn> + '_ {
        let b = self.bounds;
        (b.min.x..b.max.x).filter_map(move |x| {
            let bottom = (b.min.y..b.max.y).find(|&y| self.get(IVec2::new(x, y)))?;
            let top = (b.min.y..b.max.y).rev().find(|&y| self.get(IVec2::new(x, y)))?;
            Some(MaskColumn { x, bottom, top })
        })
    }

    /// Pack cells row-major, least significant bit first, without row padding.
    pub fn to_packed_bytes(&self) -> Vec<u8> {
        let mut out = vec![0u8; (self.bounds.area() as usize).div_ceil(8)];
        for (i, p) in self.bounds.cells().enumerate() {
            if self.get(p) {
                out[i / 8] |= 1 << (i % 8);
            }
        }
        out
    }

    /// Inverse of [`Mask::to_packed_bytes`].
    pub fn from_packed_bytes(bounds: Bounds, bytes: &[u8]) -> Result<Self> {
        let mut mask = Self::new(bounds);
        let expected = (mask.bounds.area() as usize).div_ceil(8);
        if bytes.len() != expected {
            return Err(Error::InvalidMask(format!(
                "expected {} bytes of bit data, got {}",
                expected,
                bytes.len()
            )));
        }
        for (i, p) in mask.bounds.cells().enumerate() {
            if bytes[i / 8] & (1 << (i % 8)) != 0 {
                mask.set(p, true);
            }
        }
        Ok(mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_and_outside() {
        let mut mask = Mask::new(Bounds::from_size(IVec2::new(-3, 2), 70, 3));
        assert!(mask.set(IVec2::new(-3, 2), true));
        assert!(mask.set(IVec2::new(66, 4), true));
        assert!(!mask.set(IVec2::new(67, 4), true));

        assert!(mask.get(IVec2::new(-3, 2)));
        assert!(mask.get(IVec2::new(66, 4)));
        assert!(!mask.get(IVec2::new(0, 3)));
        assert!(!mask.get(IVec2::new(-4, 2)));
        assert_eq!(mask.count(), 2);

        mask.set(IVec2::new(-3, 2), false);
        assert_eq!(mask.count(), 1);
    }

    #[test]
    fn test_columns_report_extent() {
        let mut mask = Mask::new(Bounds::from_size(IVec2::ZERO, 3, 5));
        mask.set(IVec2::new(0, 1), true);
        mask.set(IVec2::new(0, 3), true);
        mask.set(IVec2::new(2, 4), true);

        let columns: Vec<_> = mask.columns().collect();
        assert_eq!(
            columns,
            vec![
                MaskColumn { x: 0, bottom: 1, top: 3 },
                MaskColumn { x: 2, bottom: 4, top: 4 },
            ]
        );
    }

    #[test]
    fn test_packed_bytes_restore_mask() {
        let bounds = Bounds::from_size(IVec2::new(1, 1), 5, 3);
        let mut mask = Mask::new(bounds);
        mask.set(IVec2::new(1, 1), true);
        mask.set(IVec2::new(5, 3), true);
        mask.set(IVec2::new(3, 2), true);

        let bytes = mask.to_packed_bytes();
        assert_eq!(bytes.len(), 2);
        assert_eq!(Mask::from_packed_bytes(bounds, &bytes).unwrap(), mask);
        assert!(Mask::from_packed_bytes(bounds, &bytes[..1]).is_err());
    }

    #[test]
    fn test_checked_bounds_rejects_far_masks() {
        let b = Mask::checked_bounds(IVec2::new(-5, 2), 3, 4).unwrap();
        assert_eq!(b, Bounds::from_size(IVec2::new(-5, 2), 3, 4));
        assert_eq!(Mask::checked_bounds(IVec2::new(i32::MAX, 0), 0, 3).unwrap(), Bounds::EMPTY);

        let far = COORD_LIMIT as i32;
        assert!(Mask::checked_bounds(IVec2::new(far, 0), 1, 1).is_ok());
        assert!(matches!(
            Mask::checked_bounds(IVec2::new(far, 0), 2, 1),
            Err(Error::InvalidMask(_))
        ));
        assert!(Mask::checked_bounds(IVec2::new(i32::MAX - 1, 0), 3, 1).is_err());
        assert!(Mask::checked_bounds(IVec2::new(0, i32::MIN), 1, 1).is_err());
        assert!(Mask::checked_bounds(IVec2::ZERO, u32::MAX as u64, 1).is_err());
    }

    #[test]
    fn test_empty_bounds_mask() {
        let mask = Mask::new(Bounds::from_size(IVec2::new(4, 4), 0, 7));
        assert!(mask.is_clear());
        assert_eq!(mask.columns().count(), 0);
        assert!(mask.to_packed_bytes().is_empty());
    }
}
