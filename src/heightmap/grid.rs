//! Heightmap storage: a growable grid of 8-bit heights over the ground plane.

use crate::core::types::IVec2;
use crate::core::{Error, Result};
use crate::math::Bounds;

use super::{INFINITY, MAX_CELLS, MAX_HEIGHT};

/// Largest magnitude a written cell coordinate may have.
pub const COORD_LIMIT: i64 = 1 << 30;

/// Grid of heights over `(x, z)`; `IVec2::y` holds `z`.
///
/// Cells outside `bounds` read as `default_height`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Heightmap {
    bounds: Bounds,
    data: Vec<u8>,
    default_height: u8,
}

impl Default for Heightmap {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Heightmap {
    /// Create a heightmap with no cells.
    pub fn new(default_height: u8) -> Self {
        Self {
            bounds: Bounds::EMPTY,
            data: Vec::new(),
            default_height,
        }
    }

    /// Create a heightmap covering `bounds`, every cell at `default_height`.
    pub fn with_bounds(bounds: Bounds, default_height: u8) -> Result<Self> {
        let mut heightmap = Self::new(default_height);
        heightmap.ensure_contains(bounds)?;
        Ok(heightmap)
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn default_height(&self) -> u8 {
        self.default_height
    }

    pub fn set_default_height(&mut self, height: u8) {
        self.default_height = height;
    }

    /// True if the grid holds no cells.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw cells, row-major over `bounds`.
    pub fn cells(&self) -> &[u8] {
        &self.data
    }

    /// Height at a cell.
    #[inline]
    pub fn get(&self, p: IVec2) -> u8 {
        self.bounds
            .index_of(p)
            .map_or(self.default_height, |i| self.data[i])
    }

    /// Set one cell, growing the grid if needed.
    pub fn set(&mut self, p: IVec2, height: u8) -> Result<()> {
        coord(p.x as i64)?;
        coord(p.y as i64)?;
        self.ensure_contains(Bounds::cell(p))?;
        self.put(p, height);
        Ok(())
    }

    /// Write a cell already inside `bounds`.
    #[inline]
    pub(crate) fn put(&mut self, p: IVec2, height: u8) {
        if let Some(i) = self.bounds.index_of(p) {
            self.data[i] = height;
        }
    }

    /// Grow the grid so `region` is covered. New cells take `default_height`.
    pub fn ensure_contains(&mut self, region: Bounds) -> Result<()> {
        if self.bounds.contains_bounds(&region) {
            return Ok(());
        }

        let grown = self.bounds.union(&region);
        let width = grown.max.x as i64 - grown.min.x as i64;
        let depth = grown.max.y as i64 - grown.min.y as i64;
        if width.saturating_mul(depth) > MAX_CELLS as i64 {
            return Err(Error::HeightmapTooLarge { width, depth });
        }

        log::trace!(
            "Growing heightmap from {:?} to {:?}",
            self.bounds, grown
        );

        let mut data = vec![self.default_height; grown.area() as usize];
        let old_width = self.bounds.width() as usize;
        for z in self.bounds.min.y..self.bounds.max.y {
            let src = (z - self.bounds.min.y) as usize * old_width;
            let dst = grown
                .index_of(IVec2::new(self.bounds.min.x, z))
                .unwrap_or_default();
            data[dst..dst + old_width].copy_from_slice(&self.data[src..src + old_width]);
        }

        self.bounds = grown;
        self.data = data;
        Ok(())
    }

    /// Take over another heightmap's cells, bounds and default height wholesale.
    pub fn transplant(&mut self, other: Heightmap) {
        *self = other;
    }

    /// Cells of one row, left to right.
    pub fn row(&self, z: i32) -> Option<&[u8]> {
        let start = self.bounds.index_of(IVec2::new(self.bounds.min.x, z))?;
        Some(&self.data[start..start + self.bounds.width() as usize])
    }

    /// Text dump, back row first, for tools and test failures.
    pub fn debug_rows(&self) -> Vec<String> {
        (self.bounds.min.y..self.bounds.max.y)
            .rev()
            .filter_map(|z| self.row(z))
            .map(|row| {
                row.iter()
                    .map(|&h| if h == INFINITY { "inf".to_string() } else { format!("{:3}", h) })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }
}

/// Clamp a computed height into the non-sentinel range.
#[inline]
pub(crate) fn clamp_height(value: i64) -> u8 {
    value.clamp(0, MAX_HEIGHT as i64) as u8
}

/// Narrow a computed coordinate, rejecting values far outside any sprite.
#[inline]
pub(crate) fn coord(value: i64) -> Result<i32> {
    if value.abs() > COORD_LIMIT {
        return Err(Error::CoordinateOutOfRange(value));
    }
    Ok(value as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_outside_are_default() {
        let heightmap = Heightmap::new(7);
        assert!(heightmap.is_empty());
        assert_eq!(heightmap.get(IVec2::new(100, -3)), 7);
    }

    #[test]
    fn test_set_grows_and_preserves_cells() {
        let mut heightmap = Heightmap::new(1);
        heightmap.set(IVec2::new(2, 2), 9).unwrap();
        heightmap.set(IVec2::new(-1, 4), 5).unwrap();

        assert_eq!(heightmap.bounds(), Bounds::new(IVec2::new(-1, 2), IVec2::new(3, 5)));
        assert_eq!(heightmap.get(IVec2::new(2, 2)), 9);
        assert_eq!(heightmap.get(IVec2::new(-1, 4)), 5);
        assert_eq!(heightmap.get(IVec2::new(0, 3)), 1);
        assert_eq!(heightmap.cells().len(), 12);
    }

    #[test]
    fn test_rejects_oversized_growth() {
        let mut heightmap = Heightmap::new(0);
        heightmap.set(IVec2::ZERO, 1).unwrap();
        let err = heightmap.set(IVec2::new(1 << 20, 1 << 20), 1).unwrap_err();
        assert!(matches!(err, Error::HeightmapTooLarge { .. }));
        // Failed growth leaves the grid alone
        assert_eq!(heightmap.bounds(), Bounds::cell(IVec2::ZERO));
    }

    #[test]
    fn test_set_rejects_far_cells() {
        let mut heightmap = Heightmap::new(0);
        heightmap.set(IVec2::new(COORD_LIMIT as i32, 0), 1).unwrap();
        let before = heightmap.clone();

        for p in [IVec2::new(i32::MAX, 0), IVec2::new(0, i32::MIN), IVec2::new(-(COORD_LIMIT as i32) - 1, 0)] {
            assert!(matches!(heightmap.set(p, 1), Err(Error::CoordinateOutOfRange(_))));
        }
        assert_eq!(heightmap, before);
    }

    #[test]
    fn test_transplant_replaces_everything() {
        let mut target = Heightmap::new(3);
        target.set(IVec2::new(5, 5), 10).unwrap();

        let mut source = Heightmap::new(8);
        source.set(IVec2::new(0, 0), 2).unwrap();
        let expected = source.clone();

        target.transplant(source);
        assert_eq!(target, expected);
        assert_eq!(target.default_height(), 8);
        assert_eq!(target.get(IVec2::new(5, 5)), 8);
    }

    #[test]
    fn test_debug_rows_back_first() {
        let mut heightmap = Heightmap::new(0);
        heightmap.set(IVec2::new(0, 0), 1).unwrap();
        heightmap.set(IVec2::new(1, 1), INFINITY).unwrap();
        assert_eq!(heightmap.debug_rows(), vec!["  0 inf", "  1   0"]);
    }

    #[test]
    fn test_clamp_and_coord_helpers() {
        assert_eq!(clamp_height(-4), 0);
        assert_eq!(clamp_height(300), MAX_HEIGHT);
        assert_eq!(clamp_height(12), 12);
        assert_eq!(coord(-12).unwrap(), -12);
        assert!(coord(COORD_LIMIT + 1).is_err());
    }
}
