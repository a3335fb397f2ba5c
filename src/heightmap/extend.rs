//! Grid-extending operations used to build shadow receivers.

use crate::core::types::IVec2;
use crate::core::Result;
use crate::math::Bounds;

use super::grid::coord;
use super::{Heightmap, Oblique};

impl Heightmap {
    /// Shear the grid along `dir`, widening it to hold every shifted row.
    ///
    /// Row `z` moves sideways by `dir * (z - min_z)`. Cells with no source
    /// take the default height. Straight or empty grids come back unchanged.
    pub fn create_extended_oblique(&self, dir: Oblique) -> Result<Heightmap> {
        let src = self.bounds();
        if dir == Oblique::Straight || self.is_empty() {
            return Ok(self.clone());
        }

        let extra = src.height() as i64 - 1;
        let bounds = match dir {
            Oblique::Left => {
                let min_x = coord(src.min.x as i64 - extra)?;
                Bounds::new(IVec2::new(min_x, src.min.y), src.max)
            }
            _ => {
                let last_x = coord(src.max.x as i64 - 1 + extra)?;
                Bounds::new(src.min, IVec2::new(last_x + 1, src.max.y))
            }
        };

        let mut out = Heightmap::with_bounds(bounds, self.default_height())?;
        for z in src.min.y..src.max.y {
            let shift = dir.sign() * (z - src.min.y);
            for x in src.min.x..src.max.x {
                let p = IVec2::new(x, z);
                out.put(IVec2::new(x + shift, z), self.get(p));
            }
        }

        log::trace!("Extended heightmap {:?} along {} to {:?}", src, dir, bounds);
        Ok(out)
    }

    /// Fill each row from the left edge up to its first raised cell.
    ///
    /// Filled cells take `fixed`, or the height of that first cell when `None`.
    pub fn fill_left(&mut self, fixed: Option<u8>) {
        let b = self.bounds();
        for z in b.min.y..b.max.y {
            let edge = (b.min.x..b.max.x).find(|&x| self.is_profile(IVec2::new(x, z)));
            if let Some(edge) = edge {
                let height = fixed.unwrap_or_else(|| self.get(IVec2::new(edge, z)));
                for x in b.min.x..edge {
                    self.put(IVec2::new(x, z), height);
                }
            }
        }
    }

    /// Fill each row from the right edge back to its last raised cell.
    ///
    /// Filled cells take `fixed`, or the height of that last cell when `None`.
    pub fn fill_right(&mut self, fixed: Option<u8>) {
        let b = self.bounds();
        for z in b.min.y..b.max.y {
            let edge = (b.min.x..b.max.x).rev().find(|&x| self.is_profile(IVec2::new(x, z)));
            if let Some(edge) = edge {
                let height = fixed.unwrap_or_else(|| self.get(IVec2::new(edge, z)));
                for x in edge + 1..b.max.x {
                    self.put(IVec2::new(x, z), height);
                }
            }
        }
    }

    #[inline]
    fn is_profile(&self, p: IVec2) -> bool {
        self.get(p) != self.default_height()
    }
}
