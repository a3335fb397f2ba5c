//! Mask-driven height operations.
//!
//! Each operation first works out every cell it will write, grows the grid once
//! to cover them, then writes. A failed growth leaves the heightmap untouched.
//!
//! Sprite space and the ground plane are related by the oblique projection: a
//! point at height `h` and depth `z` draws at sprite row `h + z`.

use crate::core::types::IVec2;
use crate::core::Result;
use crate::mask::{Mask, MaskColumn};
use crate::math::Bounds;

use super::grid::{clamp_height, coord};
use super::{Heightmap, Oblique, INFINITY};

/// Cells `(x, z0..z0 + len)` of one column.
fn span(x: i32, z0: i32, len: i32) -> Bounds {
    Bounds::from_size(IVec2::new(x, z0), 1, len)
}

/// Column's set cells shifted down by `drop` rows.
fn column_span(column: &MaskColumn, drop: i64) -> Result<Bounds> {
    coord(column.x as i64)?;
    let z0 = coord(column.bottom as i64 - drop)?;
    coord(column.top as i64 - drop)?;
    Ok(span(column.x, z0, column.top - column.bottom + 1))
}

fn union_all(spans: impl IntoIterator<Item = Bounds>) -> Bounds {
    spans
        .into_iter()
        .fold(Bounds::EMPTY, |acc, b| acc.union(&b))
}

/// Depth of the oblique front line at column `x`.
fn front_line(base: i32, dir: Oblique, x0: i32, x: i32) -> i64 {
    base as i64 + dir.sign() as i64 * (x as i64 - x0 as i64)
}

/// `height + offset`, keeping the sentinel intact.
pub fn relative_height(height: u8, offset: i32) -> u8 {
    if height == INFINITY {
        INFINITY
    } else {
        clamp_height(height as i64 + offset as i64)
    }
}

impl Heightmap {
    /// Reset to a uniform surface at `height` with no stored cells.
    pub fn clear_to_height(&mut self, height: u8) {
        self.transplant(Heightmap::new(height));
    }

    /// Mask is the footprint on the ground; each set cell becomes `height`.
    pub fn set_from_flat_base_mask(&mut self, mask: &Mask, height: u8) -> Result<()> {
        self.set_mask_cells(mask, 0, height)
    }

    /// Mask is a flat top surface drawn `height` rows above its footprint.
    pub fn set_from_flat_top_mask(&mut self, mask: &Mask, height: u8) -> Result<()> {
        self.set_mask_cells(mask, height as i64, height)
    }

    /// Mask is the footprint; each set cell becomes `height + offset`.
    pub fn set_flat_relative(&mut self, mask: &Mask, height: u8, offset: i32) -> Result<()> {
        self.set_mask_cells(mask, 0, relative_height(height, offset))
    }

    fn set_mask_cells(&mut self, mask: &Mask, drop: i64, height: u8) -> Result<()> {
        let columns: Vec<_> = mask.columns().collect();
        let region = union_all(
            columns
                .iter()
                .map(|c| column_span(c, drop))
                .collect::<Result<Vec<_>>>()?,
        );
        self.ensure_contains(region)?;

        for p in mask.set_cells() {
            // In range: column_span checked both ends of every column
            let z = (p.y as i64 - drop) as i32;
            self.put(IVec2::new(p.x, z), height);
        }
        Ok(())
    }

    /// Mask is a top surface whose front edge runs along an oblique line.
    ///
    /// The line sits at `front_edge_depth` at the mask's left column and steps
    /// one row per column along `dir`. The lowest set cell of each column lies
    /// on that line, which fixes the column's height.
    pub fn set_from_oblique_top_mask(
        &mut self,
        mask: &Mask,
        front_edge_depth: i32,
        dir: Oblique,
    ) -> Result<()> {
        let x0 = mask.bounds().min.x;
        let mut plan = Vec::new();
        for column in mask.columns() {
            let front = front_line(front_edge_depth, dir, x0, column.x);
            let height = clamp_height(column.bottom as i64 - front);
            plan.push((column, height, column_span(&column, height as i64)?));
        }
        self.ensure_contains(union_all(plan.iter().map(|&(_, _, b)| b)))?;

        for (column, height, _) in plan {
            for y in column.bottom..=column.top {
                if mask.get(IVec2::new(column.x, y)) {
                    self.put(IVec2::new(column.x, y - height as i32), height);
                }
            }
        }
        Ok(())
    }

    /// Mask is a thin upright railing standing on its lowest row.
    pub fn set_from_railing_mask(&mut self, mask: &Mask) -> Result<()> {
        let plan: Vec<_> = mask
            .columns()
            .map(|c| -> Result<(IVec2, u8)> {
                let height = clamp_height(c.top as i64 - c.bottom as i64 + 1);
                Ok((IVec2::new(coord(c.x as i64)?, coord(c.bottom as i64)?), height))
            })
            .collect::<Result<Vec<_>>>()?;
        self.ensure_contains(union_all(plan.iter().map(|&(p, _)| Bounds::cell(p))))?;

        for (p, height) in plan {
            self.put(p, height);
        }
        Ok(())
    }

    /// Mask is an upright front face standing on an oblique front line.
    ///
    /// Each column's top sets its height; the surface then runs `depth` rows
    /// back, changing by `slope` per row. `offset` raises or lowers the whole
    /// surface.
    pub fn set_from_front_edge(
        &mut self,
        mask: &Mask,
        front_edge_depth: i32,
        depth: i32,
        dir: Oblique,
        slope: i32,
        offset: i32,
    ) -> Result<()> {
        let x0 = mask.bounds().min.x;
        let rows = depth.max(1);
        let mut plan = Vec::new();
        for column in mask.columns() {
            let front = front_line(front_edge_depth, dir, x0, column.x);
            coord(column.x as i64)?;
            let z0 = coord(front)?;
            coord(front + rows as i64 - 1)?;
            let base = column.top as i64 + 1 - front + offset as i64;
            plan.push((column.x, z0, base));
        }
        self.ensure_contains(union_all(plan.iter().map(|&(x, z0, _)| span(x, z0, rows))))?;

        for (x, z0, base) in plan {
            for k in 0..rows {
                let height = clamp_height(base + slope as i64 * k as i64);
                self.put(IVec2::new(x, z0 + k), height);
            }
        }
        Ok(())
    }

    /// Mask is an upright side wall receding along `dir`.
    ///
    /// The wall stands at depth `offset` at the mask's left column and steps
    /// one row per column along `dir`; each column's top sets its height.
    pub fn set_from_oblique_side(&mut self, mask: &Mask, dir: Oblique, offset: i32) -> Result<()> {
        let x0 = mask.bounds().min.x;
        let mut plan = Vec::new();
        for column in mask.columns() {
            let z = front_line(offset, dir, x0, column.x);
            let height = clamp_height(column.top as i64 + 1 - z);
            plan.push((IVec2::new(coord(column.x as i64)?, coord(z)?), height));
        }
        self.ensure_contains(union_all(plan.iter().map(|&(p, _)| Bounds::cell(p))))?;

        for (p, height) in plan {
            self.put(p, height);
        }
        Ok(())
    }
}
