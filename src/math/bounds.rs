//! Integer rectangle over a 2D cell grid

use crate::core::types::IVec2;

/// Half-open integer rectangle: `min` is inside, `max` is not
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bounds {
    pub min: IVec2,
    pub max: IVec2,
}

impl Bounds {
    pub const EMPTY: Bounds = Bounds {
        min: IVec2::ZERO,
        max: IVec2::ZERO,
    };

    /// Create bounds from min (inclusive) and max (exclusive) corners
    pub fn new(min: IVec2, max: IVec2) -> Self {
        Self { min, max }
    }

    /// Create bounds from a min corner and a size
    pub fn from_size(min: IVec2, width: i32, height: i32) -> Self {
        Self {
            min,
            max: IVec2::new(
                min.x.saturating_add(width),
                min.y.saturating_add(height),
            ),
        }
    }

    /// Bounds covering exactly one cell
    pub fn cell(p: IVec2) -> Self {
        Self::from_size(p, 1, 1)
    }

    pub fn width(&self) -> i32 {
        self.max.x.saturating_sub(self.min.x).max(0)
    }

    pub fn height(&self) -> i32 {
        self.max.y.saturating_sub(self.min.y).max(0)
    }

    pub fn is_empty(&self) -> bool {
        self.max.x <= self.min.x || self.max.y <= self.min.y
    }

    /// Number of cells covered
    pub fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    /// Check if a cell is inside
    pub fn contains(&self, p: IVec2) -> bool {
        p.x >= self.min.x && p.x < self.max.x &&
        p.y >= self.min.y && p.y < self.max.y
    }

    /// Check if other lies entirely inside (empty bounds are contained everywhere)
    pub fn contains_bounds(&self, other: &Bounds) -> bool {
        other.is_empty() || (
            !self.is_empty() &&
            other.min.x >= self.min.x && other.max.x <= self.max.x &&
            other.min.y >= self.min.y && other.max.y <= self.max.y
        )
    }

    /// Return bounds containing both; empty operands are ignored
    pub fn union(&self, other: &Bounds) -> Bounds {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Bounds {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Row-major index of a cell, if inside
    pub fn index_of(&self, p: IVec2) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        let dx = (p.x - self.min.x) as usize;
        let dy = (p.y - self.min.y) as usize;
        Some(dy * self.width() as usize + dx)
    }

    /// Iterate cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = IVec2> + use<> {
        let b = *self;
        (b.min.y..b.max.y).flat_map(move |y| (b.min.x..b.max.x).map(move |x| IVec2::new(x, y)))
    }
}
