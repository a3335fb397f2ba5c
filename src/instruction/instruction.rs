//! A single heightmap-building step.

use std::sync::Arc;

use crate::core::{Error, Result};
use crate::heightmap::{Heightmap, Oblique};
use crate::mask::Mask;

use super::HeightmapOp;

/// One parameterized heightmap operation.
///
/// A flat record: every argument field exists for every operation, and each
/// operation reads only the fields listed by [`HeightmapOp::parameters`]. The
/// others may hold stale values from editing and are ignored.
///
/// Cloning is shallow; the clone shares the mask.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightmapInstruction {
    operation: HeightmapOp,
    pub mask: Option<Arc<Mask>>,

    // Possible arguments:
    pub height: u8,
    pub oblique: Oblique,
    pub front_edge_depth: i32,
    pub depth: i32,
    pub slope: i32,
    pub offset: i32,
}

impl HeightmapInstruction {
    /// Create an instruction with zeroed arguments and no mask.
    pub fn new(operation: HeightmapOp) -> Self {
        Self {
            operation,
            mask: None,
            height: 0,
            oblique: Oblique::Straight,
            front_edge_depth: 0,
            depth: 0,
            slope: 0,
            offset: 0,
        }
    }

    pub fn with_mask(mut self, mask: impl Into<Arc<Mask>>) -> Self {
        self.mask = Some(mask.into());
        self
    }

    pub fn with_height(mut self, height: u8) -> Self {
        self.height = height;
        self
    }

    pub fn with_oblique(mut self, oblique: Oblique) -> Self {
        self.oblique = oblique;
        self
    }

    pub fn with_front_edge_depth(mut self, front_edge_depth: i32) -> Self {
        self.front_edge_depth = front_edge_depth;
        self
    }

    pub fn with_depth(mut self, depth: i32) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_slope(mut self, slope: i32) -> Self {
        self.slope = slope;
        self
    }

    pub fn with_offset(mut self, offset: i32) -> Self {
        self.offset = offset;
        self
    }

    pub fn operation(&self) -> HeightmapOp {
        self.operation
    }

    pub fn requires_mask(&self) -> bool {
        self.operation.requires_mask()
    }

    /// Check the preconditions of [`process`](Self::process) without running it.
    pub fn validate(&self, has_base: bool) -> Result<()> {
        if self.requires_mask() && self.mask.is_none() {
            return Err(Error::MissingMask { op: self.operation });
        }
        if self.operation.requires_base() && !has_base {
            return Err(Error::MissingBaseHeightmap { op: self.operation });
        }
        Ok(())
    }

    fn required_mask(&self) -> Result<&Mask> {
        self.mask
            .as_deref()
            .ok_or(Error::MissingMask { op: self.operation })
    }

    /// Apply this instruction to `heightmap`.
    ///
    /// `base` is the heightmap a shadow receiver is derived from; only
    /// [`HeightmapOp::CreateExtendedObliqueFromBase`] reads it. Fails without
    /// touching `heightmap` when a required mask or base is missing.
    /// Unrecognized operations do nothing.
    pub fn process(&self, heightmap: &mut Heightmap, base: Option<&Heightmap>) -> Result<()> {
        self.validate(base.is_some())?;
        log::debug!("Processing {}", self);

        match self.operation {
            HeightmapOp::ClearToHeight => {
                heightmap.clear_to_height(self.height);
            }
            HeightmapOp::SetFromFlatBaseMask => {
                heightmap.set_from_flat_base_mask(self.required_mask()?, self.height)?;
            }
            HeightmapOp::SetFromFlatTopMask => {
                heightmap.set_from_flat_top_mask(self.required_mask()?, self.height)?;
            }
            HeightmapOp::SetFromObliqueTopMask => {
                heightmap.set_from_oblique_top_mask(
                    self.required_mask()?,
                    self.front_edge_depth,
                    self.oblique,
                )?;
            }
            HeightmapOp::SetFromRailingMask => {
                heightmap.set_from_railing_mask(self.required_mask()?)?;
            }
            HeightmapOp::SetFromFrontEdge => {
                heightmap.set_from_front_edge(
                    self.required_mask()?,
                    self.front_edge_depth,
                    self.depth,
                    self.oblique,
                    self.slope,
                    self.offset,
                )?;
            }
            HeightmapOp::SetFlatRelative => {
                heightmap.set_flat_relative(self.required_mask()?, self.height, self.offset)?;
            }
            HeightmapOp::SetFromSideOblique => {
                heightmap.set_from_oblique_side(self.required_mask()?, self.oblique, self.offset)?;
            }
            HeightmapOp::CreateExtendedObliqueFromBase => {
                let base = base.ok_or(Error::MissingBaseHeightmap { op: self.operation })?;
                let extended = base.create_extended_oblique(self.oblique)?;
                heightmap.transplant(extended);
            }
            HeightmapOp::ExtendOblique => {
                let extended = heightmap.create_extended_oblique(self.oblique)?;
                heightmap.transplant(extended);
            }
            HeightmapOp::FillLeft => heightmap.fill_left(None),
            HeightmapOp::FillLeftFixedHeight => heightmap.fill_left(Some(self.height)),
            HeightmapOp::FillRight => heightmap.fill_right(None),
            HeightmapOp::FillRightFixedHeight => heightmap.fill_right(Some(self.height)),
            HeightmapOp::Unrecognized(code) => {
                log::debug!("Ignoring unrecognized heightmap operation {}", code);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::IVec2;
    use crate::heightmap::INFINITY;
    use crate::math::Bounds;

    fn mask(rows: &[&str]) -> Arc<Mask> {
        Arc::new(Mask::from_rows(IVec2::ZERO, rows).unwrap())
    }

    #[test]
    fn test_flat_relative_scenario() {
        let m = mask(&["#..", ".##", "#.#"]);
        let instruction = HeightmapInstruction::new(HeightmapOp::SetFlatRelative)
            .with_mask(m.clone())
            .with_height(10)
            .with_offset(3);

        let mut heightmap = Heightmap::new(0);
        instruction.process(&mut heightmap, None).unwrap();

        for p in Bounds::from_size(IVec2::new(-1, -1), 5, 5).cells() {
            let expected = if m.get(p) { 13 } else { 0 };
            assert_eq!(heightmap.get(p), expected, "cell {:?}", p);
        }
    }

    #[test]
    fn test_clear_twice_equals_clear_once() {
        let m = mask(&["##"]);
        let mut start = Heightmap::new(0);
        HeightmapInstruction::new(HeightmapOp::SetFromFlatBaseMask)
            .with_mask(m)
            .with_height(20)
            .process(&mut start, None)
            .unwrap();

        let mut twice = start.clone();
        HeightmapInstruction::new(HeightmapOp::ClearToHeight)
            .with_height(4)
            .process(&mut twice, None)
            .unwrap();
        HeightmapInstruction::new(HeightmapOp::ClearToHeight)
            .with_height(9)
            .process(&mut twice, None)
            .unwrap();

        let mut once = start;
        HeightmapInstruction::new(HeightmapOp::ClearToHeight)
            .with_height(9)
            .process(&mut once, None)
            .unwrap();

        assert_eq!(twice, once);
    }

    #[test]
    fn test_missing_mask_fails_without_mutation() {
        for op in HeightmapOp::ALL.into_iter().filter(|op| op.requires_mask()) {
            let mut heightmap = Heightmap::new(5);
            heightmap.set(IVec2::new(1, 1), 7).unwrap();
            let before = heightmap.clone();

            let err = HeightmapInstruction::new(op)
                .process(&mut heightmap, None)
                .unwrap_err();
            assert!(matches!(err, Error::MissingMask { op: o } if o == op));
            assert_eq!(heightmap, before);
        }
    }

    #[test]
    fn test_maskless_ops_ignore_supplied_mask() {
        let m = mask(&["###"]);
        for op in HeightmapOp::ALL.into_iter().filter(|op| !op.requires_mask()) {
            let mut with = Heightmap::new(0);
            with.set(IVec2::new(2, 0), 3).unwrap();
            let mut without = with.clone();
            let base = with.clone();

            let plain = HeightmapInstruction::new(op).with_height(6).with_oblique(Oblique::Right);
            plain.process(&mut without, Some(&base)).unwrap();
            plain.clone().with_mask(m.clone()).process(&mut with, Some(&base)).unwrap();
            assert_eq!(with, without, "{}", op);
        }
    }

    #[test]
    fn test_extend_from_base_leaves_base_alone() {
        let mut base = Heightmap::new(2);
        base.set(IVec2::new(0, 0), 8).unwrap();
        base.set(IVec2::new(1, 2), 4).unwrap();
        let snapshot = base.clone();

        let mut receiver = Heightmap::new(0);
        receiver.set(IVec2::new(30, 30), 1).unwrap();
        HeightmapInstruction::new(HeightmapOp::CreateExtendedObliqueFromBase)
            .with_oblique(Oblique::Left)
            .process(&mut receiver, Some(&base))
            .unwrap();

        assert_eq!(base, snapshot);
        assert_eq!(receiver, base.create_extended_oblique(Oblique::Left).unwrap());
        assert_eq!(receiver.default_height(), 2);
    }

    #[test]
    fn test_extend_from_base_needs_base() {
        let mut heightmap = Heightmap::new(0);
        let err = HeightmapInstruction::new(HeightmapOp::CreateExtendedObliqueFromBase)
            .process(&mut heightmap, None)
            .unwrap_err();
        assert!(matches!(err, Error::MissingBaseHeightmap { .. }));
    }

    #[test]
    fn test_fill_left_fixed_after_profile() {
        let m = mask(&["..##", ".###", "...#"]);
        let mut heightmap = Heightmap::new(0);
        HeightmapInstruction::new(HeightmapOp::SetFromFlatBaseMask)
            .with_mask(m.clone())
            .with_height(20)
            .process(&mut heightmap, None)
            .unwrap();
        let profile = heightmap.clone();

        HeightmapInstruction::new(HeightmapOp::FillLeftFixedHeight)
            .with_height(5)
            .process(&mut heightmap, None)
            .unwrap();

        let b = heightmap.bounds();
        assert_eq!(b, profile.bounds());
        for z in b.min.y..b.max.y {
            let edge = (b.min.x..b.max.x).find(|&x| m.get(IVec2::new(x, z))).unwrap();
            for x in b.min.x..b.max.x {
                let p = IVec2::new(x, z);
                if x < edge {
                    assert_eq!(heightmap.get(p), 5, "cell {:?}", p);
                } else {
                    assert_eq!(heightmap.get(p), profile.get(p), "cell {:?}", p);
                }
            }
        }
    }

    #[test]
    fn test_extension_past_coordinate_range_leaves_target() {
        use crate::heightmap::grid::COORD_LIMIT;

        let mut base = Heightmap::new(0);
        base.set(IVec2::new(COORD_LIMIT as i32, 0), 3).unwrap();
        base.set(IVec2::new(COORD_LIMIT as i32, 2), 3).unwrap();

        let mut receiver = Heightmap::new(1);
        receiver.set(IVec2::new(0, 0), 6).unwrap();
        let before = receiver.clone();
        let err = HeightmapInstruction::new(HeightmapOp::CreateExtendedObliqueFromBase)
            .with_oblique(Oblique::Right)
            .process(&mut receiver, Some(&base))
            .unwrap_err();
        assert!(matches!(err, Error::CoordinateOutOfRange(_)));
        assert_eq!(receiver, before);

        let before = base.clone();
        let err = HeightmapInstruction::new(HeightmapOp::ExtendOblique)
            .with_oblique(Oblique::Right)
            .process(&mut base, None)
            .unwrap_err();
        assert!(matches!(err, Error::CoordinateOutOfRange(_)));
        assert_eq!(base, before);
    }

    #[test]
    fn test_far_mask_fails_instead_of_writing() {
        let far = Arc::new(Mask::filled(Bounds::from_size(IVec2::new(i32::MAX - 2, 0), 1, 3)));
        let mut heightmap = Heightmap::new(0);
        let err = HeightmapInstruction::new(HeightmapOp::SetFromFlatBaseMask)
            .with_mask(far)
            .with_height(4)
            .process(&mut heightmap, None)
            .unwrap_err();
        assert!(matches!(err, Error::CoordinateOutOfRange(_)));
        assert!(heightmap.is_empty());
    }

    #[test]
    fn test_unrecognized_is_noop() {
        let mut heightmap = Heightmap::new(INFINITY);
        heightmap.set(IVec2::new(3, 3), 1).unwrap();
        let before = heightmap.clone();

        HeightmapInstruction::new(HeightmapOp::Unrecognized(77))
            .process(&mut heightmap, None)
            .unwrap();
        assert_eq!(heightmap, before);
    }

    #[test]
    fn test_clone_shares_mask() {
        let instruction = HeightmapInstruction::new(HeightmapOp::SetFromRailingMask)
            .with_mask(mask(&["#"]));
        let copy = instruction.clone();
        assert!(Arc::ptr_eq(
            instruction.mask.as_ref().unwrap(),
            copy.mask.as_ref().unwrap()
        ));
        assert_eq!(copy, instruction);
    }
}
