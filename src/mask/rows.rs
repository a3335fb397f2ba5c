//! Text-row form of masks, for editor documents and fixtures.
//!
//! Rows are listed top to bottom; `#` is a set cell, `.` a clear one.

use super::Mask;
use crate::core::types::IVec2;
use crate::core::{Error, Result};

const SET: char = '#';
const CLEAR: char = '.';

impl Mask {
    /// Build a mask whose bottom-left cell is `min`.
    pub fn from_rows<S: AsRef<str>>(min: IVec2, rows: &[S]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().chars().count());
        let mut mask = Mask::new(Mask::checked_bounds(min, width as u64, height as u64)?);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.chars().count() != width {
                return Err(Error::InvalidMask(format!(
                    "row {} has {} cells, expected {}",
                    i,
                    row.chars().count(),
                    width
                )));
            }
            let y = min.y + (height - 1 - i) as i32;
            for (dx, c) in row.chars().enumerate() {
                match c {
                    SET => {
                        mask.set(IVec2::new(min.x + dx as i32, y), true);
                    }
                    CLEAR => {}
                    other => {
                        return Err(Error::InvalidMask(format!(
                            "unexpected character {:?} in row {}",
                            other, i
                        )));
                    }
                }
            }
        }
        Ok(mask)
    }

    /// Inverse of [`Mask::from_rows`].
    pub fn to_rows(&self) -> Vec<String> {
        let b = self.bounds();
        (b.min.y..b.max.y)
            .rev()
            .map(|y| {
                (b.min.x..b.max.x)
                    .map(|x| if self.get(IVec2::new(x, y)) { SET } else { CLEAR })
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Bounds;

    #[test]
    fn test_first_row_is_top() {
        let mask = Mask::from_rows(IVec2::new(10, 20), &["#..", "..#"]).unwrap();
        assert_eq!(mask.bounds(), Bounds::from_size(IVec2::new(10, 20), 3, 2));
        assert!(mask.get(IVec2::new(10, 21)));
        assert!(mask.get(IVec2::new(12, 20)));
        assert!(!mask.get(IVec2::new(10, 20)));
        assert_eq!(mask.to_rows(), vec!["#..", "..#"]);
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let err = Mask::from_rows(IVec2::ZERO, &["##", "#"]).unwrap_err();
        assert!(matches!(err, Error::InvalidMask(_)));
    }

    #[test]
    fn test_rejects_unknown_characters() {
        assert!(Mask::from_rows(IVec2::ZERO, &["#x"]).is_err());
    }

    #[test]
    fn test_rejects_rows_past_coordinate_range() {
        let err = Mask::from_rows(IVec2::new(i32::MAX - 1, 0), &["###"]).unwrap_err();
        assert!(matches!(err, Error::InvalidMask(_)));

        let err = Mask::from_rows(IVec2::new(0, i32::MAX), &["#", "#"]).unwrap_err();
        assert!(matches!(err, Error::InvalidMask(_)));
    }

    #[test]
    fn test_no_rows_gives_empty_mask() {
        let rows: [&str; 0] = [];
        let mask = Mask::from_rows(IVec2::ZERO, &rows).unwrap();
        assert!(mask.bounds().is_empty());
        assert!(mask.to_rows().is_empty());
    }
}
