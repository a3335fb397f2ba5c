//! Slope directions for oblique surfaces.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};

/// Diagonal a surface recedes along as it goes back into the scene.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i8)]
pub enum Oblique {
    Left = -1,
    #[default]
    Straight = 0,
    Right = 1,
}

impl Oblique {
    pub const ALL: [Oblique; 3] = [Oblique::Left, Oblique::Straight, Oblique::Right];

    /// Sideways step per row of depth: -1, 0 or +1.
    pub fn sign(self) -> i32 {
        self as i8 as i32
    }

    /// Decode a persisted direction byte.
    pub fn from_i8(value: i8) -> Result<Self> {
        match value {
            -1 => Ok(Oblique::Left),
            0 => Ok(Oblique::Straight),
            1 => Ok(Oblique::Right),
            other => Err(Error::InvalidOblique(other)),
        }
    }
}

impl fmt::Display for Oblique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Oblique::Left => "Left",
            Oblique::Straight => "Straight",
            Oblique::Right => "Right",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_matches_persisted_byte() {
        for dir in Oblique::ALL {
            assert_eq!(Oblique::from_i8(dir as i8).unwrap(), dir);
            assert_eq!(dir.sign(), dir as i8 as i32);
        }
        assert_eq!(Oblique::Left.sign(), -1);
        assert_eq!(Oblique::Right.sign(), 1);
    }

    #[test]
    fn test_rejects_unknown_byte() {
        assert!(matches!(Oblique::from_i8(2), Err(Error::InvalidOblique(2))));
    }
}
