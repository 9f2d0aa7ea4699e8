#[cfg(feature = "derive_serde")]
use serde::{Deserialize, Serialize};


// ================================
//      Axes and swizzles
// ================================

#[cfg_attr(feature = "derive_serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    #[inline]
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            'x' => Some(Self::X),
            'y' => Some(Self::Y),
            'z' => Some(Self::Z),
            _   => None,
        }
    }

    #[inline]
    pub fn as_char(self) -> char {
        match self {
            Self::X => 'x',
            Self::Y => 'y',
            Self::Z => 'z',
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

/// A non-empty set of axes, written as a string like `xz` in which no axis is repeated.
#[cfg_attr(feature = "derive_serde",    derive(Serialize, Deserialize))]
#[cfg_attr(feature = "derive_standard", derive(PartialOrd, Ord))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Swizzle {
    axes: [bool; 3],
}

impl Swizzle {
    pub fn parse(swizzle: &str) -> Result<Self, SwizzleError> {
        let mut axes = [false; 3];

        for (index, ch) in swizzle.char_indices() {
            let axis = Axis::from_char(ch).ok_or(SwizzleError::Unexpected { index, ch })?;
            if axes[axis.index()] {
                return Err(SwizzleError::Repeated { index, axis });
            }
            axes[axis.index()] = true;
        }

        if axes.contains(&true) {
            Ok(Self { axes })
        } else {
            Err(SwizzleError::Empty)
        }
    }

    #[inline]
    pub fn contains(self, axis: Axis) -> bool {
        self.axes[axis.index()]
    }

    /// Every valid way of writing a swizzle, shortest first, each length in `x < y < z` order.
    pub fn spellings() -> Vec<String> {
        fn extend(prefix: &mut String, len: usize, out: &mut Vec<String>) {
            if prefix.len() == len {
                out.push(prefix.clone());
                return;
            }
            for axis in Axis::ALL {
                if !prefix.contains(axis.as_char()) {
                    prefix.push(axis.as_char());
                    extend(prefix, len, out);
                    prefix.pop();
                }
            }
        }

        let mut spellings = Vec::new();
        for len in 1..=Axis::ALL.len() {
            extend(&mut String::with_capacity(len), len, &mut spellings);
        }
        spellings
    }
}

/// Why a string is not a [`Swizzle`]. Indices are byte offsets into the string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwizzleError {
    Empty,
    Unexpected { index: usize, ch: char },
    Repeated { index: usize, axis: Axis },
}

// ================================
//      Coordinates
// ================================

#[cfg_attr(feature = "derive_serde",    derive(Serialize, Deserialize))]
#[cfg_attr(feature = "derive_standard", derive(PartialOrd, Ord, Hash))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateKind {
    Absolute,
    /// Written with `~`, relative to the executing position.
    Relative,
    /// Written with `^`, relative to the executing position and rotation.
    Local,
}

impl CoordinateKind {
    #[inline]
    pub fn from_prefix(ch: char) -> Option<Self> {
        match ch {
            '~' => Some(Self::Relative),
            '^' => Some(Self::Local),
            _   => None,
        }
    }

    #[inline]
    pub fn prefix(self) -> Option<char> {
        match self {
            Self::Absolute => None,
            Self::Relative => Some('~'),
            Self::Local    => Some('^'),
        }
    }
}

/// One component of a position argument, such as `~`, `^-1.5`, or `64`.
#[cfg_attr(feature = "derive_serde",    derive(Serialize, Deserialize))]
#[cfg_attr(feature = "derive_standard", derive(PartialEq, PartialOrd))]
#[derive(Debug, Clone, Copy)]
pub struct Coordinate {
    pub kind:  CoordinateKind,
    /// For relative and local coordinates, the offset, which is zero if omitted.
    pub value: f64,
}

/// The inclusive range of block positions which commands may refer to.
#[cfg_attr(feature = "derive_serde",    derive(Serialize, Deserialize))]
#[cfg_attr(feature = "derive_standard", derive(PartialOrd, Ord, Hash))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldBounds {
    pub min: [i64; 3],
    pub max: [i64; 3],
}

impl WorldBounds {
    pub const JAVA: Self = Self {
        min: [-30_000_000,   0, -30_000_000],
        max: [ 30_000_000, 256,  30_000_000],
    };

    #[inline]
    pub fn contains(&self, axis: Axis, value: f64) -> bool {
        let index = axis.index();
        // The bounds are far below 2^52, so the casts are exact
        let (min, max) = (self.min[index] as f64, self.max[index] as f64);
        min <= value && value <= max
    }
}

impl Default for WorldBounds {
    #[inline]
    fn default() -> Self {
        Self::JAVA
    }
}


#[cfg(test)]
mod tests {
    use super::*;


    #[test]
    fn swizzles() {
        let swizzle = Swizzle::parse("zx").unwrap();
        assert!(swizzle.contains(Axis::X));
        assert!(!swizzle.contains(Axis::Y));

        assert_eq!(
            Swizzle::parse("xx"),
            Err(SwizzleError::Repeated { index: 1, axis: Axis::X }),
        );
        assert_eq!(
            Swizzle::parse("xw"),
            Err(SwizzleError::Unexpected { index: 1, ch: 'w' }),
        );
        assert_eq!(Swizzle::parse(""), Err(SwizzleError::Empty));
    }

    #[test]
    fn swizzle_spellings() {
        let spellings = Swizzle::spellings();
        assert_eq!(spellings.len(), 15);
        assert_eq!(&spellings[..4], ["x", "y", "z", "xy"]);
        assert_eq!(spellings.last().map(String::as_str), Some("zyx"));
        assert!(spellings.iter().all(|spelling| Swizzle::parse(spelling).is_ok()));
    }

    #[test]
    fn bounds() {
        let bounds = WorldBounds::JAVA;
        assert!(bounds.contains(Axis::Y, 256.0));
        assert!(!bounds.contains(Axis::Y, -1.0));
        assert!(bounds.contains(Axis::X, -30_000_000.0));
        assert!(!bounds.contains(Axis::Z, 30_000_001.0));
    }

    #[test]
    fn coordinate_prefixes() {
        assert_eq!(CoordinateKind::from_prefix('~'), Some(CoordinateKind::Relative));
        assert_eq!(CoordinateKind::Local.prefix(), Some('^'));
        assert_eq!(CoordinateKind::from_prefix('1'), None);
    }
}
