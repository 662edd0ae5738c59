//! Die face representation.

use std::fmt::{self, Display};

use crate::Digit;

/// Errors raised when constructing dice values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum DieError {
    /// The face value is not a single non-zero digit.
    #[display("die face must be between 1 and 9, got {value}")]
    FaceOutOfRange {
        /// The rejected value.
        value: u8,
    },
    /// The face range bounds are inverted or outside 1-9.
    #[display("invalid face range {min}..={max}")]
    InvalidRange {
        /// Requested lower bound.
        min: u8,
        /// Requested upper bound.
        max: u8,
    },
}

/// A single die face in the range 1-9.
///
/// Faces are always a single decimal digit so that every die maps to exactly
/// one character of expression text. The range actually rolled by a puzzle is
/// narrower and described by [`FaceRange`].
///
/// # Examples
///
/// ```
/// use qu0x_core::Die;
///
/// let die = Die::new(5)?;
/// assert_eq!(die.value(), 5);
/// assert_eq!(die.to_string(), "5");
///
/// assert!(Die::new(0).is_err());
/// assert!(Die::new(10).is_err());
/// # Ok::<(), qu0x_core::DieError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Die(u8);

impl Die {
    /// Smallest face any die may show.
    pub const MIN: u8 = 1;
    /// Largest face any die may show.
    pub const MAX: u8 = 9;

    /// Creates a die showing `value`.
    ///
    /// # Errors
    ///
    /// Returns [`DieError::FaceOutOfRange`] if `value` is not in 1-9.
    pub const fn new(value: u8) -> Result<Self, DieError> {
        if value < Self::MIN || value > Self::MAX {
            return Err(DieError::FaceOutOfRange { value });
        }
        Ok(Self(value))
    }

    /// Creates a die from the character `'1'..='9'`.
    #[must_use]
    pub fn from_char(ch: char) -> Option<Self> {
        Digit::from_char(ch).and_then(|digit| Self::try_from(digit).ok())
    }

    /// Returns the face value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Returns the face as its single expression character.
    #[must_use]
    pub fn as_char(self) -> char {
        char::from(b'0' + self.0)
    }
}

impl Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl From<Die> for u8 {
    fn from(die: Die) -> u8 {
        die.value()
    }
}

impl TryFrom<u8> for Die {
    type Error = DieError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// The inclusive range of faces a puzzle's dice are rolled from.
///
/// The standard game uses six-sided dice; a variant rolls 1-9.
///
/// # Examples
///
/// ```
/// use qu0x_core::{Die, FaceRange};
///
/// let range = FaceRange::default();
/// assert_eq!((range.min(), range.max()), (1, 6));
/// assert_eq!(range.span(), 6);
/// assert!(range.contains(Die::new(6)?));
/// assert!(!range.contains(Die::new(7)?));
///
/// // Out-of-range draws are clamped back into the range.
/// assert_eq!(range.clamp(-3).value(), 1);
/// assert_eq!(range.clamp(42).value(), 6);
/// # Ok::<(), qu0x_core::DieError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FaceRange {
    min: u8,
    max: u8,
}

impl FaceRange {
    /// Six-sided dice, faces 1-6.
    pub const D6: Self = Self { min: 1, max: 6 };
    /// Nine-sided dice, faces 1-9.
    pub const D9: Self = Self { min: 1, max: 9 };

    /// Creates a face range `min..=max`.
    ///
    /// # Errors
    ///
    /// Returns [`DieError::InvalidRange`] if `min > max` or either bound is
    /// outside 1-9.
    pub const fn new(min: u8, max: u8) -> Result<Self, DieError> {
        if min < Die::MIN || max > Die::MAX || min > max {
            return Err(DieError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Returns the lowest face.
    #[must_use]
    pub const fn min(self) -> u8 {
        self.min
    }

    /// Returns the highest face.
    #[must_use]
    pub const fn max(self) -> u8 {
        self.max
    }

    /// Returns the number of distinct faces.
    #[must_use]
    pub const fn span(self) -> u8 {
        self.max - self.min + 1
    }

    /// Returns `true` if `die` can be rolled from this range.
    #[must_use]
    pub const fn contains(self, die: Die) -> bool {
        die.0 >= self.min && die.0 <= self.max
    }

    /// Clamps an arbitrary draw into the range.
    #[must_use]
    pub fn clamp(self, value: i64) -> Die {
        let clamped = value.clamp(i64::from(self.min), i64::from(self.max));
        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let face = clamped as u8;
        Die(face)
    }
}

impl Default for FaceRange {
    fn default() -> Self {
        Self::D6
    }
}

impl Display for FaceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.min, self.max)
    }
}
