//! Decimal digits as they appear in expression text.

use std::fmt::{self, Display};

use crate::Die;

/// A single decimal digit, 0-9.
///
/// Every number token of an [`Expression`](crate::Expression) is one digit.
/// Dice only show 1-9, so a `0` can be typed and evaluated but never matches
/// a die.
///
/// # Examples
///
/// ```
/// use qu0x_core::{Die, Digit};
///
/// let digit = Digit::from_char('0').unwrap();
/// assert_eq!(digit.value(), 0);
/// assert!(Die::try_from(digit).is_err());
///
/// let digit = Digit::from(Die::new(5)?);
/// assert_eq!(digit.to_string(), "5");
/// assert_eq!(Die::try_from(digit)?.value(), 5);
/// # Ok::<(), qu0x_core::DieError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Digit(u8);

impl Digit {
    /// The largest digit.
    pub const MAX: u8 = 9;

    /// Creates a digit, returning `None` unless `value` is in 0-9.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value > Self::MAX {
            return None;
        }
        Some(Self(value))
    }

    /// Parses the characters `'0'..='9'`.
    #[must_use]
    pub fn from_char(ch: char) -> Option<Self> {
        let value = ch.to_digit(10)?;
        u8::try_from(value).ok().and_then(Self::new)
    }

    /// Returns the digit's value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl From<Die> for Digit {
    fn from(die: Die) -> Self {
        Self(die.value())
    }
}

impl TryFrom<Digit> for Die {
    type Error = crate::DieError;

    fn try_from(digit: Digit) -> Result<Self, Self::Error> {
        Self::new(digit.value())
    }
}
