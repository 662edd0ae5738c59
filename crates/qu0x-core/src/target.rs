//! The target number of a puzzle.

use std::fmt::{self, Display};

/// The integer the player tries to reach.
///
/// The standard game draws targets from 1-100; a variant widens this to
/// 20-250. The range is a generator concern; this type only carries the
/// value.
///
/// # Examples
///
/// ```
/// use qu0x_core::Target;
///
/// let target = Target::new(82);
/// assert_eq!(target.value(), 82);
/// assert_eq!(target.to_string(), "82");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Target(u32);

impl Target {
    /// Creates a target.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the target value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl From<Target> for f64 {
    fn from(target: Target) -> f64 {
        f64::from(target.0)
    }
}
