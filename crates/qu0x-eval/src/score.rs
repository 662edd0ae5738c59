//! Scoring a value against the target.

use std::fmt::{self, Display};

use qu0x_core::Target;

/// How a value's distance from the target is measured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum ScoringPolicy {
    /// Round the value half away from zero, then take the distance.
    #[default]
    Rounded,
    /// Take the raw floating-point distance.
    Exact,
}

impl ScoringPolicy {
    /// Scores `value` against `target`.
    ///
    /// # Examples
    ///
    /// ```
    /// use qu0x_core::Target;
    /// use qu0x_eval::ScoringPolicy;
    ///
    /// let target = Target::new(4);
    /// assert_eq!(ScoringPolicy::Rounded.score(3.5, target).value(), 0.0);
    /// assert_eq!(ScoringPolicy::Exact.score(3.5, target).value(), 0.5);
    /// assert!(ScoringPolicy::Rounded.score(4.0, target).is_perfect());
    /// ```
    #[must_use]
    pub fn score(self, value: f64, target: Target) -> Score {
        self.distance(value, f64::from(target))
    }

    /// Returns the distance between two values under this policy.
    ///
    /// The distance is symmetric in its arguments.
    #[must_use]
    pub fn distance(self, a: f64, b: f64) -> Score {
        match self {
            Self::Rounded => Score((a.round() - b.round()).abs()),
            Self::Exact => Score((a - b).abs()),
        }
    }
}

/// The distance of a result from the target; `0` is perfect.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Score(f64);

impl Score {
    /// A perfect score.
    pub const PERFECT: Self = Self(0.0);

    /// Restores a score from a stored distance.
    ///
    /// Returns `None` if `distance` is negative or not finite.
    #[must_use]
    pub fn from_distance(distance: f64) -> Option<Self> {
        (distance.is_finite() && distance >= 0.0).then_some(Self(distance))
    }

    /// Returns the distance.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Returns `true` if the result hit the target exactly.
    #[must_use]
    pub fn is_perfect(self) -> bool {
        self.0 == 0.0
    }
}

impl Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 {
            write!(f, "{:.0}", self.0)
        } else {
            write!(f, "{:.3}", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_rounding_is_half_away_from_zero() {
        let policy = ScoringPolicy::Rounded;
        assert_eq!(policy.score(2.5, Target::new(3)), Score::PERFECT);
        assert_eq!(policy.score(2.49, Target::new(3)).value(), 1.0);
        assert_eq!(policy.distance(-0.5, 1.0).value(), 2.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Score::PERFECT.to_string(), "0");
        assert_eq!(ScoringPolicy::Exact.distance(1.0, 7.0).to_string(), "6");
        assert_eq!(ScoringPolicy::Exact.distance(3.5, 4.0).to_string(), "0.500");
    }

    #[test]
    fn test_from_distance() {
        assert_eq!(Score::from_distance(0.0), Some(Score::PERFECT));
        assert_eq!(Score::from_distance(2.5).map(Score::value), Some(2.5));
        assert_eq!(Score::from_distance(-1.0), None);
        assert_eq!(Score::from_distance(f64::NAN), None);
        assert_eq!(Score::from_distance(f64::INFINITY), None);
    }

    proptest! {
        #[test]
        fn prop_distance_is_symmetric(a in -1e6f64..1e6, b in -1e6f64..1e6) {
            for policy in [ScoringPolicy::Rounded, ScoringPolicy::Exact] {
                prop_assert_eq!(policy.distance(a, b), policy.distance(b, a));
            }
        }

        #[test]
        fn prop_integers_score_alike(value in -1000i32..1000, target in 0u32..1000) {
            let rounded = ScoringPolicy::Rounded.score(f64::from(value), Target::new(target));
            let exact = ScoringPolicy::Exact.score(f64::from(value), Target::new(target));
            prop_assert_eq!(rounded, exact);
            prop_assert_eq!(rounded.is_perfect(), i64::from(value) == i64::from(target));
        }
    }
}
