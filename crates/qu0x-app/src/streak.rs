//! Consecutive-day streak of perfect scores.

use qu0x_generator::DayIndex;

/// A run of consecutive days with at least one perfect submit.
///
/// # Examples
///
/// ```
/// use qu0x_app::Streak;
/// use qu0x_generator::DayIndex;
///
/// let streak = Streak::default()
///     .record_perfect(DayIndex::new(4))
///     .record_perfect(DayIndex::new(5))
///     .record_perfect(DayIndex::new(5));
/// assert_eq!(streak.count, 2);
///
/// assert_eq!(streak.current(DayIndex::new(6)), 2);
/// assert_eq!(streak.current(DayIndex::new(7)), 0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Streak {
    /// Length of the run ending on `last_qualifying_day`.
    pub count: u32,
    /// The latest day with a perfect submit.
    pub last_qualifying_day: Option<DayIndex>,
}

impl Streak {
    /// Returns the streak after a perfect submit on `day`.
    ///
    /// A perfect submit on the day after the last one extends the run, and
    /// one after a gap starts a new run of one. Replaying the last day or an
    /// earlier one changes nothing.
    #[must_use]
    pub fn record_perfect(self, day: DayIndex) -> Self {
        let count = match self.last_qualifying_day {
            Some(last) if day <= last => return self,
            Some(last) if last.next() == day => self.count.saturating_add(1),
            _ => 1,
        };
        Self {
            count,
            last_qualifying_day: Some(day),
        }
    }

    /// Returns the streak as seen on `today`.
    ///
    /// The run is still alive on the day after its last perfect submit, so
    /// the player has until the end of `today` to extend it.
    #[must_use]
    pub fn current(self, today: DayIndex) -> u32 {
        match self.last_qualifying_day {
            Some(last) if last >= today || last.next() == today => self.count,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn day(n: u32) -> DayIndex {
        DayIndex::new(n)
    }

    #[test]
    fn test_gap_restarts_run() {
        let streak = Streak::default()
            .record_perfect(day(1))
            .record_perfect(day(2))
            .record_perfect(day(3));
        assert_eq!(streak.count, 3);

        let streak = streak.record_perfect(day(5));
        assert_eq!(streak.count, 1);
        assert_eq!(streak.last_qualifying_day, Some(day(5)));
    }

    #[test]
    fn test_replaying_an_old_day_keeps_run() {
        let streak = Streak::default()
            .record_perfect(day(10))
            .record_perfect(day(11));
        assert_eq!(streak.record_perfect(day(3)), streak);
        assert_eq!(streak.count, 2);
    }

    #[test]
    fn test_current() {
        assert_eq!(Streak::default().current(day(0)), 0);

        let streak = Streak::default().record_perfect(day(0));
        assert_eq!(streak.current(day(0)), 1);
        assert_eq!(streak.current(day(1)), 1);
        assert_eq!(streak.current(day(2)), 0);
    }

    proptest! {
        #[test]
        fn prop_consecutive_days_count_up(start in 0u32..10_000, len in 1u32..50) {
            let streak = (start..start + len)
                .map(DayIndex::new)
                .fold(Streak::default(), Streak::record_perfect);
            prop_assert_eq!(streak.count, len);
            prop_assert_eq!(streak.current(DayIndex::new(start + len)), len);
        }

        #[test]
        fn prop_past_days_are_ignored(n in 0u32..10_000, back in 0u32..10_000, count in 1u32..100) {
            let streak = Streak { count, last_qualifying_day: Some(day(n)) };
            prop_assert_eq!(streak.record_perfect(day(n.saturating_sub(back))), streak);
        }
    }
}
