//! Progress statistics over the daily calendar.

use std::{
    collections::BTreeMap,
    fmt::{self, Display},
};

use qu0x_generator::DayIndex;

/// Progress over the daily calendar up to some day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics {
    /// Days from day 0 through the latest, inclusive.
    pub total_days: u32,
    /// Days with a perfect best score.
    pub perfect_days: u32,
    /// Sum of best scores, if every day has one.
    pub master_score: Option<f64>,
}

impl Statistics {
    /// Computes statistics from per-day best scores, counting days
    /// `0..=latest`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::BTreeMap;
    ///
    /// use qu0x_app::Statistics;
    /// use qu0x_generator::DayIndex;
    ///
    /// let best = BTreeMap::from([(0, 0.0), (1, 3.0), (2, 0.0)]);
    /// let stats = Statistics::compute(&best, DayIndex::new(2));
    /// assert_eq!(stats.perfect_days, 2);
    /// assert_eq!(stats.master_score, Some(3.0));
    ///
    /// let stats = Statistics::compute(&best, DayIndex::new(3));
    /// assert_eq!(stats.master_score, None);
    /// ```
    #[must_use]
    pub fn compute(best: &BTreeMap<u32, f64>, latest: DayIndex) -> Self {
        let in_range = || best.range(..=latest.get()).map(|(_, score)| *score);
        let perfect_days = in_range().filter(|score| *score == 0.0).count();
        let total_days = latest.game_number();
        let scored_days = best.range(..=latest.get()).count();
        let master_score = (u32::try_from(scored_days).ok() == Some(total_days))
            .then(|| in_range().sum());
        Self {
            total_days,
            perfect_days: u32::try_from(perfect_days).unwrap_or(u32::MAX),
            master_score,
        }
    }

    /// Returns the share of days solved perfectly, in `0.0..=1.0`.
    #[must_use]
    pub fn completion_ratio(&self) -> f64 {
        if self.total_days == 0 {
            return 0.0;
        }
        f64::from(self.perfect_days) / f64::from(self.total_days)
    }
}

impl Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "solved {}/{} ({:.1}%)",
            self.perfect_days,
            self.total_days,
            self.completion_ratio() * 100.0
        )?;
        match self.master_score {
            Some(score) => write!(f, ", master score {score}"),
            None => f.write_str(", master score pending"),
        }
    }
}
