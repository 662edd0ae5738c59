//! Puzzle seeds and the daily calendar.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use chrono::{Datelike as _, NaiveDate};
use rand::Rng as _;
use sha2::{Digest as _, Sha256};

/// Errors raised when parsing a [`PuzzleSeed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SeedError {
    /// The seed text is empty or only whitespace.
    #[display("seed must not be empty")]
    Empty,
}

/// The number of days since the first puzzle (2025-05-15).
///
/// Day 0 is the first published puzzle; players see it as game #1.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use qu0x_generator::DayIndex;
///
/// let date = NaiveDate::from_ymd_opt(2025, 5, 26).unwrap();
/// let day = DayIndex::from_date(date);
/// assert_eq!(day.get(), 11);
/// assert_eq!(day.game_number(), 12);
/// assert_eq!(day.date(), Some(date));
///
/// // Dates before the first puzzle map to day 0.
/// let early = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// assert_eq!(DayIndex::from_date(early), DayIndex::FIRST);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayIndex(u32);

impl DayIndex {
    /// Day 0.
    pub const FIRST: Self = Self(0);

    /// `2025-05-15` as days since the common era.
    const EPOCH_DAYS_FROM_CE: i32 = 739_386;

    /// Creates a day index.
    #[must_use]
    pub const fn new(day: u32) -> Self {
        Self(day)
    }

    /// Returns the day index for a calendar date.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        let diff = i64::from(date.num_days_from_ce()) - i64::from(Self::EPOCH_DAYS_FROM_CE);
        Self(u32::try_from(diff.max(0)).unwrap_or(u32::MAX))
    }

    /// Returns the raw day number.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Returns the one-based number shown to players.
    #[must_use]
    pub const fn game_number(self) -> u32 {
        self.0.saturating_add(1)
    }

    /// Returns the calendar date of this day.
    ///
    /// Returns `None` if the date is beyond the supported calendar.
    #[must_use]
    pub fn date(self) -> Option<NaiveDate> {
        let days = i32::try_from(self.0)
            .ok()?
            .checked_add(Self::EPOCH_DAYS_FROM_CE)?;
        NaiveDate::from_num_days_from_ce_opt(days)
    }

    /// Returns the previous day, if any.
    #[must_use]
    pub fn prev(self) -> Option<Self> {
        self.0.checked_sub(1).map(Self)
    }

    /// Returns the next day.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl Display for DayIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// The input that fixes a puzzle's dice and target.
///
/// A seed is either a day of the daily calendar or an arbitrary phrase for
/// practice puzzles. Parsing accepts a plain day number, an ISO date
/// (`YYYY-MM-DD`, mapped onto the calendar), or any other non-empty text.
///
/// # Examples
///
/// ```
/// use qu0x_generator::{DayIndex, PuzzleSeed};
///
/// let seed: PuzzleSeed = "12".parse()?;
/// assert_eq!(seed, PuzzleSeed::Day(DayIndex::new(12)));
///
/// let seed: PuzzleSeed = "2025-05-16".parse()?;
/// assert_eq!(seed.day(), Some(DayIndex::new(1)));
///
/// let seed: PuzzleSeed = "lunch break".parse()?;
/// assert_eq!(seed.to_string(), "lunch break");
/// assert_eq!(seed.day(), None);
///
/// assert!("  ".parse::<PuzzleSeed>().is_err());
/// # Ok::<(), qu0x_generator::SeedError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum PuzzleSeed {
    /// A day of the daily calendar.
    Day(DayIndex),
    /// A free-text practice seed.
    Phrase(String),
}

impl PuzzleSeed {
    /// Creates a fresh practice seed from the thread-local RNG.
    #[must_use]
    pub fn random() -> Self {
        let bits: u64 = rand::rng().random();
        Self::Phrase(format!("random-{bits:016x}"))
    }

    /// Returns the calendar day, if this is a daily seed.
    #[must_use]
    pub fn day(&self) -> Option<DayIndex> {
        match self {
            Self::Day(day) => Some(*day),
            Self::Phrase(_) => None,
        }
    }

    /// Returns the 32-bit value the puzzle streams are seeded from.
    ///
    /// Days use `day + 1`; phrases use the first four bytes of their SHA-256
    /// digest.
    #[must_use]
    pub fn stream_seed(&self) -> u32 {
        match self {
            Self::Day(day) => day.get().wrapping_add(1),
            Self::Phrase(phrase) => {
                let digest = digest(phrase);
                u32::from_le_bytes([digest[0], digest[1], digest[2], digest[3]])
            }
        }
    }
}

/// SHA-256 digest of a phrase seed.
pub(crate) fn digest(phrase: &str) -> [u8; 32] {
    Sha256::digest(phrase.as_bytes()).into()
}

impl From<DayIndex> for PuzzleSeed {
    fn from(day: DayIndex) -> Self {
        Self::Day(day)
    }
}

impl FromStr for PuzzleSeed {
    type Err = SeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(SeedError::Empty);
        }
        if let Ok(day) = s.parse::<u32>() {
            return Ok(Self::Day(DayIndex::new(day)));
        }
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(Self::Day(DayIndex::from_date(date)));
        }
        Ok(Self::Phrase(s.to_owned()))
    }
}

impl Display for PuzzleSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day(day) => Display::fmt(day, f),
            Self::Phrase(phrase) => f.write_str(phrase),
        }
    }
}
