//! Serializable records stored in the key-value store.
//!
//! Every record carries a `version`. Records written by a newer build are
//! refused on load rather than misread.

use std::collections::{BTreeMap, BTreeSet};

use qu0x_core::{DICE_COUNT, Expression, ParseExpressionError};
use qu0x_eval::Score;
use qu0x_game::Attempt;
use qu0x_generator::{DayIndex, GeneratedPuzzle};
use serde::{Deserialize, Serialize};

use crate::Streak;

/// The record layout this build reads and writes.
pub const RECORD_VERSION: u32 = 1;

/// Errors raised when a stored record cannot be turned back into game values.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum RecordError {
    /// A stored expression does not tokenize.
    #[display("stored expression is invalid: {_0}")]
    Expression(#[from] ParseExpressionError),
    /// A stored score is negative or not finite.
    #[display("stored score {value} is invalid")]
    Score {
        /// The rejected score.
        value: f64,
    },
}

/// Reads only the version of a record, whatever its shape.
#[derive(Debug, Deserialize)]
pub(crate) struct VersionProbe {
    pub(crate) version: u32,
}

/// One submitted attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptRecord {
    /// Expression text.
    pub expression: String,
    /// Evaluated value.
    pub result: f64,
    /// Distance from the target.
    pub score: f64,
    /// Submit time, seconds since the Unix epoch.
    pub timestamp: i64,
}

impl AttemptRecord {
    /// Records `attempt` as submitted at `timestamp`.
    #[must_use]
    pub fn new(attempt: &Attempt, timestamp: i64) -> Self {
        Self {
            expression: attempt.expression.to_string(),
            result: attempt.result,
            score: attempt.score.value(),
            timestamp,
        }
    }
}

impl TryFrom<&AttemptRecord> for Attempt {
    type Error = RecordError;

    fn try_from(record: &AttemptRecord) -> Result<Self, Self::Error> {
        let expression = record.expression.parse::<Expression>()?;
        let score = Score::from_distance(record.score).ok_or(RecordError::Score {
            value: record.score,
        })?;
        Ok(Attempt {
            expression,
            result: record.result,
            score,
        })
    }
}

/// Everything played on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    /// Record layout version.
    pub version: u32,
    /// The seed text.
    pub seed: String,
    /// The dice, in order.
    pub dice: [u8; DICE_COUNT],
    /// The target.
    pub target: u32,
    /// Attempts, oldest first.
    pub attempts: Vec<AttemptRecord>,
}

impl DayRecord {
    /// Creates an empty record for `puzzle`.
    #[must_use]
    pub fn new(puzzle: &GeneratedPuzzle) -> Self {
        Self {
            version: RECORD_VERSION,
            seed: puzzle.seed.to_string(),
            dice: puzzle.dice.values(),
            target: puzzle.target.value(),
            attempts: Vec::new(),
        }
    }

    /// Returns `true` if the record was played on exactly this puzzle.
    ///
    /// Changing the face or target range changes a day's puzzle, so the same
    /// day can carry a record for different dice.
    #[must_use]
    pub fn matches(&self, puzzle: &GeneratedPuzzle) -> bool {
        self.dice == puzzle.dice.values() && self.target == puzzle.target.value()
    }

    /// Converts the stored attempts back into game attempts.
    ///
    /// # Errors
    ///
    /// Returns the first attempt that cannot be restored.
    pub fn attempts(&self) -> Result<Vec<Attempt>, RecordError> {
        self.attempts.iter().map(Attempt::try_from).collect()
    }
}

/// The running streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakRecord {
    /// Record layout version.
    pub version: u32,
    /// Length of the run.
    pub count: u32,
    /// Latest day with a perfect submit.
    pub last_qualifying_day: Option<u32>,
}

impl From<Streak> for StreakRecord {
    fn from(streak: Streak) -> Self {
        Self {
            version: RECORD_VERSION,
            count: streak.count,
            last_qualifying_day: streak.last_qualifying_day.map(DayIndex::get),
        }
    }
}

impl From<StreakRecord> for Streak {
    fn from(record: StreakRecord) -> Self {
        Self {
            count: record.count,
            last_qualifying_day: record.last_qualifying_day.map(DayIndex::new),
        }
    }
}

/// Per-day best scores and winning expressions.
///
/// Kept apart from [`DayRecord`]s so that statistics survive archive pruning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBook {
    /// Record layout version.
    pub version: u32,
    /// Lowest score submitted for each day.
    pub best: BTreeMap<u32, f64>,
    /// The perfect expression that locked each solved day.
    pub locked: BTreeMap<u32, String>,
}

impl Default for ScoreBook {
    fn default() -> Self {
        Self {
            version: RECORD_VERSION,
            best: BTreeMap::new(),
            locked: BTreeMap::new(),
        }
    }
}

impl ScoreBook {
    /// Folds a submitted attempt for `day` into the book.
    ///
    /// Returns `true` if the day's best score improved.
    pub fn record(&mut self, day: DayIndex, attempt: &Attempt, lock: bool) -> bool {
        let score = attempt.score.value();
        let improved = match self.best.get(&day.get()) {
            Some(best) => score < *best,
            None => true,
        };
        if improved {
            self.best.insert(day.get(), score);
        }
        if lock && attempt.is_perfect() {
            self.locked
                .entry(day.get())
                .or_insert_with(|| attempt.expression.to_string());
        }
        improved
    }
}

/// The days that currently have a [`DayRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveIndex {
    /// Record layout version.
    pub version: u32,
    /// Archived days.
    pub days: BTreeSet<u32>,
}

impl Default for ArchiveIndex {
    fn default() -> Self {
        Self {
            version: RECORD_VERSION,
            days: BTreeSet::new(),
        }
    }
}

impl ArchiveIndex {
    /// Removes and returns the days that fall outside `retention_days` of the
    /// latest archived day up to `today`, oldest first.
    ///
    /// Days after `today` neither anchor the window nor get pruned.
    pub fn prune(&mut self, retention_days: u32, today: u32) -> Vec<u32> {
        let Some(&latest) = self.days.range(..=today).next_back() else {
            return Vec::new();
        };
        let keep_from = latest.saturating_sub(retention_days.saturating_sub(1));
        let kept = self.days.split_off(&keep_from);
        let pruned = std::mem::replace(&mut self.days, kept);
        pruned.into_iter().collect()
    }
}
