//! A player's saved progress on top of a [`KeyValueStore`].
//!
//! Layout of the store:
//!
//! | key          | record           |
//! |--------------|------------------|
//! | `settings`   | [`Settings`]     |
//! | `streak`     | [`StreakRecord`] |
//! | `scores`     | [`ScoreBook`]    |
//! | `archive`    | [`ArchiveIndex`] |
//! | `day/{day}`  | [`DayRecord`]    |
//!
//! Unreadable records are logged and treated as absent, so a damaged store
//! never stops play.
//!
//! Best scores, locks, and the streak follow the calendar puzzle of each day.
//! Days played with other generator settings keep their own [`DayRecord`]
//! but stay out of those shared records.

use qu0x_core::Expression;
use qu0x_eval::ExpressionEvaluator;
use qu0x_game::{Attempt, Game};
use qu0x_generator::{DayIndex, GeneratedPuzzle, PuzzleGenerator};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    KeyValueStore, Settings, Statistics, StoreError, Streak,
    record::{
        ArchiveIndex, AttemptRecord, DayRecord, RECORD_VERSION, ScoreBook, StreakRecord,
        VersionProbe,
    },
};

const SETTINGS_KEY: &str = "settings";
const STREAK_KEY: &str = "streak";
const SCORES_KEY: &str = "scores";
const ARCHIVE_KEY: &str = "archive";

fn day_key(day: u32) -> String {
    format!("day/{day}")
}

/// Returns `true` if `puzzle` is the default calendar puzzle of `day`.
fn is_calendar_puzzle(puzzle: &GeneratedPuzzle, day: DayIndex) -> bool {
    let calendar = PuzzleGenerator::default().generate_day(day);
    puzzle.dice == calendar.dice && puzzle.target == calendar.target
}

/// Saved progress: settings, attempts per day, best scores, and the streak.
#[derive(Debug)]
pub struct Profile<S> {
    store: S,
    settings: Settings,
    today: DayIndex,
}

impl<S: KeyValueStore> Profile<S> {
    /// Opens the profile kept in `store`.
    ///
    /// Attempts on days after `today` are never saved.
    #[must_use]
    pub fn open(store: S, today: DayIndex) -> Self {
        let settings = load(&store, SETTINGS_KEY).unwrap_or_default();
        Self {
            store,
            settings,
            today,
        }
    }

    /// Overrides the settings for this session without saving them.
    #[must_use]
    pub fn with_settings(self, settings: Settings) -> Self {
        Self { settings, ..self }
    }

    /// Returns the backing store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the saved settings.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the current day.
    #[must_use]
    pub fn today(&self) -> DayIndex {
        self.today
    }

    /// Replaces the settings and saves them.
    ///
    /// The new settings apply in memory even if saving fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn save_settings(&mut self, settings: Settings) -> Result<(), StoreError> {
        self.settings = settings;
        save(&mut self.store, SETTINGS_KEY, &self.settings)
    }

    /// Returns the record of `day`, if it is still archived.
    #[must_use]
    pub fn day(&self, day: DayIndex) -> Option<DayRecord> {
        load(&self.store, &day_key(day.get()))
    }

    /// Returns the archived days, oldest first.
    #[must_use]
    pub fn archived_days(&self) -> Vec<DayIndex> {
        load::<ArchiveIndex>(&self.store, ARCHIVE_KEY)
            .unwrap_or_default()
            .days
            .into_iter()
            .map(DayIndex::new)
            .collect()
    }

    /// Returns best scores and locked expressions.
    #[must_use]
    pub fn scores(&self) -> ScoreBook {
        load(&self.store, SCORES_KEY).unwrap_or_default()
    }

    /// Returns the lowest score submitted for `day`.
    #[must_use]
    pub fn best_score(&self, day: DayIndex) -> Option<f64> {
        self.scores().best.get(&day.get()).copied()
    }

    /// Returns the saved streak.
    #[must_use]
    pub fn streak(&self) -> Streak {
        load::<StreakRecord>(&self.store, STREAK_KEY)
            .map(Streak::from)
            .unwrap_or_default()
    }

    /// Returns progress over days `0..=today`.
    #[must_use]
    pub fn statistics(&self) -> Statistics {
        Statistics::compute(&self.scores().best, self.today)
    }

    /// Starts a session for `puzzle`, restoring saved attempts and the lock.
    ///
    /// Saved data for the same day but a different puzzle is ignored. The lock
    /// comes from the score book, or else from the first perfect saved
    /// attempt.
    #[must_use]
    pub fn start_game(&self, puzzle: GeneratedPuzzle) -> Game {
        let options = self.settings.game_options();
        let Some(day) = puzzle.seed.day() else {
            return Game::new(puzzle, options);
        };

        let attempts = self
            .day(day)
            .filter(|record| record.matches(&puzzle))
            .and_then(|record| {
                record
                    .attempts()
                    .inspect_err(|e| log::warn!("dropping attempts of day {day}: {e}"))
                    .ok()
            })
            .unwrap_or_default();

        let locked = options
            .lock_on_perfect
            .then(|| {
                self.scores()
                    .locked
                    .get(&day.get())
                    .and_then(|text| text.parse::<Expression>().ok())
                    .or_else(|| {
                        attempts
                            .iter()
                            .find(|attempt| attempt.is_perfect())
                            .map(|attempt| attempt.expression.clone())
                    })
            })
            .flatten()
            .filter(|expression| {
                ExpressionEvaluator::new(puzzle.dice, puzzle.target)
                    .assess(expression)
                    .is_perfect()
            });

        let game = match locked {
            Some(expression) => {
                log::debug!("day {day} is locked with {expression}");
                Game::locked(puzzle, options, expression)
            }
            None => Game::new(puzzle, options),
        };
        game.with_attempts(attempts)
    }

    /// Saves a submitted attempt.
    ///
    /// Daily puzzles update the day's record and prune days beyond the
    /// retention window. The calendar puzzle of a day also updates the best
    /// score, the lock, and the streak. Practice puzzles and days after
    /// today are not saved.
    ///
    /// # Errors
    ///
    /// Returns the first store error. Records written before the error are
    /// kept.
    pub fn record_attempt(
        &mut self,
        puzzle: &GeneratedPuzzle,
        attempt: &Attempt,
        timestamp: i64,
    ) -> Result<(), StoreError> {
        let Some(day) = puzzle.seed.day() else {
            log::debug!("practice puzzle {} is not archived", puzzle.seed);
            return Ok(());
        };
        if day > self.today {
            log::warn!("day {day} is after today ({}); not saved", self.today);
            return Ok(());
        }

        let mut record = self
            .day(day)
            .filter(|record| record.matches(puzzle))
            .unwrap_or_else(|| DayRecord::new(puzzle));
        record.version = RECORD_VERSION;
        record.attempts.push(AttemptRecord::new(attempt, timestamp));
        save(&mut self.store, &day_key(day.get()), &record)?;

        let mut index = load::<ArchiveIndex>(&self.store, ARCHIVE_KEY).unwrap_or_default();
        index.days.insert(day.get());
        for pruned in index.prune(self.settings.retention_days, self.today.get()) {
            log::debug!("pruning day {pruned} from the archive");
            self.store.remove(&day_key(pruned))?;
        }
        save(&mut self.store, ARCHIVE_KEY, &index)?;

        if !is_calendar_puzzle(puzzle, day) {
            log::debug!("day {day} uses other settings; scores and streak unchanged");
            return Ok(());
        }

        let mut scores = self.scores();
        if scores.record(day, attempt, self.settings.lock_on_perfect) {
            log::info!("new best score {} for day {day}", attempt.score);
        }
        save(&mut self.store, SCORES_KEY, &scores)?;

        if attempt.is_perfect() {
            let before = self.streak();
            let after = before.record_perfect(day);
            if after != before {
                log::info!("streak is now {}", after.count);
                save(&mut self.store, STREAK_KEY, &StreakRecord::from(after))?;
            }
        }
        Ok(())
    }
}

fn load<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    let text = match store.get(key) {
        Ok(text) => text?,
        Err(e) => {
            log::warn!("failed to read {key}: {e}");
            return None;
        }
    };
    match serde_json::from_str::<VersionProbe>(&text) {
        Ok(probe) if probe.version > RECORD_VERSION => {
            log::warn!(
                "ignoring {key}: version {} is newer than {RECORD_VERSION}",
                probe.version
            );
            return None;
        }
        Ok(_) => {}
        Err(e) => {
            log::warn!("ignoring {key}: {e}");
            return None;
        }
    }
    serde_json::from_str(&text)
        .inspect_err(|e| log::warn!("ignoring {key}: {e}"))
        .ok()
}

fn save<T: Serialize>(
    store: &mut impl KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    store.set(key, serde_json::to_string(value)?)
}

#[cfg(test)]
mod tests {
    use qu0x_core::{DiceSet, OperatorSet, Target};
    use qu0x_eval::ScoringPolicy;
    use qu0x_generator::PuzzleSeed;

    use super::*;
    use crate::MemoryStore;

    const NOW: i64 = 1_750_000_000;
    const TODAY: DayIndex = DayIndex::new(600);

    fn open() -> Profile<MemoryStore> {
        Profile::open(MemoryStore::new(), TODAY)
    }

    fn perfect_attempt(puzzle: &GeneratedPuzzle) -> Attempt {
        let target = f64::from(puzzle.target.value());
        Attempt {
            expression: "1".parse().unwrap(),
            result: target,
            score: ScoringPolicy::Rounded.score(target, puzzle.target),
        }
    }

    fn daily(day: u32) -> GeneratedPuzzle {
        PuzzleGenerator::default().generate_day(DayIndex::new(day))
    }

    fn solve_first_day(profile: &mut Profile<MemoryStore>) -> Game {
        let mut game = profile.start_game(daily(0));
        game.enter(&"3+2+5+1+1".parse().unwrap()).unwrap();
        let attempt = game.submit().unwrap();
        profile.record_attempt(game.puzzle(), &attempt, NOW).unwrap();

        game.clear().unwrap();
        game.enter(&"3^(5-2+1)+1".parse().unwrap()).unwrap();
        let attempt = game.submit().unwrap();
        profile
            .record_attempt(game.puzzle(), &attempt, NOW + 60)
            .unwrap();
        game
    }

    #[test]
    fn test_solved_day_reopens_locked() {
        let mut profile = open();
        solve_first_day(&mut profile);

        let record = profile.day(DayIndex::FIRST).unwrap();
        assert_eq!(record.attempts.len(), 2);
        assert_eq!(record.attempts[1].timestamp, NOW + 60);
        assert_eq!(profile.best_score(DayIndex::FIRST), Some(0.0));
        assert_eq!(profile.streak().count, 1);

        let game = profile.start_game(daily(0));
        assert!(game.is_locked());
        assert_eq!(game.builder().text(), "3^(5-2+1)+1");
        assert_eq!(game.attempts().len(), 2);
        assert_eq!(game.attempts()[0].score.value(), 70.0);
    }

    #[test]
    fn test_lock_ignored_when_disabled() {
        let mut profile = open();
        solve_first_day(&mut profile);
        profile
            .save_settings(Settings {
                lock_on_perfect: false,
                ..Settings::default()
            })
            .unwrap();

        let game = profile.start_game(daily(0));
        assert!(!game.is_locked());
        assert_eq!(game.attempts().len(), 2);
    }

    #[test]
    fn test_other_puzzle_on_same_day_starts_fresh() {
        let mut profile = open();
        solve_first_day(&mut profile);

        let other = GeneratedPuzzle {
            dice: DiceSet::from_values([6, 6, 6, 6, 6]).unwrap(),
            ..daily(0)
        };
        let game = profile.start_game(other);
        assert!(!game.is_locked());
        assert!(game.attempts().is_empty());
    }

    #[test]
    fn test_practice_puzzles_are_not_saved() {
        let mut profile = open();
        let puzzle = GeneratedPuzzle {
            seed: PuzzleSeed::Phrase("practice".to_owned()),
            dice: DiceSet::from_values([1, 2, 3, 4, 5]).unwrap(),
            target: Target::new(15),
            allowed_operators: OperatorSet::all(),
        };
        let mut game = profile.start_game(puzzle);
        game.enter(&"1+2+3+4+5".parse().unwrap()).unwrap();
        let attempt = game.submit().unwrap();
        assert!(attempt.is_perfect());

        profile.record_attempt(game.puzzle(), &attempt, NOW).unwrap();
        assert!(profile.store().is_empty());
        assert_eq!(profile.streak(), Streak::default());
    }

    #[test]
    fn test_archive_is_pruned() {
        let mut profile = Profile::open(MemoryStore::new(), DayIndex::new(4));
        profile
            .save_settings(Settings {
                retention_days: 3,
                ..Settings::default()
            })
            .unwrap();

        for day in 0..5 {
            let puzzle = daily(day);
            let attempt = Attempt {
                expression: "1".parse().unwrap(),
                result: 1.0,
                score: ScoringPolicy::Rounded.score(1.0, puzzle.target),
            };
            profile.record_attempt(&puzzle, &attempt, NOW).unwrap();
        }

        assert_eq!(
            profile.archived_days(),
            [2, 3, 4].map(DayIndex::new).to_vec()
        );
        assert!(profile.day(DayIndex::new(1)).is_none());
        assert!(profile.day(DayIndex::new(2)).is_some());
        assert_eq!(profile.scores().best.len(), 5);
        assert_eq!(profile.statistics().total_days, 5);
        assert!(profile.statistics().master_score.is_some());
    }

    #[test]
    fn test_newer_records_are_ignored() {
        let mut store = MemoryStore::new();
        store
            .set(
                STREAK_KEY,
                r#"{"version":2,"count":9,"last_qualifying_day":3,"extra":[]}"#.to_owned(),
            )
            .unwrap();
        store
            .set(SETTINGS_KEY, r#"{"version":99,"max_face":9}"#.to_owned())
            .unwrap();
        store.set(SCORES_KEY, "garbage".to_owned()).unwrap();

        let profile = Profile::open(store, TODAY);
        assert_eq!(profile.streak(), Streak::default());
        assert_eq!(*profile.settings(), Settings::default());
        assert!(profile.scores().best.is_empty());
    }

    #[test]
    fn test_settings_survive_reopen() {
        let mut profile = open();
        let settings = Settings {
            wide_targets: true,
            ..Settings::default()
        };
        profile.save_settings(settings).unwrap();

        let reopened = Profile::open(profile.store().clone(), TODAY);
        assert_eq!(*reopened.settings(), settings);
    }

    #[test]
    fn test_days_after_today_are_not_saved() {
        let mut profile = Profile::open(MemoryStore::new(), DayIndex::new(502));
        profile
            .save_settings(Settings {
                retention_days: 3,
                ..Settings::default()
            })
            .unwrap();
        for day in [500, 501, 9999, 502] {
            let puzzle = daily(day);
            profile
                .record_attempt(&puzzle, &perfect_attempt(&puzzle), NOW)
                .unwrap();
        }

        let streak = profile.streak();
        assert_eq!(streak.count, 3);
        assert_eq!(streak.last_qualifying_day, Some(DayIndex::new(502)));
        assert_eq!(
            profile.archived_days(),
            [500, 501, 502].map(DayIndex::new).to_vec()
        );
        assert!(profile.day(DayIndex::new(9999)).is_none());
        assert_eq!(profile.best_score(DayIndex::new(9999)), None);
    }

    #[test]
    fn test_other_settings_stay_out_of_scores_and_streak() {
        let mut profile = open();
        let wide = PuzzleGenerator::new(
            Settings {
                wide_targets: true,
                max_face: 9,
                ..Settings::default()
            }
            .generator_config()
            .unwrap(),
        )
        .generate_day(DayIndex::new(20));
        assert!(!is_calendar_puzzle(&wide, DayIndex::new(20)));
        assert!(is_calendar_puzzle(&daily(20), DayIndex::new(20)));

        profile
            .record_attempt(&wide, &perfect_attempt(&wide), NOW)
            .unwrap();

        assert!(profile.scores().best.is_empty());
        assert!(profile.scores().locked.is_empty());
        assert_eq!(profile.streak(), Streak::default());
        assert_eq!(profile.day(DayIndex::new(20)).unwrap().attempts.len(), 1);

        assert!(!profile.start_game(daily(20)).is_locked());
        assert!(profile.start_game(daily(20)).attempts().is_empty());
    }

    #[test]
    fn test_other_settings_lock_from_saved_attempt() {
        let mut profile = open();
        let puzzle = GeneratedPuzzle {
            dice: DiceSet::from_values([1, 1, 2, 3, 4]).unwrap(),
            target: Target::new(11),
            ..daily(0)
        };
        let mut game = profile.start_game(puzzle.clone());
        game.enter(&"1+1+2+3+4".parse().unwrap()).unwrap();
        let attempt = game.submit().unwrap();
        profile.record_attempt(&puzzle, &attempt, NOW).unwrap();
        assert!(profile.scores().locked.is_empty());

        let game = profile.start_game(puzzle);
        assert!(game.is_locked());
        assert_eq!(game.builder().text(), "1+1+2+3+4");
    }
}
