//! Player preferences.

use qu0x_core::{DieError, FaceRange};
use qu0x_eval::ScoringPolicy;
use qu0x_game::{EditPolicy, GameOptions};
use qu0x_generator::{GeneratorConfig, TargetRange};
use serde::{Deserialize, Serialize};

use crate::record::RECORD_VERSION;

/// Player preferences, persisted alongside the archive.
///
/// Missing fields take their defaults, so older records keep loading as
/// options are added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[expect(clippy::struct_excessive_bools)]
pub struct Settings {
    /// Record layout version.
    pub version: u32,
    /// Highest die face, 1-9.
    pub max_face: u8,
    /// Draw targets from 20-250 instead of 1-100.
    pub wide_targets: bool,
    /// Remove one seeded operator from each day.
    pub block_operators: bool,
    /// Check only dice usage while typing.
    pub permissive: bool,
    /// Score the raw distance instead of rounding first.
    pub exact_scoring: bool,
    /// Reject fractional results on submit.
    pub require_integer_result: bool,
    /// Lock a day after its first perfect submit.
    pub lock_on_perfect: bool,
    /// Days of attempt history to keep.
    pub retention_days: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: RECORD_VERSION,
            max_face: FaceRange::D6.max(),
            wide_targets: false,
            block_operators: false,
            permissive: false,
            exact_scoring: false,
            require_integer_result: true,
            lock_on_perfect: true,
            retention_days: 30,
        }
    }
}

impl Settings {
    /// Returns the generator configuration these settings select.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_face` is not in 1-9.
    pub fn generator_config(&self) -> Result<GeneratorConfig, DieError> {
        let targets = if self.wide_targets {
            TargetRange::WIDE
        } else {
            TargetRange::STANDARD
        };
        Ok(GeneratorConfig::default()
            .faces(FaceRange::new(FaceRange::D6.min(), self.max_face)?)
            .targets(targets)
            .block_operators(self.block_operators))
    }

    /// Returns the game options these settings select.
    #[must_use]
    pub fn game_options(&self) -> GameOptions {
        let edit_policy = if self.permissive {
            EditPolicy::Permissive
        } else {
            EditPolicy::Strict
        };
        let scoring = if self.exact_scoring {
            ScoringPolicy::Exact
        } else {
            ScoringPolicy::Rounded
        };
        GameOptions::default()
            .edit_policy(edit_policy)
            .scoring(scoring)
            .require_integer_result(self.require_integer_result)
            .lock_on_perfect(self.lock_on_perfect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_library_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.game_options(), GameOptions::default());
        assert_eq!(
            settings.generator_config().unwrap(),
            GeneratorConfig::default()
        );
    }

    #[test]
    fn test_partial_record_fills_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"version":1,"wide_targets":true,"max_face":9}"#).unwrap();
        assert_eq!(settings.retention_days, 30);
        assert!(settings.lock_on_perfect);

        let config = settings.generator_config().unwrap();
        assert_eq!(config.faces, FaceRange::D9);
        assert_eq!(config.targets, TargetRange::WIDE);
        assert!(!config.uses_static_table());
    }

    #[test]
    fn test_invalid_face_range() {
        let settings = Settings {
            max_face: 12,
            ..Settings::default()
        };
        assert!(settings.generator_config().is_err());
    }

    #[test]
    fn test_game_options() {
        let settings = Settings {
            permissive: true,
            exact_scoring: true,
            lock_on_perfect: false,
            ..Settings::default()
        };
        let options = settings.game_options();
        assert_eq!(options.edit_policy, EditPolicy::Permissive);
        assert_eq!(options.scoring, ScoringPolicy::Exact);
        assert!(options.require_integer_result);
        assert!(!options.lock_on_perfect);
    }
}
