//! Puzzle generation from seeds.

use std::fmt::{self, Display};

use qu0x_core::{DICE_COUNT, DiceSet, FaceRange, OperatorSet, Target};
use rand::{RngCore, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::{DayIndex, Mulberry32, PuzzleSeed, mulberry32::scale, seed, static_puzzles};

/// The inclusive range targets are drawn from.
///
/// # Examples
///
/// ```
/// use qu0x_generator::TargetRange;
///
/// assert_eq!(TargetRange::default(), TargetRange::STANDARD);
/// assert_eq!(TargetRange::STANDARD.span(), 100);
/// assert_eq!(TargetRange::WIDE.clamp(7).value(), 20);
/// assert!(TargetRange::new(10, 5).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetRange {
    min: u32,
    max: u32,
}

impl TargetRange {
    /// Targets 1-100.
    pub const STANDARD: Self = Self { min: 1, max: 100 };
    /// Targets 20-250.
    pub const WIDE: Self = Self { min: 20, max: 250 };

    /// Creates a target range `min..=max`, or `None` if `min > max`.
    #[must_use]
    pub const fn new(min: u32, max: u32) -> Option<Self> {
        if min > max {
            return None;
        }
        Some(Self { min, max })
    }

    /// Returns the lowest target.
    #[must_use]
    pub const fn min(self) -> u32 {
        self.min
    }

    /// Returns the highest target.
    #[must_use]
    pub const fn max(self) -> u32 {
        self.max
    }

    /// Returns the number of distinct targets, saturating at `u32::MAX`.
    #[must_use]
    pub const fn span(self) -> u32 {
        (self.max - self.min).saturating_add(1)
    }

    /// Returns `true` if `target` lies in the range.
    #[must_use]
    pub const fn contains(self, target: Target) -> bool {
        target.value() >= self.min && target.value() <= self.max
    }

    /// Clamps an arbitrary draw into the range.
    #[must_use]
    pub fn clamp(self, value: i64) -> Target {
        let clamped = value.clamp(i64::from(self.min), i64::from(self.max));
        Target::new(u32::try_from(clamped).unwrap_or(self.min))
    }
}

impl Default for TargetRange {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl Display for TargetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.min, self.max)
    }
}

/// Settings that shape generated puzzles.
///
/// # Examples
///
/// ```
/// use qu0x_core::FaceRange;
/// use qu0x_generator::{GeneratorConfig, TargetRange};
///
/// let config = GeneratorConfig::default()
///     .faces(FaceRange::D9)
///     .targets(TargetRange::WIDE)
///     .block_operators(true);
/// assert!(!config.uses_static_table());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Faces the dice are rolled from.
    pub faces: FaceRange,
    /// Range the target is drawn from.
    pub targets: TargetRange,
    /// Whether the opening days use the hand-picked table.
    ///
    /// Only honoured with the standard face and target ranges.
    pub use_static_table: bool,
    /// Whether each puzzle withholds one operator key.
    pub block_operators: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            faces: FaceRange::D6,
            targets: TargetRange::STANDARD,
            use_static_table: true,
            block_operators: false,
        }
    }
}

impl GeneratorConfig {
    /// Sets the face range.
    #[must_use]
    pub fn faces(self, faces: FaceRange) -> Self {
        Self { faces, ..self }
    }

    /// Sets the target range.
    #[must_use]
    pub fn targets(self, targets: TargetRange) -> Self {
        Self { targets, ..self }
    }

    /// Enables or disables the static opening table.
    #[must_use]
    pub fn use_static_table(self, use_static_table: bool) -> Self {
        Self {
            use_static_table,
            ..self
        }
    }

    /// Enables or disables per-puzzle operator blocking.
    #[must_use]
    pub fn block_operators(self, block_operators: bool) -> Self {
        Self {
            block_operators,
            ..self
        }
    }

    /// Returns `true` if the static table applies to this configuration.
    #[must_use]
    pub fn uses_static_table(&self) -> bool {
        self.use_static_table
            && self.faces == FaceRange::D6
            && self.targets == TargetRange::STANDARD
    }
}

/// A generated puzzle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPuzzle {
    /// The seed the puzzle was generated from.
    pub seed: PuzzleSeed,
    /// The dice handed to the player.
    pub dice: DiceSet,
    /// The number to reach.
    pub target: Target,
    /// Operator keys offered for this puzzle.
    pub allowed_operators: OperatorSet,
}

/// Operators a puzzle may withhold when blocking is enabled.
const BLOCKABLE: [OperatorSet; 3] = [OperatorSet::POW, OperatorSet::FACTORIAL, OperatorSet::DIV];

/// Salt separating the blocking stream from the dice stream.
const BLOCK_SALT: u32 = 0x9E37_79B9;

/// Generates Qu0x puzzles.
///
/// Generation is a pure function of the seed and configuration: the same
/// pair always yields the same dice, target, and allowed operators.
///
/// * Calendar days covered by the static table return the hand-picked puzzle.
/// * Other calendar days draw five dice and then the target from
///   [`Mulberry32`] seeded with `day + 1`.
/// * Phrase seeds draw the same way from a PCG32 stream seeded with the
///   phrase's SHA-256 digest.
///
/// # Examples
///
/// ```
/// use qu0x_generator::{DayIndex, PuzzleGenerator, PuzzleSeed};
///
/// let generator = PuzzleGenerator::default();
///
/// let first = generator.generate_with_seed(DayIndex::FIRST.into());
/// assert_eq!(first.dice.values(), [3, 2, 5, 1, 1]);
/// assert_eq!(first.target.value(), 82);
///
/// let day = generator.generate_with_seed(PuzzleSeed::Day(DayIndex::new(11)));
/// assert_eq!(day.dice.values(), [2, 1, 4, 6, 1]);
/// assert_eq!(day.target.value(), 2);
///
/// let practice = generator.generate();
/// assert!(practice.seed.is_phrase());
/// ```
#[derive(Debug, Clone, Default)]
pub struct PuzzleGenerator {
    config: GeneratorConfig,
}

impl PuzzleGenerator {
    /// Creates a generator with the given configuration.
    #[must_use]
    pub const fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates a practice puzzle from a fresh random seed.
    #[must_use]
    pub fn generate(&self) -> GeneratedPuzzle {
        self.generate_with_seed(PuzzleSeed::random())
    }

    /// Generates the puzzle of a calendar day.
    #[must_use]
    pub fn generate_day(&self, day: DayIndex) -> GeneratedPuzzle {
        self.generate_with_seed(PuzzleSeed::Day(day))
    }

    /// Generates the puzzle for `seed`.
    #[must_use]
    pub fn generate_with_seed(&self, seed: PuzzleSeed) -> GeneratedPuzzle {
        let (dice, target) = self.draw(&seed);
        let allowed_operators = self.allowed_operators(&seed);
        GeneratedPuzzle {
            seed,
            dice,
            target,
            allowed_operators,
        }
    }

    fn draw(&self, seed: &PuzzleSeed) -> (DiceSet, Target) {
        match seed {
            PuzzleSeed::Day(day) => {
                if self.config.uses_static_table()
                    && let Some(puzzle) = static_puzzles::lookup(*day)
                {
                    return puzzle;
                }
                draw_from(&mut Mulberry32::new(seed.stream_seed()), &self.config)
            }
            PuzzleSeed::Phrase(phrase) => {
                let digest = seed::digest(phrase);
                let mut pcg_seed = [0; 16];
                pcg_seed.copy_from_slice(&digest[..16]);
                draw_from(&mut Pcg32::from_seed(pcg_seed), &self.config)
            }
        }
    }

    fn allowed_operators(&self, seed: &PuzzleSeed) -> OperatorSet {
        if !self.config.block_operators {
            return OperatorSet::all();
        }
        let mut rng = Mulberry32::new(seed.stream_seed() ^ BLOCK_SALT);
        let pick = usize::try_from(scale(rng.next_u32(), 3)).unwrap_or(0);
        let blocked = BLOCKABLE[pick.min(BLOCKABLE.len() - 1)];
        OperatorSet::all().difference(blocked)
    }
}

/// Draws five dice and then a target from one stream.
fn draw_from<R: RngCore>(rng: &mut R, config: &GeneratorConfig) -> (DiceSet, Target) {
    let faces = config.faces;
    let dice = [(); DICE_COUNT].map(|()| {
        let offset = scale(rng.next_u32(), u32::from(faces.span()));
        faces.clamp(i64::from(faces.min()) + i64::from(offset))
    });
    let targets = config.targets;
    let offset = scale(rng.next_u32(), targets.span());
    let target = targets.clamp(i64::from(targets.min()) + i64::from(offset));
    (DiceSet::new(dice), target)
}
