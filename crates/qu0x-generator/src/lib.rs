//! Deterministic puzzle generation for Qu0x.
//!
//! A puzzle is five dice and a target. Every puzzle is a pure function of its
//! [`PuzzleSeed`] and the [`GeneratorConfig`], so a calendar day always maps to
//! the same puzzle on every machine.
//!
//! # Overview
//!
//! - [`seed`]: calendar days, phrase seeds, and their parsing
//! - [`mulberry32`]: the 32-bit stream behind daily puzzles
//! - [`static_puzzles`]: the hand-picked puzzles of the opening days
//! - [`generator`]: [`PuzzleGenerator`] and its configuration
//!
//! # Examples
//!
//! ```
//! use qu0x_generator::{DayIndex, GeneratorConfig, PuzzleGenerator, TargetRange};
//!
//! let generator = PuzzleGenerator::new(GeneratorConfig::default());
//! let puzzle = generator.generate_day(DayIndex::new(100));
//! assert_eq!(puzzle.dice.values(), [1, 5, 4, 4, 3]);
//! assert_eq!(puzzle.target.value(), 70);
//!
//! let wide = PuzzleGenerator::new(GeneratorConfig::default().targets(TargetRange::WIDE));
//! let puzzle = wide.generate_with_seed("coffee".parse()?);
//! assert!(TargetRange::WIDE.contains(puzzle.target));
//! # Ok::<(), qu0x_generator::SeedError>(())
//! ```

pub mod generator;
pub mod mulberry32;
pub mod seed;
pub mod static_puzzles;

pub use self::{
    generator::{GeneratedPuzzle, GeneratorConfig, PuzzleGenerator, TargetRange},
    mulberry32::Mulberry32,
    seed::{DayIndex, PuzzleSeed, SeedError},
    static_puzzles::STATIC_DAYS,
};
