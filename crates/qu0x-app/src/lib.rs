//! Persistence, bookkeeping, and the terminal front end for Qu0x.
//!
//! The game crates know nothing about storage; this crate keeps a player's
//! progress in a [`KeyValueStore`] through a [`Profile`]:
//!
//! - one [`DayRecord`] per archived day, pruned past the retention window
//! - best scores and locked expressions in a [`ScoreBook`]
//! - the [`Streak`] of consecutive perfect days
//! - [`Settings`] that select the generator and game options
//!
//! It also provides [`Statistics`], the spoiler-free [`share_text`], and the
//! [`Command`] parser behind the `qu0x` binary.

pub mod command;
pub mod profile;
pub mod record;
pub mod settings;
pub mod share;
pub mod stats;
pub mod store;
pub mod streak;

pub use self::{
    command::{Command, CommandError},
    profile::Profile,
    record::{
        ArchiveIndex, AttemptRecord, DayRecord, RECORD_VERSION, RecordError, ScoreBook,
        StreakRecord,
    },
    settings::Settings,
    share::share_text,
    stats::Statistics,
    store::{FileStore, KeyValueStore, MemoryStore, StoreError},
    streak::Streak,
};
