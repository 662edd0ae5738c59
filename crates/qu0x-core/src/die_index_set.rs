//! A set of consumed dice positions.
//!
//! This module provides [`DieIndexSet`], the usage state of an expression
//! under construction: which of the five dice positions have been turned into
//! number tokens.
//!
//! # Examples
//!
//! ```
//! use qu0x_core::{DieIndex, DieIndexSet};
//!
//! let mut used = DieIndexSet::new();
//! assert!(used.insert(DieIndex::new(1)));
//! assert!(!used.insert(DieIndex::new(1)));
//! assert!(used.insert(DieIndex::new(4)));
//!
//! assert_eq!(used.len(), 2);
//! assert!(used.contains(DieIndex::new(4)));
//! assert_eq!(used.iter().map(DieIndex::index).collect::<Vec<_>>(), [1, 4]);
//! ```

use std::fmt;

use crate::{DICE_COUNT, DieIndex};

/// A set of dice positions (0-4), represented as a bitset.
///
/// A position appears at most once, so `len()` never exceeds
/// [`DICE_COUNT`].
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DieIndexSet {
    bits: u8,
}

impl DieIndexSet {
    /// The empty set.
    pub const EMPTY: Self = Self { bits: 0 };
    /// The set of all five positions.
    pub const FULL: Self = Self { bits: 0b1_1111 };

    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Adds a position, returning `true` if it was not present.
    pub fn insert(&mut self, index: DieIndex) -> bool {
        let added = !self.contains(index);
        self.bits |= index.bit();
        added
    }

    /// Removes a position, returning `true` if it was present.
    pub fn remove(&mut self, index: DieIndex) -> bool {
        let present = self.contains(index);
        self.bits &= !index.bit();
        present
    }

    /// Returns `true` if the position is in the set.
    #[must_use]
    pub const fn contains(self, index: DieIndex) -> bool {
        self.bits & index.bit() != 0
    }

    /// Returns the number of positions in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Returns `true` if no position is in the set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Returns `true` if every position is in the set.
    #[must_use]
    pub const fn is_full(self) -> bool {
        self.bits == Self::FULL.bits
    }

    /// Iterates over the positions in ascending order.
    pub fn iter(self) -> impl Iterator<Item = DieIndex> {
        DieIndex::ALL
            .into_iter()
            .filter(move |index| self.contains(*index))
    }

    /// Returns the positions not in the set.
    #[must_use]
    pub const fn complement(self) -> Self {
        Self {
            bits: !self.bits & Self::FULL.bits,
        }
    }
}

impl FromIterator<DieIndex> for DieIndexSet {
    fn from_iter<T: IntoIterator<Item = DieIndex>>(iter: T) -> Self {
        let mut set = Self::new();
        for index in iter {
            set.insert(index);
        }
        set
    }
}

impl fmt::Debug for DieIndexSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(DieIndex::index)).finish()
    }
}

const _: () = assert!(DieIndexSet::FULL.len() == DICE_COUNT);
