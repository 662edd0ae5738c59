//! The five dice handed out by a puzzle.

use std::{
    fmt::{self, Display},
    ops::Index,
};

use crate::{Die, DieError, DieIndexSet};

/// Number of dice in every puzzle.
pub const DICE_COUNT: usize = 5;

/// A dice position in the range 0-4.
///
/// Each position can be consumed at most once while building an expression,
/// independently of how many other positions show the same face.
///
/// Use [`DieIndex::try_new`] for positions that come from user input;
/// [`DieIndex::new`] is for constants known to be in range.
///
/// # Examples
///
/// ```
/// use qu0x_core::DieIndex;
///
/// assert_eq!(DieIndex::try_new(4), Some(DieIndex::new(4)));
/// assert_eq!(DieIndex::try_new(5), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DieIndex(u8);

impl DieIndex {
    /// All dice positions in order.
    pub const ALL: [Self; DICE_COUNT] = [Self(0), Self(1), Self(2), Self(3), Self(4)];

    /// Creates a dice position from a constant.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in the range 0-4. Unchecked input goes
    /// through [`try_new`](Self::try_new) instead.
    ///
    /// ```should_panic
    /// use qu0x_core::DieIndex;
    ///
    /// let _ = DieIndex::new(5);
    /// ```
    #[must_use]
    pub const fn new(index: u8) -> Self {
        assert!((index as usize) < DICE_COUNT, "die index out of range");
        Self(index)
    }

    /// Creates a dice position, returning `None` when out of range.
    ///
    /// This is the constructor for untrusted input; it never panics.
    #[must_use]
    pub fn try_new(index: usize) -> Option<Self> {
        if index >= DICE_COUNT {
            return None;
        }
        u8::try_from(index).ok().map(Self)
    }

    /// Returns the position as a `usize`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn bit(self) -> u8 {
        1 << self.0
    }
}

impl Display for DieIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// The ordered dice of a puzzle.
///
/// Immutable once generated. Two positions may show the same face; usage
/// accounting always refers to positions, never to faces.
///
/// # Examples
///
/// ```
/// use qu0x_core::{DiceSet, DieIndex, DieIndexSet};
///
/// let dice = DiceSet::from_values([1, 1, 2, 3, 4])?;
/// assert_eq!(dice.count_face(1), 2);
/// assert_eq!(dice.to_string(), "1 1 2 3 4");
///
/// // The lowest free position showing a face.
/// let mut used = DieIndexSet::EMPTY;
/// assert_eq!(dice.first_free_with_face(1, used), Some(DieIndex::new(0)));
/// used.insert(DieIndex::new(0));
/// assert_eq!(dice.first_free_with_face(1, used), Some(DieIndex::new(1)));
/// used.insert(DieIndex::new(1));
/// assert_eq!(dice.first_free_with_face(1, used), None);
/// # Ok::<(), qu0x_core::DieError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiceSet {
    dice: [Die; DICE_COUNT],
}

impl DiceSet {
    /// Creates a dice set from dice.
    #[must_use]
    pub const fn new(dice: [Die; DICE_COUNT]) -> Self {
        Self { dice }
    }

    /// Creates a dice set from raw face values.
    ///
    /// # Errors
    ///
    /// Returns [`DieError::FaceOutOfRange`] if any value is outside 1-9.
    pub fn from_values(values: [u8; DICE_COUNT]) -> Result<Self, DieError> {
        let mut dice = [Die::new(1)?; DICE_COUNT];
        for (slot, value) in dice.iter_mut().zip(values) {
            *slot = Die::new(value)?;
        }
        Ok(Self { dice })
    }

    /// Returns the dice in position order.
    #[must_use]
    pub const fn dice(&self) -> &[Die; DICE_COUNT] {
        &self.dice
    }

    /// Returns the raw face values in position order.
    #[must_use]
    pub fn values(&self) -> [u8; DICE_COUNT] {
        self.dice.map(Die::value)
    }

    /// Iterates over `(position, die)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (DieIndex, Die)> + '_ {
        DieIndex::ALL.into_iter().map(|index| (index, self[index]))
    }

    /// Returns how many positions show `face`.
    #[must_use]
    pub fn count_face(&self, face: u8) -> usize {
        self.dice.iter().filter(|die| die.value() == face).count()
    }

    /// Returns the lowest position showing `face` that is not in `used`.
    #[must_use]
    pub fn first_free_with_face(&self, face: u8, used: DieIndexSet) -> Option<DieIndex> {
        self.iter()
            .find(|(index, die)| die.value() == face && !used.contains(*index))
            .map(|(index, _)| index)
    }
}

impl Index<DieIndex> for DiceSet {
    type Output = Die;

    fn index(&self, index: DieIndex) -> &Self::Output {
        &self.dice[index.index()]
    }
}

impl Display for DiceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, die) in self.dice.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            Display::fmt(die, f)?;
        }
        Ok(())
    }
}
