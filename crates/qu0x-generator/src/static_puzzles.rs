//! Hand-picked puzzles for the first days of the calendar.

use qu0x_core::{DICE_COUNT, DiceSet, Target};

use crate::DayIndex;

/// Dice and target of each opening day, indexed by day.
const TABLE: [([u8; DICE_COUNT], u32); 11] = [
    ([3, 2, 5, 1, 1], 82),
    ([6, 3, 2, 4, 3], 46),
    ([2, 6, 2, 5, 4], 93),
    ([1, 6, 6, 3, 3], 44),
    ([1, 5, 4, 3, 2], 76),
    ([4, 2, 6, 3, 5], 4),
    ([1, 6, 4, 4, 3], 4),
    ([6, 3, 1, 6, 1], 19),
    ([3, 1, 1, 3, 5], 73),
    ([3, 1, 3, 2, 6], 31),
    ([4, 5, 5, 3, 2], 52),
];

/// Number of days covered by the static table.
pub const STATIC_DAYS: u32 = 11;

const _: () = assert!(TABLE.len() == STATIC_DAYS as usize);

/// Returns the static puzzle for `day`, if the table covers it.
#[must_use]
pub fn lookup(day: DayIndex) -> Option<(DiceSet, Target)> {
    let (values, target) = TABLE.get(usize::try_from(day.get()).ok()?)?;
    let dice = DiceSet::from_values(*values).ok()?;
    Some((dice, Target::new(*target)))
}
