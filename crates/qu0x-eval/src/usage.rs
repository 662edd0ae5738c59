//! Dice-usage validation.

use qu0x_core::{DiceSet, Digit, Expression};

use crate::UsageError;

/// Per-digit tallies, indexed by value.
type DigitCounts = [usize; Digit::MAX as usize + 1];

fn tally(values: impl IntoIterator<Item = u8>) -> DigitCounts {
    let mut counts = [0; Digit::MAX as usize + 1];
    for value in values {
        counts[usize::from(value)] += 1;
    }
    counts
}

/// Checks that the numbers of `expr` are exactly the dice, as multisets.
///
/// This is independent of whether `expr` parses; an in-progress expression can
/// be checked for live feedback.
///
/// Errors are reported in a fixed order: a digit that is on no die (`0` never
/// is), then a face
/// used more often than rolled, then the lowest face left unused.
///
/// # Errors
///
/// Returns [`UsageError::WrongValue`], [`UsageError::ExcessUsage`], or
/// [`UsageError::IncompleteUsage`] as described above.
///
/// # Examples
///
/// ```
/// use qu0x_core::DiceSet;
/// use qu0x_eval::{UsageError, check_usage};
///
/// let dice = DiceSet::from_values([1, 1, 2, 3, 4])?;
/// assert_eq!(check_usage(&dice, &"1+1+2+3+4".parse()?), Ok(()));
/// assert_eq!(
///     check_usage(&dice, &"1+2+3+4".parse()?),
///     Err(UsageError::IncompleteUsage { face: 1 })
/// );
/// assert_eq!(
///     check_usage(&dice, &"1+1+1+2+3".parse()?),
///     Err(UsageError::ExcessUsage { face: 1 })
/// );
/// assert_eq!(
///     check_usage(&dice, &"1+1+2+3+5".parse()?),
///     Err(UsageError::WrongValue { face: 5 })
/// );
/// assert_eq!(
///     check_usage(&dice, &"1+1+2+3+0".parse()?),
///     Err(UsageError::WrongValue { face: 0 })
/// );
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn check_usage(dice: &DiceSet, expr: &Expression) -> Result<(), UsageError> {
    let rolled = tally(dice.values());
    let used = tally(expr.numbers().map(Digit::value));

    let faces = || (0..=Digit::MAX).map(|face| (face, usize::from(face)));
    if let Some((face, _)) = faces().find(|(_, i)| used[*i] > 0 && rolled[*i] == 0) {
        return Err(UsageError::WrongValue { face });
    }
    if let Some((face, _)) = faces().find(|(_, i)| used[*i] > rolled[*i]) {
        return Err(UsageError::ExcessUsage { face });
    }
    if let Some((face, _)) = faces().find(|(_, i)| used[*i] < rolled[*i]) {
        return Err(UsageError::IncompleteUsage { face });
    }
    Ok(())
}
