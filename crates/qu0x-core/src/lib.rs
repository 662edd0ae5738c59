//! Core data structures for the Qu0x dice puzzle.
//!
//! This crate provides the value types shared by puzzle generation, expression
//! evaluation, and game management.
//!
//! # Overview
//!
//! 1. **Dice** - the fixed multiset a puzzle hands to the player
//!    - [`die`]: a single die face and the configurable [`FaceRange`]
//!    - [`digit`]: the decimal digits expression text is written in
//!    - [`dice_set`]: the five dice of a puzzle, addressed by [`DieIndex`]
//!    - [`die_index_set`]: which dice positions have been consumed
//!    - [`target`]: the number the player is trying to reach
//!
//! 2. **Expressions** - what the player builds from the dice
//!    - [`token`]: numbers, binary operators, parentheses, and factorial markers
//!    - [`expression`]: an ordered token sequence with a canonical text form
//!    - [`operator_set`]: allow-lists of operator keys offered to the player
//!
//! # Examples
//!
//! ```
//! use qu0x_core::{DiceSet, DieIndex, Expression};
//!
//! let dice = DiceSet::from_values([3, 2, 5, 1, 1])?;
//! assert_eq!(dice[DieIndex::new(2)].value(), 5);
//!
//! let expr: Expression = "(1+1)*5".parse()?;
//! assert_eq!(expr.numbers().count(), 3);
//! assert_eq!(expr.to_string(), "(1+1)*5");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod dice_set;
pub mod die;
pub mod die_index_set;
pub mod digit;
pub mod expression;
pub mod operator_set;
pub mod target;
pub mod token;

// Re-export commonly used types
pub use self::{
    dice_set::{DICE_COUNT, DiceSet, DieIndex},
    die::{Die, DieError, FaceRange},
    die_index_set::DieIndexSet,
    digit::Digit,
    expression::{Expression, ParseExpressionError},
    operator_set::OperatorSet,
    target::Target,
    token::{BinaryOperator, FactorialStep, Symbol, Token},
};
