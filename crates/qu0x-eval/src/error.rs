//! Evaluation and dice-usage errors.

use qu0x_core::{ParseExpressionError, Token};

/// Errors that can occur while parsing or evaluating an expression.
///
/// The first group (up to [`EvalError::TrailingInput`]) describes malformed
/// input; [`EvalError::is_parse_error`] reports whether an error belongs to it.
/// The rest are arithmetic failures of a well-formed expression.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
pub enum EvalError {
    /// The expression text contains a character outside the token set.
    #[display("unknown character {ch:?} at offset {offset}")]
    UnknownCharacter {
        /// The rejected character.
        ch: char,
        /// Character offset within the text.
        offset: usize,
    },
    /// There is nothing to evaluate.
    #[display("expression is empty")]
    Empty,
    /// A token appeared where the grammar does not allow it.
    #[display("unexpected {token} at token {offset}")]
    UnexpectedToken {
        /// The offending token.
        token: Token,
        /// Token offset within the expression.
        offset: usize,
    },
    /// The expression stops where an operand is required.
    #[display("expression ends unexpectedly")]
    UnexpectedEnd,
    /// A `(` is never closed, or a `)` has no matching `(`.
    #[display("unbalanced parentheses")]
    UnbalancedParentheses,
    /// Tokens remain after a complete expression.
    #[display("unexpected {token} after a complete expression at token {offset}")]
    TrailingInput {
        /// The first leftover token.
        token: Token,
        /// Token offset within the expression.
        offset: usize,
    },
    /// The right-hand side of a `/` evaluated to zero.
    #[display("division by zero")]
    DivisionByZero,
    /// A factorial marker was applied to a negative or fractional value.
    #[display("factorial of {value} is undefined")]
    InvalidFactorialOperand {
        /// The rejected operand.
        value: f64,
    },
    /// The result overflowed or is not a number.
    #[display("result is not a finite number")]
    NonFiniteResult,
}

impl EvalError {
    /// Returns `true` if the error comes from malformed input rather than
    /// arithmetic.
    #[must_use]
    pub const fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownCharacter { .. }
                | Self::Empty
                | Self::UnexpectedToken { .. }
                | Self::UnexpectedEnd
                | Self::UnbalancedParentheses
                | Self::TrailingInput { .. }
        )
    }
}

impl From<ParseExpressionError> for EvalError {
    fn from(err: ParseExpressionError) -> Self {
        match err {
            ParseExpressionError::UnknownCharacter { ch, offset } => {
                Self::UnknownCharacter { ch, offset }
            }
        }
    }
}

/// Reasons the numbers of an expression are not exactly the puzzle's dice.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::IsVariant,
)]
pub enum UsageError {
    /// A die was left out.
    #[display("die {face} is not used")]
    IncompleteUsage {
        /// Face of a die that does not appear in the expression.
        face: u8,
    },
    /// A face is used more often than it appears on the dice.
    #[display("{face} is used more times than it was rolled")]
    ExcessUsage {
        /// The over-used face.
        face: u8,
    },
    /// A number that is not on any die.
    #[display("{face} is not one of the dice")]
    WrongValue {
        /// The foreign face.
        face: u8,
    },
}
