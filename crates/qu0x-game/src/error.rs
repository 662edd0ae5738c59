use qu0x_eval::{EvalError, UsageError};

/// Errors that can occur when submitting an expression.
///
/// A failed submit records no attempt and leaves the game editable.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum SubmitError {
    /// The puzzle was already solved.
    #[display("puzzle is locked")]
    Locked,
    /// The expression does not evaluate.
    #[display("invalid expression: {_0}")]
    Eval(#[from] EvalError),
    /// The numbers are not exactly the dice.
    #[display("invalid dice usage: {_0}")]
    Usage(#[from] UsageError),
    /// The value is not a whole number.
    #[display("result {value} is not a whole number")]
    NonIntegerResult {
        /// The fractional value.
        value: f64,
    },
}
