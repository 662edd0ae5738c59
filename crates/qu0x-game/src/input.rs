//! Edit outcomes, rejection reasons, and edit policies.

/// The effect an accepted edit has on the expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum InputOperation {
    /// The edit changes nothing.
    NoOp,
    /// A new token was appended.
    Set,
    /// The last `!` marker grew by one step.
    Extended,
    /// The last `!` marker shrank by one step.
    Shrunk,
    /// One or more tokens were removed.
    Removed,
}

/// Why an edit was rejected.
///
/// A rejected edit leaves the expression and dice usage untouched.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, derive_more::Error, derive_more::IsVariant,
)]
pub enum InputBlockReason {
    /// The die has already been used.
    #[display("die already used")]
    AlreadyUsed,
    /// No die shows the requested face.
    #[display("no die shows that face")]
    UnknownDie,
    /// A binary operator at the start of the expression or right after `(`.
    #[display("an operator needs a left operand")]
    LeadingOperator,
    /// A binary operator right after another.
    #[display("two operators in a row")]
    ConsecutiveOperators,
    /// A `)` with no open `(`.
    #[display("no parenthesis to close")]
    UnmatchedCloseParen,
    /// A `)` right after an operator or `(`.
    #[display("a parenthesis cannot close on an operator")]
    CloseParenAfterOperator,
    /// A `!` with no operand before it.
    #[display("factorial needs an operand")]
    MisplacedFactorial,
    /// An operand right after another operand.
    #[display("an operator is needed here")]
    MissingOperator,
    /// The key is not offered for this puzzle.
    #[display("operator not available today")]
    OperatorBlocked,
    /// Backspace on an empty expression.
    #[display("nothing to remove")]
    NothingToRemove,
    /// The puzzle was solved and accepts no more edits.
    #[display("puzzle is locked")]
    Locked,
}

/// How strictly edits are checked while the expression is built.
///
/// Both policies keep dice usage exact and never let two faces read as one
/// number. The grammar is only enforced in full on submit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum EditPolicy {
    /// Reject every edit that cannot lead to a well-formed expression.
    #[default]
    Strict,
    /// Accept any key that is offered; adjacent faces are shown separated.
    Permissive,
}
