//! Incremental expression construction.

use qu0x_core::{
    DiceSet, DieIndex, DieIndexSet, Expression, FactorialStep, OperatorSet, Symbol, Token,
};

use crate::{EditPolicy, InputBlockReason, InputOperation};

/// Builds an expression one key at a time from a puzzle's dice.
///
/// The builder keeps the token sequence and the set of used dice in lockstep.
/// Used dice are always derived from the tokens: each number token claims the
/// lowest-indexed free die with its face. Tapping a die therefore marks the
/// first unused die with the same face, and backspace frees exactly the die a
/// fresh scan would no longer claim.
///
/// Each edit has a `*_capability` twin that reports what the edit would do
/// without applying it.
///
/// # Examples
///
/// ```
/// use qu0x_core::{BinaryOperator, DiceSet, DieIndex, Symbol};
/// use qu0x_game::{ExpressionBuilder, InputBlockReason};
///
/// let dice = DiceSet::from_values([3, 2, 5, 1, 1])?;
/// let mut builder = ExpressionBuilder::new(dice);
///
/// builder.append_die(DieIndex::new(0))?;
/// assert_eq!(
///     builder.append_die(DieIndex::new(1)),
///     Err(InputBlockReason::MissingOperator)
/// );
/// builder.press(Symbol::Operator(BinaryOperator::Pow))?;
/// builder.append_die(DieIndex::new(1))?;
/// assert_eq!(builder.text(), "3^2");
/// assert_eq!(builder.used().len(), 2);
///
/// builder.backspace()?;
/// assert_eq!(builder.text(), "3^");
/// assert!(!builder.used().contains(DieIndex::new(1)));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionBuilder {
    dice: DiceSet,
    allowed: OperatorSet,
    policy: EditPolicy,
    expression: Expression,
    used: DieIndexSet,
}

impl ExpressionBuilder {
    /// Creates an empty builder with every key allowed and strict checks.
    #[must_use]
    pub fn new(dice: DiceSet) -> Self {
        Self {
            dice,
            allowed: OperatorSet::all(),
            policy: EditPolicy::default(),
            expression: Expression::new(),
            used: DieIndexSet::EMPTY,
        }
    }

    /// Restricts the keys the player may press.
    #[must_use]
    pub fn with_allowed_operators(self, allowed: OperatorSet) -> Self {
        Self { allowed, ..self }
    }

    /// Sets the edit policy.
    #[must_use]
    pub fn with_policy(self, policy: EditPolicy) -> Self {
        Self { policy, ..self }
    }

    /// Replaces the expression, recomputing dice usage.
    ///
    /// No edit rules are checked; numbers without a free die are left
    /// unclaimed.
    #[must_use]
    pub fn with_expression(mut self, expression: Expression) -> Self {
        self.expression = expression;
        self.recompute_usage();
        self
    }

    /// Returns the dice.
    #[must_use]
    pub fn dice(&self) -> &DiceSet {
        &self.dice
    }

    /// Returns the keys the player may press.
    #[must_use]
    pub fn allowed_operators(&self) -> OperatorSet {
        self.allowed
    }

    /// Returns the edit policy.
    #[must_use]
    pub fn policy(&self) -> EditPolicy {
        self.policy
    }

    /// Returns the expression built so far.
    #[must_use]
    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    /// Returns the used dice.
    #[must_use]
    pub fn used(&self) -> DieIndexSet {
        self.used
    }

    /// Returns the expression text.
    #[must_use]
    pub fn text(&self) -> String {
        self.expression.to_string()
    }

    /// Returns `true` if no token has been entered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expression.is_empty()
    }

    /// Reports whether the die at `index` can be appended.
    ///
    /// # Errors
    ///
    /// Returns [`InputBlockReason::AlreadyUsed`] if the die is used, and
    /// [`InputBlockReason::MissingOperator`] under [`EditPolicy::Strict`] if
    /// the expression ends with an operand.
    pub fn append_die_capability(
        &self,
        index: DieIndex,
    ) -> Result<InputOperation, InputBlockReason> {
        if self.used.contains(index) {
            return Err(InputBlockReason::AlreadyUsed);
        }
        if self.policy.is_strict() && self.expression.last().is_some_and(Token::ends_operand) {
            return Err(InputBlockReason::MissingOperator);
        }
        Ok(InputOperation::Set)
    }

    /// Appends the face of the die at `index`.
    ///
    /// # Errors
    ///
    /// See [`append_die_capability`](Self::append_die_capability).
    pub fn append_die(&mut self, index: DieIndex) -> Result<InputOperation, InputBlockReason> {
        let operation = self.append_die_capability(index)?;
        self.expression.push(Token::Number(self.dice[index].into()));
        self.recompute_usage();
        log::debug!("append die {index}: {}", self.expression);
        Ok(operation)
    }

    /// Appends the first free die showing `face`.
    ///
    /// # Errors
    ///
    /// Returns [`InputBlockReason::UnknownDie`] if no die shows `face`,
    /// [`InputBlockReason::AlreadyUsed`] if every such die is used, and
    /// otherwise the errors of [`append_die`](Self::append_die).
    pub fn append_face(&mut self, face: u8) -> Result<InputOperation, InputBlockReason> {
        if self.dice.count_face(face) == 0 {
            return Err(InputBlockReason::UnknownDie);
        }
        let index = self
            .dice
            .first_free_with_face(face, self.used)
            .ok_or(InputBlockReason::AlreadyUsed)?;
        self.append_die(index)
    }

    /// Reports what pressing `symbol` would do.
    ///
    /// # Errors
    ///
    /// Returns [`InputBlockReason::OperatorBlocked`] if the key is not offered.
    /// Under [`EditPolicy::Strict`] also returns:
    ///
    /// - [`InputBlockReason::LeadingOperator`] for a binary operator at the
    ///   start or right after `(`
    /// - [`InputBlockReason::ConsecutiveOperators`] for a binary operator right
    ///   after another
    /// - [`InputBlockReason::MissingOperator`] for `(` right after an operand
    /// - [`InputBlockReason::UnmatchedCloseParen`] for `)` with nothing open
    /// - [`InputBlockReason::CloseParenAfterOperator`] for `)` that does not
    ///   follow an operand
    /// - [`InputBlockReason::MisplacedFactorial`] for `!` that does not follow
    ///   an operand
    pub fn press_capability(&self, symbol: Symbol) -> Result<InputOperation, InputBlockReason> {
        if !self.allowed.allows(symbol) {
            return Err(InputBlockReason::OperatorBlocked);
        }
        let last = self.expression.last();
        if let (Symbol::Bang, Some(Token::Factorial(step))) = (symbol, last)
            && step.grow().is_some()
        {
            return Ok(InputOperation::Extended);
        }
        self.insert_capability(symbol)
    }

    fn insert_capability(&self, symbol: Symbol) -> Result<InputOperation, InputBlockReason> {
        if self.policy.is_permissive() {
            return Ok(InputOperation::Set);
        }

        let last = self.expression.last();
        let after_operand = last.is_some_and(Token::ends_operand);
        match symbol {
            Symbol::Operator(_) => match last {
                None | Some(Token::OpenParen) => Err(InputBlockReason::LeadingOperator),
                Some(Token::Operator(_)) => Err(InputBlockReason::ConsecutiveOperators),
                Some(_) => Ok(InputOperation::Set),
            },
            Symbol::OpenParen if after_operand => Err(InputBlockReason::MissingOperator),
            Symbol::OpenParen => Ok(InputOperation::Set),
            Symbol::CloseParen if self.expression.open_parens() == 0 => {
                Err(InputBlockReason::UnmatchedCloseParen)
            }
            Symbol::CloseParen if !after_operand => Err(InputBlockReason::CloseParenAfterOperator),
            Symbol::CloseParen => Ok(InputOperation::Set),
            Symbol::Bang if !after_operand => Err(InputBlockReason::MisplacedFactorial),
            Symbol::Bang => Ok(InputOperation::Set),
        }
    }

    /// Presses an operator, parenthesis, or `!` key.
    ///
    /// A `!` right after a marker of fewer than five steps grows that marker
    /// instead of starting a new one.
    ///
    /// # Errors
    ///
    /// See [`press_capability`](Self::press_capability).
    pub fn press(&mut self, symbol: Symbol) -> Result<InputOperation, InputBlockReason> {
        let operation = self.press_capability(symbol)?;
        match operation {
            InputOperation::Extended => {
                if let Some(Token::Factorial(step)) = self.expression.last_mut()
                    && let Some(grown) = step.grow()
                {
                    *step = grown;
                }
            }
            _ => self.expression.push(symbol_token(symbol)),
        }
        log::debug!("press {symbol}: {}", self.expression);
        Ok(operation)
    }

    /// Reports whether a whole factorial marker can be appended.
    ///
    /// # Errors
    ///
    /// Returns [`InputBlockReason::OperatorBlocked`] if `!` is not offered,
    /// and [`InputBlockReason::MisplacedFactorial`] under
    /// [`EditPolicy::Strict`] if the expression does not end with an operand.
    pub fn append_factorial_capability(&self) -> Result<InputOperation, InputBlockReason> {
        if !self.allowed.allows(Symbol::Bang) {
            return Err(InputBlockReason::OperatorBlocked);
        }
        self.insert_capability(Symbol::Bang)
    }

    /// Appends a factorial marker of `step` as its own token.
    ///
    /// Unlike pressing `!`, this never grows the previous marker, so `3!! !`
    /// keeps its two markers.
    ///
    /// # Errors
    ///
    /// See [`append_factorial_capability`](Self::append_factorial_capability).
    pub fn append_factorial(
        &mut self,
        step: FactorialStep,
    ) -> Result<InputOperation, InputBlockReason> {
        let operation = self.append_factorial_capability()?;
        self.expression.push(Token::Factorial(step));
        log::debug!("append {step}: {}", self.expression);
        Ok(operation)
    }

    /// Reports what backspace would do.
    ///
    /// # Errors
    ///
    /// Returns [`InputBlockReason::NothingToRemove`] if the expression is
    /// empty.
    pub fn backspace_capability(&self) -> Result<InputOperation, InputBlockReason> {
        match self.expression.last() {
            None => Err(InputBlockReason::NothingToRemove),
            Some(Token::Factorial(step)) if step.shrink().is_some() => Ok(InputOperation::Shrunk),
            Some(_) => Ok(InputOperation::Removed),
        }
    }

    /// Removes the last key press.
    ///
    /// A multi-step `!` marker shrinks by one step; any other token is
    /// removed, and dice usage is recomputed from the remaining tokens.
    ///
    /// # Errors
    ///
    /// See [`backspace_capability`](Self::backspace_capability).
    pub fn backspace(&mut self) -> Result<InputOperation, InputBlockReason> {
        let operation = self.backspace_capability()?;
        match operation {
            InputOperation::Shrunk => {
                if let Some(Token::Factorial(step)) = self.expression.last_mut()
                    && let Some(shrunk) = step.shrink()
                {
                    *step = shrunk;
                }
            }
            _ => {
                if let Some(Token::Number(_)) = self.expression.pop() {
                    self.recompute_usage();
                }
            }
        }
        log::debug!("backspace: {}", self.expression);
        Ok(operation)
    }

    /// Removes every token and frees every die.
    pub fn clear(&mut self) -> InputOperation {
        if self.expression.is_empty() {
            return InputOperation::NoOp;
        }
        self.expression.clear();
        self.used = DieIndexSet::EMPTY;
        log::debug!("clear");
        InputOperation::Removed
    }

    fn recompute_usage(&mut self) {
        let mut used = DieIndexSet::EMPTY;
        for digit in self.expression.numbers() {
            if let Some(index) = self.dice.first_free_with_face(digit.value(), used) {
                used.insert(index);
            }
        }
        self.used = used;
    }
}

fn symbol_token(symbol: Symbol) -> Token {
    match symbol {
        Symbol::Operator(op) => Token::Operator(op),
        Symbol::OpenParen => Token::OpenParen,
        Symbol::CloseParen => Token::CloseParen,
        Symbol::Bang => Token::Factorial(FactorialStep::SINGLE),
    }
}

/// One builder edit per token of `expression`.
///
/// Used to replay text input through the builder's checks. Factorial markers
/// are replayed whole so adjacent markers stay separate.
pub(crate) fn key_presses(expression: &Expression) -> impl Iterator<Item = Key> + '_ {
    expression.tokens().iter().map(|token| match *token {
        Token::Number(digit) => Key::Face(digit.value()),
        Token::Operator(op) => Key::Symbol(Symbol::Operator(op)),
        Token::OpenParen => Key::Symbol(Symbol::OpenParen),
        Token::CloseParen => Key::Symbol(Symbol::CloseParen),
        Token::Factorial(step) => Key::Factorial(step),
    })
}

/// A single replayed edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Key {
    Face(u8),
    Symbol(Symbol),
    Factorial(FactorialStep),
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use qu0x_core::BinaryOperator;

    use super::*;

    const ADD: Symbol = Symbol::Operator(BinaryOperator::Add);
    const MUL: Symbol = Symbol::Operator(BinaryOperator::Mul);

    fn builder(values: [u8; 5]) -> ExpressionBuilder {
        ExpressionBuilder::new(DiceSet::from_values(values).unwrap())
    }

    fn idx(i: u8) -> DieIndex {
        DieIndex::new(i)
    }

    #[test]
    fn test_strict_structure_rules() {
        let mut b = builder([3, 2, 5, 1, 1]);
        assert_eq!(b.press(ADD), Err(InputBlockReason::LeadingOperator));
        assert_eq!(b.press(Symbol::CloseParen), Err(InputBlockReason::UnmatchedCloseParen));
        assert_eq!(b.press(Symbol::Bang), Err(InputBlockReason::MisplacedFactorial));
        assert_eq!(b.press(Symbol::OpenParen), Ok(InputOperation::Set));
        assert_eq!(b.press(MUL), Err(InputBlockReason::LeadingOperator));
        assert_eq!(
            b.press(Symbol::CloseParen),
            Err(InputBlockReason::CloseParenAfterOperator)
        );
        b.append_die(idx(3)).unwrap();
        assert_eq!(b.press(Symbol::OpenParen), Err(InputBlockReason::MissingOperator));
        b.press(ADD).unwrap();
        assert_eq!(b.press(MUL), Err(InputBlockReason::ConsecutiveOperators));
        b.append_die(idx(4)).unwrap();
        b.press(Symbol::CloseParen).unwrap();
        assert_eq!(b.append_die(idx(2)), Err(InputBlockReason::MissingOperator));
        assert_eq!(b.text(), "(1+1)");
    }

    #[test]
    fn test_already_used() {
        let mut b = builder([3, 2, 5, 1, 1]);
        b.append_die(idx(0)).unwrap();
        b.press(ADD).unwrap();
        assert_eq!(b.append_die(idx(0)), Err(InputBlockReason::AlreadyUsed));
        assert_eq!(b.text(), "3+");
    }

    #[test]
    fn test_duplicate_faces_claim_lowest_index() {
        let mut b = builder([1, 6, 1, 6, 1]);
        b.append_die(idx(4)).unwrap();
        assert!(b.used().contains(idx(0)));
        assert!(!b.used().contains(idx(4)));

        b.press(MUL).unwrap();
        b.append_face(1).unwrap();
        b.press(MUL).unwrap();
        b.append_face(1).unwrap();
        assert_eq!(b.used().iter().collect::<Vec<_>>(), [idx(0), idx(2), idx(4)]);
        b.press(MUL).unwrap();
        assert_eq!(b.append_face(1), Err(InputBlockReason::AlreadyUsed));
        assert_eq!(b.append_face(4), Err(InputBlockReason::UnknownDie));

        b.backspace().unwrap();
        b.backspace().unwrap();
        assert_eq!(b.used().iter().collect::<Vec<_>>(), [idx(0), idx(2)]);
    }

    #[test]
    fn test_factorial_grows_and_shrinks() {
        let mut b = builder([3, 2, 5, 1, 1]);
        b.append_die(idx(0)).unwrap();
        assert_eq!(b.press(Symbol::Bang), Ok(InputOperation::Set));
        for _ in 0..4 {
            assert_eq!(b.press(Symbol::Bang), Ok(InputOperation::Extended));
        }
        assert_eq!(b.text(), "3!!!!!");
        assert_eq!(b.expression().len(), 2);
        assert_eq!(b.press(Symbol::Bang), Ok(InputOperation::Set));
        assert_eq!(b.expression().len(), 3);

        assert_eq!(b.backspace(), Ok(InputOperation::Removed));
        assert_eq!(b.backspace(), Ok(InputOperation::Shrunk));
        assert_eq!(b.text(), "3!!!!");
    }

    #[test]
    fn test_permissive_separates_faces() {
        let mut b = builder([3, 2, 5, 1, 1]).with_policy(EditPolicy::Permissive);
        b.append_die(idx(0)).unwrap();
        b.append_die(idx(1)).unwrap();
        assert_eq!(b.text(), "3 2");
        b.press(ADD).unwrap();
        b.press(MUL).unwrap();
        assert_eq!(b.text(), "3 2+*");
        assert_eq!(b.used().len(), 2);
    }

    #[test]
    fn test_blocked_operator() {
        let allowed = OperatorSet::all().difference(OperatorSet::POW);
        let mut b = builder([3, 2, 5, 1, 1])
            .with_allowed_operators(allowed)
            .with_policy(EditPolicy::Permissive);
        b.append_die(idx(0)).unwrap();
        assert_eq!(
            b.press(Symbol::Operator(BinaryOperator::Pow)),
            Err(InputBlockReason::OperatorBlocked)
        );
        assert_eq!(b.text(), "3");
    }

    #[test]
    fn test_backspace_and_clear_on_empty() {
        let mut b = builder([3, 2, 5, 1, 1]);
        assert_eq!(b.backspace(), Err(InputBlockReason::NothingToRemove));
        assert_eq!(b.clear(), InputOperation::NoOp);
        b.append_die(idx(0)).unwrap();
        assert_eq!(b.clear(), InputOperation::Removed);
        assert!(b.is_empty());
        assert!(b.used().is_empty());
    }

    #[test]
    fn test_with_expression_recomputes_usage() {
        let b = builder([3, 2, 5, 1, 1]).with_expression("1*1*1".parse().unwrap());
        assert_eq!(b.used().iter().collect::<Vec<_>>(), [idx(3), idx(4)]);
    }

    #[test]
    fn test_key_presses_replay() {
        let expr: Expression = "(1+1)!!*5".parse().unwrap();
        let keys: Vec<_> = key_presses(&expr).collect();
        assert_eq!(keys.len(), 8);
        assert_eq!(keys[0], Key::Symbol(Symbol::OpenParen));
        assert_eq!(keys[1], Key::Face(1));
        assert_eq!(keys[5], Key::Factorial(FactorialStep::new(2).unwrap()));
        assert_eq!(keys[7], Key::Face(5));

        let spaced: Expression = "3!! !".parse().unwrap();
        let keys: Vec<_> = key_presses(&spaced).collect();
        assert_eq!(
            keys,
            [
                Key::Face(3),
                Key::Factorial(FactorialStep::new(2).unwrap()),
                Key::Factorial(FactorialStep::SINGLE),
            ]
        );
    }

    #[test]
    fn test_append_factorial_keeps_markers_apart() {
        let mut b = builder([3, 2, 5, 1, 1]);
        let double = FactorialStep::new(2).unwrap();
        assert_eq!(
            b.append_factorial(double),
            Err(InputBlockReason::MisplacedFactorial)
        );
        b.append_die(idx(0)).unwrap();
        assert_eq!(b.append_factorial(double), Ok(InputOperation::Set));
        assert_eq!(
            b.append_factorial(FactorialStep::SINGLE),
            Ok(InputOperation::Set)
        );
        assert_eq!(b.text(), "3!! !");
        assert_eq!(b.expression().len(), 3);

        let mut blocked = builder([3, 2, 5, 1, 1])
            .with_allowed_operators(OperatorSet::all().difference(OperatorSet::FACTORIAL));
        blocked.append_die(idx(0)).unwrap();
        assert_eq!(
            blocked.append_factorial_capability(),
            Err(InputBlockReason::OperatorBlocked)
        );
    }

    #[derive(Debug, Clone)]
    enum Edit {
        Die(u8),
        Press(Symbol),
        Backspace,
    }

    fn edit() -> impl Strategy<Value = Edit> {
        prop_oneof![
            (0u8..5).prop_map(Edit::Die),
            prop::sample::select(Symbol::ALL.to_vec()).prop_map(Edit::Press),
            Just(Edit::Backspace),
        ]
    }

    fn policy() -> impl Strategy<Value = EditPolicy> {
        prop_oneof![Just(EditPolicy::Strict), Just(EditPolicy::Permissive)]
    }

    fn apply(b: &mut ExpressionBuilder, edit: &Edit) -> Result<InputOperation, InputBlockReason> {
        match *edit {
            Edit::Die(i) => b.append_die(DieIndex::new(i)),
            Edit::Press(symbol) => b.press(symbol),
            Edit::Backspace => b.backspace(),
        }
    }

    proptest! {
        #[test]
        fn prop_usage_matches_number_tokens(
            values in prop::array::uniform5(1u8..=6),
            policy in policy(),
            edits in prop::collection::vec(edit(), 0..40),
        ) {
            let mut b = builder(values).with_policy(policy);
            for edit in &edits {
                let before = b.clone();
                if apply(&mut b, edit).is_err() {
                    prop_assert_eq!(&b, &before);
                }
                prop_assert_eq!(b.used().len(), b.expression().numbers().count());
                for index in b.used().iter() {
                    prop_assert!(b.expression().numbers().any(|digit| digit == b.dice()[index].into()));
                }
            }
        }

        #[test]
        fn prop_backspace_undoes_edit(
            values in prop::array::uniform5(1u8..=6),
            policy in policy(),
            edits in prop::collection::vec(edit(), 0..30),
            last in edit(),
        ) {
            let mut b = builder(values).with_policy(policy);
            for edit in &edits {
                let _ = apply(&mut b, edit);
            }
            if matches!(last, Edit::Backspace) {
                return Ok(());
            }
            let before = b.clone();
            if apply(&mut b, &last).is_ok() {
                b.backspace().unwrap();
                prop_assert_eq!(b.text(), before.text());
                prop_assert_eq!(b.used(), before.used());
            }
        }

        #[test]
        fn prop_clear_is_idempotent(
            values in prop::array::uniform5(1u8..=6),
            edits in prop::collection::vec(edit(), 0..20),
        ) {
            let mut b = builder(values);
            for edit in &edits {
                let _ = apply(&mut b, edit);
            }
            b.clear();
            let once = b.clone();
            prop_assert_eq!(b.clear(), InputOperation::NoOp);
            prop_assert_eq!(&b, &once);
            prop_assert!(b.expression().is_empty());
            prop_assert!(b.used().is_empty());
        }

        #[test]
        fn prop_text_never_joins_faces(
            values in prop::array::uniform5(1u8..=6),
            edits in prop::collection::vec(edit(), 0..40),
        ) {
            let mut b = builder(values).with_policy(EditPolicy::Permissive);
            for edit in &edits {
                let _ = apply(&mut b, edit);
            }
            let reparsed: Expression = b.text().parse().unwrap();
            prop_assert_eq!(&reparsed, b.expression());
        }
    }
}
