use qu0x_core::{DieIndex, DieIndexSet, Expression, Symbol};
use qu0x_eval::{Assessment, ExpressionEvaluator, Score, ScoringPolicy};
use qu0x_generator::GeneratedPuzzle;

use crate::{
    EditPolicy, ExpressionBuilder, InputBlockReason, InputOperation, SubmitError,
    builder::{Key, key_presses},
};

/// Settings of a game session.
///
/// # Examples
///
/// ```
/// use qu0x_eval::ScoringPolicy;
/// use qu0x_game::{EditPolicy, GameOptions};
///
/// let options = GameOptions::default()
///     .edit_policy(EditPolicy::Permissive)
///     .scoring(ScoringPolicy::Exact)
///     .require_integer_result(false);
/// assert!(options.lock_on_perfect);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameOptions {
    /// How strictly edits are checked.
    pub edit_policy: EditPolicy,
    /// How results are scored, live and on submit.
    pub scoring: ScoringPolicy,
    /// Whether submits with a fractional value are rejected.
    pub require_integer_result: bool,
    /// Whether a perfect submit locks the puzzle.
    pub lock_on_perfect: bool,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            edit_policy: EditPolicy::Strict,
            scoring: ScoringPolicy::Rounded,
            require_integer_result: true,
            lock_on_perfect: true,
        }
    }
}

impl GameOptions {
    /// Sets the edit policy.
    #[must_use]
    pub fn edit_policy(self, edit_policy: EditPolicy) -> Self {
        Self {
            edit_policy,
            ..self
        }
    }

    /// Sets the scoring policy.
    #[must_use]
    pub fn scoring(self, scoring: ScoringPolicy) -> Self {
        Self { scoring, ..self }
    }

    /// Sets whether fractional results are rejected on submit.
    #[must_use]
    pub fn require_integer_result(self, require_integer_result: bool) -> Self {
        Self {
            require_integer_result,
            ..self
        }
    }

    /// Sets whether a perfect submit locks the puzzle.
    #[must_use]
    pub fn lock_on_perfect(self, lock_on_perfect: bool) -> Self {
        Self {
            lock_on_perfect,
            ..self
        }
    }
}

/// Where a game session is in its lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum GameState {
    /// Accepting edits and submits.
    #[default]
    Editing,
    /// Solved; no further edits or submits.
    Locked,
}

/// A submitted expression and its outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct Attempt {
    /// The submitted expression.
    pub expression: Expression,
    /// The value it evaluated to.
    pub result: f64,
    /// Its distance from the target.
    pub score: Score,
}

impl Attempt {
    /// Returns `true` if the attempt hit the target.
    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.score.is_perfect()
    }
}

/// A Qu0x game session.
///
/// Owns one puzzle, the expression being built for it, and the attempts
/// submitted so far. After every edit the caller can read live
/// [`feedback`](Self::feedback); [`submit`](Self::submit) checks the
/// expression strictly and records an [`Attempt`].
///
/// # Examples
///
/// ```
/// use qu0x_core::{BinaryOperator, Symbol};
/// use qu0x_game::{Game, GameOptions};
/// use qu0x_generator::{DayIndex, PuzzleGenerator};
///
/// let puzzle = PuzzleGenerator::default().generate_day(DayIndex::FIRST);
/// let mut game = Game::new(puzzle, GameOptions::default());
///
/// game.enter(&"3^(5-2+1)+1".parse()?)?;
/// assert_eq!(game.feedback().value, Ok(82.0));
///
/// let attempt = game.submit()?;
/// assert!(attempt.is_perfect());
/// assert!(game.is_locked());
/// assert!(game.press(Symbol::Operator(BinaryOperator::Add)).is_err());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Game {
    puzzle: GeneratedPuzzle,
    options: GameOptions,
    builder: ExpressionBuilder,
    evaluator: ExpressionEvaluator,
    state: GameState,
    attempts: Vec<Attempt>,
}

impl Game {
    /// Creates an editable game for `puzzle`.
    #[must_use]
    pub fn new(puzzle: GeneratedPuzzle, options: GameOptions) -> Self {
        let builder = ExpressionBuilder::new(puzzle.dice)
            .with_allowed_operators(puzzle.allowed_operators)
            .with_policy(options.edit_policy);
        let evaluator =
            ExpressionEvaluator::new(puzzle.dice, puzzle.target).with_scoring(options.scoring);
        Self {
            puzzle,
            options,
            builder,
            evaluator,
            state: GameState::Editing,
            attempts: Vec::new(),
        }
    }

    /// Reopens a solved puzzle showing its winning expression.
    #[must_use]
    pub fn locked(puzzle: GeneratedPuzzle, options: GameOptions, expression: Expression) -> Self {
        let mut game = Self::new(puzzle, options);
        game.builder = game.builder.with_expression(expression);
        game.state = GameState::Locked;
        game
    }

    /// Restores previously submitted attempts.
    #[must_use]
    pub fn with_attempts(mut self, attempts: Vec<Attempt>) -> Self {
        self.attempts = attempts;
        self
    }

    /// Returns the puzzle.
    #[must_use]
    pub fn puzzle(&self) -> &GeneratedPuzzle {
        &self.puzzle
    }

    /// Returns the session settings.
    #[must_use]
    pub fn options(&self) -> &GameOptions {
        &self.options
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Returns `true` if the puzzle is solved and accepts no edits.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.state.is_locked()
    }

    /// Returns the expression builder.
    #[must_use]
    pub fn builder(&self) -> &ExpressionBuilder {
        &self.builder
    }

    /// Returns the current expression.
    #[must_use]
    pub fn expression(&self) -> &Expression {
        self.builder.expression()
    }

    /// Returns the dice used by the current expression.
    #[must_use]
    pub fn used(&self) -> DieIndexSet {
        self.builder.used()
    }

    /// Returns the attempts submitted so far, oldest first.
    #[must_use]
    pub fn attempts(&self) -> &[Attempt] {
        &self.attempts
    }

    /// Returns the lowest score submitted so far.
    #[must_use]
    pub fn best_score(&self) -> Option<Score> {
        self.attempts
            .iter()
            .map(|attempt| attempt.score)
            .min_by(|a, b| a.value().total_cmp(&b.value()))
    }

    fn check_editable(&self) -> Result<(), InputBlockReason> {
        if self.is_locked() {
            return Err(InputBlockReason::Locked);
        }
        Ok(())
    }

    /// Appends the die at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`InputBlockReason::Locked`] if the puzzle is solved, and
    /// otherwise the errors of [`ExpressionBuilder::append_die`].
    pub fn append_die(&mut self, index: DieIndex) -> Result<InputOperation, InputBlockReason> {
        self.check_editable()?;
        self.builder.append_die(index)
    }

    /// Appends the first free die showing `face`.
    ///
    /// # Errors
    ///
    /// Returns [`InputBlockReason::Locked`] if the puzzle is solved, and
    /// otherwise the errors of [`ExpressionBuilder::append_face`].
    pub fn append_face(&mut self, face: u8) -> Result<InputOperation, InputBlockReason> {
        self.check_editable()?;
        self.builder.append_face(face)
    }

    /// Presses an operator, parenthesis, or `!` key.
    ///
    /// # Errors
    ///
    /// Returns [`InputBlockReason::Locked`] if the puzzle is solved, and
    /// otherwise the errors of [`ExpressionBuilder::press`].
    pub fn press(&mut self, symbol: Symbol) -> Result<InputOperation, InputBlockReason> {
        self.check_editable()?;
        self.builder.press(symbol)
    }

    /// Removes the last key press.
    ///
    /// # Errors
    ///
    /// Returns [`InputBlockReason::Locked`] if the puzzle is solved, and
    /// otherwise the errors of [`ExpressionBuilder::backspace`].
    pub fn backspace(&mut self) -> Result<InputOperation, InputBlockReason> {
        self.check_editable()?;
        self.builder.backspace()
    }

    /// Clears the expression.
    ///
    /// # Errors
    ///
    /// Returns [`InputBlockReason::Locked`] if the puzzle is solved.
    pub fn clear(&mut self) -> Result<InputOperation, InputBlockReason> {
        self.check_editable()?;
        Ok(self.builder.clear())
    }

    /// Types a whole expression after the current one, token by token.
    ///
    /// Every token goes through the same checks as a single edit, and
    /// factorial markers keep the grouping they were typed with. If any key
    /// is rejected, the expression is left as it was before the call.
    ///
    /// # Errors
    ///
    /// Returns the reason the first rejected key was blocked.
    pub fn enter(&mut self, expression: &Expression) -> Result<(), InputBlockReason> {
        self.check_editable()?;
        let mut builder = self.builder.clone();
        for key in key_presses(expression) {
            match key {
                Key::Face(face) => builder.append_face(face)?,
                Key::Symbol(symbol) => builder.press(symbol)?,
                Key::Factorial(step) => builder.append_factorial(step)?,
            };
        }
        self.builder = builder;
        Ok(())
    }

    /// Returns live feedback on the current expression.
    #[must_use]
    pub fn feedback(&self) -> Assessment {
        self.evaluator.assess(self.builder.expression())
    }

    /// Submits the current expression.
    ///
    /// On success the attempt is recorded and returned. A perfect attempt
    /// locks the puzzle when [`GameOptions::lock_on_perfect`] is set.
    ///
    /// # Errors
    ///
    /// - [`SubmitError::Locked`] if the puzzle is already solved
    /// - [`SubmitError::Eval`] if the expression does not evaluate
    /// - [`SubmitError::Usage`] if it does not use every die exactly once
    /// - [`SubmitError::NonIntegerResult`] if the value is fractional and
    ///   [`GameOptions::require_integer_result`] is set
    pub fn submit(&mut self) -> Result<Attempt, SubmitError> {
        if self.is_locked() {
            return Err(SubmitError::Locked);
        }
        let expression = self.builder.expression().clone();
        let result = self.evaluator.evaluate(&expression)?;
        self.evaluator.check_usage(&expression)?;
        if self.options.require_integer_result && result.fract() != 0.0 {
            return Err(SubmitError::NonIntegerResult { value: result });
        }

        let attempt = Attempt {
            score: self.evaluator.score(result),
            expression,
            result,
        };
        log::info!(
            "submitted {} = {} (score {})",
            attempt.expression,
            attempt.result,
            attempt.score
        );
        if attempt.is_perfect() && self.options.lock_on_perfect {
            self.state = GameState::Locked;
            log::info!("puzzle {} locked", self.puzzle.seed);
        }
        self.attempts.push(attempt.clone());
        Ok(attempt)
    }
}

#[cfg(test)]
mod tests {
    use qu0x_core::{BinaryOperator, DiceSet, OperatorSet, Target};
    use qu0x_eval::{EvalError, UsageError};
    use qu0x_generator::{DayIndex, PuzzleGenerator, PuzzleSeed};

    use super::*;

    fn puzzle(values: [u8; 5], target: u32) -> GeneratedPuzzle {
        GeneratedPuzzle {
            seed: PuzzleSeed::Phrase("test".to_owned()),
            dice: DiceSet::from_values(values).unwrap(),
            target: Target::new(target),
            allowed_operators: OperatorSet::all(),
        }
    }

    fn enter(game: &mut Game, text: &str) {
        game.enter(&text.parse().unwrap()).unwrap();
    }

    #[test]
    fn test_first_day_end_to_end() {
        let puzzle = PuzzleGenerator::default().generate_day(DayIndex::FIRST);
        let mut game = Game::new(puzzle, GameOptions::default());
        for i in [0, 1, 2, 3, 4] {
            assert_eq!(game.used().len(), i);
            let _ = game.append_die(DieIndex::new(u8::try_from(i).unwrap()));
            let _ = game.press(Symbol::Operator(BinaryOperator::Add));
        }
        game.backspace().unwrap();
        assert_eq!(game.builder().text(), "3+2+5+1+1");
        let attempt = game.submit().unwrap();
        assert_eq!(attempt.result, 12.0);
        assert_eq!(attempt.score.value(), 70.0);
        assert!(!game.is_locked());

        game.clear().unwrap();
        enter(&mut game, "3^(5-2+1)+1");
        assert_eq!(game.feedback().value, Ok(82.0));
        let attempt = game.submit().unwrap();
        assert!(attempt.is_perfect());
        assert!(game.is_locked());
        assert_eq!(game.attempts().len(), 2);
        assert_eq!(game.best_score(), Some(Score::PERFECT));

        assert_eq!(game.backspace(), Err(InputBlockReason::Locked));
        assert_eq!(game.clear(), Err(InputBlockReason::Locked));
        assert_eq!(game.submit(), Err(SubmitError::Locked));
    }

    #[test]
    fn test_submit_failures_record_nothing() {
        let mut game = Game::new(puzzle([1, 1, 2, 3, 4], 10), GameOptions::default());
        assert_eq!(game.submit(), Err(SubmitError::Eval(EvalError::Empty)));

        enter(&mut game, "1+2+3+4");
        assert_eq!(
            game.submit(),
            Err(SubmitError::Usage(UsageError::IncompleteUsage { face: 1 }))
        );

        game.clear().unwrap();
        enter(&mut game, "(1+2+3)/4*1");
        assert_eq!(
            game.submit(),
            Err(SubmitError::NonIntegerResult { value: 1.5 })
        );
        assert!(game.attempts().is_empty());
        assert!(!game.is_locked());
    }

    #[test]
    fn test_fractional_result_allowed_when_configured() {
        let options = GameOptions::default().require_integer_result(false);
        let mut game = Game::new(puzzle([1, 1, 2, 3, 4], 4), options);
        enter(&mut game, "(4+3)/2*(1/1)");
        let attempt = game.submit().unwrap();
        assert_eq!(attempt.result, 3.5);
        assert!(attempt.is_perfect());
        assert!(game.is_locked());
    }

    #[test]
    fn test_no_lock_when_disabled() {
        let options = GameOptions::default().lock_on_perfect(false);
        let mut game = Game::new(puzzle([1, 1, 2, 3, 4], 11), options);
        enter(&mut game, "1+1+2+3+4");
        assert!(game.submit().unwrap().is_perfect());
        assert!(!game.is_locked());
        assert!(game.submit().is_ok());
        assert_eq!(game.attempts().len(), 2);
    }

    #[test]
    fn test_enter_is_atomic() {
        let mut game = Game::new(puzzle([1, 1, 2, 3, 4], 10), GameOptions::default());
        enter(&mut game, "1+");
        assert_eq!(
            game.enter(&"2*+3".parse().unwrap()),
            Err(InputBlockReason::ConsecutiveOperators)
        );
        assert_eq!(game.builder().text(), "1+");
        assert_eq!(
            game.enter(&"6".parse().unwrap()),
            Err(InputBlockReason::UnknownDie)
        );
        assert_eq!(game.used().len(), 1);
    }

    #[test]
    fn test_enter_keeps_spaced_factorials() {
        let mut game = Game::new(puzzle([3, 1, 1, 2, 4], 6), GameOptions::default());
        enter(&mut game, "3!! !");
        assert_eq!(game.builder().text(), "3!! !");
        assert_eq!(game.expression().len(), 3);
        assert_eq!(game.feedback().value, Ok(6.0));

        game.clear().unwrap();
        enter(&mut game, "3!!!");
        assert_eq!(game.expression().len(), 2);
        assert_eq!(game.feedback().value, Ok(3.0));
    }

    #[test]
    fn test_enter_zero_is_not_a_die() {
        let mut game = Game::new(puzzle([5, 1, 1, 2, 4], 6), GameOptions::default());
        assert_eq!(
            game.enter(&"5/0".parse().unwrap()),
            Err(InputBlockReason::UnknownDie)
        );
        assert!(game.expression().is_empty());
    }

    #[test]
    fn test_locked_restore() {
        let expression: Expression = "1+1+2+3+4".parse().unwrap();
        let game = Game::locked(
            puzzle([1, 1, 2, 3, 4], 11),
            GameOptions::default(),
            expression.clone(),
        );
        assert!(game.is_locked());
        assert_eq!(game.expression(), &expression);
        assert!(game.used().is_full());
        assert!(game.feedback().is_perfect());
    }

    #[test]
    fn test_blocked_operator_from_puzzle() {
        let mut puzzle = puzzle([1, 1, 2, 3, 4], 10);
        puzzle.allowed_operators = OperatorSet::all().difference(OperatorSet::FACTORIAL);
        let mut game = Game::new(puzzle, GameOptions::default());
        game.append_face(3).unwrap();
        assert_eq!(game.press(Symbol::Bang), Err(InputBlockReason::OperatorBlocked));
    }
}
