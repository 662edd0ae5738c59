//! Evaluation bound to one puzzle.

use qu0x_core::{DiceSet, Expression, Target};

use crate::{EvalError, Score, ScoringPolicy, UsageError, ast, usage};

/// Evaluates expressions against a puzzle's dice and target.
///
/// # Examples
///
/// ```
/// use qu0x_core::{DiceSet, Target};
/// use qu0x_eval::{EvalError, ExpressionEvaluator, UsageError};
///
/// let dice = DiceSet::from_values([3, 2, 5, 1, 1])?;
/// let evaluator = ExpressionEvaluator::new(dice, Target::new(82));
///
/// let done = evaluator.assess(&"3^(5-2+1)+1".parse()?);
/// assert_eq!(done.value, Ok(82.0));
/// assert!(done.is_perfect());
///
/// let partial = evaluator.assess(&"3*5+".parse()?);
/// assert_eq!(partial.value, Err(EvalError::UnexpectedEnd));
/// assert_eq!(partial.score, None);
/// assert_eq!(partial.usage, Err(UsageError::IncompleteUsage { face: 1 }));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionEvaluator {
    dice: DiceSet,
    target: Target,
    scoring: ScoringPolicy,
}

/// Everything known about an expression at one moment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Assessment {
    /// The value, or why there is none.
    pub value: Result<f64, EvalError>,
    /// The score of the value, if it has one.
    pub score: Option<Score>,
    /// Whether the numbers are exactly the dice.
    pub usage: Result<(), UsageError>,
}

impl Assessment {
    /// Returns `true` if the expression evaluates, uses every die once, and
    /// scores zero.
    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.usage.is_ok() && self.score.is_some_and(Score::is_perfect)
    }
}

impl ExpressionEvaluator {
    /// Creates an evaluator with the default scoring policy.
    #[must_use]
    pub fn new(dice: DiceSet, target: Target) -> Self {
        Self {
            dice,
            target,
            scoring: ScoringPolicy::default(),
        }
    }

    /// Sets the scoring policy.
    #[must_use]
    pub fn with_scoring(self, scoring: ScoringPolicy) -> Self {
        Self { scoring, ..self }
    }

    /// Returns the dice.
    #[must_use]
    pub fn dice(&self) -> &DiceSet {
        &self.dice
    }

    /// Returns the target.
    #[must_use]
    pub fn target(&self) -> Target {
        self.target
    }

    /// Returns the scoring policy.
    #[must_use]
    pub fn scoring(&self) -> ScoringPolicy {
        self.scoring
    }

    /// Evaluates `expr`.
    ///
    /// # Errors
    ///
    /// See [`evaluate`](crate::evaluate).
    pub fn evaluate(&self, expr: &Expression) -> Result<f64, EvalError> {
        ast::evaluate(expr)
    }

    /// Checks that `expr` uses exactly the dice.
    ///
    /// # Errors
    ///
    /// See [`check_usage`](crate::check_usage).
    pub fn check_usage(&self, expr: &Expression) -> Result<(), UsageError> {
        usage::check_usage(&self.dice, expr)
    }

    /// Scores a value against the target.
    #[must_use]
    pub fn score(&self, value: f64) -> Score {
        self.scoring.score(value, self.target)
    }

    /// Evaluates, scores, and checks `expr` in one pass.
    #[must_use]
    pub fn assess(&self, expr: &Expression) -> Assessment {
        let value = self.evaluate(expr);
        Assessment {
            value,
            score: value.ok().map(|value| self.score(value)),
            usage: self.check_usage(expr),
        }
    }
}
