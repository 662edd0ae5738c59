//! Recursive-descent parser and expression tree.
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! expression := term (('+' | '-') term)*
//! term       := factor (('*' | '/') factor)*
//! factor     := power ('^' power)*
//! power      := primary postfix*
//! postfix    := '!' | '!!' | '!!!' | '!!!!' | '!!!!!'
//! primary    := NUMBER | '(' expression ')'
//! ```
//!
//! Every level folds left to right, including `^`. Each NUMBER is a single
//! digit, so two faces written side by side never form a larger number.

use qu0x_core::{BinaryOperator, Digit, Expression, FactorialStep, Token};

use crate::{EvalError, factorial::multifactorial};

/// A parsed expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A single digit.
    Number(Digit),
    /// An infix operation.
    Binary {
        /// The operator.
        op: BinaryOperator,
        /// Left operand.
        lhs: Box<Node>,
        /// Right operand.
        rhs: Box<Node>,
    },
    /// A postfix factorial marker applied to an operand.
    Factorial {
        /// The marker's step.
        step: FactorialStep,
        /// The operand.
        operand: Box<Node>,
    },
}

impl Node {
    /// Parses a token sequence.
    ///
    /// # Errors
    ///
    /// Returns one of the parse errors of [`EvalError`] if the tokens do not
    /// form exactly one expression.
    ///
    /// # Examples
    ///
    /// ```
    /// use qu0x_eval::{EvalError, Node};
    ///
    /// let node = Node::parse(&"(3+4)*2".parse()?)?;
    /// assert_eq!(node.evaluate()?, 14.0);
    ///
    /// assert_eq!(Node::parse(&"3+".parse()?), Err(EvalError::UnexpectedEnd));
    /// assert_eq!(Node::parse(&"(3+4".parse()?), Err(EvalError::UnbalancedParentheses));
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn parse(expr: &Expression) -> Result<Self, EvalError> {
        let tokens = expr.tokens();
        if tokens.is_empty() {
            return Err(EvalError::Empty);
        }
        let mut parser = Parser { tokens, pos: 0 };
        let node = parser.expression()?;
        match parser.peek() {
            None => Ok(node),
            Some(Token::CloseParen) => Err(EvalError::UnbalancedParentheses),
            Some(token) => Err(EvalError::TrailingInput {
                token,
                offset: parser.pos,
            }),
        }
    }

    /// Evaluates the tree with floating-point arithmetic.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::DivisionByZero`] when a divisor is zero,
    /// [`EvalError::InvalidFactorialOperand`] for a factorial of a negative or
    /// fractional value, and [`EvalError::NonFiniteResult`] when any
    /// intermediate value overflows or becomes NaN.
    pub fn evaluate(&self) -> Result<f64, EvalError> {
        let value = match self {
            Self::Number(digit) => f64::from(digit.value()),
            Self::Binary { op, lhs, rhs } => {
                let lhs = lhs.evaluate()?;
                let rhs = rhs.evaluate()?;
                match op {
                    BinaryOperator::Add => lhs + rhs,
                    BinaryOperator::Sub => lhs - rhs,
                    BinaryOperator::Mul => lhs * rhs,
                    BinaryOperator::Div => {
                        if rhs == 0.0 {
                            return Err(EvalError::DivisionByZero);
                        }
                        lhs / rhs
                    }
                    BinaryOperator::Pow => lhs.powf(rhs),
                }
            }
            Self::Factorial { step, operand } => multifactorial(operand.evaluate()?, *step)?,
        };
        if !value.is_finite() {
            return Err(EvalError::NonFiniteResult);
        }
        Ok(value)
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.peek()?;
        self.pos += 1;
        Some(token)
    }

    fn eat_operator(&mut self, ops: &[BinaryOperator]) -> Option<BinaryOperator> {
        match self.peek() {
            Some(Token::Operator(op)) if ops.contains(&op) => {
                self.pos += 1;
                Some(op)
            }
            _ => None,
        }
    }

    fn fold_binary(
        &mut self,
        ops: &[BinaryOperator],
        operand: fn(&mut Self) -> Result<Node, EvalError>,
    ) -> Result<Node, EvalError> {
        let mut lhs = operand(self)?;
        while let Some(op) = self.eat_operator(ops) {
            let rhs = operand(self)?;
            lhs = Node::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn expression(&mut self) -> Result<Node, EvalError> {
        self.fold_binary(&[BinaryOperator::Add, BinaryOperator::Sub], Self::term)
    }

    fn term(&mut self) -> Result<Node, EvalError> {
        self.fold_binary(&[BinaryOperator::Mul, BinaryOperator::Div], Self::factor)
    }

    fn factor(&mut self) -> Result<Node, EvalError> {
        self.fold_binary(&[BinaryOperator::Pow], Self::power)
    }

    fn power(&mut self) -> Result<Node, EvalError> {
        let mut node = self.primary()?;
        while let Some(Token::Factorial(step)) = self.peek() {
            self.pos += 1;
            node = Node::Factorial {
                step,
                operand: Box::new(node),
            };
        }
        Ok(node)
    }

    fn primary(&mut self) -> Result<Node, EvalError> {
        let offset = self.pos;
        match self.bump() {
            Some(Token::Number(digit)) => Ok(Node::Number(digit)),
            Some(Token::OpenParen) => {
                let inner = self.expression()?;
                match self.bump() {
                    Some(Token::CloseParen) => Ok(inner),
                    None => Err(EvalError::UnbalancedParentheses),
                    Some(token) => Err(EvalError::UnexpectedToken {
                        token,
                        offset: self.pos - 1,
                    }),
                }
            }
            Some(token) => Err(EvalError::UnexpectedToken { token, offset }),
            None => Err(EvalError::UnexpectedEnd),
        }
    }
}

/// Parses and evaluates an expression.
///
/// # Errors
///
/// Returns any [`EvalError`] raised by [`Node::parse`] or [`Node::evaluate`].
///
/// # Examples
///
/// ```
/// use qu0x_eval::{EvalError, evaluate};
///
/// assert_eq!(evaluate(&"3+4*2".parse()?)?, 11.0);
/// assert_eq!(evaluate(&"2^3^2".parse()?)?, 64.0);
/// assert_eq!(evaluate(&"5/0".parse()?), Err(EvalError::DivisionByZero));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn evaluate(expr: &Expression) -> Result<f64, EvalError> {
    Node::parse(expr)?.evaluate()
}

/// Tokenizes, parses, and evaluates expression text.
///
/// # Errors
///
/// Returns [`EvalError::UnknownCharacter`] for text outside the token set,
/// and otherwise the errors of [`evaluate`].
///
/// # Examples
///
/// ```
/// use qu0x_eval::{EvalError, evaluate_str};
///
/// assert_eq!(evaluate_str("(3+4)*2"), Ok(14.0));
/// assert_eq!(
///     evaluate_str("3+x"),
///     Err(EvalError::UnknownCharacter { ch: 'x', offset: 2 })
/// );
/// ```
pub fn evaluate_str(text: &str) -> Result<f64, EvalError> {
    let expr: Expression = text.parse()?;
    evaluate(&expr)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Node, EvalError> {
        Node::parse(&text.parse().unwrap())
    }

    #[test]
    fn test_precedence() {
        assert_eq!(evaluate_str("3+4*2"), Ok(11.0));
        assert_eq!(evaluate_str("(3+4)*2"), Ok(14.0));
        assert_eq!(evaluate_str("6-4-1"), Ok(1.0));
        assert_eq!(evaluate_str("6/4/3"), Ok(0.5));
        assert_eq!(evaluate_str("2*3^2"), Ok(18.0));
        assert_eq!(evaluate_str("3!^2"), Ok(36.0));
        assert_eq!(evaluate_str("(1+2)!!"), Ok(3.0));
    }

    #[test]
    fn test_power_folds_left() {
        let node = parse("2^3^2").unwrap();
        let Node::Binary { op, lhs, .. } = &node else {
            panic!("expected a binary node, got {node:?}");
        };
        assert_eq!(*op, BinaryOperator::Pow);
        assert!(matches!(
            **lhs,
            Node::Binary {
                op: BinaryOperator::Pow,
                ..
            }
        ));
        assert_eq!(node.evaluate(), Ok(64.0));
    }

    #[test]
    fn test_stacked_factorials() {
        assert_eq!(evaluate_str("3!!"), Ok(3.0));
        assert_eq!(evaluate_str("3! !"), Ok(720.0));
        assert_eq!(evaluate_str("4!!!!!"), Ok(4.0));
        assert_eq!(evaluate_str("4!!!!!!"), Ok(24.0));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse(""), Err(EvalError::Empty));
        assert_eq!(parse("   "), Err(EvalError::Empty));
        assert_eq!(parse("3*"), Err(EvalError::UnexpectedEnd));
        assert_eq!(parse("("), Err(EvalError::UnexpectedEnd));
        assert_eq!(parse("(3"), Err(EvalError::UnbalancedParentheses));
        assert_eq!(parse("3)"), Err(EvalError::UnbalancedParentheses));
        assert!(matches!(
            parse("+3"),
            Err(EvalError::UnexpectedToken { offset: 0, .. })
        ));
        assert!(matches!(
            parse("3*/4"),
            Err(EvalError::UnexpectedToken { offset: 2, .. })
        ));
        assert!(matches!(
            parse("!3"),
            Err(EvalError::UnexpectedToken { offset: 0, .. })
        ));
        assert!(matches!(
            parse("()"),
            Err(EvalError::UnexpectedToken {
                token: Token::CloseParen,
                offset: 1
            })
        ));
    }

    #[test]
    fn test_adjacent_numbers_do_not_concatenate() {
        assert!(matches!(
            parse("12"),
            Err(EvalError::TrailingInput { offset: 1, .. })
        ));
        assert!(matches!(
            parse("(1 2)"),
            Err(EvalError::UnexpectedToken { offset: 2, .. })
        ));
        assert!(matches!(
            parse("3(4)"),
            Err(EvalError::TrailingInput {
                token: Token::OpenParen,
                ..
            })
        ));
    }

    #[test]
    fn test_arithmetic_errors() {
        assert_eq!(evaluate_str("5/0"), Err(EvalError::DivisionByZero));
        assert_eq!(evaluate_str("5/(3-3)"), Err(EvalError::DivisionByZero));
        assert!(matches!(
            evaluate_str("(1-2)!"),
            Err(EvalError::InvalidFactorialOperand { .. })
        ));
        assert!(matches!(
            evaluate_str("(3/2)!"),
            Err(EvalError::InvalidFactorialOperand { .. })
        ));
        assert_eq!(evaluate_str("9!^9!"), Err(EvalError::NonFiniteResult));
        assert_eq!(evaluate_str("(9!!!!!+9!)!"), Err(EvalError::NonFiniteResult));
    }

    #[test]
    fn test_zero_digit() {
        assert_eq!(evaluate_str("0!+0"), Ok(1.0));
        assert_eq!(evaluate_str("3^0"), Ok(1.0));
        assert_eq!(evaluate_str("0/5"), Ok(0.0));
    }

    #[test]
    fn test_error_classes() {
        for text in ["", "3+", "(3", "12", "+3"] {
            assert!(evaluate_str(text).unwrap_err().is_parse_error(), "{text}");
        }
        assert!(evaluate_str("3+a").unwrap_err().is_parse_error());
        assert!(!EvalError::DivisionByZero.is_parse_error());
        assert!(!EvalError::NonFiniteResult.is_parse_error());
    }
}
