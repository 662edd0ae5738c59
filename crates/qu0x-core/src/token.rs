//! Expression tokens and operator keys.

use std::fmt::{self, Display};

use crate::Digit;

/// An infix operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum BinaryOperator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `^`
    Pow,
}

impl BinaryOperator {
    /// All binary operators, in keypad order.
    pub const ALL: [Self; 5] = [Self::Add, Self::Sub, Self::Mul, Self::Div, Self::Pow];

    /// Returns the operator's character.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
            Self::Pow => '^',
        }
    }

    /// Parses an operator character.
    #[must_use]
    pub const fn from_char(ch: char) -> Option<Self> {
        Some(match ch {
            '+' => Self::Add,
            '-' => Self::Sub,
            '*' => Self::Mul,
            '/' => Self::Div,
            '^' => Self::Pow,
            _ => return None,
        })
    }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Write::write_char(f, self.as_char())
    }
}

/// The step of a postfix factorial marker, 1-5.
///
/// A marker of `k` exclamation marks multiplies `n, n-k, n-2k, ...` down to
/// the last positive term: `!` is the ordinary factorial, `!!` the double
/// factorial, and so on up to `!!!!!`.
///
/// # Examples
///
/// ```
/// use qu0x_core::FactorialStep;
///
/// let step = FactorialStep::SINGLE;
/// assert_eq!(step.bangs(), "!");
///
/// let step = step.grow().unwrap();
/// assert_eq!(step.get(), 2);
/// assert_eq!(step.to_string(), "!!");
///
/// assert_eq!(FactorialStep::MAX.grow(), None);
/// assert_eq!(FactorialStep::SINGLE.shrink(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FactorialStep(u8);

impl FactorialStep {
    /// `!`
    pub const SINGLE: Self = Self(1);
    /// `!!!!!`
    pub const MAX: Self = Self(5);

    const BANGS: &'static str = "!!!!!";

    /// Creates a step, returning `None` unless `step` is in 1-5.
    #[must_use]
    pub const fn new(step: u8) -> Option<Self> {
        if step >= 1 && step <= Self::MAX.0 {
            Some(Self(step))
        } else {
            None
        }
    }

    /// Returns the step size.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Returns the marker text, one `!` per step.
    #[must_use]
    pub fn bangs(self) -> &'static str {
        &Self::BANGS[..usize::from(self.0)]
    }

    /// Returns the next larger step.
    #[must_use]
    pub const fn grow(self) -> Option<Self> {
        Self::new(self.0 + 1)
    }

    /// Returns the next smaller step.
    #[must_use]
    pub const fn shrink(self) -> Option<Self> {
        Self::new(self.0 - 1)
    }
}

impl Display for FactorialStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.bangs())
    }
}

/// A single token of an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum Token {
    /// A single-digit number.
    Number(Digit),
    /// An infix operator.
    Operator(BinaryOperator),
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// A postfix factorial marker.
    Factorial(FactorialStep),
}

impl Token {
    /// Returns `true` if an operand can end with this token.
    ///
    /// A binary operator, `)`, or factorial marker may follow such a token.
    #[must_use]
    pub const fn ends_operand(self) -> bool {
        matches!(self, Self::Number(_) | Self::CloseParen | Self::Factorial(_))
    }

    /// Returns the digit if this is a number token.
    #[must_use]
    pub const fn as_number(self) -> Option<Digit> {
        match self {
            Self::Number(digit) => Some(digit),
            _ => None,
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(digit) => Display::fmt(digit, f),
            Self::Operator(op) => Display::fmt(op, f),
            Self::OpenParen => f.write_str("("),
            Self::CloseParen => f.write_str(")"),
            Self::Factorial(step) => Display::fmt(step, f),
        }
    }
}

/// A non-die key the player can press.
///
/// Pressing [`Symbol::Bang`] either starts a new `!` marker or grows the
/// marker right before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum Symbol {
    /// An infix operator key.
    Operator(BinaryOperator),
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `!`
    Bang,
}

impl Symbol {
    /// All keys, in keypad order.
    pub const ALL: [Self; 8] = [
        Self::Operator(BinaryOperator::Add),
        Self::Operator(BinaryOperator::Sub),
        Self::Operator(BinaryOperator::Mul),
        Self::Operator(BinaryOperator::Div),
        Self::Operator(BinaryOperator::Pow),
        Self::Bang,
        Self::OpenParen,
        Self::CloseParen,
    ];

    /// Returns the key's character.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Operator(op) => op.as_char(),
            Self::OpenParen => '(',
            Self::CloseParen => ')',
            Self::Bang => '!',
        }
    }

    /// Parses a key character.
    #[must_use]
    pub const fn from_char(ch: char) -> Option<Self> {
        Some(match ch {
            '(' => Self::OpenParen,
            ')' => Self::CloseParen,
            '!' => Self::Bang,
            _ => match BinaryOperator::from_char(ch) {
                Some(op) => Self::Operator(op),
                None => return None,
            },
        })
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Write::write_char(f, self.as_char())
    }
}
