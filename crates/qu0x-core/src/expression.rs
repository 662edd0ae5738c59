//! Token sequences and their canonical text form.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use crate::{BinaryOperator, Digit, FactorialStep, Token};

/// Errors that can occur when tokenizing expression text.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseExpressionError {
    /// The text contains a character that is not part of the token set.
    #[display("unknown character {ch:?} at offset {offset}")]
    UnknownCharacter {
        /// The rejected character.
        ch: char,
        /// Character offset within the text.
        offset: usize,
    },
}

/// An ordered sequence of tokens.
///
/// An expression does not have to be grammatical; in-progress input is
/// represented by the same type. The text form never lets two number tokens
/// touch: adjacent numbers are separated by a space so a reader can't mistake
/// `3` followed by `4` for thirty-four.
///
/// # Examples
///
/// ```
/// use qu0x_core::{Die, Digit, Expression, Token};
///
/// let mut expr: Expression = "3!!+4".parse()?;
/// assert_eq!(expr.len(), 4);
///
/// expr.push(Token::Number(Die::new(2)?.into()));
/// assert_eq!(expr.to_string(), "3!!+4 2");
///
/// let digits: Vec<u8> = expr.numbers().map(Digit::value).collect();
/// assert_eq!(digits, [3, 4, 2]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Expression {
    tokens: Vec<Token>,
}

impl Expression {
    /// Creates an empty expression.
    #[must_use]
    pub const fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    /// Creates an expression from tokens.
    #[must_use]
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    /// Returns the tokens in order.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Returns the number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if there are no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns the last token.
    #[must_use]
    pub fn last(&self) -> Option<Token> {
        self.tokens.last().copied()
    }

    /// Returns a mutable reference to the last token.
    pub fn last_mut(&mut self) -> Option<&mut Token> {
        self.tokens.last_mut()
    }

    /// Appends a token.
    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    /// Removes and returns the last token.
    pub fn pop(&mut self) -> Option<Token> {
        self.tokens.pop()
    }

    /// Removes every token.
    pub fn clear(&mut self) {
        self.tokens.clear();
    }

    /// Iterates over the digits used as numbers, in order.
    pub fn numbers(&self) -> impl Iterator<Item = Digit> + '_ {
        self.tokens.iter().filter_map(|token| token.as_number())
    }

    /// Returns the number of `(` tokens not yet closed by a `)`.
    ///
    /// Unmatched `)` tokens are ignored, so the result is never negative.
    #[must_use]
    pub fn open_parens(&self) -> usize {
        self.tokens.iter().fold(0, |depth, token| match token {
            Token::OpenParen => depth + 1,
            Token::CloseParen => depth.saturating_sub(1),
            _ => depth,
        })
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut prev = None;
        for token in &self.tokens {
            let needs_space = matches!(
                (prev, token),
                (Some(Token::Number(_)), Token::Number(_))
                    | (Some(Token::Factorial(_)), Token::Factorial(_))
            );
            if needs_space {
                f.write_str(" ")?;
            }
            Display::fmt(token, f)?;
            prev = Some(*token);
        }
        Ok(())
    }
}

impl FromStr for Expression {
    type Err = ParseExpressionError;

    /// Tokenizes expression text.
    ///
    /// Whitespace separates tokens and is otherwise ignored. Every digit is its
    /// own number token. A run of `!` is split greedily into markers of at
    /// most five.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = Vec::new();
        let mut bangs = 0u8;

        let flush = |tokens: &mut Vec<Token>, bangs: &mut u8| {
            if let Some(step) = FactorialStep::new(*bangs) {
                tokens.push(Token::Factorial(step));
            }
            *bangs = 0;
        };

        for (offset, ch) in s.chars().enumerate() {
            if ch == '!' {
                bangs += 1;
                if bangs == FactorialStep::MAX.get() {
                    flush(&mut tokens, &mut bangs);
                }
                continue;
            }
            flush(&mut tokens, &mut bangs);

            if ch.is_whitespace() {
                continue;
            }
            let token = if let Some(digit) = Digit::from_char(ch) {
                Token::Number(digit)
            } else if let Some(op) = BinaryOperator::from_char(ch) {
                Token::Operator(op)
            } else if ch == '(' {
                Token::OpenParen
            } else if ch == ')' {
                Token::CloseParen
            } else {
                return Err(ParseExpressionError::UnknownCharacter { ch, offset });
            };
            tokens.push(token);
        }
        flush(&mut tokens, &mut bangs);

        Ok(Self { tokens })
    }
}

impl From<Vec<Token>> for Expression {
    fn from(tokens: Vec<Token>) -> Self {
        Self::from_tokens(tokens)
    }
}
