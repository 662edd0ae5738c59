//! Allow-lists of operator keys.

use std::fmt;

use crate::{BinaryOperator, Symbol};

bitflags::bitflags! {
    /// The operator keys offered for a puzzle.
    ///
    /// The grammar always understands every operator; an allow-list only
    /// decides which keys the player may press on a given day.
    ///
    /// # Examples
    ///
    /// ```
    /// use qu0x_core::{BinaryOperator, OperatorSet, Symbol};
    ///
    /// let allowed = OperatorSet::all().difference(OperatorSet::POW);
    /// assert!(allowed.allows(Symbol::Operator(BinaryOperator::Add)));
    /// assert!(!allowed.allows(Symbol::Operator(BinaryOperator::Pow)));
    /// assert!(allowed.allows(Symbol::OpenParen));
    /// assert_eq!(allowed.to_string(), "+-*/!()");
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct OperatorSet: u8 {
        /// `+`
        const ADD = 1 << 0;
        /// `-`
        const SUB = 1 << 1;
        /// `*`
        const MUL = 1 << 2;
        /// `/`
        const DIV = 1 << 3;
        /// `^`
        const POW = 1 << 4;
        /// `!` and its repetitions
        const FACTORIAL = 1 << 5;
        /// `(` and `)`
        const PARENS = 1 << 6;
    }
}

impl OperatorSet {
    /// Returns the flag controlling `symbol`.
    #[must_use]
    pub const fn for_symbol(symbol: Symbol) -> Self {
        match symbol {
            Symbol::Operator(BinaryOperator::Add) => Self::ADD,
            Symbol::Operator(BinaryOperator::Sub) => Self::SUB,
            Symbol::Operator(BinaryOperator::Mul) => Self::MUL,
            Symbol::Operator(BinaryOperator::Div) => Self::DIV,
            Symbol::Operator(BinaryOperator::Pow) => Self::POW,
            Symbol::Bang => Self::FACTORIAL,
            Symbol::OpenParen | Symbol::CloseParen => Self::PARENS,
        }
    }

    /// Returns `true` if the key may be pressed.
    #[must_use]
    pub const fn allows(self, symbol: Symbol) -> bool {
        self.contains(Self::for_symbol(symbol))
    }

    /// Iterates over the allowed keys in keypad order.
    pub fn symbols(self) -> impl Iterator<Item = Symbol> {
        Symbol::ALL
            .into_iter()
            .filter(move |symbol| self.allows(*symbol))
    }
}

impl Default for OperatorSet {
    fn default() -> Self {
        Self::all()
    }
}

impl fmt::Display for OperatorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in self.symbols() {
            fmt::Display::fmt(&symbol, f)?;
        }
        Ok(())
    }
}
