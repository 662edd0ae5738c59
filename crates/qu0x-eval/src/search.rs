//! Searching for the expression closest to the target.
//!
//! The search builds, for every subset of the dice, the set of integer values
//! reachable from exactly those dice together with one expression per value.
//! Subsets are keyed by a bitmask over die positions and visited in increasing
//! numeric order, so both halves of a split are always complete before the
//! union is formed.

use std::collections::BTreeMap;

use qu0x_core::{
    BinaryOperator, DICE_COUNT, DiceSet, Expression, OperatorSet, Symbol, Target, Token,
};

/// Intermediate values beyond this magnitude are discarded.
const VALUE_LIMIT: i64 = 1_000_000;

/// Largest exponent tried for `^`.
const MAX_EXPONENT: i64 = 32;

/// The best expression found by [`closest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hint {
    /// An expression using every die exactly once.
    pub expression: Expression,
    /// The exact value of the expression.
    pub value: i64,
}

impl Hint {
    /// Returns the distance of the value from `target`.
    #[must_use]
    pub fn distance(&self, target: Target) -> u64 {
        self.value.abs_diff(i64::from(target.value()))
    }
}

type Reachable = BTreeMap<i64, Vec<Token>>;

/// Finds an expression over every die whose value is closest to `target`.
///
/// Only the binary operators in `allowed` are used, and only integer
/// intermediate values are kept: `/` must divide exactly and `^` needs a small
/// non-negative exponent. Ties go to the smaller value.
///
/// Returns `None` if no binary operator is allowed.
///
/// # Examples
///
/// ```
/// use qu0x_core::{DiceSet, OperatorSet, Target};
/// use qu0x_eval::{evaluate, search};
///
/// let dice = DiceSet::from_values([3, 2, 5, 1, 1])?;
/// let target = Target::new(82);
///
/// let hint = search::closest(&dice, target, OperatorSet::all()).unwrap();
/// assert_eq!(hint.distance(target), 0);
/// assert_eq!(evaluate(&hint.expression)?, 82.0);
///
/// // Without `^` the best reachable value is 3*5*2*(1+1).
/// let arithmetic = OperatorSet::all().difference(OperatorSet::POW);
/// let hint = search::closest(&dice, target, arithmetic).unwrap();
/// assert_eq!(hint.value, 60);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[must_use]
pub fn closest(dice: &DiceSet, target: Target, allowed: OperatorSet) -> Option<Hint> {
    let ops: Vec<BinaryOperator> = BinaryOperator::ALL
        .into_iter()
        .filter(|op| allowed.allows(Symbol::Operator(*op)))
        .collect();
    if ops.is_empty() {
        return None;
    }

    let full = (1usize << DICE_COUNT) - 1;
    let mut table: Vec<Reachable> = vec![Reachable::new(); full + 1];
    for (index, die) in dice.iter() {
        table[1 << index.index()]
            .insert(i64::from(die.value()), vec![Token::Number(die.into())]);
    }

    for mask in 1..=full {
        if mask.count_ones() < 2 {
            continue;
        }
        let lowest = mask & mask.wrapping_neg();
        let mut reachable = Reachable::new();
        let mut left = (mask - 1) & mask;
        while left != 0 {
            if left & lowest != 0 {
                let right = mask ^ left;
                combine(&table[left], &table[right], &ops, &mut reachable);
            }
            left = (left - 1) & mask;
        }
        table[mask] = reachable;
    }

    let target = i64::from(target.value());
    table[full]
        .iter()
        .min_by_key(|(value, _)| value.abs_diff(target))
        .map(|(value, tokens)| Hint {
            expression: Expression::from_tokens(tokens.clone()),
            value: *value,
        })
}

fn combine(lhs: &Reachable, rhs: &Reachable, ops: &[BinaryOperator], out: &mut Reachable) {
    for (&a, a_tokens) in lhs {
        for (&b, b_tokens) in rhs {
            for &op in ops {
                let orders = [(a, a_tokens, b, b_tokens), (b, b_tokens, a, a_tokens)];
                for (x, x_tokens, y, y_tokens) in orders {
                    let Some(value) = apply(op, x, y) else {
                        continue;
                    };
                    out.entry(value)
                        .or_insert_with(|| join(x_tokens, op, y_tokens));
                    if matches!(op, BinaryOperator::Add | BinaryOperator::Mul) {
                        break;
                    }
                }
            }
        }
    }
}

fn apply(op: BinaryOperator, x: i64, y: i64) -> Option<i64> {
    let value = match op {
        BinaryOperator::Add => x.checked_add(y)?,
        BinaryOperator::Sub => x.checked_sub(y)?,
        BinaryOperator::Mul => x.checked_mul(y)?,
        BinaryOperator::Div => {
            if y == 0 || x % y != 0 {
                return None;
            }
            x / y
        }
        BinaryOperator::Pow => {
            if !(0..=MAX_EXPONENT).contains(&y) {
                return None;
            }
            x.checked_pow(u32::try_from(y).ok()?)?
        }
    };
    (value.abs() <= VALUE_LIMIT).then_some(value)
}

fn join(lhs: &[Token], op: BinaryOperator, rhs: &[Token]) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(lhs.len() + rhs.len() + 5);
    push_operand(&mut tokens, lhs);
    tokens.push(Token::Operator(op));
    push_operand(&mut tokens, rhs);
    tokens
}

fn push_operand(tokens: &mut Vec<Token>, operand: &[Token]) {
    if operand.len() == 1 {
        tokens.extend_from_slice(operand);
    } else {
        tokens.push(Token::OpenParen);
        tokens.extend_from_slice(operand);
        tokens.push(Token::CloseParen);
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{check_usage, evaluate};

    fn dice(values: [u8; 5]) -> DiceSet {
        DiceSet::from_values(values).unwrap()
    }

    #[test]
    fn test_exact_solutions() {
        let cases = [
            ([6, 3, 2, 4, 3], 46),
            ([2, 6, 2, 5, 4], 93),
            ([1, 5, 4, 4, 3], 70),
            ([5, 4, 5, 2, 2], 100),
        ];
        for (values, target) in cases {
            let target = Target::new(target);
            let hint = closest(&dice(values), target, OperatorSet::all()).unwrap();
            assert_eq!(hint.distance(target), 0, "{values:?}");
        }
    }

    #[test]
    fn test_unreachable_target() {
        let target = Target::new(100);
        let hint = closest(&dice([1, 1, 1, 1, 1]), target, OperatorSet::all()).unwrap();
        assert_eq!(hint.value, 9);
    }

    #[test]
    fn test_no_binary_operator() {
        let allowed = OperatorSet::FACTORIAL | OperatorSet::PARENS;
        assert_eq!(closest(&dice([1, 2, 3, 4, 5]), Target::new(1), allowed), None);
    }

    #[test]
    fn test_respects_allow_list() {
        let allowed = OperatorSet::ADD | OperatorSet::PARENS;
        let hint = closest(&dice([1, 2, 3, 4, 5]), Target::new(1), allowed).unwrap();
        assert_eq!(hint.value, 15);
        assert!(
            hint.expression
                .tokens()
                .iter()
                .all(|token| !matches!(token, Token::Operator(op) if *op != BinaryOperator::Add))
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_hint_is_a_valid_answer(
            values in prop::array::uniform5(1u8..=6),
            target in 1u32..=100,
        ) {
            let dice = dice(values);
            let target = Target::new(target);
            let hint = closest(&dice, target, OperatorSet::all()).unwrap();
            prop_assert_eq!(check_usage(&dice, &hint.expression), Ok(()));
            let value = evaluate(&hint.expression).unwrap();
            let expected = f64::from(i32::try_from(hint.value).unwrap());
            prop_assert!((value - expected).abs() < 1e-6);
        }
    }
}
