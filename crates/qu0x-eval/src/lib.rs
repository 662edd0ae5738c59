//! Expression evaluation for Qu0x.
//!
//! This crate turns the token sequences a player builds into numbers, checks
//! that they use exactly the puzzle's dice, and scores them against the
//! target. Player input is never executed as code: it is parsed by a small
//! recursive-descent grammar over the [`qu0x_core::Token`] set.
//!
//! # Overview
//!
//! - [`ast`]: the grammar, expression tree, and [`evaluate`]
//! - [`factorial`]: the `!` through `!!!!!` family
//! - [`usage`]: multiset comparison of numbers against dice
//! - [`score`]: [`ScoringPolicy`] and [`Score`]
//! - [`evaluator`]: [`ExpressionEvaluator`], all of the above bound to a puzzle
//! - [`search`]: the closest reachable value, for hints
//!
//! # Examples
//!
//! ```
//! use qu0x_eval::{EvalError, evaluate_str};
//!
//! assert_eq!(evaluate_str("3+4*2"), Ok(11.0));
//! assert_eq!(evaluate_str("3!!+(4-1)!"), Ok(9.0));
//! assert_eq!(evaluate_str("5/0"), Err(EvalError::DivisionByZero));
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod factorial;
pub mod score;
pub mod search;
pub mod usage;

pub use self::{
    ast::{Node, evaluate, evaluate_str},
    error::{EvalError, UsageError},
    evaluator::{Assessment, ExpressionEvaluator},
    factorial::multifactorial,
    score::{Score, ScoringPolicy},
    usage::check_usage,
};
