//! Game session management for Qu0x.
//!
//! This crate turns a generated puzzle into an interactive session:
//!
//! - [`ExpressionBuilder`] accepts dice taps and operator keys one at a time,
//!   keeping dice usage in lockstep with the tokens and rejecting edits that
//!   break the structure of an expression.
//! - [`Game`] wraps the builder with live feedback, strict submit checks, the
//!   attempt history, and the editing/locked lifecycle.
//!
//! Rejected edits return an [`InputBlockReason`] and leave the session
//! unchanged; rejected submits return a [`SubmitError`] and record nothing.

mod builder;
mod error;
mod game;
mod input;

pub use self::{builder::*, error::*, game::*, input::*};
