//! # combicalc
//!
//! combicalc builds integer expressions one token at a time and evaluates them
//! with checked 64-bit arithmetic.
//!
//! Every append is validated against a small legality state machine, so an
//! expression under construction is always a well-formed prefix. Evaluation
//! converts the infix tokens to postfix order and walks them with a value
//! stack. Operands can be literals, the variable `k`, or any value that
//! implements [`Numeric`](interpreter::value::Numeric), such as the
//! combinatorics counts in [`combinatorics`].

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::interpreter::{evaluator::Bindings, expression::Expression};

/// Counting values that can be used as operands.
///
/// This module packages the standard counting formulas (binomial
/// coefficients, falling factorials, multisets, Stirling numbers of the second
/// kind, integer partitions) and the twelvefold way as numeric values. Each
/// value records its parameters and computes the count lazily when the
/// evaluator asks for it.
///
/// # Responsibilities
/// - Computes counts exactly, reporting overflow instead of wrapping.
/// - Dispatches the twelve ball-and-box placement problems to their closed
///   forms.
pub mod combinatorics;
/// Provides unified error types for building and evaluating expressions.
///
/// This module defines all errors that can be raised while appending tokens,
/// parsing an expression string, converting to postfix order, or evaluating.
/// Errors carry the offending token and its position where one exists.
///
/// # Responsibilities
/// - Defines error enums for every failure mode (build, conversion,
///   evaluation).
/// - Supports integration with standard error handling traits and reporting
///   utilities.
pub mod error;
/// Orchestrates the way from tokens to a value.
///
/// This module ties together the lexer, the legality state machine, the
/// converter, the evaluator and the expression builder that drives them.
///
/// # Responsibilities
/// - Validates every token as it is appended.
/// - Converts infix token sequences to postfix order.
/// - Evaluates postfix sequences against a variable table.
pub mod interpreter;
/// Defines the tokens expressions are made of.
///
/// Operators carry their conversion precedence and display form; the `Token`
/// enum is shared between the infix and the postfix representation.
pub mod token;
/// General utilities for checked integer arithmetic.
pub mod util;

/// Parses an expression string and evaluates it.
///
/// # Errors
/// Returns an error if the string contains an illegal or misplaced character,
/// if a literal does not fit into an `i64`, or if evaluation fails.
///
/// # Examples
/// ```
/// use combicalc::{evaluate, interpreter::evaluator::Bindings};
///
/// // Simple expression: the result will be calculated and no error should occur.
/// let res = evaluate("2 + 3 * 5", &Bindings::new());
/// assert_eq!(res.unwrap(), 17);
///
/// // The variable `k` must be bound.
/// assert!(evaluate("k + 1", &Bindings::new()).is_err());
/// let bindings = Bindings::from([("k".to_string(), 41)]);
/// assert_eq!(evaluate("k + 1", &bindings).unwrap(), 42);
/// ```
pub fn evaluate(source: &str, bindings: &Bindings) -> Result<i64, Box<dyn std::error::Error>> {
    let expression = Expression::parse_with(source, bindings.clone())?;
    log::debug!("parsed '{source}' into [{expression}]");
    Ok(expression.evaluate()?)
}
