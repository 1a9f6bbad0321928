/// Checked integer arithmetic.
///
/// This module provides the arithmetic primitives used by the evaluator and by
/// the combinatorics formulas. Every operation either returns the exact
/// mathematical result as an `i64` or fails with a [`RuntimeError`]; nothing
/// ever wraps silently or panics.
///
/// [`RuntimeError`]: crate::error::RuntimeError
pub mod num;
