use crate::{error::RuntimeError, interpreter::evaluator::EvalResult};

/// Adds two integers, failing on overflow.
///
/// ## Example
/// ```
/// use combicalc::{error::RuntimeError, util::num::add};
///
/// assert_eq!(add(40, 2).unwrap(), 42);
/// assert_eq!(add(i64::MAX, 1).unwrap_err(), RuntimeError::Overflow);
/// ```
pub const fn add(lhs: i64, rhs: i64) -> EvalResult<i64> {
    match lhs.checked_add(rhs) {
        Some(v) => Ok(v),
        None => Err(RuntimeError::Overflow),
    }
}

/// Subtracts `rhs` from `lhs`, failing on overflow.
pub const fn sub(lhs: i64, rhs: i64) -> EvalResult<i64> {
    match lhs.checked_sub(rhs) {
        Some(v) => Ok(v),
        None => Err(RuntimeError::Overflow),
    }
}

/// Multiplies two integers, failing on overflow.
///
/// ## Example
/// ```
/// use combicalc::{error::RuntimeError, util::num::mul};
///
/// assert_eq!(mul(-6, 7).unwrap(), -42);
/// assert_eq!(mul(i64::MAX, 2).unwrap_err(), RuntimeError::Overflow);
/// ```
pub const fn mul(lhs: i64, rhs: i64) -> EvalResult<i64> {
    match lhs.checked_mul(rhs) {
        Some(v) => Ok(v),
        None => Err(RuntimeError::Overflow),
    }
}

/// Truncating integer division.
///
/// ## Errors
/// - `DivisionByZero` if `rhs` is zero.
/// - `Overflow` for `i64::MIN / -1`.
///
/// ## Example
/// ```
/// use combicalc::{error::RuntimeError, util::num::div};
///
/// assert_eq!(div(-7, 2).unwrap(), -3);
/// assert_eq!(div(1, 0).unwrap_err(), RuntimeError::DivisionByZero);
/// assert_eq!(div(i64::MIN, -1).unwrap_err(), RuntimeError::Overflow);
/// ```
pub const fn div(lhs: i64, rhs: i64) -> EvalResult<i64> {
    if rhs == 0 {
        return Err(RuntimeError::DivisionByZero);
    }
    match lhs.checked_div(rhs) {
        Some(v) => Ok(v),
        None => Err(RuntimeError::Overflow),
    }
}

/// Truncating remainder; the result carries the sign of the dividend.
///
/// The remainder always fits the operands' domain, so it is not
/// overflow-checked. `i64::MIN % -1` is `0`.
///
/// ## Errors
/// Returns `DivisionByZero` if `rhs` is zero.
///
/// ## Example
/// ```
/// use combicalc::util::num::rem;
///
/// assert_eq!(rem(-7, 3).unwrap(), -1);
/// assert_eq!(rem(7, -3).unwrap(), 1);
/// assert_eq!(rem(i64::MIN, -1).unwrap(), 0);
/// ```
pub const fn rem(lhs: i64, rhs: i64) -> EvalResult<i64> {
    if rhs == 0 {
        return Err(RuntimeError::DivisionByZero);
    }
    Ok(lhs.wrapping_rem(rhs))
}

/// Negates an integer, failing for `i64::MIN`.
pub const fn neg(value: i64) -> EvalResult<i64> {
    match value.checked_neg() {
        Some(v) => Ok(v),
        None => Err(RuntimeError::Overflow),
    }
}

/// Raises `base` to the power `exponent`.
///
/// `exponent == 0` yields `1` for every base, including `0`. Exponents beyond
/// `u32::MAX` still have exact results for the bases `0`, `1` and `-1`; every
/// other base overflows.
///
/// ## Errors
/// - `NegativeExponent` if `exponent < 0`.
/// - `Overflow` if the result does not fit into an `i64`.
///
/// ## Example
/// ```
/// use combicalc::{error::RuntimeError, util::num::power};
///
/// assert_eq!(power(2, 10).unwrap(), 1024);
/// assert_eq!(power(-1, i64::MAX).unwrap(), -1);
/// assert_eq!(power(2, 63).unwrap_err(), RuntimeError::Overflow);
/// assert_eq!(power(2, -1).unwrap_err(),
///            RuntimeError::NegativeExponent { exponent: -1 });
/// ```
pub fn power(base: i64, exponent: i64) -> EvalResult<i64> {
    if exponent < 0 {
        return Err(RuntimeError::NegativeExponent { exponent });
    }

    if let Ok(exp) = u32::try_from(exponent) {
        return base.checked_pow(exp).ok_or(RuntimeError::Overflow);
    }

    match base {
        0 | 1 => Ok(base),
        -1 if exponent % 2 == 0 => Ok(1),
        -1 => Ok(-1),
        _ => Err(RuntimeError::Overflow),
    }
}

/// Computes `value!` as the checked product of `2..=value`.
///
/// ## Errors
/// - `NegativeFactorial` if `value < 0`.
/// - `Overflow` if the result does not fit into an `i64` (anything above
///   `20!`).
///
/// ## Example
/// ```
/// use combicalc::{error::RuntimeError, util::num::factorial};
///
/// assert_eq!(factorial(0).unwrap(), 1);
/// assert_eq!(factorial(5).unwrap(), 120);
/// assert_eq!(factorial(21).unwrap_err(), RuntimeError::Overflow);
/// assert_eq!(factorial(-3).unwrap_err(),
///            RuntimeError::NegativeFactorial { value: -3 });
/// ```
pub fn factorial(value: i64) -> EvalResult<i64> {
    if value < 0 {
        return Err(RuntimeError::NegativeFactorial { value });
    }

    (2..=value).try_fold(1i64, mul)
}
