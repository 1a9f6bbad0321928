use crate::interpreter::evaluator::EvalResult;

/// Any value that can produce a 64-bit integer.
///
/// Numeric values enter an expression as [`Token::NumericValue`] and are
/// treated opaquely: the evaluator calls [`Numeric::eval`] exactly once per
/// token while walking the postfix sequence, and never before. Implementors
/// may therefore defer expensive or fallible work until then.
///
/// The `Display` form is what token listings show for the value, for example
/// `C(5, 2)` for a binomial coefficient.
///
/// # Example
/// ```
/// use combicalc::interpreter::value::Numeric;
///
/// assert_eq!(7i64.eval().unwrap(), 7);
/// assert_eq!(7u32.eval().unwrap(), 7);
/// assert!(u64::MAX.eval().is_err());
/// ```
///
/// [`Token::NumericValue`]: crate::token::Token::NumericValue
pub trait Numeric: std::fmt::Debug + std::fmt::Display + Send + Sync {
    /// Produces the integer value.
    ///
    /// # Errors
    /// Returns a [`RuntimeError`] when the value cannot be represented, most
    /// commonly `Overflow`.
    ///
    /// [`RuntimeError`]: crate::error::RuntimeError
    fn eval(&self) -> EvalResult<i64>;
}

macro_rules! lossless_numeric {
    ($($t:ty),*) => {
        $(
            impl Numeric for $t {
                fn eval(&self) -> EvalResult<i64> {
                    Ok(i64::from(*self))
                }
            }
        )*
    };
}

macro_rules! checked_numeric {
    ($($t:ty),*) => {
        $(
            impl Numeric for $t {
                fn eval(&self) -> EvalResult<i64> {
                    i64::try_from(*self).map_err(|_| crate::error::RuntimeError::Overflow)
                }
            }
        )*
    };
}

lossless_numeric!(i8, i16, i32, i64, u8, u16, u32);
checked_numeric!(u64, usize, isize, i128, u128);
