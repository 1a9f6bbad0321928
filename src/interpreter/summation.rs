use crate::{
    error::{Error, RuntimeError},
    interpreter::{
        evaluator::{Bindings, EvalResult, evaluate_postfix},
        expression::Expression,
        lexer::VARIABLE_NAME,
        value::Numeric,
    },
    token::Token,
    util::num,
};

/// The sum of an expression over `k = start..=end`.
///
/// The expression is converted to postfix once, when the summation is built.
/// An expression that uses `k` is then evaluated once per term with `k` as the
/// only binding, so the cost grows with the length of the range; the checked
/// total usually stops a long range early with `Overflow`, but terms that
/// cancel out (`k - k`) run through all of it. An expression without `k` is
/// evaluated once and multiplied by the number of terms. An empty range sums
/// to `0`.
///
/// # Example
/// ```
/// use combicalc::interpreter::{
///     expression::Expression, summation::Summation, value::Numeric,
/// };
///
/// let squares = Summation::new(1, 10, Expression::parse("k^2").unwrap()).unwrap();
/// assert_eq!(squares.eval().unwrap(), 385);
///
/// // A summation is itself an operand.
/// let mut expr = Expression::parse("2 * ").unwrap();
/// expr.add_numeric(squares).unwrap();
/// assert_eq!(expr.evaluate().unwrap(), 770);
/// ```
#[derive(Debug, Clone)]
pub struct Summation {
    start:      i64,
    end:        i64,
    expression: Expression,
    postfix:    Vec<Token>,
}

impl Summation {
    /// Builds the summation of `expression` over `k = start..=end`.
    ///
    /// # Errors
    /// - `Parse` if the expression cannot be converted to postfix.
    /// - `Runtime(Overflow)` if the expression is latched by an overflowing
    ///   literal.
    pub fn new(start: i64, end: i64, expression: Expression) -> Result<Self, Error> {
        if expression.is_poisoned() {
            return Err(RuntimeError::Overflow.into());
        }
        let postfix = expression.postfix()?;
        Ok(Self { start,
                  end,
                  expression,
                  postfix })
    }

    /// The summed expression.
    #[must_use]
    pub const fn expression(&self) -> &Expression {
        &self.expression
    }
}

impl Numeric for Summation {
    fn eval(&self) -> EvalResult<i64> {
        if self.start > self.end {
            return Ok(0);
        }

        let uses_k = self.postfix
                         .iter()
                         .any(|t| matches!(t, Token::Variable(name) if name == VARIABLE_NAME));
        if !uses_k {
            let term = evaluate_postfix(&self.postfix, &Bindings::new())?;
            let terms = i128::from(self.end) - i128::from(self.start) + 1;
            let total = i128::from(term).checked_mul(terms)
                                        .ok_or(RuntimeError::Overflow)?;
            return i64::try_from(total).map_err(|_| RuntimeError::Overflow);
        }

        let mut bindings = Bindings::new();
        let mut total: i64 = 0;

        for k in self.start..=self.end {
            bindings.insert(VARIABLE_NAME.to_string(), k);
            total = num::add(total, evaluate_postfix(&self.postfix, &bindings)?)?;
        }

        log::trace!("{self} = {total}");
        Ok(total)
    }
}

impl std::fmt::Display for Summation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sum({VARIABLE_NAME}={}..={}; {})", self.start, self.end, self.expression)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sum(start: i64, end: i64, source: &str) -> EvalResult<i64> {
        Summation::new(start, end, Expression::parse(source).unwrap()).unwrap()
                                                                       .eval()
    }

    #[test]
    fn sums_over_the_range() {
        assert_eq!(sum(1, 10, "k"), Ok(55));
        assert_eq!(sum(1, 10, "k^2"), Ok(385));
        assert_eq!(sum(-3, 3, "k"), Ok(0));
        assert_eq!(sum(0, 4, "2"), Ok(10));
    }

    #[test]
    fn empty_range_is_zero() {
        assert_eq!(sum(5, 4, "k / 0"), Ok(0));
    }

    #[test]
    fn constant_terms_are_multiplied_out() {
        assert_eq!(sum(i64::MIN, i64::MAX, "0"), Ok(0));
        assert_eq!(sum(i64::MIN, i64::MAX, "1"), Err(RuntimeError::Overflow));
        assert_eq!(sum(1, 1_000_000_000_000, "3"), Ok(3_000_000_000_000));
        assert_eq!(sum(-5, 5, "-2"), Ok(-22));
        assert_eq!(sum(1, 2, "1 / 0"), Err(RuntimeError::DivisionByZero));
    }

    #[test]
    fn long_ranges_over_k_stop_at_the_first_overflow() {
        assert_eq!(sum(i64::MIN, i64::MAX, "k"), Err(RuntimeError::Overflow));
    }

    #[test]
    fn term_errors_propagate() {
        assert_eq!(sum(-1, 1, "10 / k"), Err(RuntimeError::DivisionByZero));
        assert_eq!(sum(1, 2, "k * 9223372036854775807"), Err(RuntimeError::Overflow));
    }

    #[test]
    fn stored_bindings_are_not_used() {
        let expr = Expression::parse_with("k", Bindings::from([("k".into(), 100)])).unwrap();
        let summation = Summation::new(1, 3, expr).unwrap();
        assert_eq!(summation.eval(), Ok(6));
    }

    #[test]
    fn poisoned_expressions_are_rejected() {
        let mut expr = Expression::new();
        expr.add_number(i64::MAX).unwrap();
        expr.add_digit(1).unwrap();
        assert_eq!(Summation::new(1, 2, expr).unwrap_err(),
                   Error::Runtime(RuntimeError::Overflow));
    }

    #[test]
    fn display_shows_the_range() {
        let summation = Summation::new(1, 10, Expression::parse("k^2").unwrap()).unwrap();
        assert_eq!(summation.to_string(), "sum(k=1..=10; k ^ 2)");
    }
}
