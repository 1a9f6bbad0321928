use std::collections::HashMap;

use crate::{
    error::RuntimeError,
    token::{BinaryOperator, PostfixOperator, Token, UnaryOperator},
    util::num,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Variable bindings: variable name to bound value.
pub type Bindings = HashMap<String, i64>;

/// Applies a binary operator with checked arithmetic.
///
/// `Pow` and `Exp` both compute the power; they only differ during
/// conversion.
///
/// # Example
/// ```
/// use combicalc::{interpreter::evaluator::apply_binary, token::BinaryOperator};
///
/// assert_eq!(apply_binary(BinaryOperator::Exp, 2, 10).unwrap(), 1024);
/// assert_eq!(apply_binary(BinaryOperator::Mod, -7, 3).unwrap(), -1);
/// ```
pub fn apply_binary(op: BinaryOperator, lhs: i64, rhs: i64) -> EvalResult<i64> {
    match op {
        BinaryOperator::Add => num::add(lhs, rhs),
        BinaryOperator::Sub => num::sub(lhs, rhs),
        BinaryOperator::Mul => num::mul(lhs, rhs),
        BinaryOperator::Div => num::div(lhs, rhs),
        BinaryOperator::Mod => num::rem(lhs, rhs),
        BinaryOperator::Pow | BinaryOperator::Exp => num::power(lhs, rhs),
    }
}

/// Applies a prefix operator.
pub const fn apply_unary(op: UnaryOperator, value: i64) -> EvalResult<i64> {
    match op {
        UnaryOperator::Plus => Ok(value),
        UnaryOperator::Neg => num::neg(value),
    }
}

/// Applies a postfix operator.
pub fn apply_postfix(op: PostfixOperator, value: i64) -> EvalResult<i64> {
    match op {
        PostfixOperator::Factorial => num::factorial(value),
    }
}

/// Evaluates a postfix token sequence.
///
/// Walks the sequence left to right with a value stack. Operands are pushed
/// (numeric values are asked for their integer exactly once, variables are
/// looked up in `bindings`); operators pop their operands, the right-hand
/// side first, and push the result.
///
/// # Errors
/// - `ContainsParenthesis` if a parenthesis appears in the sequence.
/// - `MissingOperands` / `MissingOperand` if an operator finds too few values.
/// - `UndefinedVariable` if a variable has no binding.
/// - `NotOneValueOnStack` if the sequence does not reduce to a single value.
/// - `Overflow`, `DivisionByZero`, `NegativeExponent`, `NegativeFactorial`
///   from the arithmetic itself, and any error a numeric value reports.
///
/// # Example
/// ```
/// use combicalc::{
///     interpreter::evaluator::{Bindings, evaluate_postfix},
///     token::{BinaryOperator, Token},
/// };
///
/// let postfix = [Token::Variable("k".into()),
///                Token::Number(3),
///                Token::BinaryOp(BinaryOperator::Mul)];
/// let bindings = Bindings::from([("k".to_string(), 14)]);
///
/// assert_eq!(evaluate_postfix(&postfix, &bindings).unwrap(), 42);
/// ```
pub fn evaluate_postfix(postfix: &[Token], bindings: &Bindings) -> EvalResult<i64> {
    let mut stack: Vec<i64> = Vec::with_capacity(postfix.len());

    for (position, token) in postfix.iter().enumerate() {
        match token {
            Token::LeftParen => {
                return Err(RuntimeError::ContainsParenthesis { paren: '(',
                                                               position });
            },
            Token::RightParen => {
                return Err(RuntimeError::ContainsParenthesis { paren: ')',
                                                               position });
            },

            Token::Number(value) => stack.push(*value),
            Token::NumericValue(value) => stack.push(value.eval()?),
            Token::Variable(name) => {
                let value =
                    bindings.get(name)
                            .copied()
                            .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.clone() })?;
                stack.push(value);
            },

            Token::BinaryOp(op) => {
                let (Some(rhs), Some(lhs)) = (stack.pop(), stack.pop()) else {
                    return Err(RuntimeError::MissingOperands { operator: op.to_string(),
                                                               position });
                };
                stack.push(apply_binary(*op, lhs, rhs)?);
            },
            Token::UnaryOp(op) => {
                let value = stack.pop()
                                 .ok_or_else(|| RuntimeError::MissingOperand { operator: op.to_string(),
                                                                               position })?;
                stack.push(apply_unary(*op, value)?);
            },
            Token::PostfixOp(op) => {
                let value = stack.pop()
                                 .ok_or_else(|| RuntimeError::MissingOperand { operator: op.to_string(),
                                                                               position })?;
                stack.push(apply_postfix(*op, value)?);
            },
        }
    }

    match stack.as_slice() {
        [value] => Ok(*value),
        _ => Err(RuntimeError::NotOneValueOnStack { count: stack.len() }),
    }
}
