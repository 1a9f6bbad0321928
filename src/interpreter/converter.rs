use crate::{
    error::ParseError,
    token::{BinaryOperator, Token},
};

/// Result type used while building and converting expressions.
pub type ParseResult<T> = Result<T, ParseError>;

/// Converts an infix token sequence to postfix order.
///
/// This is the operator-precedence (shunting-yard) algorithm over a single
/// operator stack:
///
/// - `(` is pushed.
/// - `)` pops to the output until the matching `(` is popped and discarded,
///   then pops any prefix operators sitting directly on top of the stack,
///   since they apply to the group that was just closed.
/// - A binary operator pops every operator whose precedence is at least its
///   own, then is pushed. `Pow` is pushed as `Exp`, one precedence level
///   lower, so that a later `^` never pops it and `^` chains group to the
///   right.
/// - Prefix operators are pushed as they come.
/// - Numbers, numeric values, variables and postfix operators go straight to
///   the output.
///
/// At the end, the stack is emptied onto the output. Groups that are still
/// open (the input is a prefix such as `(2 + 3`) are closed implicitly, so the
/// output never contains a parenthesis.
///
/// # Errors
/// Returns [`ParseError::UnmatchedParen`] if a `)` has no matching `(`.
///
/// # Example
/// ```
/// use combicalc::{
///     interpreter::converter::to_postfix,
///     token::{BinaryOperator::{Add, Mul}, Token, format_tokens},
/// };
///
/// let infix = [Token::Number(2),
///              Token::BinaryOp(Add),
///              Token::Number(3),
///              Token::BinaryOp(Mul),
///              Token::Number(5)];
///
/// let postfix = to_postfix(&infix).unwrap();
/// assert_eq!(format_tokens(&postfix), "2 3 5 * +");
/// ```
pub fn to_postfix(tokens: &[Token]) -> ParseResult<Vec<Token>> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Token> = Vec::new();

    for (position, token) in tokens.iter().enumerate() {
        match token {
            Token::LeftParen | Token::UnaryOp(_) => stack.push(token.clone()),

            Token::RightParen => {
                loop {
                    match stack.pop() {
                        Some(Token::LeftParen) => break,
                        Some(top) => output.push(top),
                        None => return Err(ParseError::UnmatchedParen { position }),
                    }
                }

                while let Some(Token::UnaryOp(_)) = stack.last() {
                    output.extend(stack.pop());
                }
            },

            Token::BinaryOp(op) => {
                while let Some(top) = stack.last()
                      && top.precedence() >= op.precedence()
                {
                    output.extend(stack.pop());
                }

                let pushed = match op {
                    BinaryOperator::Pow => BinaryOperator::Exp,
                    other => *other,
                };
                stack.push(Token::BinaryOp(pushed));
            },

            Token::Number(_)
            | Token::NumericValue(_)
            | Token::Variable(_)
            | Token::PostfixOp(_) => output.push(token.clone()),
        }
    }

    while let Some(top) = stack.pop() {
        if !matches!(top, Token::LeftParen) {
            output.push(top);
        }
    }

    log::trace!("postfix of {} tokens: {}",
                tokens.len(),
                crate::token::format_tokens(&output));

    Ok(output)
}
