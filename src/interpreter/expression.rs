use std::sync::Arc;

use logos::Logos;

use crate::{
    error::{Error, ParseError, RuntimeError},
    interpreter::{
        converter::{ParseResult, to_postfix},
        evaluator::{Bindings, evaluate_postfix},
        legality::{Allowed, allowed_after},
        lexer::{Symbol, VARIABLE_NAME},
        value::Numeric,
    },
    token::{BinaryOperator, PostfixOperator, Token, TokenKind, UnaryOperator, format_tokens},
    util::num,
};

/// An infix expression built one token at a time.
///
/// Every append consults the legality state machine first, so the token
/// sequence is always a well-formed prefix of some valid expression and never
/// needs repair. Numbers grow digit by digit the way they are typed.
///
/// If a typed number overflows, the expression latches the overflow: it
/// refuses further edits with [`ParseError::Poisoned`] and evaluates to
/// [`RuntimeError::Overflow`] until [`Expression::clear`] is called.
///
/// # Example
/// ```
/// use combicalc::{interpreter::expression::Expression, token::BinaryOperator};
///
/// let mut expr = Expression::new();
/// expr.add_digit(2).unwrap();
/// expr.add_digit(3).unwrap();
/// expr.add_operator(BinaryOperator::Add).unwrap();
/// expr.add_number(45).unwrap();
/// assert_eq!(expr.evaluate().unwrap(), 68);
///
/// // A second binary operator is rejected on the spot.
/// expr.add_operator(BinaryOperator::Mul).unwrap();
/// assert!(expr.add_operator(BinaryOperator::Div).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Expression {
    tokens:    Vec<Token>,
    variables: Bindings,
    unmatched: usize,
    poison:    Option<RuntimeError>,
}

impl Expression {
    /// Creates an empty expression without variable bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty expression with the given variable bindings.
    #[must_use]
    pub fn with_variables(variables: Bindings) -> Self {
        Self { variables,
               ..Self::default() }
    }

    /// Builds an expression from pre-built infix tokens, checking each one
    /// against the legality state machine.
    ///
    /// `Pow` must be used for `^`; the `Exp` marker is reserved for
    /// conversion.
    ///
    /// # Errors
    /// Returns `IllegalToken` with the index of the first token that is not
    /// allowed where it stands.
    ///
    /// # Example
    /// ```
    /// use combicalc::{interpreter::expression::Expression, token::Token};
    ///
    /// let tokens = vec![Token::LeftParen, Token::Number(4), Token::RightParen];
    /// assert_eq!(Expression::from_tokens(tokens, Default::default()).unwrap()
    ///                                                               .evaluate()
    ///                                                               .unwrap(),
    ///            4);
    ///
    /// assert!(Expression::from_tokens(vec![Token::RightParen], Default::default()).is_err());
    /// ```
    pub fn from_tokens(tokens: Vec<Token>, variables: Bindings) -> ParseResult<Self> {
        let mut expr = Self::with_variables(variables);
        for (position, token) in tokens.into_iter().enumerate() {
            expr.push_checked(token).map_err(|e| match e {
                                        ParseError::IllegalToken { token, .. } => {
                                            ParseError::IllegalToken { token, position }
                                        },
                                        other => other,
                                    })?;
        }
        Ok(expr)
    }

    /// Parses the restricted expression grammar.
    ///
    /// Accepted characters are the digits, `+ - * / % ^ !`, parentheses, the
    /// variable `k` and spaces. `+` and `-` become prefix signs wherever a
    /// binary operator is not allowed.
    ///
    /// # Errors
    /// - `IllegalToken` with the byte offset of the first character that is
    ///   unknown or not allowed at its position.
    /// - `LiteralTooLarge` if a number does not fit into an `i64`.
    ///
    /// # Example
    /// ```
    /// use combicalc::interpreter::expression::Expression;
    ///
    /// let expr = Expression::parse("60/-(2 + -(1 + 1) * 2) + 3 * 2").unwrap();
    /// assert_eq!(expr.evaluate().unwrap(), 36);
    ///
    /// assert!(Expression::parse("2 ** 3").is_err());
    /// assert!(Expression::parse("x + 1").is_err());
    /// ```
    pub fn parse(source: &str) -> ParseResult<Self> {
        Self::parse_with(source, Bindings::new())
    }

    /// Parses the restricted expression grammar with variable bindings.
    ///
    /// # Errors
    /// See [`Expression::parse`].
    pub fn parse_with(source: &str, variables: Bindings) -> ParseResult<Self> {
        let mut expr = Self::with_variables(variables);

        for (symbol, span) in Symbol::lexer(source).spanned() {
            let position = span.start;
            let illegal = || ParseError::IllegalToken { token: source[span.clone()].to_string(),
                                                        position };
            let symbol = symbol.map_err(|()| illegal())?;

            let accepted = match symbol {
                Symbol::Digit(d) => expr.add_digit(d),
                Symbol::Variable => expr.add_variable(VARIABLE_NAME),
                Symbol::Plus => expr.add_operator(BinaryOperator::Add),
                Symbol::Minus => expr.add_operator(BinaryOperator::Sub),
                Symbol::Star => expr.add_operator(BinaryOperator::Mul),
                Symbol::Slash => expr.add_operator(BinaryOperator::Div),
                Symbol::Percent => expr.add_operator(BinaryOperator::Mod),
                Symbol::Caret => expr.add_operator(BinaryOperator::Pow),
                Symbol::Bang => expr.add_factorial(),
                Symbol::LParen => expr.add_left_paren(),
                Symbol::RParen => expr.add_right_paren(),
            };
            accepted.map_err(|_| illegal())?;

            if expr.is_poisoned() {
                return Err(ParseError::LiteralTooLarge { position });
            }
        }

        Ok(expr)
    }

    /// The infix tokens in reading order.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The stored variable bindings.
    #[must_use]
    pub const fn variables(&self) -> &Bindings {
        &self.variables
    }

    /// Binds `name` to `value` in the stored table, returning the previous
    /// value.
    pub fn set_variable(&mut self, name: impl Into<String>, value: i64) -> Option<i64> {
        self.variables.insert(name.into(), value)
    }

    /// The number of `(` not yet closed.
    #[must_use]
    pub const fn unmatched_parens(&self) -> usize {
        self.unmatched
    }

    /// Whether a typed number overflowed and the expression is latched.
    #[must_use]
    pub const fn is_poisoned(&self) -> bool {
        self.poison.is_some()
    }

    /// Whether no token has been appended yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The token kinds that may be appended next.
    ///
    /// A poisoned expression allows nothing.
    #[must_use]
    pub fn allowed(&self) -> Allowed {
        if self.is_poisoned() {
            return Allowed::NONE;
        }
        allowed_after(self.tokens.last(), self.unmatched)
    }

    /// Appends a decimal digit.
    ///
    /// A trailing number is extended in place (`n * 10 + d`, away from zero
    /// for negative numbers); otherwise a new single-digit number starts.
    /// An overflow latches the expression instead of failing.
    ///
    /// # Errors
    /// - `IllegalToken` if `digit > 9` or a digit is not allowed here.
    /// - `Poisoned` if the expression is latched.
    pub fn add_digit(&mut self, digit: u8) -> ParseResult<()> {
        self.require(TokenKind::Digit, || digit.to_string())?;
        if digit > 9 {
            return Err(self.illegal(digit.to_string()));
        }

        let digit = i64::from(digit);
        let Some(Token::Number(current)) = self.tokens.last_mut() else {
            self.tokens.push(Token::Number(digit));
            return Ok(());
        };

        let grown = num::mul(*current, 10).and_then(|n| {
                                                if n < 0 {
                                                    num::sub(n, digit)
                                                } else {
                                                    num::add(n, digit)
                                                }
                                            });
        match grown {
            Ok(n) => *current = n,
            Err(e) => {
                log::debug!("number {current} overflowed on digit {digit}; expression latched");
                self.poison = Some(e);
            },
        }
        Ok(())
    }

    /// Appends a complete number literal, replacing a trailing `0`.
    ///
    /// # Errors
    /// `IllegalToken` if a number is not allowed here, `Poisoned` if latched.
    pub fn add_number(&mut self, value: i64) -> ParseResult<()> {
        self.push_checked(Token::Number(value))
    }

    /// Appends a numeric value, replacing a trailing `0`.
    ///
    /// # Errors
    /// `IllegalToken` if a numeric value is not allowed here, `Poisoned` if
    /// latched.
    pub fn add_numeric(&mut self, value: impl Numeric + 'static) -> ParseResult<()> {
        self.push_checked(Token::NumericValue(Arc::new(value)))
    }

    /// Appends a shared numeric value, replacing a trailing `0`.
    ///
    /// # Errors
    /// See [`Expression::add_numeric`].
    pub fn add_shared_numeric(&mut self, value: Arc<dyn Numeric>) -> ParseResult<()> {
        self.push_checked(Token::NumericValue(value))
    }

    /// Appends a variable reference.
    ///
    /// # Errors
    /// `IllegalToken` if a variable is not allowed here, `Poisoned` if
    /// latched.
    pub fn add_variable(&mut self, name: impl Into<String>) -> ParseResult<()> {
        self.push_checked(Token::Variable(name.into()))
    }

    /// Appends an operator typed as `+ - * / % ^`.
    ///
    /// The operator is appended as binary if a binary operator is allowed.
    /// Otherwise `+` and `-` fall back to the prefix signs; any other operator
    /// is rejected.
    ///
    /// # Errors
    /// `IllegalToken` if neither form is allowed, `Poisoned` if latched.
    pub fn add_operator(&mut self, op: BinaryOperator) -> ParseResult<()> {
        let allowed = self.allowed();
        if allowed.contains(TokenKind::BinaryOperator) {
            return self.push_checked(Token::BinaryOp(op));
        }

        match op {
            BinaryOperator::Add => self.push_checked(Token::UnaryOp(UnaryOperator::Plus)),
            BinaryOperator::Sub => self.push_checked(Token::UnaryOp(UnaryOperator::Neg)),
            _ => {
                self.ensure_not_poisoned()?;
                Err(self.illegal(op.to_string()))
            },
        }
    }

    /// Appends a prefix sign.
    ///
    /// # Errors
    /// `IllegalToken` if a prefix sign is not allowed here, `Poisoned` if
    /// latched.
    pub fn add_unary(&mut self, op: UnaryOperator) -> ParseResult<()> {
        self.push_checked(Token::UnaryOp(op))
    }

    /// Appends `!`.
    ///
    /// # Errors
    /// `IllegalToken` if a postfix operator is not allowed here, `Poisoned` if
    /// latched.
    pub fn add_factorial(&mut self) -> ParseResult<()> {
        self.push_checked(Token::PostfixOp(PostfixOperator::Factorial))
    }

    /// Appends `(`.
    ///
    /// # Errors
    /// `IllegalToken` if `(` is not allowed here, `Poisoned` if latched.
    pub fn add_left_paren(&mut self) -> ParseResult<()> {
        self.push_checked(Token::LeftParen)
    }

    /// Appends `)`.
    ///
    /// # Errors
    /// `IllegalToken` if no group is open or the group has no complete operand
    /// yet, `Poisoned` if latched.
    pub fn add_right_paren(&mut self) -> ParseResult<()> {
        self.push_checked(Token::RightParen)
    }

    /// Appends any infix token after checking it against the legality state.
    ///
    /// # Errors
    /// `IllegalToken` if the token's kind is not allowed here, `Poisoned` if
    /// latched.
    pub fn add_token(&mut self, token: Token) -> ParseResult<()> {
        self.push_checked(token)
    }

    /// Removes the last keystroke.
    ///
    /// A trailing number with more than one digit loses its last digit
    /// (`-123` becomes `-12`); a single-digit number or any other token is
    /// removed. Returns `false` if the expression was already empty.
    ///
    /// # Errors
    /// `Poisoned` if the expression is latched.
    ///
    /// # Example
    /// ```
    /// use combicalc::interpreter::expression::Expression;
    ///
    /// let mut expr = Expression::parse("(12").unwrap();
    /// expr.delete_last().unwrap();
    /// assert_eq!(expr.to_string(), "( 1");
    /// expr.delete_last().unwrap();
    /// expr.delete_last().unwrap();
    /// assert!(expr.is_empty());
    /// assert_eq!(expr.unmatched_parens(), 0);
    /// ```
    pub fn delete_last(&mut self) -> ParseResult<bool> {
        self.ensure_not_poisoned()?;

        if let Some(Token::Number(n)) = self.tokens.last_mut()
           && *n / 10 != 0
        {
            *n /= 10;
            return Ok(true);
        }

        match self.tokens.pop() {
            Some(Token::LeftParen) => self.unmatched -= 1,
            Some(Token::RightParen) => self.unmatched += 1,
            Some(_) => {},
            None => return Ok(false),
        }
        Ok(true)
    }

    /// Removes every token and the overflow latch. Variable bindings are
    /// kept.
    pub fn clear(&mut self) {
        self.tokens.clear();
        self.unmatched = 0;
        self.poison = None;
    }

    /// Converts the tokens to postfix order.
    ///
    /// # Errors
    /// `UnmatchedParen` if a `)` has no matching `(`; cannot happen for tokens
    /// appended through this builder.
    pub fn postfix(&self) -> ParseResult<Vec<Token>> {
        to_postfix(&self.tokens)
    }

    /// Evaluates the expression with its stored variable bindings.
    ///
    /// # Errors
    /// Any conversion or evaluation error; `Overflow` if the expression is
    /// latched.
    pub fn evaluate(&self) -> Result<i64, Error> {
        self.evaluate_in(&self.variables)
    }

    /// Evaluates the expression with `overrides` in place of the stored
    /// bindings. The tables are not merged.
    ///
    /// # Errors
    /// See [`Expression::evaluate`].
    ///
    /// # Example
    /// ```
    /// use combicalc::interpreter::{evaluator::Bindings, expression::Expression};
    ///
    /// let expr = Expression::parse_with("k * 2", Bindings::from([("k".into(), 1)])).unwrap();
    /// assert_eq!(expr.evaluate().unwrap(), 2);
    /// assert_eq!(expr.evaluate_with(&Bindings::from([("k".into(), 21)])).unwrap(), 42);
    /// assert!(expr.evaluate_with(&Bindings::new()).is_err());
    /// ```
    pub fn evaluate_with(&self, overrides: &Bindings) -> Result<i64, Error> {
        self.evaluate_in(overrides)
    }

    fn evaluate_in(&self, bindings: &Bindings) -> Result<i64, Error> {
        if let Some(e) = &self.poison {
            return Err(e.clone().into());
        }
        let postfix = self.postfix()?;
        Ok(evaluate_postfix(&postfix, bindings)?)
    }

    fn ensure_not_poisoned(&self) -> ParseResult<()> {
        if self.is_poisoned() {
            return Err(ParseError::Poisoned);
        }
        Ok(())
    }

    fn illegal(&self, token: String) -> ParseError {
        log::debug!("rejected '{token}' after [{self}], allowed {}", self.allowed());
        ParseError::IllegalToken { token,
                                   position: self.tokens.len() }
    }

    fn require(&self, kind: TokenKind, describe: impl FnOnce() -> String) -> ParseResult<()> {
        self.ensure_not_poisoned()?;
        if self.allowed().contains(kind) {
            Ok(())
        } else {
            Err(self.illegal(describe()))
        }
    }

    /// Appends `token` if its kind is allowed, keeping the paren count and the
    /// replaceable `0` up to date.
    fn push_checked(&mut self, token: Token) -> ParseResult<()> {
        if matches!(token, Token::BinaryOp(BinaryOperator::Exp)) {
            self.ensure_not_poisoned()?;
            return Err(self.illegal(token.to_string()));
        }
        self.require(token.kind(), || token.to_string())?;

        match token {
            Token::LeftParen => self.unmatched += 1,
            Token::RightParen => self.unmatched -= 1,
            Token::Number(_) | Token::NumericValue(_) => {
                if let Some(Token::Number(0)) = self.tokens.last() {
                    self.tokens.pop();
                }
            },
            _ => {},
        }

        self.tokens.push(token);
        Ok(())
    }
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", format_tokens(&self.tokens))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::combinatorics::Combinations;

    fn eval(source: &str) -> Result<i64, Error> {
        Ok(Expression::parse(source)?.evaluate()?)
    }

    #[test]
    fn digits_accumulate() {
        let mut expr = Expression::new();
        for d in [1, 2, 3] {
            expr.add_digit(d).unwrap();
        }
        assert_eq!(expr.tokens(), &[Token::Number(123)]);
    }

    #[test]
    fn negative_numbers_grow_away_from_zero() {
        let mut expr = Expression::new();
        expr.add_number(-4).unwrap();
        expr.add_digit(2).unwrap();
        assert_eq!(expr.tokens(), &[Token::Number(-42)]);
    }

    #[test]
    fn first_token_cannot_be_a_binary_operator() {
        let mut expr = Expression::new();
        let err = expr.add_operator(BinaryOperator::Mul).unwrap_err();
        assert_eq!(err,
                   ParseError::IllegalToken { token:    "*".into(),
                                              position: 0, });
        assert!(expr.is_empty());
    }

    #[test]
    fn minus_becomes_negation_where_binary_is_illegal() {
        let mut expr = Expression::new();
        expr.add_operator(BinaryOperator::Sub).unwrap();
        expr.add_operator(BinaryOperator::Sub).unwrap();
        expr.add_digit(3).unwrap();
        expr.add_operator(BinaryOperator::Sub).unwrap();
        expr.add_operator(BinaryOperator::Add).unwrap();
        expr.add_digit(1).unwrap();
        assert_eq!(expr.tokens(),
                   &[Token::UnaryOp(UnaryOperator::Neg),
                     Token::UnaryOp(UnaryOperator::Neg),
                     Token::Number(3),
                     Token::BinaryOp(BinaryOperator::Sub),
                     Token::UnaryOp(UnaryOperator::Plus),
                     Token::Number(1)]);
        assert_eq!(expr.evaluate(), Ok(2));
    }

    #[test]
    fn right_paren_needs_an_open_group() {
        let mut expr = Expression::parse("2").unwrap();
        assert!(expr.add_right_paren().is_err());
        assert!(Expression::parse("(2))").is_err());
        assert!(Expression::parse("()").is_err());
    }

    #[test]
    fn zero_is_replaced_by_a_value() {
        let mut expr = Expression::new();
        expr.add_digit(0).unwrap();
        expr.add_numeric(Combinations::new(5, 2)).unwrap();
        assert_eq!(expr.tokens().len(), 1);
        assert_eq!(expr.evaluate(), Ok(10));

        let mut expr = Expression::parse("0").unwrap();
        expr.add_number(45).unwrap();
        assert_eq!(expr.tokens(), &[Token::Number(45)]);
        assert!(expr.add_number(6).is_err());
    }

    #[test]
    fn exp_marker_is_not_accepted_as_input() {
        let mut expr = Expression::parse("2").unwrap();
        assert!(expr.add_token(Token::BinaryOp(BinaryOperator::Exp)).is_err());
        expr.add_token(Token::BinaryOp(BinaryOperator::Pow)).unwrap();
    }

    #[test]
    fn digit_overflow_latches() {
        let mut expr = Expression::new();
        expr.add_number(i64::MAX / 10).unwrap();
        expr.add_digit(9).unwrap();
        assert!(expr.is_poisoned());
        assert_eq!(expr.allowed(), Allowed::NONE);
        assert_eq!(expr.add_digit(1), Err(ParseError::Poisoned));
        assert_eq!(expr.add_operator(BinaryOperator::Add), Err(ParseError::Poisoned));
        assert_eq!(expr.delete_last(), Err(ParseError::Poisoned));
        assert_eq!(expr.evaluate(), Err(Error::Runtime(RuntimeError::Overflow)));

        expr.clear();
        assert!(!expr.is_poisoned());
        expr.add_digit(7).unwrap();
        assert_eq!(expr.evaluate(), Ok(7));
    }

    #[test]
    fn most_negative_literal_can_be_typed() {
        let mut expr = Expression::new();
        expr.add_number(-922_337_203_685_477_580).unwrap();
        expr.add_digit(8).unwrap();
        assert_eq!(expr.tokens(), &[Token::Number(i64::MIN)]);
    }

    #[test]
    fn parsing_an_overflowing_literal_fails() {
        let err = Expression::parse("1 + 99999999999999999999").unwrap_err();
        assert_eq!(err, ParseError::LiteralTooLarge { position: 22 });
    }

    #[test]
    fn delete_truncates_numbers_then_removes_tokens() {
        let mut expr = Expression::parse("7 * (-123").unwrap();
        expr.delete_last().unwrap();
        assert_eq!(expr.to_string(), "7 * ( - 12");
        expr.delete_last().unwrap();
        expr.delete_last().unwrap();
        assert_eq!(expr.to_string(), "7 * ( -");
        expr.delete_last().unwrap();
        expr.delete_last().unwrap();
        assert_eq!(expr.unmatched_parens(), 0);
        assert_eq!(expr.to_string(), "7 *");

        let mut closed = Expression::parse("(1)").unwrap();
        closed.delete_last().unwrap();
        assert_eq!(closed.unmatched_parens(), 1);
        assert_eq!(Expression::new().delete_last(), Ok(false));
    }

    #[test]
    fn evaluate_does_not_mutate() {
        let expr = Expression::parse("2 + 3").unwrap();
        let before = expr.tokens().to_vec();
        assert_eq!(expr.evaluate(), Ok(5));
        assert_eq!(expr.tokens(), before.as_slice());
    }

    #[test]
    fn overrides_replace_the_stored_table() {
        let mut expr = Expression::parse("k + 1").unwrap();
        expr.set_variable("k", 1);
        assert_eq!(expr.evaluate(), Ok(2));
        assert_eq!(expr.evaluate_with(&Bindings::from([("j".into(), 5)])),
                   Err(Error::Runtime(RuntimeError::UndefinedVariable { name: "k".into() })));
    }

    #[test]
    fn undefined_variable() {
        let mut expr = Expression::new();
        expr.add_variable("x").unwrap();
        assert_eq!(expr.evaluate(),
                   Err(Error::Runtime(RuntimeError::UndefinedVariable { name: "x".into() })));
    }

    #[test]
    fn illegal_characters_report_their_offset() {
        assert_eq!(Expression::parse("1 + y").unwrap_err(),
                   ParseError::IllegalToken { token:    "y".into(),
                                              position: 4, });
        assert_eq!(Expression::parse("1 +* 2").unwrap_err(),
                   ParseError::IllegalToken { token:    "*".into(),
                                              position: 3, });
        assert_eq!(Expression::parse("!").unwrap_err(),
                   ParseError::IllegalToken { token:    "!".into(),
                                              position: 0, });
    }

    #[test]
    fn factorials() {
        assert_eq!(eval("5!"), Ok(120));
        assert_eq!(eval("5 * 4!"), Ok(120));
        assert_eq!(eval("5 + 4!"), Ok(29));
        assert_eq!(eval("(2+3)!"), Ok(120));
        assert_eq!(eval("3!!"), Ok(720));
        assert_eq!(eval("-3!"), Ok(-6));
        assert_eq!(eval("(-3)!"),
                   Err(Error::Runtime(RuntimeError::NegativeFactorial { value: -3 })));
    }

    #[test]
    fn incomplete_expressions_fail_at_evaluation() {
        assert_eq!(eval(""), Err(Error::Runtime(RuntimeError::NotOneValueOnStack { count: 0 })));
        assert!(matches!(eval("2 +"),
                         Err(Error::Runtime(RuntimeError::MissingOperands { .. }))));
        assert_eq!(eval("(2 + 3"), Ok(5));
    }

    #[test]
    fn display_lists_tokens() {
        let expr = Expression::parse("k^2 + -(1)").unwrap();
        assert_eq!(expr.to_string(), "k ^ 2 + - ( 1 )");
    }
}
