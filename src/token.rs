use std::sync::Arc;

use crate::interpreter::value::Numeric;

/// A binary operator between two operands.
///
/// `Pow` is the operator users write (`^`). `Exp` never comes from user
/// input: the converter pushes it in place of `Pow` so that a chain of `^`
/// groups from right to left. Both evaluate to the same power.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`, truncating.
    Div,
    /// `%`, truncating remainder.
    Mod,
    /// `^` as written in an infix expression.
    Pow,
    /// Right-associative `^` marker used on the conversion stack.
    Exp,
}

impl BinaryOperator {
    /// Conversion precedence.
    ///
    /// `Exp` must stay strictly below `Pow` and above the multiplicative
    /// operators, otherwise `2 ^ 3 ^ 4` stops grouping to the right.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Add | Self::Sub => 1,
            Self::Mul | Self::Div | Self::Mod => 2,
            Self::Exp => 4,
            Self::Pow => 5,
        }
    }
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Pow | Self::Exp => "^",
        };
        write!(f, "{operator}")
    }
}

/// A prefix sign.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    /// `+x`
    Plus,
    /// `-x`
    Neg,
}

impl UnaryOperator {
    /// Conversion precedence of every prefix operator.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        3
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plus => write!(f, "+"),
            Self::Neg => write!(f, "-"),
        }
    }
}

/// An operator written after its operand.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PostfixOperator {
    /// `x!`
    Factorial,
}

impl PostfixOperator {
    /// Conversion precedence of every postfix operator.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        4
    }
}

impl std::fmt::Display for PostfixOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Factorial => write!(f, "!"),
        }
    }
}

/// A lexical unit of an infix or postfix expression.
///
/// The same type carries both orders: an [`Expression`] stores its tokens in
/// reading order, and the converter produces a new `Vec<Token>` in postfix
/// order.
///
/// [`Expression`]: crate::interpreter::expression::Expression
#[derive(Debug, Clone)]
pub enum Token {
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// An operator between two operands.
    BinaryOp(BinaryOperator),
    /// A prefix sign.
    UnaryOp(UnaryOperator),
    /// An operator after its operand.
    PostfixOp(PostfixOperator),
    /// A literal integer.
    Number(i64),
    /// An externally supplied value, evaluated lazily.
    NumericValue(Arc<dyn Numeric>),
    /// A named variable resolved against the bindings at evaluation time.
    Variable(String),
}

impl Token {
    /// Conversion precedence of this token; `0` for parentheses and operands.
    ///
    /// # Example
    /// ```
    /// use combicalc::token::{BinaryOperator, Token};
    ///
    /// assert_eq!(Token::BinaryOp(BinaryOperator::Mul).precedence(), 2);
    /// assert_eq!(Token::Number(7).precedence(), 0);
    /// ```
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::LeftParen
            | Self::RightParen
            | Self::Number(_)
            | Self::NumericValue(_)
            | Self::Variable(_) => 0,
            Self::BinaryOp(op) => op.precedence(),
            Self::UnaryOp(op) => op.precedence(),
            Self::PostfixOp(op) => op.precedence(),
        }
    }

    /// The legality kind of this token.
    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        match self {
            Self::LeftParen => TokenKind::LeftParen,
            Self::RightParen => TokenKind::RightParen,
            Self::BinaryOp(_) => TokenKind::BinaryOperator,
            Self::UnaryOp(_) => TokenKind::UnaryOperator,
            Self::PostfixOp(_) => TokenKind::PostfixOperator,
            Self::Number(_) => TokenKind::Number,
            Self::NumericValue(_) => TokenKind::NumericValue,
            Self::Variable(_) => TokenKind::Variable,
        }
    }

    /// Returns the literal if this token is a [`Token::Number`].
    #[must_use]
    pub const fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl PartialEq for Token {
    /// Numeric values have no structural equality; two of them are equal only
    /// when they are the same shared value.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::LeftParen, Self::LeftParen) | (Self::RightParen, Self::RightParen) => true,
            (Self::BinaryOp(l), Self::BinaryOp(r)) => l == r,
            (Self::UnaryOp(l), Self::UnaryOp(r)) => l == r,
            (Self::PostfixOp(l), Self::PostfixOp(r)) => l == r,
            (Self::Number(l), Self::Number(r)) => l == r,
            (Self::NumericValue(l), Self::NumericValue(r)) => Arc::ptr_eq(l, r),
            (Self::Variable(l), Self::Variable(r)) => l == r,
            _ => false,
        }
    }
}

impl From<i64> for Token {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<BinaryOperator> for Token {
    fn from(value: BinaryOperator) -> Self {
        Self::BinaryOp(value)
    }
}

impl From<UnaryOperator> for Token {
    fn from(value: UnaryOperator) -> Self {
        Self::UnaryOp(value)
    }
}

impl From<PostfixOperator> for Token {
    fn from(value: PostfixOperator) -> Self {
        Self::PostfixOp(value)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LeftParen => write!(f, "("),
            Self::RightParen => write!(f, ")"),
            Self::BinaryOp(op) => write!(f, "{op}"),
            Self::UnaryOp(op) => write!(f, "{op}"),
            Self::PostfixOp(op) => write!(f, "{op}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::NumericValue(value) => write!(f, "{value}"),
            Self::Variable(name) => write!(f, "{name}"),
        }
    }
}

/// Formats a token sequence with single spaces between tokens.
///
/// # Example
/// ```
/// use combicalc::token::{BinaryOperator, Token, format_tokens};
///
/// let tokens = [Token::Number(2), Token::Number(3), Token::BinaryOp(BinaryOperator::Add)];
/// assert_eq!(format_tokens(&tokens), "2 3 +");
/// ```
#[must_use]
pub fn format_tokens(tokens: &[Token]) -> String {
    tokens.iter()
          .map(ToString::to_string)
          .collect::<Vec<_>>()
          .join(" ")
}

/// The kinds of tokens the legality state machine reasons about.
///
/// `Digit` has no token of its own: it stands for "extend or start a number
/// one keystroke at a time".
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A single decimal digit typed into the expression.
    Digit,
    /// A complete number literal.
    Number,
    /// A numeric-capability value.
    NumericValue,
    /// A named variable.
    Variable,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `+ - * / % ^`
    BinaryOperator,
    /// Prefix `+` and `-`.
    UnaryOperator,
    /// `!`
    PostfixOperator,
}
