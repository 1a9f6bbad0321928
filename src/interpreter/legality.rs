use crate::token::{Token, TokenKind};

/// A set of [`TokenKind`]s that may be appended next.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Allowed(u16);

impl Allowed {
    /// The empty set.
    pub const NONE: Self = Self(0);

    /// Everything that may start an operand.
    pub const OPERAND_START: Self = Self::NONE.with(TokenKind::LeftParen)
                                              .with(TokenKind::Digit)
                                              .with(TokenKind::Number)
                                              .with(TokenKind::NumericValue)
                                              .with(TokenKind::Variable)
                                              .with(TokenKind::UnaryOperator);

    /// Everything that may follow a complete operand.
    pub const AFTER_OPERAND: Self = Self::NONE.with(TokenKind::BinaryOperator)
                                              .with(TokenKind::PostfixOperator);

    const fn bit(kind: TokenKind) -> u16 {
        1 << kind as u16
    }

    /// Returns a copy of the set that also contains `kind`.
    #[must_use]
    pub const fn with(self, kind: TokenKind) -> Self {
        Self(self.0 | Self::bit(kind))
    }

    /// Returns whether `kind` is in the set.
    #[must_use]
    pub const fn contains(self, kind: TokenKind) -> bool {
        self.0 & Self::bit(kind) != 0
    }

    /// Returns whether the set is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for Allowed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const ALL: [TokenKind; 9] = [TokenKind::Digit,
                                     TokenKind::Number,
                                     TokenKind::NumericValue,
                                     TokenKind::Variable,
                                     TokenKind::LeftParen,
                                     TokenKind::RightParen,
                                     TokenKind::BinaryOperator,
                                     TokenKind::UnaryOperator,
                                     TokenKind::PostfixOperator];
        let names: Vec<String> = ALL.iter()
                                    .filter(|kind| self.contains(**kind))
                                    .map(|kind| format!("{kind:?}"))
                                    .collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}

/// Computes the token kinds that may follow `last`.
///
/// The state machine only looks at the last token and at the number of
/// parentheses still open, which is enough to keep every prefix of an
/// expression well formed:
///
/// | last token               | allowed next                                                    |
/// |--------------------------|-----------------------------------------------------------------|
/// | none, `(`, operator      | `(`, digit, number, numeric value, variable, unary              |
/// | `)`, numeric value, `k`, `!` | binary, postfix                                            |
/// | number `0`               | digit, binary, postfix, number, numeric value                  |
/// | other number             | digit, binary, postfix                                          |
///
/// A right parenthesis is added after any complete operand while
/// `unmatched_parens > 0`. A literal `0` may still be replaced by a number or
/// numeric value, which is why it allows those kinds.
///
/// # Example
/// ```
/// use combicalc::{
///     interpreter::legality::allowed_after,
///     token::{BinaryOperator, Token, TokenKind},
/// };
///
/// let start = allowed_after(None, 0);
/// assert!(start.contains(TokenKind::UnaryOperator));
/// assert!(!start.contains(TokenKind::BinaryOperator));
///
/// let after_plus = allowed_after(Some(&Token::BinaryOp(BinaryOperator::Add)), 0);
/// assert!(!after_plus.contains(TokenKind::BinaryOperator));
///
/// let after_seven = allowed_after(Some(&Token::Number(7)), 1);
/// assert!(after_seven.contains(TokenKind::RightParen));
/// ```
#[must_use]
pub fn allowed_after(last: Option<&Token>, unmatched_parens: usize) -> Allowed {
    let closable = |allowed: Allowed| {
        if unmatched_parens > 0 {
            allowed.with(TokenKind::RightParen)
        } else {
            allowed
        }
    };

    match last {
        None | Some(Token::LeftParen | Token::BinaryOp(_) | Token::UnaryOp(_)) => {
            Allowed::OPERAND_START
        },
        Some(Token::RightParen
             | Token::NumericValue(_)
             | Token::Variable(_)
             | Token::PostfixOp(_)) => closable(Allowed::AFTER_OPERAND),
        Some(Token::Number(0)) => closable(Allowed::AFTER_OPERAND.with(TokenKind::Digit)
                                                                 .with(TokenKind::Number)
                                                                 .with(TokenKind::NumericValue)),
        Some(Token::Number(_)) => closable(Allowed::AFTER_OPERAND.with(TokenKind::Digit)),
    }
}
