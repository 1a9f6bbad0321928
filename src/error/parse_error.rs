#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while building or converting an
/// expression.
pub enum ParseError {
    /// A character or token is not permitted by the current legality state.
    IllegalToken {
        /// The rejected character or token, in display form.
        token:    String,
        /// Position of the rejection: a byte offset for string input, a token
        /// index for token input.
        position: usize,
    },
    /// A right parenthesis had no matching left parenthesis.
    UnmatchedParen {
        /// Index of the right parenthesis in the infix token sequence.
        position: usize,
    },
    /// A number literal does not fit into a signed 64-bit integer.
    LiteralTooLarge {
        /// Byte offset of the digit that overflowed.
        position: usize,
    },
    /// The expression latched an overflow and refuses further mutation until
    /// it is cleared.
    Poisoned,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IllegalToken { token, position } => {
                write!(f, "Error at position {position}: '{token}' is not allowed here.")
            },
            Self::UnmatchedParen { position } => write!(f,
                                                        "Error at position {position}: Closing parenthesis ')' has no matching '('."),
            Self::LiteralTooLarge { position } => {
                write!(f, "Error at position {position}: Literal is too large.")
            },
            Self::Poisoned => write!(f,
                                     "Error: Expression overflowed and must be cleared before it can be edited."),
        }
    }
}

impl std::error::Error for ParseError {}
