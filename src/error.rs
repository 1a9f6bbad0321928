/// Build and conversion errors.
///
/// Defines all error types that can occur while appending tokens to an
/// expression, while parsing an expression string, and while converting an
/// infix sequence to postfix order.
pub mod parse_error;
/// Evaluation errors.
///
/// Contains all error types that can be raised while walking a postfix
/// sequence: missing operands, unknown variables, overflow and the domain
/// errors of exponentiation and factorial.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Any error produced on the way from an expression to its value.
pub enum Error {
    /// The expression could not be built or converted.
    Parse(ParseError),
    /// The postfix sequence could not be evaluated.
    Runtime(RuntimeError),
}

impl From<ParseError> for Error {
    fn from(value: ParseError) -> Self {
        Self::Parse(value)
    }
}

impl From<RuntimeError> for Error {
    fn from(value: RuntimeError) -> Self {
        Self::Runtime(value)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "{e}"),
            Self::Runtime(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Runtime(e) => Some(e),
        }
    }
}
