#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while evaluating a postfix sequence.
pub enum RuntimeError {
    /// A parenthesis reached the evaluator. Conversion never emits one.
    ContainsParenthesis {
        /// The parenthesis that was found, `(` or `)`.
        paren:    char,
        /// Index of the parenthesis in the postfix sequence.
        position: usize,
    },
    /// A binary operator found fewer than two values on the stack.
    MissingOperands {
        /// The operator, in display form.
        operator: String,
        /// Index of the operator in the postfix sequence.
        position: usize,
    },
    /// A unary or postfix operator found an empty stack.
    MissingOperand {
        /// The operator, in display form.
        operator: String,
        /// Index of the operator in the postfix sequence.
        position: usize,
    },
    /// A variable has no binding.
    UndefinedVariable {
        /// The name of the variable.
        name: String,
    },
    /// The postfix sequence did not reduce to exactly one value.
    NotOneValueOnStack {
        /// The number of values left on the stack.
        count: usize,
    },
    /// A result does not fit into a signed 64-bit integer.
    Overflow,
    /// Attempted division or remainder by zero.
    DivisionByZero,
    /// Exponentiation with a negative exponent has no integer result.
    NegativeExponent {
        /// The rejected exponent.
        exponent: i64,
    },
    /// Factorial is not defined for negative integers.
    NegativeFactorial {
        /// The rejected operand.
        value: i64,
    },
    /// A lookup table needed for the computation could not be allocated.
    OutOfMemory {
        /// The number of table cells that were requested.
        cells: usize,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ContainsParenthesis { paren, position } => write!(f,
                                                                    "Error at position {position}: Postfix expression contains parenthesis '{paren}'."),
            Self::MissingOperands { operator, position } => write!(f,
                                                                   "Error at position {position}: Operator '{operator}' is missing operands."),
            Self::MissingOperand { operator, position } => write!(f,
                                                                  "Error at position {position}: Operator '{operator}' is missing its operand."),
            Self::UndefinedVariable { name } => write!(f, "Error: Unknown variable '{name}'."),
            Self::NotOneValueOnStack { count } => write!(f,
                                                         "Error: Expression left {count} values on the stack instead of one."),
            Self::Overflow => write!(f, "Error: Integer overflow while trying to compute result."),
            Self::DivisionByZero => write!(f, "Error: Division by zero."),
            Self::NegativeExponent { exponent } => {
                write!(f, "Error: Negative exponent {exponent} has no integer result.")
            },
            Self::NegativeFactorial { value } => {
                write!(f, "Error: Factorial not defined for negative integer {value}.")
            },
            Self::OutOfMemory { cells } => {
                write!(f, "Error: Could not allocate a table of {cells} values.")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}
