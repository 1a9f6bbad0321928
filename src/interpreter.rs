/// The converter module turns infix token sequences into postfix order.
///
/// It runs the operator-precedence algorithm over a single operator stack,
/// keeping `^` right-associative through the internal `Exp` marker and placing
/// prefix and postfix operators next to the operand they apply to.
///
/// # Responsibilities
/// - Converts a well-formed infix sequence into a parenthesis-free postfix
///   sequence.
/// - Reports a `)` that has no matching `(`.
pub mod converter;
/// The evaluator module computes the value of a postfix sequence.
///
/// The evaluator walks the postfix sequence with a value stack, resolves
/// variables against a binding table, asks numeric values for their integer
/// and applies every operator with checked arithmetic.
///
/// # Responsibilities
/// - Evaluates postfix sequences to a single `i64`.
/// - Reports runtime errors such as overflow, division by zero, missing
///   operands or unknown variables.
pub mod evaluator;
/// The expression module holds the incremental expression builder.
pub mod expression;
/// The legality module decides which token kinds may be appended next.
///
/// Given only the last token and the number of open parentheses, it returns
/// the set of kinds that keep the expression a valid prefix.
pub mod legality;
/// The lexer module splits expression strings into single-character symbols.
///
/// The grammar is deliberately small: digits, the arithmetic operators, `!`,
/// parentheses and the variable `k`. Spaces are skipped.
pub mod lexer;
/// Summation of an expression over a range of `k`.
pub mod summation;
/// The value module defines the numeric-capability trait.
///
/// Anything that can produce an `i64` on demand (every primitive integer type,
/// the combinatorics values, a summation) can be placed into an expression as
/// an operand.
pub mod value;
