use logos::Logos;

/// The only variable name the string grammar knows.
pub const VARIABLE_NAME: &str = "k";

/// Represents one character of the restricted expression grammar.
///
/// Every symbol is exactly one character wide: numbers are built digit by
/// digit by the [`Expression`] builder, just as they would be typed on a
/// keypad. Spaces are skipped; anything else is a lexing error.
///
/// [`Expression`]: crate::interpreter::expression::Expression
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
#[logos(skip r" +")]
pub enum Symbol {
    /// A decimal digit, `0` through `9`.
    #[regex(r"[0-9]", parse_digit)]
    Digit(u8),
    /// The reserved variable `k`.
    #[token("k")]
    Variable,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `^`
    #[token("^")]
    Caret,
    /// `!`
    #[token("!")]
    Bang,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
}

/// Parses the digit under the lexer cursor.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// - `Some(u8)`: The digit value.
/// - `None`: If the slice is not a single ASCII digit.
fn parse_digit(lex: &logos::Lexer<Symbol>) -> Option<u8> {
    match lex.slice().as_bytes() {
        [b @ b'0'..=b'9'] => Some(b - b'0'),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<Result<Symbol, ()>> {
        Symbol::lexer(source).collect()
    }

    #[test]
    fn digits_are_single_characters() {
        assert_eq!(lex("42"), vec![Ok(Symbol::Digit(4)), Ok(Symbol::Digit(2))]);
    }

    #[test]
    fn spaces_are_skipped() {
        assert_eq!(lex(" k  ^ 2 "),
                   vec![Ok(Symbol::Variable), Ok(Symbol::Caret), Ok(Symbol::Digit(2))]);
    }

    #[test]
    fn unknown_characters_are_errors() {
        assert_eq!(lex("x"), vec![Err(())]);
        assert_eq!(lex("\t"), vec![Err(())]);
    }

    #[test]
    fn spans_point_at_the_character() {
        let spans: Vec<_> = Symbol::lexer("1 + k").spanned()
                                                  .map(|(_, span)| span.start)
                                                  .collect();
        assert_eq!(spans, vec![0, 2, 4]);
    }
}
