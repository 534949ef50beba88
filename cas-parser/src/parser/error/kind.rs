use ariadne::Fmt;
use cas_attrs::ErrorKind;
use cas_error::EXPR;
use crate::tokenizer::TokenKind;

/// The end of the source code was reached unexpectedly.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of file",
    labels = [format!("you might need to add another {} here", "expression".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// The end of the source code was expected, but something else was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected end of file",
    labels = [format!("I could not understand the remaining {} here", "expression".fg(EXPR))],
)]
pub struct ExpectedEof;

/// An unexpected token was encountered.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unexpected {}", found),
    labels = [format!("expected {} here", describe_expected(expected))],
    help = "check for a missing operator or parenthesis",
)]
pub struct UnexpectedToken {
    /// The token(s) that were expected.
    pub expected: &'static [TokenKind],

    /// The token that was found.
    pub found: TokenKind,
}

/// Lists the descriptions of the expected tokens, without repeats, as in "`(` or a number".
fn describe_expected(expected: &[TokenKind]) -> String {
    let mut descriptions: Vec<&str> = Vec::new();
    for description in expected.iter().map(|kind| kind.description()) {
        if !descriptions.contains(&description) {
            descriptions.push(description);
        }
    }
    match descriptions.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{} or {}", rest.join(", "), last),
        Some((last, _)) => last.to_string(),
        None => "nothing".to_string(),
    }
}

/// A parenthesis was not closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed parenthesis",
    labels = ["this parenthesis is not closed"],
    help = if *opening {
        "add a closing parenthesis `)` somewhere after this"
    } else {
        "add an opening parenthesis `(` somewhere before this"
    },
)]
pub struct UnclosedParenthesis {
    /// Whether the parenthesis was an opening parenthesis `(`. Otherwise, the parenthesis was a
    /// closing parenthesis `)`.
    pub opening: bool,
}

/// There was no expression inside a pair of parentheses.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing expression inside parenthesis",
    labels = ["add an expression here"],
)]
pub struct EmptyParenthesis;

/// A numeric literal could not be represented as a number.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("invalid number: `{}`", lexeme),
    labels = ["this number"],
    help = format!("numbers are written like {} or {}", "12".fg(EXPR), "0.5".fg(EXPR)),
)]
pub struct InvalidNumber {
    /// The lexeme that failed to parse.
    pub lexeme: String,
}
