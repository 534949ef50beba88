pub mod token;

use logos::{Lexer, Logos};
pub use token::{Token, TokenKind};

/// Returns an iterator over the token kinds produced by the tokenizer.
pub fn tokenize(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Returns an owned array containing all of the tokens produced by the tokenizer. This allows us
/// to backtrack in case of an error.
///
/// Any character the tokenizer does not recognize is kept as a [`TokenKind::Unknown`] token, so
/// that the parser can report it.
pub fn tokenize_complete(input: &str) -> Box<[Token]> {
    let mut lexer = tokenize(input);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        tokens.push(Token {
            span: lexer.span(),
            kind: result.unwrap_or(TokenKind::Unknown),
            lexeme: lexer.slice(),
        });
    }

    tokens.into_boxed_slice()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Compares the tokens produced by the tokenizer to the raw expected tokens.
    fn compare_tokens<'source, const N: usize>(input: &'source str, expected: [(TokenKind, &'source str); N]) {
        let mut lexer = tokenize(input);

        for (expected_kind, expected_lexeme) in expected.into_iter() {
            assert_eq!(lexer.next(), Some(Ok(expected_kind)));
            assert_eq!(lexer.slice(), expected_lexeme);
        }

        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn basic_expr() {
        compare_tokens(
            "1 + 2",
            [
                (TokenKind::Int, "1"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Add, "+"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Int, "2"),
            ],
        );
    }

    #[test]
    fn implicit_product_and_call() {
        compare_tokens(
            "2x^3-sin(y)/0.5",
            [
                (TokenKind::Int, "2"),
                (TokenKind::Name, "x"),
                (TokenKind::Exp, "^"),
                (TokenKind::Int, "3"),
                (TokenKind::Sub, "-"),
                (TokenKind::Name, "sin"),
                (TokenKind::OpenParen, "("),
                (TokenKind::Name, "y"),
                (TokenKind::CloseParen, ")"),
                (TokenKind::Div, "/"),
                (TokenKind::Float, "0.5"),
            ],
        );
    }

    #[test]
    fn unknown_characters() {
        let tokens = tokenize_complete("x $ 1");
        let kinds = tokens.iter().map(|t| t.kind).collect::<Vec<_>>();
        assert_eq!(kinds, vec![
            TokenKind::Name,
            TokenKind::Whitespace,
            TokenKind::Unknown,
            TokenKind::Whitespace,
            TokenKind::Int,
        ]);
    }
}
