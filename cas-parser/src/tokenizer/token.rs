use logos::Logos;
use std::{fmt, ops::Range};

/// The kinds of tokens in an algebraic expression.
#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[token("+")]
    Add,

    #[token("-")]
    Sub,

    #[token("*")]
    Mul,

    #[token("/")]
    Div,

    #[token("^")]
    Exp,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    /// A variable, named constant, or function name. Names are made of letters and underscores
    /// only, so that `x2` is read as `x * 2`.
    #[regex(r"[a-zA-Z_]+")]
    Name,

    #[regex(r"[0-9]+")]
    Int,

    #[regex(r"[0-9]+\.[0-9]*|\.[0-9]+")]
    Float,

    /// Any character that is not part of the grammar.
    #[regex(r".", priority = 0)]
    Unknown,
}

impl TokenKind {
    /// Returns true if the token represents whitespace.
    pub fn is_whitespace(self) -> bool {
        self == TokenKind::Whitespace
    }

    /// Returns true if the token can start an operand, such as a number or an opening
    /// parenthesis.
    pub fn starts_operand(self) -> bool {
        matches!(self, TokenKind::Name | TokenKind::Int | TokenKind::Float | TokenKind::OpenParen)
    }

    /// Returns a description of the token kind, used in error messages.
    pub fn description(self) -> &'static str {
        match self {
            TokenKind::Whitespace => "whitespace",
            TokenKind::Add => "`+`",
            TokenKind::Sub => "`-`",
            TokenKind::Mul => "`*`",
            TokenKind::Div => "`/`",
            TokenKind::Exp => "`^`",
            TokenKind::OpenParen => "`(`",
            TokenKind::CloseParen => "`)`",
            TokenKind::Name => "a name",
            TokenKind::Int | TokenKind::Float => "a number",
            TokenKind::Unknown => "an unknown character",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// A token produced by the tokenizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'source> {
    /// The region of the source code that this token originated from.
    pub span: Range<usize>,

    /// The kind of token.
    pub kind: TokenKind,

    /// The raw lexeme that was parsed into this token.
    pub lexeme: &'source str,
}

impl Token<'_> {
    /// Returns true if the token represents whitespace.
    pub fn is_whitespace(&self) -> bool {
        self.kind.is_whitespace()
    }
}
