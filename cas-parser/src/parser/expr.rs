use std::ops::Range;
use crate::{
    parser::{
        binary::Binary,
        call::Call,
        error::{kind, Error},
        literal::Literal,
        paren::Paren,
        unary::Unary,
        Parse,
        Parser,
        Precedence,
    },
    tokenizer::TokenKind,
    try_parse_catch_fatal,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Represents a general algebraic expression, such as `3x^2 + sin(x)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A literal value.
    Literal(Literal),

    /// A parenthesized expression, such as `(1 + 2)`.
    Paren(Paren),

    /// A function call, such as `cos(x)`.
    Call(Call),

    /// A unary operation, such as `-x`.
    Unary(Unary),

    /// A binary operation, such as `1 + 2`.
    Binary(Binary),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Expr::Literal(literal) => literal.span(),
            Expr::Paren(paren) => paren.span(),
            Expr::Call(call) => call.span(),
            Expr::Unary(unary) => unary.span(),
            Expr::Binary(binary) => binary.span(),
        }
    }

    /// If this expression is an [`Expr::Paren`], returns the innermost expression in the
    /// parenthesized expression. Otherwise, returns `self`.
    pub fn innermost(&self) -> &Expr {
        let mut inner = self;
        while let Expr::Paren(paren) = inner {
            inner = &paren.expr;
        }
        inner
    }
}

impl Parse for Expr {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        if let Some(token) = input.peek().filter(|token| token.kind == TokenKind::CloseParen) {
            return Err(Error::new_fatal(
                vec![token.span.clone()],
                kind::UnclosedParenthesis { opening: false },
            ));
        }

        let lhs = Unary::parse_or_lower(input)?;
        Binary::parse_expr(input, lhs, Precedence::Any)
    }
}

/// Represents a primary expression.
///
/// Primary expressions are the simplest expressions, and are the building blocks of more complex
/// expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum Primary {
    /// A literal value.
    Literal(Literal),

    /// A parenthesized expression, such as `(1 + 2)`.
    Paren(Paren),

    /// A function call, such as `cos(x)`.
    Call(Call),
}

impl Primary {
    /// Returns the span of the primary expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Primary::Literal(literal) => literal.span(),
            Primary::Paren(paren) => paren.span(),
            Primary::Call(call) => call.span(),
        }
    }
}

impl Parse for Primary {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let Some((next_kind, span)) = input.peek().map(|token| (token.kind, token.span.clone())) else {
            return Err(input.error(kind::UnexpectedEof));
        };

        match next_kind {
            // a name followed by `(` is a call; otherwise it is a symbol
            TokenKind::Name => {
                let _ = try_parse_catch_fatal!(input.try_parse::<Call>().map(Self::Call));
                input.try_parse::<Literal>().map(Self::Literal)
            },
            TokenKind::Int | TokenKind::Float => input.try_parse::<Literal>().map(Self::Literal),
            TokenKind::OpenParen => input.try_parse::<Paren>().map(Self::Paren),
            found => Err(Error::new(vec![span], kind::UnexpectedToken {
                expected: &[TokenKind::Name, TokenKind::Int, TokenKind::Float, TokenKind::OpenParen],
                found,
            })),
        }
    }
}

impl From<Primary> for Expr {
    fn from(primary: Primary) -> Self {
        match primary {
            Primary::Literal(literal) => Self::Literal(literal),
            Primary::Paren(paren) => Self::Paren(paren),
            Primary::Call(call) => Self::Call(call),
        }
    }
}
