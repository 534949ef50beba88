use std::ops::Range;
use crate::{
    parser::{error::{kind, Error}, Parse, Parser},
    tokenizer::TokenKind,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A number literal, such as `2` or `0.25`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitNum {
    /// The value of the number literal.
    pub value: f64,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl Parse for LitNum {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.expect(&[TokenKind::Int, TokenKind::Float])?;
        match token.lexeme.parse::<f64>() {
            Ok(value) => Ok(Self { value, span: token.span }),
            Err(_) => Err(Error::new(vec![token.span], kind::InvalidNumber {
                lexeme: token.lexeme.to_owned(),
            })),
        }
    }
}

/// A symbol literal, such as `x` or `pi`. Symbols name variables, constants, and functions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitSym {
    /// The name of the symbol.
    pub name: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl Parse for LitSym {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        input.expect(&[TokenKind::Name]).map(|token| Self {
            name: token.lexeme.to_owned(),
            span: token.span,
        })
    }
}

/// Represents a literal value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Literal {
    /// A number literal.
    Number(LitNum),

    /// A symbol literal.
    Symbol(LitSym),
}

impl Literal {
    /// Returns the span of the literal.
    pub fn span(&self) -> Range<usize> {
        match self {
            Literal::Number(num) => num.span.clone(),
            Literal::Symbol(sym) => sym.span.clone(),
        }
    }
}

impl Parse for Literal {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        match input.peek().map(|token| token.kind) {
            Some(TokenKind::Name) => input.try_parse().map(Literal::Symbol),
            _ => input.try_parse().map(Literal::Number),
        }
    }
}
