//! Parsers for tokens that carry nothing but their location, such as parentheses and operators.

pub mod op;

use crate::{
    parser::{error::Error, Parser},
    tokenizer::TokenKind,
};
use std::ops::Range;

/// A parenthesis, `(` or `)`.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Parenthesis {
    /// The region of the source code that this parenthesis was parsed from.
    pub(crate) span: Range<usize>,
}

impl Parenthesis {
    /// Parses an opening parenthesis. Use with [`Parser::try_parse_with_fn`].
    pub(crate) fn open(input: &mut Parser) -> Result<Self, Error> {
        input.expect(&[TokenKind::OpenParen]).map(|token| Self { span: token.span })
    }

    /// Parses a closing parenthesis. Use with [`Parser::try_parse_with_fn`].
    pub(crate) fn close(input: &mut Parser) -> Result<Self, Error> {
        input.expect(&[TokenKind::CloseParen]).map(|token| Self { span: token.span })
    }
}
