use std::ops::Range;
use crate::parser::{
    error::{kind, Error},
    expr::Expr,
    token::Parenthesis,
    Parse,
    Parser,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A parenthesized expression. A [`Paren`] can only contain a single expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Paren {
    /// The inner expression.
    pub expr: Box<Expr>,

    /// The region of the source code that this [`Paren`] was parsed from.
    pub span: Range<usize>,
}

impl Paren {
    /// Returns the span of the parenthesized expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

/// Parses the expression between an already consumed opening parenthesis and its closing
/// parenthesis, returning the expression and the closing parenthesis.
pub(crate) fn parse_inner(
    input: &mut Parser,
    open: &Parenthesis,
) -> Result<(Expr, Parenthesis), Error> {
    if let Ok(close) = input.clone().try_parse_with_fn(Parenthesis::close) {
        return Err(Error::new_fatal(vec![open.span.start..close.span.end], kind::EmptyParenthesis));
    }

    let expr = input.try_parse::<Expr>()?;
    let close = input.try_parse_with_fn(Parenthesis::close)
        .map_err(|_| Error::new_fatal(vec![open.span.clone()], kind::UnclosedParenthesis {
            opening: true,
        }))?;
    Ok((expr, close))
}

impl Parse for Paren {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let open = input.try_parse_with_fn(Parenthesis::open)?;
        let (expr, close) = parse_inner(input, &open)?;
        Ok(Self {
            expr: Box::new(expr),
            span: open.span.start..close.span.end,
        })
    }
}
