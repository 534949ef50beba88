use std::ops::Range;
use super::{
    error::Error,
    expr::Expr,
    literal::LitSym,
    paren::parse_inner,
    token::Parenthesis,
    Parse,
    Parser,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A function call with a single argument, such as `ln(x + 1)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Call {
    /// The name of the function to call.
    pub name: LitSym,

    /// The argument to the function.
    pub arg: Box<Expr>,

    /// The region of the source code that this function call was parsed from.
    pub span: Range<usize>,

    /// The span of the parentheses that surround the argument.
    pub paren_span: Range<usize>,
}

impl Call {
    /// Returns the span of the function call.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl Parse for Call {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let name = input.try_parse::<LitSym>()?;
        let open = input.try_parse_with_fn(Parenthesis::open)?;
        let (arg, close) = parse_inner(input, &open)?;

        // use `name` here before it is moved into the struct
        let span = name.span.start..close.span.end;
        Ok(Self {
            name,
            arg: Box::new(arg),
            span,
            paren_span: open.span.start..close.span.end,
        })
    }
}
