use std::ops::Range;
use super::{
    expr::{Expr, Primary},
    error::Error,
    token::op::BinOp,
    unary::Unary,
    Associativity,
    Parser,
    Precedence,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A binary expression, such as `1 + 2`. Binary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Binary {
    pub lhs: Box<Expr>,
    pub op: BinOp,
    pub rhs: Box<Expr>,

    /// The region of the source code that this binary expression was parsed from.
    pub span: Range<usize>,
}

/// Returns true if the next tokens form an operand that is juxtaposed with the previous one, as
/// in `2x` or `3(x + 1)`.
fn implicit_operand_follows(input: &Parser) -> bool {
    input.peek().is_some_and(|token| token.kind.starts_operand())
        && input.clone().try_parse::<Primary>().is_ok()
}

impl Binary {
    /// Returns the span of the binary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Builds `lhs op rhs`, first extending `rhs` over any following operators that bind tighter
    /// than `op`. For example, in `3 + 4 * 5`, the right-hand side of `+` is `4 * 5`.
    fn complete_rhs(
        input: &mut Parser,
        lhs: Expr,
        op: BinOp,
        mut rhs: Expr,
    ) -> Result<Expr, Error> {
        let precedence = op.precedence();

        loop {
            match input.clone().try_parse::<BinOp>() {
                Ok(next_op) => {
                    let binds_tighter = next_op.precedence() > precedence
                        || (next_op.precedence() == precedence
                            && next_op.associativity() == Associativity::Right);
                    if !binds_tighter {
                        break;
                    }
                    rhs = Self::parse_expr(input, rhs, next_op.precedence())?;
                },
                // implicit multiplication binds as tightly as `*`, so it only extends the
                // right-hand side of `+` and `-`
                Err(_) if precedence < Precedence::Factor && implicit_operand_follows(input) => {
                    rhs = Self::parse_expr(input, rhs, Precedence::Factor)?;
                },
                Err(_) => break,
            }
        }

        let span = lhs.span().start..rhs.span().end;
        Ok(Expr::Binary(Binary {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
            span,
        }))
    }

    /// Parses binary operators and their right-hand sides for as long as the operators have at
    /// least the given precedence, using `lhs` as the initial left-hand side.
    pub fn parse_expr(
        input: &mut Parser,
        mut lhs: Expr,
        precedence: Precedence,
    ) -> Result<Expr, Error> {
        loop {
            let mut input_ahead = input.clone();
            match input_ahead.try_parse::<BinOp>() {
                Ok(op) if op.precedence() >= precedence => {
                    input.set_cursor(&input_ahead);
                    let rhs = Unary::parse_or_lower(input)?;
                    lhs = Self::complete_rhs(input, lhs, op, rhs)?;
                },
                Ok(_) => break,
                Err(_) if Precedence::Factor >= precedence => {
                    let rhs = match input.try_parse::<Primary>() {
                        Ok(primary) => Expr::from(primary),
                        Err(err) if err.fatal => return Err(err),
                        Err(_) => break,
                    };
                    let op = BinOp::implicit_mul(lhs.span().end..rhs.span().start);
                    lhs = Self::complete_rhs(input, lhs, op, rhs)?;
                },
                Err(_) => break,
            }
        }

        Ok(lhs)
    }
}
