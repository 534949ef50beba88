//! Conversion from the AST produced by [`cas_parser`] into an [`Expr`].

use cas_error::Error;
use cas_parser::parser::{
    binary::Binary,
    call::Call,
    expr::Expr as AstExpr,
    literal::Literal,
    token::op::{BinOpKind, UnaryOpKind},
};
use crate::algebra::error::UndefinedFunction;
use levenshtein::levenshtein;
use super::{Expr, Func, NamedConst};

/// Names that are accepted in calls but are rewritten into powers instead of becoming a [`Func`].
const SUGAR_FUNCS: [&str; 2] = ["exp", "sqrt"];

/// Returns every callable name with a name similar to the given name.
fn similar_funcs(name: &str) -> Vec<&'static str> {
    Func::ALL
        .iter()
        .map(Func::name)
        .chain(SUGAR_FUNCS)
        .filter(|candidate| levenshtein(candidate, name) < 2)
        .collect()
}

/// Returns `-expr`, folding the sign into the number if `expr` is a number.
fn negate(expr: Expr) -> Expr {
    match expr.as_number() {
        Some(num) => Expr::num(-num),
        None => -expr,
    }
}

impl TryFrom<Call> for Expr {
    type Error = Error;

    fn try_from(call: Call) -> Result<Self, Self::Error> {
        let arg = Expr::try_from(*call.arg)?;
        match call.name.name.as_str() {
            // exp(u) = e^u
            "exp" => Ok(Expr::pow(Expr::named(NamedConst::E), arg)),
            // sqrt(u) = u^0.5
            "sqrt" => Ok(Expr::pow(arg, Expr::num(0.5))),
            name => match Func::from_name(name) {
                Some(func) => Ok(Expr::call(func, arg)),
                None => Err(Error::new(vec![call.name.span.clone()], UndefinedFunction {
                    name: name.to_string(),
                    suggestions: similar_funcs(name),
                })),
            },
        }
    }
}

impl TryFrom<Binary> for Expr {
    type Error = Error;

    fn try_from(bin: Binary) -> Result<Self, Self::Error> {
        let lhs = Expr::try_from(*bin.lhs)?;
        let rhs = Expr::try_from(*bin.rhs)?;
        Ok(match bin.op.kind {
            BinOpKind::Exp => Expr::pow(lhs, rhs),
            BinOpKind::Mul => Expr::mul(lhs, rhs),
            // treat this as lhs*rhs^-1
            BinOpKind::Div => Expr::mul(lhs, Expr::pow(rhs, Expr::num(-1.0))),
            BinOpKind::Add => Expr::add(lhs, rhs),
            // treat this as lhs + -1 * rhs
            BinOpKind::Sub => Expr::add(lhs, negate(rhs)),
        })
    }
}

impl TryFrom<AstExpr> for Expr {
    type Error = Error;

    fn try_from(expr: AstExpr) -> Result<Self, Self::Error> {
        match expr {
            AstExpr::Literal(Literal::Number(num)) => Ok(Expr::num(num.value)),
            AstExpr::Literal(Literal::Symbol(sym)) => Ok(match NamedConst::from_symbol(&sym.name) {
                Some(named) => Expr::named(named),
                None => Expr::var(sym.name),
            }),
            AstExpr::Paren(paren) => Expr::try_from(*paren.expr),
            AstExpr::Call(call) => Expr::try_from(call),
            AstExpr::Unary(unary) => match unary.op.kind {
                UnaryOpKind::Neg => Ok(negate(Expr::try_from(*unary.operand)?)),
            },
            AstExpr::Binary(bin) => Expr::try_from(bin),
        }
    }
}

impl Expr {
    /// Parses the given text and converts it into an expression.
    ///
    /// Parse errors and unknown functions are returned as an [`Error`] pointing into `input`.
    pub fn parse(input: &str) -> Result<Self, Error> {
        let ast = cas_parser::parser::parse_expr(input)?;
        Expr::try_from(ast)
    }
}
