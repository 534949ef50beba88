//! Symbolic derivatives of the functions in [`Func`].

use crate::algebra::expr::{Expr, Func};

/// `u^2`
fn square(arg: &Expr) -> Expr {
    Expr::pow(arg.clone(), Expr::num(2.0))
}

impl Func {
    /// Returns the derivative of the function with respect to its argument, evaluated at `arg`.
    ///
    /// This is the outer factor of the chain rule: `d/dx f(u) = f'(u) * u'`.
    pub fn self_derivative(&self, arg: &Expr) -> Expr {
        match self {
            // sin'(u) = cos(u)
            Self::Sin => Expr::call(Func::Cos, arg.clone()),
            // cos'(u) = -sin(u)
            Self::Cos => Expr::mul(Expr::num(-1.0), Expr::call(Func::Sin, arg.clone())),
            // tan'(u) = 1 + tan(u)^2
            Self::Tan => Expr::add(Expr::num(1.0), square(&Expr::call(Func::Tan, arg.clone()))),
            // arcsin'(u) = (1 - u^2)^-0.5
            Self::Arcsin => Expr::pow(
                Expr::add(Expr::num(1.0), Expr::mul(Expr::num(-1.0), square(arg))),
                Expr::num(-0.5),
            ),
            // arccos'(u) = -arcsin'(u)
            Self::Arccos => Expr::mul(Expr::num(-1.0), Func::Arcsin.self_derivative(arg)),
            // arctan'(u) = (1 + u^2)^-1
            Self::Arctan => Expr::pow(Expr::add(Expr::num(1.0), square(arg)), Expr::num(-1.0)),
            Self::Sinh => Expr::call(Func::Cosh, arg.clone()),
            Self::Cosh => Expr::call(Func::Sinh, arg.clone()),
            // asinh'(u) = (u^2 + 1)^-0.5
            Self::Arsinh => Expr::pow(Expr::add(square(arg), Expr::num(1.0)), Expr::num(-0.5)),
            // acosh'(u) = (u^2 - 1)^-0.5
            Self::Arcosh => Expr::pow(Expr::add(square(arg), Expr::num(-1.0)), Expr::num(-0.5)),
            // ln'(u) = u^-1
            Self::Ln => Expr::pow(arg.clone(), Expr::num(-1.0)),
        }
    }
}
