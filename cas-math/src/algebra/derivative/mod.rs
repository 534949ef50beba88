//! Symbolic differentiation of expressions.
//!
//! The derivative is built by applying the usual rules of calculus recursively. No simplification
//! is done, so the result usually contains many trivial terms such as `0 * x` and `x * 1`. Pass it
//! through [`simplify`](crate::algebra::simplify) to clean it up:
//!
//! ```
//! use cas_math::algebra::{expr::{Expr, Variable}, simplify::simplify};
//!
//! let expr = Expr::parse("x * x").unwrap();
//! let derivative = expr.differentiate(&Variable::new("x"));
//! assert_eq!(simplify(&derivative).to_string(), "2 * x");
//! ```

mod function;

use crate::algebra::expr::{Expr, Func, NamedConst, Primary, Variable};
use log::trace;

/// `(f + g)' = f' + g'`
fn sum_rule(lhs: &Expr, rhs: &Expr, var: &Variable) -> Expr {
    Expr::add(derivative(lhs, var), derivative(rhs, var))
}

/// `(f * g)' = f' * g + f * g'`
fn product_rule(lhs: &Expr, rhs: &Expr, var: &Variable) -> Expr {
    Expr::add(
        Expr::mul(derivative(lhs, var), rhs.clone()),
        Expr::mul(lhs.clone(), derivative(rhs, var)),
    )
}

/// `(f^g)' = g * f^(g - 1) * f'`, where `g` does not depend on the variable.
fn power_rule(base: &Expr, exp: &Expr, var: &Variable) -> Expr {
    let exp_minus_one = match exp.as_number() {
        Some(num) => Expr::num(num - 1.0),
        None => Expr::add(exp.clone(), Expr::num(-1.0)),
    };

    Expr::mul(
        Expr::mul(exp.clone(), Expr::pow(base.clone(), exp_minus_one)),
        derivative(base, var),
    )
}

/// `(f^g)' = f^g * ln(f) * g'`, where `f` does not depend on the variable.
///
/// `(e^g)' = e^g * g'`
fn exponential_rule(base: &Expr, exp: &Expr, var: &Variable) -> Expr {
    let power = Expr::pow(base.clone(), exp.clone());
    if matches!(base, Expr::Primary(Primary::Named(NamedConst::E))) {
        return Expr::mul(power, derivative(exp, var));
    }

    Expr::mul(
        Expr::mul(power, Expr::call(Func::Ln, base.clone())),
        derivative(exp, var),
    )
}

/// `(f^g)' = f^g * (g' * ln(f) + g * f' * f^-1)`
fn general_power_rule(base: &Expr, exp: &Expr, var: &Variable) -> Expr {
    Expr::mul(
        Expr::pow(base.clone(), exp.clone()),
        Expr::add(
            Expr::mul(derivative(exp, var), Expr::call(Func::Ln, base.clone())),
            Expr::mul(
                exp.clone(),
                Expr::mul(derivative(base, var), Expr::pow(base.clone(), Expr::num(-1.0))),
            ),
        ),
    )
}

/// Computes the derivative of the given expression with respect to the given variable.
///
/// Variables are compared by name, so differentiating with respect to `x` or its differential
/// marker `dx` gives the same result.
///
/// Recurses once per level of the expression.
pub fn derivative(f: &Expr, var: &Variable) -> Expr {
    match f {
        Expr::Primary(Primary::Number(_) | Primary::Named(_)) => Expr::num(0.0),
        Expr::Primary(Primary::Symbol(sym)) => {
            if sym.same_name(var) {
                Expr::num(1.0)
            } else {
                Expr::num(0.0)
            }
        },
        Expr::Add(lhs, rhs) => sum_rule(lhs, rhs, var),
        Expr::Mul(lhs, rhs) => product_rule(lhs, rhs, var),
        Expr::Exp(base, exp) => match (base.depends_on(var), exp.depends_on(var)) {
            (_, false) => power_rule(base, exp, var),
            (false, true) => exponential_rule(base, exp, var),
            (true, true) => {
                trace!("using the general power rule for `{}`", f);
                general_power_rule(base, exp, var)
            },
        },
        // chain rule
        Expr::Call(func, arg) => Expr::mul(func.self_derivative(arg), derivative(arg, var)),
    }
}

impl Expr {
    /// Computes the derivative of this expression with respect to the given variable.
    ///
    /// See [`derivative`] for details.
    pub fn differentiate(&self, var: &Variable) -> Expr {
        derivative(self, var)
    }
}

#[cfg(test)]
mod tests {
    use crate::algebra::simplify::simplify;
    use pretty_assertions::assert_eq;
    use super::*;

    /// Evaluates the expression with `x` set to the given value.
    fn eval_x(e: &Expr, x: f64) -> f64 {
        let mut e = e.clone();
        e.set_variable(&Variable::new("x"), &Expr::num(x));
        e.value().unwrap()
    }

    /// Approximates the derivative of the expression at the given point with a central difference.
    fn finite_difference(e: &Expr, x: f64) -> f64 {
        const DX: f64 = 0.00001;
        (eval_x(e, x + DX) - eval_x(e, x - DX)) / (2.0 * DX)
    }

    fn test_for_function(function: &'static str, points: impl IntoIterator<Item = f64>) {
        const TOL: f64 = 0.0001;

        let expr = Expr::parse(function).unwrap();
        let symbolic = expr.differentiate(&Variable::new("x"));
        let simplified = simplify(&symbolic);

        for point in points.into_iter() {
            let numerically_computed = finite_difference(&expr, point);
            for computed in [eval_x(&symbolic, point), eval_x(&simplified, point)] {
                assert!(
                    (computed - numerically_computed).abs() < TOL,
                    "For \"{function}\" at x={point}, symbolically computed derivative was {computed} but numerically computed derivative was {numerically_computed}, which was out of tolerance {TOL}",
                );
            }
        }
    }

    #[test]
    fn power_rule() {
        test_for_function("x^2 + x + 1", [0., 1., 2., 5., 8.]);
        test_for_function("1/x", [1., -2., 0.5]);
        test_for_function("sqrt(x)", [1., 4., 9.]);
        test_for_function("(3x + 1)^4", [-1., 0., 0.5]);
    }

    #[test]
    fn product_rule() {
        test_for_function("x * sin(x)", [0., 1., 2.5]);
        test_for_function("x^2 * ln(x) * 3", [0.5, 1., 4.]);
    }

    #[test]
    fn exponential_rule() {
        test_for_function("2^x", [0., 1., 3.]);
        test_for_function("exp(2x)", [0., 1.]);
        test_for_function("e^(x^2)", [0., 0.5, 1.]);
    }

    #[test]
    fn general_power_rule() {
        test_for_function("x^x", [0.5, 1., 2.]);
        test_for_function("x^sin(x)", [0.5, 2.]);
    }

    #[test]
    fn trigonometric() {
        test_for_function("sin(x)", [0., 1., 2.]);
        test_for_function("cos(2x)", [0., 1., 2.]);
        test_for_function("tan(x)", [0., 0.5, 1.]);
        test_for_function("arcsin(x)", [-0.5, 0., 0.5]);
        test_for_function("arccos(x)", [-0.5, 0., 0.5]);
        test_for_function("arctan(x^2)", [-2., 0., 3.]);
    }

    #[test]
    fn hyperbolic_and_log() {
        test_for_function("sinh(x)", [-1., 0., 2.]);
        test_for_function("cosh(x)", [-1., 0., 2.]);
        test_for_function("asinh(x)", [-1., 0., 2.]);
        test_for_function("acosh(x)", [1.5, 3.]);
        test_for_function("ln(x^2 + 1)", [-1., 0., 2.]);
    }

    #[test]
    fn square() {
        let expr = Expr::mul(Expr::var("x"), Expr::var("x"));
        let derivative = expr.differentiate(&Variable::new("x"));
        assert_eq!(simplify(&derivative), Expr::mul(Expr::num(2.0), Expr::var("x")));
    }

    #[test]
    fn cube() {
        let derivative = Expr::parse("x^3").unwrap().differentiate(&Variable::new("x"));
        assert_eq!(simplify(&derivative).to_string(), "3 * x^2");
    }

    #[test]
    fn symbolic_exponent() {
        let derivative = Expr::parse("x^y").unwrap().differentiate(&Variable::new("x"));
        assert_eq!(derivative.to_string(), "y * x^(y + -1) * 1");
    }

    #[test]
    fn other_variables_are_constant() {
        let derivative = Expr::parse("y^2 + sin(y)").unwrap().differentiate(&Variable::new("x"));
        assert_eq!(simplify(&derivative), Expr::num(0.0));
    }

    #[test]
    fn differential_marker() {
        let expr = Expr::parse("x^2").unwrap();
        assert_eq!(
            expr.differentiate(&Variable::new("x").differential()),
            expr.differentiate(&Variable::new("x")),
        );
    }

    #[test]
    fn no_simplification() {
        let derivative = Expr::parse("2x").unwrap().differentiate(&Variable::new("x"));
        assert_eq!(derivative.to_string(), "0 * x + 2 * 1");
    }
}
