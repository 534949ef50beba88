//! Simplification rules for powers.

use crate::{
    algebra::{expr::Expr, simplify::{rules::all, step::Step}},
    step::StepCollector,
};
use log::trace;

/// Simplifies the power `base ^ exp`.
///
/// - `2^3 = 8`; a negative base with a fractional exponent folds to `NaN`
/// - `a^0 = 1`
/// - `a^1 = a`
///
/// Powers of products and powers of powers are left alone here; they are combined when the power
/// appears as a factor of a product.
pub fn simplify_exponentiation(
    base: &Expr,
    exp: &Expr,
    step_collector: &mut dyn StepCollector<Step>,
) -> Expr {
    let base = all(base, step_collector);
    let exp = all(exp, step_collector);

    if let (Some(a), Some(b)) = (base.as_number(), exp.as_number()) {
        trace!("fold constants: `{}^{}`", a, b);
        step_collector.push(Step::FoldConstants);
        return Expr::num(a.powf(b));
    }

    if exp.is_zero() {
        trace!("power zero: `{}^0`", base);
        step_collector.push(Step::PowerZero);
        return Expr::num(1.0);
    }

    if exp.is_one() {
        trace!("power one: `{}^1`", base);
        step_collector.push(Step::PowerOne);
        return base;
    }

    Expr::pow(base, exp)
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use pretty_assertions::assert_eq;
    use super::*;

    fn simplify_power(input: &str) -> Expr {
        all(&Expr::parse(input).unwrap(), &mut ())
    }

    #[test]
    fn fold() {
        assert_eq!(simplify_power("2^10"), Expr::num(1024.0));
        assert_float_absolute_eq!(simplify_power("4^0.5").as_number().unwrap(), 2.0);
        assert!(simplify_power("(-8)^0.5").as_number().unwrap().is_nan());
    }

    #[test]
    fn identities() {
        assert_eq!(simplify_power("sin(x)^0"), Expr::num(1.0));
        assert_eq!(simplify_power("(x + y)^(3 - 2)").to_string(), "x + y");
        assert_eq!(simplify_power("x^(1 + y - y)"), Expr::var("x"));
    }

    #[test]
    fn symbolic_power_is_kept() {
        assert_eq!(simplify_power("e^(2x)").to_string(), "e^(2 * x)");
        assert_eq!(simplify_power("(x^2)^3").to_string(), "(x^2)^3");
    }
}
