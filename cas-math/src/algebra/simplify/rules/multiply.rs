//! Simplification rules for products, including combining like factors.

use crate::{
    algebra::{
        expr::Expr,
        simplify::{product::ProductParts, rules::{all, distribute}, step::Step},
    },
    step::StepCollector,
};
use log::trace;

/// Simplifies the product `lhs * rhs`.
///
/// - `2*3 = 6`
/// - `0*a = 0`, `a*0 = 0`
/// - `1*a = a`, `a*1 = a`
/// - `a*(b+c) = a*b + a*c`
/// - `2a*3a^2 = 6a^3`
pub fn simplify_multiplication(
    lhs: &Expr,
    rhs: &Expr,
    step_collector: &mut dyn StepCollector<Step>,
) -> Expr {
    let lhs = all(lhs, step_collector);
    let rhs = all(rhs, step_collector);

    if let (Some(a), Some(b)) = (lhs.as_number(), rhs.as_number()) {
        trace!("fold constants: `{} * {}`", a, b);
        step_collector.push(Step::FoldConstants);
        return Expr::num(a * b);
    }

    if lhs.is_zero() || rhs.is_zero() {
        trace!("multiply zero: `{} * {}`", lhs, rhs);
        step_collector.push(Step::MultiplyZero);
        return Expr::num(0.0);
    }

    if lhs.is_one() {
        trace!("multiply one: `1 * {}`", rhs);
        step_collector.push(Step::MultiplyOne);
        return rhs;
    }

    if rhs.is_one() {
        trace!("multiply one: `{} * 1`", lhs);
        step_collector.push(Step::MultiplyOne);
        return lhs;
    }

    if matches!(lhs, Expr::Add(..)) || matches!(rhs, Expr::Add(..)) {
        return distribute::distribute(&lhs, &rhs, step_collector);
    }

    combine_like_factors(lhs, rhs, step_collector)
}

/// `a*a = a^2`
/// `2a*3a^2 = 6a^3`
///
/// Decomposes both (already simplified) factors into [`ProductParts`] and multiplies them. If
/// either factor cannot be decomposed, the product is returned with its factors uncombined.
fn combine_like_factors(
    lhs: Expr,
    rhs: Expr,
    step_collector: &mut dyn StepCollector<Step>,
) -> Expr {
    let parts = ProductParts::extract(&lhs)
        .and_then(|lhs_parts| Ok(lhs_parts.multiply(ProductParts::extract(&rhs)?)));

    let original = Expr::mul(lhs, rhs);
    match parts {
        Ok(parts) => {
            let result = parts.into_expr();
            if result != original {
                trace!("combine like factors: `{}` -> `{}`", original, result);
                step_collector.push(Step::CombineLikeFactors);
            }
            result
        },
        Err(err) => {
            trace!("keeping `{}` uncombined: {}", original, err.reason);
            original
        },
    }
}
