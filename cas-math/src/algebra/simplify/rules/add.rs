//! Simplification rules for sums, including combining like terms.

use crate::{
    algebra::{
        expr::Expr,
        simplify::{product::{fold_right, ProductParts}, rules::{all, flatten_sum}, step::Step},
    },
    step::StepCollector,
};
use log::trace;

/// Simplifies the sum `lhs + rhs`.
///
/// - `2+3 = 5`
/// - `0+a = a`, `a+0 = a`
/// - `2a+b+3a = 5a+b`
pub fn simplify_addition(
    lhs: &Expr,
    rhs: &Expr,
    step_collector: &mut dyn StepCollector<Step>,
) -> Expr {
    let lhs = all(lhs, step_collector);
    let rhs = all(rhs, step_collector);

    if let (Some(a), Some(b)) = (lhs.as_number(), rhs.as_number()) {
        trace!("fold constants: `{} + {}`", a, b);
        step_collector.push(Step::FoldConstants);
        return Expr::num(a + b);
    }

    if lhs.is_zero() {
        trace!("add zero: `0 + {}`", rhs);
        step_collector.push(Step::AddZero);
        return rhs;
    }

    if rhs.is_zero() {
        trace!("add zero: `{} + 0`", lhs);
        step_collector.push(Step::AddZero);
        return lhs;
    }

    combine_like_terms(&lhs, &rhs, step_collector)
}

/// `a+a = 2a`
/// `2a+b+3a = 5a+b`
///
/// Flattens the (already simplified) sum into its summands, groups the summands by their variable
/// powers, and adds the coefficients within each group. Summands that cannot be decomposed into
/// [`ProductParts`] are kept as is, after the groups, in the order they were found.
///
/// This also runs on plain two-term sums, so that `2x + 3x` becomes `5x`.
fn combine_like_terms(
    lhs: &Expr,
    rhs: &Expr,
    step_collector: &mut dyn StepCollector<Step>,
) -> Expr {
    let mut summands = Vec::new();
    flatten_sum(lhs, &mut summands);
    flatten_sum(rhs, &mut summands);

    let mut buckets: Vec<ProductParts> = Vec::new();
    let mut rest_terms = Vec::new();
    let mut combined = false;

    for summand in summands {
        match ProductParts::extract(summand) {
            Ok(parts) => {
                if let Some(bucket) = buckets.iter_mut().find(|bucket| bucket.is_like(&parts)) {
                    bucket.coefficient += parts.coefficient;
                    combined = true;
                } else {
                    buckets.push(parts);
                }
            },
            Err(err) => {
                trace!("keeping `{}` as is: {}", summand, err.reason);
                rest_terms.push(summand.clone());
            },
        }
    }

    let bucket_count = buckets.len();
    buckets.retain(|bucket| bucket.coefficient != 0.0);
    combined |= buckets.len() != bucket_count;

    let terms = buckets.into_iter()
        .map(ProductParts::into_expr)
        .chain(rest_terms)
        .collect::<Vec<_>>();
    let result = fold_right(terms, Expr::add).unwrap_or_else(|| Expr::num(0.0));

    if combined {
        trace!("combine like terms: `{} + {}` -> `{}`", lhs, rhs, result);
        step_collector.push(Step::CombineLikeTerms);
    }

    result
}
