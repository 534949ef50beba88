//! The distributive property.

use crate::{
    algebra::{
        expr::Expr,
        simplify::{product::fold_right, rules::{all, flatten_sum}, step::Step},
    },
    step::StepCollector,
};
use log::trace;

/// `a*(b+c) = a*b + a*c`
/// `(a+b)*(c+d) = a*c + a*d + b*c + b*d`
///
/// Expands the product of two (already simplified) factors, at least one of which is a sum. Every
/// pairwise product of a left summand and a right summand is simplified on its own, then the
/// resulting sum is simplified to collect like terms.
pub fn distribute(
    lhs: &Expr,
    rhs: &Expr,
    step_collector: &mut dyn StepCollector<Step>,
) -> Expr {
    let mut lhs_terms = Vec::new();
    let mut rhs_terms = Vec::new();
    flatten_sum(lhs, &mut lhs_terms);
    flatten_sum(rhs, &mut rhs_terms);

    let mut products = Vec::with_capacity(lhs_terms.len() * rhs_terms.len());
    for lhs_term in &lhs_terms {
        for rhs_term in &rhs_terms {
            let product = Expr::mul((*lhs_term).clone(), (*rhs_term).clone());
            products.push(all(&product, step_collector));
        }
    }

    trace!("distribute: `({}) * ({})`", lhs, rhs);
    step_collector.push(Step::DistributiveProperty);

    let sum = fold_right(products, Expr::add).unwrap_or_else(|| Expr::num(0.0));
    all(&sum, step_collector)
}
