//! Implementation of the simplification rules.
//!
//! Each node is simplified bottom-up: its operands are simplified first, then the rules for the
//! kind of node are applied to the simplified operands. Sums, products, and powers each have their
//! own module; function calls only simplify their argument, and leaves are returned as is.

pub mod add;
pub mod distribute;
pub mod multiply;
pub mod power;

use crate::{algebra::expr::Expr, step::StepCollector};
use super::step::Step;

/// Simplifies the expression with a single bottom-up pass over the tree.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Expr {
    match expr {
        Expr::Primary(_) => expr.clone(),
        Expr::Add(lhs, rhs) => add::simplify_addition(lhs, rhs, step_collector),
        Expr::Mul(lhs, rhs) => multiply::simplify_multiplication(lhs, rhs, step_collector),
        Expr::Exp(base, exp) => power::simplify_exponentiation(base, exp, step_collector),
        Expr::Call(func, arg) => Expr::call(*func, all(arg, step_collector)),
    }
}

/// Appends the summands of the expression to `terms`, descending through nested sums from left to
/// right. An expression that is not a sum is a single summand.
pub(crate) fn flatten_sum<'a>(expr: &'a Expr, terms: &mut Vec<&'a Expr>) {
    match expr {
        Expr::Add(lhs, rhs) => {
            flatten_sum(lhs, terms);
            flatten_sum(rhs, terms);
        },
        _ => terms.push(expr),
    }
}
