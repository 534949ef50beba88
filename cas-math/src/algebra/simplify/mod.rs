//! Module to simplify expressions.
//!
//! This module provides the [`simplify`] function, which reduces an expression to a canonical
//! form. A single pass walks the tree bottom-up, applying the rules in [`rules`] to each node after
//! its operands have been simplified:
//!
//! - numbers are folded (`2*3 = 6`), but named constants such as `pi` are kept symbolic;
//! - additive and multiplicative identities are removed (`a+0 = a`, `a*1 = a`, `a*0 = 0`,
//!   `a^0 = 1`, `a^1 = a`);
//! - products are expanded over sums (`a*(b+c) = a*b + a*c`);
//! - like terms and like factors are combined (`2a+3a = 5a`, `a*a^2 = a^3`), using the
//!   [`ProductParts`](product::ProductParts) decomposition of each term.
//!
//! A single pass is not guaranteed to reach a fixpoint for every tree, so [`Simplifier::simplify`]
//! repeats passes until the tree stops changing, up to [`SimplifyOptions::max_passes`].

pub mod product;
pub mod rules;
pub mod step;

use crate::{algebra::expr::Expr, step::StepCollector};
use log::debug;
use step::Step;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Options that control the [`Simplifier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimplifyOptions {
    /// The maximum number of bottom-up passes to apply while looking for a fixpoint. At least one
    /// pass is always applied.
    pub max_passes: usize,
}

impl Default for SimplifyOptions {
    fn default() -> Self {
        Self { max_passes: 16 }
    }
}

/// Simplifies expressions according to a set of [`SimplifyOptions`].
#[derive(Debug, Clone, Default)]
pub struct Simplifier {
    options: SimplifyOptions,
}

impl Simplifier {
    /// Creates a simplifier with the given options.
    pub fn new(options: SimplifyOptions) -> Self {
        Self { options }
    }

    /// Returns the options of this simplifier.
    pub fn options(&self) -> &SimplifyOptions {
        &self.options
    }

    /// Applies a single bottom-up simplification pass to the expression.
    pub fn simplify_once(
        &self,
        expr: &Expr,
        step_collector: &mut dyn StepCollector<Step>,
    ) -> Expr {
        rules::all(expr, step_collector)
    }

    /// Simplifies the expression, repeating passes until the tree stops changing or the maximum
    /// number of passes is reached.
    ///
    /// Each pass recurses once per level of the tree, so very deeply nested expressions need a
    /// correspondingly deep stack.
    pub fn simplify(
        &self,
        expr: &Expr,
        step_collector: &mut dyn StepCollector<Step>,
    ) -> Expr {
        let max_passes = self.options.max_passes.max(1);
        let mut current = self.simplify_once(expr, step_collector);

        for pass in 1..max_passes {
            let next = self.simplify_once(&current, step_collector);
            if next == current {
                debug!("`{}` simplified to `{}` in {} pass(es)", expr, current, pass);
                return current;
            }
            current = next;
        }

        debug!("stopped simplifying `{}` after {} passes at `{}`", expr, max_passes, current);
        current
    }
}

/// Simplify the given expression with the default options.
pub fn simplify(expr: &Expr) -> Expr {
    Simplifier::default().simplify(expr, &mut ())
}

/// Simplify the given expression with the default options. The steps taken by the simplifier
/// will also be collected and returned, in the order they were applied.
pub fn simplify_with_steps(expr: &Expr) -> (Expr, Vec<Step>) {
    let mut steps = Vec::new();
    let expr = Simplifier::default().simplify(expr, &mut steps);
    (expr, steps)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn simplified(input: &str) -> Expr {
        simplify(&Expr::parse(input).unwrap())
    }

    #[test]
    fn add_rules() {
        // also tests multiply_zero
        assert_eq!(simplified("0+0*(3x+5b^2)+0+(3a)"), Expr::mul(Expr::num(3.0), Expr::var("a")));
    }

    #[test]
    fn multiply_rules() {
        assert_eq!(simplified("0*(3x+5b^2)*1*(3a)"), Expr::num(0.0));
    }

    #[test]
    fn multiply_rules_2() {
        // also tests add_zero
        assert_eq!(simplified("1*3*1*1*1*(1+(x^2+5x+6)*0)*1*1"), Expr::num(3.0));
    }

    #[test]
    fn combine_like_factors() {
        let expr = simplified("a * b * a^3 * c^2 * d^2 * a^2 * b^4 * d^2");
        assert_eq!(expr.to_string(), "a^6 * b^5 * c^2 * d^4");
    }

    #[test]
    fn expand_and_collect() {
        assert_eq!(simplified("(x + 1)^2 * 1 + 2x - 2x").to_string(), "(x + 1)^2");
        assert_eq!(simplified("x * (x + 1) - x^2").to_string(), "x");
    }

    #[test]
    fn function_arguments_are_simplified() {
        assert_eq!(simplified("sin(x + x) * cos(0 * y)").to_string(), "sin(2 * x) * cos(0)");
    }

    #[test]
    fn steps_are_collected() {
        let (expr, steps) = simplify_with_steps(&Expr::parse("2x + 3x").unwrap());
        assert_eq!(expr, Expr::mul(Expr::num(5.0), Expr::var("x")));
        assert_eq!(steps, vec![Step::CombineLikeTerms]);
    }

    #[test]
    fn single_pass_limit() {
        let simplifier = Simplifier::new(SimplifyOptions { max_passes: 1 });
        let expr = Expr::parse("x + 0").unwrap();
        assert_eq!(simplifier.simplify(&expr, &mut ()), Expr::var("x"));
        assert_eq!(simplifier.options().max_passes, 1);
    }

    #[test]
    fn idempotent() {
        for input in [
            "(x + 1)(x - 1)",
            "2x + 3y - x + y^2 * y",
            "x^2 * sin(x)^2 + 2e^x",
            "(2x)^3 / x",
            "ln(x) * (x + pi) + 1/x",
        ] {
            let once = simplified(input);
            assert_eq!(simplify(&once), once, "simplifying `{}` twice changed it", input);
        }
    }

    #[test]
    fn idempotent_with_nan() {
        let once = simplified("(-2)^0.5 + x");
        assert!(once.to_string().contains("NaN"));
        assert_eq!(simplify(&once), once);

        // the fixpoint is found well before the pass limit
        let few_passes = Simplifier::new(SimplifyOptions { max_passes: 3 });
        assert_eq!(few_passes.simplify(&once, &mut ()), once);
    }
}
