//! Decomposition of products into a coefficient and variable powers.

use crate::algebra::{
    error::ProductExtraction,
    expr::{Expr, Primary, Variable},
};
use std::collections::BTreeMap;

/// A product written as `coefficient * x^a * y^b * ...`, where the coefficient and every exponent
/// is a number.
///
/// Two products are *like terms* if they have the same variables with the same exponents; their
/// coefficients may differ. Variables are kept sorted by name, so rebuilding the product always
/// lists its factors in the same order.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductParts {
    /// The numeric coefficient of the product.
    pub coefficient: f64,

    /// The exponent of each variable in the product.
    pub variables: BTreeMap<Variable, f64>,
}

impl ProductParts {
    /// Creates a product consisting of only a coefficient.
    pub fn constant(coefficient: f64) -> Self {
        Self { coefficient, variables: BTreeMap::new() }
    }

    /// Creates the product `1 * var^1`.
    pub fn variable(var: Variable) -> Self {
        let mut variables = BTreeMap::new();
        variables.insert(var, 1.0);
        Self { coefficient: 1.0, variables }
    }

    /// Decomposes an expression into its product parts.
    ///
    /// Numbers contribute to the coefficient, variables contribute an exponent of 1, and nested
    /// products and powers with a numeric exponent are merged recursively. Anything else cannot be
    /// decomposed: sums, powers with a non-numeric exponent, named constants, and function calls.
    pub fn extract(expr: &Expr) -> Result<Self, ProductExtraction> {
        match expr {
            Expr::Primary(Primary::Number(num)) => Ok(Self::constant(*num)),
            Expr::Primary(Primary::Named(_)) => Err(ProductExtraction {
                reason: "named constants are kept symbolic",
            }),
            Expr::Primary(Primary::Symbol(var)) => Ok(Self::variable(var.clone())),
            Expr::Mul(lhs, rhs) => Ok(Self::extract(lhs)?.multiply(Self::extract(rhs)?)),
            Expr::Exp(base, exp) => match exp.as_number() {
                Some(exp) => Ok(Self::extract(base)?.power(exp)),
                None => Err(ProductExtraction { reason: "the exponent is not a number" }),
            },
            Expr::Add(..) => Err(ProductExtraction { reason: "the term contains a sum" }),
            Expr::Call(..) => Err(ProductExtraction { reason: "function calls are kept symbolic" }),
        }
    }

    /// Multiplies two products together. Coefficients are multiplied, and the exponents of like
    /// variables are added.
    pub fn multiply(mut self, other: Self) -> Self {
        self.coefficient *= other.coefficient;
        for (var, exp) in other.variables {
            *self.variables.entry(var).or_insert(0.0) += exp;
        }
        self
    }

    /// Raises the product to the given power. The coefficient is raised to the power, and every
    /// exponent is multiplied by it.
    pub fn power(mut self, exp: f64) -> Self {
        self.coefficient = self.coefficient.powf(exp);
        for var_exp in self.variables.values_mut() {
            *var_exp *= exp;
        }
        self
    }

    /// Returns true if both products have the same variables with the same exponents.
    ///
    /// Variables with an exponent of zero are ignored.
    pub fn is_like(&self, other: &Self) -> bool {
        let lhs = self.variables.iter().filter(|(_, exp)| **exp != 0.0);
        let rhs = other.variables.iter().filter(|(_, exp)| **exp != 0.0);
        lhs.eq(rhs)
    }

    /// Returns true if the product has no variables with a nonzero exponent.
    pub fn is_constant(&self) -> bool {
        self.variables.values().all(|exp| *exp == 0.0)
    }

    /// Rebuilds the product as a right-associated chain `coefficient * (x^a * (y^b * ...))`.
    ///
    /// An exponent of 1 is written as the bare variable, variables with an exponent of 0 are
    /// dropped, and a coefficient of 1 is omitted unless nothing else remains.
    pub fn into_expr(self) -> Expr {
        if self.coefficient == 0.0 {
            return Expr::num(0.0);
        }

        let mut factors = self.variables
            .into_iter()
            .filter(|(_, exp)| *exp != 0.0)
            .map(|(var, exp)| {
                if exp == 1.0 {
                    Expr::from(var)
                } else {
                    Expr::pow(Expr::from(var), Expr::num(exp))
                }
            })
            .collect::<Vec<_>>();

        if self.coefficient != 1.0 || factors.is_empty() {
            factors.insert(0, Expr::num(self.coefficient));
        }

        fold_right(factors, Expr::mul).unwrap_or_else(|| Expr::num(1.0))
    }
}

/// Combines the expressions into a right-associated chain with the given constructor, such that
/// `[a, b, c]` becomes `f(a, f(b, c))`. Returns [`None`] if there are no expressions.
pub(crate) fn fold_right(exprs: Vec<Expr>, f: fn(Expr, Expr) -> Expr) -> Option<Expr> {
    exprs.into_iter().rev().reduce(|acc, expr| f(expr, acc))
}
