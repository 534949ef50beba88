//! Structural pattern matching and rewriting of expressions.
//!
//! A pattern is an ordinary [`Expr`] whose variables act as wildcards. Matching a pattern against
//! an expression succeeds if the expression has the same shape as the pattern, where:
//!
//! - a variable in the pattern matches any subtree, and is *bound* to it;
//! - a number or named constant in the pattern matches any subtree with the same numeric value;
//! - a sum, product, or power in the pattern matches a node of the same kind whose operands match
//!   the pattern's operands. Sums and products are commutative, so the swapped pairing of operands
//!   is also tried;
//! - a function call in the pattern matches a call to the same function whose argument matches.
//!
//! A variable may appear more than once in a pattern, such as in `A + A`. The match only succeeds
//! if every occurrence is bound to structurally equal subtrees.
//!
//! The bindings of a successful match can then be used to rewrite the matched subtree with
//! [`substitute`]:
//!
//! ```
//! use cas_math::algebra::{expr::Expr, matcher::substitute};
//!
//! let expr = Expr::parse("ln(x * y)").unwrap();
//! let pattern = Expr::parse("ln(A * B)").unwrap();
//! let rule = Expr::parse("ln(A) + ln(B)").unwrap();
//! assert_eq!(substitute(&expr, &pattern, &rule).to_string(), "ln(x) + ln(y)");
//! ```

use crate::algebra::{
    error::PatternConsistency,
    expr::{Expr, Primary, Variable},
};
use log::{debug, trace};
use std::collections::BTreeMap;

/// The subtrees captured by the variables of a pattern.
///
/// Both the variables and the subtrees are owned copies, so the bindings are independent of the
/// pattern and the expression they were computed from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings(BTreeMap<Variable, Expr>);

impl Bindings {
    /// Creates an empty set of bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the subtree bound to the given pattern variable.
    pub fn get(&self, var: &Variable) -> Option<&Expr> {
        self.0.get(var)
    }

    /// Returns an iterator over the bindings, ordered by variable.
    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &Expr)> {
        self.0.iter()
    }

    /// Returns the number of bound variables.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no variable is bound.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Binds the variable to the given subtree.
    ///
    /// Binding a variable that is already bound to an equal subtree does nothing. Binding it to a
    /// different subtree fails with [`PatternConsistency`], and leaves the existing binding as is.
    pub fn bind(&mut self, var: Variable, expr: Expr) -> Result<(), PatternConsistency> {
        match self.0.get(&var) {
            Some(existing) if *existing != expr => Err(PatternConsistency { symbol: var.to_string() }),
            Some(_) => Ok(()),
            None => {
                self.0.insert(var, expr);
                Ok(())
            },
        }
    }

    /// Merges two sets of bindings.
    ///
    /// Fails with [`PatternConsistency`] if a variable is bound in both sets to different
    /// subtrees.
    pub fn merge(mut self, other: Bindings) -> Result<Bindings, PatternConsistency> {
        for (var, expr) in other.0 {
            self.bind(var, expr)?;
        }
        Ok(self)
    }

    /// Replaces every occurrence of a bound variable in the expression with a copy of its bound
    /// subtree.
    ///
    /// All bindings are applied at once: a subtree that was just substituted in is not visited
    /// again, even if it contains bound variables itself.
    pub fn apply(&self, expr: &mut Expr) {
        if let Some(bound) = expr.as_variable().and_then(|var| self.0.get(var)) {
            *expr = bound.clone();
            return;
        }

        let mut index = 0;
        while let Some(child) = expr.child_mut(index) {
            self.apply(child);
            index += 1;
        }
    }
}

/// A successful match of a pattern against an expression.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionMatch<'a> {
    /// The subtree of the expression that matched the pattern.
    pub node: &'a Expr,

    /// The operand indices leading from the root of the expression to [`ExpressionMatch::node`].
    /// See [`Expr::at_path`].
    pub path: Vec<usize>,

    /// The subtrees captured by the pattern's variables.
    pub bindings: Bindings,
}

/// Returns true if both expressions have a value, and the values are equal.
fn same_value(expr: &Expr, constant: &Expr) -> bool {
    matches!((expr.value(), constant.value()), (Ok(a), Ok(b)) if a == b)
}

/// Returns the operands of a sum, product, or power.
fn operands(expr: &Expr) -> Option<(&Expr, &Expr)> {
    match expr {
        Expr::Add(lhs, rhs) | Expr::Mul(lhs, rhs) | Expr::Exp(lhs, rhs) => Some((&**lhs, &**rhs)),
        _ => None,
    }
}

/// Returns true if the expression has the same shape as the pattern. No bindings are captured,
/// and repeated pattern variables are not checked for consistency.
///
/// Only numbers, named constants, variables, and the binary operators are considered; a function
/// call in the pattern never matches.
pub fn matches(expr: &Expr, pattern: &Expr) -> bool {
    match pattern {
        Expr::Primary(Primary::Symbol(_)) => true,
        Expr::Primary(_) => same_value(expr, pattern),
        Expr::Add(..) | Expr::Mul(..) | Expr::Exp(..) => {
            if expr.kind() != pattern.kind() {
                return false;
            }

            let (Some((lhs, rhs)), Some((pat_lhs, pat_rhs))) = (operands(expr), operands(pattern)) else {
                return false;
            };

            matches(lhs, pat_lhs) && matches(rhs, pat_rhs)
                || pattern.kind().is_commutative() && matches(rhs, pat_lhs) && matches(lhs, pat_rhs)
        },
        Expr::Call(..) => false,
    }
}

/// Matches the operands of a binary node against the operands of a binary pattern, in the given
/// order.
fn match_operands(lhs: &Expr, rhs: &Expr, pat_lhs: &Expr, pat_rhs: &Expr) -> Option<Bindings> {
    let lhs_bindings = match_node(lhs, pat_lhs)?;
    let rhs_bindings = match_node(rhs, pat_rhs)?;
    match lhs_bindings.merge(rhs_bindings) {
        Ok(bindings) => Some(bindings),
        Err(err) => {
            trace!("`{}` is bound inconsistently across `{}` and `{}`", err.symbol, lhs, rhs);
            None
        },
    }
}

/// Matches the expression itself against the pattern, without searching its subtrees.
fn match_node(expr: &Expr, pattern: &Expr) -> Option<Bindings> {
    match pattern {
        Expr::Primary(Primary::Symbol(var)) => {
            let mut bindings = Bindings::new();
            bindings.bind(var.clone(), expr.clone()).ok()?;
            Some(bindings)
        },
        Expr::Primary(_) => same_value(expr, pattern).then(Bindings::new),
        Expr::Add(..) | Expr::Mul(..) | Expr::Exp(..) => {
            if expr.kind() != pattern.kind() {
                return None;
            }

            let (lhs, rhs) = operands(expr)?;
            let (pat_lhs, pat_rhs) = operands(pattern)?;
            match_operands(lhs, rhs, pat_lhs, pat_rhs).or_else(|| {
                if pattern.kind().is_commutative() {
                    match_operands(rhs, lhs, pat_lhs, pat_rhs)
                } else {
                    None
                }
            })
        },
        Expr::Call(pat_func, pat_arg) => match expr {
            Expr::Call(func, arg) if func == pat_func => match_node(arg, pat_arg),
            _ => None,
        },
    }
}

/// Matches the expression against the pattern. If `recurse` is true and the expression is not of
/// the same kind as a binary or call pattern, its subtrees are searched in order instead.
///
/// Recurses once per level of the expression.
fn search<'a>(
    expr: &'a Expr,
    pattern: &Expr,
    recurse: bool,
    path: &mut Vec<usize>,
) -> Option<ExpressionMatch<'a>> {
    trace!("matching `{}` against `{}`", expr, pattern);
    if let Some(bindings) = match_node(expr, pattern) {
        return Some(ExpressionMatch { node: expr, path: path.clone(), bindings });
    }

    // a node of the pattern's own kind either matches or fails outright; leaf patterns never
    // search
    let descend = recurse
        && (pattern.kind().is_binary() || matches!(pattern, Expr::Call(..)))
        && expr.kind() != pattern.kind();
    if !descend {
        return None;
    }

    for (index, child) in expr.children().into_iter().enumerate() {
        path.push(index);
        if let Some(found) = search(child, pattern, true, path) {
            return Some(found);
        }
        path.pop();
    }

    None
}

/// Matches the expression against the pattern, capturing the subtrees bound to the pattern's
/// variables.
///
/// If `recurse` is false, only the expression itself is matched. If it is true, the pattern is a
/// sum, product, power, or call, and the expression is a node of a different kind, its subtrees
/// are searched depth-first, left to right, and the first match is returned. A node of the same
/// kind as the pattern is never searched past: if its operands do not match in either pairing,
/// there is no match.
///
/// Matching recurses once per level of the expression and the pattern, so the depth of the trees
/// bounds the stack depth.
pub fn match_expr<'a>(expr: &'a Expr, pattern: &Expr, recurse: bool) -> Option<ExpressionMatch<'a>> {
    search(expr, pattern, recurse, &mut Vec::new())
}

/// Rewrites the first subtree of the expression that matches the pattern.
///
/// The matched subtree is replaced with a copy of `substitution`. Then, every occurrence of a
/// bound pattern variable in the result is replaced with a copy of the subtree it was bound to. If
/// nothing matches, an unchanged copy of the expression is returned.
pub fn substitute(expr: &Expr, pattern: &Expr, substitution: &Expr) -> Expr {
    let mut result = expr.clone();
    let Some(found) = match_expr(expr, pattern, true) else {
        return result;
    };

    result.replace_at(&found.path, substitution.clone());
    found.bindings.apply(&mut result);
    debug!("rewrote `{}` in `{}` to get `{}`", found.node, expr, result);
    result
}

/// Repeatedly rewrites the expression with [`substitute`] until the pattern no longer matches, or
/// `limit` rewrites have been done.
pub fn substitute_all(expr: &Expr, pattern: &Expr, substitution: &Expr, limit: usize) -> Expr {
    let mut result = expr.clone();
    for _ in 0..limit {
        if match_expr(&result, pattern, true).is_none() {
            break;
        }
        result = substitute(&result, pattern, substitution);
    }
    result
}

#[cfg(test)]
mod tests {
    use crate::algebra::Func;
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse(input: &str) -> Expr {
        Expr::parse(input).unwrap()
    }

    fn var(name: &str) -> Variable {
        Variable::new(name)
    }

    #[test]
    fn commutative_matches() {
        let expr = Expr::add(Expr::num(2.0), Expr::var("x"));
        let pattern = Expr::add(Expr::var("A"), Expr::num(2.0));
        assert!(matches(&expr, &pattern));
    }

    #[test]
    fn power_is_not_commutative() {
        let expr = parse("2^x");
        assert!(!matches(&expr, &parse("A^2")));
        assert!(match_expr(&expr, &parse("A^2"), false).is_none());
        assert!(matches(&expr, &parse("2^A")));
    }

    #[test]
    fn constants_match_by_value() {
        assert!(matches(&parse("1 + 1"), &Expr::num(2.0)));
        assert!(!matches(&parse("x"), &Expr::num(2.0)));
        assert!(matches(&parse("pi"), &Expr::num(std::f64::consts::PI)));
        assert!(!matches(&parse("x + 1"), &parse("A * 1")));
    }

    #[test]
    fn bind_whole_operand() {
        let expr = parse("x^2 + 1");
        let found = match_expr(&expr, &parse("A + 1"), false).unwrap();
        assert_eq!(found.node, &expr);
        assert_eq!(found.path, Vec::<usize>::new());
        assert_eq!(found.bindings.len(), 1);
        assert_eq!(found.bindings.get(&var("A")), Some(&parse("x^2")));
    }

    #[test]
    fn search_subtrees() {
        let expr = parse("3 * (y + 2)");
        let pattern = parse("A + 2");
        assert!(match_expr(&expr, &pattern, false).is_none());

        let found = match_expr(&expr, &pattern, true).unwrap();
        assert_eq!(found.path, vec![1]);
        assert_eq!(found.node, &parse("y + 2"));
        assert_eq!(found.bindings.get(&var("A")), Some(&Expr::var("y")));
    }

    #[test]
    fn same_kind_is_not_searched_past() {
        // the root is a sum, so it is the only candidate for `A + 2`
        let expr = parse("(x + 1) + (y + 2)");
        assert!(match_expr(&expr, &parse("A + 2"), true).is_none());
        assert_eq!(substitute(&expr, &parse("A + 2"), &Expr::num(0.0)), expr);

        // products are searched past until a sum is reached
        let expr = parse("2 * ((x + 1) * (y + 2))");
        let found = match_expr(&expr, &parse("A + 2"), true).unwrap();
        assert_eq!(found.path, vec![1, 1]);
        assert_eq!(found.node, &parse("y + 2"));
    }

    #[test]
    fn leaf_patterns_are_not_searched() {
        let expr = parse("x + 2");
        assert!(match_expr(&expr, &Expr::num(2.0), true).is_none());
        assert_eq!(substitute(&expr, &Expr::num(2.0), &Expr::num(5.0)), expr);

        let found = match_expr(&expr, &Expr::var("A"), true).unwrap();
        assert_eq!(found.path, Vec::<usize>::new());
    }

    #[test]
    fn repeated_variable() {
        let pattern = parse("A + A");
        let expr = parse("x + x");
        let found = match_expr(&expr, &pattern, false).unwrap();
        assert_eq!(found.bindings.get(&var("A")), Some(&Expr::var("x")));
        assert!(match_expr(&parse("x + y"), &pattern, false).is_none());
    }

    #[test]
    fn repeated_variable_bound_to_nan() {
        let expr = Expr::add(Expr::num(f64::NAN), Expr::num(f64::NAN));
        let found = match_expr(&expr, &parse("A + A"), false).unwrap();
        assert_eq!(found.bindings.get(&var("A")), Some(&Expr::num(f64::NAN)));
    }

    #[test]
    fn inconsistent_merge() {
        let mut lhs = Bindings::new();
        lhs.bind(var("A"), Expr::num(1.0)).unwrap();
        lhs.bind(var("B"), Expr::num(2.0)).unwrap();

        let mut rhs = Bindings::new();
        rhs.bind(var("B"), Expr::num(2.0)).unwrap();
        rhs.bind(var("C"), Expr::num(3.0)).unwrap();
        let merged = lhs.clone().merge(rhs).unwrap();
        assert_eq!(merged.len(), 3);

        let mut conflicting = Bindings::new();
        conflicting.bind(var("A"), Expr::var("x")).unwrap();
        assert_eq!(
            lhs.merge(conflicting),
            Err(PatternConsistency { symbol: "A".to_string() }),
        );
    }

    #[test]
    fn function_patterns() {
        let pattern = parse("sin(A)^2 + cos(A)^2");
        let expr = parse("cos(2t)^2 + sin(2t)^2");
        let found = match_expr(&expr, &pattern, false).unwrap();
        assert_eq!(found.bindings.get(&var("A")), Some(&parse("2t")));

        assert!(match_expr(&parse("sin(x)^2 + cos(y)^2"), &pattern, false).is_none());
        assert!(match_expr(&parse("cos(x)"), &parse("sin(A)"), true).is_none());
    }

    #[test]
    fn pythagorean_identity() {
        let expr = Expr::add(
            Expr::pow(Expr::call(Func::Sin, Expr::var("x")), Expr::num(2.0)),
            Expr::pow(Expr::call(Func::Cos, Expr::var("x")), Expr::num(2.0)),
        );
        let pattern = parse("sin(A)^2 + cos(A)^2");
        let result = substitute(&expr, &pattern, &Expr::num(1.0));
        assert_eq!(result, Expr::num(1.0));
        assert_eq!(result.value(), Ok(1.0));
    }

    #[test]
    fn substitute_inside() {
        let expr = parse("2 * (sin(y)^2 + cos(y)^2)");
        let result = substitute(&expr, &parse("sin(A)^2 + cos(A)^2"), &Expr::num(1.0));
        assert_eq!(result.to_string(), "2 * 1");

        // the input is untouched
        assert_eq!(expr, parse("2 * (sin(y)^2 + cos(y)^2)"));
    }

    #[test]
    fn substitute_with_bindings() {
        let result = substitute(&parse("ln(a * b) + 1"), &parse("ln(A * B)"), &parse("ln(A) + ln(B)"));
        assert_eq!(result.to_string(), "ln(a) + ln(b) + 1");
    }

    #[test]
    fn bindings_apply_at_once() {
        // A -> B and B -> A swap places instead of collapsing
        let result = substitute(&parse("B + A"), &parse("A + B"), &parse("A * B"));
        assert_eq!(result.to_string(), "B * A");
    }

    #[test]
    fn no_match_is_unchanged() {
        let expr = parse("x * y");
        assert_eq!(substitute(&expr, &parse("A + B"), &Expr::num(0.0)), expr);
    }

    #[test]
    fn rewrite_repeatedly() {
        let expr = parse("x + 0 + 0");
        let pattern = parse("A + 0");
        let replacement = parse("A");
        assert_eq!(substitute_all(&expr, &pattern, &replacement, 1).to_string(), "x + 0");
        assert_eq!(substitute_all(&expr, &pattern, &replacement, 10), Expr::var("x"));
    }
}
