//! A representation of mathematical expressions that is easier to manipulate than an AST.
//!
//! The [`Expr`](cas_parser::parser::expr::Expr) type from `cas_parser` remembers where every node
//! came from in the source text, and keeps syntax-only forms such as parentheses, subtraction, and
//! division. That is convenient for reporting errors, but not for algebraic manipulation.
//!
//! This module defines a separate [`Expr`], a binary tree with exactly five kinds of nodes:
//! primaries (numbers, named constants, and variables), sums, products, powers, and calls to
//! single-argument functions. Subtraction is represented as addition of a product with `-1`, and
//! division as multiplication by a power of `-1`.
//!
//! Every node exclusively owns its operands. [`Clone`] produces a wholly independent deep copy,
//! and dropping a node drops its operands. Operations that produce new trees never share nodes
//! with their inputs.
//!
//! Cloning, comparing, displaying, and dropping a tree all recurse once per level, as do the
//! simplifier, the matcher, and differentiation. The stack depth needed is proportional to the
//! depth of the tree, not its size.
//!
//! # Equality
//!
//! The [`PartialEq`] implementation for [`Expr`] is **structural**: two expressions are equal if
//! they are the same kind of node with equal operands in the same order. `x + 1` and `1 + x` are
//! not structurally equal, even though they are mathematically equal. Numbers are compared
//! exactly, except that NaN is equal to NaN.

mod convert;
mod func;
mod iter;

use cas_parser::parser::{token::op::BinOpKind, Precedence};
use crate::algebra::error::NoValue;
use iter::ExprIter;
use std::{cmp::Ordering, fmt, ops::{Add, Mul, Neg}};

pub use func::Func;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A mathematical constant that is displayed by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NamedConst {
    /// Euler's number, `e`.
    E,

    /// The ratio of a circle's circumference to its diameter, `pi`.
    Pi,
}

impl NamedConst {
    /// Returns the named constant with the given display symbol.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "e" => Some(Self::E),
            "pi" => Some(Self::Pi),
            _ => None,
        }
    }

    /// Returns the display symbol of the constant.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::E => "e",
            Self::Pi => "pi",
        }
    }

    /// Returns the numeric value of the constant.
    pub fn value(&self) -> f64 {
        match self {
            Self::E => std::f64::consts::E,
            Self::Pi => std::f64::consts::PI,
        }
    }
}

/// A variable, such as `x`.
///
/// A variable can also be a *differential* marker, such as `dx`, which tags the variable as the
/// target of a differentiation. Dependency tests and differentiation compare variables by name
/// only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Variable {
    /// The name of the variable.
    pub name: String,

    /// Whether this is the differential marker form of the variable.
    pub differential: bool,
}

impl Variable {
    /// Creates a new, non-differential variable with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), differential: false }
    }

    /// Returns the differential marker form of this variable.
    pub fn differential(&self) -> Self {
        Self { name: self.name.clone(), differential: true }
    }

    /// Returns true if both variables have the same name.
    pub fn same_name(&self, other: &Variable) -> bool {
        self.name == other.name
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.differential {
            write!(f, "d{}", self.name)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

/// A single leaf of an expression, such as a number or variable.
///
/// Numbers compare equal if they are equal or both NaN, so that structural equality is reflexive
/// for trees containing NaN.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Primary {
    /// A number, such as `2` or `0.5`.
    Number(f64),

    /// A named constant, such as `e` or `pi`.
    Named(NamedConst),

    /// A variable, such as `x` or `y`.
    Symbol(Variable),
}

impl PartialEq for Primary {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Self::Named(a), Self::Named(b)) => a == b,
            (Self::Symbol(a), Self::Symbol(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Primary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(num) => write!(f, "{}", num),
            Self::Named(named) => write!(f, "{}", named.symbol()),
            Self::Symbol(var) => write!(f, "{}", var),
        }
    }
}

/// The kind of an expression node, used for structural dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ExprKind {
    /// A number or named constant.
    Constant,

    /// A variable.
    Variable,

    /// A sum.
    Add,

    /// A product.
    Mul,

    /// A power.
    Exp,

    /// A call to the given function.
    Call(Func),
}

impl ExprKind {
    /// Returns true if nodes of this kind have two operands.
    pub fn is_binary(&self) -> bool {
        matches!(self, Self::Add | Self::Mul | Self::Exp)
    }

    /// Returns true if the operands of nodes of this kind can be swapped without changing the
    /// value of the node.
    pub fn is_commutative(&self) -> bool {
        matches!(self, Self::Add | Self::Mul)
    }
}

/// A mathematical expression tree.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A single leaf.
    Primary(Primary),

    /// Two terms added together.
    Add(Box<Expr>, Box<Expr>),

    /// Two factors multiplied together.
    Mul(Box<Expr>, Box<Expr>),

    /// A base raised to an exponent.
    Exp(Box<Expr>, Box<Expr>),

    /// A function applied to an argument.
    Call(Func, Box<Expr>),
}

impl Expr {
    /// Creates a number.
    pub fn num(value: f64) -> Self {
        Self::Primary(Primary::Number(value))
    }

    /// Creates a named constant.
    pub fn named(named: NamedConst) -> Self {
        Self::Primary(Primary::Named(named))
    }

    /// Creates a variable with the given name.
    pub fn var(name: impl Into<String>) -> Self {
        Self::Primary(Primary::Symbol(Variable::new(name)))
    }

    /// Creates the sum `lhs + rhs`. No simplification is done.
    pub fn add(lhs: Expr, rhs: Expr) -> Self {
        Self::Add(Box::new(lhs), Box::new(rhs))
    }

    /// Creates the product `lhs * rhs`. No simplification is done.
    pub fn mul(lhs: Expr, rhs: Expr) -> Self {
        Self::Mul(Box::new(lhs), Box::new(rhs))
    }

    /// Creates the power `base ^ exp`. No simplification is done.
    pub fn pow(base: Expr, exp: Expr) -> Self {
        Self::Exp(Box::new(base), Box::new(exp))
    }

    /// Creates the call `func(arg)`.
    pub fn call(func: Func, arg: Expr) -> Self {
        Self::Call(func, Box::new(arg))
    }

    /// Returns the kind of this expression.
    pub fn kind(&self) -> ExprKind {
        match self {
            Self::Primary(Primary::Number(_) | Primary::Named(_)) => ExprKind::Constant,
            Self::Primary(Primary::Symbol(_)) => ExprKind::Variable,
            Self::Add(..) => ExprKind::Add,
            Self::Mul(..) => ExprKind::Mul,
            Self::Exp(..) => ExprKind::Exp,
            Self::Call(func, _) => ExprKind::Call(*func),
        }
    }

    /// Evaluates the expression.
    ///
    /// Returns [`NoValue`] if the expression contains a variable.
    pub fn value(&self) -> Result<f64, NoValue> {
        match self {
            Self::Primary(Primary::Number(num)) => Ok(*num),
            Self::Primary(Primary::Named(named)) => Ok(named.value()),
            Self::Primary(Primary::Symbol(var)) => Err(NoValue { symbol: var.to_string() }),
            Self::Add(lhs, rhs) => Ok(lhs.value()? + rhs.value()?),
            Self::Mul(lhs, rhs) => Ok(lhs.value()? * rhs.value()?),
            Self::Exp(base, exp) => Ok(base.value()?.powf(exp.value()?)),
            Self::Call(func, arg) => Ok(func.apply(arg.value()?)),
        }
    }

    /// Returns true if the given variable occurs anywhere in the expression.
    pub fn depends_on(&self, var: &Variable) -> bool {
        self.post_order_iter().any(|expr| expr.as_variable().is_some_and(|v| v.same_name(var)))
    }

    /// If the expression is a [`Primary::Number`], returns the number.
    ///
    /// Named constants are not numbers, so that they are never folded away.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Primary(Primary::Number(num)) => Some(*num),
            _ => None,
        }
    }

    /// If the expression is a [`Primary::Symbol`], returns the variable.
    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Self::Primary(Primary::Symbol(var)) => Some(var),
            _ => None,
        }
    }

    /// Returns true if the expression is the number `0`.
    pub fn is_zero(&self) -> bool {
        self.as_number() == Some(0.0)
    }

    /// Returns true if the expression is the number `1`.
    pub fn is_one(&self) -> bool {
        self.as_number() == Some(1.0)
    }

    /// Returns the immediate operands of the expression, in order. Leaves have no operands.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Self::Primary(_) => Vec::new(),
            Self::Add(lhs, rhs) | Self::Mul(lhs, rhs) | Self::Exp(lhs, rhs) => vec![&**lhs, &**rhs],
            Self::Call(_, arg) => vec![&**arg],
        }
    }

    /// Returns a mutable reference to the operand at the given index.
    pub fn child_mut(&mut self, index: usize) -> Option<&mut Expr> {
        match (self, index) {
            (Self::Add(lhs, _) | Self::Mul(lhs, _) | Self::Exp(lhs, _), 0) => Some(lhs.as_mut()),
            (Self::Add(_, rhs) | Self::Mul(_, rhs) | Self::Exp(_, rhs), 1) => Some(rhs.as_mut()),
            (Self::Call(_, arg), 0) => Some(arg.as_mut()),
            _ => None,
        }
    }

    /// Returns the subtree reached by following the given operand indices from this node.
    pub fn at_path(&self, path: &[usize]) -> Option<&Expr> {
        let mut current = self;
        for &index in path {
            current = current.children().get(index).copied()?;
        }
        Some(current)
    }

    /// Returns a mutable reference to the subtree reached by following the given operand indices
    /// from this node.
    pub fn at_path_mut(&mut self, path: &[usize]) -> Option<&mut Expr> {
        let mut current = self;
        for &index in path {
            current = current.child_mut(index)?;
        }
        Some(current)
    }

    /// Replaces the subtree at the given path with `replacement`, returning the replaced subtree.
    /// Returns [`None`] and leaves the expression untouched if the path does not exist.
    pub fn replace_at(&mut self, path: &[usize], replacement: Expr) -> Option<Expr> {
        self.at_path_mut(path)
            .map(|target| std::mem::replace(target, replacement))
    }

    /// Replaces every occurrence of the given variable with a copy of `value`, in place.
    pub fn set_variable(&mut self, var: &Variable, value: &Expr) {
        if self.as_variable().is_some_and(|v| v.same_name(var)) {
            *self = value.clone();
            return;
        }

        match self {
            Self::Primary(_) => (),
            Self::Add(lhs, rhs) | Self::Mul(lhs, rhs) | Self::Exp(lhs, rhs) => {
                lhs.set_variable(var, value);
                rhs.set_variable(var, value);
            },
            Self::Call(_, arg) => arg.set_variable(var, value),
        }
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }

    /// Returns the precedence of the expression, or [`None`] if it is a leaf or function call.
    fn precedence(&self) -> Option<Precedence> {
        match self {
            Self::Primary(_) | Self::Call(..) => None,
            Self::Add(..) => Some(BinOpKind::Add.precedence()),
            Self::Mul(..) => Some(BinOpKind::Mul.precedence()),
            Self::Exp(..) => Some(BinOpKind::Exp.precedence()),
        }
    }

    /// Compares the precedence of this expression to another expression. Leaves and function
    /// calls bind tighter than any operator.
    ///
    /// This is used to determine if parentheses are needed around an operand when printing.
    pub fn cmp_precedence(&self, other: &Self) -> Ordering {
        match (self.precedence(), other.precedence()) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(lhs), Some(rhs)) => lhs.partial_cmp(&rhs).unwrap_or(Ordering::Equal),
        }
    }

    /// Writes an operand of this expression, parenthesized if `parens` is true.
    fn fmt_operand(f: &mut fmt::Formatter<'_>, operand: &Expr, parens: bool) -> fmt::Result {
        if parens {
            write!(f, "({})", operand)
        } else {
            write!(f, "{}", operand)
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary(primary) => write!(f, "{}", primary),
            Self::Add(lhs, rhs) => write!(f, "{} + {}", lhs, rhs),
            Self::Mul(lhs, rhs) => {
                Self::fmt_operand(f, lhs, lhs.cmp_precedence(self) == Ordering::Less)?;
                write!(f, " * ")?;
                Self::fmt_operand(f, rhs, rhs.cmp_precedence(self) == Ordering::Less)
            },
            Self::Exp(base, exp) => {
                // `-2^x` would be read back as `-(2^x)`
                let negative_base = base.as_number().is_some_and(|n| n.is_sign_negative());
                Self::fmt_operand(f, base, base.cmp_precedence(self) != Ordering::Greater || negative_base)?;
                write!(f, "^")?;
                Self::fmt_operand(f, exp, exp.cmp_precedence(self) == Ordering::Less)
            },
            Self::Call(func, arg) => write!(f, "{}({})", func.name(), arg),
        }
    }
}

/// Adds two [`Expr`]s together. No simplification is done.
impl Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Expr::add(self, rhs)
    }
}

/// Multiplies two [`Expr`]s together. No simplification is done.
impl Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Expr::mul(self, rhs)
    }
}

/// Negates the expression by multiplying it by `-1`. No simplification is done.
impl Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Expr::mul(Expr::num(-1.0), self)
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Expr::num(value)
    }
}

impl From<Variable> for Expr {
    fn from(var: Variable) -> Self {
        Self::Primary(Primary::Symbol(var))
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> Expr {
        Expr::var("x")
    }

    #[test]
    fn display_precedence() {
        let expr = Expr::add(
            Expr::pow(x(), Expr::num(2.0)),
            Expr::mul(Expr::num(2.0), x()),
        );
        assert_eq!(expr.to_string(), "x^2 + 2 * x");

        let expr = Expr::mul(Expr::add(x(), Expr::num(1.0)), Expr::add(x(), Expr::num(-1.0)));
        assert_eq!(expr.to_string(), "(x + 1) * (x + -1)");

        let expr = Expr::pow(Expr::pow(x(), Expr::num(2.0)), Expr::mul(Expr::num(3.0), x()));
        assert_eq!(expr.to_string(), "(x^2)^(3 * x)");

        let expr = Expr::pow(Expr::num(-2.0), Expr::num(0.5));
        assert_eq!(expr.to_string(), "(-2)^0.5");

        let expr = Expr::call(Func::Sin, Expr::add(x(), Expr::named(NamedConst::Pi)));
        assert_eq!(expr.to_string(), "sin(x + pi)");
    }

    #[test]
    fn display_differential() {
        let dx = Variable::new("x").differential();
        assert_eq!(Expr::from(dx).to_string(), "dx");
    }

    #[test]
    fn value_of_constant_tree() {
        let expr = Expr::add(
            Expr::mul(Expr::num(2.0), Expr::named(NamedConst::Pi)),
            Expr::call(Func::Cos, Expr::num(0.0)),
        );
        assert_float_absolute_eq!(expr.value().unwrap(), 2.0 * std::f64::consts::PI + 1.0);
    }

    #[test]
    fn value_of_free_variable() {
        let expr = Expr::add(Expr::num(2.0), Expr::mul(Expr::num(3.0), Expr::var("y")));
        assert_eq!(expr.value(), Err(NoValue { symbol: "y".to_string() }));
    }

    #[test]
    fn negative_base_power_is_nan() {
        let expr = Expr::pow(Expr::num(-8.0), Expr::num(0.5));
        assert!(expr.value().unwrap().is_nan());
    }

    #[test]
    fn nan_is_structurally_equal() {
        let expr = Expr::add(Expr::num(f64::NAN), x());
        assert_eq!(expr, expr.clone());
        assert_ne!(Expr::num(f64::NAN), Expr::num(1.0));
        assert_ne!(Expr::num(0.0), x());
    }

    #[test]
    fn depends_on() {
        let expr = Expr::call(Func::Ln, Expr::mul(Expr::num(2.0), x()));
        assert!(expr.depends_on(&Variable::new("x")));
        assert!(expr.depends_on(&Variable::new("x").differential()));
        assert!(!expr.depends_on(&Variable::new("y")));
    }

    #[test]
    fn kinds() {
        assert_eq!(Expr::named(NamedConst::E).kind(), ExprKind::Constant);
        assert_eq!(x().kind(), ExprKind::Variable);
        assert_eq!(Expr::call(Func::Tan, x()).kind(), ExprKind::Call(Func::Tan));
        assert!(ExprKind::Mul.is_commutative());
        assert!(ExprKind::Exp.is_binary());
        assert!(!ExprKind::Exp.is_commutative());
        assert!(!ExprKind::Call(Func::Sin).is_binary());
    }

    #[test]
    fn paths() {
        // (x + 1) * sin(y)
        let mut expr = Expr::mul(
            Expr::add(x(), Expr::num(1.0)),
            Expr::call(Func::Sin, Expr::var("y")),
        );
        assert_eq!(expr.at_path(&[0, 1]), Some(&Expr::num(1.0)));
        assert_eq!(expr.at_path(&[1, 0]), Some(&Expr::var("y")));
        assert_eq!(expr.at_path(&[1, 1]), None);

        let old = expr.replace_at(&[1, 0], Expr::num(2.0));
        assert_eq!(old, Some(Expr::var("y")));
        assert_eq!(expr.to_string(), "(x + 1) * sin(2)");
    }

    #[test]
    fn copy_independence() {
        let original = Expr::add(x(), Expr::pow(x(), Expr::num(2.0)));
        let mut copy = original.clone();
        copy.set_variable(&Variable::new("x"), &Expr::num(3.0));
        copy.replace_at(&[0], Expr::num(5.0));

        assert_eq!(copy, Expr::add(Expr::num(5.0), Expr::pow(Expr::num(3.0), Expr::num(2.0))));
        assert_eq!(original, Expr::add(x(), Expr::pow(x(), Expr::num(2.0))));
    }

    #[test]
    fn post_order() {
        let expr = Expr::add(Expr::mul(Expr::num(2.0), x()), Expr::call(Func::Ln, Expr::var("y")));
        let visited = expr.post_order_iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>();
        assert_eq!(visited, vec!["2", "x", "2 * x", "y", "ln(y)", "2 * x + ln(y)"]);
    }
}
