//! Symbolic algebra on expression trees.
//!
//! An [`Expr`](algebra::expr::Expr) is a binary tree of sums, products, powers, and function
//! calls over numbers, named constants, and variables. This crate provides the operations that
//! work on those trees:
//!
//! - [`simplify`](algebra::simplify) reduces a tree to a canonical form, folding constants,
//!   collecting like terms, and distributing products over sums.
//! - [`matcher`](algebra::matcher) matches a tree against a pattern containing wildcard variables,
//!   and rewrites the matched subtree.
//! - [`Expr::differentiate`](algebra::expr::Expr::differentiate) computes the symbolic derivative
//!   of a tree with respect to a variable.
//!
//! Trees are usually obtained by parsing text with [`cas_parser`] and converting the resulting
//! AST with [`TryFrom`].

pub mod algebra;
pub mod step;
