//! Expression trees and the algorithms that operate on them.

pub mod derivative;
pub mod error;
pub mod expr;
pub mod matcher;
pub mod simplify;

pub use expr::{Expr, Func, NamedConst, Primary, Variable};
pub use simplify::{simplify, simplify_with_steps, Simplifier, SimplifyOptions};
