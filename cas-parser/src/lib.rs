//! Tokenizer and parser for infix algebraic expressions, such as `2x^2 + sin(x) / 3`.
//!
//! The parser produces an abstract syntax tree ([`parser::expr::Expr`]) in which every node
//! remembers the region of the source it was parsed from, so that later stages can point at the
//! offending part of the input when reporting errors.
//!
//! ```
//! use cas_parser::parser::{expr::Expr, Parser};
//!
//! let mut parser = Parser::new("2x + 1");
//! let expr = parser.try_parse_full::<Expr>().unwrap();
//! assert_eq!(expr.span(), 0..6);
//! ```

pub mod parser;
pub mod tokenizer;
