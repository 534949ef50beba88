//! Errors that can occur while building and operating on expression trees.

use ariadne::Fmt;
use cas_attrs::ErrorKind;
use cas_error::EXPR;

/// An expression containing a free variable was evaluated.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot evaluate an expression containing the variable `{}`", symbol),
    labels = ["this expression"],
    help = format!("only expressions made of {} and named constants have a value", "numbers".fg(EXPR)),
)]
pub struct NoValue {
    /// The variable that was reached.
    pub symbol: String,
}

/// A term could not be decomposed into a coefficient and variable powers.
///
/// The simplifier never surfaces this error; it keeps the offending term as is.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot factor this term: {}", reason),
    labels = ["this term"],
)]
pub struct ProductExtraction {
    /// Why the term could not be decomposed.
    pub reason: &'static str,
}

/// A pattern variable was bound to two different subtrees within one match.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the pattern variable `{}` cannot match two different expressions", symbol),
    labels = ["this pattern"],
    help = "use a different variable name for each position that can differ",
    note = "a pattern variable stands for the same expression everywhere it appears",
)]
pub struct PatternConsistency {
    /// The pattern variable with the conflicting bindings.
    pub symbol: String,
}

/// A call to a function that does not exist was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown function `{}`", name),
    labels = ["this function"],
    help = if suggestions.is_empty() {
        "see `help` for the list of functions".to_string()
    } else {
        format!(
            "did you mean: {}",
            suggestions.iter()
                .map(|s| format!("{}", s.fg(EXPR)))
                .collect::<Vec<_>>()
                .join(", "),
        )
    },
)]
pub struct UndefinedFunction {
    /// The name of the function that was called.
    pub name: String,

    /// Known function names that are close to the given name.
    pub suggestions: Vec<&'static str>,
}
