use cas_math::algebra::{
    error::NoValue,
    expr::{Expr, Func},
    matcher::{match_expr, substitute},
    simplify::{step::Step, Simplifier},
};
use crate::error::Error;
use std::ops::Range;

/// A piece of an input line, along with its byte offset into the line.
///
/// Errors produced while parsing a fragment point into the fragment; the offset is used to move
/// them back into the whole line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment<'a> {
    pub text: &'a str,
    pub offset: usize,
}

impl<'a> Fragment<'a> {
    /// Returns the region of the input line covered by this fragment.
    pub fn span(&self) -> Range<usize> {
        self.offset..self.offset + self.text.len()
    }

    /// Splits the fragment at every `;`, requiring exactly `N` pieces.
    fn split<const N: usize>(&self, usage: &str) -> Result<[Fragment<'a>; N], Error> {
        let mut pieces = Vec::with_capacity(N);
        let mut start = 0;
        for (index, _) in self.text.match_indices(';') {
            pieces.push(Fragment { text: &self.text[start..index], offset: self.offset + start });
            start = index + 1;
        }
        pieces.push(Fragment { text: &self.text[start..], offset: self.offset + start });

        pieces.try_into()
            .map_err(|_| Error::Usage(format!("expected `{}`", usage)))
    }

    /// Splits off the first word of the fragment.
    fn split_first_word(&self) -> Option<(Fragment<'a>, Fragment<'a>)> {
        let text = self.text.trim_start();
        let offset = self.offset + (self.text.len() - text.len());
        let end = text.find(char::is_whitespace)?;
        Some((
            Fragment { text: &text[..end], offset },
            Fragment { text: &text[end..], offset: offset + end },
        ))
    }

    /// Parses the fragment as an expression.
    pub fn parse(&self) -> Result<Expr, Error> {
        Expr::parse(self.text).map_err(|mut err| {
            for span in &mut err.spans {
                span.start += self.offset;
                span.end += self.offset;
            }
            Error::Expr(err)
        })
    }
}

/// A command entered by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    /// `simplify <expr>`, or just `<expr>`
    Simplify(Fragment<'a>),

    /// `eval <expr>`
    Eval(Fragment<'a>),

    /// `derive <var> <expr>`
    Derive { var: Fragment<'a>, expr: Fragment<'a> },

    /// `match <expr> ; <pattern>`
    Match { expr: Fragment<'a>, pattern: Fragment<'a> },

    /// `substitute <expr> ; <pattern> ; <replacement>`
    Substitute { expr: Fragment<'a>, pattern: Fragment<'a>, replacement: Fragment<'a> },

    /// `help`
    Help,
}

impl<'a> Command<'a> {
    /// Parses a command from a line of input.
    pub fn parse(line: &'a str) -> Result<Self, Error> {
        let whole = Fragment { text: line, offset: 0 };
        let (keyword, args) = match whole.split_first_word() {
            Some(split) => split,
            None => (
                Fragment { text: line.trim(), offset: line.len() - line.trim_start().len() },
                Fragment { text: "", offset: line.len() },
            ),
        };

        Ok(match keyword.text {
            "help" => Self::Help,
            "simplify" => Self::Simplify(args),
            "eval" => Self::Eval(args),
            "derive" => {
                let (var, expr) = args.split_first_word()
                    .ok_or_else(|| Error::Usage("expected `derive <var> <expr>`".to_string()))?;
                Self::Derive { var, expr }
            },
            "match" => {
                let [expr, pattern] = args.split("match <expr> ; <pattern>")?;
                Self::Match { expr, pattern }
            },
            "substitute" => {
                let [expr, pattern, replacement] =
                    args.split("substitute <expr> ; <pattern> ; <replacement>")?;
                Self::Substitute { expr, pattern, replacement }
            },
            _ => Self::Simplify(whole),
        })
    }
}

/// Runs commands and formats their output.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// The simplifier used by every command.
    pub simplifier: Simplifier,

    /// Whether to list the simplification steps after a simplified result.
    pub show_steps: bool,
}

impl Session {
    /// Simplifies the expression, writing it and, if enabled, the steps taken to the output.
    fn simplify_into(&self, expr: &Expr, out: &mut String) {
        let mut steps: Vec<Step> = Vec::new();
        let result = self.simplifier.simplify(expr, &mut steps);
        out.push_str(&result.to_string());
        if self.show_steps {
            for step in steps {
                out.push_str(&format!("\n  {}", step));
            }
        }
    }

    /// Runs the command, returning the text to print.
    pub fn execute(&self, command: &Command) -> Result<String, Error> {
        let mut out = String::new();
        match command {
            Command::Simplify(expr) => self.simplify_into(&expr.parse()?, &mut out),
            Command::Eval(expr) => {
                let value = expr.parse()?
                    .value()
                    .map_err(|err: NoValue| cas_error::Error::new(vec![expr.span()], err))?;
                out.push_str(&value.to_string());
            },
            Command::Derive { var, expr } => {
                let parsed_var = var.parse()?;
                let Some(target) = parsed_var.as_variable() else {
                    return Err(Error::Usage(format!("`{}` is not a variable", var.text.trim())));
                };
                let derivative = expr.parse()?.differentiate(target);
                self.simplify_into(&derivative, &mut out);
            },
            Command::Match { expr, pattern } => {
                let expr = expr.parse()?;
                let pattern = pattern.parse()?;
                match match_expr(&expr, &pattern, true) {
                    Some(found) => {
                        out.push_str(&format!("matched `{}`", found.node));
                        for (var, bound) in found.bindings.iter() {
                            out.push_str(&format!("\n  {} = {}", var, bound));
                        }
                    },
                    None => out.push_str("no match"),
                }
            },
            Command::Substitute { expr, pattern, replacement } => {
                let result = substitute(&expr.parse()?, &pattern.parse()?, &replacement.parse()?);
                out.push_str(&result.to_string());
            },
            Command::Help => out.push_str(&help()),
        }
        Ok(out)
    }
}

/// Returns the help text.
fn help() -> String {
    let funcs = Func::ALL.iter()
        .map(Func::name)
        .chain(["exp", "sqrt"])
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "commands:
  <expr>, simplify <expr>                        simplify an expression
  eval <expr>                                    evaluate an expression without variables
  derive <var> <expr>                            differentiate an expression
  match <expr> ; <pattern>                       find a subtree matching a pattern
  substitute <expr> ; <pattern> ; <replacement>  rewrite the first match of a pattern
  help                                           show this message
functions: {}
constants: e, pi",
        funcs,
    )
}

#[cfg(test)]
mod tests {
    use cas_math::algebra::error::UndefinedFunction;
    use pretty_assertions::assert_eq;
    use super::*;

    fn run(line: &str) -> String {
        Session::default().execute(&Command::parse(line).unwrap()).unwrap()
    }

    #[test]
    fn parse_commands() {
        assert_eq!(Command::parse("x + 1").unwrap(), Command::Simplify(Fragment { text: "x + 1", offset: 0 }));
        assert_eq!(Command::parse("  help  ").unwrap(), Command::Help);
        assert_eq!(
            Command::parse("derive x x^2").unwrap(),
            Command::Derive {
                var: Fragment { text: "x", offset: 7 },
                expr: Fragment { text: " x^2", offset: 8 },
            },
        );
        assert_eq!(
            Command::parse("match a+b ; A+B").unwrap(),
            Command::Match {
                expr: Fragment { text: " a+b ", offset: 5 },
                pattern: Fragment { text: " A+B", offset: 11 },
            },
        );
        assert!(Command::parse("substitute x ; y").is_err());
        assert!(Command::parse("derive x").is_err());
    }

    #[test]
    fn simplify() {
        assert_eq!(run("2x + 3x"), "5 * x");
        assert_eq!(run("simplify (x + 1)(x - 1)"), "x^2 + -1");
    }

    #[test]
    fn steps() {
        let session = Session { show_steps: true, ..Default::default() };
        let output = session.execute(&Command::parse("x * 1").unwrap()).unwrap();
        assert_eq!(output, "x\n  remove factor of one");
    }

    #[test]
    fn eval() {
        assert_eq!(run("eval 2^3 + 1"), "9");
        let err = Session::default().execute(&Command::parse("eval 2y").unwrap()).unwrap_err();
        match err {
            Error::Expr(err) => {
                assert_eq!(err.downcast_ref::<NoValue>().unwrap().symbol, "y");
                assert_eq!(err.spans, vec![4..7]);
            },
            Error::Usage(_) => panic!("expected an expression error"),
        }
    }

    #[test]
    fn derive() {
        assert_eq!(run("derive x x * x"), "2 * x");
        assert_eq!(run("derive y x * y^2"), "2 * x * y");
        assert!(matches!(
            Session::default().execute(&Command::parse("derive 2 x").unwrap()),
            Err(Error::Usage(_)),
        ));
    }

    #[test]
    fn match_and_substitute() {
        assert_eq!(run("match 3 * (y + 2) ; A + 2"), "matched `y + 2`\n  A = y");
        assert_eq!(run("match x ; A + 2"), "no match");
        assert_eq!(run("match x * y + 1 ; A * B + 1"), "matched `x * y + 1`\n  A = x\n  B = y");
        assert_eq!(run("substitute sin(t)^2 + cos(t)^2 ; sin(A)^2 + cos(A)^2 ; 1"), "1");
    }

    #[test]
    fn error_spans_point_into_the_line() {
        let err = Session::default().execute(&Command::parse("match x ; foo(A)").unwrap()).unwrap_err();
        match err {
            Error::Expr(err) => {
                assert!(err.downcast_ref::<UndefinedFunction>().is_some());
                assert_eq!(err.spans, vec![10..13]);
            },
            Error::Usage(_) => panic!("expected an expression error"),
        }
    }

    #[test]
    fn help_lists_functions() {
        let help = run("help");
        assert!(help.contains("arcsin"));
        assert!(help.contains("sqrt"));
    }
}
