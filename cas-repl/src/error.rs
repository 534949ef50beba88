use ariadne::Source;
use log::error;

/// Utility enum to package errors that can occur while running a command.
#[derive(Debug)]
pub enum Error {
    /// The command itself was malformed.
    Usage(String),

    /// An error pointing into the input, such as a parse error or an unknown function.
    Expr(cas_error::Error),
}

impl Error {
    /// Report this [`Error`] to stderr.
    ///
    /// The `ariadne` crate's [`Report`](ariadne::Report) type actually does not have a `Display`
    /// implementation, so we can only use its `eprint` method to print to stderr.
    pub fn report_to_stderr(&self, input: &str) {
        match self {
            Self::Usage(message) => eprintln!("error: {}\nsee `help` for usage", message),
            Self::Expr(err) => {
                let report = err.build_report("input");
                if let Err(err) = report.eprint(("input", Source::from(input))) {
                    error!("could not write the error report: {}", err);
                }
            },
        }
    }
}

impl From<cas_error::Error> for Error {
    fn from(err: cas_error::Error) -> Self {
        Self::Expr(err)
    }
}
