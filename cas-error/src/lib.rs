//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages.

// allows `#[derive(ErrorKind)]` to be used within this crate
extern crate self as cas_error;

use ariadne::{Color, Report};
use std::{any::Any, fmt::Debug, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send {
    /// Returns the error as a [`dyn Any`](Any), so that the concrete kind can be recovered.
    fn as_any(&self) -> &dyn Any;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Returns the kind of this error as the concrete type `T`, if it is one.
    pub fn downcast_ref<T: ErrorKind + 'static>(&self) -> Option<&T> {
        self.kind.as_any().downcast_ref::<T>()
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }
}

#[cfg(test)]
mod tests {
    use ariadne::Source;
    use cas_attrs::ErrorKind;
    use super::*;

    #[derive(Debug, ErrorKind)]
    #[error(
        message = format!("`{}` is not defined", name),
        labels = ["this name"],
        help = "check the spelling",
    )]
    struct Undefined {
        name: String,
    }

    #[derive(Debug, ErrorKind)]
    #[error(labels = [""], note = "nothing to see here")]
    struct SomethingElse;

    /// Renders the report of the given error to a plain string.
    fn render(err: &Error, input: &str) -> String {
        let mut buf = Vec::new();
        err.build_report("input")
            .write(("input", Source::from(input)), &mut buf)
            .unwrap();
        String::from_utf8(strip_ansi_escapes::strip(buf)).unwrap()
    }

    #[test]
    fn report_contains_message_and_help() {
        let err = Error::new(vec![4..7], Undefined { name: "foo".to_string() });
        let report = render(&err, "1 + foo");
        assert!(report.contains("`foo` is not defined"));
        assert!(report.contains("this name"));
        assert!(report.contains("check the spelling"));
    }

    #[test]
    fn downcast_kind() {
        let err = Error::new(vec![0..1], SomethingElse);
        assert!(err.downcast_ref::<SomethingElse>().is_some());
        assert!(err.downcast_ref::<Undefined>().is_none());
    }

    #[test]
    fn default_message_and_note() {
        let report = render(&Error::new(vec![0..1], SomethingElse), "x");
        assert!(report.contains("something else"));
        assert!(report.contains("nothing to see here"));
    }
}
