use std::fmt;

/// A byte-offset span in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    /// Creates a new span from start (inclusive) to end (exclusive).
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// True for zero-width spans.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Errors that occur while loading a protocol description.
///
/// Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DslError {
    /// A line starts with none of the grammar's line forms, or its head
    /// is not followed by what the form requires.
    IllegalToken {
        line: usize,
        text: String,
        span: Span,
    },

    /// A line is well formed but appears where its enclosing construct is
    /// missing, e.g. a parameter before any `parameters` block.
    MissingContext {
        construct: &'static str,
        requires: &'static str,
        line: usize,
        span: Span,
    },

    /// A non-PDL source could not be read as JSON.
    InvalidJson {
        message: String,
        line: usize,
        column: usize,
        span: Span,
    },
}

impl DslError {
    /// The span the error points at.
    pub fn span(&self) -> &Span {
        match self {
            Self::IllegalToken { span, .. }
            | Self::MissingContext { span, .. }
            | Self::InvalidJson { span, .. } => span,
        }
    }

    /// The 1-based line the error points at.
    pub fn line(&self) -> usize {
        match self {
            Self::IllegalToken { line, .. }
            | Self::MissingContext { line, .. }
            | Self::InvalidJson { line, .. } => *line,
        }
    }
}

impl fmt::Display for DslError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IllegalToken { line, text, .. } => {
                write!(f, "illegal token at line {line}: '{text}'")
            }
            Self::MissingContext {
                construct,
                requires,
                line,
                ..
            } => {
                write!(f, "{construct} at line {line} is not inside {requires}")
            }
            Self::InvalidJson {
                message,
                line,
                column,
                ..
            } => {
                write!(
                    f,
                    "invalid JSON at line {line}, column {column}: {message}"
                )
            }
        }
    }
}

impl std::error::Error for DslError {}

/// All errors found in one document.
///
/// This is the error type of [`PdlParser`](crate::PdlParser); it is never
/// empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrors(Vec<DslError>);

impl ParseErrors {
    /// Wraps a non-empty list of errors.
    pub fn new(errors: Vec<DslError>) -> Self {
        debug_assert!(!errors.is_empty(), "ParseErrors must not be empty");
        Self(errors)
    }

    /// The errors, in source order.
    pub fn errors(&self) -> &[DslError] {
        &self.0
    }

    /// Consumes the wrapper.
    pub fn into_vec(self) -> Vec<DslError> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<DslError>> for ParseErrors {
    fn from(errors: Vec<DslError>) -> Self {
        Self::new(errors)
    }
}

impl IntoIterator for ParseErrors {
    type Item = DslError;
    type IntoIter = std::vec::IntoIter<DslError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ParseErrors {
    type Item = &'a DslError;
    type IntoIter = std::slice::Iter<'a, DslError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ParseErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [] => write!(f, "no errors"),
            [only] => write!(f, "{only}"),
            [first, rest @ ..] => write!(f, "{first} (and {} more)", rest.len()),
        }
    }
}

impl std::error::Error for ParseErrors {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.first().map(|e| e as &(dyn std::error::Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn span_display() {
        let span = Span::new(10, 20);
        assert_eq!(span.to_string(), "10..20");
        assert_eq!(span.len(), 10);
        assert!(!span.is_empty());
    }

    #[test]
    fn error_display_illegal_token() {
        let err = DslError::IllegalToken {
            line: 4,
            text: "  bogus line".into(),
            span: Span::new(30, 42),
        };
        let msg = err.to_string();
        assert!(msg.contains("illegal token"));
        assert!(msg.contains("line 4"));
        assert!(msg.contains("bogus line"));
    }

    #[test]
    fn error_display_missing_context() {
        let err = DslError::MissingContext {
            construct: "parameter",
            requires: "a 'parameters', 'returns' or 'properties' block",
            line: 7,
            span: Span::new(0, 1),
        };
        let msg = err.to_string();
        assert!(msg.contains("parameter at line 7"));
        assert!(msg.contains("'parameters'"));
    }

    #[test]
    fn error_display_invalid_json() {
        let err = DslError::InvalidJson {
            message: "EOF while parsing".into(),
            line: 1,
            column: 2,
            span: Span::new(1, 1),
        };
        assert!(err.to_string().contains("line 1, column 2"));
    }

    fn illegal(line: usize) -> DslError {
        DslError::IllegalToken {
            line,
            text: "x".into(),
            span: Span::new(5, 6),
        }
    }

    #[test]
    fn accessors_return_line_and_span() {
        let err = illegal(2);
        assert_eq!(err.line(), 2);
        assert_eq!(err.span(), &Span::new(5, 6));
    }

    #[test]
    fn parse_errors_display_counts_rest() {
        let one = illegal(1);
        let errors = ParseErrors::new(vec![one.clone(), one.clone(), one]);
        let msg = errors.to_string();
        assert!(msg.contains("illegal token at line 1"));
        assert!(msg.contains("(and 2 more)"));
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn parse_errors_source_is_first_error() {
        let errors = ParseErrors::new(vec![illegal(9)]);
        assert!(errors.source().unwrap().to_string().contains("line 9"));
    }

    #[test]
    fn error_is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(illegal(1));
        assert!(err.to_string().contains("illegal token"));
    }
}
