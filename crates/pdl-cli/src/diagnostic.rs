use miette::{Diagnostic, NamedSource, SourceSpan};
use pdl_dsl::{DslError, Span};

/// A diagnostic wrapping a `DslError` for rich miette rendering.
///
/// The module-level `#[allow(unused_assignments)]` in main.rs is required
/// because miette's derive macro generates assignment patterns that rustc
/// flags as unused.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
pub struct ProtocolDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("{label}")]
    span: SourceSpan,

    message: String,
    label: String,

    #[help]
    suggestion: Option<String>,
}

fn source_span(span: &Span) -> SourceSpan {
    (span.start, span.len()).into()
}

/// Convert a `DslError` into a miette `ProtocolDiagnostic`.
pub fn dsl_error_to_diagnostic(error: &DslError, source: &str, filename: &str) -> ProtocolDiagnostic {
    let named_src = NamedSource::new(filename, source.to_string());

    match error {
        DslError::IllegalToken { line, text, span } => ProtocolDiagnostic {
            src: named_src,
            span: source_span(span),
            message: format!("illegal token at line {line}"),
            label: "matches no PDL line form".to_string(),
            suggestion: Some(illegal_line_hint(text)),
        },

        DslError::MissingContext {
            construct,
            requires,
            span,
            ..
        } => ProtocolDiagnostic {
            src: named_src,
            span: source_span(span),
            message: error.to_string(),
            label: format!("{construct} needs {requires}"),
            suggestion: Some(format!("Declare {requires} above this line.")),
        },

        DslError::InvalidJson { message, span, .. } => ProtocolDiagnostic {
            src: named_src,
            span: source_span(span),
            message: format!("invalid JSON: {message}"),
            label: "here".to_string(),
            suggestion: Some(
                "Sources whose name does not end in .pdl are read as JSON; pass --source-name with a .pdl name for PDL input."
                    .to_string(),
            ),
        },

        // Catch future non_exhaustive variants
        _ => ProtocolDiagnostic {
            src: named_src,
            span: source_span(error.span()),
            message: error.to_string(),
            label: "error".to_string(),
            suggestion: None,
        },
    }
}

/// Suggests a fix for a line that matched nothing, based on its indentation.
fn illegal_line_hint(text: &str) -> String {
    let indent = text.len() - text.trim_start_matches(' ').len();
    if text[indent..].starts_with('\t') {
        return "Indent with spaces; tabs are not allowed.".to_string();
    }
    match indent {
        0 => "Top-level lines are `domain NAME` or `version`.".to_string(),
        2 => "Domain members are `type`, `command`, `event`, `depends on`, `major` or `minor`."
            .to_string(),
        4 => "Item members are `parameters`, `returns`, `properties`, `enum` or `redirect`."
            .to_string(),
        6 => "Parameters are written `[optional] [array of] TYPE NAME`.".to_string(),
        8 => "Enum literals are a single word.".to_string(),
        _ => format!("Indentation of {indent} spaces is not a nesting level (0, 2, 4, 6 or 8)."),
    }
}

/// Render all parse errors for a file using miette.
///
/// Returns a vector of `miette::Report` that can be printed to stderr.
pub fn render_diagnostics(
    errors: &[DslError],
    source: &str,
    filename: &str,
) -> Vec<miette::Report> {
    errors
        .iter()
        .map(|e| {
            let diagnostic = dsl_error_to_diagnostic(e, source, filename);
            miette::Report::new(diagnostic)
        })
        .collect()
}
