use pdl_core::{Document, ProtocolParser};
use serde_json::Value;
use tracing::debug;

use crate::error::{DslError, ParseErrors, Span};
use crate::parser::{parse_with, ParseOptions};

/// Loads a protocol description, picking the format from `source_name`.
///
/// Names ending in `.pdl` are parsed as PDL, with `lenient` turning on
/// [`ParseOptions::lenient`]. Anything else is read as JSON and returned
/// without further checks.
///
/// # Errors
///
/// Returns every PDL error found, or the single JSON syntax error.
pub fn loads(text: &str, source_name: &str, lenient: bool) -> Result<Document, ParseErrors> {
    if source_name.ends_with(".pdl") {
        debug!(source = source_name, lenient, "loading PDL");
        return parse_with(text, &ParseOptions::from_lenient(lenient)).map_err(ParseErrors::new);
    }

    debug!(source = source_name, "loading JSON");
    serde_json::from_str::<Value>(text)
        .map(Document::new)
        .map_err(|e| ParseErrors::new(vec![json_error(text, &e)]))
}

fn json_error(text: &str, error: &serde_json::Error) -> DslError {
    let line = error.line();
    let column = error.column();
    let start = line_offset(text, line) + column.saturating_sub(1);
    let start = start.min(text.len());
    let end = (start + 1).min(text.len());
    DslError::InvalidJson {
        message: error.to_string(),
        line,
        column,
        span: Span::new(start, end),
    }
}

/// Byte offset of the start of 1-based `line`.
fn line_offset(text: &str, line: usize) -> usize {
    text.split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum()
}

/// The PDL grammar as a [`ProtocolParser`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PdlParser;

impl ProtocolParser for PdlParser {
    type Error = ParseErrors;

    fn parse(&self, text: &str, source_name: &str, lenient: bool) -> Result<Document, ParseErrors> {
        loads(text, source_name, lenient)
    }
}
