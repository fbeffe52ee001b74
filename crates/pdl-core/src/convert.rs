use std::io::{Read, Write};

use tracing::debug;

use crate::document::Document;
use crate::error::ConvertError;
use crate::json::{self, JsonStyle};
use crate::parser::{ProtocolParser, DEFAULT_SOURCE_NAME};

/// The read, parse and emit pipeline.
///
/// The parser is injected so callers (and tests) decide which grammar is
/// used. The converter never looks inside the document it gets back.
#[derive(Debug, Clone)]
pub struct Converter<P> {
    parser: P,
    source_name: String,
    lenient: bool,
    style: JsonStyle,
}

impl<P: ProtocolParser> Converter<P> {
    /// Creates a converter with source name `protocol.pdl`, lenient parsing
    /// and the default JSON style.
    pub fn new(parser: P) -> Self {
        Self {
            parser,
            source_name: DEFAULT_SOURCE_NAME.to_string(),
            lenient: true,
            style: JsonStyle::default(),
        }
    }

    /// Sets the logical source name handed to the parser.
    pub fn with_source_name(mut self, source_name: impl Into<String>) -> Self {
        self.source_name = source_name.into();
        self
    }

    /// Turns lenient parsing on or off.
    pub fn with_lenient(mut self, lenient: bool) -> Self {
        self.lenient = lenient;
        self
    }

    /// Sets the JSON output style.
    pub fn with_style(mut self, style: JsonStyle) -> Self {
        self.style = style;
        self
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn lenient(&self) -> bool {
        self.lenient
    }

    /// Parses `input` with the injected parser.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::Parse`] when the parser rejects the text.
    pub fn parse(&self, input: &str) -> Result<Document, ConvertError<P::Error>> {
        self.parser
            .parse(input, &self.source_name, self.lenient)
            .map_err(|source| ConvertError::Parse {
                source_name: self.source_name.clone(),
                source,
            })
    }

    /// Converts PDL text to JSON text. No trailing newline is appended.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::Parse`] when the parser rejects the text.
    pub fn convert(&self, input: &str) -> Result<String, ConvertError<P::Error>> {
        let document = self.parse(input)?;
        debug!(
            source = %self.source_name,
            domains = document.domain_count(),
            "parsed protocol document"
        );
        json::to_string(&document, self.style).map_err(ConvertError::Serialize)
    }

    /// Reads `reader` to the end, converts, and writes the JSON to `writer`.
    ///
    /// Output is produced in memory first, so nothing reaches `writer` when
    /// reading or parsing fails.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::Read`] when the input cannot be read (including
    /// invalid UTF-8), [`ConvertError::Parse`] when it is rejected, and
    /// [`ConvertError::Write`] when the output cannot be written or flushed.
    pub fn convert_stream<R, W>(
        &self,
        mut reader: R,
        mut writer: W,
    ) -> Result<(), ConvertError<P::Error>>
    where
        R: Read,
        W: Write,
    {
        let mut input = String::new();
        reader
            .read_to_string(&mut input)
            .map_err(ConvertError::Read)?;
        debug!(bytes = input.len(), "read input");

        let output = self.convert(&input)?;

        writer
            .write_all(output.as_bytes())
            .map_err(ConvertError::Write)?;
        writer.flush().map_err(ConvertError::Write)
    }
}
