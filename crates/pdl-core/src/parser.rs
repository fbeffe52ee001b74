use crate::document::Document;

/// Source name handed to the parser when the caller does not choose one.
pub const DEFAULT_SOURCE_NAME: &str = "protocol.pdl";

/// A capability that turns protocol description text into a [`Document`].
///
/// `source_name` is only used in diagnostics and to pick an input format.
/// `lenient` asks the parser to tolerate the irregularities it knows how to
/// recover from instead of rejecting or reporting them verbatim.
pub trait ProtocolParser {
    /// Error returned when the text is rejected.
    type Error: std::error::Error + 'static;

    /// Parses `text` into a document.
    fn parse(&self, text: &str, source_name: &str, lenient: bool)
        -> Result<Document, Self::Error>;
}

impl<P: ProtocolParser + ?Sized> ProtocolParser for &P {
    type Error = P::Error;

    fn parse(
        &self,
        text: &str,
        source_name: &str,
        lenient: bool,
    ) -> Result<Document, Self::Error> {
        (**self).parse(text, source_name, lenient)
    }
}
