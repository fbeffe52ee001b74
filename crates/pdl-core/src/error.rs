use std::io;

/// Errors produced by the conversion pipeline.
///
/// `E` is the error type of the injected [`ProtocolParser`](crate::ProtocolParser).
#[derive(Debug, thiserror::Error)]
pub enum ConvertError<E>
where
    E: std::error::Error + 'static,
{
    /// The parser rejected the input.
    #[error("failed to parse {source_name}")]
    Parse {
        source_name: String,
        #[source]
        source: E,
    },

    /// The input could not be read to completion.
    #[error("failed to read input: {0}")]
    Read(#[source] io::Error),

    /// The output could not be written.
    #[error("failed to write output: {0}")]
    Write(#[source] io::Error),

    /// The document could not be serialized.
    #[error("failed to serialize document: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl<E> ConvertError<E>
where
    E: std::error::Error + 'static,
{
    /// True when the failure came from the parser.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    /// True when the failure came from reading or writing.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Read(_) | Self::Write(_))
    }

    /// Returns the parser error, if that is what this is.
    pub fn parse_error(&self) -> Option<&E> {
        match self {
            Self::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;
    use std::fmt;

    use super::*;

    #[derive(Debug)]
    struct Rejected;

    impl fmt::Display for Rejected {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "rejected")
        }
    }

    impl Error for Rejected {}

    #[test]
    fn parse_error_display_and_source() {
        let err = ConvertError::Parse {
            source_name: "protocol.pdl".into(),
            source: Rejected,
        };
        assert!(err.to_string().contains("protocol.pdl"));
        assert!(err.is_parse());
        assert!(!err.is_io());
        assert_eq!(err.source().unwrap().to_string(), "rejected");
        assert!(err.parse_error().is_some());
    }

    #[test]
    fn io_errors_classified() {
        let read: ConvertError<Rejected> =
            ConvertError::Read(io::Error::new(io::ErrorKind::InvalidData, "bad utf-8"));
        let write: ConvertError<Rejected> =
            ConvertError::Write(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
        assert!(read.is_io());
        assert!(write.is_io());
        assert!(read.parse_error().is_none());
        assert!(write.to_string().contains("closed"));
    }
}
