use std::path::PathBuf;

use pdl_core::ConvertError;
use pdl_dsl::{DslError, ParseErrors};

use crate::commands::STDOUT_NAME;

/// Exit codes for the CLI process.
///
/// - 0: success
/// - 1: general error (I/O)
/// - 2: invalid arguments / configuration
/// - 3: parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    InvalidArguments = 2,
    ParseError = 3,
}

/// Errors returned by CLI command handlers.
///
/// Each variant maps to an `ExitCode` and can produce structured
/// output in JSON mode.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The input was rejected by the parser.
    #[error("failed to parse {file}")]
    Parse {
        errors: Vec<DslError>,
        source_text: String,
        file: String,
    },

    /// One or more files failed `check`; their errors were already reported.
    #[error("{failed} of {total} files failed to parse")]
    CheckFailed { failed: usize, total: usize },

    /// The document parsed but does not have the shape of a protocol.
    #[error("{file} is not a protocol document: {message}")]
    InvalidProtocol { file: String, message: String },

    /// IO errors (file not found, permission denied, closed pipe).
    #[error("IO error for {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Configuration errors.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// A `check` path matched no .pdl files.
    #[error("no .pdl files found in {path}")]
    NoProtocolFiles { path: PathBuf },

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl CliError {
    /// Wraps a converter failure, keeping the source text for diagnostics.
    pub fn from_convert(
        err: ConvertError<ParseErrors>,
        source_text: String,
        file: &str,
    ) -> Self {
        match err {
            ConvertError::Parse { source, .. } => Self::Parse {
                errors: source.into_vec(),
                source_text,
                file: file.to_string(),
            },
            ConvertError::Read(source) => Self::Io {
                path: PathBuf::from(file),
                source,
            },
            ConvertError::Write(source) => Self::Io {
                path: PathBuf::from(STDOUT_NAME),
                source,
            },
            other => Self::Other(other.to_string()),
        }
    }

    /// Maps this error to the appropriate exit code.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Parse { .. } | Self::CheckFailed { .. } | Self::InvalidProtocol { .. } => {
                ExitCode::ParseError
            }
            Self::Config { .. } | Self::NoProtocolFiles { .. } => ExitCode::InvalidArguments,
            Self::Io { .. } | Self::Other(_) => ExitCode::GeneralError,
        }
    }

    /// Serializes this error as a JSON value for `--format json` output.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Parse { errors, file, .. } => {
                let error_list: Vec<serde_json::Value> = errors
                    .iter()
                    .map(|e| {
                        serde_json::json!({
                            "line": e.line(),
                            "start": e.span().start,
                            "end": e.span().end,
                            "message": e.to_string(),
                        })
                    })
                    .collect();
                serde_json::json!({
                    "error": "parse_error",
                    "file": file,
                    "errors": error_list,
                })
            }
            Self::CheckFailed { failed, total } => serde_json::json!({
                "error": "check_failed",
                "failed": failed,
                "total": total,
            }),
            Self::InvalidProtocol { file, message } => serde_json::json!({
                "error": "invalid_protocol",
                "file": file,
                "message": message,
            }),
            Self::Io { path, source } => serde_json::json!({
                "error": "io_error",
                "path": path.display().to_string(),
                "message": source.to_string(),
            }),
            Self::Config { message } => serde_json::json!({
                "error": "config_error",
                "message": message,
            }),
            other => serde_json::json!({
                "error": "error",
                "message": other.to_string(),
            }),
        }
    }
}
