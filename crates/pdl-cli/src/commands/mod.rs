pub mod check;
pub mod completions;
pub mod convert;
pub mod typescript;

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::error::CliError;

/// Display name used for standard input in messages.
pub const STDIN_NAME: &str = "<stdin>";

/// Display name used for standard output in messages.
pub const STDOUT_NAME: &str = "<stdout>";

/// Reads `path`, or stdin when it is absent or `-`.
///
/// Returns the text and the name to show in diagnostics.
pub fn read_input(path: Option<&Path>) -> Result<(String, String), CliError> {
    match path {
        Some(path) if path != Path::new("-") => {
            let text = std::fs::read_to_string(path).map_err(|e| CliError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;
            Ok((text, path.display().to_string()))
        }
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|e| CliError::Io {
                    path: PathBuf::from(STDIN_NAME),
                    source: e,
                })?;
            Ok((text, STDIN_NAME.to_string()))
        }
    }
}

/// Writes `text` to `path`, or to stdout when it is absent.
///
/// Nothing is appended to `text`.
pub fn write_output(path: Option<&Path>, text: &str) -> Result<(), CliError> {
    match path {
        Some(path) => std::fs::write(path, text).map_err(|e| CliError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(|e| CliError::Io {
                    path: PathBuf::from(STDOUT_NAME),
                    source: e,
                })
        }
    }
}
