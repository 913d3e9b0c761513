//! Error types for twoda-core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or exporting a 2DA table
///
/// The first four variants are the decode failures. All of them are terminal
/// for a load: no partially decoded table is ever handed out.
#[derive(Debug, Error)]
pub enum Error {
    /// The stream does not start with the `2DA ` signature
    #[error("not a 2DA file (signature {})", show_tag(.found))]
    InvalidFormat { found: [u8; 4] },

    /// The signature matched but the version tag is neither `V2.0` nor `V2.b`
    #[error("unsupported 2DA version {}", show_tag(.found))]
    UnsupportedVersion { found: [u8; 4] },

    /// A binary cell offset points past the end of the stream
    #[error("seek to offset {offset} is outside the stream (length {len})")]
    Seek { offset: u64, len: u64 },

    /// The underlying stream reported an error during the decode pass
    #[error("read error while decoding 2DA: {message}")]
    StreamRead {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Failed to open or read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV error from the csv crate while exporting
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn truncated(message: impl Into<String>) -> Self {
        Error::StreamRead {
            message: message.into(),
            source: None,
        }
    }
}

fn show_tag(tag: &[u8; 4]) -> String {
    format!("{:?}", String::from_utf8_lossy(tag))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_display() {
        let err = Error::InvalidFormat { found: *b"BADF" };
        assert_eq!(err.to_string(), "not a 2DA file (signature \"BADF\")");

        let err = Error::UnsupportedVersion { found: *b"V3.0" };
        assert_eq!(err.to_string(), "unsupported 2DA version \"V3.0\"");
    }
}
