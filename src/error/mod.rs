//! Error types and handling infrastructure for the SMS/MMS conversion pipeline

use std::path::PathBuf;

/// Fatal errors for a conversion run
///
/// Everything not covered here is non-fatal by design: missing attributes
/// fall back to documented defaults, empty address lists resolve to
/// `"unknown"`, and group messages are skipped rather than reported.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("input file not found or unreadable: {path}")]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed XML: {message} (byte offset {position})")]
    MalformedXml { message: String, position: u64 },

    #[error("failed to write output: {path}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConvertError {
    pub fn input_not_found(path: PathBuf, source: std::io::Error) -> Self {
        Self::InputNotFound { path, source }
    }

    pub fn malformed_xml(message: String, position: u64) -> Self {
        Self::MalformedXml { message, position }
    }

    pub fn output_write(path: PathBuf, source: std::io::Error) -> Self {
        Self::OutputWrite { path, source }
    }

    /// Create a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::InputNotFound { path, source } => {
                format!("Cannot read input file {}: {}", path.display(), source)
            }
            Self::MalformedXml { message, position } => {
                format!(
                    "Input is not well-formed XML at byte {}: {}",
                    position, message
                )
            }
            Self::OutputWrite { path, source } => {
                format!("Cannot write output file {}: {}", path.display(), source)
            }
        }
    }
}

/// Result type for conversion operations
pub type ConvertResult<T> = Result<T, ConvertError>;
