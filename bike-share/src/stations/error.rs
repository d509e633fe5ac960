//! Station data error types.

use std::path::PathBuf;

/// Errors that can occur when loading station data.
#[derive(Debug, thiserror::Error)]
pub enum StationError {
    /// Dataset could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Dataset is not the expected JSON document
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// A station row does not have the expected columns
    #[error("malformed station row {row}: {reason}")]
    Row { row: usize, reason: &'static str },
}
