//! Error types for kbl.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for kbl operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for kbl.
#[derive(Error, Debug)]
pub enum Error {
    // Installation errors (10-19)
    #[error("keybase does not appear to be installed: no config file at {}", path.display())]
    NotInstalled { path: PathBuf },

    // Process errors (20-29)
    #[error("keybase is not running")]
    NotRunning,

    #[error("failed to execute {command}: {message}")]
    CommandFailed { command: String, message: String },

    #[error("failed to read {}: {source}", path.display())]
    ProcRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for this error type.
    /// Used for detailed error reporting in JSON output.
    pub fn code(&self) -> u32 {
        match self {
            Error::NotInstalled { .. } => 10,
            Error::NotRunning => 20,
            Error::CommandFailed { .. } => 21,
            Error::ProcRead { .. } => 22,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    /// Whether the caller may reasonably retry later (e.g. once keybase starts).
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::NotRunning)
    }
}
