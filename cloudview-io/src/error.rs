//! Error types for I/O operations

use thiserror::Error;

/// Errors that can occur while loading a point cloud
#[derive(Error, Debug)]
pub enum IoError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Could not read {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}, line {line}: {message}")]
    Malformed {
        path: String,
        line: usize,
        message: String,
    },

    #[error("No records in {path}")]
    Empty { path: String },
}

impl From<IoError> for cloudview_core::Error {
    fn from(e: IoError) -> Self {
        cloudview_core::Error::Load(e.to_string())
    }
}
