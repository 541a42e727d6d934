//! Error types for cloudview

use thiserror::Error;

/// Main error type for cloudview operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The point cloud file is missing, unreadable or malformed
    #[error("Load error: {0}")]
    Load(String),

    /// An operation needs state that is not there yet, e.g. a render with no data
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// A renderer was compiled without its supporting library
    #[error("Dependency unavailable: {0}")]
    DependencyUnavailable(String),

    #[error("Visualization error: {0}")]
    Visualization(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type alias for cloudview operations
pub type Result<T> = std::result::Result<T, Error>;
