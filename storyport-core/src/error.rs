//! Error types for storyport

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for storyport operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for storyport operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The stories document does not exist
    #[error("Stories file not found at {}", .0.display())]
    SourceNotFound(PathBuf),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}
