//! Error types for GitHub operations

use thiserror::Error;

/// Result type for GitHub operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during GitHub operations
#[derive(Error, Debug)]
pub enum Error {
    /// The tracker's command-line tool is missing or broken
    #[error("{tool} is not installed or not runnable: {reason}\n  hint: install it from https://cli.github.com/")]
    ToolUnavailable { tool: String, reason: String },

    /// The tracker refused our credentials
    #[error("Not authenticated with GitHub: {0}\n  hint: run 'gh auth login'")]
    NotAuthenticated(String),

    /// An external command exited unsuccessfully
    #[error("`{command}` failed ({status}): {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from the core crate
    #[error(transparent)]
    Core(#[from] storyport_core::Error),
}

impl Error {
    /// Whether this error should stop the run before any parsing
    pub fn is_preflight(&self) -> bool {
        matches!(
            self,
            Error::ToolUnavailable { .. }
                | Error::NotAuthenticated(_)
                | Error::Core(storyport_core::Error::SourceNotFound(_))
        )
    }
}
