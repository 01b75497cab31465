//! Error types for process execution.

use thiserror::Error;

/// Result type alias for execution operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while running a forwarded tool.
#[derive(Error, Debug)]
pub enum Error {
    /// The program could not be started
    #[error("Failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The program started but waiting on it failed
    #[error("Failed to wait for {program}: {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Writing dry-run output failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
