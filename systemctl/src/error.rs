//! Error types for the service controller.

use thiserror::Error;

/// Result type alias for service controller operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Exit code for usage errors.
pub const EXIT_USAGE: i32 = 2;

/// Errors that can occur while translating a systemctl command line.
#[derive(Error, Debug)]
pub enum Error {
    /// Only flags were given
    #[error("no command specified")]
    NoCommand,

    /// A command that operates on services got none
    #[error("service name required")]
    MissingTargets { command: String },

    /// The command is not in the dispatch table
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// Writing to stdout/stderr failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error is the caller's fault.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            Error::NoCommand | Error::MissingTargets { .. } | Error::UnknownCommand(_)
        )
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        if self.is_usage() {
            EXIT_USAGE
        } else {
            1
        }
    }
}
