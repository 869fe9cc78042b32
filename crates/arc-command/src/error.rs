//! Error types for command construction and execution

use thiserror::Error;

/// Unified error type for command construction and execution
#[derive(Error, Debug)]
pub enum Error {
    /// A setter was given a blank or empty value
    #[error("must provide a valid {what}")]
    BlankArgument {
        /// What the caller was expected to provide
        what: &'static str,
    },

    /// A flag candidate did not match the flag grammar
    #[error("`{flag}` is not a valid flag")]
    InvalidFlag {
        /// The rejected flag text, as given
        flag: String,
    },

    /// An insertion position was past the end of the argument list
    #[error("position {position} is out of bounds for {len} arguments")]
    PositionOutOfBounds {
        /// The requested insertion position
        position: usize,
        /// The number of arguments accumulated so far
        len: usize,
    },

    /// `build()` was called before any command name was set
    #[error("must provide a command before building")]
    MissingCommand,

    /// A command spec was constructed from an unusable token sequence
    #[error("command spec has no usable program token")]
    EmptySpec,

    /// Failed to spawn a process
    #[error("failed to spawn process: {reason}")]
    SpawnFailed {
        /// The reason for the spawn failure
        reason: String,
    },

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a blank-argument error
    pub fn blank(what: &'static str) -> Self {
        Self::BlankArgument { what }
    }

    /// Create a spawn failed error
    pub fn spawn_failed(reason: impl Into<String>) -> Self {
        Self::SpawnFailed {
            reason: reason.into(),
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
