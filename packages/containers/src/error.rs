//! Error taxonomy for the container layer.
//!
//! Adapters translate recognized store conditions into these variants and
//! let everything else through as [`Error::Command`], unchanged. No retries
//! happen at this layer.

use keyspace_command::CommandError;

/// Container-level errors.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An index, field or member lookup found nothing and no default
    /// applied.
    #[error("no such entry: {0}")]
    NotFound(String),

    /// A pop-style operation ran against an empty collection.
    #[error("collection is empty")]
    Empty,

    /// The store rejected a command for argument reasons, or a value could
    /// not be interpreted as the adapter requires.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// `put` on a queue whose advisory capacity check reported full.
    #[error("queue is full")]
    QueueFull,

    /// `get` on a queue that stayed empty past the wait.
    #[error("queue is empty")]
    QueueEmpty,

    /// Unrecognized store-level failure, propagated verbatim.
    #[error(transparent)]
    Command(#[from] CommandError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_entry() {
        let e = Error::NotFound("list index 7".to_string());
        assert!(format!("{}", e).contains("list index 7"));
    }

    #[test]
    fn command_errors_pass_through() {
        let inner = CommandError::Response {
            message: "some unrecognized condition".to_string(),
        };
        let e: Error = inner.into();
        assert!(format!("{}", e).contains("some unrecognized condition"));
    }
}
