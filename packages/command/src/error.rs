//! Error type for the command layer.
//!
//! Errors here are the store client's: transport failures and command
//! rejections reported by the server. Semantic errors like "index out of
//! range means the list element does not exist" belong one layer up.

/// Errors reported by a store client executing primitive commands.
#[derive(Debug)]
pub enum CommandError {
    /// Generic I/O or transport failure.
    ///
    /// Use this for network errors, broken connections, IPC failures, etc.
    Transport(Box<dyn std::error::Error + Send + Sync>),

    /// The key holds a value of a different structure kind than the
    /// command expects (e.g. a list command against a hash key).
    WrongType { key: String },

    /// The server rejected the command.
    ///
    /// The message is the server's condition text, verbatim. Higher layers
    /// translate recognized conditions and propagate the rest unchanged.
    Response { message: String },
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::Transport(e) => write!(f, "transport error: {}", e),
            CommandError::WrongType { key } => {
                write!(f, "wrong structure kind at key '{}'", key)
            }
            CommandError::Response { message } => write!(f, "command rejected: {}", message),
        }
    }
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CommandError::Transport(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CommandError {
    fn from(e: std::io::Error) -> Self {
        CommandError::Transport(Box::new(e))
    }
}
