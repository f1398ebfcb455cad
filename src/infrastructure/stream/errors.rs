use thiserror::Error;

/// Errors that end a streamed query.
///
/// Malformed lines and payloads are never errors; they are skipped.
#[derive(Debug, Error)]
pub enum StreamError {
    /// The service emitted an explicit `error` event.
    #[error("stream error: {message}")]
    Remote { message: String },

    /// Reading the next line from the transport failed.
    #[error("stream transport failed: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StreamError {
    pub(crate) fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Box::new(err))
    }

    /// Server-provided message for [`StreamError::Remote`].
    pub fn remote_message(&self) -> Option<&str> {
        match self {
            Self::Remote { message } => Some(message),
            Self::Transport(_) => None,
        }
    }
}
