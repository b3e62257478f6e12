use std::fmt;

/// Errors an [`EntitySink`](crate::EntitySink) may return.
///
/// `NotFound` is the only variant callers act on: a merge that hits it is
/// followed by a create. Everything else abandons the entity for this pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    /// The entity does not exist in the broker.
    NotFound,
    /// Network failure or request deadline exceeded.
    Transport(String),
    /// Any other non-success HTTP status.
    Status { code: u16, body: String },
    /// Document could not be serialized.
    Encode(String),
}

impl SinkError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, SinkError::NotFound)
    }
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkError::NotFound => write!(f, "entity not found"),
            SinkError::Transport(msg) => write!(f, "transport error: {msg}"),
            SinkError::Status { code, body } if body.is_empty() => {
                write!(f, "context broker returned status {code}")
            }
            SinkError::Status { code, body } => {
                write!(f, "context broker returned status {code}: {body}")
            }
            SinkError::Encode(msg) => write!(f, "encode error: {msg}"),
        }
    }
}

impl std::error::Error for SinkError {}
