//! Error types for the channel

use thiserror::Error;

/// Error a listener may return to signal that it could not handle an event
pub type ListenerError = Box<dyn std::error::Error + Send + Sync>;

/// Outcome of a single listener invocation
pub type ListenerResult = std::result::Result<(), ListenerError>;

/// Errors that can occur while dispatching events
#[derive(Debug, Error)]
pub enum ChannelError {
    /// A listener failed and dispatch was aborted
    #[error("Listener for '{kind}' failed: {source}")]
    Listener {
        kind: String,
        #[source]
        source: ListenerError,
    },
}

/// Result type for channel operations
pub type Result<T> = std::result::Result<T, ChannelError>;
