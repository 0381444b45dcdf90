use thiserror::Error;

/// Errors reported by an engine session
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    /// The session was closed and can no longer be used
    #[error("engine session is closed")]
    SessionClosed,

    /// The engine refused or failed to navigate
    #[error("failed to load {url}: {reason}")]
    NavigationFailed { url: String, reason: String },

    /// There is no history entry to move to
    #[error("no history entry to navigate {0}")]
    NoHistoryEntry(&'static str),

    /// The engine does not implement this operation
    #[error("operation not supported by engine: {0}")]
    Unsupported(&'static str),
}
