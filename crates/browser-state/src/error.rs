use thiserror::Error;

/// Errors surfaced by [`DispatchHandle`](crate::DispatchHandle)
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store was dropped before the action could be enqueued
    #[error("store lane is closed")]
    LaneClosed,

    /// The lane stopped before it finished processing the action
    #[error("store lane stopped before the action completed")]
    CompletionDropped,

    /// The lane thread could not be started
    #[error("failed to start store lane: {0}")]
    Spawn(#[from] std::io::Error),
}
