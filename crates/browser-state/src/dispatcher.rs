//! Dispatcher for middleware action dispatch
//!
//! Middleware and engine observers use the Dispatcher to feed follow-up actions
//! back into the store. Dispatched actions are queued behind the action that is
//! currently being processed and go through the full middleware chain, they
//! are never reduced re-entrantly.
//!
//! A Dispatcher does not keep the store alive: once every [`Store`] clone is
//! gone, dispatching logs an error and the returned handle reports
//! [`StoreError::LaneClosed`].
//!
//! [`Store`]: crate::Store

use crate::actions::Action;
use crate::error::StoreError;
use crate::store::StoreCore;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

/// An action on its way to the lane, with the sender resolving its handle
pub(crate) struct Envelope {
    pub action: Action,
    pub completion: Option<oneshot::Sender<()>>,
}

/// Put an action on the lane; `false` when the lane is gone
pub(crate) fn enqueue(
    sender: &mpsc::UnboundedSender<Envelope>,
    core: &StoreCore,
    action: Action,
    completion: Option<oneshot::Sender<()>>,
) -> bool {
    core.begin_action();
    match sender.send(Envelope { action, completion }) {
        Ok(()) => true,
        Err(e) => {
            core.finish_action();
            log::error!("Dispatcher: failed to send {}: lane closed", e.0.action.name());
            false
        }
    }
}

/// Enqueue an action and hand out the handle resolving once it was processed
pub(crate) fn dispatch_with_handle(
    sender: &mpsc::UnboundedSender<Envelope>,
    core: &StoreCore,
    action: Action,
) -> DispatchHandle {
    let (tx, rx) = oneshot::channel();
    if enqueue(sender, core, action, Some(tx)) {
        DispatchHandle::pending(rx)
    } else {
        DispatchHandle::closed()
    }
}

/// Dispatcher for sending actions through the middleware chain
#[derive(Clone)]
pub struct Dispatcher {
    sender: mpsc::WeakUnboundedSender<Envelope>,
    core: Arc<StoreCore>,
}

impl Dispatcher {
    pub(crate) fn new(sender: mpsc::WeakUnboundedSender<Envelope>, core: Arc<StoreCore>) -> Self {
        Self { sender, core }
    }

    /// Dispatch an action to be processed through the middleware chain
    ///
    /// Awaiting the handle from inside middleware blocks the lane it is
    /// waiting on; middleware should only await handles in spawned tasks.
    pub fn dispatch(&self, action: impl Into<Action>) -> DispatchHandle {
        let action = action.into();
        match self.sender.upgrade() {
            Some(sender) => dispatch_with_handle(&sender, &self.core, action),
            None => {
                log::error!("Dispatcher: failed to send {}: lane closed", action.name());
                DispatchHandle::closed()
            }
        }
    }

    /// Dispatch without tracking completion
    pub fn send(&self, action: impl Into<Action>) {
        let action = action.into();
        match self.sender.upgrade() {
            Some(sender) => {
                enqueue(&sender, &self.core, action, None);
            }
            None => log::error!("Dispatcher: failed to send {}: lane closed", action.name()),
        }
    }
}

/// Completion handle returned by every dispatch
///
/// Resolves once the action went through the whole middleware chain, the
/// resulting state was published, and subscribers were notified. Dropping the
/// handle does not cancel processing.
#[derive(Debug)]
pub struct DispatchHandle {
    completion: Option<oneshot::Receiver<()>>,
}

impl DispatchHandle {
    fn pending(completion: oneshot::Receiver<()>) -> Self {
        Self {
            completion: Some(completion),
        }
    }

    fn closed() -> Self {
        Self { completion: None }
    }

    /// Wait for the action to be processed
    pub async fn join(self) -> Result<(), StoreError> {
        match self.completion {
            Some(completion) => completion.await.map_err(|_| StoreError::CompletionDropped),
            None => Err(StoreError::LaneClosed),
        }
    }

    /// Blocking variant of [`join`](Self::join)
    ///
    /// Panics when called from within an async runtime, like
    /// `tokio::sync::oneshot::Receiver::blocking_recv`.
    pub fn wait(self) -> Result<(), StoreError> {
        match self.completion {
            Some(completion) => completion
                .blocking_recv()
                .map_err(|_| StoreError::CompletionDropped),
            None => Err(StoreError::LaneClosed),
        }
    }
}
