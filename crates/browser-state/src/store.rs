//! Store - holds browser state and runs the dispatch/reduce/notify loop
//!
//! ```text
//!   dispatch ──► channel ──► lane thread ──► middleware ──► reducer
//!                                                              │
//!   state() ◄── RwLock<Arc<BrowserState>> ◄── publish ◄────────┘
//!                                               │
//!                              subscribers + watch receivers
//! ```
//!
//! The lock around the snapshot is held only to swap or clone the `Arc`, so
//! readers never wait for the lane.

use crate::actions::Action;
use crate::dispatcher::{dispatch_with_handle, DispatchHandle, Dispatcher, Envelope};
use crate::error::StoreError;
use crate::lane::spawn_lane;
use crate::middleware::{panic_message, Middleware, MiddlewareContext};
use crate::reducer::reduce;
use crate::state::BrowserState;
use crate::subscription::{SubscriberRegistry, Subscription};
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use tokio::sync::{mpsc, oneshot, watch};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// State shared between the store handles and the lane
pub(crate) struct StoreCore {
    state: RwLock<Arc<BrowserState>>,
    subscribers: Arc<SubscriberRegistry>,
    watch: watch::Sender<Arc<BrowserState>>,
    /// Actions enqueued but not yet fully processed
    pending: AtomicUsize,
    idle_waiters: Mutex<Vec<oneshot::Sender<()>>>,
}

impl StoreCore {
    fn new(initial_state: BrowserState) -> Self {
        let initial_state = Arc::new(initial_state);
        let (watch, _) = watch::channel(Arc::clone(&initial_state));
        Self {
            state: RwLock::new(initial_state),
            subscribers: Arc::new(SubscriberRegistry::default()),
            watch,
            pending: AtomicUsize::new(0),
            idle_waiters: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn state(&self) -> Arc<BrowserState> {
        Arc::clone(&self.state.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Reduce `action` and publish the result if anything changed
    pub(crate) fn apply(&self, action: Action) {
        let current = self.state();
        let reduced =
            panic::catch_unwind(AssertUnwindSafe(|| reduce(Arc::clone(&current), &action)));

        let mut next = match reduced {
            Ok(next) => next,
            Err(panic) => {
                log::error!(
                    "Reducer panicked on {}, state left unchanged: {}",
                    action.name(),
                    panic_message(panic.as_ref())
                );
                return;
            }
        };

        if Arc::ptr_eq(&current, &next) {
            return;
        }

        Arc::make_mut(&mut next).version = current.version + 1;
        self.publish(next);
    }

    fn publish(&self, next: Arc<BrowserState>) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = Arc::clone(&next);
        self.watch.send_replace(Arc::clone(&next));
        self.subscribers.notify(&next);
    }

    pub(crate) fn begin_action(&self) {
        self.pending.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn finish_action(&self) {
        if self.pending.fetch_sub(1, Ordering::SeqCst) != 1 {
            return;
        }
        let mut waiters = lock(&self.idle_waiters);
        if self.pending.load(Ordering::SeqCst) == 0 {
            for waiter in waiters.drain(..) {
                let _ = waiter.send(());
            }
        }
    }

    /// `None` when nothing is pending
    fn idle_waiter(&self) -> Option<oneshot::Receiver<()>> {
        let mut waiters = lock(&self.idle_waiters);
        if self.pending.load(Ordering::SeqCst) == 0 {
            return None;
        }
        let (tx, rx) = oneshot::channel();
        waiters.push(tx);
        Some(rx)
    }
}

struct StoreInner {
    sender: mpsc::UnboundedSender<Envelope>,
    core: Arc<StoreCore>,
}

/// Store - single source of truth for browser state
///
/// Cloning is cheap; all clones share the same lane. The lane stops once the
/// last clone is dropped.
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

impl Store {
    /// Create a store and start its lane
    ///
    /// Middleware order is fixed here and is the order in which every action
    /// passes through them.
    pub fn new(
        initial_state: BrowserState,
        middleware: Vec<Box<dyn Middleware>>,
    ) -> Result<Self, StoreError> {
        let core = Arc::new(StoreCore::new(initial_state));
        let (sender, receiver) = mpsc::unbounded_channel();
        let dispatcher = Dispatcher::new(sender.downgrade(), Arc::clone(&core));
        let ctx = MiddlewareContext::new(Arc::clone(&core), dispatcher);

        spawn_lane(receiver, ctx, middleware)?;

        Ok(Self {
            inner: Arc::new(StoreInner { sender, core }),
        })
    }

    /// Enqueue an action
    ///
    /// Actions dispatched from one thread are processed in call order.
    pub fn dispatch(&self, action: impl Into<Action>) -> DispatchHandle {
        dispatch_with_handle(&self.inner.sender, &self.inner.core, action.into())
    }

    /// A dispatcher that does not keep the store alive
    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher::new(self.inner.sender.downgrade(), Arc::clone(&self.inner.core))
    }

    /// Latest published snapshot
    pub fn state(&self) -> Arc<BrowserState> {
        self.inner.core.state()
    }

    /// Call `callback` with the current state now and after every change
    ///
    /// Callbacks run on the store lane and must not block on it.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&BrowserState) + Send + 'static,
    {
        let core = Arc::clone(&self.inner.core);
        self.inner
            .core
            .subscribers
            .register(Box::new(callback), move || core.state())
    }

    /// Call `callback` with the selected value now and whenever it changes
    ///
    /// Changes to state outside of what `selector` extracts do not wake the
    /// callback.
    pub fn subscribe_to<T, S, F>(&self, selector: S, mut callback: F) -> Subscription
    where
        T: PartialEq + Send + 'static,
        S: Fn(&BrowserState) -> T + Send + 'static,
        F: FnMut(&T) + Send + 'static,
    {
        let mut last: Option<T> = None;
        self.subscribe(move |state| {
            let selected = selector(state);
            if last.as_ref() != Some(&selected) {
                callback(&selected);
                last = Some(selected);
            }
        })
    }

    /// Receiver of every published snapshot, for async consumers
    pub fn watch(&self) -> watch::Receiver<Arc<BrowserState>> {
        self.inner.core.watch.subscribe()
    }

    /// Wait until every action enqueued so far, and every action they
    /// dispatched in turn, has been processed
    pub async fn wait_until_idle(&self) {
        if let Some(idle) = self.inner.core.idle_waiter() {
            let _ = idle.await;
        }
    }

    /// Number of registered subscribers
    pub fn subscriber_count(&self) -> usize {
        self.inner.core.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{ContentAction, TabListAction};
    use crate::state::{TabId, TabSessionState};
    use std::sync::Mutex;

    fn store() -> Store {
        Store::new(BrowserState::default(), Vec::new()).unwrap()
    }

    fn add_tab(id: &str, url: &str) -> TabListAction {
        TabListAction::AddTab {
            tab: TabSessionState::new(url).with_id(id),
            select: false,
        }
    }

    #[tokio::test]
    async fn test_dispatch_publishes_new_version() {
        let store = store();
        assert_eq!(store.state().version, 0);

        store
            .dispatch(add_tab("a", "https://mozilla.org"))
            .join()
            .await
            .unwrap();

        let state = store.state();
        assert_eq!(state.version, 1);
        assert_eq!(state.selected_tab_id, Some(TabId::from("a")));
    }

    #[tokio::test]
    async fn test_no_op_keeps_snapshot() {
        let store = store();
        let before = store.state();

        store
            .dispatch(Action::Unknown("Ping".to_string()))
            .join()
            .await
            .unwrap();

        assert!(Arc::ptr_eq(&before, &store.state()));
    }

    #[tokio::test]
    async fn test_subscribe_to_ignores_unrelated_changes() {
        let store = store();
        store
            .dispatch(add_tab("a", "https://mozilla.org"))
            .join()
            .await
            .unwrap();

        let titles = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&titles);
        let _subscription = store.subscribe_to(
            |state| {
                state
                    .tabs
                    .get(&TabId::from("a"))
                    .map(|tab| tab.content.title.clone())
            },
            move |title: &Option<String>| seen.lock().unwrap().push(title.clone()),
        );

        store.dispatch(ContentAction::UpdateProgress {
            tab_id: TabId::from("a"),
            progress: 50,
        });
        store
            .dispatch(ContentAction::UpdateTitle {
                tab_id: TabId::from("a"),
                title: "Mozilla".to_string(),
            })
            .join()
            .await
            .unwrap();

        assert_eq!(
            *titles.lock().unwrap(),
            vec![Some(String::new()), Some("Mozilla".to_string())]
        );
    }

    #[tokio::test]
    async fn test_watch_receives_published_state() {
        let store = store();
        let mut receiver = store.watch();

        store.dispatch(add_tab("a", "https://mozilla.org"));
        receiver.changed().await.unwrap();

        assert_eq!(receiver.borrow().tabs.len(), 1);
    }

    #[tokio::test]
    async fn test_wait_until_idle() {
        let store = store();
        for i in 0..10 {
            store.dispatch(add_tab(&format!("tab-{i}"), "https://mozilla.org"));
        }

        store.wait_until_idle().await;

        assert_eq!(store.state().tabs.len(), 10);
    }

    #[tokio::test]
    async fn test_dispatch_after_store_dropped() {
        let store = store();
        let dispatcher = store.dispatcher();
        drop(store);

        let result = dispatcher.dispatch(Action::Unknown("Late".to_string())).join().await;

        assert!(matches!(result, Err(StoreError::LaneClosed)));
    }
}
