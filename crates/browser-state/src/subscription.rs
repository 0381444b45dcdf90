//! Subscriptions
//!
//! Subscribers are called on the store lane after each published change, in
//! registration order. Each subscriber sees a strictly increasing sequence of
//! state versions, also when its initial call on registration races with the
//! lane.

use crate::state::BrowserState;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

pub(crate) type Callback = Box<dyn FnMut(&BrowserState) + Send>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

struct Subscriber {
    id: u64,
    active: AtomicBool,
    inner: Mutex<SubscriberInner>,
}

struct SubscriberInner {
    callback: Callback,
    last_version: Option<u64>,
}

impl Subscriber {
    fn deliver(&self, state: &BrowserState) {
        let mut inner = lock(&self.inner);
        if !self.active.load(Ordering::Acquire) {
            return;
        }
        if inner
            .last_version
            .is_some_and(|version| state.version <= version)
        {
            return;
        }
        inner.last_version = Some(state.version);

        let callback = &mut inner.callback;
        if let Err(panic) = panic::catch_unwind(AssertUnwindSafe(|| callback(state))) {
            log::warn!(
                "Subscriber {} panicked: {}",
                self.id,
                crate::middleware::panic_message(panic.as_ref())
            );
        }
    }
}

/// Registered subscribers of one store
#[derive(Default)]
pub(crate) struct SubscriberRegistry {
    next_id: AtomicU64,
    subscribers: Mutex<Vec<Arc<Subscriber>>>,
}

impl SubscriberRegistry {
    /// Register `callback` and call it once with `current`
    pub fn register(
        self: &Arc<Self>,
        callback: Callback,
        current: impl FnOnce() -> Arc<BrowserState>,
    ) -> Subscription {
        let subscriber = Arc::new(Subscriber {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            active: AtomicBool::new(true),
            inner: Mutex::new(SubscriberInner {
                callback,
                last_version: None,
            }),
        });
        lock(&self.subscribers).push(Arc::clone(&subscriber));

        // Registered before reading, so no published version is missed
        subscriber.deliver(&current());

        Subscription {
            id: subscriber.id,
            registry: Arc::downgrade(self),
        }
    }

    /// Call every active subscriber with a freshly published state
    pub fn notify(&self, state: &BrowserState) {
        let subscribers = lock(&self.subscribers).clone();
        for subscriber in subscribers {
            subscriber.deliver(state);
        }
    }

    pub fn len(&self) -> usize {
        lock(&self.subscribers).len()
    }

    fn remove(&self, id: u64) {
        let mut subscribers = lock(&self.subscribers);
        if let Some(index) = subscribers.iter().position(|s| s.id == id) {
            let subscriber = subscribers.remove(index);
            subscriber.active.store(false, Ordering::Release);
        }
    }
}

/// A registered subscriber
///
/// The subscriber stays registered until [`unsubscribe`](Self::unsubscribe)
/// is called or the subscription is dropped.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    registry: Weak<SubscriberRegistry>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        // Drop does the work
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn versioned(version: u64) -> Arc<BrowserState> {
        Arc::new(BrowserState {
            version,
            ..BrowserState::default()
        })
    }

    fn recording(seen: &Arc<Mutex<Vec<u64>>>) -> Callback {
        let seen = Arc::clone(seen);
        Box::new(move |state| seen.lock().unwrap().push(state.version))
    }

    #[test]
    fn test_register_delivers_current_state() {
        let registry = Arc::new(SubscriberRegistry::default());
        let seen = Arc::new(Mutex::new(Vec::new()));

        let _subscription = registry.register(recording(&seen), || versioned(3));

        assert_eq!(*seen.lock().unwrap(), vec![3]);
    }

    #[test]
    fn test_stale_versions_are_skipped() {
        let registry = Arc::new(SubscriberRegistry::default());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let _subscription = registry.register(recording(&seen), || versioned(1));

        registry.notify(&versioned(2));
        registry.notify(&versioned(2));
        registry.notify(&versioned(1));
        registry.notify(&versioned(4));

        assert_eq!(*seen.lock().unwrap(), vec![1, 2, 4]);
    }

    #[test]
    fn test_unsubscribe_and_drop() {
        let registry = Arc::new(SubscriberRegistry::default());
        let seen = Arc::new(Mutex::new(Vec::new()));

        let first = registry.register(recording(&seen), || versioned(0));
        {
            let _second = registry.register(recording(&seen), || versioned(0));
            assert_eq!(registry.len(), 2);
        }
        assert_eq!(registry.len(), 1);

        first.unsubscribe();
        assert_eq!(registry.len(), 0);

        registry.notify(&versioned(1));
        assert_eq!(*seen.lock().unwrap(), vec![0, 0]);
    }

    #[test]
    fn test_panicking_subscriber_does_not_stop_others() {
        let registry = Arc::new(SubscriberRegistry::default());
        let seen = Arc::new(Mutex::new(Vec::new()));

        let _panicking = registry.register(
            Box::new(|state| {
                if state.version > 0 {
                    panic!("subscriber failure");
                }
            }),
            || versioned(0),
        );
        let _recording = registry.register(recording(&seen), || versioned(0));

        registry.notify(&versioned(1));
        registry.notify(&versioned(2));

        assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2]);
    }
}
