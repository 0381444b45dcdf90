//! Headless engine
//!
//! An engine without a rendering backend. Navigations succeed immediately and
//! produce the same event sequence a real engine reports for a fast page
//! load. Every call is recorded so callers can assert on what the engine was
//! asked to do.

use crate::error::EngineError;
use crate::event::EngineEvent;
use crate::session::{Engine, EngineSession, LoadUrlFlags, SessionObserver};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A call received by a [`HeadlessSession`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    LoadUrl { url: String, flags: LoadUrlFlags },
    StopLoading,
    Reload { flags: LoadUrlFlags },
    GoBack,
    GoForward,
    UpdateTrackingProtection { enabled: bool },
    Close,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Engine creating [`HeadlessSession`]s
#[derive(Default)]
pub struct HeadlessEngine {
    sessions: Mutex<Vec<Arc<HeadlessSession>>>,
}

impl HeadlessEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// All sessions created so far, in creation order (closed ones included)
    pub fn sessions(&self) -> Vec<Arc<HeadlessSession>> {
        lock(&self.sessions).clone()
    }

    /// Sessions that have not been closed yet
    pub fn open_sessions(&self) -> Vec<Arc<HeadlessSession>> {
        lock(&self.sessions)
            .iter()
            .filter(|s| !s.is_closed())
            .cloned()
            .collect()
    }
}

impl Engine for HeadlessEngine {
    fn name(&self) -> &str {
        "headless"
    }

    fn create_session(&self, private: bool) -> Arc<dyn EngineSession> {
        let session = Arc::new(HeadlessSession::new(private));
        lock(&self.sessions).push(Arc::clone(&session));
        log::debug!(
            "HeadlessEngine: created {} session",
            if private { "private" } else { "normal" }
        );
        session
    }
}

#[derive(Default)]
struct History {
    entries: Vec<String>,
    index: usize,
}

impl History {
    fn current(&self) -> Option<&String> {
        self.entries.get(self.index)
    }

    fn can_go_back(&self) -> bool {
        !self.entries.is_empty() && self.index > 0
    }

    fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    fn push(&mut self, url: &str) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.index + 1);
        }
        self.entries.push(url.to_string());
        self.index = self.entries.len() - 1;
    }
}

/// Session of the [`HeadlessEngine`]
pub struct HeadlessSession {
    private: bool,
    observers: Mutex<Vec<Arc<dyn SessionObserver>>>,
    calls: Mutex<Vec<EngineCall>>,
    history: Mutex<History>,
    tracking_protection: AtomicBool,
    closed: AtomicBool,
}

impl HeadlessSession {
    pub fn new(private: bool) -> Self {
        Self {
            private,
            observers: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            history: Mutex::new(History::default()),
            tracking_protection: AtomicBool::new(false),
            closed: AtomicBool::new(false),
        }
    }

    pub fn is_private(&self) -> bool {
        self.private
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn tracking_protection_enabled(&self) -> bool {
        self.tracking_protection.load(Ordering::SeqCst)
    }

    /// Calls received so far, oldest first
    pub fn calls(&self) -> Vec<EngineCall> {
        lock(&self.calls).clone()
    }

    pub fn observer_count(&self) -> usize {
        lock(&self.observers).len()
    }

    /// URL of the current history entry
    pub fn current_url(&self) -> Option<String> {
        lock(&self.history).current().cloned()
    }

    /// Report an event to all registered observers
    ///
    /// Tests use this to simulate callbacks a real engine would make.
    pub fn emit(&self, event: EngineEvent) {
        let observers = lock(&self.observers).clone();
        for observer in observers {
            observer.on_event(event.clone());
        }
    }

    fn record(&self, call: EngineCall) {
        lock(&self.calls).push(call);
    }

    fn ensure_open(&self) -> Result<(), EngineError> {
        if self.is_closed() {
            Err(EngineError::SessionClosed)
        } else {
            Ok(())
        }
    }

    fn navigate(&self, url: &str) {
        let (can_go_back, can_go_forward) = {
            let history = lock(&self.history);
            (history.can_go_back(), history.can_go_forward())
        };

        self.emit(EngineEvent::LoadingStateChanged { loading: true });
        self.emit(EngineEvent::LocationChanged {
            url: url.to_string(),
        });
        self.emit(EngineEvent::ProgressChanged { progress: 100 });
        self.emit(EngineEvent::TitleChanged {
            title: url.to_string(),
        });
        self.emit(EngineEvent::NavigationStateChanged {
            can_go_back,
            can_go_forward,
        });
        self.emit(EngineEvent::LoadingStateChanged { loading: false });
    }
}

#[async_trait]
impl EngineSession for HeadlessSession {
    async fn load_url(&self, url: &str, flags: LoadUrlFlags) -> Result<(), EngineError> {
        self.ensure_open()?;
        self.record(EngineCall::LoadUrl {
            url: url.to_string(),
            flags,
        });

        if url.trim().is_empty() {
            return Err(EngineError::NavigationFailed {
                url: url.to_string(),
                reason: "empty URL".to_string(),
            });
        }

        lock(&self.history).push(url);
        self.navigate(url);
        Ok(())
    }

    async fn stop_loading(&self) -> Result<(), EngineError> {
        self.ensure_open()?;
        self.record(EngineCall::StopLoading);
        self.emit(EngineEvent::LoadingStateChanged { loading: false });
        Ok(())
    }

    async fn reload(&self, flags: LoadUrlFlags) -> Result<(), EngineError> {
        self.ensure_open()?;
        self.record(EngineCall::Reload { flags });
        let current = lock(&self.history).current().cloned();
        if let Some(url) = current {
            self.navigate(&url);
        }
        Ok(())
    }

    async fn go_back(&self) -> Result<(), EngineError> {
        self.ensure_open()?;
        self.record(EngineCall::GoBack);
        let url = {
            let mut history = lock(&self.history);
            if !history.can_go_back() {
                return Err(EngineError::NoHistoryEntry("back"));
            }
            history.index -= 1;
            history.current().cloned()
        };
        if let Some(url) = url {
            self.navigate(&url);
        }
        Ok(())
    }

    async fn go_forward(&self) -> Result<(), EngineError> {
        self.ensure_open()?;
        self.record(EngineCall::GoForward);
        let url = {
            let mut history = lock(&self.history);
            if !history.can_go_forward() {
                return Err(EngineError::NoHistoryEntry("forward"));
            }
            history.index += 1;
            history.current().cloned()
        };
        if let Some(url) = url {
            self.navigate(&url);
        }
        Ok(())
    }

    async fn update_tracking_protection(&self, enabled: bool) -> Result<(), EngineError> {
        self.ensure_open()?;
        self.record(EngineCall::UpdateTrackingProtection { enabled });
        self.tracking_protection.store(enabled, Ordering::SeqCst);
        Ok(())
    }

    fn register(&self, observer: Arc<dyn SessionObserver>) {
        lock(&self.observers).push(observer);
    }

    fn unregister_observers(&self) {
        lock(&self.observers).clear();
    }

    async fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        self.record(EngineCall::Close);
        self.unregister_observers();
    }
}
