//! Engine and engine session traits
//!
//! These traits are the whole contract between the store and a rendering
//! engine. Concrete engines implement them directly; there is no shared base
//! type to inherit behavior from.

use crate::error::EngineError;
use crate::event::EngineEvent;
use async_trait::async_trait;
use bitflags::bitflags;
use std::sync::Arc;

bitflags! {
    /// Flags altering how a URL is loaded
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct LoadUrlFlags: u32 {
        /// The load was triggered by another application
        const EXTERNAL = 1 << 0;
        /// Allow popups opened by the loaded page
        const ALLOW_POPUPS = 1 << 1;
        /// Skip the network cache
        const BYPASS_CACHE = 1 << 2;
        /// Skip the configured proxy
        const BYPASS_PROXY = 1 << 3;
        /// Skip content classification (tracking protection lists)
        const BYPASS_CLASSIFIER = 1 << 4;
    }
}

/// Receives every event reported by an engine session
///
/// Implementations must not block: engines may call `on_event` from their
/// own threads.
pub trait SessionObserver: Send + Sync {
    fn on_event(&self, event: EngineEvent);
}

/// A rendering engine able to create sessions
pub trait Engine: Send + Sync {
    /// Human readable engine name, used in logs
    fn name(&self) -> &str;

    /// Create a new session. Private sessions must not share storage with
    /// normal ones.
    fn create_session(&self, private: bool) -> Arc<dyn EngineSession>;
}

/// One browsing session inside the engine, bound to a single tab
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; the engine binding middleware
/// calls them from tasks spawned on its runtime.
#[async_trait]
pub trait EngineSession: Send + Sync {
    /// Start loading `url`
    async fn load_url(&self, url: &str, flags: LoadUrlFlags) -> Result<(), EngineError>;

    /// Stop the current load
    async fn stop_loading(&self) -> Result<(), EngineError>;

    /// Reload the current page
    async fn reload(&self, flags: LoadUrlFlags) -> Result<(), EngineError>;

    /// Navigate back in history
    async fn go_back(&self) -> Result<(), EngineError>;

    /// Navigate forward in history
    async fn go_forward(&self) -> Result<(), EngineError>;

    /// Enable or disable tracking protection for this session
    async fn update_tracking_protection(&self, enabled: bool) -> Result<(), EngineError>;

    /// Register an observer receiving this session's events
    fn register(&self, observer: Arc<dyn SessionObserver>);

    /// Drop all registered observers
    fn unregister_observers(&self);

    /// Release all engine resources held by this session
    async fn close(&self);
}
