//! Browser State
//!
//! An action-driven store holding the state of a browser: tabs, custom tabs,
//! engine bindings, downloads and media.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐  dispatch   ┌──────────────────────────────────────────┐
//! │  callers   │ ──────────► │ lane thread                              │
//! └────────────┘             │   middleware chain ──► reducer ──► publish│
//!       ▲                    └──────────────┬───────────────────────────┘
//!       │ state() / subscribe / watch       │
//!       └───────────────────────────────────┘
//!                                           │ engine calls
//!                                  ┌────────▼────────┐
//!                                  │ EngineMiddleware│◄── engine events
//!                                  └─────────────────┘
//! ```
//!
//! - State is immutable once published. Reducers return a new root and share
//!   every untouched tab through its `Arc`.
//! - All transitions happen on one lane, in the order actions were accepted.
//! - Middleware can transform, swallow, or follow up on actions.
//!
//! # Example
//!
//! ```rust,no_run
//! use browser_state::{BrowserState, Store, TabListAction, TabSessionState};
//!
//! # async fn example() -> Result<(), browser_state::StoreError> {
//! let store = Store::new(BrowserState::default(), Vec::new())?;
//! store
//!     .dispatch(TabListAction::AddTab {
//!         tab: TabSessionState::new("https://www.mozilla.org"),
//!         select: true,
//!     })
//!     .join()
//!     .await?;
//! assert_eq!(store.state().tabs.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod actions;
pub mod dispatcher;
pub mod error;
mod lane;
pub mod middleware;
pub mod reducer;
pub mod reducers;
pub mod selectors;
pub mod state;
pub mod store;
pub mod subscription;

pub use actions::{
    Action, ContentAction, CrashAction, CustomTabListAction, DownloadAction, EngineAction,
    HistoryMetadataAction, LastAccessAction, MediaAction, MediaSessionAction, TabListAction,
    TrackingProtectionAction,
};
pub use dispatcher::{DispatchHandle, Dispatcher};
pub use error::StoreError;
pub use middleware::capture_middleware::{CaptureActionsMiddleware, CapturedActions};
pub use middleware::debounce_middleware::DebounceMiddleware;
pub use middleware::engine_middleware::EngineMiddleware;
pub use middleware::engine_observer::EngineObserver;
pub use middleware::last_access_middleware::LastAccessMiddleware;
pub use middleware::logging::LoggingMiddleware;
pub use middleware::telemetry_middleware::{
    LogTelemetrySink, TelemetryEvent, TelemetryMiddleware, TelemetrySink,
};
pub use middleware::{Middleware, MiddlewareContext, Next};
pub use state::{
    BrowserState, ContentState, CustomTabConfig, DownloadState, DownloadStatus, EngineHandle,
    EngineState, FindResultState, HistoryMetadataKey, MediaSessionState, MediaState,
    ProcessFlags, PromptRequest, TabId, TabSessionState, TrackingProtectionState,
};
pub use store::Store;
pub use subscription::Subscription;
