//! Rendering engine capabilities consumed by the browser state store
//!
//! The store never talks to a rendering engine directly. Instead the engine
//! binding middleware calls into the small capability set defined here, and
//! the engine reports back through a single tagged [`EngineEvent`] stream.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ Engine trait                                 │
//! │  - create_session(private)                   │
//! └──────────────────────────────────────────────┘
//!                        │ creates
//!                        ▼
//! ┌──────────────────────────────────────────────┐
//! │ EngineSession trait (one per tab)            │
//! │  - load_url / stop / reload / back / forward │
//! │  - register(SessionObserver)                 │
//! │  - close                                     │
//! └──────────────────────────────────────────────┘
//!                        │ reports
//!                        ▼
//!                 EngineEvent enum
//! ```
//!
//! [`HeadlessEngine`] is an in-process implementation with no rendering
//! backend. It records the calls it receives and synthesizes the event
//! sequence of a successful navigation, which makes it useful for tests and
//! for driving the store without a real engine.

pub mod error;
pub mod event;
pub mod headless;
pub mod session;

pub use error::EngineError;
pub use event::{
    EngineEvent, ExternalResource, MediaElement, MediaMetadata, MediaPlaybackState,
    PermissionRequest, SecurityInfo, Tracker,
};
pub use headless::{EngineCall, HeadlessEngine, HeadlessSession};
pub use session::{Engine, EngineSession, LoadUrlFlags, SessionObserver};
