//! Engine binding state

use browser_engine::EngineSession;
use std::fmt;
use std::sync::Arc;

/// Opaque reference to an engine session bound to a tab
///
/// The session is owned by the engine binding middleware; the state only
/// carries the handle so middleware can find it again. Two handles are equal
/// when they point at the same session.
#[derive(Clone)]
pub struct EngineHandle(Arc<dyn EngineSession>);

impl EngineHandle {
    pub fn new(session: Arc<dyn EngineSession>) -> Self {
        Self(session)
    }

    pub fn session(&self) -> &Arc<dyn EngineSession> {
        &self.0
    }
}

impl PartialEq for EngineHandle {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }
}

impl Eq for EngineHandle {}

impl fmt::Debug for EngineHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EngineHandle({:p})", Arc::as_ptr(&self.0))
    }
}

/// Engine binding of a tab
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineState {
    /// `None` until the engine binding middleware created a session
    pub engine_session: Option<EngineHandle>,
    /// The content process of this tab crashed and was not restored yet
    pub crashed: bool,
}
