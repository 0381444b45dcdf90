//! Engine actions
//!
//! `LinkEngineSession` and `UnlinkEngineSession` change state. All other
//! variants are requests handled by the engine binding middleware and leave
//! state untouched when they reach the reducer.

use crate::state::{EngineHandle, TabId};
use browser_engine::LoadUrlFlags;

#[derive(Debug, Clone, strum::IntoStaticStr)]
pub enum EngineAction {
    /// Create an engine session for the tab if it has none
    CreateEngineSession { tab_id: TabId },
    /// Attach a created session to the tab
    LinkEngineSession {
        tab_id: TabId,
        engine_session: EngineHandle,
    },
    /// Detach the tab's session
    UnlinkEngineSession { tab_id: TabId },
    /// Close the tab's session to free resources; it is recreated on demand
    SuspendEngineSession { tab_id: TabId },
    LoadUrl {
        tab_id: TabId,
        url: String,
        flags: LoadUrlFlags,
    },
    StopLoading { tab_id: TabId },
    Reload { tab_id: TabId, flags: LoadUrlFlags },
    GoBack { tab_id: TabId },
    GoForward { tab_id: TabId },
}

impl EngineAction {
    pub fn tab_id(&self) -> &TabId {
        match self {
            Self::CreateEngineSession { tab_id }
            | Self::LinkEngineSession { tab_id, .. }
            | Self::UnlinkEngineSession { tab_id }
            | Self::SuspendEngineSession { tab_id }
            | Self::LoadUrl { tab_id, .. }
            | Self::StopLoading { tab_id }
            | Self::Reload { tab_id, .. }
            | Self::GoBack { tab_id }
            | Self::GoForward { tab_id } => tab_id,
        }
    }
}
