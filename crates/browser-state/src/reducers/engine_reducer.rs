//! Engine Reducer
//!
//! Linking, unlinking and suspending change state. The imperative engine
//! requests are carried out by the engine binding middleware before they reach
//! this point.

use super::update_session_if;
use crate::actions::EngineAction;
use crate::state::BrowserState;
use std::sync::Arc;

/// Reduce engine binding state based on EngineAction
pub fn reduce_engine(state: Arc<BrowserState>, action: &EngineAction) -> Arc<BrowserState> {
    match action {
        EngineAction::LinkEngineSession {
            tab_id,
            engine_session,
        } => update_session_if(
            state,
            tab_id,
            |tab| tab.engine_state.engine_session.as_ref() != Some(engine_session),
            |tab| {
                tab.engine_state.engine_session = Some(engine_session.clone());
            },
        ),

        EngineAction::UnlinkEngineSession { tab_id }
        | EngineAction::SuspendEngineSession { tab_id } => update_session_if(
            state,
            tab_id,
            |tab| tab.engine_state.engine_session.is_some(),
            |tab| {
                tab.engine_state.engine_session = None;
            },
        ),

        EngineAction::CreateEngineSession { .. }
        | EngineAction::LoadUrl { .. }
        | EngineAction::StopLoading { .. }
        | EngineAction::Reload { .. }
        | EngineAction::GoBack { .. }
        | EngineAction::GoForward { .. } => state,
    }
}
