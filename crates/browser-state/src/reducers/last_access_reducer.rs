use super::update_session;
use crate::actions::LastAccessAction;
use crate::state::BrowserState;
use std::sync::Arc;

/// Reduce last access timestamps based on LastAccessAction
pub fn reduce_last_access(state: Arc<BrowserState>, action: &LastAccessAction) -> Arc<BrowserState> {
    match action {
        LastAccessAction::UpdateLastAccess {
            tab_id,
            last_access,
        } => update_session(state, tab_id, |tab| {
            tab.last_access = *last_access;
        }),
    }
}
