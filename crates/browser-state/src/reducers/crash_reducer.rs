use super::update_session_if;
use crate::actions::CrashAction;
use crate::state::BrowserState;
use std::sync::Arc;

/// Reduce crash state based on CrashAction
pub fn reduce_crash(state: Arc<BrowserState>, action: &CrashAction) -> Arc<BrowserState> {
    match action {
        CrashAction::SessionCrashed { tab_id } => update_session_if(
            state,
            tab_id,
            |tab| !tab.engine_state.crashed,
            |tab| {
                tab.engine_state.crashed = true;
                tab.content.loading = false;
            },
        ),
        CrashAction::RestoreCrashedSession { tab_id } => update_session_if(
            state,
            tab_id,
            |tab| tab.engine_state.crashed,
            |tab| {
                tab.engine_state.crashed = false;
                // The crashed session is closed by the engine binding
                tab.engine_state.engine_session = None;
            },
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{EngineHandle, TabId, TabSessionState};
    use browser_engine::HeadlessSession;

    #[test]
    fn test_crash_and_restore() {
        let mut tab = TabSessionState::new("https://a.org").with_id("tab");
        tab.engine_state.engine_session =
            Some(EngineHandle::new(Arc::new(HeadlessSession::new(false))));
        let state = Arc::new(BrowserState::with_tabs(vec![tab], None));
        let tab_id = TabId::from("tab");

        let state = reduce_crash(
            state,
            &CrashAction::SessionCrashed {
                tab_id: tab_id.clone(),
            },
        );
        assert!(state.tabs[&tab_id].engine_state.crashed);

        let state = reduce_crash(
            state,
            &CrashAction::RestoreCrashedSession {
                tab_id: tab_id.clone(),
            },
        );
        assert!(!state.tabs[&tab_id].engine_state.crashed);
        assert_eq!(state.tabs[&tab_id].engine_state.engine_session, None);
    }

    #[test]
    fn test_restore_of_healthy_tab_preserves_identity() {
        let state = Arc::new(BrowserState::with_tabs(
            vec![TabSessionState::new("https://a.org").with_id("tab")],
            None,
        ));
        let reduced = reduce_crash(
            Arc::clone(&state),
            &CrashAction::RestoreCrashedSession {
                tab_id: TabId::from("tab"),
            },
        );
        assert!(Arc::ptr_eq(&state, &reduced));
    }
}
