use crate::actions::Action;
use crate::reducers::{
    content_reducer, crash_reducer, custom_tab_list_reducer, download_reducer, engine_reducer,
    history_metadata_reducer, last_access_reducer, media_reducer, media_session_reducer,
    tab_list_reducer, tracking_protection_reducer,
};
use crate::state::BrowserState;
use std::sync::Arc;

/// Reducer - pure function that produces new state from current state + action
///
/// This is the root reducer that hands each action to the reducer of its
/// family. Actions that change nothing return the very same `Arc`, so callers
/// can detect no-ops with `Arc::ptr_eq`.
pub fn reduce(state: Arc<BrowserState>, action: &Action) -> Arc<BrowserState> {
    match action {
        Action::TabList(action) => tab_list_reducer::reduce_tab_list(state, action),
        Action::CustomTabList(action) => {
            custom_tab_list_reducer::reduce_custom_tab_list(state, action)
        }
        Action::Content(action) => content_reducer::reduce_content(state, action),
        Action::Engine(action) => engine_reducer::reduce_engine(state, action),
        Action::TrackingProtection(action) => {
            tracking_protection_reducer::reduce_tracking_protection(state, action)
        }
        Action::Media(action) => media_reducer::reduce_media(state, action),
        Action::MediaSession(action) => media_session_reducer::reduce_media_session(state, action),
        Action::Download(action) => download_reducer::reduce_download(state, action),
        Action::Crash(action) => crash_reducer::reduce_crash(state, action),
        Action::LastAccess(action) => last_access_reducer::reduce_last_access(state, action),
        Action::HistoryMetadata(action) => {
            history_metadata_reducer::reduce_history_metadata(state, action)
        }
        // Unknown actions pass through untouched
        Action::Unknown(_) => state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{ContentAction, TabListAction};
    use crate::state::{TabId, TabSessionState};

    #[test]
    fn test_unknown_action_preserves_identity() {
        let state = Arc::new(BrowserState::with_tabs(
            vec![TabSessionState::new("https://a.org")],
            None,
        ));

        let reduced = reduce(Arc::clone(&state), &Action::Unknown("Ping".to_string()));

        assert!(Arc::ptr_eq(&state, &reduced));
    }

    #[test]
    fn test_action_for_missing_tab_preserves_identity() {
        let state = Arc::new(BrowserState::default());

        let reduced = reduce(
            Arc::clone(&state),
            &Action::Content(ContentAction::UpdateTitle {
                tab_id: TabId::from("missing"),
                title: "Title".to_string(),
            }),
        );

        assert!(Arc::ptr_eq(&state, &reduced));
    }

    #[test]
    fn test_repeated_update_preserves_identity() {
        let state = Arc::new(BrowserState::with_tabs(
            vec![TabSessionState::new("https://a.org").with_id("a")],
            None,
        ));
        let action = Action::Content(ContentAction::UpdateProgress {
            tab_id: TabId::from("a"),
            progress: 30,
        });

        let once = reduce(Arc::clone(&state), &action);
        let twice = reduce(Arc::clone(&once), &action);

        assert!(!Arc::ptr_eq(&state, &once));
        assert!(Arc::ptr_eq(&once, &twice));
    }

    #[test]
    fn test_reduction_shares_untouched_tabs() {
        let a = TabSessionState::new("https://a.org");
        let b = TabSessionState::new("https://b.org");
        let (a_id, b_id) = (a.id.clone(), b.id.clone());
        let state = Arc::new(BrowserState::with_tabs(vec![a, b], None));

        let reduced = reduce(
            Arc::clone(&state),
            &Action::Content(ContentAction::UpdateTitle {
                tab_id: a_id.clone(),
                title: "A".to_string(),
            }),
        );

        assert!(!Arc::ptr_eq(&state, &reduced));
        assert!(Arc::ptr_eq(&state.tabs[&b_id], &reduced.tabs[&b_id]));
        assert!(!Arc::ptr_eq(&state.tabs[&a_id], &reduced.tabs[&a_id]));
        assert_eq!(state.tabs[&a_id].content.title, "");
    }

    #[test]
    fn test_fold_is_deterministic() {
        let tab = TabSessionState::new("https://a.org").with_id("a");
        let actions = vec![
            Action::TabList(TabListAction::AddTab {
                tab: tab.clone(),
                select: false,
            }),
            Action::Content(ContentAction::UpdateProgress {
                tab_id: TabId::from("a"),
                progress: 40,
            }),
            Action::TabList(TabListAction::AddTab {
                tab: TabSessionState::new("https://b.org").with_id("b"),
                select: true,
            }),
        ];

        let first = actions
            .iter()
            .fold(Arc::new(BrowserState::default()), |state, action| {
                reduce(state, action)
            });
        let second = actions
            .iter()
            .fold(Arc::new(BrowserState::default()), |state, action| {
                reduce(state, action)
            });

        assert_eq!(first, second);
        assert_eq!(first.selected_tab_id, Some(TabId::from("b")));
    }
}
