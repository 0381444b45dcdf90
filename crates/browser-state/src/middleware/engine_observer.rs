//! Engine Observer
//!
//! Bridges the callbacks of one engine session into store actions scoped to
//! the tab the session belongs to. The observer only dispatches; all state
//! changes happen in the reducers once the actions reach the lane.

use crate::actions::{
    Action, ContentAction, CrashAction, MediaAction, MediaSessionAction, TrackingProtectionAction,
};
use crate::dispatcher::Dispatcher;
use crate::state::{DownloadState, FindResultState, TabId};
use browser_engine::{EngineEvent, SessionObserver};

/// Observer registered on the engine session of a single tab
pub struct EngineObserver {
    tab_id: TabId,
    dispatcher: Dispatcher,
}

impl EngineObserver {
    pub fn new(tab_id: TabId, dispatcher: Dispatcher) -> Self {
        Self { tab_id, dispatcher }
    }
}

impl SessionObserver for EngineObserver {
    fn on_event(&self, event: EngineEvent) {
        for action in actions_for_event(&self.tab_id, event) {
            self.dispatcher.send(action);
        }
    }
}

/// Actions describing `event` for the tab `tab_id`
pub fn actions_for_event(tab_id: &TabId, event: EngineEvent) -> Vec<Action> {
    let tab_id = tab_id.clone();
    match event {
        // Navigation
        EngineEvent::LocationChanged { url } => {
            vec![ContentAction::UpdateUrl { tab_id, url }.into()]
        }
        EngineEvent::TitleChanged { title } => {
            vec![ContentAction::UpdateTitle { tab_id, title }.into()]
        }
        EngineEvent::ProgressChanged { progress } => {
            vec![ContentAction::UpdateProgress { tab_id, progress }.into()]
        }
        EngineEvent::LoadingStateChanged { loading } => {
            vec![ContentAction::UpdateLoadingState { tab_id, loading }.into()]
        }
        EngineEvent::NavigationStateChanged {
            can_go_back,
            can_go_forward,
        } => vec![
            ContentAction::UpdateBackNavigationState {
                tab_id: tab_id.clone(),
                can_go_back,
            }
            .into(),
            ContentAction::UpdateForwardNavigationState {
                tab_id,
                can_go_forward,
            }
            .into(),
        ],
        EngineEvent::SecurityChanged(security_info) => vec![ContentAction::UpdateSecurityInfo {
            tab_id,
            security_info,
        }
        .into()],
        EngineEvent::RepostPromptCancelled => vec![ContentAction::UpdateRefreshCanceledState {
            tab_id,
            refresh_canceled: true,
        }
        .into()],
        EngineEvent::FullscreenChanged { enabled } => vec![ContentAction::FullScreenChanged {
            tab_id,
            fullscreen: enabled,
        }
        .into()],

        // Content blocking
        EngineEvent::TrackerBlocked(tracker) => {
            vec![TrackingProtectionAction::TrackerBlocked { tab_id, tracker }.into()]
        }
        EngineEvent::TrackerLoaded(tracker) => {
            vec![TrackingProtectionAction::TrackerLoaded { tab_id, tracker }.into()]
        }
        EngineEvent::ExcludedOnTrackingProtectionChanged { excluded } => {
            vec![TrackingProtectionAction::ToggleExclusionList { tab_id, excluded }.into()]
        }

        // Find in page: a new search drops the results of the previous one
        EngineEvent::FindStarted { .. } => {
            vec![ContentAction::ClearFindResults { tab_id }.into()]
        }
        EngineEvent::FindResult {
            active_match_ordinal,
            number_of_matches,
            is_done_counting,
        } => vec![ContentAction::AddFindResult {
            tab_id,
            find_result: FindResultState::new(
                active_match_ordinal,
                number_of_matches,
                is_done_counting,
            ),
        }
        .into()],

        EngineEvent::PermissionRequested(request) => {
            vec![ContentAction::UpdatePermissionsRequest { tab_id, request }.into()]
        }

        // Media
        EngineEvent::MediaAdded(element) => {
            vec![MediaAction::AddMediaElement { tab_id, element }.into()]
        }
        EngineEvent::MediaRemoved { id } => vec![MediaAction::RemoveMediaElement {
            tab_id,
            element_id: id,
        }
        .into()],
        EngineEvent::MediaStateChanged { id, state } => {
            vec![MediaAction::UpdateMediaElementState {
                tab_id,
                element_id: id,
                state,
            }
            .into()]
        }
        EngineEvent::MediaSessionActivated => {
            vec![MediaSessionAction::Activated { tab_id }.into()]
        }
        EngineEvent::MediaSessionDeactivated => {
            vec![MediaSessionAction::Deactivated { tab_id }.into()]
        }
        EngineEvent::MediaSessionMetadataChanged(metadata) => {
            vec![MediaSessionAction::UpdateMetadata { tab_id, metadata }.into()]
        }
        EngineEvent::MediaSessionPlaybackStateChanged(playback_state) => {
            vec![MediaSessionAction::UpdatePlaybackState {
                tab_id,
                playback_state,
            }
            .into()]
        }
        EngineEvent::MediaSessionMuteChanged { muted } => {
            vec![MediaSessionAction::UpdateMuted { tab_id, muted }.into()]
        }
        EngineEvent::MediaSessionFullscreenChanged { fullscreen } => {
            vec![MediaSessionAction::UpdateFullscreen { tab_id, fullscreen }.into()]
        }

        EngineEvent::DownloadRequested(resource) => {
            let download = DownloadState::from_external(resource, tab_id.clone());
            vec![ContentAction::UpdateDownload { tab_id, download }.into()]
        }

        EngineEvent::Crashed => vec![CrashAction::SessionCrashed { tab_id }.into()],
    }
}
