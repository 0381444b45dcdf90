use super::{update_session, update_session_if};
use crate::actions::MediaSessionAction;
use crate::state::{BrowserState, MediaSessionState, TabSessionState};
use std::sync::Arc;

/// Reduce media session state based on MediaSessionAction
///
/// Everything except `Activated` requires an active media session on the tab.
pub fn reduce_media_session(
    state: Arc<BrowserState>,
    action: &MediaSessionAction,
) -> Arc<BrowserState> {
    match action {
        MediaSessionAction::Activated { tab_id } => update_session_if(
            state,
            tab_id,
            |tab| tab.media_session_state.is_none(),
            |tab| {
                tab.media_session_state = Some(MediaSessionState::default());
            },
        ),

        MediaSessionAction::Deactivated { tab_id } => update_session_if(
            state,
            tab_id,
            |tab| tab.media_session_state.is_some(),
            |tab| {
                tab.media_session_state = None;
            },
        ),

        MediaSessionAction::UpdateMetadata { tab_id, metadata } => {
            update_active(state, tab_id, |session| {
                session.metadata = Some(metadata.clone());
            })
        }

        MediaSessionAction::UpdatePlaybackState {
            tab_id,
            playback_state,
        } => update_active(state, tab_id, |session| {
            session.playback_state = *playback_state;
        }),

        MediaSessionAction::UpdateMuted { tab_id, muted } => {
            update_active(state, tab_id, |session| {
                session.muted = *muted;
            })
        }

        MediaSessionAction::UpdateFullscreen { tab_id, fullscreen } => {
            update_active(state, tab_id, |session| {
                session.fullscreen = *fullscreen;
            })
        }
    }
}

fn update_active(
    state: Arc<BrowserState>,
    tab_id: &crate::state::TabId,
    update: impl FnOnce(&mut MediaSessionState),
) -> Arc<BrowserState> {
    let active = |tab: &TabSessionState| tab.media_session_state.is_some();
    if !crate::selectors::find_tab_or_custom_tab(&state, tab_id).is_some_and(active) {
        log::debug!("Ignoring media session update for tab {} without session", tab_id);
        return state;
    }
    update_session(state, tab_id, |tab| {
        if let Some(session) = tab.media_session_state.as_mut() {
            update(session);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::TabId;
    use browser_engine::{MediaMetadata, MediaPlaybackState};
    use pretty_assertions::assert_eq;

    fn state() -> Arc<BrowserState> {
        Arc::new(BrowserState::with_tabs(
            vec![TabSessionState::new("https://a.org").with_id("tab")],
            None,
        ))
    }

    fn tab_id() -> TabId {
        TabId::from("tab")
    }

    #[test]
    fn test_update_without_active_session_is_ignored() {
        let initial = state();
        let reduced = reduce_media_session(
            Arc::clone(&initial),
            &MediaSessionAction::UpdateMuted {
                tab_id: tab_id(),
                muted: true,
            },
        );
        assert!(Arc::ptr_eq(&initial, &reduced));
    }

    #[test]
    fn test_session_lifecycle() {
        let metadata = MediaMetadata {
            title: "Song".to_string(),
            artist: "Artist".to_string(),
            album: String::new(),
        };

        let state = [
            MediaSessionAction::Activated { tab_id: tab_id() },
            MediaSessionAction::UpdatePlaybackState {
                tab_id: tab_id(),
                playback_state: MediaPlaybackState::Playing,
            },
            MediaSessionAction::UpdateMetadata {
                tab_id: tab_id(),
                metadata: metadata.clone(),
            },
            MediaSessionAction::UpdateFullscreen {
                tab_id: tab_id(),
                fullscreen: true,
            },
        ]
        .iter()
        .fold(state(), reduce_media_session);

        assert_eq!(
            state.tabs[&tab_id()].media_session_state,
            Some(MediaSessionState {
                playback_state: MediaPlaybackState::Playing,
                metadata: Some(metadata),
                muted: false,
                fullscreen: true,
            })
        );

        let state = reduce_media_session(
            state,
            &MediaSessionAction::Deactivated { tab_id: tab_id() },
        );
        assert_eq!(state.tabs[&tab_id()].media_session_state, None);
    }

    #[test]
    fn test_activating_twice_keeps_session() {
        let state = reduce_media_session(state(), &MediaSessionAction::Activated { tab_id: tab_id() });
        let state = reduce_media_session(
            state,
            &MediaSessionAction::UpdateMuted {
                tab_id: tab_id(),
                muted: true,
            },
        );
        let again =
            reduce_media_session(Arc::clone(&state), &MediaSessionAction::Activated { tab_id: tab_id() });

        assert!(Arc::ptr_eq(&state, &again));
        assert!(again.tabs[&tab_id()].media_session_state.as_ref().unwrap().muted);
    }
}
