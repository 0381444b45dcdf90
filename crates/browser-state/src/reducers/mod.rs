//! Reducers, one per action family
//!
//! Every reducer takes the current snapshot by `Arc` and returns either the
//! same `Arc` (nothing changed) or a new root produced with `Arc::make_mut`,
//! which copies only the root and the tabs that were touched.

use crate::state::{BrowserState, TabId, TabSessionState};
use std::sync::Arc;

pub mod content_reducer;
pub mod crash_reducer;
pub mod custom_tab_list_reducer;
pub mod download_reducer;
pub mod engine_reducer;
pub mod history_metadata_reducer;
pub mod last_access_reducer;
pub mod media_reducer;
pub mod media_session_reducer;
pub mod tab_list_reducer;
pub mod tracking_protection_reducer;

/// Apply `update` to the tab or custom tab `tab_id`
///
/// Unknown ids, and updates leaving the tab equal, return `state` as is.
pub(crate) fn update_session(
    mut state: Arc<BrowserState>,
    tab_id: &TabId,
    update: impl FnOnce(&mut TabSessionState),
) -> Arc<BrowserState> {
    let Some(current) = crate::selectors::find_tab_or_custom_tab(&state, tab_id) else {
        log::debug!("Ignoring update for unknown tab {}", tab_id);
        return state;
    };
    let mut updated = current.clone();
    update(&mut updated);
    if updated == *current {
        return state;
    }
    if let Some(tab) = Arc::make_mut(&mut state).session_mut(tab_id) {
        *tab = updated;
    }
    state
}

/// Like [`update_session`], but only when `guard` accepts the current tab
pub(crate) fn update_session_if(
    state: Arc<BrowserState>,
    tab_id: &TabId,
    guard: impl FnOnce(&TabSessionState) -> bool,
    update: impl FnOnce(&mut TabSessionState),
) -> Arc<BrowserState> {
    let accepted = crate::selectors::find_tab_or_custom_tab(&state, tab_id).is_some_and(guard);
    if !accepted {
        return state;
    }
    update_session(state, tab_id, update)
}

/// Drop download back references to sessions that no longer exist
pub(crate) fn clear_download_owners(state: &mut BrowserState) {
    let orphaned: Vec<String> = state
        .downloads
        .values()
        .filter(|download| {
            download
                .session_id
                .as_ref()
                .is_some_and(|id| !state.contains_session(id))
        })
        .map(|download| download.id.clone())
        .collect();

    for id in orphaned {
        if let Some(download) = state.downloads.get_mut(&id) {
            download.session_id = None;
        }
    }
}

/// Drop media entries of sessions that no longer exist
pub(crate) fn clear_orphaned_media(state: &mut BrowserState) {
    let orphaned: Vec<TabId> = state
        .media
        .elements
        .keys()
        .filter(|id| !state.contains_session(id))
        .cloned()
        .collect();

    for id in orphaned {
        state.media.elements.remove(&id);
    }
}
