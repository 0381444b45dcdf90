//! Media Reducer
//!
//! Media elements are kept per tab in `BrowserState::media`. A tab whose last
//! element goes away loses its entry.

use crate::actions::MediaAction;
use crate::state::{BrowserState, TabId};
use browser_engine::MediaElement;
use std::sync::Arc;

/// Reduce media state based on MediaAction
pub fn reduce_media(mut state: Arc<BrowserState>, action: &MediaAction) -> Arc<BrowserState> {
    match action {
        MediaAction::AddMediaElement { tab_id, element } => {
            if !state.contains_session(tab_id) {
                log::debug!("Ignoring media element for unknown tab {}", tab_id);
                return state;
            }
            let elements = Arc::make_mut(&mut state)
                .media
                .elements
                .entry(tab_id.clone())
                .or_default();
            match elements.iter_mut().find(|e| e.id == element.id) {
                Some(existing) => *existing = element.clone(),
                None => elements.push(element.clone()),
            }
            state
        }

        MediaAction::RemoveMediaElement { tab_id, element_id } => {
            if find_element(&state, tab_id, element_id).is_none() {
                return state;
            }
            let s = Arc::make_mut(&mut state);
            if let Some(elements) = s.media.elements.get_mut(tab_id) {
                elements.retain(|element| &element.id != element_id);
                if elements.is_empty() {
                    s.media.elements.remove(tab_id);
                }
            }
            state
        }

        MediaAction::UpdateMediaElementState {
            tab_id,
            element_id,
            state: playback_state,
        } => {
            match find_element(&state, tab_id, element_id) {
                Some(element) if element.state != *playback_state => {}
                _ => return state,
            }
            if let Some(element) = Arc::make_mut(&mut state)
                .media
                .elements
                .get_mut(tab_id)
                .and_then(|elements| elements.iter_mut().find(|e| &e.id == element_id))
            {
                element.state = *playback_state;
            }
            state
        }

        MediaAction::RemoveTabMedia { tab_id } => {
            if !state.media.elements.contains_key(tab_id) {
                return state;
            }
            Arc::make_mut(&mut state).media.elements.remove(tab_id);
            state
        }
    }
}

fn find_element<'a>(
    state: &'a BrowserState,
    tab_id: &TabId,
    element_id: &str,
) -> Option<&'a MediaElement> {
    state
        .media
        .elements
        .get(tab_id)?
        .iter()
        .find(|element| element.id == element_id)
}
