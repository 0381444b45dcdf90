//! Selectors
//!
//! Pure read-only queries over a [`BrowserState`] snapshot. Every selector is a
//! function of its arguments only and walks each collection at most once.

use crate::state::{BrowserState, DownloadState, EngineHandle, TabId, TabSessionState};
use browser_engine::MediaElement;

/// Find a regular tab by id
pub fn find_tab<'a>(state: &'a BrowserState, tab_id: &TabId) -> Option<&'a TabSessionState> {
    state.tabs.get(tab_id).map(|tab| tab.as_ref())
}

/// Find a custom tab by id
pub fn find_custom_tab<'a>(
    state: &'a BrowserState,
    tab_id: &TabId,
) -> Option<&'a TabSessionState> {
    state
        .custom_tabs
        .iter()
        .find(|tab| &tab.id == tab_id)
        .map(|tab| tab.as_ref())
}

/// Find a regular tab or custom tab by id
pub fn find_tab_or_custom_tab<'a>(
    state: &'a BrowserState,
    tab_id: &TabId,
) -> Option<&'a TabSessionState> {
    find_tab(state, tab_id).or_else(|| find_custom_tab(state, tab_id))
}

/// The selected tab, if any
pub fn selected_tab(state: &BrowserState) -> Option<&TabSessionState> {
    state
        .selected_tab_id
        .as_ref()
        .and_then(|id| find_tab(state, id))
}

/// All regular tabs in display order
pub fn tabs_in_order(state: &BrowserState) -> impl Iterator<Item = &TabSessionState> {
    state
        .tab_order
        .iter()
        .filter_map(|id| state.tabs.get(id))
        .map(|tab| tab.as_ref())
}

/// Tabs in display order matching `predicate`
pub fn filter_tabs<'a>(
    state: &'a BrowserState,
    predicate: impl Fn(&TabSessionState) -> bool,
) -> Vec<&'a TabSessionState> {
    tabs_in_order(state).filter(|tab| predicate(*tab)).collect()
}

pub fn normal_tabs(state: &BrowserState) -> Vec<&TabSessionState> {
    filter_tabs(state, |tab| !tab.is_private())
}

pub fn private_tabs(state: &BrowserState) -> Vec<&TabSessionState> {
    filter_tabs(state, |tab| tab.is_private())
}

pub fn tab_count(state: &BrowserState) -> usize {
    state.tabs.len()
}

pub fn normal_tab_count(state: &BrowserState) -> usize {
    state.tabs.values().filter(|tab| !tab.is_private()).count()
}

pub fn private_tab_count(state: &BrowserState) -> usize {
    state.tabs.values().filter(|tab| tab.is_private()).count()
}

/// Tabs of the given privacy currently showing `url`, in display order
pub fn find_normal_or_private_tabs_by_url<'a>(
    state: &'a BrowserState,
    url: &str,
    private: bool,
) -> Vec<&'a TabSessionState> {
    tabs_in_order(state)
        .filter(|tab| tab.is_private() == private && tab.content.url == url)
        .collect()
}

/// Downloads started from `tab_id`, in no particular order
pub fn downloads_for_tab<'a>(state: &'a BrowserState, tab_id: &TabId) -> Vec<&'a DownloadState> {
    state
        .downloads
        .values()
        .filter(|download| download.session_id.as_ref() == Some(tab_id))
        .collect()
}

/// Media elements of `tab_id`; empty for tabs without media
pub fn media_for_tab<'a>(state: &'a BrowserState, tab_id: &TabId) -> &'a [MediaElement] {
    state
        .media
        .elements
        .get(tab_id)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Reverse lookup of the tab or custom tab bound to `engine_session`
pub fn find_tab_by_engine_session<'a>(
    state: &'a BrowserState,
    engine_session: &EngineHandle,
) -> Option<&'a TabSessionState> {
    let bound = |tab: &&'a TabSessionState| {
        tab.engine_state.engine_session.as_ref() == Some(engine_session)
    };
    state
        .tabs
        .values()
        .map(|tab| tab.as_ref())
        .find(bound)
        .or_else(|| state.custom_tabs.iter().map(|tab| tab.as_ref()).find(bound))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CustomTabConfig, EngineState};
    use browser_engine::{HeadlessSession, MediaPlaybackState};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn state() -> BrowserState {
        let mut state = BrowserState::with_tabs(
            vec![
                TabSessionState::new("https://www.mozilla.org").with_id("a"),
                TabSessionState::private("https://www.mozilla.org").with_id("b"),
                TabSessionState::new("https://getpocket.com").with_id("c"),
                TabSessionState::private("https://example.org").with_id("d"),
            ],
            Some(TabId::from("c")),
        );
        state.custom_tabs.push(Arc::new(
            TabSessionState::custom("https://custom.org", CustomTabConfig::default())
                .with_id("custom"),
        ));
        state
    }

    fn ids(tabs: &[&TabSessionState]) -> Vec<String> {
        tabs.iter().map(|tab| tab.id.to_string()).collect()
    }

    #[test]
    fn test_find_tabs() {
        let state = state();

        assert_eq!(find_tab(&state, &TabId::from("a")).map(|t| t.id.as_str()), Some("a"));
        assert!(find_tab(&state, &TabId::from("custom")).is_none());
        assert!(find_custom_tab(&state, &TabId::from("custom")).is_some());
        assert!(find_tab_or_custom_tab(&state, &TabId::from("custom")).is_some());
        assert!(find_tab_or_custom_tab(&state, &TabId::from("missing")).is_none());
        assert_eq!(selected_tab(&state).map(|t| t.id.as_str()), Some("c"));
    }

    #[test]
    fn test_selected_tab_without_selection() {
        let state = BrowserState::default();
        assert!(selected_tab(&state).is_none());
    }

    #[test]
    fn test_filtered_tabs_keep_display_order() {
        let state = state();

        assert_eq!(ids(&normal_tabs(&state)), vec!["a", "c"]);
        assert_eq!(ids(&private_tabs(&state)), vec!["b", "d"]);
        assert_eq!(
            ids(&filter_tabs(&state, |tab| tab.content.url.contains("mozilla"))),
            vec!["a", "b"]
        );
    }

    #[test]
    fn test_counts() {
        let state = state();

        assert_eq!(tab_count(&state), 4);
        assert_eq!(normal_tab_count(&state), 2);
        assert_eq!(private_tab_count(&state), 2);
    }

    #[test]
    fn test_find_by_url() {
        let state = state();

        assert_eq!(
            ids(&find_normal_or_private_tabs_by_url(&state, "https://www.mozilla.org", false)),
            vec!["a"]
        );
        assert_eq!(
            ids(&find_normal_or_private_tabs_by_url(&state, "https://www.mozilla.org", true)),
            vec!["b"]
        );
        assert!(find_normal_or_private_tabs_by_url(&state, "https://nowhere.org", false).is_empty());
    }

    #[test]
    fn test_downloads_and_media_for_tab() {
        let mut state = state();
        let mut first = DownloadState::new("https://a.org/1.txt");
        first.session_id = Some(TabId::from("a"));
        first.created_time = 1;
        let mut second = DownloadState::new("https://a.org/2.txt");
        second.session_id = Some(TabId::from("a"));
        second.created_time = 2;
        let other = DownloadState::new("https://a.org/3.txt");
        for download in [second, first, other] {
            state.downloads.insert(download.id.clone(), download);
        }
        state.media.elements.insert(
            TabId::from("a"),
            vec![MediaElement {
                id: "video".to_string(),
                state: MediaPlaybackState::Paused,
                muted: true,
            }],
        );

        let mut urls: Vec<&str> = downloads_for_tab(&state, &TabId::from("a"))
            .iter()
            .map(|d| d.url.as_str())
            .collect();
        urls.sort_unstable();
        assert_eq!(urls, vec!["https://a.org/1.txt", "https://a.org/2.txt"]);
        assert_eq!(media_for_tab(&state, &TabId::from("a")).len(), 1);
        assert!(media_for_tab(&state, &TabId::from("c")).is_empty());
    }

    #[test]
    fn test_find_tab_by_engine_session() {
        let mut state = state();
        let handle = EngineHandle::new(Arc::new(HeadlessSession::new(false)));
        state.session_mut(&TabId::from("custom")).unwrap().engine_state = EngineState {
            engine_session: Some(handle.clone()),
            crashed: false,
        };

        assert_eq!(
            find_tab_by_engine_session(&state, &handle).map(|t| t.id.as_str()),
            Some("custom")
        );

        let unbound = EngineHandle::new(Arc::new(HeadlessSession::new(false)));
        assert!(find_tab_by_engine_session(&state, &unbound).is_none());
    }
}
