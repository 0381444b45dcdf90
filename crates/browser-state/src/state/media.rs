//! Media state

use super::tab::TabId;
use browser_engine::{MediaElement, MediaMetadata, MediaPlaybackState};
use std::collections::HashMap;

/// Media elements reported by the engine, grouped by owning tab
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaState {
    /// Tabs without media have no entry
    pub elements: HashMap<TabId, Vec<MediaElement>>,
}

impl MediaState {
    /// Whether any element in any tab is currently playing
    pub fn is_playing(&self) -> bool {
        self.elements
            .values()
            .flatten()
            .any(|element| element.state == MediaPlaybackState::Playing)
    }
}

/// Media session of a tab, present while the page's session is active
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaSessionState {
    pub playback_state: MediaPlaybackState,
    pub metadata: Option<MediaMetadata>,
    pub muted: bool,
    pub fullscreen: bool,
}
