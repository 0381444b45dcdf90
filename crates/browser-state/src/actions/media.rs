//! Media element actions

use crate::state::TabId;
use browser_engine::{MediaElement, MediaPlaybackState};

#[derive(Debug, Clone, strum::IntoStaticStr)]
pub enum MediaAction {
    AddMediaElement {
        tab_id: TabId,
        element: MediaElement,
    },
    RemoveMediaElement { tab_id: TabId, element_id: String },
    UpdateMediaElementState {
        tab_id: TabId,
        element_id: String,
        state: MediaPlaybackState,
    },
    /// Drop every element of a tab
    RemoveTabMedia { tab_id: TabId },
}
