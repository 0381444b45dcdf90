//! Media session actions
//!
//! Updates are ignored for tabs without an active media session.

use crate::state::TabId;
use browser_engine::{MediaMetadata, MediaPlaybackState};

#[derive(Debug, Clone, strum::IntoStaticStr)]
pub enum MediaSessionAction {
    Activated { tab_id: TabId },
    Deactivated { tab_id: TabId },
    UpdateMetadata {
        tab_id: TabId,
        metadata: MediaMetadata,
    },
    UpdatePlaybackState {
        tab_id: TabId,
        playback_state: MediaPlaybackState,
    },
    UpdateMuted { tab_id: TabId, muted: bool },
    UpdateFullscreen { tab_id: TabId, fullscreen: bool },
}
