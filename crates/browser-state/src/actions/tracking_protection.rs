//! Tracking protection actions

use crate::state::TabId;
use browser_engine::Tracker;

#[derive(Debug, Clone, strum::IntoStaticStr)]
pub enum TrackingProtectionAction {
    /// Enable or disable tracking protection; forwarded to the engine
    ToggleAction { tab_id: TabId, enabled: bool },
    TrackerBlocked { tab_id: TabId, tracker: Tracker },
    TrackerLoaded { tab_id: TabId, tracker: Tracker },
    ClearTrackers { tab_id: TabId },
    ToggleExclusionList { tab_id: TabId, excluded: bool },
}
