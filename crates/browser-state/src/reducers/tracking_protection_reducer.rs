use super::update_session;
use crate::actions::TrackingProtectionAction;
use crate::state::BrowserState;
use std::sync::Arc;

/// Reduce tracking protection state based on TrackingProtectionAction
pub fn reduce_tracking_protection(
    state: Arc<BrowserState>,
    action: &TrackingProtectionAction,
) -> Arc<BrowserState> {
    match action {
        TrackingProtectionAction::ToggleAction { tab_id, enabled } => {
            update_session(state, tab_id, |tab| {
                tab.tracking_protection.enabled = *enabled;
            })
        }

        TrackingProtectionAction::TrackerBlocked { tab_id, tracker } => {
            update_session(state, tab_id, |tab| {
                tab.tracking_protection
                    .blocked_trackers
                    .push(tracker.clone());
            })
        }

        TrackingProtectionAction::TrackerLoaded { tab_id, tracker } => {
            update_session(state, tab_id, |tab| {
                tab.tracking_protection.loaded_trackers.push(tracker.clone());
            })
        }

        TrackingProtectionAction::ClearTrackers { tab_id } => update_session(state, tab_id, |tab| {
            tab.tracking_protection.blocked_trackers.clear();
            tab.tracking_protection.loaded_trackers.clear();
        }),

        TrackingProtectionAction::ToggleExclusionList { tab_id, excluded } => {
            update_session(state, tab_id, |tab| {
                tab.tracking_protection.ignored_on_tracking_protection = *excluded;
            })
        }
    }
}
