use super::update_session_if;
use crate::actions::HistoryMetadataAction;
use crate::state::BrowserState;
use std::sync::Arc;

/// Reduce history metadata keys based on HistoryMetadataAction
pub fn reduce_history_metadata(
    state: Arc<BrowserState>,
    action: &HistoryMetadataAction,
) -> Arc<BrowserState> {
    match action {
        HistoryMetadataAction::SetHistoryMetadataKey { tab_id, key } => update_session_if(
            state,
            tab_id,
            |tab| tab.history_metadata.as_ref() != Some(key),
            |tab| {
                tab.history_metadata = Some(key.clone());
            },
        ),
        HistoryMetadataAction::ClearHistoryMetadataKey { tab_id } => update_session_if(
            state,
            tab_id,
            |tab| tab.history_metadata.is_some(),
            |tab| {
                tab.history_metadata = None;
            },
        ),
    }
}
