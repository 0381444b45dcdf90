use crate::state::{HistoryMetadataKey, TabId};

#[derive(Debug, Clone, strum::IntoStaticStr)]
pub enum HistoryMetadataAction {
    SetHistoryMetadataKey {
        tab_id: TabId,
        key: HistoryMetadataKey,
    },
    ClearHistoryMetadataKey { tab_id: TabId },
}
