use crate::state::TabId;

#[derive(Debug, Clone, strum::IntoStaticStr)]
pub enum LastAccessAction {
    /// `last_access` is epoch millis
    UpdateLastAccess { tab_id: TabId, last_access: i64 },
}
