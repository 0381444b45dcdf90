//! Crash actions

use crate::state::TabId;

#[derive(Debug, Clone, strum::IntoStaticStr)]
pub enum CrashAction {
    /// The content process of the tab crashed
    SessionCrashed { tab_id: TabId },
    /// The user asked to recover the crashed tab
    RestoreCrashedSession { tab_id: TabId },
}
