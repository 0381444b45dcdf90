//! Custom tab actions

use crate::state::{TabId, TabSessionState};

#[derive(Debug, Clone, strum::IntoStaticStr)]
pub enum CustomTabListAction {
    AddCustomTab { tab: TabSessionState },
    RemoveCustomTab { tab_id: TabId },
    RemoveAllCustomTabs,
    /// Move a custom tab into the regular tab list (e.g. "open in browser")
    TurnCustomTabIntoNormalTab { tab_id: TabId },
}
