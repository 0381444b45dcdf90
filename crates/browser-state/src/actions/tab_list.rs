//! Tab list actions

use crate::state::{TabId, TabSessionState};

/// Actions adding, selecting, ordering and removing tabs
#[derive(Debug, Clone, strum::IntoStaticStr)]
pub enum TabListAction {
    /// Add a tab. It is selected when `select` is set or no tab is selected yet.
    AddTab { tab: TabSessionState, select: bool },
    /// Add several tabs at once, in order
    AddMultipleTabs { tabs: Vec<TabSessionState> },
    SelectTab { tab_id: TabId },
    /// Remove a tab. When it was selected, its parent is preferred as the new
    /// selection if `select_parent_if_exists` is set.
    RemoveTab {
        tab_id: TabId,
        select_parent_if_exists: bool,
    },
    RemoveTabs { tab_ids: Vec<TabId> },
    RemoveAllTabs,
    RemoveAllNormalTabs,
    RemoveAllPrivateTabs,
    /// Move `tab_ids` next to `target_tab_id`, keeping their relative order
    MoveTabs {
        tab_ids: Vec<TabId>,
        target_tab_id: TabId,
        place_after: bool,
    },
    /// Restore tabs from a previous session
    Restore {
        tabs: Vec<TabSessionState>,
        selected_tab_id: Option<TabId>,
    },
    /// All tabs of the previous session have been restored
    RestoreComplete,
}
