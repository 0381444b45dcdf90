//! Browser state
//!
//! `BrowserState` is the immutable snapshot published by the store. Reducers
//! never mutate a published snapshot: they produce a new root and share every
//! unchanged tab through its `Arc`.

use std::collections::HashMap;
use std::sync::Arc;

pub mod download;
pub mod engine;
pub mod media;
pub mod tab;

pub use download::{DownloadState, DownloadStatus};
pub use engine::{EngineHandle, EngineState};
pub use media::{MediaSessionState, MediaState};
pub use tab::{
    ContentState, CustomTabConfig, FindResultState, HistoryMetadataKey, PromptRequest, TabId,
    TabSessionState, TrackingProtectionState,
};

/// Process-wide flags not tied to a single tab
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessFlags {
    /// Set once the previous session's tabs were restored
    pub restore_complete: bool,
    /// Number of private tabs opened since the store was created
    pub private_tabs_opened: u64,
}

/// Root state snapshot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrowserState {
    /// All regular tabs, keyed by id
    pub tabs: HashMap<TabId, Arc<TabSessionState>>,
    /// Display order of `tabs`
    pub tab_order: Vec<TabId>,
    pub selected_tab_id: Option<TabId>,
    /// Custom tabs opened on behalf of other applications
    pub custom_tabs: Vec<Arc<TabSessionState>>,
    pub downloads: HashMap<String, DownloadState>,
    pub media: MediaState,
    pub flags: ProcessFlags,
    /// Incremented by the store for every published change; 0 for the
    /// initial snapshot
    pub version: u64,
}

impl BrowserState {
    /// State containing the given tabs in order, selecting `selected`
    pub fn with_tabs(tabs: Vec<TabSessionState>, selected: Option<TabId>) -> Self {
        let mut state = Self::default();
        for tab in tabs {
            state.tab_order.push(tab.id.clone());
            state.tabs.insert(tab.id.clone(), Arc::new(tab));
        }
        state.selected_tab_id = selected.filter(|id| state.tabs.contains_key(id));
        state
    }

    pub fn contains_tab(&self, tab_id: &TabId) -> bool {
        self.tabs.contains_key(tab_id)
    }

    pub fn contains_custom_tab(&self, tab_id: &TabId) -> bool {
        self.custom_tabs.iter().any(|tab| &tab.id == tab_id)
    }

    /// Whether `tab_id` names a regular or custom tab
    pub fn contains_session(&self, tab_id: &TabId) -> bool {
        self.contains_tab(tab_id) || self.contains_custom_tab(tab_id)
    }

    /// Mutable access to a regular or custom tab, copying it out of shared
    /// ownership first. Returns `None` for unknown ids.
    pub(crate) fn session_mut(&mut self, tab_id: &TabId) -> Option<&mut TabSessionState> {
        if let Some(tab) = self.tabs.get_mut(tab_id) {
            return Some(Arc::make_mut(tab));
        }
        self.custom_tabs
            .iter_mut()
            .find(|tab| &tab.id == tab_id)
            .map(Arc::make_mut)
    }
}
