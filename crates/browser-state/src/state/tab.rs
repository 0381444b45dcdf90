//! Tab state

use super::download::DownloadState;
use super::engine::EngineState;
use super::media::MediaSessionState;
use browser_engine::{PermissionRequest, SecurityInfo, Tracker};
use std::fmt;

/// Stable identifier of a tab or custom tab
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TabId(String);

impl TabId {
    /// Generate a new random identifier
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TabId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TabId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One find-in-page result update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FindResultState {
    pub active_match_ordinal: u32,
    pub number_of_matches: u32,
    pub is_done_counting: bool,
}

impl FindResultState {
    pub fn new(active_match_ordinal: u32, number_of_matches: u32, is_done_counting: bool) -> Self {
        Self {
            active_match_ordinal,
            number_of_matches,
            is_done_counting,
        }
    }
}

/// A dialog requested by page content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptRequest {
    Alert { message: String },
    Confirm { message: String },
    TextInput { message: String, default_value: String },
}

/// Content of the page displayed in a tab
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentState {
    pub url: String,
    pub title: String,
    /// Fixed at creation
    pub private: bool,
    pub loading: bool,
    /// 0..=100
    pub progress: u8,
    pub search_terms: String,
    pub security_info: SecurityInfo,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub find_results: Vec<FindResultState>,
    pub permission_requests: Vec<PermissionRequest>,
    pub prompt_request: Option<PromptRequest>,
    /// Download requested by the page, waiting to be handled
    pub download: Option<DownloadState>,
    pub refresh_canceled: bool,
    pub fullscreen: bool,
}

/// Tracking protection state of a tab
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackingProtectionState {
    pub enabled: bool,
    pub blocked_trackers: Vec<Tracker>,
    pub loaded_trackers: Vec<Tracker>,
    /// The site is on the user's exclusion list
    pub ignored_on_tracking_protection: bool,
}

/// Key under which history metadata for a tab's visit is recorded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryMetadataKey {
    pub url: String,
    pub search_term: Option<String>,
    pub referrer_url: Option<String>,
}

/// Appearance of a custom tab opened by another application
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomTabConfig {
    pub toolbar_color: Option<String>,
    pub show_share_menu_item: bool,
    pub enable_url_bar_hiding: bool,
}

/// A single browsing session (tab or custom tab)
#[derive(Debug, Clone, PartialEq)]
pub struct TabSessionState {
    pub id: TabId,
    pub parent_id: Option<TabId>,
    pub content: ContentState,
    pub tracking_protection: TrackingProtectionState,
    pub engine_state: EngineState,
    pub media_session_state: Option<MediaSessionState>,
    pub history_metadata: Option<HistoryMetadataKey>,
    /// Epoch millis of the last time the tab was selected, 0 if never
    pub last_access: i64,
    /// Present only for custom tabs
    pub custom_tab_config: Option<CustomTabConfig>,
}

impl TabSessionState {
    /// A normal tab for `url` with a fresh id
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            id: TabId::generate(),
            parent_id: None,
            content: ContentState {
                url: url.into(),
                ..ContentState::default()
            },
            tracking_protection: TrackingProtectionState::default(),
            engine_state: EngineState::default(),
            media_session_state: None,
            history_metadata: None,
            last_access: 0,
            custom_tab_config: None,
        }
    }

    /// A private tab for `url` with a fresh id
    pub fn private(url: impl Into<String>) -> Self {
        let mut tab = Self::new(url);
        tab.content.private = true;
        tab
    }

    /// A custom tab for `url`
    pub fn custom(url: impl Into<String>, config: CustomTabConfig) -> Self {
        let mut tab = Self::new(url);
        tab.custom_tab_config = Some(config);
        tab
    }

    pub fn with_id(mut self, id: impl Into<TabId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_parent(mut self, parent_id: TabId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.content.title = title.into();
        self
    }

    pub fn with_tracking_protection(mut self, enabled: bool) -> Self {
        self.tracking_protection.enabled = enabled;
        self
    }

    pub fn is_private(&self) -> bool {
        self.content.private
    }

    pub fn is_custom_tab(&self) -> bool {
        self.custom_tab_config.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = TabSessionState::new("https://a.org");
        let b = TabSessionState::new("https://a.org");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_builders() {
        let tab = TabSessionState::private("https://a.org")
            .with_id("tab")
            .with_title("A");
        assert_eq!(tab.id.as_str(), "tab");
        assert_eq!(tab.content.title, "A");
        assert!(tab.is_private());
        assert!(!tab.is_custom_tab());

        let custom = TabSessionState::custom("https://b.org", CustomTabConfig::default());
        assert!(custom.is_custom_tab());
        assert!(!custom.is_private());
    }
}
