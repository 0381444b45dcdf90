//! Content actions
//!
//! Update the page content of a single tab or custom tab. Actions naming an
//! unknown tab leave the state untouched.

use crate::state::{DownloadState, FindResultState, PromptRequest, TabId};
use browser_engine::{PermissionRequest, SecurityInfo};

#[derive(Debug, Clone, strum::IntoStaticStr)]
pub enum ContentAction {
    UpdateUrl { tab_id: TabId, url: String },
    UpdateTitle { tab_id: TabId, title: String },
    /// Progress in percent, values above 100 are clamped
    UpdateProgress { tab_id: TabId, progress: u8 },
    /// `loading: true` starts a new navigation
    UpdateLoadingState { tab_id: TabId, loading: bool },
    UpdateSearchTerms { tab_id: TabId, search_terms: String },
    UpdateSecurityInfo {
        tab_id: TabId,
        security_info: SecurityInfo,
    },
    UpdateBackNavigationState { tab_id: TabId, can_go_back: bool },
    UpdateForwardNavigationState { tab_id: TabId, can_go_forward: bool },
    UpdateRefreshCanceledState {
        tab_id: TabId,
        refresh_canceled: bool,
    },
    FullScreenChanged { tab_id: TabId, fullscreen: bool },

    // Find in page
    AddFindResult {
        tab_id: TabId,
        find_result: FindResultState,
    },
    ClearFindResults { tab_id: TabId },

    // Permission and prompt requests
    UpdatePermissionsRequest {
        tab_id: TabId,
        request: PermissionRequest,
    },
    ConsumePermissionsRequest { tab_id: TabId, request_id: String },
    ClearPermissionRequests { tab_id: TabId },
    UpdatePromptRequest {
        tab_id: TabId,
        prompt_request: PromptRequest,
    },
    ConsumePromptRequest { tab_id: TabId },

    // Downloads requested by the page
    UpdateDownload {
        tab_id: TabId,
        download: DownloadState,
    },
    ConsumeDownload { tab_id: TabId, download_id: String },
}

impl ContentAction {
    pub fn tab_id(&self) -> &TabId {
        match self {
            Self::UpdateUrl { tab_id, .. }
            | Self::UpdateTitle { tab_id, .. }
            | Self::UpdateProgress { tab_id, .. }
            | Self::UpdateLoadingState { tab_id, .. }
            | Self::UpdateSearchTerms { tab_id, .. }
            | Self::UpdateSecurityInfo { tab_id, .. }
            | Self::UpdateBackNavigationState { tab_id, .. }
            | Self::UpdateForwardNavigationState { tab_id, .. }
            | Self::UpdateRefreshCanceledState { tab_id, .. }
            | Self::FullScreenChanged { tab_id, .. }
            | Self::AddFindResult { tab_id, .. }
            | Self::ClearFindResults { tab_id }
            | Self::UpdatePermissionsRequest { tab_id, .. }
            | Self::ConsumePermissionsRequest { tab_id, .. }
            | Self::ClearPermissionRequests { tab_id }
            | Self::UpdatePromptRequest { tab_id, .. }
            | Self::ConsumePromptRequest { tab_id }
            | Self::UpdateDownload { tab_id, .. }
            | Self::ConsumeDownload { tab_id, .. } => tab_id,
        }
    }
}
