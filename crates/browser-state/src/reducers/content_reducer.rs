//! Content Reducer
//!
//! Page content of tabs and custom tabs.
//!
//! Navigation rules:
//! - a URL change that is not fragment-only clears the title
//! - a URL change to another origin clears pending permission requests
//! - a loading start (`loading: true`) clears find results, trackers and the
//!   refresh-canceled flag; a loading stop clears nothing

use super::update_session;
use crate::actions::ContentAction;
use crate::state::BrowserState;
use std::sync::Arc;
use url::Url;

/// Reduce content state based on ContentAction
pub fn reduce_content(state: Arc<BrowserState>, action: &ContentAction) -> Arc<BrowserState> {
    let tab_id = action.tab_id();
    match action {
        ContentAction::UpdateUrl { url, .. } => update_session(state, tab_id, |tab| {
            let content = &mut tab.content;
            if !is_same_document(&content.url, url) {
                content.title.clear();
            }
            if !is_same_origin(&content.url, url) {
                content.permission_requests.clear();
            }
            content.url = url.clone();
        }),

        ContentAction::UpdateTitle { title, .. } => update_session(state, tab_id, |tab| {
            tab.content.title = title.clone();
        }),

        ContentAction::UpdateProgress { progress, .. } => update_session(state, tab_id, |tab| {
            tab.content.progress = (*progress).min(100);
        }),

        ContentAction::UpdateLoadingState { loading, .. } => update_session(state, tab_id, |tab| {
            tab.content.loading = *loading;
            if *loading {
                // A new page starts loading
                tab.content.find_results.clear();
                tab.content.refresh_canceled = false;
                tab.tracking_protection.blocked_trackers.clear();
                tab.tracking_protection.loaded_trackers.clear();
            }
        }),

        ContentAction::UpdateSearchTerms { search_terms, .. } => {
            update_session(state, tab_id, |tab| {
                tab.content.search_terms = search_terms.clone();
            })
        }

        ContentAction::UpdateSecurityInfo { security_info, .. } => {
            update_session(state, tab_id, |tab| {
                tab.content.security_info = security_info.clone();
            })
        }

        ContentAction::UpdateBackNavigationState { can_go_back, .. } => {
            update_session(state, tab_id, |tab| {
                tab.content.can_go_back = *can_go_back;
            })
        }

        ContentAction::UpdateForwardNavigationState { can_go_forward, .. } => {
            update_session(state, tab_id, |tab| {
                tab.content.can_go_forward = *can_go_forward;
            })
        }

        ContentAction::UpdateRefreshCanceledState {
            refresh_canceled, ..
        } => update_session(state, tab_id, |tab| {
            tab.content.refresh_canceled = *refresh_canceled;
        }),

        ContentAction::FullScreenChanged { fullscreen, .. } => {
            update_session(state, tab_id, |tab| {
                tab.content.fullscreen = *fullscreen;
            })
        }

        ContentAction::AddFindResult { find_result, .. } => update_session(state, tab_id, |tab| {
            tab.content.find_results.push(*find_result);
        }),

        ContentAction::ClearFindResults { .. } => update_session(state, tab_id, |tab| {
            tab.content.find_results.clear();
        }),

        ContentAction::UpdatePermissionsRequest { request, .. } => {
            update_session(state, tab_id, |tab| {
                let requests = &mut tab.content.permission_requests;
                if !requests.iter().any(|r| r.id == request.id) {
                    requests.push(request.clone());
                }
            })
        }

        ContentAction::ConsumePermissionsRequest { request_id, .. } => {
            update_session(state, tab_id, |tab| {
                tab.content
                    .permission_requests
                    .retain(|request| &request.id != request_id);
            })
        }

        ContentAction::ClearPermissionRequests { .. } => update_session(state, tab_id, |tab| {
            tab.content.permission_requests.clear();
        }),

        ContentAction::UpdatePromptRequest { prompt_request, .. } => {
            update_session(state, tab_id, |tab| {
                tab.content.prompt_request = Some(prompt_request.clone());
            })
        }

        ContentAction::ConsumePromptRequest { .. } => update_session(state, tab_id, |tab| {
            tab.content.prompt_request = None;
        }),

        ContentAction::UpdateDownload { download, .. } => update_session(state, tab_id, |tab| {
            tab.content.download = Some(download.clone().normalized());
        }),

        ContentAction::ConsumeDownload { download_id, .. } => {
            update_session(state, tab_id, |tab| {
                if tab
                    .content
                    .download
                    .as_ref()
                    .is_some_and(|download| &download.id == download_id)
                {
                    tab.content.download = None;
                }
            })
        }
    }
}

/// Both URLs point at the same document, ignoring the fragment
fn is_same_document(current: &str, next: &str) -> bool {
    match (Url::parse(current), Url::parse(next)) {
        (Ok(mut current), Ok(mut next)) => {
            current.set_fragment(None);
            next.set_fragment(None);
            current == next
        }
        _ => current.split('#').next() == next.split('#').next(),
    }
}

fn is_same_origin(current: &str, next: &str) -> bool {
    match (Url::parse(current), Url::parse(next)) {
        (Ok(current), Ok(next)) => current.origin() == next.origin(),
        _ => false,
    }
}
