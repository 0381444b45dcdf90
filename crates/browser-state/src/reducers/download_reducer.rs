//! Download Reducer
//!
//! Downloads are stored with a non-negative content length and only keep their
//! `session_id` while that tab or custom tab exists.

use crate::actions::DownloadAction;
use crate::state::{BrowserState, DownloadState};
use std::sync::Arc;

/// Reduce download state based on DownloadAction
pub fn reduce_download(mut state: Arc<BrowserState>, action: &DownloadAction) -> Arc<BrowserState> {
    match action {
        DownloadAction::AddDownload { download } => {
            let download = prepare(&state, download);
            Arc::make_mut(&mut state)
                .downloads
                .insert(download.id.clone(), download);
            state
        }

        DownloadAction::UpdateDownload { download } => {
            if !state.downloads.contains_key(&download.id) {
                log::debug!("Ignoring update for unknown download {}", download.id);
                return state;
            }
            let download = prepare(&state, download);
            if state.downloads.get(&download.id) == Some(&download) {
                return state;
            }
            Arc::make_mut(&mut state)
                .downloads
                .insert(download.id.clone(), download);
            state
        }

        DownloadAction::RemoveDownload { download_id } => {
            if !state.downloads.contains_key(download_id) {
                return state;
            }
            Arc::make_mut(&mut state).downloads.remove(download_id);
            state
        }

        DownloadAction::RemoveAllDownloads => {
            if state.downloads.is_empty() {
                return state;
            }
            Arc::make_mut(&mut state).downloads.clear();
            state
        }

        DownloadAction::RestoreDownloads { downloads } => {
            if downloads.is_empty() {
                return state;
            }
            let restored: Vec<DownloadState> = downloads
                .iter()
                .map(|download| prepare(&state, download))
                .collect();
            let s = Arc::make_mut(&mut state);
            for download in restored {
                s.downloads.insert(download.id.clone(), download);
            }
            state
        }
    }
}

/// Normalize a download before storing it
fn prepare(state: &BrowserState, download: &DownloadState) -> DownloadState {
    let mut download = download.clone().normalized();
    if download
        .session_id
        .as_ref()
        .is_some_and(|id| !state.contains_session(id))
    {
        download.session_id = None;
    }
    download
}
