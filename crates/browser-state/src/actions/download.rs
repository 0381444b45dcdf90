//! Download actions

use crate::state::DownloadState;

#[derive(Debug, Clone, strum::IntoStaticStr)]
pub enum DownloadAction {
    AddDownload { download: DownloadState },
    /// Replace an existing download; ignored for unknown ids
    UpdateDownload { download: DownloadState },
    RemoveDownload { download_id: String },
    RemoveAllDownloads,
    /// Re-add downloads persisted by a previous session
    RestoreDownloads { downloads: Vec<DownloadState> },
}
