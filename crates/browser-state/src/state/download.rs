//! Download state

use super::tab::TabId;
use browser_engine::ExternalResource;

/// Progress of a download
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DownloadStatus {
    #[default]
    Initiated,
    Downloading,
    Paused,
    Cancelled,
    Failed,
    Completed,
}

/// A download known to the browser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadState {
    pub id: String,
    pub url: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    /// Size in bytes when known; never negative once stored in state
    pub content_length: Option<i64>,
    pub user_agent: Option<String>,
    pub private: bool,
    pub status: DownloadStatus,
    /// Tab that started the download, if it still exists
    pub session_id: Option<TabId>,
    /// Epoch millis
    pub created_time: i64,
}

impl DownloadState {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            url: url.into(),
            file_name: None,
            content_type: None,
            content_length: None,
            user_agent: None,
            private: false,
            status: DownloadStatus::default(),
            session_id: None,
            created_time: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// Download for a resource the engine handed over while showing `session_id`
    pub fn from_external(resource: ExternalResource, session_id: TabId) -> Self {
        let mut download = Self::new(resource.url);
        download.file_name = resource.file_name;
        download.content_type = resource.content_type;
        download.content_length = resource.content_length;
        download.user_agent = resource.user_agent;
        download.private = resource.private;
        download.session_id = Some(session_id);
        download
    }

    /// Copy with an unknown (negative) content length stored as absent
    pub fn normalized(mut self) -> Self {
        if matches!(self.content_length, Some(length) if length < 0) {
            self.content_length = None;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_content_length_is_dropped() {
        let mut download = DownloadState::new("https://a.org/file.txt");
        download.content_length = Some(-1);
        assert_eq!(download.normalized().content_length, None);

        let mut download = DownloadState::new("https://a.org/file.txt");
        download.content_length = Some(100);
        assert_eq!(download.normalized().content_length, Some(100));
    }

    #[test]
    fn test_from_external() {
        let resource = ExternalResource {
            url: "mozilla.org/file.txt".to_string(),
            file_name: Some("file.txt".to_string()),
            content_type: Some("text/plain".to_string()),
            content_length: Some(100),
            user_agent: Some("userAgent".to_string()),
            private: true,
        };

        let download = DownloadState::from_external(resource, TabId::from("tab"));

        assert_eq!(download.url, "mozilla.org/file.txt");
        assert_eq!(download.file_name.as_deref(), Some("file.txt"));
        assert_eq!(download.content_length, Some(100));
        assert!(download.private);
        assert_eq!(download.session_id, Some(TabId::from("tab")));
    }
}
