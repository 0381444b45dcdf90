//! Engine event types
//!
//! Events are facts reported by an engine session: the page location changed,
//! a tracker was blocked, the content process crashed. Every callback an
//! engine can make is a variant of [`EngineEvent`], so a single
//! [`SessionObserver`](crate::SessionObserver) method receives all of them.
//!
//! ## Naming Convention
//!
//! Events use past tense or descriptive names indicating something has happened:
//! - `LocationChanged` (not `ChangeLocation`)
//! - `TrackerBlocked` (not `BlockTracker`)

/// A tracker reported by the engine's content blocking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tracker {
    pub url: String,
    pub categories: Vec<String>,
}

impl Tracker {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            categories: Vec::new(),
        }
    }
}

/// Security information of the current page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecurityInfo {
    pub secure: bool,
    pub host: String,
    pub issuer: String,
}

/// Playback state of a media element or media session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MediaPlaybackState {
    #[default]
    Unknown,
    Playing,
    Paused,
    Stopped,
}

/// Metadata published by a page's media session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaMetadata {
    pub title: String,
    pub artist: String,
    pub album: String,
}

/// A media element (audio or video) living in a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaElement {
    pub id: String,
    pub state: MediaPlaybackState,
    pub muted: bool,
}

/// A permission prompt requested by page content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionRequest {
    pub id: String,
    pub uri: String,
    pub permissions: Vec<String>,
}

/// A resource the engine cannot render and hands over for download
///
/// `content_length` is whatever the server reported; engines use a negative
/// value when the length is unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExternalResource {
    pub url: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub content_length: Option<i64>,
    pub user_agent: Option<String>,
    pub private: bool,
}

/// Events reported by an engine session to its observers
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    // === Navigation ===
    /// The top-level document moved to a new URL
    LocationChanged { url: String },
    /// The document title changed
    TitleChanged { title: String },
    /// Load progress in percent
    ProgressChanged { progress: u8 },
    /// A page started (`true`) or finished (`false`) loading
    LoadingStateChanged { loading: bool },
    /// Back/forward availability changed
    NavigationStateChanged {
        can_go_back: bool,
        can_go_forward: bool,
    },
    /// Security state of the current page changed
    SecurityChanged(SecurityInfo),
    /// The user cancelled a repost (form resubmission) prompt
    RepostPromptCancelled,
    /// Page content entered or left fullscreen
    FullscreenChanged { enabled: bool },

    // === Content blocking ===
    TrackerBlocked(Tracker),
    TrackerLoaded(Tracker),
    /// The current site was added to or removed from the exclusion list
    ExcludedOnTrackingProtectionChanged { excluded: bool },

    // === Find in page ===
    /// A new search was started
    FindStarted { text: String },
    FindResult {
        active_match_ordinal: u32,
        number_of_matches: u32,
        is_done_counting: bool,
    },

    // === Prompts ===
    PermissionRequested(PermissionRequest),

    // === Media ===
    MediaAdded(MediaElement),
    MediaRemoved { id: String },
    MediaStateChanged {
        id: String,
        state: MediaPlaybackState,
    },
    MediaSessionActivated,
    MediaSessionDeactivated,
    MediaSessionMetadataChanged(MediaMetadata),
    MediaSessionPlaybackStateChanged(MediaPlaybackState),
    MediaSessionMuteChanged { muted: bool },
    MediaSessionFullscreenChanged { fullscreen: bool },

    // === Downloads ===
    /// The engine wants the application to download a resource
    DownloadRequested(ExternalResource),

    // === Process ===
    /// The content process backing this session crashed
    Crashed,
}
