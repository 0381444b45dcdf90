//! Actions module
//!
//! Every change to the browser state is described by an [`Action`]. Actions
//! are grouped by the entity family they affect; each family has its own enum
//! and its own reducer. Some actions do not change state at all and exist so
//! middleware can react to them (e.g. [`EngineAction::LoadUrl`]).

pub mod content;
pub mod crash;
pub mod custom_tab_list;
pub mod download;
pub mod engine;
pub mod history_metadata;
pub mod last_access;
pub mod media;
pub mod media_session;
pub mod tab_list;
pub mod tracking_protection;

pub use content::ContentAction;
pub use crash::CrashAction;
pub use custom_tab_list::CustomTabListAction;
pub use download::DownloadAction;
pub use engine::EngineAction;
pub use history_metadata::HistoryMetadataAction;
pub use last_access::LastAccessAction;
pub use media::MediaAction;
pub use media_session::MediaSessionAction;
pub use tab_list::TabListAction;
pub use tracking_protection::TrackingProtectionAction;

/// Root action enum - tagged by entity family
#[derive(Debug, Clone, strum::IntoStaticStr)]
pub enum Action {
    /// Tab list management (add, select, remove, restore)
    TabList(TabListAction),
    /// Custom tab management
    CustomTabList(CustomTabListAction),
    /// Page content of a tab
    Content(ContentAction),
    /// Engine session lifecycle and imperative engine calls
    Engine(EngineAction),
    TrackingProtection(TrackingProtectionAction),
    /// Media elements
    Media(MediaAction),
    /// Media sessions
    MediaSession(MediaSessionAction),
    Download(DownloadAction),
    Crash(CrashAction),
    LastAccess(LastAccessAction),
    HistoryMetadata(HistoryMetadataAction),
    /// An action no reducer recognizes. Middleware can still observe it.
    Unknown(String),
}

impl Action {
    /// `Family::Variant` name, used for logging and telemetry
    pub fn name(&self) -> String {
        let family: &'static str = self.into();
        let kind: &'static str = match self {
            Self::TabList(a) => a.into(),
            Self::CustomTabList(a) => a.into(),
            Self::Content(a) => a.into(),
            Self::Engine(a) => a.into(),
            Self::TrackingProtection(a) => a.into(),
            Self::Media(a) => a.into(),
            Self::MediaSession(a) => a.into(),
            Self::Download(a) => a.into(),
            Self::Crash(a) => a.into(),
            Self::LastAccess(a) => a.into(),
            Self::HistoryMetadata(a) => a.into(),
            Self::Unknown(name) => return format!("{family}::{name}"),
        };
        format!("{family}::{kind}")
    }
}

macro_rules! impl_from_family {
    ($($family:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$family> for Action {
                fn from(action: $family) -> Self {
                    Self::$variant(action)
                }
            }
        )*
    };
}

impl_from_family!(
    TabListAction => TabList,
    CustomTabListAction => CustomTabList,
    ContentAction => Content,
    EngineAction => Engine,
    TrackingProtectionAction => TrackingProtection,
    MediaAction => Media,
    MediaSessionAction => MediaSession,
    DownloadAction => Download,
    CrashAction => Crash,
    LastAccessAction => LastAccess,
    HistoryMetadataAction => HistoryMetadata,
);
