//! Telemetry Middleware
//!
//! Observes actions after they were reduced and reports [`TelemetryEvent`]s
//! to a [`TelemetrySink`]. What a sink does with the events is up to the
//! application; [`LogTelemetrySink`] only logs them.

use crate::actions::{Action, ContentAction, CrashAction, DownloadAction};
use crate::middleware::{Middleware, MiddlewareContext, Next};
use crate::selectors::{find_tab, normal_tab_count};
use crate::state::TabId;
use std::sync::Arc;

/// Something worth counting happened
#[derive(Debug, Clone, PartialEq, Eq, strum::IntoStaticStr)]
pub enum TelemetryEvent {
    /// The number of open normal tabs changed
    OpenTabCountChanged { count: usize },
    /// A normal tab finished loading a page
    UriOpened { url: String },
    DownloadAdded { private: bool },
    TabCrashed { tab_id: TabId },
}

/// Destination of telemetry events
pub trait TelemetrySink: Send + Sync {
    fn record(&self, event: TelemetryEvent);
}

/// Sink writing every event to the log
pub struct LogTelemetrySink;

impl TelemetrySink for LogTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        let name: &'static str = (&event).into();
        log::info!("Telemetry: {} {:?}", name, event);
    }
}

pub struct TelemetryMiddleware {
    sink: Arc<dyn TelemetrySink>,
}

impl TelemetryMiddleware {
    pub fn new(sink: Arc<dyn TelemetrySink>) -> Self {
        Self { sink }
    }
}

impl Middleware for TelemetryMiddleware {
    fn handle(&mut self, ctx: &MiddlewareContext, next: Next<'_>, action: Action) {
        let tabs_before = normal_tab_count(&ctx.state());
        let observed = action.clone();
        next.run(action);
        let state = ctx.state();

        match &observed {
            Action::TabList(_) | Action::CustomTabList(_) => {
                let count = normal_tab_count(&state);
                if count != tabs_before {
                    self.sink.record(TelemetryEvent::OpenTabCountChanged { count });
                }
            }
            Action::Content(ContentAction::UpdateLoadingState {
                tab_id,
                loading: false,
            }) => {
                if let Some(tab) = find_tab(&state, tab_id).filter(|tab| !tab.is_private()) {
                    self.sink.record(TelemetryEvent::UriOpened {
                        url: tab.content.url.clone(),
                    });
                }
            }
            Action::Download(DownloadAction::AddDownload { download }) => {
                self.sink.record(TelemetryEvent::DownloadAdded {
                    private: download.private,
                });
            }
            Action::Crash(CrashAction::SessionCrashed { tab_id }) => {
                self.sink.record(TelemetryEvent::TabCrashed {
                    tab_id: tab_id.clone(),
                });
            }
            _ => {}
        }
    }
}
