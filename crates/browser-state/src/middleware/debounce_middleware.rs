//! Debounce Middleware
//!
//! Engines report load progress far more often than it changes. Progress
//! updates repeating the tab's current value are swallowed here, so they
//! cause neither a reduction nor a subscriber notification.

use crate::actions::{Action, ContentAction};
use crate::middleware::{Middleware, MiddlewareContext, Next};
use crate::selectors::find_tab_or_custom_tab;

#[derive(Default)]
pub struct DebounceMiddleware {
    swallowed: u64,
}

impl DebounceMiddleware {
    pub fn new() -> Self {
        Self::default()
    }

    fn is_redundant(ctx: &MiddlewareContext, action: &Action) -> bool {
        let Action::Content(ContentAction::UpdateProgress { tab_id, progress }) = action else {
            return false;
        };
        let state = ctx.state();
        find_tab_or_custom_tab(&state, tab_id)
            .is_some_and(|tab| tab.content.progress == (*progress).min(100))
    }
}

impl Middleware for DebounceMiddleware {
    fn handle(&mut self, ctx: &MiddlewareContext, next: Next<'_>, action: Action) {
        if Self::is_redundant(ctx, &action) {
            self.swallowed += 1;
            log::trace!("DebounceMiddleware: swallowed {} ({} so far)", action.name(), self.swallowed);
            return;
        }
        next.run(action);
    }
}
