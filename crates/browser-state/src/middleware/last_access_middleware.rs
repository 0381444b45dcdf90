//! Last Access Middleware
//!
//! Stamps the selected tab with the current time whenever a tab list action
//! changes which tab is selected (selecting, adding with `select`, or removing
//! the selected tab).

use crate::actions::{Action, LastAccessAction};
use crate::middleware::{Middleware, MiddlewareContext, Next};

type Clock = Box<dyn Fn() -> i64 + Send>;

pub struct LastAccessMiddleware {
    clock: Clock,
}

impl LastAccessMiddleware {
    pub fn new() -> Self {
        Self::with_clock(|| chrono::Utc::now().timestamp_millis())
    }

    /// Use `clock` (epoch millis) instead of the system time
    pub fn with_clock(clock: impl Fn() -> i64 + Send + 'static) -> Self {
        Self {
            clock: Box::new(clock),
        }
    }
}

impl Default for LastAccessMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl Middleware for LastAccessMiddleware {
    fn handle(&mut self, ctx: &MiddlewareContext, next: Next<'_>, action: Action) {
        if !matches!(action, Action::TabList(_)) {
            next.run(action);
            return;
        }

        let before = ctx.state().selected_tab_id.clone();
        next.run(action);
        let after = ctx.state().selected_tab_id.clone();

        if let Some(tab_id) = after.filter(|after| before.as_ref() != Some(after)) {
            ctx.dispatcher().send(LastAccessAction::UpdateLastAccess {
                tab_id,
                last_access: (self.clock)(),
            });
        }
    }
}
