use crate::actions::Action;
use crate::middleware::{Middleware, MiddlewareContext, Next};

/// LoggingMiddleware - logs all actions passing through
///
/// Action names go to debug level, the full payload to trace level.
pub struct LoggingMiddleware;

impl LoggingMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LoggingMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl Middleware for LoggingMiddleware {
    fn handle(&mut self, _ctx: &MiddlewareContext, next: Next<'_>, action: Action) {
        log::debug!("Action: {}", action.name());
        log::trace!("Action payload: {:?}", action);

        next.run(action); // Always pass action through
    }
}
