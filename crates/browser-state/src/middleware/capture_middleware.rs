//! Capture Actions Middleware
//!
//! Records every action that reaches it, in processing order. Tests register
//! it to assert on what was dispatched, including follow-up actions queued by
//! other middleware.

use crate::actions::Action;
use crate::middleware::{Middleware, MiddlewareContext, Next};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Shared view of the captured actions
#[derive(Clone, Default)]
pub struct CapturedActions {
    actions: Arc<Mutex<Vec<Action>>>,
}

impl CapturedActions {
    fn lock(&self) -> MutexGuard<'_, Vec<Action>> {
        self.actions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// All captured actions, oldest first
    pub fn all(&self) -> Vec<Action> {
        self.lock().clone()
    }

    /// `Family::Variant` names of all captured actions
    pub fn names(&self) -> Vec<String> {
        self.lock().iter().map(Action::name).collect()
    }

    pub fn find_first(&self, predicate: impl Fn(&Action) -> bool) -> Option<Action> {
        self.lock().iter().find(|action| predicate(*action)).cloned()
    }

    pub fn find_last(&self, predicate: impl Fn(&Action) -> bool) -> Option<Action> {
        self.lock().iter().rev().find(|action| predicate(*action)).cloned()
    }

    /// Number of captured actions with the given `Family::Variant` name
    pub fn count(&self, name: &str) -> usize {
        self.lock().iter().filter(|action| action.name() == name).count()
    }

    pub fn reset(&self) {
        self.lock().clear();
    }
}

/// CaptureActionsMiddleware - records actions and passes them on
#[derive(Default)]
pub struct CaptureActionsMiddleware {
    captured: CapturedActions,
}

impl CaptureActionsMiddleware {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the recorded actions, usable after the middleware moved
    /// into the store
    pub fn captured(&self) -> CapturedActions {
        self.captured.clone()
    }
}

impl Middleware for CaptureActionsMiddleware {
    fn handle(&mut self, _ctx: &MiddlewareContext, next: Next<'_>, action: Action) {
        self.captured.lock().push(action.clone());
        next.run(action);
    }
}
