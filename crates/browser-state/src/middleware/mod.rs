//! Middleware chain
//!
//! Middleware sits between dispatch and reduction:
//!
//! ```text
//! dispatch → [M1] → [M2] → ... → [Mn] → reducer → publish → subscribers
//! ```
//!
//! Each middleware gets the action by value together with a [`Next`]
//! continuation. Calling `next.run(action)` passes the (possibly transformed)
//! action on; not calling it swallows the action, so neither the remaining
//! middleware nor the reducer see it. `Next::run` consumes the continuation,
//! so it cannot be called twice.
//!
//! Work before `next.run` observes the state before the reduction, work after
//! it observes the published result through [`MiddlewareContext::state`].
//!
//! ## Panics
//!
//! Every middleware call is isolated. A panicking middleware is logged and
//! treated as if it had passed the untransformed action on (unless it already
//! called `next`), so one faulty middleware cannot stall the lane.
//!
//! ## Example
//!
//! ```rust
//! use browser_state::{Action, Middleware, MiddlewareContext, Next};
//!
//! struct SwallowUnknown;
//!
//! impl Middleware for SwallowUnknown {
//!     fn handle(&mut self, _ctx: &MiddlewareContext, next: Next<'_>, action: Action) {
//!         if !matches!(action, Action::Unknown(_)) {
//!             next.run(action);
//!         }
//!     }
//! }
//! ```

use crate::actions::Action;
use crate::dispatcher::{DispatchHandle, Dispatcher};
use crate::state::BrowserState;
use crate::store::StoreCore;
use std::any::Any;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

pub mod capture_middleware;
pub mod debounce_middleware;
pub mod engine_middleware;
pub mod engine_observer;
pub mod last_access_middleware;
pub mod logging;
pub mod telemetry_middleware;

/// Middleware trait - intercepts actions before they reach the reducer
///
/// Middleware runs on the store lane. Long running work must be spawned
/// elsewhere and report back through [`MiddlewareContext::dispatcher`].
pub trait Middleware: Send {
    /// Handle an action
    ///
    /// - `ctx`: read the current state, dispatch follow-up actions
    /// - `next`: the rest of the chain, call at most once
    /// - `action`: the action being processed
    fn handle(&mut self, ctx: &MiddlewareContext, next: Next<'_>, action: Action);
}

/// What a middleware can reach while handling an action
pub struct MiddlewareContext {
    core: Arc<StoreCore>,
    dispatcher: Dispatcher,
}

impl MiddlewareContext {
    pub(crate) fn new(core: Arc<StoreCore>, dispatcher: Dispatcher) -> Self {
        Self { core, dispatcher }
    }

    pub(crate) fn core(&self) -> &StoreCore {
        &self.core
    }

    /// Current state of the lane
    pub fn state(&self) -> Arc<BrowserState> {
        self.core.state()
    }

    /// Queue a follow-up action behind the one being processed
    pub fn dispatch(&self, action: impl Into<Action>) -> DispatchHandle {
        self.dispatcher.dispatch(action)
    }

    /// Dispatcher usable from spawned tasks
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}

/// Continuation running the rest of the chain
pub struct Next<'a> {
    chain: &'a mut [Box<dyn Middleware>],
    ctx: &'a MiddlewareContext,
    called: &'a Cell<bool>,
}

impl Next<'_> {
    /// Pass `action` to the next middleware, or to the reducer
    pub fn run(self, action: Action) {
        self.called.set(true);
        run_chain(self.chain, self.ctx, action);
    }
}

/// Run `action` through `chain` and finally the reducer
pub(crate) fn run_chain(chain: &mut [Box<dyn Middleware>], ctx: &MiddlewareContext, action: Action) {
    let Some((middleware, rest)) = chain.split_first_mut() else {
        ctx.core.apply(action);
        return;
    };

    let called = Cell::new(false);
    let fallback = action.clone();
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let next = Next {
            chain: &mut *rest,
            ctx,
            called: &called,
        };
        middleware.handle(ctx, next, action);
    }));

    if let Err(panic) = result {
        log::warn!(
            "Middleware panicked while handling {}: {}",
            fallback.name(),
            panic_message(panic.as_ref())
        );
        if !called.get() {
            run_chain(rest, ctx, fallback);
        }
    }
}

/// Best effort message of a caught panic
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");

        let payload: Box<dyn Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(payload.as_ref()), "bang");

        let payload: Box<dyn Any + Send> = Box::new(42);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic");
    }
}
