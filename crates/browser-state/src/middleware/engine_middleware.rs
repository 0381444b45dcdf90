//! Engine Middleware
//!
//! Binds tabs to engine sessions:
//! - creates sessions on demand and links them to their tab
//! - turns imperative engine actions (load, stop, reload, history) into calls
//!   on the tab's session
//! - forwards tracking protection changes to the session
//! - closes the sessions of removed tabs after the reducer dropped them
//! - suspends sessions and recovers crashed ones
//! - drops links of sessions that were closed before their link was reduced
//!
//! The sessions belong to this middleware instance. The state only carries an
//! [`EngineHandle`] so other middleware can find the session of a tab.
//!
//! Engine calls run on the injected tokio runtime, one after another in the
//! order the actions were processed. Failures are logged and never reach the
//! store.

use crate::actions::{
    Action, CrashAction, CustomTabListAction, EngineAction, TabListAction,
    TrackingProtectionAction,
};
use crate::middleware::engine_observer::EngineObserver;
use crate::middleware::{Middleware, MiddlewareContext, Next};
use crate::selectors::find_tab_or_custom_tab;
use crate::state::{BrowserState, EngineHandle, TabId};
use browser_engine::{Engine, EngineError, EngineSession, LoadUrlFlags};
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

type QueuedCall = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Middleware owning the engine sessions of all tabs
pub struct EngineMiddleware {
    engine: Arc<dyn Engine>,
    /// Sessions created by this middleware, including ones whose link action
    /// has not been reduced yet
    sessions: HashMap<TabId, Arc<dyn EngineSession>>,
    /// Sessions closed while their link action was still queued
    closed_before_link: Vec<Arc<dyn EngineSession>>,
    calls: mpsc::UnboundedSender<QueuedCall>,
}

impl EngineMiddleware {
    /// Create the middleware; engine calls are executed on `runtime`
    pub fn new(engine: Arc<dyn Engine>, runtime: Handle) -> Self {
        let (calls, mut queue) = mpsc::unbounded_channel::<QueuedCall>();
        runtime.spawn(async move {
            while let Some(call) = queue.recv().await {
                call.await;
            }
        });

        log::info!("EngineMiddleware: using engine {}", engine.name());
        Self {
            engine,
            sessions: HashMap::new(),
            closed_before_link: Vec::new(),
            calls,
        }
    }

    /// Queue an engine call, logging its failure
    fn call<F>(&self, tab_id: &TabId, operation: &'static str, call: F)
    where
        F: Future<Output = Result<(), EngineError>> + Send + 'static,
    {
        let tab_id = tab_id.clone();
        let queued = self.calls.send(Box::pin(async move {
            if let Err(e) = call.await {
                log::warn!("EngineMiddleware: {} failed for tab {}: {}", operation, tab_id, e);
            }
        }));
        if queued.is_err() {
            log::error!("EngineMiddleware: engine call queue closed, dropped {}", operation);
        }
    }

    /// Close a session: stop listening right away, release it in order
    fn close(&self, tab_id: &TabId, session: Arc<dyn EngineSession>) {
        log::debug!("EngineMiddleware: closing session of tab {}", tab_id);
        session.unregister_observers();
        self.call(tab_id, "close", async move {
            session.close().await;
            Ok(())
        });
    }

    /// Session currently bound to `tab_id`, without creating one
    fn session(&self, state: &BrowserState, tab_id: &TabId) -> Option<Arc<dyn EngineSession>> {
        if let Some(session) = self.sessions.get(tab_id) {
            return Some(Arc::clone(session));
        }
        find_tab_or_custom_tab(state, tab_id)
            .and_then(|tab| tab.engine_state.engine_session.as_ref())
            .map(|handle| Arc::clone(handle.session()))
    }

    /// Take the session bound to `tab_id` out of this middleware to close it
    fn take_session(&mut self, state: &BrowserState, tab_id: &TabId) -> Option<Arc<dyn EngineSession>> {
        let linked = find_tab_or_custom_tab(state, tab_id)
            .and_then(|tab| tab.engine_state.engine_session.clone());
        let Some(session) = self.sessions.remove(tab_id) else {
            return linked.map(|handle| Arc::clone(handle.session()));
        };
        if linked != Some(EngineHandle::new(Arc::clone(&session))) {
            self.closed_before_link.push(Arc::clone(&session));
        }
        Some(session)
    }

    /// Whether a queued link of `handle` must be dropped because its session
    /// is already closed
    fn drop_stale_link(&mut self, handle: &EngineHandle) -> bool {
        let stale = self
            .closed_before_link
            .iter()
            .position(|session| EngineHandle::new(Arc::clone(session)) == *handle);
        match stale {
            Some(position) => {
                self.closed_before_link.swap_remove(position);
                true
            }
            None => false,
        }
    }

    /// Session of `tab_id`, created and linked if the tab has none
    fn get_or_create_session(
        &mut self,
        ctx: &MiddlewareContext,
        tab_id: &TabId,
    ) -> Option<Arc<dyn EngineSession>> {
        let state = ctx.state();
        let Some(tab) = find_tab_or_custom_tab(&state, tab_id) else {
            log::warn!("EngineMiddleware: no tab {} to bind a session to", tab_id);
            return None;
        };

        if let Some(session) = self.session(&state, tab_id) {
            self.sessions
                .entry(tab_id.clone())
                .or_insert_with(|| Arc::clone(&session));
            return Some(session);
        }

        let session = self.engine.create_session(tab.is_private());
        session.register(Arc::new(EngineObserver::new(
            tab_id.clone(),
            ctx.dispatcher().clone(),
        )));
        if tab.tracking_protection.enabled {
            let session = Arc::clone(&session);
            self.call(tab_id, "update_tracking_protection", async move {
                session.update_tracking_protection(true).await
            });
        }
        self.sessions.insert(tab_id.clone(), Arc::clone(&session));

        log::debug!("EngineMiddleware: created session for tab {}", tab_id);
        ctx.dispatcher().send(EngineAction::LinkEngineSession {
            tab_id: tab_id.clone(),
            engine_session: EngineHandle::new(Arc::clone(&session)),
        });
        Some(session)
    }

    fn handle_engine_action(&mut self, ctx: &MiddlewareContext, action: &EngineAction) {
        let tab_id = action.tab_id();
        match action {
            EngineAction::CreateEngineSession { .. } => {
                self.get_or_create_session(ctx, tab_id);
            }
            EngineAction::LoadUrl { url, flags, .. } => {
                if let Some(session) = self.get_or_create_session(ctx, tab_id) {
                    let (url, flags) = (url.clone(), *flags);
                    self.call(tab_id, "load_url", async move {
                        session.load_url(&url, flags).await
                    });
                }
            }
            EngineAction::StopLoading { .. } => {
                if let Some(session) = self.get_or_create_session(ctx, tab_id) {
                    self.call(tab_id, "stop_loading", async move {
                        session.stop_loading().await
                    });
                }
            }
            EngineAction::Reload { flags, .. } => {
                if let Some(session) = self.get_or_create_session(ctx, tab_id) {
                    let flags = *flags;
                    self.call(tab_id, "reload", async move { session.reload(flags).await });
                }
            }
            EngineAction::GoBack { .. } => {
                if let Some(session) = self.get_or_create_session(ctx, tab_id) {
                    self.call(tab_id, "go_back", async move { session.go_back().await });
                }
            }
            EngineAction::GoForward { .. } => {
                if let Some(session) = self.get_or_create_session(ctx, tab_id) {
                    self.call(tab_id, "go_forward", async move { session.go_forward().await });
                }
            }
            EngineAction::LinkEngineSession { engine_session, .. } => {
                let session = Arc::clone(engine_session.session());
                if find_tab_or_custom_tab(&ctx.state(), tab_id).is_some() {
                    self.sessions.insert(tab_id.clone(), session);
                } else {
                    log::debug!("EngineMiddleware: tab {} is gone, not linking its session", tab_id);
                    self.sessions.remove(tab_id);
                    self.close(tab_id, session);
                }
            }
            EngineAction::UnlinkEngineSession { .. } => {
                self.sessions.remove(tab_id);
            }
            EngineAction::SuspendEngineSession { .. } => {}
        }
    }

    /// Close sessions of tabs that are in `before` but gone from the current state
    fn close_removed(&mut self, ctx: &MiddlewareContext, before: &BrowserState) {
        let after = ctx.state();
        let removed: Vec<TabId> = session_ids(before)
            .difference(&session_ids(&after))
            .map(|id| (*id).clone())
            .collect();

        for tab_id in removed {
            if let Some(session) = self.take_session(before, &tab_id) {
                self.close(&tab_id, session);
            }
        }
    }
}

fn session_ids(state: &BrowserState) -> HashSet<&TabId> {
    state
        .tabs
        .keys()
        .chain(state.custom_tabs.iter().map(|tab| &tab.id))
        .collect()
}

impl Middleware for EngineMiddleware {
    fn handle(&mut self, ctx: &MiddlewareContext, next: Next<'_>, action: Action) {
        match &action {
            Action::Engine(EngineAction::SuspendEngineSession { tab_id }) => {
                let tab_id = tab_id.clone();
                let session = self.take_session(&ctx.state(), &tab_id);
                next.run(action);
                if let Some(session) = session {
                    self.close(&tab_id, session);
                }
            }

            Action::Engine(EngineAction::LinkEngineSession {
                tab_id,
                engine_session,
            }) if self.drop_stale_link(engine_session) => {
                log::debug!("EngineMiddleware: dropping link of closed session for tab {}", tab_id);
            }

            Action::Engine(engine_action) => {
                self.handle_engine_action(ctx, engine_action);
                next.run(action);
            }

            Action::TrackingProtection(TrackingProtectionAction::ToggleAction {
                tab_id,
                enabled,
            }) => {
                let (tab_id, enabled) = (tab_id.clone(), *enabled);
                next.run(action);
                if let Some(session) = self.session(&ctx.state(), &tab_id) {
                    self.call(&tab_id, "update_tracking_protection", async move {
                        session.update_tracking_protection(enabled).await
                    });
                }
            }

            Action::Crash(CrashAction::RestoreCrashedSession { tab_id }) => {
                let tab_id = tab_id.clone();
                let before = ctx.state();
                let crashed = find_tab_or_custom_tab(&before, &tab_id)
                    .filter(|tab| tab.engine_state.crashed)
                    .map(|tab| tab.content.url.clone());
                let session = crashed
                    .as_ref()
                    .and_then(|_| self.take_session(&before, &tab_id));

                next.run(action);

                let Some(url) = crashed else {
                    return;
                };
                if let Some(session) = session {
                    self.close(&tab_id, session);
                }
                if !url.is_empty() {
                    ctx.dispatcher().send(EngineAction::LoadUrl {
                        tab_id,
                        url,
                        flags: LoadUrlFlags::empty(),
                    });
                }
            }

            Action::TabList(TabListAction::RemoveTab { .. })
            | Action::TabList(TabListAction::RemoveTabs { .. })
            | Action::TabList(TabListAction::RemoveAllTabs)
            | Action::TabList(TabListAction::RemoveAllNormalTabs)
            | Action::TabList(TabListAction::RemoveAllPrivateTabs)
            | Action::CustomTabList(CustomTabListAction::RemoveCustomTab { .. })
            | Action::CustomTabList(CustomTabListAction::RemoveAllCustomTabs) => {
                let before = ctx.state();
                next.run(action);
                self.close_removed(ctx, &before);
            }

            _ => next.run(action),
        }
    }
}
