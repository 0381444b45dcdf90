//! Store lane
//!
//! A dedicated thread that takes actions off the store channel one at a time
//! and runs each through the middleware chain and the reducer. This is the
//! only place state transitions happen, so reducers never observe concurrent
//! mutation.
//!
//! Actions dispatched by middleware go back onto the same channel and are
//! processed after the action that triggered them.

use crate::dispatcher::Envelope;
use crate::middleware::{run_chain, Middleware, MiddlewareContext};
use std::thread;
use tokio::sync::mpsc::UnboundedReceiver;

/// Spawn the lane thread
///
/// The thread runs until every sender of the channel is gone.
pub(crate) fn spawn_lane(
    receiver: UnboundedReceiver<Envelope>,
    ctx: MiddlewareContext,
    middleware: Vec<Box<dyn Middleware>>,
) -> std::io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("browser-store".to_string())
        .spawn(move || lane_loop(receiver, ctx, middleware))
}

fn lane_loop(
    mut receiver: UnboundedReceiver<Envelope>,
    ctx: MiddlewareContext,
    mut middleware: Vec<Box<dyn Middleware>>,
) {
    log::info!("Store lane started with {} middleware", middleware.len());

    while let Some(Envelope { action, completion }) = receiver.blocking_recv() {
        run_chain(&mut middleware, &ctx, action);

        if let Some(completion) = completion {
            // The caller may have dropped its handle
            let _ = completion.send(());
        }
        ctx.core().finish_action();
    }

    log::info!("Store lane stopped");
}
