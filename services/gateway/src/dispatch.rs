//! Command dispatch into the engine thread
//!
//! Two concurrency domains meet here. Connection handlers run concurrently
//! on the runtime, may suspend on sockets and queue space, and never touch
//! book logic. The engine runs on one dedicated OS thread, owns the book
//! outright, performs no I/O, and blocks on nothing except the next
//! command. The bounded command channel between them fixes the global
//! processing order: first enqueued, first applied, no peeking ahead.

use matching_engine::MatchingEngine;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{broadcast, mpsc};
use tracing::{info, warn};
use types::events::Event;
use types::order::OrderParams;

/// A decoded client request, tagged with where its private events go.
///
/// Carrying the reply sender inside the command keeps the engine
/// connection-aware without any shared connection registry: it answers on
/// whatever channel the command brought along.
#[derive(Debug)]
pub enum Command {
    Submit {
        params: OrderParams,
        reply: mpsc::Sender<Event>,
    },
    Cancel {
        client_id: u64,
        cl_ord_id: u64,
        reply: mpsc::Sender<Event>,
    },
}

/// Engine loop. Runs until every command sender is gone.
pub fn run(mut commands: mpsc::Receiver<Command>, public: broadcast::Sender<Event>) {
    let mut engine = MatchingEngine::new();
    info!("engine thread started");

    while let Some(command) = commands.blocking_recv() {
        let (events, reply) = match command {
            Command::Submit { params, reply } => (engine.submit(params), reply),
            Command::Cancel {
                client_id,
                cl_ord_id,
                reply,
            } => (engine.cancel(client_id, cl_ord_id), reply),
        };
        route(events, &reply, &public);
    }

    info!(
        open_orders = engine.open_orders(),
        "command channel closed; engine thread stopping"
    );
}

/// Deliver one command's events: all of them to the originating connection,
/// trades and book deltas additionally to the shared public stream, in
/// emission order. Neither path may ever block the engine.
fn route(events: Vec<Event>, reply: &mpsc::Sender<Event>, public: &broadcast::Sender<Event>) {
    for event in events {
        if event.is_public() {
            // Err here only means nobody is subscribed right now.
            let _ = public.send(event.clone());
        }
        match reply.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                // The client stopped draining its private queue. Dropping
                // the event keeps the engine unblocked; the public stream
                // is unaffected.
                warn!(event = event.label(), "private queue full, dropping event");
            }
            Err(TrySendError::Closed(_)) => {
                // Originating connection is gone; private delivery of its
                // remaining events is a no-op.
            }
        }
    }
}
