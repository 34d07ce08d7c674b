//! Per-connection handler
//!
//! One handler per accepted socket, split into a read half and a write
//! half. The read half assembles frames, translates them into commands
//! tagged with this connection's private reply queue, and forwards them to
//! the engine; the write half drains the private queue and the public
//! market-data feed back onto the socket. Either half ending tears the
//! whole connection down; commands already admitted to the engine still
//! execute, their private events landing in a closed channel as no-ops.

use bytes::BytesMut;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, warn};
use types::events::Event;
use wire::{decode_request, encode_event, Request};

use crate::dispatch::Command;
use crate::error::ConnectionError;

const READ_BUF_CAPACITY: usize = 16 * 1024;

/// Serve one client connection until it closes or faults.
pub async fn handle(
    socket: TcpStream,
    commands: mpsc::Sender<Command>,
    public: broadcast::Sender<Event>,
    private_queue: usize,
) -> Result<(), ConnectionError> {
    socket.set_nodelay(true)?;

    let (private_tx, private_rx) = mpsc::channel(private_queue);
    let public_rx = public.subscribe();
    let (read_half, write_half) = socket.into_split();

    // Whichever half finishes first wins the select and drops the other,
    // which releases this connection's private queue.
    tokio::select! {
        result = read_loop(read_half, commands, private_tx) => result,
        result = write_loop(write_half, private_rx, public_rx) => result,
    }
}

async fn read_loop(
    mut socket: OwnedReadHalf,
    commands: mpsc::Sender<Command>,
    private: mpsc::Sender<Event>,
) -> Result<(), ConnectionError> {
    let mut buf = BytesMut::with_capacity(READ_BUF_CAPACITY);
    loop {
        if socket.read_buf(&mut buf).await? == 0 {
            return Ok(()); // peer closed
        }

        // Drain every complete frame; the decoder keeps any partial
        // remainder in the buffer for the next read.
        while let Some(request) = decode_request(&mut buf)? {
            match request {
                Request::Ping => {
                    // Needs no book state, so it never reaches the engine:
                    // answer straight onto this connection's private queue.
                    debug!("ping");
                    if private.send(Event::pong()).await.is_err() {
                        return Ok(());
                    }
                }
                Request::NewOrder(params) => {
                    forward(
                        &commands,
                        Command::Submit {
                            params,
                            reply: private.clone(),
                        },
                    )
                    .await?;
                }
                Request::Cancel {
                    client_id,
                    cl_ord_id,
                } => {
                    forward(
                        &commands,
                        Command::Cancel {
                            client_id,
                            cl_ord_id,
                            reply: private.clone(),
                        },
                    )
                    .await?;
                }
            }
        }
    }
}

// `send().await` applies backpressure from a full command channel to this
// handler alone; the socket simply stops being read until space frees up.
async fn forward(
    commands: &mpsc::Sender<Command>,
    command: Command,
) -> Result<(), ConnectionError> {
    commands
        .send(command)
        .await
        .map_err(|_| ConnectionError::EngineGone)
}

async fn write_loop(
    mut socket: OwnedWriteHalf,
    mut private: mpsc::Receiver<Event>,
    mut public: broadcast::Receiver<Event>,
) -> Result<(), ConnectionError> {
    let mut out = BytesMut::with_capacity(READ_BUF_CAPACITY);
    loop {
        let event = tokio::select! {
            private_event = private.recv() => match private_event {
                Some(event) => event,
                // All senders gone: the read half already shut down.
                None => return Ok(()),
            },
            public_event = public.recv() => match public_event {
                Ok(event) => event,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    // The bounded ring overwrote entries this consumer had
                    // not read; it can no longer observe a gap-free public
                    // stream. Disconnect rather than serve stale data.
                    warn!(skipped, "consumer lagged behind the public stream");
                    return Err(ConnectionError::Lagged(skipped));
                }
                Err(broadcast::error::RecvError::Closed) => {
                    return Err(ConnectionError::EngineGone);
                }
            },
        };

        out.clear();
        encode_event(&event, &mut out);
        socket.write_all(&out).await?;
    }
}
