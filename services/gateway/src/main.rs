//! TCP gateway for the exchange core
//!
//! Accepts client connections, spawns one handler per socket, and bridges
//! them to the single matching-engine thread over bounded channels. The
//! handlers live in the async runtime and never touch book state; the
//! engine thread never touches a socket.

mod config;
mod connection;
mod dispatch;
mod error;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};

use config::GatewayConfig;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = GatewayConfig::from_env()?;
    tracing::info!("starting gateway");

    // The command channel is the sole serialization point: admission order
    // here is the engine's processing order.
    let (command_tx, command_rx) = mpsc::channel(config.command_queue);
    let (public_tx, _) = broadcast::channel(config.public_queue);

    let engine_feed = public_tx.clone();
    std::thread::Builder::new()
        .name("matching-engine".into())
        .spawn(move || dispatch::run(command_rx, engine_feed))
        .context("failed to spawn engine thread")?;

    let listener = TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    tracing::info!(addr = %listener.local_addr()?, "gateway listening");

    loop {
        let (socket, peer) = listener.accept().await?;
        tracing::info!(%peer, "client connected");

        let command_tx = command_tx.clone();
        let public_tx = public_tx.clone();
        let private_queue = config.private_queue;
        tokio::spawn(async move {
            match connection::handle(socket, command_tx, public_tx, private_queue).await {
                Ok(()) => tracing::info!(%peer, "client disconnected"),
                Err(error) => tracing::warn!(%peer, %error, "connection closed"),
            }
        });
    }
}
