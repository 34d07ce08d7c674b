//! Connection error taxonomy
//!
//! Every variant here is fatal to one connection and to nothing else.
//! Framing violations close the socket without emitting any event; the
//! engine never learns the connection existed.

use thiserror::Error;
use wire::FrameError;

/// Why a connection was torn down.
#[derive(Error, Debug)]
pub enum ConnectionError {
    #[error("socket error: {0}")]
    Io(#[from] std::io::Error),

    #[error("protocol violation: {0}")]
    Frame(#[from] FrameError),

    #[error("engine unavailable")]
    EngineGone,

    #[error("dropped {0} events behind the public stream")]
    Lagged(u64),
}
