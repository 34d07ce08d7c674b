//! Binary wire protocol for the exchange core
//!
//! Every frame is `[u32 total_length][u16 message_type][u16 body_length][body]`
//! with all integers little-endian. `total_length` counts everything after
//! itself (type field, body_length field, and body); `body_length` counts
//! only the body.
//!
//! The codec is stateless and symmetric: the gateway decodes requests and
//! encodes events, reference clients do the opposite, and both directions
//! live here so either end of a socket can be driven from this crate.

pub mod frame;

pub use frame::{
    decode_event, decode_request, encode_event, encode_request, FrameError, Request, MAX_FRAME_LEN,
};
