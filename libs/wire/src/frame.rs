//! Frame assembly and message bodies
//!
//! Decoding never consumes a partial frame: until a complete frame is
//! buffered the decoders return `Ok(None)` and leave the buffer untouched,
//! so callers can retain an unconsumed remainder across socket reads.
//! Structurally impossible frames (oversized declared length, unknown type,
//! header mismatch, wrong body size) return a `FrameError`; the documented
//! policy is that every such error is fatal to the connection — there is no
//! resynchronization heuristic.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use thiserror::Error;
use types::events::Event;
use types::ids::ClientId;
use types::numeric::{Price, Qty};
use types::order::{OrderParams, Side};

/// Hard cap on the declared total_length of a frame.
///
/// The largest legitimate frame is a REJECT with a short reason string;
/// anything near this cap is garbage or an attack.
pub const MAX_FRAME_LEN: usize = 64 * 1024;

pub const MSG_PING: u16 = 1;
pub const MSG_NEW_ORDER: u16 = 10;
pub const MSG_CANCEL: u16 = 11;
pub const MSG_ACK: u16 = 100;
pub const MSG_TRADE: u16 = 101;
pub const MSG_BOOK_DELTA: u16 = 102;
pub const MSG_REJECT: u16 = 199;

const NEW_ORDER_BODY: usize = 34;
const CANCEL_BODY: usize = 16;
const TRADE_BODY: usize = 32;
const BOOK_DELTA_BODY: usize = 17;

/// Framing errors. All of them terminate the connection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("declared frame length {declared} exceeds cap {max}")]
    Oversized { declared: usize, max: usize },

    #[error("declared frame length {0} too short for a header")]
    Undersized(u32),

    #[error("unknown message type {0}")]
    UnknownType(u16),

    #[error("header mismatch: total_length {total} but body_length {body}")]
    LengthMismatch { total: u32, body: u16 },

    #[error("{kind} body is {actual} bytes, expected {expected}")]
    BadBody {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid side byte {0}")]
    BadSide(u8),

    #[error("{kind} field out of range")]
    BadValue { kind: &'static str },

    #[error("text payload is not valid UTF-8")]
    BadText,
}

/// A decoded inbound application message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    Ping,
    NewOrder(OrderParams),
    Cancel { client_id: u64, cl_ord_id: u64 },
}

/// Split one complete frame off the front of `buf`.
///
/// Returns the message type and body, or `None` when more bytes are needed.
/// Length-field errors are detected before anything is consumed.
fn split_frame(buf: &mut BytesMut) -> Result<Option<(u16, Bytes)>, FrameError> {
    if buf.len() < 4 {
        return Ok(None);
    }
    let total = u32::from_le_bytes(buf[0..4].try_into().unwrap());
    if total as usize > MAX_FRAME_LEN {
        return Err(FrameError::Oversized {
            declared: total as usize,
            max: MAX_FRAME_LEN,
        });
    }
    if total < 4 {
        return Err(FrameError::Undersized(total));
    }
    if buf.len() < 4 + total as usize {
        return Ok(None);
    }

    let mut frame = buf.split_to(4 + total as usize);
    frame.advance(4);
    let msg_type = frame.get_u16_le();
    let body_len = frame.get_u16_le();
    if body_len as u32 != total - 4 {
        return Err(FrameError::LengthMismatch {
            total,
            body: body_len,
        });
    }
    Ok(Some((msg_type, frame.freeze())))
}

fn expect_body(kind: &'static str, body: &Bytes, expected: usize) -> Result<(), FrameError> {
    if body.len() == expected {
        Ok(())
    } else {
        Err(FrameError::BadBody {
            kind,
            expected,
            actual: body.len(),
        })
    }
}

fn put_header(dst: &mut BytesMut, msg_type: u16, body_len: usize) {
    debug_assert!(body_len <= u16::MAX as usize);
    dst.put_u32_le((4 + body_len) as u32);
    dst.put_u16_le(msg_type);
    dst.put_u16_le(body_len as u16);
}

fn put_text(dst: &mut BytesMut, text: &str) {
    dst.put_u16_le(text.len() as u16);
    dst.put_slice(text.as_bytes());
}

// The caller has already consumed the leading u64, so `body` starts at the
// text_len field; reported sizes account for those 8 bytes.
fn take_text(kind: &'static str, body: &mut Bytes) -> Result<String, FrameError> {
    if body.len() < 2 {
        return Err(FrameError::BadBody {
            kind,
            expected: 10,
            actual: 8 + body.len(),
        });
    }
    let text_len = body.get_u16_le() as usize;
    if body.len() != text_len {
        return Err(FrameError::BadBody {
            kind,
            expected: 10 + text_len,
            actual: 10 + body.len(),
        });
    }
    String::from_utf8(body.to_vec()).map_err(|_| FrameError::BadText)
}

/// Decode one inbound frame (gateway side).
///
/// `Ok(None)` means the buffer holds an incomplete frame; nothing was
/// consumed. Event-typed frames arriving inbound are protocol violations.
pub fn decode_request(buf: &mut BytesMut) -> Result<Option<Request>, FrameError> {
    let Some((msg_type, mut body)) = split_frame(buf)? else {
        return Ok(None);
    };
    match msg_type {
        MSG_PING => {
            expect_body("PING", &body, 0)?;
            Ok(Some(Request::Ping))
        }
        MSG_NEW_ORDER => {
            expect_body("NEW_ORDER", &body, NEW_ORDER_BODY)?;
            let client_id = body.get_u64_le();
            let cl_ord_id = body.get_u64_le();
            let side = body.get_u8();
            let price = body.get_i64_le();
            let qty = body.get_i64_le();
            let tif = body.get_u8();
            Ok(Some(Request::NewOrder(OrderParams {
                client_id,
                cl_ord_id,
                side,
                price,
                qty,
                tif,
            })))
        }
        MSG_CANCEL => {
            expect_body("CANCEL", &body, CANCEL_BODY)?;
            let client_id = body.get_u64_le();
            let cl_ord_id = body.get_u64_le();
            Ok(Some(Request::Cancel {
                client_id,
                cl_ord_id,
            }))
        }
        other => Err(FrameError::UnknownType(other)),
    }
}

/// Decode one outbound frame (client side).
///
/// Request-typed frames arriving here are protocol violations.
pub fn decode_event(buf: &mut BytesMut) -> Result<Option<Event>, FrameError> {
    let Some((msg_type, mut body)) = split_frame(buf)? else {
        return Ok(None);
    };
    match msg_type {
        MSG_ACK => {
            if body.len() < 8 {
                return Err(FrameError::BadBody {
                    kind: "ACK",
                    expected: 10,
                    actual: body.len(),
                });
            }
            let cl_ord_id = body.get_u64_le();
            let text = take_text("ACK", &mut body)?;
            Ok(Some(Event::Ack { cl_ord_id, text }))
        }
        MSG_TRADE => {
            expect_body("TRADE", &body, TRADE_BODY)?;
            let price = body.get_i64_le();
            let qty = body.get_i64_le();
            let taker = body.get_u64_le();
            let maker = body.get_u64_le();
            Ok(Some(Event::Trade {
                price: Price::try_new(price)
                    .map_err(|_| FrameError::BadValue { kind: "TRADE" })?,
                qty: Qty::try_new(qty).map_err(|_| FrameError::BadValue { kind: "TRADE" })?,
                taker: ClientId::new(taker),
                maker: ClientId::new(maker),
            }))
        }
        MSG_BOOK_DELTA => {
            expect_body("BOOK_DELTA", &body, BOOK_DELTA_BODY)?;
            let side = body.get_u8();
            let price = body.get_i64_le();
            let level_qty = body.get_i64_le();
            Ok(Some(Event::BookDelta {
                side: Side::from_wire(side).map_err(|_| FrameError::BadSide(side))?,
                price: Price::try_new(price)
                    .map_err(|_| FrameError::BadValue { kind: "BOOK_DELTA" })?,
                level_qty,
            }))
        }
        MSG_REJECT => {
            if body.len() < 8 {
                return Err(FrameError::BadBody {
                    kind: "REJECT",
                    expected: 10,
                    actual: body.len(),
                });
            }
            let cl_ord_id = body.get_u64_le();
            let reason = take_text("REJECT", &mut body)?;
            Ok(Some(Event::Reject { cl_ord_id, reason }))
        }
        other => Err(FrameError::UnknownType(other)),
    }
}

/// Append one encoded request frame to `dst`.
pub fn encode_request(request: &Request, dst: &mut BytesMut) {
    match request {
        Request::Ping => put_header(dst, MSG_PING, 0),
        Request::NewOrder(params) => {
            put_header(dst, MSG_NEW_ORDER, NEW_ORDER_BODY);
            dst.put_u64_le(params.client_id);
            dst.put_u64_le(params.cl_ord_id);
            dst.put_u8(params.side);
            dst.put_i64_le(params.price);
            dst.put_i64_le(params.qty);
            dst.put_u8(params.tif);
        }
        Request::Cancel {
            client_id,
            cl_ord_id,
        } => {
            put_header(dst, MSG_CANCEL, CANCEL_BODY);
            dst.put_u64_le(*client_id);
            dst.put_u64_le(*cl_ord_id);
        }
    }
}

/// Append one encoded event frame to `dst`.
pub fn encode_event(event: &Event, dst: &mut BytesMut) {
    match event {
        Event::Ack { cl_ord_id, text } => {
            put_header(dst, MSG_ACK, 10 + text.len());
            dst.put_u64_le(*cl_ord_id);
            put_text(dst, text);
        }
        Event::Reject { cl_ord_id, reason } => {
            put_header(dst, MSG_REJECT, 10 + reason.len());
            dst.put_u64_le(*cl_ord_id);
            put_text(dst, reason);
        }
        Event::Trade {
            price,
            qty,
            taker,
            maker,
        } => {
            put_header(dst, MSG_TRADE, TRADE_BODY);
            dst.put_i64_le(price.as_i64());
            dst.put_i64_le(qty.as_i64());
            dst.put_u64_le(taker.as_u64());
            dst.put_u64_le(maker.as_u64());
        }
        Event::BookDelta {
            side,
            price,
            level_qty,
        } => {
            put_header(dst, MSG_BOOK_DELTA, BOOK_DELTA_BODY);
            dst.put_u8(side.to_wire());
            dst.put_i64_le(price.as_i64());
            dst.put_i64_le(*level_qty);
        }
    }
}
