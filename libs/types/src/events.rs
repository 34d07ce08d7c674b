//! Events emitted by the matching engine
//!
//! An event is an immutable fact about one point in the engine's strictly
//! ordered processing sequence; it is never revised after emission. Trades
//! and book deltas fan out to every connection as public market data, while
//! acks and rejects stay on the originating connection's private stream.

use crate::ids::ClientId;
use crate::numeric::{Price, Qty};
use crate::order::Side;
use serde::{Deserialize, Serialize};

/// Fixed acknowledgement payload for pings.
pub const PONG: &str = "pong";

/// One engine-produced event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Command accepted and processed ("processed", not "filled").
    Ack { cl_ord_id: u64, text: String },
    /// Command rejected before or during processing.
    Reject { cl_ord_id: u64, reason: String },
    /// One match between an incoming taker and a resting maker.
    Trade {
        price: Price,
        qty: Qty,
        taker: ClientId,
        maker: ClientId,
    },
    /// Aggregate resting quantity changed at a price. Zero means the level
    /// is now empty.
    BookDelta {
        side: Side,
        price: Price,
        level_qty: i64,
    },
}

impl Event {
    /// Plain ack for a processed command.
    pub fn ack(cl_ord_id: u64) -> Self {
        Event::Ack {
            cl_ord_id,
            text: String::new(),
        }
    }

    /// Ack answering a ping. Carries no order identity.
    pub fn pong() -> Self {
        Event::Ack {
            cl_ord_id: 0,
            text: PONG.to_string(),
        }
    }

    /// Reject carrying the rendered reason text.
    pub fn reject(cl_ord_id: u64, reason: &crate::errors::RejectError) -> Self {
        Event::Reject {
            cl_ord_id,
            reason: reason.to_string(),
        }
    }

    /// Whether this event belongs on the shared market-data stream.
    ///
    /// Acks and rejects are private to the originating connection.
    pub fn is_public(&self) -> bool {
        matches!(self, Event::Trade { .. } | Event::BookDelta { .. })
    }

    /// Event type as a string label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Event::Ack { .. } => "Ack",
            Event::Reject { .. } => "Reject",
            Event::Trade { .. } => "Trade",
            Event::BookDelta { .. } => "BookDelta",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RejectError;

    #[test]
    fn test_public_split() {
        let trade = Event::Trade {
            price: Price::try_new(100).unwrap(),
            qty: Qty::try_new(1).unwrap(),
            taker: ClientId::new(3),
            maker: ClientId::new(2),
        };
        let delta = Event::BookDelta {
            side: Side::Sell,
            price: Price::try_new(100).unwrap(),
            level_qty: 0,
        };
        assert!(trade.is_public());
        assert!(delta.is_public());
        assert!(!Event::ack(1).is_public());
        assert!(!Event::reject(1, &RejectError::NotFound).is_public());
    }

    #[test]
    fn test_pong_payload() {
        match Event::pong() {
            Event::Ack { cl_ord_id, text } => {
                assert_eq!(cl_ord_id, 0);
                assert_eq!(text, "pong");
            }
            other => panic!("expected Ack, got {}", other.label()),
        }
    }

    #[test]
    fn test_reject_carries_reason_text() {
        match Event::reject(9, &RejectError::NotFound) {
            Event::Reject { cl_ord_id, reason } => {
                assert_eq!(cl_ord_id, 9);
                assert_eq!(reason, "not found");
            }
            other => panic!("expected Reject, got {}", other.label()),
        }
    }

    #[test]
    fn test_event_serialization() {
        let event = Event::BookDelta {
            side: Side::Buy,
            price: Price::try_new(101_000).unwrap(),
            level_qty: 3_000,
        };
        let json = serde_json::to_string(&event).unwrap();
        let deserialized: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deserialized);
    }
}
