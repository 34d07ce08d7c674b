//! Order lifecycle types
//!
//! Raw wire fields come in as `OrderParams`; the engine turns them into a
//! validated `Order` before any book state is touched, so rejects occupy a
//! slot in the engine's ordered event stream like every other outcome.

use crate::errors::RejectError;
use crate::ids::OrderKey;
use crate::numeric::{Price, Qty};
use serde::{Deserialize, Serialize};

/// Order side (buyer or seller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order (bid)
    Buy,
    /// Sell order (ask)
    Sell,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    /// Wire encoding: 0 = buy, 1 = sell.
    pub fn to_wire(&self) -> u8 {
        match self {
            Side::Buy => 0,
            Side::Sell => 1,
        }
    }

    pub fn from_wire(raw: u8) -> Result<Self, RejectError> {
        match raw {
            0 => Ok(Side::Buy),
            1 => Ok(Side::Sell),
            other => Err(RejectError::InvalidSide(other)),
        }
    }
}

/// Time-in-force policy for orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeInForce {
    /// Good-Till-Cancel: rests until filled or explicitly canceled
    Gtc,
    /// Immediate-Or-Cancel: match immediately, discard the remainder
    Ioc,
}

impl TimeInForce {
    /// Wire encoding: 0 = GTC, 1 = IOC.
    pub fn to_wire(&self) -> u8 {
        match self {
            TimeInForce::Gtc => 0,
            TimeInForce::Ioc => 1,
        }
    }

    pub fn from_wire(raw: u8) -> Result<Self, RejectError> {
        match raw {
            0 => Ok(TimeInForce::Gtc),
            1 => Ok(TimeInForce::Ioc),
            other => Err(RejectError::InvalidTimeInForce(other)),
        }
    }
}

/// New-order fields exactly as they arrive off the wire.
///
/// Nothing here is validated; the codec only guarantees the frame was
/// structurally sound. Semantic validation is the engine's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderParams {
    pub client_id: u64,
    pub cl_ord_id: u64,
    pub side: u8,
    pub price: i64,
    pub qty: i64,
    pub tif: u8,
}

/// A validated order.
///
/// `seq` is the engine-assigned arrival sequence number, the only time axis
/// the matching algorithms ever see; wall clocks never reach the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub key: OrderKey,
    pub side: Side,
    pub price: Price,
    pub remaining: Qty,
    pub tif: TimeInForce,
    pub seq: u64,
}

impl Order {
    /// Validate raw wire fields into an order.
    ///
    /// Checks run in a fixed sequence (side, time in force, price, quantity)
    /// so that the reject reason for a multiply-invalid order is
    /// deterministic.
    pub fn validate(params: &OrderParams, seq: u64) -> Result<Self, RejectError> {
        let side = Side::from_wire(params.side)?;
        let tif = TimeInForce::from_wire(params.tif)?;
        let price = Price::try_new(params.price)?;
        let remaining = Qty::try_new(params.qty)?;

        Ok(Self {
            key: OrderKey::from_raw(params.client_id, params.cl_ord_id),
            side,
            price,
            remaining,
            tif,
            seq,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> OrderParams {
        OrderParams {
            client_id: 2,
            cl_ord_id: 2001,
            side: 1,
            price: 101_000,
            qty: 5_000,
            tif: 0,
        }
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Buy.opposite(), Side::Sell);
        assert_eq!(Side::Sell.opposite(), Side::Buy);
    }

    #[test]
    fn test_side_wire_round_trip() {
        for side in [Side::Buy, Side::Sell] {
            assert_eq!(Side::from_wire(side.to_wire()), Ok(side));
        }
        assert_eq!(Side::from_wire(2), Err(RejectError::InvalidSide(2)));
    }

    #[test]
    fn test_tif_wire_round_trip() {
        for tif in [TimeInForce::Gtc, TimeInForce::Ioc] {
            assert_eq!(TimeInForce::from_wire(tif.to_wire()), Ok(tif));
        }
        assert_eq!(
            TimeInForce::from_wire(9),
            Err(RejectError::InvalidTimeInForce(9))
        );
    }

    #[test]
    fn test_validate_accepts_well_formed_order() {
        let order = Order::validate(&params(), 7).unwrap();
        assert_eq!(order.key, OrderKey::from_raw(2, 2001));
        assert_eq!(order.side, Side::Sell);
        assert_eq!(order.price.as_i64(), 101_000);
        assert_eq!(order.remaining.as_i64(), 5_000);
        assert_eq!(order.tif, TimeInForce::Gtc);
        assert_eq!(order.seq, 7);
    }

    #[test]
    fn test_validate_rejects_bad_side() {
        let bad = OrderParams { side: 3, ..params() };
        assert_eq!(
            Order::validate(&bad, 0),
            Err(RejectError::InvalidSide(3))
        );
    }

    #[test]
    fn test_validate_rejects_bad_tif() {
        let bad = OrderParams { tif: 5, ..params() };
        assert_eq!(
            Order::validate(&bad, 0),
            Err(RejectError::InvalidTimeInForce(5))
        );
    }

    #[test]
    fn test_validate_rejects_non_positive_price() {
        let bad = OrderParams { price: 0, ..params() };
        assert_eq!(Order::validate(&bad, 0), Err(RejectError::InvalidPrice(0)));
    }

    #[test]
    fn test_validate_rejects_non_positive_qty() {
        let bad = OrderParams { qty: -10, ..params() };
        assert_eq!(
            Order::validate(&bad, 0),
            Err(RejectError::InvalidQuantity(-10))
        );
    }

    #[test]
    fn test_validate_reason_order_is_fixed() {
        // Everything invalid at once: the side check runs first.
        let bad = OrderParams {
            side: 9,
            price: -1,
            qty: 0,
            tif: 4,
            ..params()
        };
        assert_eq!(Order::validate(&bad, 0), Err(RejectError::InvalidSide(9)));
    }
}
