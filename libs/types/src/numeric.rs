//! Integer tick types for prices and quantities
//!
//! Prices are counted in smallest price increments and quantities in
//! smallest lot units; both travel as signed 64-bit little-endian on the
//! wire. Construction validates the engine-side invariant that both are
//! strictly positive, so a `Price` or `Qty` in hand is always well-formed.

use crate::errors::RejectError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Limit price in smallest increment units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    /// Validate a raw wire price. Must be strictly positive.
    pub fn try_new(raw: i64) -> Result<Self, RejectError> {
        if raw > 0 {
            Ok(Self(raw))
        } else {
            Err(RejectError::InvalidPrice(raw))
        }
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Order quantity in smallest lot units.
///
/// A `Qty` is never zero: an order with nothing left to fill is removed
/// rather than kept at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Qty(i64);

impl Qty {
    /// Validate a raw wire quantity. Must be strictly positive.
    pub fn try_new(raw: i64) -> Result<Self, RejectError> {
        if raw > 0 {
            Ok(Self(raw))
        } else {
            Err(RejectError::InvalidQuantity(raw))
        }
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }

    /// Remaining quantity after filling `by` units, or `None` once depleted.
    ///
    /// Callers must never fill more than is remaining; the result saturates
    /// to `None` rather than going negative.
    pub fn reduce(self, by: Qty) -> Option<Qty> {
        let left = self.0 - by.0;
        if left > 0 {
            Some(Qty(left))
        } else {
            None
        }
    }
}

impl fmt::Display for Qty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
