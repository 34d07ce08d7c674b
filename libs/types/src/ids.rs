//! Identifier types for clients and orders
//!
//! Identities arrive on the wire as plain u64 values. A `cl_ord_id` is
//! scoped to the client that assigned it, so the composite `OrderKey` is the
//! only connection-independent identity an order has.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a trading client.
///
/// Clients choose their own identifier; the core treats it as opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(u64);

impl ClientId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Client-assigned order identifier.
///
/// Unique only within the assigning client, never globally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClOrdId(u64);

impl ClOrdId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ClOrdId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Composite identity of an order: owning client plus client-scoped id.
///
/// This is the key used for cancels and for the resting-order index; it
/// survives the originating connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderKey {
    pub client_id: ClientId,
    pub cl_ord_id: ClOrdId,
}

impl OrderKey {
    pub fn new(client_id: ClientId, cl_ord_id: ClOrdId) -> Self {
        Self {
            client_id,
            cl_ord_id,
        }
    }

    /// Build a key straight from raw wire fields.
    pub fn from_raw(client_id: u64, cl_ord_id: u64) -> Self {
        Self::new(ClientId::new(client_id), ClOrdId::new(cl_ord_id))
    }
}

impl fmt::Display for OrderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.client_id, self.cl_ord_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_id_round_trip() {
        let id = ClientId::new(42);
        assert_eq!(id.as_u64(), 42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_order_key_equality() {
        let a = OrderKey::from_raw(1, 1001);
        let b = OrderKey::from_raw(1, 1001);
        let c = OrderKey::from_raw(2, 1001);
        assert_eq!(a, b);
        assert_ne!(a, c, "same cl_ord_id under different clients is a different order");
    }

    #[test]
    fn test_order_key_display() {
        let key = OrderKey::from_raw(7, 31);
        assert_eq!(key.to_string(), "7:31");
    }

    #[test]
    fn test_order_key_serialization() {
        let key = OrderKey::from_raw(3, 3001);
        let json = serde_json::to_string(&key).unwrap();
        let deserialized: OrderKey = serde_json::from_str(&json).unwrap();
        assert_eq!(key, deserialized);
    }
}
