//! Reject taxonomy for command validation
//!
//! Every variant maps to a non-fatal command outcome: the command is
//! answered with a REJECT on the private stream and engine state is left
//! untouched. The rendered message travels as the reject reason text, so
//! wording here is part of the protocol surface.

use thiserror::Error;

/// Why a command could not be applied.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectError {
    #[error("invalid side: {0}")]
    InvalidSide(u8),

    #[error("invalid time in force: {0}")]
    InvalidTimeInForce(u8),

    #[error("invalid price: {0}")]
    InvalidPrice(i64),

    #[error("invalid quantity: {0}")]
    InvalidQuantity(i64),

    #[error("duplicate order id")]
    DuplicateOrderId,

    #[error("not found")]
    NotFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_reason_text() {
        assert_eq!(RejectError::NotFound.to_string(), "not found");
    }

    #[test]
    fn test_invalid_price_reason_text() {
        assert_eq!(
            RejectError::InvalidPrice(-3).to_string(),
            "invalid price: -3"
        );
    }

    #[test]
    fn test_invalid_side_reason_text() {
        assert_eq!(RejectError::InvalidSide(7).to_string(), "invalid side: 7");
    }
}
