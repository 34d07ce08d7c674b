//! Crossing detection logic
//!
//! Determines when an incoming order can match against the opposing side's
//! best price. The resting side always sets the execution price, so this
//! predicate only decides *whether* a match happens, never at what price.

use types::numeric::Price;
use types::order::Side;

/// Check if an incoming order's limit crosses a resting price.
///
/// An incoming buy crosses when its limit is at or above the best ask; an
/// incoming sell crosses when its limit is at or below the best bid.
pub fn crosses(incoming: Side, limit: Price, resting: Price) -> bool {
    match incoming {
        Side::Buy => limit >= resting,
        Side::Sell => limit <= resting,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price(raw: i64) -> Price {
        Price::try_new(raw).unwrap()
    }

    #[test]
    fn test_buy_crosses_lower_ask() {
        assert!(crosses(Side::Buy, price(50_000), price(49_000)));
    }

    #[test]
    fn test_equal_prices_cross() {
        assert!(crosses(Side::Buy, price(50_000), price(50_000)));
        assert!(crosses(Side::Sell, price(50_000), price(50_000)));
    }

    #[test]
    fn test_buy_below_ask_does_not_cross() {
        assert!(!crosses(Side::Buy, price(49_000), price(50_000)));
    }

    #[test]
    fn test_sell_crosses_higher_bid() {
        assert!(crosses(Side::Sell, price(49_000), price(50_000)));
    }

    #[test]
    fn test_sell_above_bid_does_not_cross() {
        assert!(!crosses(Side::Sell, price(51_000), price(50_000)));
    }
}
