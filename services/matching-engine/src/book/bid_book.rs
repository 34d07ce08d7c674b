//! Bid (buy-side) order book
//!
//! Maintains buy orders sorted by price descending (best bid first).
//! Uses BTreeMap so iteration order is deterministic.

use std::collections::BTreeMap;
use types::ids::OrderKey;
use types::numeric::{Price, Qty};
use types::order::Order;

use super::price_level::PriceLevel;
use super::HeadFill;

/// Bid (buy) side order book
///
/// Levels are keyed by price; the best bid is the highest price. At each
/// price level, orders are maintained in FIFO order.
#[derive(Debug, Clone, Default)]
pub struct BidBook {
    /// Price levels; `next_back()` is the best bid
    levels: BTreeMap<Price, PriceLevel>,
}

impl BidBook {
    /// Create a new empty bid book
    pub fn new() -> Self {
        Self {
            levels: BTreeMap::new(),
        }
    }

    /// Insert an order at the tail of its price level, creating the level
    /// if absent.
    pub fn insert(&mut self, order: &Order) {
        self.levels
            .entry(order.price)
            .or_default()
            .push_back(order.key, order.remaining, order.seq);
    }

    /// Best bid price (highest), `None` if the side is empty.
    pub fn best(&self) -> Option<Price> {
        self.levels.keys().next_back().copied()
    }

    /// The next order to match on this side: head of the best level.
    pub fn best_head(&self) -> Option<(Price, OrderKey, Qty)> {
        self.levels
            .iter()
            .next_back()
            .and_then(|(price, level)| level.head().map(|(key, qty)| (*price, key, qty)))
    }

    /// Fill the head of the level at `price`, dropping the level once empty.
    ///
    /// A missing level is a no-op reported as an already-empty level.
    pub fn reduce_head(&mut self, price: Price, fill: Qty) -> HeadFill {
        let Some(level) = self.levels.get_mut(&price) else {
            return HeadFill {
                level_qty: 0,
                closed: None,
            };
        };
        let closed = level.reduce_head(fill);
        let level_qty = level.total_qty();
        if level.is_empty() {
            self.levels.remove(&price);
        }
        HeadFill { level_qty, closed }
    }

    /// Remove a specific resting order, dropping its level once empty.
    ///
    /// Returns the removed order's remaining quantity; `None` signals a
    /// miss, which is a valid outcome rather than an error.
    pub fn remove(&mut self, key: &OrderKey, price: Price) -> Option<Qty> {
        let level = self.levels.get_mut(&price)?;
        let removed = level.remove(key)?;
        if level.is_empty() {
            self.levels.remove(&price);
        }
        Some(removed)
    }

    /// Aggregate resting quantity at `price`, 0 if the level is absent.
    pub fn level_qty(&self, price: Price) -> i64 {
        self.levels.get(&price).map_or(0, PriceLevel::total_qty)
    }

    /// Iterate levels best-first (price descending).
    pub fn levels(&self) -> impl Iterator<Item = (Price, &PriceLevel)> + '_ {
        self.levels.iter().rev().map(|(price, level)| (*price, level))
    }

    /// Check if the bid book is empty
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Number of price levels
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::order::{Side, TimeInForce};

    fn order(cl_ord_id: u64, price: i64, qty: i64, seq: u64) -> Order {
        Order {
            key: OrderKey::from_raw(1, cl_ord_id),
            side: Side::Buy,
            price: Price::try_new(price).unwrap(),
            remaining: Qty::try_new(qty).unwrap(),
            tif: TimeInForce::Gtc,
            seq,
        }
    }

    #[test]
    fn test_bid_book_best_is_highest() {
        let mut book = BidBook::new();
        book.insert(&order(1, 50_000, 10, 0));
        book.insert(&order(2, 51_000, 20, 1));
        book.insert(&order(3, 49_000, 15, 2));

        assert_eq!(book.best(), Some(Price::try_new(51_000).unwrap()));
        let (price, key, qty) = book.best_head().unwrap();
        assert_eq!(price.as_i64(), 51_000);
        assert_eq!(key, OrderKey::from_raw(1, 2));
        assert_eq!(qty.as_i64(), 20);
    }

    #[test]
    fn test_bid_book_levels_descend() {
        let mut book = BidBook::new();
        book.insert(&order(1, 50_000, 10, 0));
        book.insert(&order(2, 52_000, 20, 1));
        book.insert(&order(3, 51_000, 15, 2));

        let prices: Vec<i64> = book.levels().map(|(price, _)| price.as_i64()).collect();
        assert_eq!(prices, vec![52_000, 51_000, 50_000]);
    }

    #[test]
    fn test_bid_book_same_price_shares_level() {
        let mut book = BidBook::new();
        book.insert(&order(1, 50_000, 10, 0));
        book.insert(&order(2, 50_000, 20, 1));

        assert_eq!(book.level_count(), 1);
        assert_eq!(book.level_qty(Price::try_new(50_000).unwrap()), 30);
    }

    #[test]
    fn test_bid_book_remove_drops_empty_level() {
        let mut book = BidBook::new();
        let o = order(1, 50_000, 10, 0);
        book.insert(&o);

        let removed = book.remove(&o.key, o.price);
        assert_eq!(removed, Some(Qty::try_new(10).unwrap()));
        assert!(book.is_empty());
        assert_eq!(book.level_qty(o.price), 0);
    }

    #[test]
    fn test_bid_book_remove_miss_is_not_an_error() {
        let mut book = BidBook::new();
        book.insert(&order(1, 50_000, 10, 0));
        assert_eq!(
            book.remove(&OrderKey::from_raw(9, 9), Price::try_new(50_000).unwrap()),
            None
        );
        assert_eq!(book.level_count(), 1);
    }

    #[test]
    fn test_bid_book_reduce_head_closes_level() {
        let mut book = BidBook::new();
        book.insert(&order(1, 50_000, 10, 0));

        let fill = book.reduce_head(Price::try_new(50_000).unwrap(), Qty::try_new(10).unwrap());
        assert_eq!(fill.level_qty, 0);
        assert_eq!(fill.closed, Some(OrderKey::from_raw(1, 1)));
        assert!(book.is_empty());
    }
}
