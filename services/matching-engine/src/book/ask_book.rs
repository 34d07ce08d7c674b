//! Ask (sell-side) order book
//!
//! Maintains sell orders sorted by price ascending (best ask first).
//! Uses BTreeMap so iteration order is deterministic.

use std::collections::BTreeMap;
use types::ids::OrderKey;
use types::numeric::{Price, Qty};
use types::order::Order;

use super::price_level::PriceLevel;
use super::HeadFill;

/// Ask (sell) side order book
///
/// Levels are keyed by price; the best ask is the lowest price. At each
/// price level, orders are maintained in FIFO order.
#[derive(Debug, Clone, Default)]
pub struct AskBook {
    /// Price levels; `next()` is the best ask
    levels: BTreeMap<Price, PriceLevel>,
}

impl AskBook {
    /// Create a new empty ask book
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

    /// Best ask price (lowest), `None` if the side is empty.
    pub fn best(&self) -> Option<Price> {
        self.levels.keys().next().copied()
    }

    /// The next order to match on this side: head of the best level.
    pub fn best_head(&self) -> Option<(Price, OrderKey, Qty)> {
        self.levels
            .iter()
            .next()
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

    /// Iterate levels best-first (price ascending).
    pub fn levels(&self) -> impl Iterator<Item = (Price, &PriceLevel)> + '_ {
        self.levels.iter().map(|(price, level)| (*price, level))
    }

    /// Check if the ask book is empty
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Number of price levels
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }
}
