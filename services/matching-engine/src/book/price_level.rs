//! Price level implementation with FIFO queue
//!
//! A price level holds every resting order at one price on one side.
//! Orders append at the tail and match from the head, so traversal order
//! always equals arrival order.

use std::collections::VecDeque;
use types::ids::OrderKey;
use types::numeric::Qty;

/// A price level containing orders at a specific price
///
/// Maintains strict FIFO ordering for time-priority matching.
#[derive(Debug, Clone, Default)]
pub struct PriceLevel {
    /// Queue of orders at this price level (FIFO order)
    orders: VecDeque<LevelEntry>,
    /// Total quantity resting at this level
    total_qty: i64,
}

/// Entry in the price level queue
#[derive(Debug, Clone, Copy)]
struct LevelEntry {
    key: OrderKey,
    remaining: Qty,
    seq: u64,
}

impl PriceLevel {
    /// Create a new empty price level
    pub fn new() -> Self {
        Self {
            orders: VecDeque::new(),
            total_qty: 0,
        }
    }

    /// Append an order at the back of the queue (time priority)
    pub fn push_back(&mut self, key: OrderKey, remaining: Qty, seq: u64) {
        self.total_qty += remaining.as_i64();
        self.orders.push_back(LevelEntry {
            key,
            remaining,
            seq,
        });
    }

    /// Head of the queue: the next order to match at this price.
    pub fn head(&self) -> Option<(OrderKey, Qty)> {
        self.orders.front().map(|entry| (entry.key, entry.remaining))
    }

    /// Reduce the head order by `fill`, popping it once depleted.
    ///
    /// Returns the key of the head order if the fill consumed it entirely.
    /// The caller never fills more than the head has remaining.
    pub fn reduce_head(&mut self, fill: Qty) -> Option<OrderKey> {
        let entry = self.orders.front_mut()?;
        self.total_qty -= fill.as_i64();
        match entry.remaining.reduce(fill) {
            Some(left) => {
                entry.remaining = left;
                None
            }
            None => self.orders.pop_front().map(|e| e.key),
        }
    }

    /// Remove a specific order from the queue by key
    ///
    /// FIFO order of the remaining orders is untouched. Returns the removed
    /// order's remaining quantity, or `None` if it is not resting here.
    pub fn remove(&mut self, key: &OrderKey) -> Option<Qty> {
        let position = self.orders.iter().position(|entry| entry.key == *key)?;
        let entry = self.orders.remove(position)?;
        self.total_qty -= entry.remaining.as_i64();
        Some(entry.remaining)
    }

    /// Check if the price level is empty
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Total quantity resting at this level
    pub fn total_qty(&self) -> i64 {
        self.total_qty
    }

    /// Number of orders at this level
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Iterate the queue in arrival order as (key, remaining, seq).
    pub fn iter(&self) -> impl Iterator<Item = (OrderKey, Qty, u64)> + '_ {
        self.orders
            .iter()
            .map(|entry| (entry.key, entry.remaining, entry.seq))
    }
}
