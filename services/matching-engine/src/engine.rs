//! Matching engine core
//!
//! Owns the order book for the single instrument and applies one command at
//! a time, run-to-completion. This is the only place book state is ever
//! mutated; everything downstream sees copies of emitted `Event` values,
//! never handles into book memory.
//!
//! Determinism: the books are BTreeMaps, the resting-order index is only
//! ever probed by key (never iterated), and the sole time axis is the
//! engine-assigned arrival sequence. The same command sequence therefore
//! produces the same event sequence on every run.

use std::collections::HashMap;

use types::errors::RejectError;
use types::events::Event;
use types::ids::OrderKey;
use types::numeric::{Price, Qty};
use types::order::{Order, OrderParams, Side, TimeInForce};

use crate::book::{AskBook, BidBook};
use crate::matching::crossing;

/// Price-time-priority matching engine for one instrument.
#[derive(Debug, Clone, Default)]
pub struct MatchingEngine {
    bids: BidBook,
    asks: AskBook,
    /// Resting-order locator: composite key to (side, price). Keeps cancels
    /// confined to a single level instead of a scan across the whole book.
    index: HashMap<OrderKey, (Side, Price)>,
    /// Arrival sequence for incoming orders. Monotonic, never wall-clock.
    next_seq: u64,
}

impl MatchingEngine {
    /// Create a new engine with an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a new-order command, emitting every resulting event in order:
    /// trades and book deltas from the crossing loop, a book delta for a
    /// GTC remainder that rests, and finally the ack. The ack means
    /// "processed", not "filled", and is emitted for every accepted order.
    ///
    /// Validation failures emit a single reject and leave the book
    /// untouched.
    pub fn submit(&mut self, params: OrderParams) -> Vec<Event> {
        let mut events = Vec::new();

        let order = match self.admit(&params) {
            Ok(order) => order,
            Err(reason) => {
                events.push(Event::reject(params.cl_ord_id, &reason));
                return events;
            }
        };

        let mut remaining = Some(order.remaining);
        while let Some(open) = remaining {
            let Some((best, maker_key, maker_qty)) = self.opposing_head(order.side) else {
                break;
            };
            if !crossing::crosses(order.side, order.price, best) {
                break;
            }

            // The resting side always sets the execution price.
            let fill = open.min(maker_qty);
            events.push(Event::Trade {
                price: best,
                qty: fill,
                taker: order.key.client_id,
                maker: maker_key.client_id,
            });

            let outcome = match order.side {
                Side::Buy => self.asks.reduce_head(best, fill),
                Side::Sell => self.bids.reduce_head(best, fill),
            };
            if let Some(closed) = outcome.closed {
                self.index.remove(&closed);
            }
            events.push(Event::BookDelta {
                side: order.side.opposite(),
                price: best,
                level_qty: outcome.level_qty,
            });

            remaining = open.reduce(fill);
        }

        if let Some(open) = remaining {
            match order.tif {
                TimeInForce::Gtc => {
                    let resting = Order {
                        remaining: open,
                        ..order
                    };
                    match resting.side {
                        Side::Buy => self.bids.insert(&resting),
                        Side::Sell => self.asks.insert(&resting),
                    }
                    self.index.insert(resting.key, (resting.side, resting.price));
                    events.push(Event::BookDelta {
                        side: resting.side,
                        price: resting.price,
                        level_qty: self.level_qty(resting.side, resting.price),
                    });
                }
                // IOC residual is discarded without any further event.
                TimeInForce::Ioc => {}
            }
        }

        events.push(Event::ack(params.cl_ord_id));
        events
    }

    /// Apply a cancel command.
    ///
    /// A hit removes exactly the targeted order and reports the level's new
    /// aggregate quantity. A miss — already filled, already cancelled, or
    /// never seen — is a normal outcome answered with a reject, not an
    /// error.
    pub fn cancel(&mut self, client_id: u64, cl_ord_id: u64) -> Vec<Event> {
        let key = OrderKey::from_raw(client_id, cl_ord_id);
        let mut events = Vec::new();

        match self.index.remove(&key) {
            Some((side, price)) => {
                let removed = match side {
                    Side::Buy => self.bids.remove(&key, price),
                    Side::Sell => self.asks.remove(&key, price),
                };
                debug_assert!(removed.is_some(), "index pointed at a missing order");
                events.push(Event::BookDelta {
                    side,
                    price,
                    level_qty: self.level_qty(side, price),
                });
                events.push(Event::ack(cl_ord_id));
            }
            None => events.push(Event::reject(cl_ord_id, &RejectError::NotFound)),
        }
        events
    }

    /// Bid side of the book.
    pub fn bids(&self) -> &BidBook {
        &self.bids
    }

    /// Ask side of the book.
    pub fn asks(&self) -> &AskBook {
        &self.asks
    }

    /// Number of orders currently resting.
    pub fn open_orders(&self) -> usize {
        self.index.len()
    }

    /// Whether the order identified by raw key fields is resting.
    pub fn is_resting(&self, client_id: u64, cl_ord_id: u64) -> bool {
        self.index
            .contains_key(&OrderKey::from_raw(client_id, cl_ord_id))
    }

    // Validation gate: everything behind it operates on well-formed orders,
    // so the matching loop itself has no failure paths.
    fn admit(&mut self, params: &OrderParams) -> Result<Order, RejectError> {
        let order = Order::validate(params, self.next_seq)?;
        if self.index.contains_key(&order.key) {
            return Err(RejectError::DuplicateOrderId);
        }
        self.next_seq += 1;
        Ok(order)
    }

    fn opposing_head(&self, incoming: Side) -> Option<(Price, OrderKey, Qty)> {
        match incoming {
            Side::Buy => self.asks.best_head(),
            Side::Sell => self.bids.best_head(),
        }
    }

    fn level_qty(&self, side: Side, price: Price) -> i64 {
        match side {
            Side::Buy => self.bids.level_qty(price),
            Side::Sell => self.asks.level_qty(price),
        }
    }
}
