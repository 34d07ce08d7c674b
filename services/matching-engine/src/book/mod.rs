//! Order book infrastructure module
//!
//! Contains price levels, bid book, and ask book implementations.

pub mod ask_book;
pub mod bid_book;
pub mod price_level;

pub use ask_book::AskBook;
pub use bid_book::BidBook;
pub use price_level::PriceLevel;

use types::ids::OrderKey;

/// Outcome of filling against the head of a price level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadFill {
    /// Aggregate quantity left at the level; 0 once the level is gone.
    pub level_qty: i64,
    /// Key of the maker order if this fill consumed it entirely.
    pub closed: Option<OrderKey>,
}
