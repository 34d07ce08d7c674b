//! Matching logic module
//!
//! Crossing predicate for the price-time priority algorithm.

pub mod crossing;

pub use crossing::crosses;
