//! Matching engine for the exchange core
//!
//! Price-time-priority matching for a single instrument. The engine is a
//! pure, synchronous library: no I/O, no clocks, no logging. It is driven
//! one command at a time by exactly one caller, and everything the outside
//! world learns about the book arrives as emitted `Event` values.
//!
//! **Key invariants:**
//! - Price priority dominates; arrival order breaks ties within a price
//! - The resting (maker) order always sets the execution price
//! - The book never rests a crossed bid/ask pair
//! - Deterministic: same command sequence, same event sequence, every run

pub mod book;
pub mod engine;
pub mod matching;

pub use engine::MatchingEngine;
