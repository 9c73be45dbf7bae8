//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `perft.rs` - Leaf counts for move generation correctness
//! - `make_move.rs` - Pure move application and incremental hashing
//! - `movegen.rs` - Special positions and generator edge cases
//! - `notation.rs` - Coordinate notation and FEN round trips
//! - `search.rs` - Search behaviour through the public entry points
//! - `proptest.rs` - Property-based tests over random games

mod perft;
mod proptest;
mod search;
