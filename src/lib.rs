//! Chess move-selection engine.
//!
//! Bitboard position model with magic-bitboard attack tables, a fully legal move
//! generator, incremental zobrist hashing, a two-tier transposition table and a
//! single-threaded alpha-beta search bounded by a wall-clock deadline.
//!
//! # Example
//! ```
//! use chess_search::board::{best_move_for, Board, SearchState};
//!
//! chess_search::init();
//! let board = Board::new().apply_move_if_legal("e2e4").unwrap();
//! let mut state = SearchState::new(1);
//! let reply = best_move_for(&board, &mut state, 100);
//! assert!(reply.is_some());
//! ```

pub mod board;
mod engine;
pub mod tt;
pub mod zobrist;

pub use board::{Board, Color, Move, Piece, Square};
pub use engine::Engine;
pub use tt::TranspositionTable;

/// Build all lookup tables up front so the first search does not pay for them.
///
/// Attack tables are built before the zobrist keys; calling this more than once is cheap.
pub fn init() {
    board::init();
    zobrist::init();
}
