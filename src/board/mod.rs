//! Chess board representation and game logic.
//!
//! Positions are small `Copy` values: applying a move returns a new board and leaves the
//! original untouched. Supports full chess rules including castling, en passant, and
//! promotions.
//!
//! # Example
//! ```
//! use chess_search::board::Board;
//!
//! let board = Board::new();
//! let moves = board.generate_moves();
//! assert_eq!(moves.len(), 20);
//! ```

mod attack_tables;
mod error;
mod eval;
mod fen;
mod make_move;
mod movegen;
mod notation;
mod pst;
mod search;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use attack_tables::{
    bishop_attacks, find_magic, king_attacks, knight_attacks, pawn_attacks, queen_attacks,
    rook_attacks, SliderKind, MAX_MAGIC_TRIES,
};
pub use error::{FenError, MagicError, MoveParseError, SquareError};
pub use fen::START_FEN;
pub use movegen::KingInfo;
pub use state::Board;
pub use types::{Bitboard, BitboardIter, CastlingRights, Color, Move, MoveFields, MoveList, Piece, Square};

// Search entry points and configuration
pub use search::{
    best_move_for, search, SearchConfig, SearchInfo, SearchInfoCallback, SearchParams,
    SearchResult, SearchState, DEFAULT_MAX_DEPTH, DEFAULT_TT_MB, MATE_SCORE, MATE_THRESHOLD,
};

// Search internals for callers that need fine-grained control
pub use search::{HistoryTable, KillerTable, PvTable, SearchStats, SearchTables};

pub(crate) use types::{ScoredMoveList, MAX_PLY, PROMOTION_PIECES};

/// Build every attack table (leapers, sliders, line and between).
pub fn init() {
    attack_tables::init();
}
