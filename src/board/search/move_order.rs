//! Move ordering utilities for search.

use super::super::{Move, Piece};
use super::constants::TACTICAL_BASE_SCORE;

/// Get material value for a piece (in centipawns), for MVV-LVA
pub fn piece_value(piece: Piece) -> i32 {
    match piece {
        Piece::Pawn => 100,
        Piece::Knight => 320,
        Piece::Bishop => 330,
        Piece::Rook => 500,
        Piece::Queen => 900,
        Piece::King => 1000,
    }
}

/// Ordering bonus for the promotion piece
pub fn promotion_bonus(piece: Piece) -> i32 {
    match piece {
        Piece::Queen => 800,
        Piece::Rook => 400,
        Piece::Bishop => 250,
        Piece::Knight => 200,
        Piece::Pawn | Piece::King => 0,
    }
}

/// Score for a capture or promotion: victim minus attacker, plus the promotion bonus.
pub fn tactical_score(mv: Move) -> i32 {
    let victim = mv.captured().map_or(0, piece_value);
    let mvv_lva = if mv.is_capture() {
        victim - piece_value(mv.piece())
    } else {
        0
    };
    TACTICAL_BASE_SCORE + mvv_lva + mv.promotion().map_or(0, promotion_bonus)
}
