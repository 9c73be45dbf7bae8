use crate::zobrist::ZOBRIST;

use super::{Board, Move, Piece, Square};

/// Rook source and target for a castle whose king lands on `king_to`.
#[inline]
pub(crate) fn castle_rook_squares(king_to: Square) -> (Square, Square) {
    match king_to {
        Square::G1 => (Square::H1, Square::F1),
        Square::C1 => (Square::A1, Square::D1),
        Square::G8 => (Square::H8, Square::F8),
        _ => (Square::A8, Square::D8),
    }
}

impl Board {
    /// Return the position after `mv`.
    ///
    /// `mv` must be a legal move for this position (as produced by the generator or
    /// [`Board::parse_move`]); nothing is validated. The hash is updated incrementally
    /// and always equals [`Board::calculate_hash`] of the result.
    #[must_use]
    pub fn apply_move(&self, mv: Move) -> Board {
        let mut next = *self;
        let us = self.side_to_move;
        let them = us.opponent();
        let from = mv.from();
        let to = mv.to();

        let rights = self.castling_rights.touched(from).touched(to);
        next.hash ^= ZOBRIST.castling(self.castling_rights) ^ ZOBRIST.castling(rights);
        next.castling_rights = rights;

        if let Some(ep) = self.en_passant_target {
            next.hash ^= ZOBRIST.en_passant(ep);
            next.en_passant_target = None;
        }

        if let Some(victim) = mv.captured() {
            let victim_sq = if mv.is_en_passant() {
                to.offset(-us.pawn_push())
            } else {
                to
            };
            next.toggle_piece(victim_sq, them, victim);
        }

        next.toggle_piece(from, us, mv.piece());
        next.toggle_piece(to, us, mv.promotion().unwrap_or(mv.piece()));

        if mv.is_castle() {
            let (rook_from, rook_to) = castle_rook_squares(to);
            next.toggle_piece(rook_from, us, Piece::Rook);
            next.toggle_piece(rook_to, us, Piece::Rook);
        }

        if mv.is_double_push() {
            let passed = from.offset(us.pawn_push());
            next.en_passant_target = Some(passed);
            next.hash ^= ZOBRIST.en_passant(passed);
        }

        next.side_to_move = them;
        next.hash ^= ZOBRIST.black_to_move_key;
        next
    }

    /// Return the position with the side to move passed and en passant cleared.
    ///
    /// Only meaningful when the side to move is not in check.
    #[must_use]
    pub fn make_null_move(&self) -> Board {
        let mut next = *self;
        if let Some(ep) = self.en_passant_target {
            next.hash ^= ZOBRIST.en_passant(ep);
            next.en_passant_target = None;
        }
        next.side_to_move = self.side_to_move.opponent();
        next.hash ^= ZOBRIST.black_to_move_key;
        next
    }
}
