//! Legal move generation.
//!
//! Each call first analyses the side to move's king: how many pieces give check, which
//! squares resolve a single check and which friendly pieces are pinned. Moves are then
//! emitted per piece kind already filtered by that analysis, so everything produced is
//! legal without a make/test/unmake pass.

mod kings;
mod knights;
mod pawns;
mod sliders;

use super::attack_tables::{
    between, bishop_attacks, king_attacks, knight_attacks, pawn_attacks, rook_attacks,
};
use super::{Bitboard, Board, Color, Move, MoveList, Piece, Square};

/// Check and pin analysis for the side to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KingInfo {
    /// Pieces giving check, clamped at 2.
    pub n_checks: u8,
    /// Squares a non-king move must land on; every square when not in check.
    pub check_rays: Bitboard,
    /// Origin squares of pinned friendly pieces.
    pub pin_rays: Bitboard,
}

impl KingInfo {
    const UNCHECKED: KingInfo = KingInfo {
        n_checks: 0,
        check_rays: Bitboard::ALL,
        pin_rays: Bitboard::EMPTY,
    };

    #[inline]
    #[must_use]
    pub fn in_check(&self) -> bool {
        self.n_checks > 0
    }
}

/// Which moves the generator emits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum GenMode {
    All,
    /// Captures, en passant and promotions (including quiet push-promotions).
    Captures,
}

impl Board {
    /// Check and pin analysis for the side to move.
    #[must_use]
    pub fn king_info(&self) -> KingInfo {
        let us = self.side_to_move;
        let them = us.opponent();
        let Some(king) = self.king_square(us) else {
            return KingInfo::UNCHECKED;
        };

        let mut n_checks = 0u8;
        let mut check_rays = Bitboard::EMPTY;
        let mut pin_rays = Bitboard::EMPTY;

        let leapers = (knight_attacks(king) & self.pieces(them, Piece::Knight))
            | (pawn_attacks(us, king) & self.pieces(them, Piece::Pawn));
        for checker in leapers.iter() {
            n_checks += 1;
            check_rays |= Bitboard::from_square(checker);
        }

        // Sliders that would hit the king if only enemy pieces could block.
        let queens = self.pieces(them, Piece::Queen);
        let enemy = self.occupied_by(them);
        let snipers = (rook_attacks(king, enemy) & (self.pieces(them, Piece::Rook) | queens))
            | (bishop_attacks(king, enemy) & (self.pieces(them, Piece::Bishop) | queens));
        for sniper in snipers.iter() {
            let ray = between(king, sniper);
            let blockers = ray & self.all_occupied;
            match blockers.popcount() {
                0 => {
                    n_checks += 1;
                    check_rays |= ray | Bitboard::from_square(sniper);
                }
                1 => pin_rays |= blockers,
                _ => {}
            }
        }

        if n_checks == 0 {
            check_rays = Bitboard::ALL;
        }
        KingInfo {
            n_checks: n_checks.min(2),
            check_rays,
            pin_rays,
        }
    }

    /// All legal moves for the side to move.
    #[must_use]
    pub fn generate_moves(&self) -> MoveList {
        self.generate(GenMode::All)
    }

    /// Legal captures and promotions for the side to move, for quiescence search.
    #[must_use]
    pub fn generate_captures(&self) -> MoveList {
        self.generate(GenMode::Captures)
    }

    pub(crate) fn generate(&self, mode: GenMode) -> MoveList {
        let info = self.king_info();
        let mut moves = MoveList::new();
        if info.n_checks < 2 {
            let us = self.side_to_move;
            let mut targets = match mode {
                GenMode::All => !self.occupied_by(us),
                GenMode::Captures => self.occupied_by(us.opponent()),
            };
            targets &= info.check_rays;
            self.generate_pawn_moves(&info, mode, &mut moves);
            self.generate_knight_moves(&info, targets, &mut moves);
            self.generate_slider_moves(&info, targets, &mut moves);
        }
        self.generate_king_moves(&info, mode, &mut moves);
        moves
    }

    /// Squares a non-king piece on `from` may move to without exposing its king.
    #[inline]
    pub(crate) fn pin_mask(&self, info: &KingInfo, from: Square) -> Bitboard {
        if !info.pin_rays.contains(from) {
            return Bitboard::ALL;
        }
        match self.king_square(self.side_to_move) {
            Some(king) => super::attack_tables::line(king, from),
            None => Bitboard::ALL,
        }
    }

    /// Emit a move of `piece` from `from` to every square in `targets`, recording captures.
    pub(crate) fn push_moves(
        &self,
        from: Square,
        piece: Piece,
        targets: Bitboard,
        moves: &mut MoveList,
    ) {
        let them = self.side_to_move.opponent();
        for to in targets.iter() {
            let mv = Move::new(from, to, piece);
            moves.push(match self.piece_of(them, to) {
                Some(victim) => mv.with_capture(victim),
                None => mv,
            });
        }
    }

    /// Kind of `color`'s piece on `sq`, if any.
    #[inline]
    pub(crate) fn piece_of(&self, color: Color, sq: Square) -> Option<Piece> {
        if !self.occupied_by(color).contains(sq) {
            return None;
        }
        Piece::ALL
            .into_iter()
            .find(|&piece| self.pieces(color, piece).contains(sq))
    }

    /// Whether `by` attacks `sq` given the occupancy `occ`.
    pub(crate) fn is_attacked_with(&self, sq: Square, by: Color, occ: Bitboard) -> bool {
        let queens = self.pieces(by, Piece::Queen);
        !(pawn_attacks(by.opponent(), sq) & self.pieces(by, Piece::Pawn)).is_empty()
            || !(knight_attacks(sq) & self.pieces(by, Piece::Knight)).is_empty()
            || !(king_attacks(sq) & self.pieces(by, Piece::King)).is_empty()
            || !(bishop_attacks(sq, occ) & (self.pieces(by, Piece::Bishop) | queens)).is_empty()
            || !(rook_attacks(sq, occ) & (self.pieces(by, Piece::Rook) | queens)).is_empty()
    }

    /// Whether any piece of `by` attacks `sq`.
    #[must_use]
    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        self.is_attacked_with(sq, by, self.all_occupied)
    }

    /// Whether the side to move is in check.
    #[must_use]
    pub fn is_in_check(&self) -> bool {
        let us = self.side_to_move;
        self.king_square(us)
            .is_some_and(|king| self.is_square_attacked(king, us.opponent()))
    }

    #[must_use]
    pub fn is_checkmate(&self) -> bool {
        self.is_in_check() && self.generate_moves().is_empty()
    }

    #[must_use]
    pub fn is_stalemate(&self) -> bool {
        !self.is_in_check() && self.generate_moves().is_empty()
    }

    /// Count the leaf nodes of the legal move tree `depth` plies deep.
    #[must_use]
    pub fn perft(&self, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }

        let moves = self.generate_moves();
        if depth == 1 {
            return moves.len() as u64;
        }

        moves
            .iter()
            .map(|&mv| self.apply_move(mv).perft(depth - 1))
            .sum()
    }

    /// Leaf counts below each root move, in generation order.
    #[must_use]
    pub fn perft_divide(&self, depth: u32) -> Vec<(Move, u64)> {
        if depth == 0 {
            return Vec::new();
        }
        self.generate_moves()
            .iter()
            .map(|&mv| (mv, self.apply_move(mv).perft(depth - 1)))
            .collect()
    }
}
