use super::super::attack_tables::king_attacks;
use super::super::{Bitboard, Board, Color, Move, MoveList, Piece, Square};
use super::{GenMode, KingInfo};

/// Squares involved in one castle: king target, rook origin, squares that must be empty
/// and squares the king must not be attacked on.
struct CastlePath {
    kingside: bool,
    king_to: Square,
    rook_from: Square,
    empty: Bitboard,
    safe: [Square; 2],
}

fn castle_paths(color: Color) -> [CastlePath; 2] {
    let base = color.back_rank() * 8;
    let sq = |file: u8| Square::from_index(base + file);
    let bb = |file: u8| 1u64 << (base + file);
    [
        CastlePath {
            kingside: true,
            king_to: sq(6),
            rook_from: sq(7),
            empty: Bitboard(bb(5) | bb(6)),
            safe: [sq(5), sq(6)],
        },
        CastlePath {
            kingside: false,
            king_to: sq(2),
            rook_from: sq(0),
            empty: Bitboard(bb(1) | bb(2) | bb(3)),
            safe: [sq(3), sq(2)],
        },
    ]
}

impl Board {
    pub(crate) fn generate_king_moves(&self, info: &KingInfo, mode: GenMode, moves: &mut MoveList) {
        let us = self.side_to_move;
        let them = us.opponent();
        let Some(from) = self.king_square(us) else {
            return;
        };

        // Sliders must see through the king's current square.
        let occ = self.all_occupied ^ Bitboard::from_square(from);
        let targets = match mode {
            GenMode::All => !self.occupied_by(us),
            GenMode::Captures => self.occupied_by(them),
        };
        let safe = (king_attacks(from) & targets)
            .iter()
            .filter(|&to| !self.is_attacked_with(to, them, occ))
            .fold(Bitboard::EMPTY, |acc, to| acc | Bitboard::from_square(to));
        self.push_moves(from, Piece::King, safe, moves);

        if mode == GenMode::Captures || info.in_check() {
            return;
        }
        if from != Square::from_index(us.back_rank() * 8 + 4) {
            return;
        }
        for path in castle_paths(us) {
            if self.castling_rights.has(us, path.kingside)
                && self.pieces(us, Piece::Rook).contains(path.rook_from)
                && (self.all_occupied & path.empty).is_empty()
                && path
                    .safe
                    .iter()
                    .all(|&sq| !self.is_square_attacked(sq, them))
            {
                moves.push(Move::castle(from, path.king_to));
            }
        }
    }
}
