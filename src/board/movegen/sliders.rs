use super::super::attack_tables::{bishop_attacks, queen_attacks, rook_attacks};
use super::super::{Bitboard, Board, MoveList, Piece, Square};
use super::KingInfo;

fn slider_attacks(piece: Piece, from: Square, occ: Bitboard) -> Bitboard {
    match piece {
        Piece::Bishop => bishop_attacks(from, occ),
        Piece::Rook => rook_attacks(from, occ),
        _ => queen_attacks(from, occ),
    }
}

impl Board {
    /// Bishop, rook and queen moves onto `targets`, pinned sliders kept on their pin line.
    pub(crate) fn generate_slider_moves(
        &self,
        info: &KingInfo,
        targets: Bitboard,
        moves: &mut MoveList,
    ) {
        let us = self.side_to_move;
        for piece in [Piece::Bishop, Piece::Rook, Piece::Queen] {
            for from in self.pieces(us, piece).iter() {
                let reach = slider_attacks(piece, from, self.all_occupied)
                    & targets
                    & self.pin_mask(info, from);
                self.push_moves(from, piece, reach, moves);
            }
        }
    }
}
