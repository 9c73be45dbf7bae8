use super::super::attack_tables::knight_attacks;
use super::super::{Bitboard, Board, MoveList, Piece};
use super::KingInfo;

impl Board {
    /// Knight moves onto `targets`; a pinned knight never has a legal move.
    pub(crate) fn generate_knight_moves(
        &self,
        info: &KingInfo,
        targets: Bitboard,
        moves: &mut MoveList,
    ) {
        let knights = self.pieces(self.side_to_move, Piece::Knight) & !info.pin_rays;
        for from in knights.iter() {
            self.push_moves(from, Piece::Knight, knight_attacks(from) & targets, moves);
        }
    }
}
