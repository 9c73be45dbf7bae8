use super::super::attack_tables::{bishop_attacks, pawn_attacks, rook_attacks};
use super::super::{Bitboard, Board, Move, MoveList, Piece, Square, PROMOTION_PIECES};
use super::{GenMode, KingInfo};

fn push_promotions(base: Move, moves: &mut MoveList) {
    for promo in PROMOTION_PIECES {
        moves.push(base.with_promotion(promo));
    }
}

impl Board {
    pub(crate) fn generate_pawn_moves(&self, info: &KingInfo, mode: GenMode, moves: &mut MoveList) {
        let us = self.side_to_move;
        let them = us.opponent();
        let push = us.pawn_push();
        let promotion_rank = us.pawn_promotion_rank();

        for from in self.pieces(us, Piece::Pawn).iter() {
            let allowed = info.check_rays & self.pin_mask(info, from);

            let one = from.offset(push);
            if !self.all_occupied.contains(one) {
                if one.rank() == promotion_rank {
                    if allowed.contains(one) {
                        push_promotions(Move::new(from, one, Piece::Pawn), moves);
                    }
                } else if mode == GenMode::All {
                    if allowed.contains(one) {
                        moves.push(Move::new(from, one, Piece::Pawn));
                    }
                    if from.rank() == us.pawn_start_rank() {
                        let two = one.offset(push);
                        if !self.all_occupied.contains(two) && allowed.contains(two) {
                            moves.push(Move::double_push(from, two));
                        }
                    }
                }
            }

            let attacks = pawn_attacks(us, from);
            for to in (attacks & self.occupied_by(them) & allowed).iter() {
                let Some(victim) = self.piece_of(them, to) else {
                    continue;
                };
                let capture = Move::new(from, to, Piece::Pawn).with_capture(victim);
                if to.rank() == promotion_rank {
                    push_promotions(capture, moves);
                } else {
                    moves.push(capture);
                }
            }

            if let Some(ep) = self.en_passant_target {
                if attacks.contains(ep) && self.en_passant_is_legal(info, from, ep) {
                    moves.push(Move::en_passant(from, ep));
                }
            }
        }
    }

    /// En passant from `from` onto `ep` must resolve any check (by landing on a blocking
    /// square or removing the checking pawn), respect a pin, and must not uncover a slider
    /// once both pawns leave their squares.
    fn en_passant_is_legal(&self, info: &KingInfo, from: Square, ep: Square) -> bool {
        let us = self.side_to_move;
        let them = us.opponent();
        let captured = ep.offset(-us.pawn_push());
        let touched = Bitboard::from_square(ep) | Bitboard::from_square(captured);

        if (info.check_rays & touched).is_empty() || !self.pin_mask(info, from).contains(ep) {
            return false;
        }

        let Some(king) = self.king_square(us) else {
            return true;
        };
        let occ = (self.all_occupied ^ Bitboard::from_square(from) ^ Bitboard::from_square(captured))
            | Bitboard::from_square(ep);
        let queens = self.pieces(them, Piece::Queen);
        (rook_attacks(king, occ) & (self.pieces(them, Piece::Rook) | queens)).is_empty()
            && (bishop_attacks(king, occ) & (self.pieces(them, Piece::Bishop) | queens))
                .is_empty()
    }
}
