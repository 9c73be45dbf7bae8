use crate::board::{Bitboard, Board, Piece, ScoredMoveList, MAX_PLY};

use super::super::move_order::tactical_score;
use super::SearchContext;

impl SearchContext<'_> {
    /// Quiescence search over captures and promotions.
    ///
    /// The static evaluation stands in for the quiet alternatives ("stand pat"), so the
    /// result is never below it. Returns `None` on timeout.
    pub(super) fn quiescence(&mut self, board: &Board, mut alpha: i32, beta: i32, ply: usize) -> Option<i32> {
        if self.out_of_time() {
            return None;
        }
        self.nodes += 1;
        self.state.tables.pv.clear(ply);

        let stand_pat = board.evaluate();
        if ply >= MAX_PLY - 1 {
            return Some(stand_pat);
        }
        if stand_pat >= beta {
            return Some(beta);
        }

        // Delta pruning: not even winning a queen (plus a promotion) reaches alpha.
        let us = board.side_to_move();
        let mut margin = self.params.delta_margin;
        let seventh = Bitboard::rank_mask(us.pawn_seventh_rank());
        if !(board.pieces(us, Piece::Pawn) & seventh).is_empty() {
            margin += self.params.delta_promotion_margin;
        }
        if stand_pat + margin < alpha {
            return Some(alpha);
        }

        if stand_pat > alpha {
            alpha = stand_pat;
        }

        let captures = board.generate_captures();
        let mut ordered = ScoredMoveList::new();
        for &mv in &captures {
            ordered.push(mv, tactical_score(mv));
        }
        ordered.sort_by_score_desc();

        for scored in ordered.iter() {
            let child = board.apply_move(scored.mv);
            let score = -self.quiescence(&child, -beta, -alpha, ply + 1)?;
            if score >= beta {
                return Some(beta);
            }
            if score > alpha {
                alpha = score;
            }
        }

        Some(alpha)
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use crate::board::search::SearchState;
    use crate::board::Board;

    use super::SearchContext;

    fn run(fen: &str, alpha: i32, beta: i32) -> Option<i32> {
        let board = Board::from_fen(fen);
        let mut state = SearchState::new(1);
        let mut ctx = SearchContext::new(&mut state, Instant::now(), None, None);
        ctx.quiescence(&board, alpha, beta, 0)
    }

    #[test]
    fn quiet_position_returns_stand_pat() {
        let fen = "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1";
        let stand_pat = Board::from_fen(fen).evaluate();
        assert_eq!(run(fen, -1000, 1000), Some(stand_pat));
    }

    #[test]
    fn stand_pat_fail_high_returns_beta() {
        assert_eq!(run("4k3/8/8/8/8/8/8/QQQ1K3 w - - 0 1", -10, 10), Some(10));
    }

    #[test]
    fn hanging_queen_is_taken() {
        let fen = "4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1";
        let stand_pat = Board::from_fen(fen).evaluate();
        let score = run(fen, -10_000, 10_000).unwrap_or(i32::MIN);
        assert!(score > stand_pat + 800, "score {score} stand pat {stand_pat}");
    }

    #[test]
    fn hopeless_position_is_delta_pruned() {
        assert_eq!(run("qqqqk3/8/8/8/8/8/8/4K3 w - - 0 1", 500, 600), Some(500));
    }

    #[test]
    fn expired_deadline_gives_no_score() {
        let board = Board::new();
        let mut state = SearchState::new(1);
        let past = Instant::now() - Duration::from_millis(1);
        let mut ctx = SearchContext::new(&mut state, Instant::now(), Some(past), None);
        assert_eq!(ctx.quiescence(&board, -100, 100, 0), None);
    }
}
