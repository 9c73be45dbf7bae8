use crate::board::Board;

use super::super::constants::{MATE_SCORE, MATE_THRESHOLD, SCORE_BOUND};
use super::super::{SearchInfo, SearchResult};
use super::SearchContext;

impl SearchContext<'_> {
    /// Iterative deepening with aspiration windows.
    ///
    /// Only fully completed iterations are trusted; an iteration cut off by the deadline
    /// is discarded. When none completes, the first move in search order is played.
    pub fn iterative_deepening(&mut self, board: &Board, max_depth: u32) -> SearchResult {
        let moves = board.generate_moves();
        let mut result = SearchResult {
            best_move: None,
            score: 0,
            depth: 0,
            nodes: 0,
            pv: Vec::new(),
        };

        if moves.is_empty() {
            result.score = if board.is_in_check() { -MATE_SCORE } else { 0 };
            return result;
        }
        if moves.len() == 1 {
            let mv = moves[0];
            result.best_move = Some(mv);
            result.pv = vec![mv];
            result.score = board.evaluate();
            return result;
        }

        result.best_move = self
            .order_moves(board, &moves, 0, true)
            .iter()
            .next()
            .map(|scored| scored.mv);

        let in_check = board.is_in_check();
        let mut score = 0;

        for depth in 1..=max_depth {
            let Some(iteration_score) = self.aspiration_search(board, depth, score, in_check) else {
                break;
            };
            score = iteration_score;

            let pv = self.state.tables.pv.line(0).to_vec();
            if let Some(&mv) = pv.first() {
                result.best_move = Some(mv);
            }
            result.score = score;
            result.depth = depth;
            result.pv.clone_from(&pv);
            self.root_pv = pv;

            let info = SearchInfo {
                depth,
                score,
                nodes: self.nodes,
                time_ms: self.start_time.elapsed().as_millis() as u64,
                pv: result.pv.clone(),
            };
            log::info!("{info}");
            if let Some(callback) = &self.info_callback {
                callback(&info);
            }

            // A mate proven within the searched horizon cannot be improved on.
            if score.abs() >= MATE_THRESHOLD && (MATE_SCORE - score.abs()) as u32 <= depth {
                break;
            }
        }

        result.nodes = self.nodes;
        result
    }

    /// Search the root at `depth` inside a window around `previous`, widening the failing
    /// side until the score lands strictly inside. The first iteration uses the full window.
    fn aspiration_search(&mut self, board: &Board, depth: u32, previous: i32, in_check: bool) -> Option<i32> {
        let window = self.params.aspiration_window;
        let (mut low_margin, mut high_margin) = (window, window);
        let (mut alpha, mut beta) = if depth == 1 {
            (-SCORE_BOUND, SCORE_BOUND)
        } else {
            (
                (previous - window).max(-SCORE_BOUND),
                (previous + window).min(SCORE_BOUND),
            )
        };

        loop {
            let score = self.negamax(board, depth as i32, alpha, beta, 0, 0, in_check, true)?;
            if score <= alpha && alpha > -SCORE_BOUND {
                low_margin = low_margin.saturating_mul(self.params.aspiration_growth);
                alpha = (previous - low_margin).max(-SCORE_BOUND);
                log::debug!("depth {depth}: fail low at {score}, re-search [{alpha}, {beta}]");
            } else if score >= beta && beta < SCORE_BOUND {
                high_margin = high_margin.saturating_mul(self.params.aspiration_growth);
                beta = (previous + high_margin).min(SCORE_BOUND);
                log::debug!("depth {depth}: fail high at {score}, re-search [{alpha}, {beta}]");
            } else {
                return Some(score);
            }
        }
    }
}
