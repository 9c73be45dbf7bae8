use crate::board::Board;

use super::SearchContext;

impl SearchContext<'_> {
    /// Null move pruning: hand the opponent a free move and search shallower.
    ///
    /// Only tried at zero-window nodes outside check. Returns `None` on timeout and
    /// `Some(Some(beta))` when the null move still fails high.
    pub(super) fn try_null_move_pruning(
        &mut self,
        board: &Board,
        depth: i32,
        beta: i32,
        ply: usize,
        extended: u32,
    ) -> Option<Option<i32>> {
        let us = board.side_to_move();
        if depth < self.params.null_min_depth
            || board.non_pawn_material_count(us) <= self.params.null_min_pieces
        {
            return Some(None);
        }

        let child = board.make_null_move();
        let reduced_depth = depth - self.params.null_reduction;
        let score = -self.negamax(&child, reduced_depth, -beta, -beta + 1, ply + 1, extended, false, false)?;

        if score >= beta {
            return Some(Some(beta));
        }
        Some(None)
    }
}
