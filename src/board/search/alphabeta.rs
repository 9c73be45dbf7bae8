//! Core search implementation.
//!
//! This module implements:
//! - Negamax alpha-beta with principal variation search
//! - Null move pruning
//! - Late move reductions (LMR)
//! - Check, seventh-rank pawn and single-reply extensions
//! - Mate-distance adjusted transposition table cutoffs
//!
//! Every search function returns `Option<i32>`: `None` means the deadline passed and
//! is propagated with `?` through every frame, never read as a score.

mod iterative;
mod pruning;
mod quiescence;

use std::time::Instant;

use crate::board::{Board, Move, MoveList, ScoredMoveList, MAX_PLY};
use crate::tt::{BoundType, TTEntry};

use super::constants::{KILLER1_SCORE, KILLER2_SCORE, MATE_SCORE, MATE_THRESHOLD, PV_MOVE_SCORE};
use super::move_order::tactical_score;
use super::{SearchInfoCallback, SearchParams, SearchState};

/// Search context for a single search
pub(crate) struct SearchContext<'a> {
    pub state: &'a mut SearchState,
    pub params: SearchParams,
    pub start_time: Instant,
    pub deadline: Option<Instant>,
    pub nodes: u64,
    /// Set once the deadline has been seen; every later check fails immediately
    pub timed_out: bool,
    /// Principal variation of the last completed iteration
    pub root_pv: Vec<Move>,
    /// Optional callback for reporting iteration info
    pub info_callback: Option<SearchInfoCallback>,
}

/// Convert a score to its stored form: mate scores count plies from this node, not the root.
#[inline]
fn score_to_tt(score: i32, ply: usize) -> i32 {
    if score >= MATE_THRESHOLD {
        score + ply as i32
    } else if score <= -MATE_THRESHOLD {
        score - ply as i32
    } else {
        score
    }
}

#[inline]
fn score_from_tt(score: i32, ply: usize) -> i32 {
    if score >= MATE_THRESHOLD {
        score - ply as i32
    } else if score <= -MATE_THRESHOLD {
        score + ply as i32
    } else {
        score
    }
}

impl<'a> SearchContext<'a> {
    pub fn new(
        state: &'a mut SearchState,
        start_time: Instant,
        deadline: Option<Instant>,
        info_callback: Option<SearchInfoCallback>,
    ) -> Self {
        let params = state.params.clone();
        SearchContext {
            state,
            params,
            start_time,
            deadline,
            nodes: 0,
            timed_out: false,
            root_pv: Vec::new(),
            info_callback,
        }
    }

    /// Check if the deadline has passed
    #[inline]
    fn out_of_time(&mut self) -> bool {
        if !self.timed_out {
            if let Some(deadline) = self.deadline {
                self.timed_out = Instant::now() >= deadline;
            }
        }
        self.timed_out
    }

    /// Order moves: PV move, then captures/promotions by MVV-LVA, killers, history.
    ///
    /// The PV move is only recognised at nodes with an open window.
    fn order_moves(&self, board: &Board, moves: &MoveList, ply: usize, pv_node: bool) -> ScoredMoveList {
        let pv_move = if pv_node {
            self.root_pv.get(ply).copied()
        } else {
            None
        };
        let killers = &self.state.tables.killer_moves;
        let us = board.side_to_move();

        let mut scored = ScoredMoveList::new();
        for &mv in moves {
            let score = if Some(mv) == pv_move {
                PV_MOVE_SCORE
            } else if !mv.is_quiet() {
                tactical_score(mv)
            } else if mv == killers.primary(ply) {
                KILLER1_SCORE
            } else if mv == killers.secondary(ply) {
                KILLER2_SCORE
            } else {
                self.state.tables.history.score(us, mv.piece(), mv.to())
            };
            scored.push(mv, score);
        }
        scored.sort_by_score_desc();
        scored
    }

    /// Probe the TT for a score that settles this node.
    fn probe_tt_for_cutoff(&mut self, hash: u64, depth: i32, alpha: i32, beta: i32, ply: usize) -> Option<i32> {
        let entry = self.state.tables.tt.probe(hash)?;
        let entry = TTEntry {
            score: score_from_tt(entry.score, ply),
            ..entry
        };
        let score = entry.usable_score(depth.max(0) as u32, alpha, beta)?;
        self.state.stats.tt_hits = self.state.stats.tt_hits.saturating_add(1);
        Some(score)
    }

    fn store_tt(&mut self, hash: u64, depth: i32, score: i32, bound: BoundType, best_move: Option<Move>, ply: usize) {
        self.state.tables.tt.store(
            hash,
            depth.max(0) as u32,
            score_to_tt(score, ply),
            bound,
            best_move,
        );
    }

    /// Extension for `mv`: one ply for giving check, a pawn reaching its seventh rank,
    /// or being the only legal move, while the line's extension budget lasts.
    fn extension(&self, board: &Board, mv: Move, gives_check: bool, single_reply: bool, extended: u32) -> u32 {
        if extended > self.params.extension_budget {
            return 0;
        }
        let pawn_push = mv.piece() == crate::board::Piece::Pawn
            && mv.to().rank() == board.side_to_move().pawn_seventh_rank();
        u32::from(gives_check || pawn_push || single_reply)
    }

    /// Late move reduction for the move at `idx` in search order.
    fn reduction(&self, idx: usize, depth: i32, extension: u32, mv: Move) -> i32 {
        let p = &self.params;
        if idx < p.lmr_full_moves || depth < p.lmr_min_depth || extension > 0 || mv.is_capture() {
            0
        } else if idx >= p.lmr_three_ply_index {
            3
        } else if idx >= p.lmr_two_ply_index {
            2
        } else {
            1
        }
    }

    /// Negamax alpha-beta search.
    ///
    /// `extended` is the extension accumulated along the line so far; `allow_pruning`
    /// is false directly below a null move.
    #[allow(clippy::too_many_arguments)]
    pub fn negamax(
        &mut self,
        board: &Board,
        depth: i32,
        mut alpha: i32,
        beta: i32,
        ply: usize,
        extended: u32,
        in_check: bool,
        allow_pruning: bool,
    ) -> Option<i32> {
        if self.out_of_time() {
            return None;
        }
        self.nodes += 1;
        self.state.tables.pv.clear(ply);

        if ply >= MAX_PLY - 1 {
            return Some(board.evaluate());
        }

        let hash = board.hash();
        if ply > 0 {
            if let Some(score) = self.probe_tt_for_cutoff(hash, depth, alpha, beta, ply) {
                return Some(score);
            }
        }

        if depth <= 0 {
            return self.quiescence(board, alpha, beta, ply);
        }

        let zero_window = beta - alpha == 1;
        if allow_pruning && !in_check && zero_window {
            if let Some(score) = self.try_null_move_pruning(board, depth, beta, ply, extended)? {
                return Some(score);
            }
        }

        let moves = board.generate_moves();
        if moves.is_empty() {
            return Some(if in_check { -MATE_SCORE + ply as i32 } else { 0 });
        }

        let scored_moves = self.order_moves(board, &moves, ply, !zero_window);
        let single_reply = moves.len() == 1;
        let us = board.side_to_move();
        let mut best_move = None;

        for (idx, scored) in scored_moves.iter().enumerate() {
            let mv = scored.mv;
            let child = board.apply_move(mv);
            let gives_check = child.is_in_check();
            let extension = self.extension(board, mv, gives_check, single_reply, extended);
            let new_depth = depth - 1 + extension as i32;
            let child_extended = extended + extension;

            let score = if idx == 0 {
                -self.negamax(&child, new_depth, -beta, -alpha, ply + 1, child_extended, gives_check, true)?
            } else {
                let reduction = self.reduction(idx, depth, extension, mv);
                let mut score = -self.negamax(
                    &child,
                    new_depth - reduction,
                    -alpha - 1,
                    -alpha,
                    ply + 1,
                    child_extended,
                    gives_check,
                    true,
                )?;
                if reduction > 0 && score > alpha {
                    score = -self.negamax(&child, new_depth, -alpha - 1, -alpha, ply + 1, child_extended, gives_check, true)?;
                }
                if score > alpha && score < beta {
                    score = -self.negamax(&child, new_depth, -beta, -alpha, ply + 1, child_extended, gives_check, true)?;
                }
                score
            };

            if score >= beta {
                self.store_tt(hash, depth, beta, BoundType::LowerBound, Some(mv), ply);
                if mv.is_quiet() {
                    self.state.tables.killer_moves.update(ply, mv);
                }
                return Some(beta);
            }
            if score > alpha {
                alpha = score;
                best_move = Some(mv);
                if mv.is_quiet() {
                    self.state.tables.history.update(us, mv.piece(), mv.to(), depth);
                }
                self.state.tables.pv.update(ply, mv);
            }
        }

        let bound = if best_move.is_some() {
            BoundType::Exact
        } else {
            BoundType::UpperBound
        };
        self.store_tt(hash, depth, alpha, bound, best_move, ply);
        Some(alpha)
    }
}
