//! Search algorithm tests.
//!
//! Tests for alpha-beta, quiescence, extensions and the public entry points.

use std::time::{Duration, Instant};

use crate::board::search::{best_move_for, search, SearchConfig, SearchState, MATE_SCORE, MATE_THRESHOLD};
use crate::board::Board;

fn search_depth(fen: &str, depth: u32) -> crate::board::SearchResult {
    let board = Board::from_fen(fen);
    let mut state = SearchState::new(1);
    search(&board, &mut state, SearchConfig::depth(depth))
}

// ============================================================================
// Alpha-beta search tests
// ============================================================================

#[test]
fn alphabeta_finds_mate_in_one() {
    // White to move, Qe8# is mate
    let result = search_depth("6k1/5ppp/8/8/8/8/8/4Q2K w - - 0 1", 3);
    let mv = result.best_move.expect("Should find a move");
    assert_eq!(mv.to_string(), "e1e8", "Should find Qe8#");
    assert_eq!(result.score, MATE_SCORE - 1);
}

#[test]
fn alphabeta_finds_mate_in_two() {
    // 1. Rb7 cuts off the seventh rank, 2. Ra8#
    let result = search_depth("6k1/8/8/8/8/8/R7/1R4K1 w - - 0 1", 5);
    assert!(result.score >= MATE_THRESHOLD, "score {}", result.score);
    assert_eq!(result.score, MATE_SCORE - 3);
}

#[test]
fn alphabeta_handles_stalemate() {
    // Stalemate position: black to move, king on a8
    let board = Board::from_fen("k7/8/1QK5/8/8/8/8/8 b - - 0 1");
    let mut state = SearchState::new(1);
    assert_eq!(best_move_for(&board, &mut state, 100), None);
    let result = search(&board, &mut state, SearchConfig::depth(4));
    assert_eq!(result.score, 0);
}

#[test]
fn alphabeta_returns_none_for_checkmate_position() {
    let board = Board::from_fen("rnb1kbnr/pppp1ppp/4p3/8/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 0 1");
    let mut state = SearchState::new(1);
    let result = search(&board, &mut state, SearchConfig::depth(4));
    assert_eq!(result.best_move, None);
    assert!(result.pv.is_empty());
}

#[test]
fn alphabeta_avoids_stalemating_when_winning() {
    // Qb6 stalemates; any sensible winning try keeps a legal reply for black.
    let board = Board::from_fen("k7/8/2K5/8/8/8/8/1Q6 w - - 0 1");
    let mut state = SearchState::new(1);
    let result = search(&board, &mut state, SearchConfig::depth(4));
    let mv = result.best_move.expect("white has moves");
    let after = board.apply_move(mv);
    assert!(!after.is_stalemate(), "{mv} stalemates");
    assert!(result.score > 500);
}

#[test]
fn search_captures_hanging_queen() {
    let result = search_depth("8/8/4k3/3q4/8/2N1K3/8/8 w - - 0 1", 4);
    let mv = result.best_move.expect("Should find a move");
    assert_eq!(mv.to_string(), "c3d5", "Should capture queen with Nxd5, got {mv}");
}

#[test]
fn search_finds_knight_fork() {
    // Nf4+ forks the king on e6 and the queen on d5
    let result = search_depth("8/8/4k3/3q4/8/4K3/6N1/8 w - - 0 1", 5);
    let mv = result.best_move.expect("Should find a move");
    assert_eq!(mv.to_string(), "g2f4", "Should find Nf4+ fork, got {mv}");
}

// ============================================================================
// Entry points
// ============================================================================

#[test]
fn depth_limited_search_reports_requested_depth() {
    let board = Board::new();
    let mut state = SearchState::new(1);
    let result = search(&board, &mut state, SearchConfig::depth(4));
    assert_eq!(result.depth, 4);
    assert!(result.nodes > 0);
    assert_eq!(state.nodes_searched(), result.nodes);
    assert_eq!(state.principal_variation(), result.pv.as_slice());
    assert_eq!(result.pv.first().copied(), result.best_move);
}

#[test]
fn principal_variation_is_a_legal_line() {
    let board = Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    let mut state = SearchState::new(4);
    let result = search(&board, &mut state, SearchConfig::depth(4));
    assert!(!result.pv.is_empty());
    let mut position = board;
    for mv in &result.pv {
        assert!(position.generate_moves().contains(*mv), "{mv} illegal in {}", position.to_fen());
        position = position.apply_move(*mv);
    }
}

#[test]
fn zero_depth_is_clamped_to_one() {
    let board = Board::new();
    let mut state = SearchState::new(1);
    let result = search(&board, &mut state, SearchConfig::depth(0));
    assert_eq!(result.depth, 1);
}

#[test]
fn fresh_state_searches_are_repeatable() {
    let board = Board::from_fen("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3");
    let first = search(&board, &mut SearchState::new(1), SearchConfig::depth(4));
    let second = search(&board, &mut SearchState::new(1), SearchConfig::depth(4));
    assert_eq!(first, second);
}

#[test]
fn time_limited_search_stops_near_deadline() {
    let board = Board::new();
    let mut state = SearchState::new(1);
    let start = Instant::now();
    let mv = best_move_for(&board, &mut state, 200);
    assert!(mv.is_some());
    assert!(start.elapsed() < Duration::from_millis(1500), "took {:?}", start.elapsed());
}

#[test]
fn zero_budget_still_returns_a_legal_move() {
    let board = Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    let mut state = SearchState::new(1);
    let mv = best_move_for(&board, &mut state, 0).expect("fallback move");
    assert!(board.generate_moves().contains(mv));
}

#[test]
fn transposition_table_persists_between_searches() {
    let board = Board::new();
    let mut state = SearchState::new(1);
    let _ = search(&board, &mut state, SearchConfig::depth(4));
    let entry = state.tables.tt.probe(board.hash()).expect("root stored");
    assert!(entry.depth() >= 4);
    state.new_search();
    assert!(state.tables.tt.probe(board.hash()).is_some());
}

// ============================================================================
// Extension tests
// ============================================================================

#[test]
fn check_extension_sees_mate_past_nominal_depth() {
    // At depth 1 the mated side is only searched because Ra8+ is extended.
    let result = search_depth("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1", 1);
    assert_eq!(result.best_move.map(|m| m.to_string()), Some("a1a8".to_string()));
    assert_eq!(result.score, MATE_SCORE - 1);
    assert_eq!(result.depth, 1);
}
