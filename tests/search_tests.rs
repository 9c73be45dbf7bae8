//! Search tests through the public API.

use std::sync::{Arc, Mutex};

use chess_search::board::{
    best_move_for, search, Board, SearchConfig, SearchInfo, SearchParams, SearchState, MATE_SCORE,
};
use chess_search::Engine;

/// Test that the engine finds a simple mate in 1
#[test]
fn finds_mate_in_one_back_rank() {
    chess_search::init();
    let board = Board::from_fen("6k1/5ppp/8/8/8/8/8/4Q2K w - - 0 1");
    let mut state = SearchState::new(16);

    let mv = best_move_for(&board, &mut state, 1000).expect("Should find a move");
    assert_eq!(mv.to_string(), "e1e8", "Should find Qe8# (back rank mate)");
    assert!(board.apply_move(mv).is_checkmate());
}

/// Test that the engine finds scholar's mate
#[test]
fn finds_mate_in_one_queen() {
    let board = Board::from_fen("r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 0 4");
    let mut state = SearchState::new(16);

    let result = search(&board, &mut state, SearchConfig::depth(4));
    let mv = result.best_move.expect("Should find a move");
    assert_eq!(mv.to_string(), "h5f7", "Should find Qxf7# (scholar's mate)");
    assert_eq!(result.score, MATE_SCORE - 1);
}

/// Test that the engine avoids giving away material
#[test]
fn avoids_hanging_queen() {
    let board = Board::from_fen("r1bqkbnr/pppppppp/2n5/8/4P3/5Q2/PPPP1PPP/RNB1KBNR w KQkq - 0 3");
    let mut state = SearchState::new(16);

    let result = search(&board, &mut state, SearchConfig::depth(4));
    let mv = result.best_move.expect("Should find a move");
    assert_ne!(mv.to_string(), "f3c6", "Should not hang the queen on c6");
    assert_ne!(mv.to_string(), "f3f7", "Should not hang the queen on f7");
}

/// Test that the engine wins a loose piece
#[test]
fn captures_free_piece() {
    // The black bishop on g4 is attacked by the f3 pawn and defended by nothing.
    let board = Board::from_fen("rn1qkbnr/ppp1pppp/8/3p4/6b1/5P2/PPPPP1PP/RNBQKBNR w KQkq - 1 3");
    let mut state = SearchState::new(16);

    let result = search(&board, &mut state, SearchConfig::depth(4));
    let mv = result.best_move.expect("Should find a move");
    assert_eq!(mv.to_string(), "f3g4");
    assert!(mv.is_capture());
}

/// Every completed iteration is reported, in order, and the last one matches the result
#[test]
fn iteration_callback_reports_each_depth() {
    let seen: Arc<Mutex<Vec<SearchInfo>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let board = Board::new();
    let mut state = SearchState::new(1);
    let config = SearchConfig::depth(4).with_info_callback(Arc::new(move |info: &SearchInfo| {
        sink.lock().unwrap().push(info.clone());
    }));

    let result = search(&board, &mut state, config);
    let seen = seen.lock().unwrap();
    assert_eq!(seen.iter().map(|i| i.depth).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    let last = seen.last().unwrap();
    assert_eq!(last.pv, result.pv);
    assert_eq!(last.score, result.score);
    assert!(last.to_string().starts_with("depth 4 score "));
}

/// The state's callback applies when the config brings none
#[test]
fn state_callback_is_used_by_best_move_for() {
    let count = Arc::new(Mutex::new(0u32));
    let sink = Arc::clone(&count);
    let mut state = SearchState::new(1);
    state.set_info_callback(Some(Arc::new(move |_: &SearchInfo| *sink.lock().unwrap() += 1)));

    let board = Board::from_fen("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3");
    assert!(best_move_for(&board, &mut state, 150).is_some());
    assert!(*count.lock().unwrap() >= 1);
}

/// Tuned parameters are honored and still give a sensible answer
#[test]
fn custom_params_still_find_mate() {
    let mut state = SearchState::new(1);
    state.set_params(SearchParams {
        aspiration_window: 10,
        lmr_full_moves: 2,
        ..SearchParams::default()
    });
    let board = Board::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1");
    let result = search(&board, &mut state, SearchConfig::depth(3));
    assert_eq!(result.best_move.map(|m| m.to_string()), Some("a1a8".to_string()));
}

/// Playing a game through the engine facade
#[test]
fn engine_plays_a_short_game() {
    let mut engine = Engine::new(4);
    for _ in 0..6 {
        let Some(mv) = engine.best_move(50) else {
            break;
        };
        assert!(engine.board().generate_moves().contains(mv));
        engine.play(&mv.to_string()).unwrap();
    }
    assert!(engine.board().is_consistent());
    assert_eq!(engine.board().hash(), engine.board().calculate_hash());
}
