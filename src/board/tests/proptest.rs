//! Property-based tests using proptest.

use crate::board::search::{HistoryTable, KillerTable};
use crate::board::{Board, Color, Move, Piece, Square};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Strategy to generate a random legal move sequence length
fn move_count_strategy() -> impl Strategy<Value = usize> {
    1..=30usize
}

/// Strategy to generate a random seed for move selection
fn seed_strategy() -> impl Strategy<Value = u64> {
    any::<u64>()
}

/// Play up to `num_moves` random legal moves from the start position.
fn random_game(seed: u64, num_moves: usize) -> Vec<Board> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut positions = vec![Board::new()];
    for _ in 0..num_moves {
        let Some(&board) = positions.last() else { break };
        let moves = board.generate_moves();
        if moves.is_empty() {
            break;
        }
        let mv = moves[rng.gen_range(0..moves.len())];
        positions.push(board.apply_move(mv));
    }
    positions
}

fn square_strategy() -> impl Strategy<Value = Square> {
    (0..64u8).prop_map(Square::from_index)
}

proptest! {
    /// Property: applying a move never modifies the source position
    #[test]
    fn prop_apply_move_is_pure(seed in seed_strategy(), num_moves in move_count_strategy()) {
        for board in random_game(seed, num_moves) {
            let snapshot = board;
            for &mv in &board.generate_moves() {
                let _ = board.apply_move(mv);
            }
            prop_assert_eq!(board, snapshot);
        }
    }

    /// Property: hash is always consistent with recomputed hash
    #[test]
    fn prop_hash_consistency(seed in seed_strategy(), num_moves in move_count_strategy()) {
        for board in random_game(seed, num_moves) {
            prop_assert_eq!(board.hash(), board.calculate_hash());
            prop_assert!(board.is_consistent());
        }
    }

    /// Property: FEN round-trip preserves position
    #[test]
    fn prop_fen_roundtrip(seed in seed_strategy(), num_moves in move_count_strategy()) {
        for board in random_game(seed, num_moves) {
            let restored = Board::from_fen(&board.to_fen());
            prop_assert_eq!(restored, board);
        }
    }

    /// Property: legal moves never leave the mover's king attacked
    #[test]
    fn prop_legal_moves_are_legal(seed in seed_strategy(), num_moves in move_count_strategy()) {
        for board in random_game(seed, num_moves) {
            let us = board.side_to_move();
            for &mv in &board.generate_moves() {
                let after = board.apply_move(mv);
                let king = after.king_square(us);
                prop_assert!(king.is_some());
                if let Some(king) = king {
                    prop_assert!(!after.is_square_attacked(king, us.opponent()),
                        "Legal move left king in check: {:?} in {}", mv, board.to_fen());
                }
            }
        }
    }

    /// Property: captures mode is exactly the tactical subset of the full list
    #[test]
    fn prop_captures_are_tactical_subset(seed in seed_strategy(), num_moves in move_count_strategy()) {
        for board in random_game(seed, num_moves) {
            let all = board.generate_moves();
            let captures = board.generate_captures();
            let expected = all.iter().filter(|m| !m.is_quiet()).count();
            prop_assert_eq!(captures.len(), expected);
            for &mv in &captures {
                prop_assert!(all.contains(mv));
            }
        }
    }

    /// Property: encoding and decoding preserve every field
    #[test]
    fn prop_move_fields_survive_encoding(
        from in square_strategy(),
        to in square_strategy(),
        piece in 0..6usize,
        captured in proptest::option::of(0..5usize),
        promotion in proptest::option::of(1..5usize),
    ) {
        let mut mv = Move::new(from, to, Piece::ALL[piece]);
        if let Some(victim) = captured {
            mv = mv.with_capture(Piece::ALL[victim]);
        }
        if let Some(promo) = promotion {
            mv = mv.with_promotion(Piece::ALL[promo]);
        }
        let fields = mv.decode();
        prop_assert_eq!(fields.from, from);
        prop_assert_eq!(fields.to, to);
        prop_assert_eq!(fields.piece, Piece::ALL[piece]);
        prop_assert_eq!(fields.captured, captured.map(|v| Piece::ALL[v]));
        prop_assert_eq!(fields.promotion, promotion.map(|p| Piece::ALL[p]));
        prop_assert_eq!(Move::encode(fields), mv);
    }

    // ========================================================================
    // Move Ordering Property Tests
    // ========================================================================

    /// Property: killer moves are preserved after update
    #[test]
    fn prop_killer_preserves_moves(
        ply in 0..100usize,
        from1 in square_strategy(),
        to1 in square_strategy(),
        from2 in square_strategy(),
        to2 in square_strategy(),
    ) {
        let mut table = KillerTable::new();
        let mv1 = Move::new(from1, to1, Piece::Knight);
        let mv2 = Move::new(from2, to2, Piece::Bishop);

        table.update(ply, mv1);
        prop_assert_eq!(table.primary(ply), mv1);

        table.update(ply, mv2);
        prop_assert_eq!(table.primary(ply), mv2);
        prop_assert_eq!(table.secondary(ply), mv1);

        // Re-recording the primary does not push it into the secondary slot.
        table.update(ply, mv2);
        prop_assert_eq!(table.secondary(ply), mv1);
    }

    /// Property: history scores grow monotonically and stay below the killer scores
    #[test]
    fn prop_history_bounded(
        to in square_strategy(),
        depth in 1..64i32,
        num_updates in 1..200usize
    ) {
        let mut table = HistoryTable::new();
        let mut last = 0;
        for _ in 0..num_updates {
            table.update(Color::White, Piece::Knight, to, depth * depth);
            let score = table.score(Color::White, Piece::Knight, to);
            prop_assert!(score >= last);
            prop_assert!(score <= 50_000);
            last = score;
        }
        prop_assert_eq!(table.score(Color::Black, Piece::Knight, to), 0);
    }

    // ========================================================================
    // Evaluation Property Tests
    // ========================================================================

    /// Property: evaluation is bounded and flips sign with a null move
    #[test]
    fn prop_eval_bounded(seed in seed_strategy(), num_moves in move_count_strategy()) {
        for board in random_game(seed, num_moves) {
            let eval = board.evaluate();
            prop_assert!(eval.abs() < 10_000, "Evaluation {} is unreasonably large", eval);
            prop_assert_eq!(board.make_null_move().evaluate(), -eval);
        }
    }

    // ========================================================================
    // Transposition Table Property Tests
    // ========================================================================

    /// Property: TT stores and retrieves correct data
    #[test]
    fn prop_tt_store_retrieve(
        hash in any::<u64>(),
        depth in 0..100u32,
        score in -60_000..60_000i32
    ) {
        use crate::tt::{BoundType, TranspositionTable};

        let mut tt = TranspositionTable::with_entries(1024);
        tt.store(hash, depth, score, BoundType::Exact, None);

        let entry = tt.probe(hash);
        prop_assert!(entry.is_some());
        if let Some(entry) = entry {
            prop_assert_eq!(entry.depth(), depth);
            prop_assert_eq!(entry.score(), score);
            prop_assert_eq!(entry.bound_type(), BoundType::Exact);
        }
        prop_assert!(tt.probe(hash ^ 1).is_none());
    }
}
