//! Perft counts read from `tests/data/perft.json`.

use serde::Deserialize;

use chess_search::board::Board;

#[derive(Deserialize)]
struct PerftCase {
    name: String,
    fen: String,
    depth: u32,
    nodes: u64,
}

#[test]
fn perft_suite() {
    let cases: Vec<PerftCase> =
        serde_json::from_str(include_str!("data/perft.json")).expect("invalid perft.json");
    assert!(!cases.is_empty());

    for case in &cases {
        let board = Board::from_fen(&case.fen);
        assert_eq!(board.perft(case.depth), case.nodes, "{} depth {}", case.name, case.depth);

        let divided: u64 = board.perft_divide(case.depth).iter().map(|(_, n)| n).sum();
        assert_eq!(divided, case.nodes, "{} divide", case.name);
    }
}
