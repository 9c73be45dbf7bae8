//! Perft (performance test) for move generation correctness.

use crate::board::Board;

struct TestPosition {
    name: &'static str,
    fen: &'static str,
    depths: &'static [(u32, u64)],
}

const STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
const POSITION_4: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
const POSITION_5: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";
const POSITION_6: &str = "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10";

const TEST_POSITIONS: &[TestPosition] = &[
    TestPosition {
        name: "Initial Position",
        fen: STARTPOS,
        depths: &[(1, 20), (2, 400), (3, 8902), (4, 197_281)],
    },
    TestPosition {
        name: "Kiwipete",
        fen: KIWIPETE,
        depths: &[(1, 48), (2, 2039), (3, 97_862)],
    },
    TestPosition {
        name: "Position 3",
        fen: POSITION_3,
        depths: &[(1, 14), (2, 191), (3, 2812), (4, 43_238)],
    },
    TestPosition {
        name: "Position 4",
        fen: POSITION_4,
        depths: &[(1, 6), (2, 264), (3, 9467)],
    },
    TestPosition {
        name: "Position 5",
        fen: POSITION_5,
        depths: &[(1, 44), (2, 1486), (3, 62_379)],
    },
    TestPosition {
        name: "Position 6",
        fen: POSITION_6,
        depths: &[(1, 46), (2, 2079), (3, 89_890)],
    },
    TestPosition {
        name: "En Passant Capture",
        fen: "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
        depths: &[(1, 31), (2, 707), (3, 21_637)],
    },
    TestPosition {
        name: "Promotion",
        fen: "n1n5/PPPk4/8/8/8/8/4Kppp/5N1N b - - 0 1",
        depths: &[(1, 24), (2, 496), (3, 9483)],
    },
    TestPosition {
        name: "Castling",
        fen: "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1",
        depths: &[(1, 26), (2, 568), (3, 13_744)],
    },
];

fn check(name: &str, fen: &str, depth: u32, expected: u64) {
    let board = Board::from_fen(fen);
    let nodes = board.perft(depth);
    assert_eq!(
        nodes, expected,
        "Perft failed for position '{name}' at depth {depth}. Expected: {expected}, Got: {nodes}"
    );
}

#[test]
fn test_all_perft_positions() {
    for position in TEST_POSITIONS {
        for &(depth, expected) in position.depths {
            check(position.name, position.fen, depth, expected);
        }
    }
}

#[test]
fn perft_divide_sums_to_perft() {
    let board = Board::from_fen(KIWIPETE);
    let divide = board.perft_divide(2);
    assert_eq!(divide.len(), 48);
    assert_eq!(divide.iter().map(|(_, n)| n).sum::<u64>(), 2039);
    assert_eq!(board.perft(0), 1);
}

// Full-depth reference counts. Run with `cargo test --release -- --ignored`.

#[test]
#[ignore]
fn perft_startpos_depth_6() {
    check("Initial Position", STARTPOS, 6, 119_060_324);
}

#[test]
#[ignore]
fn perft_kiwipete_depth_5() {
    check("Kiwipete", KIWIPETE, 5, 193_690_690);
}

#[test]
#[ignore]
fn perft_position_3_depth_7() {
    check("Position 3", POSITION_3, 7, 178_633_661);
}

#[test]
#[ignore]
fn perft_position_4_depth_6() {
    check("Position 4", POSITION_4, 6, 706_045_033);
}

#[test]
#[ignore]
fn perft_position_5_depth_5() {
    check("Position 5", POSITION_5, 5, 89_941_194);
}

#[test]
#[ignore]
fn perft_position_6_depth_5() {
    check("Position 6", POSITION_6, 5, 164_075_551);
}
