//! Precomputed attack tables for leaper pieces (knights, kings, pawns) and square-pair lines.

use std::sync::LazyLock;

use super::magic::{bishop_attacks, rook_attacks};

const NOT_FILE_A: u64 = 0xFEFE_FEFE_FEFE_FEFE;
const NOT_FILE_AB: u64 = 0xFCFC_FCFC_FCFC_FCFC;
const NOT_FILE_H: u64 = 0x7F7F_7F7F_7F7F_7F7F;
const NOT_FILE_GH: u64 = 0x3F3F_3F3F_3F3F_3F3F;

fn knight_mask(bb: u64) -> u64 {
    ((bb << 17) & NOT_FILE_A)
        | ((bb << 15) & NOT_FILE_H)
        | ((bb << 10) & NOT_FILE_AB)
        | ((bb << 6) & NOT_FILE_GH)
        | ((bb >> 17) & NOT_FILE_H)
        | ((bb >> 15) & NOT_FILE_A)
        | ((bb >> 10) & NOT_FILE_GH)
        | ((bb >> 6) & NOT_FILE_AB)
}

fn king_mask(bb: u64) -> u64 {
    let sideways = ((bb << 1) & NOT_FILE_A) | ((bb >> 1) & NOT_FILE_H);
    let row = bb | sideways;
    sideways | (row << 8) | (row >> 8)
}

fn pawn_mask(bb: u64, white: bool) -> u64 {
    if white {
        ((bb << 9) & NOT_FILE_A) | ((bb << 7) & NOT_FILE_H)
    } else {
        ((bb >> 7) & NOT_FILE_A) | ((bb >> 9) & NOT_FILE_H)
    }
}

pub(crate) static KNIGHT_ATTACKS: LazyLock<[u64; 64]> =
    LazyLock::new(|| std::array::from_fn(|sq| knight_mask(1u64 << sq)));

pub(crate) static KING_ATTACKS: LazyLock<[u64; 64]> =
    LazyLock::new(|| std::array::from_fn(|sq| king_mask(1u64 << sq)));

/// `PAWN_ATTACKS[color][sq]`: squares a pawn of `color` on `sq` attacks.
pub(crate) static PAWN_ATTACKS: LazyLock<[[u64; 64]; 2]> = LazyLock::new(|| {
    [
        std::array::from_fn(|sq| pawn_mask(1u64 << sq, true)),
        std::array::from_fn(|sq| pawn_mask(1u64 << sq, false)),
    ]
});

/// `LINE[a][b]`: the full rank, file or diagonal through both squares (empty if unaligned).
pub(crate) static LINE: LazyLock<Box<[[u64; 64]; 64]>> = LazyLock::new(|| {
    let mut table = Box::new([[0u64; 64]; 64]);
    for a in 0..64 {
        let a_bb = 1u64 << a;
        for b in 0..64 {
            if a == b {
                continue;
            }
            let b_bb = 1u64 << b;
            if rook_attacks(a, 0) & b_bb != 0 {
                table[a][b] = (rook_attacks(a, 0) & rook_attacks(b, 0)) | a_bb | b_bb;
            } else if bishop_attacks(a, 0) & b_bb != 0 {
                table[a][b] = (bishop_attacks(a, 0) & bishop_attacks(b, 0)) | a_bb | b_bb;
            }
        }
    }
    table
});

/// `BETWEEN[a][b]`: squares strictly between two aligned squares (empty otherwise).
pub(crate) static BETWEEN: LazyLock<Box<[[u64; 64]; 64]>> = LazyLock::new(|| {
    let mut table = Box::new([[0u64; 64]; 64]);
    for a in 0..64 {
        for b in 0..64 {
            let b_bb = 1u64 << b;
            let a_bb = 1u64 << a;
            if rook_attacks(a, 0) & b_bb != 0 {
                table[a][b] = rook_attacks(a, b_bb) & rook_attacks(b, a_bb);
            } else if bishop_attacks(a, 0) & b_bb != 0 {
                table[a][b] = bishop_attacks(a, b_bb) & bishop_attacks(b, a_bb);
            }
        }
    }
    table
});
