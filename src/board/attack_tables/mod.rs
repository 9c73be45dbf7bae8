//! Attack tables for move generation.
//!
//! Leaper attacks (pawn, knight, king) come from per-square lookup tables. Bishop and rook
//! attacks use magic bitboards; queen attacks are the union of the two lookups.

mod magic;
mod tables;

pub use magic::{find_magic, SliderKind, MAX_MAGIC_TRIES};

pub(crate) use tables::{BETWEEN, KING_ATTACKS, KNIGHT_ATTACKS, LINE, PAWN_ATTACKS};

use super::{Bitboard, Color, Square};

/// Build every attack table now instead of on first use.
///
/// Leaper tables are built first, then the magic slider tables, then the square-pair
/// tables that are derived from slider attacks.
pub fn init() {
    let _ = (&*KNIGHT_ATTACKS, &*KING_ATTACKS, &*PAWN_ATTACKS);
    let _ = (&*magic::BISHOP_TABLE, &*magic::ROOK_TABLE);
    let _ = (&*LINE, &*BETWEEN);
}

/// Squares attacked by a pawn of `color` standing on `sq`.
#[inline]
#[must_use]
pub fn pawn_attacks(color: Color, sq: Square) -> Bitboard {
    Bitboard(PAWN_ATTACKS[color.index()][sq.as_usize()])
}

#[inline]
#[must_use]
pub fn knight_attacks(sq: Square) -> Bitboard {
    Bitboard(KNIGHT_ATTACKS[sq.as_usize()])
}

#[inline]
#[must_use]
pub fn king_attacks(sq: Square) -> Bitboard {
    Bitboard(KING_ATTACKS[sq.as_usize()])
}

/// Bishop attacks from `sq`; each ray stops at (and includes) the first occupied square.
#[inline]
#[must_use]
pub fn bishop_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    Bitboard(magic::bishop_attacks(sq.as_usize(), occupancy.0))
}

/// Rook attacks from `sq`; each ray stops at (and includes) the first occupied square.
#[inline]
#[must_use]
pub fn rook_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    Bitboard(magic::rook_attacks(sq.as_usize(), occupancy.0))
}

#[inline]
#[must_use]
pub fn queen_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    bishop_attacks(sq, occupancy) | rook_attacks(sq, occupancy)
}

/// Full line through two aligned squares, or empty.
#[inline]
pub(crate) fn line(a: Square, b: Square) -> Bitboard {
    Bitboard(LINE[a.as_usize()][b.as_usize()])
}

/// Squares strictly between two aligned squares, or empty.
#[inline]
pub(crate) fn between(a: Square, b: Square) -> Bitboard {
    Bitboard(BETWEEN[a.as_usize()][b.as_usize()])
}
