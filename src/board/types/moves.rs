//! Move types and move list.

use std::fmt;
use std::ops::Index;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::Piece;
use super::square::Square;

const SQUARE_MASK: u32 = 0x3F;
const KIND_MASK: u32 = 0x7;

const TO_SHIFT: u32 = 6;
const PIECE_SHIFT: u32 = 12;
const PROMOTION_SHIFT: u32 = 15;
const CAPTURED_SHIFT: u32 = 18;

const FLAG_DOUBLE_PUSH: u32 = 1 << 21;
const FLAG_EN_PASSANT: u32 = 1 << 22;
const FLAG_CASTLE: u32 = 1 << 23;

/// Compact 32-bit move representation.
///
/// Encoding:
/// - bits 0-5:   from square (0-63)
/// - bits 6-11:  to square (0-63)
/// - bits 12-14: moving piece kind
/// - bits 15-17: promotion kind + 1 (0 = none)
/// - bits 18-20: captured piece kind + 1 (0 = none)
/// - bit 21:     double pawn push
/// - bit 22:     en passant capture
/// - bit 23:     castle
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move(u32);

/// Unpacked view of every field a [`Move`] carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveFields {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub promotion: Option<Piece>,
    pub captured: Option<Piece>,
    pub double_push: bool,
    pub en_passant: bool,
    pub castle: bool,
}

#[inline]
const fn encode_kind(kind: Option<Piece>) -> u32 {
    match kind {
        Some(piece) => piece.index() as u32 + 1,
        None => 0,
    }
}

#[inline]
const fn decode_kind(bits: u32) -> Option<Piece> {
    if bits == 0 {
        None
    } else {
        Piece::from_index(bits as usize - 1)
    }
}

impl Move {
    /// The null move (a1a1); never produced by the generator
    pub const NULL: Move = Move(0);

    /// Create a plain move of `piece` from `from` to `to`
    #[inline]
    #[must_use]
    pub const fn new(from: Square, to: Square, piece: Piece) -> Self {
        Move(
            from.index() as u32
                | ((to.index() as u32) << TO_SHIFT)
                | ((piece.index() as u32) << PIECE_SHIFT),
        )
    }

    /// Pack all fields into a move
    #[must_use]
    pub const fn encode(fields: MoveFields) -> Self {
        let mut bits = Move::new(fields.from, fields.to, fields.piece).0
            | (encode_kind(fields.promotion) << PROMOTION_SHIFT)
            | (encode_kind(fields.captured) << CAPTURED_SHIFT);
        if fields.double_push {
            bits |= FLAG_DOUBLE_PUSH;
        }
        if fields.en_passant {
            bits |= FLAG_EN_PASSANT;
        }
        if fields.castle {
            bits |= FLAG_CASTLE;
        }
        Move(bits)
    }

    /// Unpack all fields of the move
    #[must_use]
    pub const fn decode(self) -> MoveFields {
        MoveFields {
            from: self.from(),
            to: self.to(),
            piece: self.piece(),
            promotion: self.promotion(),
            captured: self.captured(),
            double_push: self.is_double_push(),
            en_passant: self.is_en_passant(),
            castle: self.is_castle(),
        }
    }

    /// Mark the move as capturing `victim`
    #[inline]
    #[must_use]
    pub const fn with_capture(self, victim: Piece) -> Self {
        Move(self.0 | (encode_kind(Some(victim)) << CAPTURED_SHIFT))
    }

    /// Mark the move as promoting to `piece`
    #[inline]
    #[must_use]
    pub const fn with_promotion(self, piece: Piece) -> Self {
        Move(self.0 | (encode_kind(Some(piece)) << PROMOTION_SHIFT))
    }

    /// Create a double pawn push
    #[inline]
    #[must_use]
    pub const fn double_push(from: Square, to: Square) -> Self {
        Move(Move::new(from, to, Piece::Pawn).0 | FLAG_DOUBLE_PUSH)
    }

    /// Create an en passant capture
    #[inline]
    #[must_use]
    pub const fn en_passant(from: Square, to: Square) -> Self {
        Move(Move::new(from, to, Piece::Pawn).with_capture(Piece::Pawn).0 | FLAG_EN_PASSANT)
    }

    /// Create a castle, encoded as the king's two-square move
    #[inline]
    #[must_use]
    pub const fn castle(from: Square, to: Square) -> Self {
        Move(Move::new(from, to, Piece::King).0 | FLAG_CASTLE)
    }

    /// Get the source square
    #[inline]
    #[must_use]
    pub const fn from(self) -> Square {
        Square::from_index((self.0 & SQUARE_MASK) as u8)
    }

    /// Get the destination square
    #[inline]
    #[must_use]
    pub const fn to(self) -> Square {
        Square::from_index(((self.0 >> TO_SHIFT) & SQUARE_MASK) as u8)
    }

    /// Get the moving piece kind
    #[inline]
    #[must_use]
    pub const fn piece(self) -> Piece {
        match Piece::from_index(((self.0 >> PIECE_SHIFT) & KIND_MASK) as usize) {
            Some(piece) => piece,
            None => Piece::Pawn,
        }
    }

    /// Get the promotion piece, if this is a promotion move
    #[inline]
    #[must_use]
    pub const fn promotion(self) -> Option<Piece> {
        decode_kind((self.0 >> PROMOTION_SHIFT) & KIND_MASK)
    }

    /// Get the captured piece kind, if any (a pawn for en passant)
    #[inline]
    #[must_use]
    pub const fn captured(self) -> Option<Piece> {
        decode_kind((self.0 >> CAPTURED_SHIFT) & KIND_MASK)
    }

    /// Returns true if this move captures a piece (including en passant)
    #[inline]
    #[must_use]
    pub const fn is_capture(self) -> bool {
        (self.0 >> CAPTURED_SHIFT) & KIND_MASK != 0
    }

    /// Returns true if this move is a pawn promotion
    #[inline]
    #[must_use]
    pub const fn is_promotion(self) -> bool {
        (self.0 >> PROMOTION_SHIFT) & KIND_MASK != 0
    }

    #[inline]
    #[must_use]
    pub const fn is_double_push(self) -> bool {
        self.0 & FLAG_DOUBLE_PUSH != 0
    }

    #[inline]
    #[must_use]
    pub const fn is_en_passant(self) -> bool {
        self.0 & FLAG_EN_PASSANT != 0
    }

    #[inline]
    #[must_use]
    pub const fn is_castle(self) -> bool {
        self.0 & FLAG_CASTLE != 0
    }

    /// Returns true if this move neither captures nor promotes
    #[inline]
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        !self.is_capture() && !self.is_promotion()
    }

    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Get the raw 32-bit value (for hashing/storage)
    #[inline]
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({}{} {:?}", self.from(), self.to(), self.piece())?;
        if let Some(promo) = self.promotion() {
            write!(f, "={}", promo.to_char().to_ascii_uppercase())?;
        }
        if let Some(victim) = self.captured() {
            write!(f, " x{victim:?}")?;
        }
        if self.is_double_push() {
            write!(f, " double")?;
        }
        if self.is_castle() {
            write!(f, " castle")?;
        }
        if self.is_en_passant() {
            write!(f, " ep")?;
        }
        write!(f, ")")
    }
}

/// Coordinate notation: source, target and an optional promotion letter (`e7e8q`).
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from(), self.to())?;
        if let Some(promo) = self.promotion() {
            write!(f, "{}", promo.to_char())?;
        }
        Ok(())
    }
}

pub(crate) const MAX_MOVES: usize = 256;
pub(crate) const MAX_PLY: usize = 128;

/// List of moves with fixed-size backing array.
#[derive(Clone, Debug)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: usize,
}

impl MoveList {
    #[must_use]
    pub fn new() -> Self {
        MoveList {
            moves: [Move::NULL; MAX_MOVES],
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, mv: Move) {
        self.moves[self.len] = mv;
        self.len += 1;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    #[must_use]
    pub fn contains(&self, mv: Move) -> bool {
        self.as_slice().contains(&mv)
    }

    #[must_use]
    pub fn get(&self, idx: usize) -> Option<Move> {
        self.as_slice().get(idx).copied()
    }

    #[must_use]
    pub fn first(&self) -> Option<Move> {
        self.get(0)
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl Default for MoveList {
    fn default() -> Self {
        MoveList::new()
    }
}

impl Index<usize> for MoveList {
    type Output = Move;

    fn index(&self, idx: usize) -> &Self::Output {
        assert!(
            idx < self.len,
            "MoveList index {} out of bounds (len {})",
            idx,
            self.len
        );
        &self.moves[idx]
    }
}

/// A scored move for move ordering.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ScoredMove {
    pub mv: Move,
    pub score: i32,
}

/// Fixed-size list of scored moves to avoid heap allocation.
#[derive(Clone, Debug)]
pub(crate) struct ScoredMoveList {
    moves: [ScoredMove; MAX_MOVES],
    len: usize,
}

impl ScoredMoveList {
    pub(crate) fn new() -> Self {
        ScoredMoveList {
            moves: [ScoredMove {
                mv: Move::NULL,
                score: 0,
            }; MAX_MOVES],
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, mv: Move, score: i32) {
        self.moves[self.len] = ScoredMove { mv, score };
        self.len += 1;
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn as_slice(&self) -> &[ScoredMove] {
        &self.moves[..self.len]
    }

    /// Sort moves by score in descending order, keeping generation order among equal scores.
    pub(crate) fn sort_by_score_desc(&mut self) {
        self.moves[..self.len].sort_by(|a, b| b.score.cmp(&a.score));
    }

    pub(crate) fn iter(&self) -> std::slice::Iter<'_, ScoredMove> {
        self.as_slice().iter()
    }
}
