use super::{Bitboard, CastlingRights, Color, Piece, Square};
use crate::zobrist::ZOBRIST;

/// A chess position.
///
/// Twelve disjoint piece bitboards, the per-color and combined occupancy derived from them,
/// the side to move, castling rights, the en passant target and an incrementally maintained
/// Zobrist hash. `Board` is `Copy`: applying a move returns a new value and backtracking is
/// simply dropping it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Board {
    pub(crate) pieces: [[Bitboard; 6]; 2],
    pub(crate) occupied: [Bitboard; 2],
    pub(crate) all_occupied: Bitboard,
    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant_target: Option<Square>,
    pub(crate) hash: u64, // Zobrist hash
}

const BACK_RANK: [Piece; 8] = [
    Piece::Rook,
    Piece::Knight,
    Piece::Bishop,
    Piece::Queen,
    Piece::King,
    Piece::Bishop,
    Piece::Knight,
    Piece::Rook,
];

impl Board {
    /// The standard starting position.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Board::empty();
        for (file, piece) in (0u8..).zip(BACK_RANK) {
            board.put(Square::from_index(file), Color::White, piece);
            board.put(Square::from_index(56 + file), Color::Black, piece);
            board.put(Square::from_index(8 + file), Color::White, Piece::Pawn);
            board.put(Square::from_index(48 + file), Color::Black, Piece::Pawn);
        }
        board.castling_rights = CastlingRights::all();
        board.hash = board.calculate_hash();
        board
    }

    pub(crate) fn empty() -> Self {
        Board {
            pieces: [[Bitboard::EMPTY; 6]; 2],
            occupied: [Bitboard::EMPTY; 2],
            all_occupied: Bitboard::EMPTY,
            side_to_move: Color::White,
            castling_rights: CastlingRights::none(),
            en_passant_target: None,
            hash: 0,
        }
    }

    #[inline]
    #[must_use]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    #[must_use]
    pub fn white_to_move(&self) -> bool {
        self.side_to_move == Color::White
    }

    #[inline]
    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    /// Square a pawn passed over with the last double push, if any.
    #[inline]
    #[must_use]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant_target
    }

    #[inline]
    #[must_use]
    pub fn pieces(&self, color: Color, piece: Piece) -> Bitboard {
        self.pieces[color.index()][piece.index()]
    }

    #[inline]
    #[must_use]
    pub fn occupied_by(&self, color: Color) -> Bitboard {
        self.occupied[color.index()]
    }

    #[inline]
    #[must_use]
    pub fn occupied(&self) -> Bitboard {
        self.all_occupied
    }

    /// Square of `color`'s king, if it has one.
    #[inline]
    #[must_use]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces(color, Piece::King).lsb()
    }

    /// Color and kind of the piece on `sq`.
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        let color = Color::BOTH
            .into_iter()
            .find(|&c| self.occupied[c.index()].contains(sq))?;
        Piece::ALL
            .into_iter()
            .find(|&p| self.pieces(color, p).contains(sq))
            .map(|p| (color, p))
    }

    /// Kind of the piece on `sq`, whichever side owns it.
    #[must_use]
    pub fn find_piece(&self, sq: Square) -> Option<Piece> {
        self.piece_at(sq).map(|(_, piece)| piece)
    }

    /// XOR `piece` of `color` on `sq` into every bitboard and the hash.
    #[inline]
    pub(crate) fn toggle_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        let bit = Bitboard::from_square(sq);
        self.pieces[color.index()][piece.index()] ^= bit;
        self.occupied[color.index()] ^= bit;
        self.all_occupied ^= bit;
        self.hash ^= ZOBRIST.piece(color, piece, sq);
    }

    /// Place a piece without touching the hash; for building positions before hashing.
    pub(crate) fn put(&mut self, sq: Square, color: Color, piece: Piece) {
        let bit = Bitboard::from_square(sq);
        self.pieces[color.index()][piece.index()] |= bit;
        self.occupied[color.index()] |= bit;
        self.all_occupied |= bit;
    }

    /// Compute the Zobrist hash from scratch.
    #[must_use]
    pub fn calculate_hash(&self) -> u64 {
        let mut hash = 0;
        for color in Color::BOTH {
            for piece in Piece::ALL {
                for sq in self.pieces(color, piece).iter() {
                    hash ^= ZOBRIST.piece(color, piece, sq);
                }
            }
        }
        if self.side_to_move == Color::Black {
            hash ^= ZOBRIST.black_to_move_key;
        }
        hash ^= ZOBRIST.castling(self.castling_rights);
        if let Some(ep) = self.en_passant_target {
            hash ^= ZOBRIST.en_passant(ep);
        }
        hash
    }

    /// Number of knights, bishops, rooks and queens `color` has.
    #[must_use]
    pub(crate) fn non_pawn_material_count(&self, color: Color) -> u32 {
        [Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen]
            .into_iter()
            .map(|piece| self.pieces(color, piece).popcount())
            .sum()
    }

    /// Check the structural invariants: disjoint piece sets, consistent occupancy and hash.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let mut seen = Bitboard::EMPTY;
        for color in Color::BOTH {
            let mut union = Bitboard::EMPTY;
            for piece in Piece::ALL {
                let set = self.pieces(color, piece);
                if !(seen & set).is_empty() {
                    return false;
                }
                seen |= set;
                union |= set;
            }
            if union != self.occupied_by(color) {
                return false;
            }
        }
        seen == self.all_occupied
            && (self.occupied[0] | self.occupied[1]) == self.all_occupied
            && self.calculate_hash() == self.hash
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}
