use super::error::MoveParseError;
use super::{Board, Move, Piece, Square};

impl Board {
    /// Parse a move in coordinate notation (e.g., "e2e4", "e7e8q").
    ///
    /// Only source, target and promotion come from the text; capture, en passant, castle
    /// and double-push flags are taken from the matching legal move.
    ///
    /// # Example
    /// ```
    /// use chess_search::board::Board;
    ///
    /// let board = Board::new();
    /// let mv = board.parse_move("e2e4").unwrap();
    /// assert!(mv.is_double_push());
    /// ```
    pub fn parse_move(&self, text: &str) -> Result<Move, MoveParseError> {
        if !(4..=5).contains(&text.len()) || !text.is_ascii() {
            return Err(MoveParseError::InvalidLength { len: text.len() });
        }

        let square = |part: &str| {
            part.parse::<Square>()
                .map_err(|_| MoveParseError::InvalidSquare {
                    notation: text.to_string(),
                })
        };
        let from = square(&text[0..2])?;
        let to = square(&text[2..4])?;

        let promotion = match text[4..].chars().next() {
            None => None,
            Some(c) => match Piece::from_char(c) {
                Some(piece) if !matches!(piece, Piece::Pawn | Piece::King) => Some(piece),
                _ => return Err(MoveParseError::InvalidPromotion { char: c }),
            },
        };

        let illegal = || MoveParseError::IllegalMove {
            notation: text.to_string(),
        };
        let piece = self.find_piece(from).ok_or_else(illegal)?;

        self.generate_moves()
            .iter()
            .copied()
            .find(|mv| {
                mv.from() == from
                    && mv.to() == to
                    && mv.piece() == piece
                    && mv.promotion() == promotion
            })
            .ok_or_else(illegal)
    }

    /// Apply a textual move after checking it against the legal move list.
    ///
    /// # Example
    /// ```
    /// use chess_search::board::Board;
    ///
    /// let board = Board::new()
    ///     .apply_move_if_legal("e2e4")
    ///     .and_then(|b| b.apply_move_if_legal("e7e5"))
    ///     .unwrap();
    /// assert!(board.white_to_move());
    /// assert!(Board::new().apply_move_if_legal("e2e5").is_err());
    /// ```
    pub fn apply_move_if_legal(&self, text: &str) -> Result<Board, MoveParseError> {
        let mv = self.parse_move(text)?;
        Ok(self.apply_move(mv))
    }
}
