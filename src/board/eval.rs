use super::pst::piece_square_value;
use super::{Board, Color, Piece};

impl Board {
    /// Static evaluation in centipawns from the side to move's point of view.
    ///
    /// Material plus piece-square bonuses; Black's pieces use the mirrored tables.
    #[must_use]
    pub fn evaluate(&self) -> i32 {
        let mut score = 0;
        for piece in Piece::ALL {
            for sq in self.pieces(Color::White, piece).iter() {
                score += piece_square_value(Color::White, piece, sq);
            }
            for sq in self.pieces(Color::Black, piece).iter() {
                score -= piece_square_value(Color::Black, piece, sq);
            }
        }
        match self.side_to_move {
            Color::White => score,
            Color::Black => -score,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::board::Board;

    #[test]
    fn start_position_is_balanced() {
        assert_eq!(Board::new().evaluate(), 0);
    }

    #[test]
    fn mirrored_positions_evaluate_the_same() {
        let white = Board::from_fen("4k3/8/8/8/3N4/8/PP6/4K3 w - - 0 1");
        let black = Board::from_fen("4k3/pp6/8/3n4/8/8/8/4K3 b - - 0 1");
        assert_eq!(white.evaluate(), black.evaluate());
        assert!(white.evaluate() > 0);
    }

    #[test]
    fn score_flips_with_side_to_move() {
        let w = Board::from_fen("4k3/8/8/8/8/8/8/Q3K3 w - - 0 1");
        let b = Board::from_fen("4k3/8/8/8/8/8/8/Q3K3 b - - 0 1");
        assert_eq!(w.evaluate(), -b.evaluate());
    }
}
