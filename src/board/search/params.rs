/// Tunable search parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchParams {
    /// Half-width of the aspiration window around the previous iteration's score
    pub aspiration_window: i32,
    /// Factor a failing side of the aspiration window grows by
    pub aspiration_growth: i32,
    pub null_reduction: i32,
    pub null_min_depth: i32,
    /// Non-pawn pieces the side to move needs (strictly more than this) for null move
    pub null_min_pieces: u32,
    /// Accumulated extension along a line beyond which no more extensions are granted
    pub extension_budget: u32,
    pub lmr_min_depth: i32,
    /// Moves searched at full depth before reductions start
    pub lmr_full_moves: usize,
    /// Move index from which two plies are reduced
    pub lmr_two_ply_index: usize,
    /// Move index from which three plies are reduced
    pub lmr_three_ply_index: usize,
    /// Quiescence delta-pruning margin (a queen)
    pub delta_margin: i32,
    /// Extra margin when the side to move has a pawn one step from promoting
    pub delta_promotion_margin: i32,
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams {
            aspiration_window: 41,
            aspiration_growth: 3,
            null_reduction: 3,
            null_min_depth: 3,
            null_min_pieces: 2,
            extension_budget: 16,
            lmr_min_depth: 3,
            lmr_full_moves: 4,
            lmr_two_ply_index: 10,
            lmr_three_ply_index: 20,
            delta_margin: 1025,
            delta_promotion_margin: 1025 - 82,
        }
    }
}
