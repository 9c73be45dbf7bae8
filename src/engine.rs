//! Engine facade: a current position plus the search state that persists between moves.

use crate::board::{
    best_move_for, Board, FenError, Move, MoveParseError, SearchInfoCallback, SearchState, DEFAULT_TT_MB,
};

/// Owns the game position and the search tables.
///
/// # Example
/// ```
/// use chess_search::Engine;
///
/// let mut engine = Engine::new(1);
/// engine.play("e2e4").unwrap();
/// engine.play("e7e5").unwrap();
/// assert!(engine.best_move(50).is_some());
/// ```
pub struct Engine {
    board: Board,
    search_state: SearchState,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new(DEFAULT_TT_MB)
    }
}

impl Engine {
    /// Create an engine at the starting position with a `tt_mb` megabyte transposition table.
    #[must_use]
    pub fn new(tt_mb: usize) -> Self {
        crate::init();
        Engine {
            board: Board::new(),
            search_state: SearchState::new(tt_mb),
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Replace the current position. The position is left unchanged on error.
    pub fn set_position(&mut self, fen: &str) -> Result<(), FenError> {
        self.board = Board::try_from_fen(fen)?;
        Ok(())
    }

    /// Back to the starting position with an empty transposition table.
    pub fn new_game(&mut self) {
        self.board = Board::new();
        self.search_state.tables.tt.clear();
        self.search_state.new_search();
    }

    /// Apply a move given in coordinate notation (`e2e4`, `e7e8q`) if it is legal here.
    pub fn play(&mut self, text: &str) -> Result<Move, MoveParseError> {
        let mv = self.board.parse_move(text)?;
        self.board = self.board.apply_move(mv);
        log::debug!("played {mv}");
        Ok(mv)
    }

    /// Best move for the current position within `time_budget_ms`; `None` when the game is over.
    pub fn best_move(&mut self, time_budget_ms: u64) -> Option<Move> {
        best_move_for(&self.board, &mut self.search_state, time_budget_ms)
    }

    #[must_use]
    pub fn nodes_searched(&self) -> u64 {
        self.search_state.nodes_searched()
    }

    #[must_use]
    pub fn principal_variation(&self) -> &[Move] {
        self.search_state.principal_variation()
    }

    pub fn set_info_callback(&mut self, callback: Option<SearchInfoCallback>) {
        self.search_state.set_info_callback(callback);
    }

    pub fn search_state_mut(&mut self) -> &mut SearchState {
        &mut self.search_state
    }
}
