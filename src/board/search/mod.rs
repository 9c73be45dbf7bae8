//! Search module implementing alpha-beta with iterative deepening.
//!
//! Features:
//! - Iterative deepening with aspiration windows
//! - Negamax alpha-beta with principal variation search
//! - Null move pruning and late move reductions
//! - Check, pawn-push and single-reply extensions
//! - Quiescence search with stand-pat and delta pruning
//! - Move ordering (PV move, MVV-LVA, killers, history)
//! - Two-tier transposition table for cutoffs
//!
//! Search is single-threaded and every per-search table lives in a [`SearchState`]
//! passed down the call graph, so searches with fresh state are repeatable.

mod alphabeta;
mod constants;
mod info;
mod move_order;
mod params;

use std::time::{Duration, Instant};

use crate::tt::TranspositionTable;

use super::{Board, Color, Move, Piece, Square, MAX_PLY};
use alphabeta::SearchContext;
pub use constants::{MATE_SCORE, MATE_THRESHOLD};
pub use info::{SearchInfo, SearchInfoCallback};
pub use params::SearchParams;

/// Outcome of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// The best move found; `None` only when the side to move has no legal move
    pub best_move: Option<Move>,
    /// Score of the deepest completed iteration, from the side to move's point of view
    pub score: i32,
    /// Deepest fully completed iteration (0 if none completed)
    pub depth: u32,
    pub nodes: u64,
    /// Principal variation of the deepest completed iteration
    pub pv: Vec<Move>,
}

/// Default transposition table size in MB
pub const DEFAULT_TT_MB: usize = 64;

/// Default iteration limit when none is configured
pub const DEFAULT_MAX_DEPTH: u32 = 64;

/// Statistics tracked during search
#[derive(Clone, Debug, Default)]
pub struct SearchStats {
    pub nodes: u64,
    pub total_nodes: u64,
    pub tt_hits: u64,
}

impl SearchStats {
    pub fn reset_search(&mut self) {
        self.nodes = 0;
        self.tt_hits = 0;
    }
}

/// Two quiet moves per ply that recently caused a beta cutoff.
pub struct KillerTable {
    slots: [[Move; 2]; MAX_PLY],
}

impl Default for KillerTable {
    fn default() -> Self {
        Self::new()
    }
}

impl KillerTable {
    #[must_use]
    pub fn new() -> Self {
        KillerTable {
            slots: [[Move::NULL; 2]; MAX_PLY],
        }
    }

    #[must_use]
    pub fn primary(&self, ply: usize) -> Move {
        self.slots.get(ply).map_or(Move::NULL, |row| row[0])
    }

    #[must_use]
    pub fn secondary(&self, ply: usize) -> Move {
        self.slots.get(ply).map_or(Move::NULL, |row| row[1])
    }

    /// Record a cutoff move; an existing primary is shifted to the secondary slot.
    pub fn update(&mut self, ply: usize, mv: Move) {
        let Some(row) = self.slots.get_mut(ply) else {
            return;
        };
        if row[0] != mv {
            row[1] = row[0];
            row[0] = mv;
        }
    }

    pub fn reset(&mut self) {
        self.slots = [[Move::NULL; 2]; MAX_PLY];
    }
}

/// Quiet-move history indexed by `[color][piece][destination]`.
pub struct HistoryTable {
    entries: [[[i32; 64]; 6]; 2],
}

impl Default for HistoryTable {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryTable {
    #[must_use]
    pub fn new() -> Self {
        HistoryTable {
            entries: [[[0; 64]; 6]; 2],
        }
    }

    #[must_use]
    pub fn score(&self, color: Color, piece: Piece, to: Square) -> i32 {
        self.entries[color.index()][piece.index()][usize::from(to.index())]
    }

    /// Credit a quiet move that raised alpha, saturating below the killer scores.
    pub fn update(&mut self, color: Color, piece: Piece, to: Square, depth: i32) {
        let entry = &mut self.entries[color.index()][piece.index()][usize::from(to.index())];
        *entry = entry.saturating_add(depth.max(1)).min(constants::HISTORY_MAX);
    }

    pub fn reset(&mut self) {
        self.entries = [[[0; 64]; 6]; 2];
    }
}

/// Triangular principal-variation table: row `ply` holds the best line from that ply.
pub struct PvTable {
    moves: Box<[[Move; MAX_PLY]; MAX_PLY]>,
    len: [usize; MAX_PLY],
}

impl Default for PvTable {
    fn default() -> Self {
        Self::new()
    }
}

impl PvTable {
    #[must_use]
    pub fn new() -> Self {
        PvTable {
            moves: Box::new([[Move::NULL; MAX_PLY]; MAX_PLY]),
            len: [0; MAX_PLY],
        }
    }

    /// Forget the line at `ply` (done on entering a node).
    pub fn clear(&mut self, ply: usize) {
        if let Some(len) = self.len.get_mut(ply) {
            *len = 0;
        }
    }

    /// `mv` becomes the best move at `ply`, followed by the child's line.
    pub fn update(&mut self, ply: usize, mv: Move) {
        if ply + 1 >= MAX_PLY {
            return;
        }
        let child_len = self.len[ply + 1].min(MAX_PLY - 1);
        let (head, tail) = self.moves.split_at_mut(ply + 1);
        let row = &mut head[ply];
        row[0] = mv;
        row[1..=child_len].copy_from_slice(&tail[0][..child_len]);
        self.len[ply] = child_len + 1;
    }

    #[must_use]
    pub fn line(&self, ply: usize) -> &[Move] {
        match (self.moves.get(ply), self.len.get(ply)) {
            (Some(row), Some(&len)) => &row[..len],
            _ => &[],
        }
    }
}

/// Tables used during search (TT, killers, history, PV)
pub struct SearchTables {
    pub tt: TranspositionTable,
    pub killer_moves: KillerTable,
    pub history: HistoryTable,
    pub pv: PvTable,
}

/// Search state persisted across searches.
pub struct SearchState {
    pub stats: SearchStats,
    pub tables: SearchTables,
    pub params: SearchParams,
    principal_variation: Vec<Move>,
    info_callback: Option<SearchInfoCallback>,
}

impl SearchState {
    #[must_use]
    pub fn new(tt_mb: usize) -> Self {
        SearchState {
            stats: SearchStats::default(),
            tables: SearchTables {
                tt: TranspositionTable::new(tt_mb),
                killer_moves: KillerTable::new(),
                history: HistoryTable::new(),
                pv: PvTable::new(),
            },
            params: SearchParams::default(),
            principal_variation: Vec::new(),
            info_callback: None,
        }
    }

    /// Reset per-search tables; the transposition table is kept.
    pub fn new_search(&mut self) {
        self.stats.reset_search();
        self.tables.killer_moves.reset();
        self.tables.history.reset();
        self.principal_variation.clear();
    }

    /// Nodes visited by the most recent search.
    #[must_use]
    pub fn nodes_searched(&self) -> u64 {
        self.stats.nodes
    }

    /// Principal variation of the most recent search's deepest completed iteration.
    #[must_use]
    pub fn principal_variation(&self) -> &[Move] {
        &self.principal_variation
    }

    /// Callback run after every completed iteration of every later search.
    pub fn set_info_callback(&mut self, callback: Option<SearchInfoCallback>) {
        self.info_callback = callback;
    }

    pub fn params_mut(&mut self) -> &mut SearchParams {
        &mut self.params
    }

    #[must_use]
    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    pub fn set_params(&mut self, params: SearchParams) {
        self.params = params;
    }

    /// Replace the transposition table with an empty one of `tt_mb` megabytes.
    pub fn reset_tables(&mut self, tt_mb: usize) {
        self.tables.tt = TranspositionTable::new(tt_mb);
        self.stats.reset_search();
    }

    #[must_use]
    pub fn hashfull_per_mille(&self) -> u32 {
        self.tables.tt.hashfull_per_mille()
    }
}

impl Default for SearchState {
    fn default() -> Self {
        SearchState::new(DEFAULT_TT_MB)
    }
}

/// Configuration for a search operation.
#[derive(Clone, Default)]
pub struct SearchConfig {
    /// Maximum depth to search (None = [`DEFAULT_MAX_DEPTH`]); clamped below `MAX_PLY`
    pub max_depth: Option<u32>,
    /// Time limit in milliseconds (0 = unlimited)
    pub time_limit_ms: u64,
    /// Optional callback for iteration info, used instead of the state's callback
    pub info_callback: Option<SearchInfoCallback>,
}

impl SearchConfig {
    /// Create a depth-limited search config
    #[must_use]
    pub fn depth(max_depth: u32) -> Self {
        SearchConfig {
            max_depth: Some(max_depth),
            ..Default::default()
        }
    }

    /// Create a time-limited search config
    #[must_use]
    pub fn time(time_limit_ms: u64) -> Self {
        SearchConfig {
            time_limit_ms,
            ..Default::default()
        }
    }

    /// Attach a callback for iteration info reporting.
    #[must_use]
    pub fn with_info_callback(mut self, callback: SearchInfoCallback) -> Self {
        self.info_callback = Some(callback);
        self
    }
}

/// Run an iterative-deepening search of `board` under `config`.
///
/// # Example
/// ```
/// use chess_search::board::{search, Board, SearchConfig, SearchState};
///
/// let mut state = SearchState::new(1);
/// let result = search(&Board::new(), &mut state, SearchConfig::depth(3));
/// assert!(result.best_move.is_some());
/// assert_eq!(result.depth, 3);
/// ```
#[allow(clippy::needless_pass_by_value)] // Config is intentionally consumed
pub fn search(board: &Board, state: &mut SearchState, config: SearchConfig) -> SearchResult {
    let start_time = Instant::now();
    let deadline = (config.time_limit_ms > 0)
        .then(|| start_time + Duration::from_millis(config.time_limit_ms));
    let max_depth = config
        .max_depth
        .unwrap_or(DEFAULT_MAX_DEPTH)
        .clamp(1, MAX_PLY as u32 - 1);
    run(board, state, start_time, deadline, max_depth, config.info_callback)
}

/// Best move for `board` found within `time_budget_ms` milliseconds.
///
/// Returns `None` only when there is no legal move. A position with a single legal move
/// answers immediately; when not even the first iteration completes in time, the first
/// move in search order is returned.
pub fn best_move_for(board: &Board, state: &mut SearchState, time_budget_ms: u64) -> Option<Move> {
    let start_time = Instant::now();
    let deadline = Some(start_time + Duration::from_millis(time_budget_ms));
    run(board, state, start_time, deadline, MAX_PLY as u32 - 1, None).best_move
}

fn run(
    board: &Board,
    state: &mut SearchState,
    start_time: Instant,
    deadline: Option<Instant>,
    max_depth: u32,
    info_callback: Option<SearchInfoCallback>,
) -> SearchResult {
    state.new_search();
    let info_callback = info_callback.or_else(|| state.info_callback.clone());
    let mut ctx = SearchContext::new(state, start_time, deadline, info_callback);
    let result = ctx.iterative_deepening(board, max_depth);

    state.stats.nodes = result.nodes;
    state.stats.total_nodes = state.stats.total_nodes.saturating_add(result.nodes);
    state.principal_variation.clone_from(&result.pv);
    result
}
