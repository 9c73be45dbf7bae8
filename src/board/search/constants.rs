//! Search constants.
//!
//! Score bounds and move-ordering priorities used by the alpha-beta search.

use crate::board::MAX_PLY;

// ============================================================================
// SCORES
// ============================================================================

/// Score of being checkmated at the root; mates further away score closer to zero.
pub const MATE_SCORE: i32 = 50_000;

/// Window bound larger than any reachable score.
pub const SCORE_BOUND: i32 = 100_000;

/// Scores with absolute value >= this are checkmate scores
pub const MATE_THRESHOLD: i32 = MATE_SCORE - MAX_PLY as i32;

// ============================================================================
// MOVE ORDERING PRIORITIES
// ============================================================================
// Higher scores = tried earlier. Ordered: PV > captures/promotions > killers > history

/// Move from the previous iteration's principal variation
pub const PV_MOVE_SCORE: i32 = 1_000_000;

/// Base for captures and promotions, before MVV-LVA and promotion bonus
pub const TACTICAL_BASE_SCORE: i32 = 100_000;

/// First killer move (quiet that caused beta cutoff at same ply)
pub const KILLER1_SCORE: i32 = 90_000;

/// Second killer move (replaced killer)
pub const KILLER2_SCORE: i32 = 80_000;

/// History scores saturate here, below every killer
pub const HISTORY_MAX: i32 = 50_000;
