use std::fmt;
use std::sync::Arc;

use crate::board::Move;

/// Report for one completed search iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchInfo {
    pub depth: u32,
    pub score: i32,
    pub nodes: u64,
    pub time_ms: u64,
    pub pv: Vec<Move>,
}

/// Renders as `depth 5 score 34 nodes 12345 time 87 pv e2e4 e7e5`.
impl fmt::Display for SearchInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "depth {} score {} nodes {} time {} pv",
            self.depth, self.score, self.nodes, self.time_ms
        )?;
        for mv in &self.pv {
            write!(f, " {mv}")?;
        }
        Ok(())
    }
}

/// Callback type for iteration info.
pub type SearchInfoCallback = Arc<dyn Fn(&SearchInfo) + Send + Sync>;
