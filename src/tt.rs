//! Transposition table for caching search results.
//!
//! Two parallel tables indexed by `hash % len`: the shallow table always takes the newest
//! entry for its slot, while the deep table only gives a slot up to an entry searched at
//! least as deep. Every slot keeps the full 64-bit hash and a probe whose stored hash
//! differs from the live one is a miss, so index collisions never leak a foreign result.

use std::mem;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::Move;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BoundType {
    Exact,      // Score is the exact value
    LowerBound, // Score is at least this value (failed high - score >= beta)
    UpperBound, // Score is at most this value (failed low - score <= alpha)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TTEntry {
    pub hash: u64,
    pub depth: u8,
    pub score: i32,
    pub bound_type: BoundType,
    pub best_move: Option<Move>,
}

impl TTEntry {
    pub fn depth(&self) -> u32 {
        u32::from(self.depth)
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn bound_type(&self) -> BoundType {
        self.bound_type
    }

    pub fn best_move(&self) -> Option<Move> {
        self.best_move
    }

    /// The score this entry proves for a `depth` search of the `[alpha, beta]` window.
    ///
    /// Exact entries answer directly; a lower bound at or above `beta` proves a fail-high
    /// (`beta`) and an upper bound at or below `alpha` proves a fail-low (`alpha`).
    #[must_use]
    pub fn usable_score(&self, depth: u32, alpha: i32, beta: i32) -> Option<i32> {
        if self.depth() < depth {
            return None;
        }
        match self.bound_type {
            BoundType::Exact => Some(self.score),
            BoundType::LowerBound if self.score >= beta => Some(beta),
            BoundType::UpperBound if self.score <= alpha => Some(alpha),
            _ => None,
        }
    }
}

/// Two-tier transposition table.
pub struct TranspositionTable {
    shallow: Vec<Option<TTEntry>>,
    deep: Vec<Option<TTEntry>>,
}

impl TranspositionTable {
    /// Create a table using roughly `size_mb` megabytes, split evenly between the two tiers.
    #[must_use]
    pub fn new(size_mb: usize) -> Self {
        let slot_size = mem::size_of::<Option<TTEntry>>();
        let entries = (size_mb * 1024 * 1024 / (2 * slot_size)).max(1);
        log::debug!("transposition table: {size_mb} MB, {entries} entries per tier");
        Self::with_entries(entries)
    }

    /// Create a table with exactly `entries` slots per tier (at least one).
    #[must_use]
    pub fn with_entries(entries: usize) -> Self {
        let entries = entries.max(1);
        TranspositionTable {
            shallow: vec![None; entries],
            deep: vec![None; entries],
        }
    }

    /// Slots per tier.
    #[must_use]
    pub fn len(&self) -> usize {
        self.deep.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deep.iter().chain(&self.shallow).all(Option::is_none)
    }

    fn index(&self, hash: u64) -> usize {
        (hash % self.deep.len() as u64) as usize
    }

    /// Probe the table for an entry matching the given hash, preferring the deep tier.
    #[must_use]
    pub fn probe(&self, hash: u64) -> Option<TTEntry> {
        let idx = self.index(hash);
        [self.deep[idx], self.shallow[idx]]
            .into_iter()
            .flatten()
            .find(|entry| entry.hash == hash)
    }

    /// Probe and resolve the entry against a search window; see [`TTEntry::usable_score`].
    #[must_use]
    pub fn probe_score(&self, hash: u64, depth: u32, alpha: i32, beta: i32) -> Option<i32> {
        self.probe(hash)
            .and_then(|entry| entry.usable_score(depth, alpha, beta))
    }

    /// Store a search result.
    ///
    /// The shallow slot is always overwritten. The deep slot is overwritten when it is empty
    /// or holds an entry searched no deeper than `depth`.
    pub fn store(
        &mut self,
        hash: u64,
        depth: u32,
        score: i32,
        bound_type: BoundType,
        best_move: Option<Move>,
    ) {
        let entry = TTEntry {
            hash,
            depth: depth.min(u32::from(u8::MAX)) as u8,
            score,
            bound_type,
            best_move,
        };
        let idx = self.index(hash);
        self.shallow[idx] = Some(entry);
        let deep = &mut self.deep[idx];
        if deep.map_or(true, |old| entry.depth >= old.depth) {
            *deep = Some(entry);
        }
    }

    /// Returns hash table fullness in per mille (0-1000), sampled over both tiers.
    #[must_use]
    pub fn hashfull_per_mille(&self) -> u32 {
        let sample_size = self.deep.len().min(1000);
        let occupied = self.deep[..sample_size]
            .iter()
            .chain(&self.shallow[..sample_size])
            .filter(|slot| slot.is_some())
            .count();
        ((occupied as u64 * 1000) / (2 * sample_size) as u64) as u32
    }

    /// Clear all entries from the table.
    pub fn clear(&mut self) {
        self.shallow.fill(None);
        self.deep.fill(None);
    }
}
