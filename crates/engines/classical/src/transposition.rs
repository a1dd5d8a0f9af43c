//! Search cache keyed by position hash.

use chess_core::Move;
use rustc_hash::FxHashMap;

/// How a stored score relates to the true value of the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Exact,
    /// Search failed high: the true score is at least this.
    Lower,
    /// Search failed low: the true score is at most this.
    Upper,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TtEntry {
    pub hash: u64,
    pub score: f32,
    pub depth: u8,
    pub bound: Bound,
    pub best_move: Option<Move>,
}

#[derive(Debug, Clone)]
pub struct TranspositionTable {
    entries: FxHashMap<u64, TtEntry>,
    capacity: usize,
}

impl TranspositionTable {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: FxHashMap::default(),
            capacity,
        }
    }

    pub fn probe(&self, hash: u64) -> Option<&TtEntry> {
        self.entries.get(&hash)
    }

    /// Keeps the deeper of the stored and new entry. Once full, new positions
    /// are dropped but existing ones can still be deepened.
    pub fn store(&mut self, entry: TtEntry) {
        match self.entries.get(&entry.hash) {
            Some(old) if old.depth > entry.depth => {}
            Some(_) => {
                self.entries.insert(entry.hash, entry);
            }
            None if self.entries.len() < self.capacity => {
                self.entries.insert(entry.hash, entry);
            }
            None => {}
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
