//! Transposition cache for minimax results.
//!
//! A board's game-theoretic value depends only on its cells and the side to
//! move, so results are keyed by that pair rather than by search path.
//! Alpha-beta cutoffs mean a stored value may only be a bound; each entry
//! records which kind it is.

use crate::position::Position;
use crate::types::{Board, Player};
use std::collections::HashMap;
use tracing::trace;

/// How a stored value relates to the true minimax value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// The search completed inside the window: value is exact.
    Exact,
    /// Beta cutoff: true value >= stored value.
    Lower,
    /// Alpha fail-low: true value <= stored value.
    Upper,
}

/// A cached search result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheEntry {
    /// Best move found, `None` for terminal boards.
    pub best: Option<Position>,
    /// Value from the AI's perspective.
    pub value: i8,
    /// Kind of value stored.
    pub bound: Bound,
}

impl CacheEntry {
    /// Returns the entry if its value settles a search in `(alpha, beta)`.
    pub fn usable(self, alpha: i8, beta: i8) -> Option<Self> {
        match self.bound {
            Bound::Exact => Some(self),
            Bound::Lower if self.value >= beta => Some(self),
            Bound::Upper if self.value <= alpha => Some(self),
            _ => None,
        }
    }
}

/// Bounded map from board to search result.
///
/// Inserts past capacity are dropped; existing entries may still be
/// overwritten with better information.
#[derive(Debug, Clone)]
pub struct TranspositionCache {
    entries: HashMap<(Board, Player), CacheEntry>,
    capacity: usize,
}

impl TranspositionCache {
    /// Creates an empty cache holding at most `capacity` boards.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity,
        }
    }

    /// Looks up a board with `to_move` on move.
    pub fn probe(&self, board: Board, to_move: Player) -> Option<CacheEntry> {
        self.entries.get(&(board, to_move)).copied()
    }

    /// Stores a result. An exact entry is never replaced by a bound.
    pub fn store(&mut self, board: Board, to_move: Player, entry: CacheEntry) {
        let key = (board, to_move);
        if let Some(existing) = self.entries.get_mut(&key) {
            if existing.bound != Bound::Exact || entry.bound == Bound::Exact {
                *existing = entry;
            }
            return;
        }
        if self.entries.len() >= self.capacity {
            trace!(capacity = self.capacity, "Cache full, dropping entry");
            return;
        }
        self.entries.insert(key, entry);
    }

    /// Number of cached boards.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(value: i8, bound: Bound) -> CacheEntry {
        CacheEntry {
            best: Some(Position::Center),
            value,
            bound,
        }
    }

    #[test]
    fn test_usable_bounds() {
        assert!(entry(0, Bound::Exact).usable(-2, 2).is_some());
        assert!(entry(1, Bound::Lower).usable(-2, 1).is_some());
        assert!(entry(0, Bound::Lower).usable(-2, 1).is_none());
        assert!(entry(-1, Bound::Upper).usable(-1, 2).is_some());
        assert!(entry(0, Bound::Upper).usable(-1, 2).is_none());
    }

    #[test]
    fn test_capacity_is_enforced() {
        let mut cache = TranspositionCache::new(1);
        cache.store(Board::new(), Player::Human, entry(0, Bound::Exact));
        cache.store("X........".parse().unwrap(), Player::Ai, entry(0, Bound::Exact));
        assert_eq!(cache.len(), 1);
        assert!(cache.probe(Board::new(), Player::Human).is_some());
    }

    #[test]
    fn test_exact_not_downgraded() {
        let mut cache = TranspositionCache::new(4);
        cache.store(Board::new(), Player::Human, entry(0, Bound::Exact));
        cache.store(Board::new(), Player::Human, entry(1, Bound::Lower));
        assert_eq!(
            cache.probe(Board::new(), Player::Human),
            Some(entry(0, Bound::Exact))
        );
        assert_eq!(cache.probe(Board::new(), Player::Ai), None);
    }

    #[test]
    fn test_clear() {
        let mut cache = TranspositionCache::new(4);
        cache.store(Board::new(), Player::Human, entry(0, Bound::Exact));
        cache.clear();
        assert!(cache.is_empty());
    }
}
