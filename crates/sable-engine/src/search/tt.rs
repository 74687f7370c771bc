//! Direct-mapped transposition table with always-replace eviction.
//!
//! One 16-byte entry per slot, indexed by `hash % len`. A store overwrites
//! whatever occupies the slot. A lookup only succeeds when the full 64-bit
//! key matches, the stored depth is sufficient and the bound is usable for
//! the current window.
//!
//! Mate scores are stored relative to the node rather than the root: the
//! ply distance from the root is added to the magnitude on store and
//! removed again on retrieval.

use sable_core::Move;
use tracing::debug;

use crate::config::MAX_HASH_MB;
use crate::error::TtError;
use crate::search::is_mate_score;

/// How a stored score relates to the true value of the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Bound {
    /// Unused slot.
    Empty = 0,
    /// The score is exact.
    Exact = 1,
    /// The search failed high; the true score is at least this.
    LowerBound = 2,
    /// No move raised alpha; the true score is at most this.
    UpperBound = 3,
}

/// One table slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub key: u64,
    pub score: i32,
    pub best_move: Move,
    pub depth: u8,
    pub bound: Bound,
}

impl Entry {
    const EMPTY: Entry = Entry {
        key: 0,
        score: 0,
        best_move: Move::NULL,
        depth: 0,
        bound: Bound::Empty,
    };
}

/// Make a root-relative mate score node-relative before storing it.
pub fn score_to_tt(score: i32, ply: u16) -> i32 {
    if is_mate_score(score) {
        let sign = score.signum();
        (score.abs() + ply as i32) * sign
    } else {
        score
    }
}

/// Inverse of [`score_to_tt`].
pub fn score_from_tt(score: i32, ply: u16) -> i32 {
    if is_mate_score(score) {
        let sign = score.signum();
        (score.abs() - ply as i32) * sign
    } else {
        score
    }
}

/// Fixed-size cache of search results keyed by zobrist hash.
pub struct TranspositionTable {
    entries: Box<[Entry]>,
}

impl TranspositionTable {
    /// Allocate as many entries as fit in `size_mb` megabytes, which must
    /// be between 1 and [`MAX_HASH_MB`].
    pub fn new(size_mb: usize) -> Result<Self, TtError> {
        if size_mb > MAX_HASH_MB {
            return Err(TtError::TooLarge {
                size_mb,
                max_mb: MAX_HASH_MB,
            });
        }
        let bytes = size_mb.saturating_mul(1024 * 1024);
        let len = bytes / std::mem::size_of::<Entry>();
        if len == 0 {
            return Err(TtError::ZeroCapacity { size_mb });
        }
        debug!(size_mb, entries = len, "allocating transposition table");
        Ok(Self {
            entries: vec![Entry::EMPTY; len].into_boxed_slice(),
        })
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    fn index(&self, hash: u64) -> usize {
        (hash % self.entries.len() as u64) as usize
    }

    /// Reset every slot.
    pub fn clear(&mut self) {
        self.entries.fill(Entry::EMPTY);
    }

    /// The entry for `hash`, if the slot currently holds that position.
    pub fn probe(&self, hash: u64) -> Option<&Entry> {
        let entry = &self.entries[self.index(hash)];
        (entry.bound != Bound::Empty && entry.key == hash).then_some(entry)
    }

    /// The best move stored for `hash`, if any.
    pub fn stored_move(&self, hash: u64) -> Option<Move> {
        self.probe(hash)
            .map(|entry| entry.best_move)
            .filter(|mv| !mv.is_null())
    }

    /// A cached score usable for a `depth`-deep search with window
    /// `(alpha, beta)` at `ply` from the root.
    pub fn lookup(&self, hash: u64, depth: u16, ply: u16, alpha: i32, beta: i32) -> Option<i32> {
        let entry = self.probe(hash)?;
        if u16::from(entry.depth) < depth {
            return None;
        }
        let score = score_from_tt(entry.score, ply);
        let usable = match entry.bound {
            Bound::Exact => true,
            Bound::UpperBound => score <= alpha,
            Bound::LowerBound => score >= beta,
            Bound::Empty => false,
        };
        usable.then_some(score)
    }

    /// Overwrite the slot for `hash`.
    ///
    /// Depths beyond `u8::MAX` are saturated, which only makes the entry
    /// more conservative.
    pub fn store(&mut self, hash: u64, depth: u16, ply: u16, score: i32, bound: Bound, best_move: Move) {
        let index = self.index(hash);
        self.entries[index] = Entry {
            key: hash,
            score: score_to_tt(score, ply),
            best_move,
            depth: depth.min(u8::MAX as u16) as u8,
            bound,
        };
    }
}

impl std::fmt::Debug for TranspositionTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranspositionTable")
            .field("entries", &self.entries.len())
            .finish()
    }
}
