//! Iterative deepening search.

pub mod control;
pub mod negamax;
pub mod ordering;
pub mod tt;

use std::time::Duration;

use rand::seq::SliceRandom;
use sable_core::{Move, Position, generate_legal_moves};
use tracing::{debug, info};

use crate::book::OpeningBook;
use crate::config::{EngineConfig, PartialIterationPolicy};
use crate::error::EngineError;
use crate::time::SearchLimits;
use control::SearchControl;
use negamax::{RootBest, SearchContext, negamax};
use tt::TranspositionTable;

/// Bound wider than any reachable score.
pub const INFINITY: i32 = 9_999_999;

/// Score of the side to move delivering mate right now.
pub const IMMEDIATE_MATE_SCORE: i32 = 100_000;

/// Longest mate, in plies, that [`is_mate_score`] recognises.
pub const MAX_MATE_DEPTH: i32 = 1000;

/// Deepest iteration.
pub const MAX_DEPTH: u16 = 256;

/// Whether `score` encodes a forced mate for either side.
pub fn is_mate_score(score: i32) -> bool {
    score != i32::MIN && score.abs() > IMMEDIATE_MATE_SCORE - MAX_MATE_DEPTH
}

/// Plies until mate for a mate score.
pub fn ply_to_mate(score: i32) -> i32 {
    IMMEDIATE_MATE_SCORE - score.abs()
}

/// Where the chosen move came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSource {
    Book,
    Search,
    /// Nothing was searched to completion; a random legal move was picked.
    Random,
}

/// Outcome of a search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best move; [`Move::NULL`] when the root has no legal move.
    pub best_move: Move,
    /// Score of `best_move` from the side to move's point of view.
    pub score: i32,
    /// Depth of the adopted iteration, 0 if none was adopted.
    pub depth: u16,
    pub nodes: u64,
    pub source: MoveSource,
}

/// Progress report after each completed or adopted iteration.
#[derive(Debug, Clone)]
pub struct SearchInfo {
    pub depth: u16,
    pub score: i32,
    pub nodes: u64,
    pub elapsed: Duration,
    pub best_move: Move,
}

impl SearchInfo {
    /// Signed full moves to mate, positive when the side to move mates.
    pub fn mate_in(&self) -> Option<i32> {
        is_mate_score(self.score).then(|| {
            let moves = (ply_to_mate(self.score) + 1) / 2;
            if self.score > 0 { moves } else { -moves }
        })
    }
}

/// Owns the transposition table and book across searches.
pub struct Searcher {
    tt: TranspositionTable,
    book: Option<OpeningBook>,
    policy: PartialIterationPolicy,
}

impl Searcher {
    /// Build a searcher from `config`, loading the book if one is enabled.
    pub fn new(config: &EngineConfig) -> Result<Self, EngineError> {
        let tt = TranspositionTable::new(config.hash_mb)?;
        info!(hash_mb = config.hash_mb, entries = tt.len(), "transposition table ready");

        let book = config.enabled_book_path().map(OpeningBook::load).transpose()?;

        Ok(Self {
            tt,
            book,
            policy: config.partial_policy,
        })
    }

    /// A searcher with a fresh table of `hash_mb` megabytes, no book and
    /// the default partial-iteration policy.
    pub fn with_hash(hash_mb: usize) -> Result<Self, EngineError> {
        Ok(Self {
            tt: TranspositionTable::new(hash_mb)?,
            book: None,
            policy: PartialIterationPolicy::default(),
        })
    }

    /// Reset the transposition table.
    pub fn clear_for_new_game(&mut self) {
        self.tt.clear();
    }

    /// Replace the table with a new one of `hash_mb` megabytes.
    pub fn resize(&mut self, hash_mb: usize) -> Result<(), EngineError> {
        self.tt = TranspositionTable::new(hash_mb)?;
        Ok(())
    }

    pub fn set_book(&mut self, book: Option<OpeningBook>) {
        self.book = book;
    }

    pub fn set_policy(&mut self, policy: PartialIterationPolicy) {
        self.policy = policy;
    }

    pub fn tt(&self) -> &TranspositionTable {
        &self.tt
    }

    /// Choose a move for `position`: book first, then iterative deepening,
    /// then a random legal move if nothing was adopted.
    pub fn think<F>(
        &mut self,
        position: &Position,
        limits: &SearchLimits,
        control: &SearchControl,
        on_info: F,
    ) -> SearchResult
    where
        F: FnMut(&SearchInfo),
    {
        if let Some(mv) = self.book.as_ref().and_then(|book| book.try_get_move(position.board())) {
            info!(mv = %mv, "book move");
            return SearchResult {
                best_move: mv,
                score: 0,
                depth: 0,
                nodes: 0,
                source: MoveSource::Book,
            };
        }

        let mut position = position.clone();
        let max_depth = limits.depth.unwrap_or(MAX_DEPTH);
        let mut result = self.search(&mut position, max_depth, control, on_info);

        if result.best_move.is_null() {
            let moves = generate_legal_moves(position.board());
            if let Some(&mv) = moves.as_slice().choose(&mut rand::thread_rng()) {
                debug!(mv = %mv, "no iteration adopted, playing a random move");
                result.best_move = mv;
                result.source = MoveSource::Random;
            }
        }
        result
    }

    /// Iterative deepening from depth 1 to `max_depth` (clamped to
    /// `1..=MAX_DEPTH`).
    ///
    /// Each completed iteration replaces the previous best move and score.
    /// A cancelled iteration is handled according to the
    /// [`PartialIterationPolicy`]. The search ends early once a mate is
    /// proven within the searched depth.
    pub fn search<F>(
        &mut self,
        position: &mut Position,
        max_depth: u16,
        control: &SearchControl,
        mut on_info: F,
    ) -> SearchResult
    where
        F: FnMut(&SearchInfo),
    {
        let max_depth = max_depth.clamp(1, MAX_DEPTH);
        let policy = self.policy;
        let mut ctx = SearchContext::new(&mut self.tt, control);

        let mut best_move = Move::NULL;
        let mut best_score = 0;
        let mut completed_depth = 0;

        for depth in 1..=max_depth {
            ctx.root = RootBest::new();
            let score = negamax(&mut ctx, position, depth, 0, -INFINITY, INFINITY);

            if control.is_cancelled() {
                if ctx.root.searched_one {
                    if policy == PartialIterationPolicy::Rerun {
                        debug!(depth, "iteration interrupted, searching it again to completion");
                        control.resume();
                        ctx.root = RootBest::new();
                        negamax(&mut ctx, position, depth, 0, -INFINITY, INFINITY);
                    }
                    if !ctx.root.best_move.is_null() {
                        best_move = ctx.root.best_move;
                        best_score = ctx.root.score;
                        completed_depth = depth;
                        debug!(
                            depth,
                            score = best_score,
                            nodes = ctx.nodes,
                            mv = %best_move,
                            ?policy,
                            "interrupted iteration adopted"
                        );
                        on_info(&SearchInfo {
                            depth,
                            score: best_score,
                            nodes: ctx.nodes,
                            elapsed: control.elapsed(),
                            best_move,
                        });
                    }
                }
                break;
            }

            completed_depth = depth;
            if ctx.root.best_move.is_null() {
                // Checkmate or stalemate at the root.
                best_move = Move::NULL;
                best_score = score;
            } else {
                best_move = ctx.root.best_move;
                best_score = ctx.root.score;
            }

            debug!(depth, score = best_score, nodes = ctx.nodes, mv = %best_move, "iteration complete");
            on_info(&SearchInfo {
                depth,
                score: best_score,
                nodes: ctx.nodes,
                elapsed: control.elapsed(),
                best_move,
            });

            if best_move.is_null() || (is_mate_score(best_score) && ply_to_mate(best_score) <= depth as i32) {
                break;
            }
        }

        SearchResult {
            best_move,
            score: best_score,
            depth: completed_depth,
            nodes: ctx.nodes,
            source: MoveSource::Search,
        }
    }
}

impl std::fmt::Debug for Searcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Searcher")
            .field("tt", &self.tt)
            .field("book", &self.book.is_some())
            .field("policy", &self.policy)
            .finish()
    }
}
