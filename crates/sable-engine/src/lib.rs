//! Search, evaluation and time management for sable.

pub mod book;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod eval;
pub mod search;
pub mod time;

pub use book::{BookMove, OpeningBook};
pub use config::{DEFAULT_HASH_MB, EngineConfig, MAX_HASH_MB, PartialIterationPolicy};
pub use coordinator::Coordinator;
pub use error::{BookError, EngineError, TtError};
pub use eval::evaluate;
pub use search::control::SearchControl;
pub use search::tt::{Bound, TranspositionTable};
pub use search::{
    IMMEDIATE_MATE_SCORE, INFINITY, MAX_DEPTH, MAX_MATE_DEPTH, MoveSource, SearchInfo, SearchResult,
    Searcher, is_mate_score, ply_to_mate,
};
pub use time::{GoParams, SearchLimits, choose_think_time};
