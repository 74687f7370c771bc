//! Engine errors.

use std::path::PathBuf;

/// Transposition table construction failures.
#[derive(Debug, thiserror::Error)]
pub enum TtError {
    /// The configured size cannot hold a single entry.
    #[error("transposition table of {size_mb} MB holds no entries")]
    ZeroCapacity {
        /// The requested size in megabytes.
        size_mb: usize,
    },

    /// The configured size is above the supported maximum.
    #[error("transposition table of {size_mb} MB exceeds the {max_mb} MB limit")]
    TooLarge { size_mb: usize, max_mb: usize },
}

/// Opening book loading failures.
#[derive(Debug, thiserror::Error)]
pub enum BookError {
    /// The book file could not be read.
    #[error("failed to read opening book {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A move line is not `<move> <times-played>`.
    #[error("line {line}: malformed book entry {text:?}")]
    MalformedEntry { line: usize, text: String },

    /// The same position key appears in two records.
    #[error("line {line}: duplicate book position {key:?}")]
    DuplicatePosition { line: usize, key: String },
}

/// Errors surfaced by the search coordinator.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// `start` was called while a search was still running.
    #[error("a search is already in progress")]
    SearchInProgress,

    /// The search thread panicked and took the searcher with it.
    #[error("search thread panicked")]
    SearcherLost,

    #[error(transparent)]
    Tt(#[from] TtError),

    #[error(transparent)]
    Book(#[from] BookError),
}
