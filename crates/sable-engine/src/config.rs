//! Engine configuration.

use std::path::{Path, PathBuf};

use tracing::warn;

/// Default transposition table size in megabytes.
pub const DEFAULT_HASH_MB: usize = 64;

/// Largest transposition table size accepted, in megabytes.
pub const MAX_HASH_MB: usize = 65_536;

/// What to do with an iteration that was cancelled after at least one root
/// move improved alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PartialIterationPolicy {
    /// Clear the cancellation and search the same depth again to completion.
    #[default]
    Rerun,
    /// Adopt the best root move found before the cancellation.
    KeepBestSoFar,
}

/// Settings shared by the coordinator and the protocol layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub hash_mb: usize,
    pub own_book: bool,
    pub book_path: Option<PathBuf>,
    pub partial_policy: PartialIterationPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hash_mb: DEFAULT_HASH_MB,
            own_book: false,
            book_path: None,
            partial_policy: PartialIterationPolicy::Rerun,
        }
    }
}

impl EngineConfig {
    /// Defaults overridden by `SABLE_HASH_MB` and `SABLE_BOOK`.
    ///
    /// Setting `SABLE_BOOK` also turns the book on. An unparseable hash size
    /// is logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(value) = std::env::var("SABLE_HASH_MB") {
            match value.trim().parse::<usize>() {
                Ok(mb) => config.hash_mb = mb,
                Err(e) => warn!(value = %value, error = %e, "ignoring invalid SABLE_HASH_MB"),
            }
        }

        if let Some(path) = std::env::var_os("SABLE_BOOK").filter(|p| !p.is_empty()) {
            config.book_path = Some(PathBuf::from(path));
            config.own_book = true;
        }

        config
    }

    /// The book to consult before searching, if the book is turned on and
    /// a file is configured.
    pub fn enabled_book_path(&self) -> Option<&Path> {
        self.book_path.as_deref().filter(|_| self.own_book)
    }
}
