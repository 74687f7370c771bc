//! Runs one search at a time on a background thread.
//!
//! The [`Searcher`] moves into the worker thread for the duration of a
//! search and is handed back when the worker finishes. Settings changed in
//! the meantime are queued and applied on return.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};
use std::thread::{self, JoinHandle};

use sable_core::Position;
use tracing::{debug, info, warn};

use crate::book::OpeningBook;
use crate::config::{EngineConfig, PartialIterationPolicy};
use crate::error::EngineError;
use crate::search::control::SearchControl;
use crate::search::{SearchInfo, SearchResult, Searcher};
use crate::time::SearchLimits;

/// Serialises searches and owns the cancellation flag of the running one.
pub struct Coordinator {
    searcher: Option<Searcher>,
    worker: Option<JoinHandle<Searcher>>,
    /// Raised by the worker right before it reports its result.
    finished: Arc<AtomicBool>,
    stop_flag: Arc<AtomicBool>,
    pending_clear: bool,
    pending_resize: Option<usize>,
    pending_book: Option<Option<OpeningBook>>,
}

impl Coordinator {
    pub fn new(config: &EngineConfig) -> Result<Self, EngineError> {
        Ok(Self::with_searcher(Searcher::new(config)?))
    }

    pub fn with_searcher(searcher: Searcher) -> Self {
        Self {
            searcher: Some(searcher),
            worker: None,
            finished: Arc::new(AtomicBool::new(true)),
            stop_flag: Arc::new(AtomicBool::new(false)),
            pending_clear: false,
            pending_resize: None,
            pending_book: None,
        }
    }

    /// Start searching `position` on a worker thread.
    ///
    /// `on_info` is called after every completed iteration and
    /// `on_complete` exactly once with the chosen move, both from the worker
    /// thread. When `limits` carries a think time a timer thread raises the
    /// stop flag once it elapses.
    pub fn start<I, C>(
        &mut self,
        position: &Position,
        limits: SearchLimits,
        mut on_info: I,
        on_complete: C,
    ) -> Result<(), EngineError>
    where
        I: FnMut(&SearchInfo) + Send + 'static,
        C: FnOnce(SearchResult) + Send + 'static,
    {
        if self.is_thinking() {
            return Err(EngineError::SearchInProgress);
        }
        self.reclaim()?;
        let mut searcher = self.searcher.take().ok_or(EngineError::SearcherLost)?;

        self.stop_flag = Arc::new(AtomicBool::new(false));
        self.finished = Arc::new(AtomicBool::new(false));
        let mut control = SearchControl::new(Arc::clone(&self.stop_flag));
        if let Some(nodes) = limits.nodes {
            control = control.with_node_limit(nodes);
        }

        // Dropping `done_tx` wakes the timer early.
        let (done_tx, done_rx) = mpsc::channel::<()>();
        if let Some(think_time) = limits.think_time {
            let flag = Arc::clone(&self.stop_flag);
            thread::spawn(move || {
                if let Err(mpsc::RecvTimeoutError::Timeout) = done_rx.recv_timeout(think_time) {
                    debug!(?think_time, "think time elapsed, stopping search");
                    flag.store(true, Ordering::Relaxed);
                }
            });
        }

        info!(
            fen = %position.board(),
            think_time = ?limits.think_time,
            depth = ?limits.depth,
            nodes = ?limits.nodes,
            "search started"
        );

        let position = position.clone();
        let finished = Arc::clone(&self.finished);
        self.worker = Some(thread::spawn(move || {
            let result = searcher.think(&position, &limits, &control, |info| on_info(info));
            drop(done_tx);
            info!(
                mv = %result.best_move,
                score = result.score,
                depth = result.depth,
                nodes = result.nodes,
                source = ?result.source,
                elapsed_ms = control.elapsed().as_millis() as u64,
                "search finished"
            );
            finished.store(true, Ordering::Release);
            on_complete(result);
            searcher
        }));

        Ok(())
    }

    /// Ask the running search to stop. It still reports a move.
    pub fn stop(&self) {
        self.stop_flag.store(true, Ordering::Relaxed);
    }

    /// Whether a search has started and not yet reported its result.
    pub fn is_thinking(&self) -> bool {
        self.worker.is_some() && !self.finished.load(Ordering::Acquire)
    }

    /// Block until the running search, if any, has finished and returned
    /// the searcher.
    pub fn wait(&mut self) -> Result<(), EngineError> {
        self.reclaim()
    }

    /// Reset the transposition table, now or once the running search ends.
    pub fn clear_for_new_game(&mut self) {
        match self.searcher.as_mut() {
            Some(searcher) => searcher.clear_for_new_game(),
            None => self.pending_clear = true,
        }
    }

    /// Rebuild the transposition table with `hash_mb` megabytes.
    ///
    /// While a search runs the resize is queued; a failure then is logged
    /// when the searcher comes back.
    pub fn resize(&mut self, hash_mb: usize) -> Result<(), EngineError> {
        match self.searcher.as_mut() {
            Some(searcher) => {
                searcher.resize(hash_mb)?;
                info!(hash_mb, "transposition table resized");
            }
            None => self.pending_resize = Some(hash_mb),
        }
        Ok(())
    }

    /// Replace the opening book, or turn it off with `None`.
    pub fn set_book(&mut self, book: Option<OpeningBook>) {
        match self.searcher.as_mut() {
            Some(searcher) => searcher.set_book(book),
            None => self.pending_book = Some(book),
        }
    }

    /// Only takes effect for searches started while idle.
    pub fn set_policy(&mut self, policy: PartialIterationPolicy) {
        if let Some(searcher) = self.searcher.as_mut() {
            searcher.set_policy(policy);
        } else {
            warn!(?policy, "cannot change policy while searching");
        }
    }

    /// Join a finished or running worker and apply queued settings.
    fn reclaim(&mut self) -> Result<(), EngineError> {
        let Some(handle) = self.worker.take() else {
            return Ok(());
        };
        let mut searcher = handle.join().map_err(|_| EngineError::SearcherLost)?;

        if let Some(mb) = self.pending_resize.take() {
            // A fresh table is already empty.
            self.pending_clear = false;
            if let Err(e) = searcher.resize(mb) {
                warn!(error = %e, hash_mb = mb, "queued resize failed, keeping the old table");
            }
        }
        if std::mem::take(&mut self.pending_clear) {
            searcher.clear_for_new_game();
        }
        if let Some(book) = self.pending_book.take() {
            searcher.set_book(book);
        }

        self.searcher = Some(searcher);
        Ok(())
    }
}

impl Drop for Coordinator {
    fn drop(&mut self) {
        self.stop();
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }
}

impl std::fmt::Debug for Coordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coordinator")
            .field("thinking", &self.is_thinking())
            .field("searcher", &self.searcher)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn coordinator() -> Coordinator {
        Coordinator::with_searcher(Searcher::with_hash(1).unwrap())
    }

    #[test]
    fn idle_coordinator_is_not_thinking() {
        let mut coord = coordinator();
        assert!(!coord.is_thinking());
        coord.wait().unwrap();
        coord.clear_for_new_game();
        assert!(!coord.pending_clear);
    }

    #[test]
    fn settings_are_queued_while_searching() {
        let mut coord = coordinator();
        coord
            .start(&Position::default(), SearchLimits::infinite(), |_| {}, |_| {})
            .unwrap();
        coord.clear_for_new_game();
        coord.resize(2).unwrap();
        assert!(coord.pending_clear);
        assert_eq!(coord.pending_resize, Some(2));

        coord.stop();
        coord.wait().unwrap();
        assert!(!coord.pending_clear);
        assert_eq!(coord.pending_resize, None);
        assert_eq!(coord.searcher.as_ref().unwrap().tt().len(), 2 * 1024 * 1024 / 16);
    }

    #[test]
    fn timer_stops_search() {
        let mut coord = coordinator();
        let limits = SearchLimits::fixed_time(Duration::from_millis(50));
        coord.start(&Position::default(), limits, |_| {}, |_| {}).unwrap();
        coord.wait().unwrap();
        assert!(!coord.is_thinking());
    }
}
