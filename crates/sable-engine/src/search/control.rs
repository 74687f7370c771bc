//! Cancellation flag shared between a running search and whoever may stop it.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Cooperative cancellation for one search.
///
/// The search polls [`SearchControl::is_cancelled`] at the top of every
/// node. Any thread holding a clone of the flag may raise it.
#[derive(Debug)]
pub struct SearchControl {
    stopped: Arc<AtomicBool>,
    start: Instant,
    node_limit: Option<u64>,
}

impl SearchControl {
    /// Wrap `stopped`; the clock starts now.
    pub fn new(stopped: Arc<AtomicBool>) -> Self {
        Self {
            stopped,
            start: Instant::now(),
            node_limit: None,
        }
    }

    /// Control that only ends when [`SearchControl::cancel`] is called.
    pub fn unbounded() -> Self {
        Self::new(Arc::new(AtomicBool::new(false)))
    }

    /// Raise the flag once the search has visited `nodes` nodes.
    ///
    /// The limit fires once. An interrupted iteration that is searched again
    /// to completion runs past it.
    pub fn with_node_limit(mut self, nodes: u64) -> Self {
        self.node_limit = Some(nodes);
        self
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    pub fn cancel(&self) {
        self.stopped.store(true, Ordering::Relaxed);
    }

    /// Lower the flag again so an interrupted iteration can be searched to
    /// completion.
    pub(crate) fn resume(&self) {
        self.stopped.store(false, Ordering::Relaxed);
    }

    /// Called with the running node count after each visited node.
    #[inline]
    pub(crate) fn node_visited(&self, nodes: u64) {
        if self.node_limit == Some(nodes) {
            self.cancel();
        }
    }

    /// Time since the control was created.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
