//! Traversal observers
//!
//! Hooks called by the traverser at well-defined points. Logging lives here
//! rather than in the traversal loop.

use super::types::TraversalStats;
use crate::error::Error;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Callbacks invoked during a traversal
pub trait TraversalObserver: Send + Sync {
    /// A page was fetched and decoded
    fn on_page_fetched(&self, _url: &str, _page_number: usize, _item_count: usize) {}

    /// A retryable failure occurred and another attempt follows after `delay`
    fn on_retry(
        &self,
        _url: &str,
        _attempt: u32,
        _max_retries: u32,
        _error: &Error,
        _delay: Duration,
    ) {
    }

    /// The last page was reached
    fn on_traversal_completed(
        &self,
        _endpoint: &str,
        _stats: &TraversalStats,
        _total_items: usize,
    ) {
    }
}

/// Observer that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl TraversalObserver for NoopObserver {}

/// Observer that emits `tracing` events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl TraversalObserver for TracingObserver {
    fn on_page_fetched(&self, url: &str, page_number: usize, item_count: usize) {
        debug!("Page {page_number}: fetched {item_count} items from {url}");
    }

    fn on_retry(&self, url: &str, attempt: u32, max_retries: u32, error: &Error, delay: Duration) {
        warn!("Request to {url} failed: {error}, retry {attempt}/{max_retries} in {delay:?}");
    }

    fn on_traversal_completed(&self, endpoint: &str, stats: &TraversalStats, total_items: usize) {
        info!(
            "Completed {endpoint}: {total_items} items in {} pages ({} retries)",
            stats.pages_fetched, stats.retries
        );
    }
}
