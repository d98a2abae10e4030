//! Pagination types
//!
//! Retry and limit configuration, and the accumulated result of a traversal.

use serde_json::Value;
use std::time::Duration;

/// Default ceiling on the number of pages one traversal may fetch
pub const DEFAULT_MAX_PAGES: usize = 10_000;

/// Fixed-delay retry policy applied per page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries allowed after the first attempt
    pub max_retries: u32,
    /// Pause between attempts
    pub retry_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            retry_delay: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// Create a retry policy
    pub fn new(max_retries: u32, retry_delay: Duration) -> Self {
        Self {
            max_retries,
            retry_delay,
        }
    }

    /// A policy that never retries
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Total attempts allowed for one page
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

/// Configuration for a traversal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalConfig {
    /// Retry policy for each page
    pub retry: RetryPolicy,
    /// Maximum pages to fetch (`None` = unlimited)
    pub max_pages: Option<usize>,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            max_pages: Some(DEFAULT_MAX_PAGES),
        }
    }
}

impl TraversalConfig {
    /// Create a new traversal config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the retry policy
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Set the page ceiling
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: Option<usize>) -> Self {
        self.max_pages = max_pages;
        self
    }
}

/// Counters collected during a traversal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalStats {
    /// Pages fetched successfully
    pub pages_fetched: usize,
    /// Retry attempts performed across all pages
    pub retries: u32,
}

impl TraversalStats {
    /// Record a fetched page
    pub fn add_page(&mut self) {
        self.pages_fetched += 1;
    }

    /// Record a retry
    pub fn add_retry(&mut self) {
        self.retries += 1;
    }
}

/// All items of one successful traversal, in page order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    /// Path portion of the start URL
    pub endpoint: String,
    /// Items from every page
    pub items: Vec<Value>,
    /// Traversal counters
    pub stats: TraversalStats,
}

impl ResultSet {
    /// Create a result set
    pub fn new(endpoint: impl Into<String>, items: Vec<Value>) -> Self {
        Self {
            endpoint: endpoint.into(),
            items,
            stats: TraversalStats::default(),
        }
    }

    /// Attach traversal counters
    #[must_use]
    pub fn with_stats(mut self, stats: TraversalStats) -> Self {
        self.stats = stats;
        self
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no items were collected
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
