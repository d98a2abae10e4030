//! Cursor-following traversal with per-page retry

use super::observer::{TracingObserver, TraversalObserver};
use super::types::{ResultSet, TraversalConfig, TraversalStats};
use crate::decode::Page;
use crate::error::{Error, Result};
use crate::http::PageFetcher;
use std::collections::HashSet;
use std::sync::Arc;
use url::Url;

/// Drives a [`PageFetcher`] across every page of a paginated endpoint
pub struct PaginationTraverser<F> {
    fetcher: F,
    config: TraversalConfig,
    observer: Arc<dyn TraversalObserver>,
}

impl<F: PageFetcher> PaginationTraverser<F> {
    /// Create a traverser with default config, logging through `tracing`
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            config: TraversalConfig::default(),
            observer: Arc::new(TracingObserver),
        }
    }

    /// Set traversal configuration
    #[must_use]
    pub fn with_config(mut self, config: TraversalConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the observer
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn TraversalObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Get the traversal configuration
    pub fn config(&self) -> &TraversalConfig {
        &self.config
    }

    /// Get the underlying fetcher
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Fetch every page starting at `start_url` and collect their items.
    ///
    /// Any terminal failure is returned as [`Error::Pagination`] naming the
    /// page that failed; partially collected items are dropped.
    pub async fn traverse(&self, start_url: &str) -> Result<ResultSet> {
        let start = Url::parse(start_url)?;
        let endpoint = start.path().to_string();

        let mut items = Vec::new();
        let mut stats = TraversalStats::default();
        let mut visited = HashSet::new();
        let mut current = Some(start);

        while let Some(url) = current.take() {
            if let Some(max_pages) = self.config.max_pages {
                if stats.pages_fetched >= max_pages {
                    return Err(Error::pagination(
                        url.as_str(),
                        Error::PageLimitExceeded { max_pages },
                    ));
                }
            }
            visited.insert(url.as_str().to_string());

            let Page { items: page_items, next_cursor } = self
                .fetch_with_retry(url.as_str(), &mut stats)
                .await
                .map_err(|e| Error::pagination(url.as_str(), e))?;

            stats.add_page();
            self.observer
                .on_page_fetched(url.as_str(), stats.pages_fetched, page_items.len());
            items.extend(page_items);

            if let Some(cursor) = next_cursor {
                let next = url.join(&cursor).map_err(|e| {
                    Error::pagination(
                        url.as_str(),
                        Error::decode(format!("Invalid next cursor '{cursor}': {e}")),
                    )
                })?;
                if !matches!(next.scheme(), "http" | "https") {
                    return Err(Error::pagination(
                        url.as_str(),
                        Error::decode(format!("Next cursor '{cursor}' is not an http(s) URL")),
                    ));
                }
                if visited.contains(next.as_str()) {
                    return Err(Error::pagination(
                        url.as_str(),
                        Error::CursorCycle {
                            url: next.to_string(),
                        },
                    ));
                }
                current = Some(next);
            }
        }

        self.observer
            .on_traversal_completed(&endpoint, &stats, items.len());

        Ok(ResultSet::new(endpoint, items).with_stats(stats))
    }

    /// Fetch one page, retrying transport failures and 5xx responses
    async fn fetch_with_retry(&self, url: &str, stats: &mut TraversalStats) -> Result<Page> {
        let policy = self.config.retry;
        let mut attempt = 0;

        loop {
            match self.fetcher.fetch_page(url).await {
                Ok(page) => return Ok(page),
                Err(e) if e.is_retryable() && attempt < policy.max_retries => {
                    attempt += 1;
                    stats.add_retry();
                    self.observer
                        .on_retry(url, attempt, policy.max_retries, &e, policy.retry_delay);
                    tokio::time::sleep(policy.retry_delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl<F> std::fmt::Debug for PaginationTraverser<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginationTraverser")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
