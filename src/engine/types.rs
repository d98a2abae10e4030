//! Engine types

use serde::Serialize;
use std::path::PathBuf;

/// Summary of a completed pull
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullReport {
    /// File the items were written to
    pub path: PathBuf,
    /// Endpoint path the items came from
    pub endpoint: String,
    /// Number of items written
    pub items_written: usize,
    /// Pages fetched
    pub pages_fetched: usize,
    /// Retries performed
    pub retries: u32,
    /// Duration in milliseconds
    pub duration_ms: u64,
}
