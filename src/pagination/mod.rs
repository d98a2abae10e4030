//! Pagination module
//!
//! Follows next-page cursors from a start URL until the API reports no
//! further page, retrying failed pages in place.
//!
//! # Overview
//!
//! Each page's URL is only known once the previous page has been decoded, so
//! traversal is strictly sequential. A failed page is retried on its own
//! (items already collected are kept); a terminal failure aborts the whole
//! traversal and no [`ResultSet`] is produced.

mod observer;
mod traverser;
mod types;

pub use observer::{NoopObserver, TracingObserver, TraversalObserver};
pub use traverser::PaginationTraverser;
pub use types::{ResultSet, RetryPolicy, TraversalConfig, TraversalStats, DEFAULT_MAX_PAGES};
