// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # pagesweep
//!
//! Pulls every page of a cursor-paginated JSON API and writes the combined
//! items to a file that never clobbers a previous run.
//!
//! ## Features
//!
//! - **Cursor traversal**: follows the next-page URL embedded in each response
//! - **Per-page retry**: transport failures and 5xx responses are retried with
//!   a fixed delay, without refetching earlier pages
//! - **Loop guards**: cursor cycles and runaway page counts abort the pull
//! - **Collision-free output**: sequentially numbered or deterministic names
//! - **All-or-nothing writes**: nothing is written unless every page succeeded
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pagesweep::{PullEngine, Result, Settings};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let settings = Settings::default().with_env();
//!     let engine = PullEngine::from_settings(&settings)?;
//!
//!     let report = engine
//!         .run("https://rickandmortyapi.com/api/character", "./pulls")
//!         .await?;
//!     println!("{} items -> {}", report.items_written, report.path.display());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! start URL
//!     │
//! ┌───┴──────────────────┐   next cursor   ┌──────────────┐
//! │ PaginationTraverser  │ ◄────────────── │ PageFetcher  │
//! │ retry, guards        │ ──────────────► │ GET + decode │
//! └───┬──────────────────┘       URL       └──────────────┘
//!     │ ResultSet
//! ┌───┴──────────────────┐
//! │ ResultWriter         │ → <base>_<n>.json
//! └──────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Layered run configuration
pub mod config;

/// HTTP client and page fetcher
pub mod http;

/// Response body to page decoding
pub mod decode;

/// Cursor traversal with retry
pub mod pagination;

/// Output naming and JSON writing
pub mod output;

/// Pull orchestration
pub mod engine;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::Settings;
pub use engine::{PullEngine, PullReport};
pub use error::{Error, Result};
pub use output::{NamingPolicy, ResultWriter};
pub use pagination::{PaginationTraverser, ResultSet, RetryPolicy, TraversalConfig};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
