//! Execution engine module
//!
//! Runs one pull: traverse every page, then write the result.
//!
//! # Overview
//!
//! The engine module provides:
//! - `PullEngine` - Composes the traverser and the writer
//! - `PullReport` - Summary of a completed pull
//!
//! The writer only runs after a fully successful traversal, so an output
//! file always holds a complete sweep.

mod types;

pub use types::PullReport;

use crate::config::Settings;
use crate::decode::JsonPageDecoder;
use crate::error::Result;
use crate::http::{HttpClient, HttpPageFetcher, PageFetcher};
use crate::output::ResultWriter;
use crate::pagination::PaginationTraverser;
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Pull engine for one endpoint
#[derive(Debug)]
pub struct PullEngine<F> {
    /// Page traversal
    traverser: PaginationTraverser<F>,
    /// Output writer
    writer: ResultWriter,
}

impl PullEngine<HttpPageFetcher> {
    /// Build an HTTP-backed engine from resolved settings
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let client = HttpClient::with_config(settings.http_config())?;
        let decoder = JsonPageDecoder::with_config(settings.decoder_config());
        let traverser = PaginationTraverser::new(HttpPageFetcher::with_decoder(client, decoder))
            .with_config(settings.traversal_config());

        Ok(Self::new(traverser, ResultWriter::new(settings.naming)))
    }
}

impl<F: PageFetcher> PullEngine<F> {
    /// Create a new pull engine
    pub fn new(traverser: PaginationTraverser<F>, writer: ResultWriter) -> Self {
        Self { traverser, writer }
    }

    /// Get the traverser
    pub fn traverser(&self) -> &PaginationTraverser<F> {
        &self.traverser
    }

    /// Get the writer
    pub fn writer(&self) -> &ResultWriter {
        &self.writer
    }

    /// Traverse from `start_url` and write the items into `output_dir`
    pub async fn run(&self, start_url: &str, output_dir: impl AsRef<Path>) -> Result<PullReport> {
        let start = Instant::now();
        info!("Starting pull for {start_url}");

        let result = self.traverser.traverse(start_url).await?;
        let path = self.writer.write(&result, output_dir)?;

        Ok(PullReport {
            path,
            endpoint: result.endpoint,
            items_written: result.items.len(),
            pages_fetched: result.stats.pages_fetched,
            retries: result.stats.retries,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }
}
