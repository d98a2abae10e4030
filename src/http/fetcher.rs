//! Page fetcher
//!
//! One GET, one decoded page. Retrying is left to the traverser.

use super::client::HttpClient;
use crate::decode::{JsonPageDecoder, Page, PageDecoder};
use crate::error::Result;
use async_trait::async_trait;

/// Source of decoded pages
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch and decode the page at `url`, making a single attempt
    async fn fetch_page(&self, url: &str) -> Result<Page>;
}

/// Page fetcher backed by [`HttpClient`]
#[derive(Debug, Clone)]
pub struct HttpPageFetcher<D = JsonPageDecoder> {
    client: HttpClient,
    decoder: D,
}

impl HttpPageFetcher<JsonPageDecoder> {
    /// Create a fetcher using the default JSON decoder
    pub fn new(client: HttpClient) -> Self {
        Self::with_decoder(client, JsonPageDecoder::new())
    }
}

impl<D: PageDecoder> HttpPageFetcher<D> {
    /// Create a fetcher with a custom decoder
    pub fn with_decoder(client: HttpClient, decoder: D) -> Self {
        Self { client, decoder }
    }

    /// Get the underlying HTTP client
    pub fn client(&self) -> &HttpClient {
        &self.client
    }
}

#[async_trait]
impl<D: PageDecoder> PageFetcher for HttpPageFetcher<D> {
    async fn fetch_page(&self, url: &str) -> Result<Page> {
        let body = self.client.get_text(url).await?;
        self.decoder.decode(&body)
    }
}
