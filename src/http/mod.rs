//! HTTP client module
//!
//! Single-attempt GET requests and the page fetcher built on them.
//!
//! # Features
//!
//! - **Bounded timeouts**: every request carries a timeout, reported as a
//!   distinct error when it trips
//! - **Status classification**: non-2xx responses become errors carrying the
//!   status code and body
//! - **No retries**: recovery policy lives with the caller

mod client;
mod fetcher;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, MAX_ERROR_BODY_BYTES};
pub use fetcher::{HttpPageFetcher, PageFetcher};
