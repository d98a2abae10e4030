//! Decoder types and traits
//!
//! Defines the page model and the decoder abstraction.

use crate::error::Result;
use serde_json::Value;

/// Default path of the item list in a response body
pub const DEFAULT_ITEMS_PATH: &str = "results";

/// Default path of the next-page cursor in a response body
pub const DEFAULT_NEXT_PATH: &str = "info.next";

/// One decoded API response
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// Records on this page, in response order
    pub items: Vec<Value>,
    /// URL of the next page, `None` when the sequence is exhausted
    pub next_cursor: Option<String>,
}

impl Page {
    /// Create a page
    pub fn new(items: Vec<Value>, next_cursor: Option<String>) -> Self {
        Self { items, next_cursor }
    }

    /// Create the final page of a sequence
    pub fn last(items: Vec<Value>) -> Self {
        Self::new(items, None)
    }

    /// Whether another page follows this one
    pub fn has_next(&self) -> bool {
        self.next_cursor.is_some()
    }
}

/// Where to find the items and the cursor in a response body
#[derive(Debug, Clone)]
pub struct DecoderConfig {
    /// Dotted path to the item array
    pub items_path: String,
    /// Dotted path to the next-page URL
    pub next_path: String,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            items_path: DEFAULT_ITEMS_PATH.to_string(),
            next_path: DEFAULT_NEXT_PATH.to_string(),
        }
    }
}

impl DecoderConfig {
    /// Create a decoder config with custom paths
    pub fn new(items_path: impl Into<String>, next_path: impl Into<String>) -> Self {
        Self {
            items_path: items_path.into(),
            next_path: next_path.into(),
        }
    }
}

/// Trait for decoding response bodies into pages
pub trait PageDecoder: Send + Sync {
    /// Decode the response body into a page
    fn decode(&self, body: &str) -> Result<Page>;
}
