//! Decoder implementations

use super::types::{DecoderConfig, Page, PageDecoder};
use crate::error::{Error, Result};
use serde_json::Value;

// ============================================================================
// JSON Page Decoder
// ============================================================================

/// JSON decoder that extracts items and the next cursor by path
#[derive(Debug, Clone, Default)]
pub struct JsonPageDecoder {
    config: DecoderConfig,
}

impl JsonPageDecoder {
    /// Create a decoder using the default paths
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder with a custom config
    pub fn with_config(config: DecoderConfig) -> Self {
        Self { config }
    }

    /// Get the decoder config
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode an already-parsed body
    pub fn decode_value(&self, value: Value) -> Result<Page> {
        let next_cursor = self.extract_cursor(&value)?;
        let items = self.extract_items(value)?;
        Ok(Page { items, next_cursor })
    }

    fn extract_items(&self, mut value: Value) -> Result<Vec<Value>> {
        let path = &self.config.items_path;
        let pointer = to_pointer(path);
        match value.pointer_mut(&pointer).map(Value::take) {
            Some(Value::Array(items)) => Ok(items),
            Some(other) => Err(Error::decode(format!(
                "Field '{path}' is a {}, expected an array",
                kind_of(&other)
            ))),
            None => Err(Error::decode(format!("Missing item list field '{path}'"))),
        }
    }

    /// The parent of the cursor must exist as an object. The cursor itself
    /// may be absent, null or empty, all of which end the sequence.
    fn extract_cursor(&self, value: &Value) -> Result<Option<String>> {
        let path = self.config.next_path.as_str();
        let path = path.strip_prefix("$.").unwrap_or(path);
        let (parent_path, leaf) = match path.rsplit_once('.') {
            Some((parent, leaf)) => (Some(parent), leaf),
            None => (None, path),
        };

        let parent = match parent_path {
            Some(parent_path) => value.pointer(&to_pointer(parent_path)).ok_or_else(|| {
                Error::decode(format!("Missing pagination field '{parent_path}'"))
            })?,
            None => value,
        };

        let Value::Object(map) = parent else {
            return Err(Error::decode(format!(
                "Pagination field for '{path}' is a {}, expected an object",
                kind_of(parent)
            )));
        };

        match map.get(leaf) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) if s.is_empty() => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(Error::decode(format!(
                "Cursor field '{path}' is a {}, expected a string",
                kind_of(other)
            ))),
        }
    }
}

impl PageDecoder for JsonPageDecoder {
    fn decode(&self, body: &str) -> Result<Page> {
        let value: Value = serde_json::from_str(body).map_err(|e| Error::Decode {
            message: format!("Failed to parse JSON: {e}"),
        })?;
        self.decode_value(value)
    }
}

/// Convert `a.b.c` (optionally `$.`-prefixed) into a JSON pointer `/a/b/c`
fn to_pointer(path: &str) -> String {
    let path = path.strip_prefix("$.").unwrap_or(path);
    path.split('.')
        .filter(|part| !part.is_empty())
        .map(|part| format!("/{}", part.replace('~', "~0").replace('/', "~1")))
        .collect()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
