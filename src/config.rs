//! Run configuration
//!
//! Settings are layered: built-in defaults, then an optional YAML or JSON
//! file, then environment variables, then command-line flags. Environment
//! values arrive as raw strings and are parsed here; a missing or invalid
//! value keeps whatever the lower layer provided.

use crate::decode::{DecoderConfig, DEFAULT_ITEMS_PATH, DEFAULT_NEXT_PATH};
use crate::error::{Error, Result};
use crate::http::HttpClientConfig;
use crate::output::NamingPolicy;
use crate::pagination::{RetryPolicy, TraversalConfig, DEFAULT_MAX_PAGES};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

// ============================================================================
// Environment Variables
// ============================================================================

/// Start URL
pub const ENV_API_URL: &str = "API_URL";
/// Output directory
pub const ENV_OUTPUT_DIR: &str = "OUTPUT_DIR";
/// Retries per page
pub const ENV_MAX_RETRIES: &str = "MAX_RETRIES";
/// Pause between retries, in seconds
pub const ENV_RETRY_DELAY: &str = "RETRY_DELAY_SECONDS";
/// Request timeout, in seconds
pub const ENV_REQUEST_TIMEOUT: &str = "REQUEST_TIMEOUT_SECONDS";
/// `sequential` or `deterministic`
pub const ENV_NAMING_POLICY: &str = "NAMING_POLICY";
/// Dotted path of the item list
pub const ENV_ITEMS_PATH: &str = "ITEMS_PATH";
/// Dotted path of the next-page cursor
pub const ENV_NEXT_PATH: &str = "NEXT_PATH";
/// Page ceiling, 0 for unlimited
pub const ENV_MAX_PAGES: &str = "MAX_PAGES";

// ============================================================================
// Settings
// ============================================================================

/// Fully resolved settings for one pull
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Start URL of the traversal
    pub url: Option<String>,
    /// Directory the output file is written to
    pub output_dir: PathBuf,
    /// Retries per page after the first attempt
    pub max_retries: u32,
    /// Fixed pause between retries
    pub retry_delay_seconds: u64,
    /// Per-request timeout
    pub request_timeout_seconds: u64,
    /// Output naming policy
    pub naming: NamingPolicy,
    /// Dotted path of the item list in each response
    pub items_path: String,
    /// Dotted path of the next-page cursor in each response
    pub next_path: String,
    /// Maximum pages per traversal, 0 for unlimited
    pub max_pages: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            url: None,
            output_dir: PathBuf::from("."),
            max_retries: 3,
            retry_delay_seconds: 10,
            request_timeout_seconds: 2,
            naming: NamingPolicy::default(),
            items_path: DEFAULT_ITEMS_PATH.to_string(),
            next_path: DEFAULT_NEXT_PATH.to_string(),
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

impl Settings {
    /// Load settings from a YAML or JSON file, chosen by extension
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read config file {}: {e}", path.display()))
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Ok(serde_yaml::from_str(&content)?),
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| Error::config(format!("Invalid config JSON: {e}"))),
            _ => Err(Error::config(format!(
                "Unsupported config file type: {} (expected .yaml, .yml or .json)",
                path.display()
            ))),
        }
    }

    /// Overlay values from the process environment
    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_env_lookup(|key| std::env::var(key).ok())
    }

    /// Overlay values from an arbitrary key lookup
    #[must_use]
    pub fn with_env_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(url) = text(ENV_API_URL) {
            self.url = Some(url);
        }
        if let Some(dir) = text(ENV_OUTPUT_DIR) {
            self.output_dir = PathBuf::from(dir);
        }
        if let Some(path) = text(ENV_ITEMS_PATH) {
            self.items_path = path;
        }
        if let Some(path) = text(ENV_NEXT_PATH) {
            self.next_path = path;
        }

        self.max_retries = parse_or(ENV_MAX_RETRIES, text(ENV_MAX_RETRIES), self.max_retries);
        self.retry_delay_seconds = parse_or(
            ENV_RETRY_DELAY,
            text(ENV_RETRY_DELAY),
            self.retry_delay_seconds,
        );
        self.request_timeout_seconds = parse_or(
            ENV_REQUEST_TIMEOUT,
            text(ENV_REQUEST_TIMEOUT),
            self.request_timeout_seconds,
        );
        self.naming = parse_or(ENV_NAMING_POLICY, text(ENV_NAMING_POLICY), self.naming);
        self.max_pages = parse_or(ENV_MAX_PAGES, text(ENV_MAX_PAGES), self.max_pages);

        self
    }

    /// Check values that would make a run meaningless
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout_seconds == 0 {
            return Err(Error::config("request timeout must be at least 1 second"));
        }
        if self.items_path.trim().is_empty() || self.next_path.trim().is_empty() {
            return Err(Error::config("items and next paths must not be empty"));
        }
        Ok(())
    }

    /// Start URL, or an error naming how to supply it
    pub fn require_url(&self) -> Result<&str> {
        self.url
            .as_deref()
            .ok_or_else(|| Error::config(format!("No API URL given (use --url or {ENV_API_URL})")))
    }

    /// Retry policy for the traverser
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, Duration::from_secs(self.retry_delay_seconds))
    }

    /// Traversal configuration
    pub fn traversal_config(&self) -> TraversalConfig {
        TraversalConfig::new()
            .with_retry(self.retry_policy())
            .with_max_pages((self.max_pages > 0).then_some(self.max_pages))
    }

    /// HTTP client configuration
    pub fn http_config(&self) -> HttpClientConfig {
        HttpClientConfig::builder()
            .timeout(Duration::from_secs(self.request_timeout_seconds))
            .build()
    }

    /// Page decoder configuration
    pub fn decoder_config(&self) -> DecoderConfig {
        DecoderConfig::new(&self.items_path, &self.next_path)
    }
}

/// Parse a raw environment value, keeping `fallback` when it is missing or invalid
fn parse_or<T>(key: &str, raw: Option<String>, fallback: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(raw) = raw else {
        return fallback;
    };
    match raw.parse() {
        Ok(value) => value,
        Err(e) => {
            warn!("Ignoring invalid {key}={raw:?} ({e}), using {fallback}");
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert!(settings.url.is_none());
        assert_eq!(settings.output_dir, PathBuf::from("."));
        assert_eq!(settings.max_retries, 3);
        assert_eq!(settings.retry_delay_seconds, 10);
        assert_eq!(settings.request_timeout_seconds, 2);
        assert_eq!(settings.naming, NamingPolicy::Sequential);
        assert_eq!(settings.items_path, "results");
        assert_eq!(settings.next_path, "info.next");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let settings = Settings::default().with_env_lookup(lookup(&[
            (ENV_API_URL, "https://rickandmortyapi.com/api/character"),
            (ENV_OUTPUT_DIR, "/tmp/out"),
            (ENV_MAX_RETRIES, "5"),
            (ENV_RETRY_DELAY, " 1 "),
            (ENV_REQUEST_TIMEOUT, "30"),
            (ENV_NAMING_POLICY, "deterministic"),
            (ENV_MAX_PAGES, "0"),
        ]));

        assert_eq!(
            settings.require_url().unwrap(),
            "https://rickandmortyapi.com/api/character"
        );
        assert_eq!(settings.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(settings.max_retries, 5);
        assert_eq!(settings.retry_delay_seconds, 1);
        assert_eq!(settings.request_timeout_seconds, 30);
        assert_eq!(settings.naming, NamingPolicy::Deterministic);
        assert!(settings.traversal_config().max_pages.is_none());
    }

    #[test]
    fn test_env_invalid_values_fall_back() {
        let settings = Settings::default().with_env_lookup(lookup(&[
            (ENV_MAX_RETRIES, "-1"),
            (ENV_RETRY_DELAY, "ten"),
            (ENV_REQUEST_TIMEOUT, "2.5"),
            (ENV_NAMING_POLICY, "random"),
            (ENV_API_URL, "   "),
        ]));

        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_env_keeps_file_values_when_missing() {
        let base = Settings {
            max_retries: 7,
            ..Settings::default()
        };
        let settings = base.clone().with_env_lookup(lookup(&[]));
        assert_eq!(settings, base);
    }

    #[test]
    fn test_derived_configs() {
        let settings = Settings {
            max_retries: 2,
            retry_delay_seconds: 4,
            request_timeout_seconds: 9,
            max_pages: 50,
            ..Settings::default()
        };

        let policy = settings.retry_policy();
        assert_eq!(policy.max_retries, 2);
        assert_eq!(policy.retry_delay, Duration::from_secs(4));
        assert_eq!(settings.traversal_config().max_pages, Some(50));
        assert_eq!(settings.http_config().timeout, Duration::from_secs(9));
        assert_eq!(settings.decoder_config().next_path, "info.next");
    }

    #[test]
    fn test_require_url_missing() {
        let err = Settings::default().require_url().unwrap_err();
        assert!(err.to_string().contains(ENV_API_URL));
    }

    #[test]
    fn test_validate_zero_timeout() {
        let settings = Settings {
            request_timeout_seconds: 0,
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(Error::Config { .. })));
    }

    #[test]
    fn test_from_yaml_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pull.yaml");
        fs::write(
            &path,
            "url: https://api.example.com/v1/items\nmax_retries: 1\nnaming: deterministic\nitems_path: data\n",
        )
        .unwrap();

        let settings = Settings::from_file(&path).unwrap();
        assert_eq!(
            settings.url.as_deref(),
            Some("https://api.example.com/v1/items")
        );
        assert_eq!(settings.max_retries, 1);
        assert_eq!(settings.naming, NamingPolicy::Deterministic);
        assert_eq!(settings.items_path, "data");
        assert_eq!(settings.retry_delay_seconds, 10);
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pull.json");
        fs::write(&path, r#"{"output_dir": "pulls", "max_pages": 3}"#).unwrap();

        let settings = Settings::from_file(&path).unwrap();
        assert_eq!(settings.output_dir, PathBuf::from("pulls"));
        assert_eq!(settings.max_pages, 3);
    }

    #[test]
    fn test_from_file_unsupported_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pull.toml");
        fs::write(&path, "url = 'x'").unwrap();

        assert!(matches!(
            Settings::from_file(&path),
            Err(Error::Config { .. })
        ));
    }
}
