//! Output filename derivation
//!
//! Names depend only on the endpoint and the files already present in the
//! target directory, never on the clock.

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Extension of every output file
pub const OUTPUT_EXTENSION: &str = "json";

/// Base name used when the endpoint path sanitizes to nothing
const ROOT_BASE_NAME: &str = "root";

/// Matches `<base>_<n>.<OUTPUT_EXTENSION>`
static SEQUENCED_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(.+)_(\d+)\.{}$",
        regex::escape(OUTPUT_EXTENSION)
    ))
    .unwrap()
});

/// How output files are named
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum NamingPolicy {
    /// `<base>.json`, overwritten on every run
    Deterministic,
    /// `<base>_<n>.json` with `n` one past the highest existing number
    #[default]
    Sequential,
}

impl NamingPolicy {
    /// Derive a filename for `endpoint` given the names already in the directory
    pub fn filename<I, S>(&self, endpoint: &str, existing: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match self {
            Self::Deterministic => deterministic_filename(endpoint),
            Self::Sequential => sequential_filename(endpoint, existing),
        }
    }
}

impl fmt::Display for NamingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deterministic => f.write_str("deterministic"),
            Self::Sequential => f.write_str("sequential"),
        }
    }
}

impl FromStr for NamingPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deterministic" => Ok(Self::Deterministic),
            "sequential" => Ok(Self::Sequential),
            other => Err(Error::config(format!("Unknown naming policy: {other}"))),
        }
    }
}

/// Turn an endpoint path into a filesystem-safe base name.
///
/// `/api/character` becomes `api_character`; `/`, `.` and `,` all map to `_`.
pub fn base_name(endpoint: &str) -> String {
    let trimmed = endpoint.trim_matches('/');
    if trimmed.is_empty() {
        return ROOT_BASE_NAME.to_string();
    }
    trimmed.replace(['/', '.', ','], "_")
}

/// `<base>.json`
pub fn deterministic_filename(endpoint: &str) -> String {
    format!("{}.{OUTPUT_EXTENSION}", base_name(endpoint))
}

/// `<base>_<n>.json`, numbered past every existing file for the same base
pub fn sequential_filename<I, S>(endpoint: &str, existing: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let base = base_name(endpoint);
    let next = next_sequence(&base, existing);
    format!("{base}_{next}.{OUTPUT_EXTENSION}")
}

/// Highest sequence number among `existing` files for `base`, plus one
pub fn next_sequence<I, S>(base: &str, existing: I) -> u64
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    existing
        .into_iter()
        .filter_map(|name| {
            let caps = SEQUENCED_REGEX.captures(name.as_ref())?;
            if &caps[1] != base {
                return None;
            }
            caps[2].parse::<u64>().ok()
        })
        .max()
        .map_or(1, |max| max.saturating_add(1))
}
