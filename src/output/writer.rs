//! JSON result writer
//!
//! Serializes the items into a temporary file inside the target directory,
//! then persists it under the derived name. The temporary file is removed on
//! every failure path.

use super::naming::NamingPolicy;
use crate::error::{Error, Result};
use crate::pagination::ResultSet;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Attempts at claiming a sequential name before giving up
const MAX_CLAIM_ATTEMPTS: usize = 16;

/// Serialize items as a JSON array with 4-space indentation
pub fn to_pretty_json(items: &[Value]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    items.serialize(&mut ser)?;
    Ok(buf)
}

/// Writes result sets to named JSON files
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultWriter {
    policy: NamingPolicy,
}

impl ResultWriter {
    /// Create a writer with the given naming policy
    pub fn new(policy: NamingPolicy) -> Self {
        Self { policy }
    }

    /// Get the naming policy
    pub fn policy(&self) -> NamingPolicy {
        self.policy
    }

    /// Path the next write for `endpoint` would use
    pub fn plan(&self, endpoint: &str, directory: impl AsRef<Path>) -> Result<PathBuf> {
        let directory = directory.as_ref();
        let existing = list_file_names(directory)?;
        Ok(directory.join(self.policy.filename(endpoint, &existing)))
    }

    /// Write `result_set` into `directory`, returning the path written
    pub fn write(&self, result_set: &ResultSet, directory: impl AsRef<Path>) -> Result<PathBuf> {
        let directory = directory.as_ref();
        let content = to_pretty_json(&result_set.items)?;

        fs::create_dir_all(directory)?;
        let temp = stage(directory, &content)?;

        let path = match self.policy {
            NamingPolicy::Deterministic => {
                let path = self.plan(&result_set.endpoint, directory)?;
                temp.persist(&path).map_err(|e| e.error)?;
                path
            }
            NamingPolicy::Sequential => claim_sequential(temp, &result_set.endpoint, directory)?,
        };

        info!(
            "Wrote {} items to {}",
            result_set.items.len(),
            path.display()
        );
        Ok(path)
    }
}

/// Write `content` to a synced temporary file in `directory`
fn stage(directory: &Path, content: &[u8]) -> Result<NamedTempFile> {
    let mut temp = tempfile::Builder::new()
        .prefix(".pagesweep-")
        .suffix(".tmp")
        .tempfile_in(directory)?;
    temp.write_all(content)?;
    temp.flush()?;
    temp.as_file().sync_all()?;
    Ok(temp)
}

/// Persist without clobbering, advancing the sequence if the name was taken
/// between listing and persisting.
fn claim_sequential(mut temp: NamedTempFile, endpoint: &str, directory: &Path) -> Result<PathBuf> {
    let policy = NamingPolicy::Sequential;

    for _ in 0..MAX_CLAIM_ATTEMPTS {
        let existing = list_file_names(directory)?;
        let path = directory.join(policy.filename(endpoint, &existing));

        match temp.persist_noclobber(&path) {
            Ok(_) => return Ok(path),
            Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => {
                debug!("{} was claimed concurrently, rescanning", path.display());
                temp = e.file;
            }
            Err(e) => return Err(Error::Filesystem(e.error)),
        }
    }

    Err(Error::Filesystem(io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!(
            "Could not claim an output name in {} after {MAX_CLAIM_ATTEMPTS} attempts",
            directory.display()
        ),
    )))
}

/// Names of the entries in `directory`; a missing directory is empty
fn list_file_names(directory: &Path) -> Result<Vec<String>> {
    let entries = match fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut names = Vec::new();
    for entry in entries {
        if let Some(name) = entry?.file_name().to_str() {
            names.push(name.to_string());
        }
    }
    Ok(names)
}
