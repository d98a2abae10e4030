//! Output module
//!
//! Derives collision-free output filenames and writes result sets as
//! indented JSON.
//!
//! # Overview
//!
//! This module provides:
//! - Filename derivation from the endpoint path (deterministic or
//!   sequentially numbered)
//! - A writer that serializes to a temporary file and persists it under the
//!   derived name

mod naming;
mod writer;

pub use naming::{
    base_name, deterministic_filename, next_sequence, sequential_filename, NamingPolicy,
    OUTPUT_EXTENSION,
};
pub use writer::{to_pretty_json, ResultWriter};

#[cfg(test)]
mod tests;
