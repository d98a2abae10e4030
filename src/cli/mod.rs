//! CLI module
//!
//! Command-line interface for running pulls.
//!
//! # Commands
//!
//! - `pull` - Fetch every page and write the output file
//! - `check` - Fetch and decode only the first page

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
