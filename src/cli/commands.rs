//! CLI commands and argument parsing

use crate::output::NamingPolicy;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Pull every page of a paginated JSON API into a file
#[derive(Parser, Debug)]
#[command(name = "pagesweep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Start URL of the paginated endpoint
    #[arg(short, long, global = true)]
    pub url: Option<String>,

    /// Directory to write the output file into
    #[arg(short, long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Retries per page after the first attempt
    #[arg(long, global = true)]
    pub max_retries: Option<u32>,

    /// Seconds to wait between retries
    #[arg(long, global = true)]
    pub retry_delay: Option<u64>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Output naming policy
    #[arg(long, global = true, value_enum)]
    pub naming: Option<NamingPolicy>,

    /// Dotted path of the item list in each response
    #[arg(long, global = true)]
    pub items_path: Option<String>,

    /// Dotted path of the next-page URL in each response
    #[arg(long, global = true)]
    pub next_path: Option<String>,

    /// Maximum pages to fetch (0 = unlimited)
    #[arg(long, global = true)]
    pub max_pages: Option<usize>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Fetch every page and write the items to a new file
    Pull,

    /// Fetch the first page only and report what it contains
    Check,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Indented JSON output
    Pretty,
}
