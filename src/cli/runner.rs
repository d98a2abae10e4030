//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::Settings;
use crate::decode::JsonPageDecoder;
use crate::engine::PullEngine;
use crate::error::Result;
use crate::http::{HttpClient, HttpPageFetcher, PageFetcher};
use serde_json::{json, Value};
use tracing::debug;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let settings = self.settings()?;
        debug!("Resolved settings: {settings:?}");

        match self.cli.command {
            Commands::Pull => self.pull(&settings).await,
            Commands::Check => self.check(&settings).await,
        }
    }

    /// Resolve settings: defaults, config file, environment, then flags
    pub fn settings(&self) -> Result<Settings> {
        let base = match &self.cli.config {
            Some(path) => Settings::from_file(path)?,
            None => Settings::default(),
        };
        let settings = self.apply_flags(base.with_env());
        settings.validate()?;
        Ok(settings)
    }

    /// Overlay command-line flags
    fn apply_flags(&self, mut settings: Settings) -> Settings {
        let cli = &self.cli;

        if let Some(url) = &cli.url {
            settings.url = Some(url.clone());
        }
        if let Some(dir) = &cli.output_dir {
            settings.output_dir = dir.clone();
        }
        if let Some(retries) = cli.max_retries {
            settings.max_retries = retries;
        }
        if let Some(delay) = cli.retry_delay {
            settings.retry_delay_seconds = delay;
        }
        if let Some(timeout) = cli.timeout {
            settings.request_timeout_seconds = timeout;
        }
        if let Some(naming) = cli.naming {
            settings.naming = naming;
        }
        if let Some(path) = &cli.items_path {
            settings.items_path = path.clone();
        }
        if let Some(path) = &cli.next_path {
            settings.next_path = path.clone();
        }
        if let Some(max_pages) = cli.max_pages {
            settings.max_pages = max_pages;
        }

        settings
    }

    /// Traverse and write
    async fn pull(&self, settings: &Settings) -> Result<()> {
        let url = settings.require_url()?;
        let engine = PullEngine::from_settings(settings)?;
        let report = engine.run(url, &settings.output_dir).await?;

        self.output_message(&json!({
            "type": "PULL_COMPLETE",
            "pull": report
        }));
        Ok(())
    }

    /// Fetch the first page only
    async fn check(&self, settings: &Settings) -> Result<()> {
        let url = settings.require_url()?;
        let client = HttpClient::with_config(settings.http_config())?;
        let fetcher = HttpPageFetcher::with_decoder(
            client,
            JsonPageDecoder::with_config(settings.decoder_config()),
        );

        match fetcher.fetch_page(url).await {
            Ok(page) => {
                self.output_message(&json!({
                    "type": "CONNECTION_STATUS",
                    "connectionStatus": {
                        "status": "SUCCEEDED",
                        "items": page.items.len(),
                        "next": page.next_cursor
                    }
                }));
                Ok(())
            }
            Err(e) => {
                self.output_message(&json!({
                    "type": "CONNECTION_STATUS",
                    "connectionStatus": {
                        "status": "FAILED",
                        "message": format!("Check failed: {e}")
                    }
                }));
                Err(e)
            }
        }
    }

    /// Output a message
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::NamingPolicy;
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    #[test]
    fn test_parse_pull_flags() {
        let cli = Cli::parse_from([
            "pagesweep",
            "pull",
            "--url",
            "https://rickandmortyapi.com/api/character",
            "-o",
            "out",
            "--max-retries",
            "1",
            "--naming",
            "deterministic",
        ]);

        assert_eq!(cli.command, Commands::Pull);
        let settings = Runner::new(cli).apply_flags(Settings::default());
        assert_eq!(
            settings.url.as_deref(),
            Some("https://rickandmortyapi.com/api/character")
        );
        assert_eq!(settings.output_dir, PathBuf::from("out"));
        assert_eq!(settings.max_retries, 1);
        assert_eq!(settings.naming, NamingPolicy::Deterministic);
        assert_eq!(settings.retry_delay_seconds, 10);
    }

    #[test]
    fn test_flags_override_lower_layers() {
        let cli = Cli::parse_from(["pagesweep", "check", "--timeout", "5", "--max-pages", "0"]);
        let base = Settings {
            request_timeout_seconds: 30,
            max_pages: 100,
            max_retries: 9,
            ..Settings::default()
        };

        let settings = Runner::new(cli).apply_flags(base);
        assert_eq!(settings.request_timeout_seconds, 5);
        assert_eq!(settings.max_pages, 0);
        assert_eq!(settings.max_retries, 9);
    }

    #[test]
    fn test_parse_rejects_negative_retries() {
        let result = Cli::try_parse_from(["pagesweep", "pull", "--max-retries", "-1"]);
        assert!(result.is_err());
    }
}
