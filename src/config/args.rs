use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

use super::{AppConfig, CliConfig, FileConfig};
use crate::server::RequestsLoggingLevel;

fn parse_path(s: &str) -> Result<PathBuf, String> {
    let path_buf = PathBuf::from(s);
    if path_buf.is_absolute() {
        return Ok(path_buf);
    }
    let cwd = std::env::current_dir().map_err(|e| format!("Failed to get current dir: {}", e))?;
    Ok(cwd.join(path_buf))
}

/// Flags shared by every binary talking to the lyrics site.
#[derive(Args, Debug, Clone, Default)]
pub struct UpstreamArgs {
    /// Path to TOML configuration file. Values in the file override CLI arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Base URL of the lyrics site JSON API.
    #[clap(long)]
    pub genius_api_url: Option<String>,

    /// Base URL of the public lyrics pages.
    #[clap(long)]
    pub genius_site_url: Option<String>,

    /// API key sent to the JSON API.
    #[clap(long, env = "GENIUS_API_KEY", hide_env_values = true)]
    pub genius_api_key: Option<String>,

    /// Timeout in seconds of every upstream request.
    #[clap(long)]
    pub request_timeout_sec: Option<u64>,

    /// Listing pages 0..=N are probed when crawling an artist catalog.
    #[clap(long)]
    pub max_pages_for_artist: Option<u32>,

    /// Fetched results that can queue up before fetch workers block.
    #[clap(long)]
    pub channel_buffer_size: Option<usize>,
}

impl UpstreamArgs {
    pub fn cli_config(&self, port: u16, logging_level: RequestsLoggingLevel) -> CliConfig {
        CliConfig {
            port,
            logging_level,
            genius_api_url: self.genius_api_url.clone(),
            genius_site_url: self.genius_site_url.clone(),
            genius_api_key: self.genius_api_key.clone(),
            request_timeout_sec: self.request_timeout_sec,
            max_pages_for_artist: self.max_pages_for_artist,
            channel_buffer_size: self.channel_buffer_size,
        }
    }

    /// Loads the TOML file, if any, and resolves it against these flags.
    pub fn resolve(&self, port: u16, logging_level: RequestsLoggingLevel) -> Result<AppConfig> {
        let file_config = match &self.config {
            Some(path) => {
                info!("Loading configuration from {:?}", path);
                Some(FileConfig::load(path)?)
            }
            None => None,
        };
        AppConfig::resolve(&self.cli_config(port, logging_level), file_config)
    }
}
