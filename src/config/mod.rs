mod args;
mod file_config;

pub use args::UpstreamArgs;

pub use file_config::{CrawlConfig, FileConfig, GeniusConfig};

use crate::server::RequestsLoggingLevel;
use anyhow::{bail, Result};
use clap::ValueEnum;

pub const DEFAULT_GENIUS_API_URL: &str = "https://genius.p.rapidapi.com";
pub const DEFAULT_GENIUS_SITE_URL: &str = "https://genius.com";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub genius_api_url: Option<String>,
    pub genius_site_url: Option<String>,
    pub genius_api_key: Option<String>,
    pub request_timeout_sec: Option<u64>,
    pub max_pages_for_artist: Option<u32>,
    pub channel_buffer_size: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub genius: GeniusSettings,
    pub crawl: CrawlSettings,
}

/// Settings of the upstream lyrics site client.
#[derive(Debug, Clone)]
pub struct GeniusSettings {
    /// Base URL of the JSON API, without trailing slash.
    pub api_url: String,
    /// Base URL of the public site serving the lyrics pages, without trailing slash.
    pub site_url: String,
    pub api_key: Option<String>,
    /// One of these is picked at random for every request.
    pub user_agents: Vec<String>,
    pub request_timeout_sec: u64,
    pub per_page: u32,
}

impl Default for GeniusSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_GENIUS_API_URL.to_string(),
            site_url: DEFAULT_GENIUS_SITE_URL.to_string(),
            api_key: None,
            user_agents: vec![DEFAULT_USER_AGENT.to_string()],
            request_timeout_sec: 10,
            per_page: 50,
        }
    }
}

/// Settings of the artist crawl.
#[derive(Debug, Clone)]
pub struct CrawlSettings {
    /// Listing pages `0..=max_pages_for_artist` are probed. Artists with more
    /// songs than fit in those pages come back truncated.
    pub max_pages_for_artist: u32,
    /// Completed results that can queue up before workers block.
    pub channel_buffer_size: usize,
    /// Total attempts at fetching a lyrics page that renders empty.
    pub max_lyrics_attempts: u32,
}

impl Default for CrawlSettings {
    fn default() -> Self {
        Self {
            max_pages_for_artist: 100,
            channel_buffer_size: 30,
            max_lyrics_attempts: 2,
        }
    }
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let port = file.port.unwrap_or(cli.port);

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let genius_defaults = GeniusSettings::default();
        let genius_file = file.genius.unwrap_or_default();
        let genius = GeniusSettings {
            api_url: resolve_base_url(
                "genius.api_url",
                genius_file.api_url.or_else(|| cli.genius_api_url.clone()),
                genius_defaults.api_url,
            )?,
            site_url: resolve_base_url(
                "genius.site_url",
                genius_file.site_url.or_else(|| cli.genius_site_url.clone()),
                genius_defaults.site_url,
            )?,
            api_key: genius_file
                .api_key
                .or_else(|| cli.genius_api_key.clone())
                .filter(|key| !key.trim().is_empty()),
            user_agents: genius_file
                .user_agents
                .unwrap_or(genius_defaults.user_agents),
            request_timeout_sec: genius_file
                .request_timeout_sec
                .or(cli.request_timeout_sec)
                .unwrap_or(genius_defaults.request_timeout_sec),
            per_page: genius_file.per_page.unwrap_or(genius_defaults.per_page),
        };

        if genius.user_agents.is_empty() {
            bail!("genius.user_agents must contain at least one user agent");
        }
        if genius.per_page == 0 {
            bail!("genius.per_page must be greater than 0");
        }

        let crawl_defaults = CrawlSettings::default();
        let crawl_file = file.crawl.unwrap_or_default();
        let crawl = CrawlSettings {
            max_pages_for_artist: crawl_file
                .max_pages_for_artist
                .or(cli.max_pages_for_artist)
                .unwrap_or(crawl_defaults.max_pages_for_artist),
            channel_buffer_size: crawl_file
                .channel_buffer_size
                .or(cli.channel_buffer_size)
                .unwrap_or(crawl_defaults.channel_buffer_size),
            max_lyrics_attempts: crawl_file
                .max_lyrics_attempts
                .unwrap_or(crawl_defaults.max_lyrics_attempts),
        };

        if crawl.channel_buffer_size == 0 {
            bail!("crawl.channel_buffer_size must be greater than 0");
        }
        if crawl.max_lyrics_attempts == 0 {
            bail!("crawl.max_lyrics_attempts must be greater than 0");
        }

        Ok(Self {
            port,
            logging_level,
            genius,
            crawl,
        })
    }
}

/// Picks the first available value, checks its scheme and drops the trailing slash.
fn resolve_base_url(name: &str, value: Option<String>, default: String) -> Result<String> {
    let url = value.unwrap_or(default);
    if !url.starts_with("http://") && !url.starts_with("https://") {
        bail!("{} must start with http:// or https://, got {:?}", name, url);
    }
    Ok(url.trim_end_matches('/').to_string())
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
