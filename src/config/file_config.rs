use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    // Core settings (can override CLI)
    pub port: Option<u16>,
    pub logging_level: Option<String>,

    // Feature configs
    pub genius: Option<GeniusConfig>,
    pub crawl: Option<CrawlConfig>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct GeniusConfig {
    pub api_url: Option<String>,
    pub site_url: Option<String>,
    pub api_key: Option<String>,
    pub user_agents: Option<Vec<String>>,
    pub request_timeout_sec: Option<u64>,
    pub per_page: Option<u32>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct CrawlConfig {
    pub max_pages_for_artist: Option<u32>,
    pub channel_buffer_size: Option<usize>,
    pub max_lyrics_attempts: Option<u32>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
