use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use word_finder::cli_style::get_styles;
use word_finder::config::UpstreamArgs;
use word_finder::crawler::LyricsService;
use word_finder::genius::GeniusClient;
use word_finder::server::{run_server, RequestsLoggingLevel, ServerConfig};

/// HTTP API serving the songs of an artist and their word counts.
#[derive(Parser, Debug)]
#[command(styles = get_styles(), version)]
struct CliArgs {
    /// The port to listen on.
    #[clap(short, long, default_value_t = 3001)]
    pub port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    #[clap(flatten)]
    pub upstream: UpstreamArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to install the tracing subscriber")?;

    // Resolve final configuration (TOML overrides CLI)
    let app_config = cli_args
        .upstream
        .resolve(cli_args.port, cli_args.logging_level.clone())?;

    info!("Configuration loaded:");
    info!("  port: {}", app_config.port);
    info!("  genius api: {}", app_config.genius.api_url);
    info!("  genius site: {}", app_config.genius.site_url);
    info!("  api key set: {}", app_config.genius.api_key.is_some());
    info!(
        "  crawl: max_pages_for_artist={} channel_buffer_size={} max_lyrics_attempts={}",
        app_config.crawl.max_pages_for_artist,
        app_config.crawl.channel_buffer_size,
        app_config.crawl.max_lyrics_attempts
    );

    let client = GeniusClient::new(app_config.genius.clone())
        .context("Failed to create the lyrics site client")?;
    let lyrics_service = Arc::new(LyricsService::new(
        Arc::new(client),
        app_config.crawl.clone(),
    ));

    let server_config = ServerConfig {
        requests_logging_level: app_config.logging_level,
        port: app_config.port,
    };

    info!("Starting server on port {}...", server_config.port);
    run_server(server_config, lyrics_service, env!("GIT_HASH").to_string()).await
}
