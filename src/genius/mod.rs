//! Access to the upstream lyrics site.
//!
//! [`GeniusProvider`] is the capability boundary the crawler works against;
//! [`GeniusClient`] implements it over HTTP.

mod client;
pub mod models;

pub use client::GeniusClient;
pub use models::{ArtistSongsPage, GeniusArtist, GeniusId, GeniusSongInfo, LyricsState};

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when talking to the upstream site.
#[derive(Debug, Error)]
pub enum GeniusError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Upstream returned status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Read-only operations on the upstream lyrics site.
#[async_trait]
pub trait GeniusProvider: Send + Sync {
    /// Free text search, returns the song hits in upstream order.
    async fn search(&self, query: &str) -> Result<Vec<GeniusSongInfo>, GeniusError>;

    /// One page of the song listing of an artist.
    async fn artist_songs_page(
        &self,
        artist_id: GeniusId,
        page: u32,
    ) -> Result<ArtistSongsPage, GeniusError>;

    /// Song metadata by id.
    async fn song_info(&self, id: GeniusId) -> Result<GeniusSongInfo, GeniusError>;

    /// Raw HTML of the lyrics page at `path`.
    async fn lyrics_page(&self, path: &str) -> Result<String, GeniusError>;

    /// Canonical public URL of the page at `path`.
    fn page_url(&self, path: &str) -> String;
}
