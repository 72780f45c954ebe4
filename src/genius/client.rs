//! HTTP client for the upstream lyrics site.

use async_trait::async_trait;
use rand::seq::IndexedRandom;
use reqwest::{RequestBuilder, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use super::models::{
    ArtistSongsPage, ArtistSongsResponse, GeniusId, GeniusSongInfo, SearchResponse, SongResponse,
};
use super::{GeniusError, GeniusProvider};
use crate::config::GeniusSettings;

const SEARCH_ENDPOINT: &str = "search";
const SONGS_ENDPOINT: &str = "songs";
const ARTISTS_ENDPOINT: &str = "artists";

const MAX_IDLE_CONNECTIONS_PER_HOST: usize = 10;

/// HTTP client for the lyrics site, sharing one connection pool across all
/// concurrent requests.
pub struct GeniusClient {
    client: reqwest::Client,
    settings: GeniusSettings,
    api_host: String,
}

impl GeniusClient {
    pub fn new(settings: GeniusSettings) -> Result<Self, GeniusError> {
        let api_host = Url::parse(&settings.api_url)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
            .ok_or_else(|| GeniusError::InvalidUrl(settings.api_url.clone()))?;

        let timeout = Duration::from_secs(settings.request_timeout_sec);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(timeout)
            .pool_max_idle_per_host(MAX_IDLE_CONNECTIONS_PER_HOST)
            .build()?;

        Ok(Self {
            client,
            settings,
            api_host,
        })
    }

    fn user_agent(&self) -> &str {
        self.settings
            .user_agents
            .choose(&mut rand::rng())
            .map(String::as_str)
            .unwrap_or(crate::config::DEFAULT_USER_AGENT)
    }

    fn get(&self, url: &str) -> RequestBuilder {
        debug!(url, "GET");
        self.client
            .get(url)
            .header(reqwest::header::USER_AGENT, self.user_agent())
            .header(reqwest::header::ACCEPT, "*/*")
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
    }

    fn api_get(&self, endpoint: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.settings.api_url, endpoint);
        let request = self.get(&url).header("x-rapidapi-host", &self.api_host);
        match &self.settings.api_key {
            Some(key) => request.header("x-rapidapi-key", key),
            None => request,
        }
    }

    async fn send_text(&self, request: RequestBuilder) -> Result<String, GeniusError> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GeniusError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }
        Ok(response.text().await?)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, GeniusError> {
        let body = self.send_text(request).await?;
        serde_json::from_str(&body).map_err(|e| GeniusError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl GeniusProvider for GeniusClient {
    async fn search(&self, query: &str) -> Result<Vec<GeniusSongInfo>, GeniusError> {
        let request = self.api_get(SEARCH_ENDPOINT).query(&[("q", query)]);
        let response: SearchResponse = self.send_json(request).await?;

        Ok(response
            .response
            .hits
            .into_iter()
            .filter(|hit| hit.kind.is_empty() || hit.kind == "song")
            .map(|hit| hit.result)
            .collect())
    }

    async fn artist_songs_page(
        &self,
        artist_id: GeniusId,
        page: u32,
    ) -> Result<ArtistSongsPage, GeniusError> {
        let endpoint = format!("{}/{}/{}", ARTISTS_ENDPOINT, artist_id, SONGS_ENDPOINT);
        let request = self.api_get(&endpoint).query(&[
            ("per_page", self.settings.per_page),
            ("page", page),
        ]);
        let response: ArtistSongsResponse = self.send_json(request).await?;
        Ok(response.response)
    }

    async fn song_info(&self, id: GeniusId) -> Result<GeniusSongInfo, GeniusError> {
        let endpoint = format!("{}/{}", SONGS_ENDPOINT, id);
        let response: SongResponse = self.send_json(self.api_get(&endpoint)).await?;
        Ok(response.response.song)
    }

    async fn lyrics_page(&self, path: &str) -> Result<String, GeniusError> {
        self.send_text(self.get(&self.page_url(path))).await
    }

    fn page_url(&self, path: &str) -> String {
        format!("{}{}", self.settings.site_url, path)
    }
}
