//! HTTP client for end-to-end tests
//!
//! Wraps reqwest with one method per read API endpoint.
//! When API routes or request formats change, update only this file.

use super::constants::*;
use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::Response;
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    pub async fn get_home(&self) -> Response {
        self.get("/").await
    }

    /// GET /artists/{artist_name}/songs
    pub async fn get_artist_songs(&self, artist_name: &str) -> Response {
        self.get(&format!("/artists/{}/songs", artist_name)).await
    }

    /// GET /artists/{artist_name}/songs/words, `banned` is encoded the way
    /// the API expects it: base64 of a comma separated list
    pub async fn get_artist_songs_words(&self, artist_name: &str, banned: &[&str]) -> Response {
        let encoded = STANDARD.encode(banned.join(","));
        self.get_artist_songs_words_raw(artist_name, Some(&encoded))
            .await
    }

    /// Same as [`Self::get_artist_songs_words`] with a raw query value
    pub async fn get_artist_songs_words_raw(
        &self,
        artist_name: &str,
        banned_words: Option<&str>,
    ) -> Response {
        let url = format!("{}/artists/{}/songs/words", self.base_url, artist_name);
        let mut request = self.client.get(url);
        if let Some(value) = banned_words {
            request = request.query(&[("banned_words", value)]);
        }
        request.send().await.expect("Request failed")
    }

    async fn get(&self, path: &str) -> Response {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .expect("Request failed")
    }
}
