//! Stub of the upstream lyrics site
//!
//! Serves the JSON API under `/api` and the lyrics pages under `/site`,
//! from the catalog of `fixtures.rs`. Every request is recorded so tests can
//! check what the crawler asked for.

use super::constants::*;
use super::fixtures::{listing_pages, stub_songs, StubSong};
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use word_finder::config::{CrawlSettings, GeniusSettings};
use word_finder::crawler::LyricsService;
use word_finder::genius::GeniusClient;

#[derive(Default)]
struct StubState {
    songs: HashMap<u64, StubSong>,
    pages: HashMap<u32, Vec<u64>>,
    /// Request count by request path
    requests: Mutex<HashMap<String, usize>>,
    /// Headers of every API request
    api_headers: Mutex<Vec<HeaderMap>>,
}

impl StubState {
    fn record(&self, path: &str) -> usize {
        let mut requests = self.requests.lock().unwrap();
        let count = requests.entry(path.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    fn record_api(&self, path: &str, headers: &HeaderMap) {
        self.record(path);
        self.api_headers.lock().unwrap().push(headers.clone());
    }
}

type SharedStubState = Arc<StubState>;

async fn search(
    State(state): State<SharedStubState>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    state.record_api("/api/search", &headers);
    let q = query.get("q").map(|q| q.to_lowercase()).unwrap_or_default();

    let mut songs: Vec<&StubSong> = state
        .songs
        .values()
        .filter(|song| {
            song.title.to_lowercase().contains(&q) || song.artist_name.to_lowercase().contains(&q)
        })
        .collect();
    songs.sort_by_key(|song| song.id);

    let hits: Vec<_> = songs
        .iter()
        .map(|song| json!({"index": "song", "type": "song", "result": song.to_json()}))
        .collect();
    Json(json!({"meta": {"status": 200}, "response": {"hits": hits}})).into_response()
}

async fn artist_songs(
    State(state): State<SharedStubState>,
    headers: HeaderMap,
    Path(artist_id): Path<u64>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let page: u32 = match query.get("page").and_then(|p| p.parse().ok()) {
        Some(page) => page,
        None => return StatusCode::BAD_REQUEST.into_response(),
    };
    state.record_api(&format!("/api/artists/{}/songs?page={}", artist_id, page), &headers);

    if artist_id == ARTIST_ID && page == FAILING_PAGE {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    let songs: Vec<_> = match state.pages.get(&page) {
        Some(ids) if artist_id == ARTIST_ID => ids
            .iter()
            .filter_map(|id| state.songs.get(id))
            .map(StubSong::to_json)
            .collect(),
        _ => Vec::new(),
    };
    let next_page = if songs.is_empty() { None } else { Some(page + 1) };
    Json(json!({"response": {"songs": songs, "next_page": next_page}})).into_response()
}

async fn song(
    State(state): State<SharedStubState>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Response {
    state.record_api(&format!("/api/songs/{}", id), &headers);
    match state.songs.get(&id) {
        Some(song) => Json(json!({"response": {"song": song.to_json()}})).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn lyrics_page(State(state): State<SharedStubState>, Path(slug): Path<String>) -> Response {
    let path = format!("/lyrics/{}", slug);
    let attempt = state.record(&format!("/site{}", path));

    match state.songs.values().find(|song| song.path() == path) {
        Some(song) => {
            let index = (attempt - 1).min(song.pages.len() - 1);
            Html(song.pages[index].clone()).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Stub upstream listening on a random local port
///
/// When dropped, the server shuts down.
pub struct StubUpstream {
    /// Base URL of the stub (e.g., "http://127.0.0.1:12345")
    pub base_url: String,
    state: SharedStubState,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl StubUpstream {
    pub async fn spawn() -> Self {
        let state = Arc::new(StubState {
            songs: stub_songs(),
            pages: listing_pages(),
            ..Default::default()
        });

        let app = Router::new()
            .route("/api/search", get(search))
            .route("/api/artists/{artist_id}/songs", get(artist_songs))
            .route("/api/songs/{id}", get(song))
            .route("/site/lyrics/{slug}", get(lyrics_page))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Stub upstream failed");
        });

        Self {
            base_url: format!("http://127.0.0.1:{}", port),
            state,
            _shutdown_tx: Some(shutdown_tx),
        }
    }

    pub fn genius_settings(&self) -> GeniusSettings {
        GeniusSettings {
            api_url: format!("{}/api", self.base_url),
            site_url: format!("{}/site", self.base_url),
            api_key: Some(API_KEY.to_string()),
            user_agents: vec![USER_AGENT.to_string()],
            request_timeout_sec: REQUEST_TIMEOUT_SECS,
            per_page: 3,
        }
    }

    pub fn crawl_settings(&self) -> CrawlSettings {
        CrawlSettings {
            max_pages_for_artist: MAX_PAGES_FOR_ARTIST,
            channel_buffer_size: 4,
            max_lyrics_attempts: 2,
        }
    }

    pub fn client(&self) -> GeniusClient {
        GeniusClient::new(self.genius_settings()).expect("Failed to build client")
    }

    /// Lyrics service crawling this stub through the real HTTP client
    pub fn lyrics_service(&self) -> LyricsService {
        LyricsService::new(Arc::new(self.client()), self.crawl_settings())
    }

    /// Number of requests received for `path`, listing paths carry their
    /// `page` query (e.g., "/api/artists/7/songs?page=0")
    pub fn request_count(&self, path: &str) -> usize {
        *self.state.requests.lock().unwrap().get(path).unwrap_or(&0)
    }

    /// Number of requests received whose path starts with `prefix`
    pub fn request_count_with_prefix(&self, prefix: &str) -> usize {
        self.state
            .requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(path, _)| path.starts_with(prefix))
            .map(|(_, count)| count)
            .sum()
    }

    /// Values of `name` in every API request received so far
    pub fn api_header_values(&self, name: &str) -> Vec<String> {
        self.state
            .api_headers
            .lock()
            .unwrap()
            .iter()
            .map(|headers| {
                headers
                    .get(name)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string()
            })
            .collect()
    }
}
