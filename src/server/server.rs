use anyhow::{Context, Result};
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{log_requests, state::*, ApiError, ApiResponse, ServerConfig};
use crate::crawler::{AnalyzedSong, SongInfo};
use crate::lyrics::{KeywordSet, WordOccurrences};

#[derive(Serialize)]
struct ServerStats {
    pub name: &'static str,
    pub uptime: String,
    pub hash: String,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

#[derive(Serialize, Debug)]
struct ApiSong {
    title: String,
    url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    words_count: Option<WordOccurrences>,
}

#[derive(Serialize, Debug)]
struct SongsPayload {
    songs: Vec<ApiSong>,
}

#[derive(Deserialize, Debug)]
struct WordsQuery {
    banned_words: Option<String>,
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        name: env!("CARGO_PKG_NAME"),
        uptime: format_uptime(state.start_time.elapsed()),
        hash: state.hash.clone(),
    };
    Json(stats)
}

fn catalog_song(service: &GuardedLyricsService, info: &SongInfo) -> ApiSong {
    ApiSong {
        title: info.title.clone(),
        url: service.song_url(info),
        words_count: None,
    }
}

fn analyzed_song(service: &GuardedLyricsService, song: AnalyzedSong) -> ApiSong {
    ApiSong {
        url: service.song_url(&song.song.info),
        title: song.song.info.title,
        words_count: Some(song.words),
    }
}

async fn get_artist_songs(
    State(service): State<GuardedLyricsService>,
    Path(artist_name): Path<String>,
) -> Result<Response, ApiError> {
    let infos = service.song_infos_by_artist(&artist_name).await?;
    let songs = infos.iter().map(|info| catalog_song(&service, info)).collect();
    Ok(ApiResponse::ok(SongsPayload { songs }).into_response())
}

async fn get_artist_songs_words(
    State(service): State<GuardedLyricsService>,
    Path(artist_name): Path<String>,
    Query(query): Query<WordsQuery>,
) -> Result<Response, ApiError> {
    let banned = match query.banned_words.as_deref() {
        Some(encoded) => KeywordSet::from_base64_csv(encoded)?,
        None => KeywordSet::default(),
    };

    let songs = service
        .songs_without_keywords(&artist_name, &banned)
        .await?
        .into_iter()
        .map(|song| analyzed_song(&service, song))
        .collect();
    Ok(ApiResponse::ok(SongsPayload { songs }).into_response())
}

pub fn make_app(state: ServerState) -> Router {
    let artist_routes: Router = Router::new()
        .route("/{artist_name}/songs", get(get_artist_songs))
        .route("/{artist_name}/songs/words", get(get_artist_songs_words))
        .with_state(state.clone());

    let home_router: Router = Router::new().route("/", get(home)).with_state(state.clone());

    home_router
        .nest("/artists", artist_routes)
        .layer(middleware::from_fn_with_state(state, log_requests))
}

pub async fn run_server(
    config: ServerConfig,
    lyrics_service: GuardedLyricsService,
    hash: String,
) -> Result<()> {
    let port = config.port;
    let app = make_app(ServerState::new(config, lyrics_service, hash));

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;
    info!("Listening on {}", listener.local_addr()?);

    Ok(axum::serve(listener, app).await?)
}
