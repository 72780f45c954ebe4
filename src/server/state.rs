use axum::extract::FromRef;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;
use crate::crawler::LyricsService;

pub type GuardedLyricsService = Arc<LyricsService>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub lyrics_service: GuardedLyricsService,
    pub hash: String,
}

impl ServerState {
    pub fn new(config: ServerConfig, lyrics_service: GuardedLyricsService, hash: String) -> Self {
        ServerState {
            config,
            start_time: Instant::now(),
            lyrics_service,
            hash,
        }
    }
}

impl FromRef<ServerState> for GuardedLyricsService {
    fn from_ref(input: &ServerState) -> Self {
        input.lyrics_service.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
