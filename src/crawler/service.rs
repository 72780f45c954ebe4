//! The lyrics crawl pipeline: artist resolution, catalog discovery, lyrics
//! fetching and keyword filtering.

use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use super::fan_out::fetch_all;
use super::models::{AnalyzedSong, Artist, Song, SongInfo};
use super::paginator::CatalogPaginator;
use crate::config::CrawlSettings;
use crate::genius::{GeniusError, GeniusId, GeniusProvider, LyricsState};
use crate::lyrics::{extract_lyrics, ExtractError, KeywordSet};

#[derive(Debug, Error)]
pub enum LyricsError {
    #[error("Artist not found: {0:?}")]
    ArtistNotFound(String),

    #[error("No search results for {0:?}")]
    NoSearchResults(String),

    #[error("Lyrics of song {id} are not complete ({state:?})")]
    LyricsIncomplete { id: GeniusId, state: LyricsState },

    #[error("Lyrics of song {id} are empty after {attempts} attempts")]
    EmptyLyrics { id: GeniusId, attempts: u32 },

    #[error("Fetching song {id} failed: {source}")]
    SongFetch {
        id: GeniusId,
        #[source]
        source: GeniusError,
    },

    #[error("Upstream error: {0}")]
    Upstream(#[from] GeniusError),
}

/// Entry point of the crawl, built once around a provider and the crawl
/// settings.
pub struct LyricsService {
    provider: Arc<dyn GeniusProvider>,
    paginator: CatalogPaginator,
    settings: CrawlSettings,
}

impl LyricsService {
    pub fn new(provider: Arc<dyn GeniusProvider>, settings: CrawlSettings) -> Self {
        let paginator = CatalogPaginator::new(provider.clone(), settings.clone());
        Self {
            provider,
            paginator,
            settings,
        }
    }

    /// Canonical public URL of a song page.
    pub fn song_url(&self, info: &SongInfo) -> String {
        self.provider.page_url(&info.path)
    }

    /// Resolves an artist name to the primary artist of the first search hit
    /// whose artist name contains it, case-insensitively.
    pub async fn resolve_artist(&self, name: &str) -> Result<Artist, LyricsError> {
        let wanted = name.trim().to_lowercase();
        if wanted.is_empty() {
            return Err(LyricsError::ArtistNotFound(name.to_string()));
        }

        let hits = self.provider.search(name).await?;
        hits.into_iter()
            .map(|hit| hit.primary_artist)
            .find(|artist| artist.name.to_lowercase().contains(&wanted))
            .map(|artist| Artist {
                id: artist.id,
                name: artist.name,
            })
            .ok_or_else(|| LyricsError::ArtistNotFound(name.to_string()))
    }

    /// The deduplicated catalog of an artist. Fails only when the artist
    /// cannot be resolved.
    pub async fn song_infos_by_artist(&self, name: &str) -> Result<Vec<SongInfo>, LyricsError> {
        let artist = self.resolve_artist(name).await?;
        info!(artist_id = artist.id, artist = %artist.name, "Artist resolved");
        Ok(self.paginator.fetch_catalog(artist.id).await)
    }

    /// Every song of an artist whose lyrics could be fetched.
    pub async fn songs_by_artist(&self, name: &str) -> Result<Vec<Song>, LyricsError> {
        let infos = self.song_infos_by_artist(name).await?;
        Ok(self.songs_from_infos(infos).await)
    }

    /// Every song of an artist with the word counts of its lyrics.
    pub async fn analyzed_songs_by_artist(
        &self,
        name: &str,
    ) -> Result<Vec<AnalyzedSong>, LyricsError> {
        let songs = self.songs_by_artist(name).await?;
        Ok(songs.into_iter().map(AnalyzedSong::from).collect())
    }

    /// Songs of an artist containing none of `banned`.
    pub async fn songs_without_keywords(
        &self,
        name: &str,
        banned: &KeywordSet,
    ) -> Result<Vec<AnalyzedSong>, LyricsError> {
        let songs = self.analyzed_songs_by_artist(name).await?;
        Ok(partition_by_keywords(songs, banned).1)
    }

    /// Songs of an artist containing at least one of `searched`.
    pub async fn songs_with_any_keyword(
        &self,
        name: &str,
        searched: &KeywordSet,
    ) -> Result<Vec<AnalyzedSong>, LyricsError> {
        let songs = self.analyzed_songs_by_artist(name).await?;
        Ok(partition_by_keywords(songs, searched).0)
    }

    /// Fetches the lyrics of every song concurrently. Failed songs are
    /// logged and left out of the result.
    pub async fn songs_from_infos(&self, infos: Vec<SongInfo>) -> Vec<Song> {
        let requested = infos.len();
        let provider = self.provider.clone();
        let attempts = self.settings.max_lyrics_attempts;

        let songs = fetch_all(infos, self.settings.channel_buffer_size, move |info| {
            fetch_song(provider.clone(), info, attempts)
        })
        .await;

        if songs.len() < requested {
            warn!(
                requested,
                fetched = songs.len(),
                "Some songs were dropped, see previous errors"
            );
        }
        songs
    }

    /// Fetches the lyrics of a single song.
    pub async fn song_from_info(&self, info: SongInfo) -> Result<Song, LyricsError> {
        fetch_song(
            self.provider.clone(),
            info,
            self.settings.max_lyrics_attempts,
        )
        .await
    }

    pub async fn song_by_id(&self, id: GeniusId) -> Result<Song, LyricsError> {
        let info = self.provider.song_info(id).await?;
        self.song_from_info(info.into()).await
    }

    pub async fn songs_by_ids(&self, ids: Vec<GeniusId>) -> Vec<Song> {
        let provider = self.provider.clone();
        let attempts = self.settings.max_lyrics_attempts;

        fetch_all(ids, self.settings.channel_buffer_size, move |id| {
            let provider = provider.clone();
            async move {
                let info = provider
                    .song_info(id)
                    .await
                    .map_err(|source| LyricsError::SongFetch { id, source })?;
                fetch_song(provider, info.into(), attempts).await
            }
        })
        .await
    }

    /// The song of the first search hit for `query`.
    pub async fn song_by_name(&self, query: &str) -> Result<Song, LyricsError> {
        let hit = self
            .provider
            .search(query)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| LyricsError::NoSearchResults(query.to_string()))?;
        self.song_from_info(hit.into()).await
    }
}

/// Fetches the lyrics page of `info`, retrying pages that render without
/// lyrics up to `max_attempts` attempts in total.
async fn fetch_song(
    provider: Arc<dyn GeniusProvider>,
    info: SongInfo,
    max_attempts: u32,
) -> Result<Song, LyricsError> {
    if info.lyrics_state != LyricsState::Complete {
        return Err(LyricsError::LyricsIncomplete {
            id: info.id,
            state: info.lyrics_state,
        });
    }

    for attempt in 1..=max_attempts {
        let html = provider
            .lyrics_page(&info.path)
            .await
            .map_err(|source| LyricsError::SongFetch { id: info.id, source })?;

        match extract_lyrics(&html) {
            Ok(lyrics) => return Ok(Song { info, lyrics }),
            Err(ExtractError::EmptyLyrics) => {
                warn!(song_id = info.id, attempt, "Lyrics page rendered without lyrics")
            }
        }
    }

    Err(LyricsError::EmptyLyrics {
        id: info.id,
        attempts: max_attempts,
    })
}

/// Splits songs into those containing at least one keyword and those
/// containing none.
pub fn partition_by_keywords(
    songs: Vec<AnalyzedSong>,
    keywords: &KeywordSet,
) -> (Vec<AnalyzedSong>, Vec<AnalyzedSong>) {
    songs
        .into_iter()
        .partition(|song| song.words.contains_any(keywords))
}
