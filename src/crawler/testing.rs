//! In-memory provider used by the crawler tests.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

use crate::genius::{
    ArtistSongsPage, GeniusArtist, GeniusError, GeniusId, GeniusProvider, GeniusSongInfo,
    LyricsState,
};

pub(crate) fn song_row(id: GeniusId, artist_id: GeniusId, artist_name: &str) -> GeniusSongInfo {
    GeniusSongInfo {
        id,
        api_path: format!("/songs/{}", id),
        full_title: format!("Song {} by {}", id, artist_name),
        path: format!("/song-{}-lyrics", id),
        primary_artist: GeniusArtist {
            id: artist_id,
            api_path: format!("/artists/{}", artist_id),
            name: artist_name.to_string(),
        },
        lyrics_state: LyricsState::Complete,
    }
}

pub(crate) fn lyrics_html(lyrics: &str) -> String {
    format!(
        r#"<html><body><div data-lyrics-container="true">{}</div></body></html>"#,
        lyrics.replace('\n', "<br>")
    )
}

pub(crate) const EMPTY_LYRICS_HTML: &str =
    r#"<html><body><div class="lyrics"><script>hydrate()</script></div></body></html>"#;

#[derive(Default)]
pub(crate) struct FakeGeniusProvider {
    search_hits: Mutex<Vec<GeniusSongInfo>>,
    pages: Mutex<HashMap<(GeniusId, u32), Vec<GeniusSongInfo>>>,
    failing_pages: Mutex<HashSet<u32>>,
    songs: Mutex<HashMap<GeniusId, GeniusSongInfo>>,
    // Responses served in order, the last one repeats.
    lyrics_pages: Mutex<HashMap<String, VecDeque<String>>>,
    call_counts: Mutex<HashMap<String, usize>>,
}

impl FakeGeniusProvider {
    pub fn set_search_hits(&self, hits: Vec<GeniusSongInfo>) {
        *self.search_hits.lock().unwrap() = hits;
    }

    pub fn add_page(&self, artist_id: GeniusId, page: u32, rows: Vec<GeniusSongInfo>) {
        for row in &rows {
            self.songs.lock().unwrap().insert(row.id, row.clone());
        }
        self.pages.lock().unwrap().insert((artist_id, page), rows);
    }

    pub fn fail_page(&self, page: u32) {
        self.failing_pages.lock().unwrap().insert(page);
    }

    pub fn add_song(&self, info: GeniusSongInfo) {
        self.songs.lock().unwrap().insert(info.id, info);
    }

    pub fn add_lyrics_page(&self, path: &str, html: impl Into<String>) {
        self.lyrics_pages
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back(html.into());
    }

    pub fn call_count(&self, method: &str) -> usize {
        *self.call_counts.lock().unwrap().get(method).unwrap_or(&0)
    }

    fn increment_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }
}

fn not_found(url: String) -> GeniusError {
    GeniusError::Status { status: 404, url }
}

#[async_trait]
impl GeniusProvider for FakeGeniusProvider {
    async fn search(&self, _query: &str) -> Result<Vec<GeniusSongInfo>, GeniusError> {
        self.increment_call("search");
        Ok(self.search_hits.lock().unwrap().clone())
    }

    async fn artist_songs_page(
        &self,
        artist_id: GeniusId,
        page: u32,
    ) -> Result<ArtistSongsPage, GeniusError> {
        self.increment_call("artist_songs_page");
        if self.failing_pages.lock().unwrap().contains(&page) {
            return Err(GeniusError::Malformed(format!("page {} is broken", page)));
        }
        let songs = self
            .pages
            .lock()
            .unwrap()
            .get(&(artist_id, page))
            .cloned()
            .unwrap_or_default();
        Ok(ArtistSongsPage {
            songs,
            next_page: Some(page + 1),
        })
    }

    async fn song_info(&self, id: GeniusId) -> Result<GeniusSongInfo, GeniusError> {
        self.increment_call("song_info");
        self.songs
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(format!("/songs/{}", id)))
    }

    async fn lyrics_page(&self, path: &str) -> Result<String, GeniusError> {
        self.increment_call("lyrics_page");
        self.increment_call(&format!("lyrics_page:{}", path));
        let mut pages = self.lyrics_pages.lock().unwrap();
        let queue = pages
            .get_mut(path)
            .ok_or_else(|| not_found(path.to_string()))?;
        if queue.len() > 1 {
            Ok(queue.pop_front().unwrap_or_default())
        } else {
            Ok(queue.front().cloned().unwrap_or_default())
        }
    }

    fn page_url(&self, path: &str) -> String {
        format!("https://lyrics.test{}", path)
    }
}
