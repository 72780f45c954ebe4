use serde::Serialize;

use crate::genius::{GeniusId, GeniusSongInfo, LyricsState};
use crate::lyrics::{count_words, WordOccurrences};

/// An artist resolved from a search, immutable for the rest of the crawl.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Artist {
    pub id: GeniusId,
    pub name: String,
}

/// Catalog entry of a song. Unique by `id` within a crawl result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SongInfo {
    pub id: GeniusId,
    pub title: String,
    pub author_name: String,
    /// Relative path of the lyrics page.
    pub path: String,
    pub lyrics_state: LyricsState,
}

impl From<GeniusSongInfo> for SongInfo {
    fn from(info: GeniusSongInfo) -> Self {
        SongInfo {
            id: info.id,
            title: info.full_title,
            author_name: info.primary_artist.name,
            path: info.path,
            lyrics_state: info.lyrics_state,
        }
    }
}

/// A song whose lyrics were fetched. Never built with empty lyrics.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Song {
    pub info: SongInfo,
    pub lyrics: String,
}

impl Song {
    pub fn word_occurrences(&self) -> WordOccurrences {
        count_words(&self.lyrics)
    }
}

/// A song paired with the word counts of its lyrics.
#[derive(Clone, Debug)]
pub struct AnalyzedSong {
    pub song: Song,
    pub words: WordOccurrences,
}

impl From<Song> for AnalyzedSong {
    fn from(song: Song) -> Self {
        let words = song.word_occurrences();
        AnalyzedSong { song, words }
    }
}
