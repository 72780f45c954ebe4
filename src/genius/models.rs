//! Wire types of the upstream lyrics site API.
//!
//! Only the fields this crate reads are mapped, everything else in the
//! payloads is ignored.

use serde::{Deserialize, Serialize};

pub type GeniusId = u64;

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LyricsState {
    Complete,
    Unreleased,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct GeniusArtist {
    pub id: GeniusId,
    #[serde(default)]
    pub api_path: String,
    pub name: String,
}

/// A song row, as returned by search hits, artist listings and song lookups.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct GeniusSongInfo {
    pub id: GeniusId,
    #[serde(default)]
    pub api_path: String,
    pub full_title: String,
    /// Relative path of the lyrics page on the site.
    pub path: String,
    pub primary_artist: GeniusArtist,
    #[serde(default)]
    pub lyrics_state: LyricsState,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub response: SearchHits,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchHits {
    #[serde(default)]
    pub hits: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchHit {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub result: GeniusSongInfo,
}

/// One page of an artist's song listing.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ArtistSongsPage {
    #[serde(default)]
    pub songs: Vec<GeniusSongInfo>,
    /// Hint for the following page. Not trustworthy near the end of a
    /// catalog, the crawler does not rely on it.
    pub next_page: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ArtistSongsResponse {
    pub response: ArtistSongsPage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SongResponse {
    pub response: SongEnvelope,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SongEnvelope {
    pub song: GeniusSongInfo,
}
