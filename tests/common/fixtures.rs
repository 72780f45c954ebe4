//! Stub catalog served by the upstream stub
//!
//! The catalog deliberately mixes every situation the crawler must cope
//! with: duplicated rows across pages, a featured song of another artist, a
//! failing listing page, a lyrics page that renders empty once, one that
//! always renders empty and a song without released lyrics.

use super::constants::*;
use serde_json::{json, Value};
use std::collections::HashMap;

pub const EMPTY_LYRICS_HTML: &str =
    r#"<html><body><div class="lyrics"><script>hydrate()</script></div></body></html>"#;

#[derive(Clone, Debug)]
pub struct StubSong {
    pub id: u64,
    pub title: &'static str,
    pub artist_id: u64,
    pub artist_name: &'static str,
    pub lyrics_state: &'static str,
    /// Pages served in order, the last one repeats.
    pub pages: Vec<String>,
}

impl StubSong {
    fn new(id: u64, title: &'static str, lyrics: &str) -> Self {
        StubSong {
            id,
            title,
            artist_id: ARTIST_ID,
            artist_name: ARTIST_NAME,
            lyrics_state: "complete",
            pages: vec![lyrics_html(lyrics)],
        }
    }

    pub fn path(&self) -> String {
        format!("/lyrics/song-{}", self.id)
    }

    pub fn full_title(&self) -> String {
        format!("{} by {}", self.title, self.artist_name)
    }

    pub fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "api_path": format!("/songs/{}", self.id),
            "full_title": self.full_title(),
            "title": self.title,
            "path": self.path(),
            "lyrics_state": self.lyrics_state,
            "primary_artist": {
                "id": self.artist_id,
                "api_path": format!("/artists/{}", self.artist_id),
                "name": self.artist_name,
                "is_verified": false,
            },
        })
    }
}

pub fn lyrics_html(lyrics: &str) -> String {
    format!(
        r#"<html><head><script>window.ads = [];</script></head><body>
<div id="onetrust-consent-sdk">We value your privacy</div>
<div data-lyrics-container="true">{}</div>
</body></html>"#,
        lyrics.replace('\n', "<br/>")
    )
}

pub fn stub_songs() -> HashMap<u64, StubSong> {
    let mut sun = StubSong::new(SONG_SUN_ID, "Sun", "");
    sun.pages = vec![
        r#"<html><body><div data-lyrics-container="true">Here comes the sun<script>love()</script><br>and I say it is alright</div></body></html>"#
            .to_string(),
    ];

    let mut taxman = StubSong::new(SONG_TAXMAN_ID, "Taxman", "");
    taxman.pages = vec![
        EMPTY_LYRICS_HTML.to_string(),
        lyrics_html("Taxman is coming for your money"),
    ];

    let mut silence = StubSong::new(SONG_SILENCE_ID, "Silence", "");
    silence.pages = vec![EMPTY_LYRICS_HTML.to_string()];

    let mut demo = StubSong::new(SONG_DEMO_ID, "Demo", "Demo lyrics about love");
    demo.lyrics_state = "unreleased";

    let mut feature = StubSong::new(SONG_FEATURE_ID, "Feature", "Featuring some love");
    feature.artist_id = GUEST_ID;
    feature.artist_name = GUEST_NAME;

    let songs = vec![
        StubSong::new(
            SONG_LOVE_ID,
            "All You Need",
            "[Verse 1]\nAll you need is love\nLove is all you need",
        ),
        StubSong::new(
            SONG_TROUBLES_ID,
            "Troubles",
            "Yesterday all my troubles seemed so far away",
        ),
        sun,
        taxman,
        silence,
        demo,
        StubSong::new(SONG_LOST_ID, "Lost", "Nobody will ever read this"),
        feature,
    ];
    songs.into_iter().map(|song| (song.id, song)).collect()
}

/// Song ids listed on each page of the band's listing. Missing pages are
/// empty, [`FAILING_PAGE`] answers with an error.
pub fn listing_pages() -> HashMap<u32, Vec<u64>> {
    HashMap::from([
        (0, vec![SONG_LOVE_ID, SONG_TROUBLES_ID]),
        (FAILING_PAGE, vec![SONG_LOST_ID]),
        (2, vec![SONG_TROUBLES_ID, SONG_SUN_ID, SONG_FEATURE_ID]),
        (3, vec![SONG_TAXMAN_ID, SONG_SILENCE_ID, SONG_DEMO_ID]),
    ])
}
