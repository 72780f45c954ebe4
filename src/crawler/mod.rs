pub mod fan_out;
pub mod models;
pub mod paginator;
pub mod service;
#[cfg(test)]
pub(crate) mod testing;

pub use fan_out::{fan_out, fetch_all};
pub use models::{AnalyzedSong, Artist, Song, SongInfo};
pub use paginator::CatalogPaginator;
pub use service::{partition_by_keywords, LyricsError, LyricsService};
