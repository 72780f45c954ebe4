//! Discovery of an artist's catalog through the paged song listing.

use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

use super::fan_out::fan_out;
use super::models::SongInfo;
use crate::config::CrawlSettings;
use crate::genius::{GeniusId, GeniusProvider};

/// Fetches every listing page of an artist concurrently and merges the rows
/// into a deduplicated catalog.
///
/// The listing API gives no trustworthy total nor last-page signal, so a
/// fixed range of pages (`0..=max_pages_for_artist`) is probed. Pages past
/// the end of the catalog come back empty. When an artist has more songs
/// than the probed pages can hold, the catalog is silently truncated: this
/// is a known limitation of the probing strategy.
pub struct CatalogPaginator {
    provider: Arc<dyn GeniusProvider>,
    settings: CrawlSettings,
}

impl CatalogPaginator {
    pub fn new(provider: Arc<dyn GeniusProvider>, settings: CrawlSettings) -> Self {
        Self { provider, settings }
    }

    /// Returns the songs whose primary artist is `artist_id`, each id once.
    ///
    /// Failed pages are logged and contribute nothing, they never fail the
    /// whole catalog.
    pub async fn fetch_catalog(&self, artist_id: GeniusId) -> Vec<SongInfo> {
        let pages: Vec<u32> = (0..=self.settings.max_pages_for_artist).collect();
        let probed = pages.len();

        let provider = self.provider.clone();
        let mut rx = fan_out(pages, self.settings.channel_buffer_size, move |page| {
            let provider = provider.clone();
            async move {
                provider
                    .artist_songs_page(artist_id, page)
                    .await
                    .map_err(|err| format!("listing page {} of artist {}: {}", page, artist_id, err))
            }
        });

        // Single consumer: the id set is only touched here.
        let mut accepted_ids: HashSet<GeniusId> = HashSet::new();
        let mut catalog = Vec::new();
        let mut delivered_pages = 0;
        let mut foreign_rows = 0;

        while let Some(page) = rx.recv().await {
            delivered_pages += 1;
            for row in page.songs {
                if row.primary_artist.id != artist_id {
                    foreign_rows += 1;
                    continue;
                }
                if accepted_ids.insert(row.id) {
                    catalog.push(SongInfo::from(row));
                }
            }
        }

        debug!(artist_id, foreign_rows, "Skipped rows of other primary artists");
        info!(
            artist_id,
            probed,
            delivered_pages,
            songs = catalog.len(),
            "Artist catalog fetched"
        );
        catalog
    }
}
