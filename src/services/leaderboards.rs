// src/services/leaderboards.rs

//! Bounded leaderboard scan.

use std::sync::Arc;
use std::time::Duration;

use crate::cache::ExpiringCache;
use crate::error::Result;
use crate::models::{LeaderboardConfig, LeaderboardEntry, LeaderboardPage, PageKey};
use crate::utils::{Fetcher, fetch_as};

/// Looks for a player in the top pages of a leaderboard.
///
/// Pages are fetched `page_size` entries at a time and cached individually
/// under `(leaderboard_id, offset)`.
pub struct LeaderboardScanner {
    fetcher: Arc<dyn Fetcher>,
    pages: ExpiringCache<PageKey, Arc<LeaderboardPage>>,
    config: LeaderboardConfig,
}

impl LeaderboardScanner {
    pub fn new(fetcher: Arc<dyn Fetcher>, config: &LeaderboardConfig, page_ttl: Duration) -> Self {
        Self {
            fetcher,
            pages: ExpiringCache::new("leaderboard_pages", page_ttl),
            config: config.clone(),
        }
    }

    /// Deepest rank searched.
    pub fn horizon(&self) -> u32 {
        self.config.horizon()
    }

    /// Offsets scanned, in order.
    pub fn offsets(&self) -> impl Iterator<Item = u32> + use<> {
        self.config.offsets()
    }

    /// First entry for `player_id` within the horizon.
    ///
    /// `Ok(None)` means every page was read and the player was not on any of
    /// them. A failed page aborts the scan with that error.
    pub async fn find_player_entry(
        &self,
        leaderboard_id: &str,
        player_id: &str,
    ) -> Result<Option<LeaderboardEntry>> {
        for offset in self.offsets() {
            let page = self.page(leaderboard_id, offset).await?;
            if let Some(entry) = page.find_player(player_id) {
                log::debug!(
                    "Found {} at position {} in {} (offset {})",
                    player_id,
                    entry.position,
                    leaderboard_id,
                    offset
                );
                return Ok(Some(entry.clone()));
            }
        }
        Ok(None)
    }

    /// One page of `leaderboard_id` starting at `offset`.
    pub async fn page(&self, leaderboard_id: &str, offset: u32) -> Result<Arc<LeaderboardPage>> {
        let key = PageKey::new(leaderboard_id, offset);
        self.pages
            .get_or_try_insert_with(key, || async move {
                let path = format!("leaderboard/{leaderboard_id}");
                let query = [
                    ("offset", offset.to_string()),
                    ("length", self.config.page_size.to_string()),
                ];
                let page: LeaderboardPage = fetch_as(self.fetcher.as_ref(), &path, &query).await?;
                Ok(Arc::new(page))
            })
            .await
    }

    pub fn page_cache(&self) -> &ExpiringCache<PageKey, Arc<LeaderboardPage>> {
        &self.pages
    }
}
