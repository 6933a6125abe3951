// src/pipeline/standing.rs

//! Player standing lookup: player -> campaign -> leaderboard ID -> pages.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;

use crate::error::{AppError, Result};
use crate::models::{Campaign, Config, LeaderboardEntry};
use crate::services::{CampaignResolver, LeaderboardScanner, PlayerDirectory};
use crate::utils::{Fetcher, HttpFetcher};

/// Answers "where does player P stand in campaign C".
///
/// Owns one cache per entity kind; independent pipelines share nothing.
/// Every public method reports panics as [`AppError::Internal`].
pub struct StandingPipeline {
    players: PlayerDirectory,
    campaigns: CampaignResolver,
    scanner: LeaderboardScanner,
}

impl StandingPipeline {
    /// Build a pipeline over any fetcher.
    pub fn new(fetcher: Arc<dyn Fetcher>, config: &Config) -> Self {
        let cache = &config.cache;
        Self {
            players: PlayerDirectory::new(Arc::clone(&fetcher), cache.player_ttl()),
            campaigns: CampaignResolver::new(
                Arc::clone(&fetcher),
                cache.campaign_ttl(),
                cache.leaderboard_id_ttl(),
            ),
            scanner: LeaderboardScanner::new(
                fetcher,
                &config.leaderboard,
                cache.leaderboard_page_ttl(),
            ),
        }
    }

    /// Build a pipeline talking HTTP to the configured upstream service.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let fetcher = HttpFetcher::new(&config.api)?;
        Ok(Self::new(Arc::new(fetcher), config))
    }

    /// Leaderboard position of `player` in the official campaign named `campaign`.
    pub async fn get_player_campaign_rank(&self, player: &str, campaign: &str) -> Result<u32> {
        guarded("get_player_campaign_rank", async {
            Ok(self.lookup_standing(player, campaign).await?.position)
        })
        .await
    }

    /// Campaign points of `player` in the official campaign named `campaign`.
    pub async fn get_player_campaign_points(&self, player: &str, campaign: &str) -> Result<u32> {
        guarded("get_player_campaign_points", async {
            Ok(self.lookup_standing(player, campaign).await?.points)
        })
        .await
    }

    /// The full leaderboard entry of `player` in `campaign`.
    pub async fn get_player_campaign_standing(
        &self,
        player: &str,
        campaign: &str,
    ) -> Result<LeaderboardEntry> {
        guarded(
            "get_player_campaign_standing",
            self.lookup_standing(player, campaign),
        )
        .await
    }

    /// Stable account ID of `player`.
    pub async fn get_player_id(&self, player: &str) -> Result<String> {
        guarded("get_player_id", async {
            Ok(self.players.resolve(player).await?.id)
        })
        .await
    }

    /// Upstream display name of `player`, formatting codes included.
    pub async fn get_formatted_name(&self, player: &str) -> Result<String> {
        guarded("get_formatted_name", async {
            Ok(self.players.resolve(player).await?.display_name)
        })
        .await
    }

    /// Official campaigns named `name` (case-insensitive). May be empty.
    pub async fn search_campaigns(&self, name: &str) -> Result<Vec<Campaign>> {
        guarded("search_campaigns", self.campaigns.find_campaigns(name)).await
    }

    /// Reset every cache to cold.
    pub fn clear_caches(&self) {
        self.players.cache().clear();
        self.campaigns.listing_cache().clear();
        self.campaigns.leaderboard_id_cache().clear();
        self.scanner.page_cache().clear();
    }

    pub fn players(&self) -> &PlayerDirectory {
        &self.players
    }

    pub fn campaigns(&self) -> &CampaignResolver {
        &self.campaigns
    }

    pub fn scanner(&self) -> &LeaderboardScanner {
        &self.scanner
    }

    async fn lookup_standing(&self, player: &str, campaign: &str) -> Result<LeaderboardEntry> {
        let identity = self.players.resolve(player).await?;

        // Several campaigns can share a name; the first in listing order wins.
        let matched = self
            .campaigns
            .find_campaigns(campaign)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::campaign_not_found(campaign))?;
        log::debug!(
            "Campaign {:?} -> {} (published {:?})",
            campaign,
            matched.id,
            matched.published_at()
        );

        let leaderboard_id = self.campaigns.resolve_leaderboard_id(matched.id).await?;

        self.scanner
            .find_player_entry(&leaderboard_id, &identity.id)
            .await?
            .ok_or_else(|| AppError::not_in_leaderboard(player, campaign, self.scanner.horizon()))
    }
}

/// Run a lookup, turning a panic inside it into a typed error.
async fn guarded<T>(operation: &'static str, lookup: impl Future<Output = Result<T>>) -> Result<T> {
    match AssertUnwindSafe(lookup).catch_unwind().await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => {
            log::warn!("{} failed: {}", operation, e);
            Err(e)
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            log::error!("{} panicked: {}", operation, message);
            Err(AppError::internal(operation, message))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
