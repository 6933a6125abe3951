// src/services/campaigns.rs

//! Official campaign search and leaderboard ID resolution.

use std::sync::Arc;
use std::time::Duration;

use crate::cache::ExpiringCache;
use crate::error::Result;
use crate::models::{Campaign, CampaignListing, OfficialCampaign};
use crate::utils::{Fetcher, fetch_as};

/// Resource path of the first campaign listing page.
const LISTING_PATH: &str = "campaigns/0";

/// Finds official campaigns by name and maps them to leaderboard IDs.
pub struct CampaignResolver {
    fetcher: Arc<dyn Fetcher>,
    /// Whole official listing, stored and expired as one unit
    listing: ExpiringCache<(), Arc<[Campaign]>>,
    /// Campaign ID -> leaderboard ID
    leaderboard_ids: ExpiringCache<u64, String>,
}

impl CampaignResolver {
    pub fn new(fetcher: Arc<dyn Fetcher>, listing_ttl: Duration, leaderboard_id_ttl: Duration) -> Self {
        Self {
            fetcher,
            listing: ExpiringCache::new("campaigns", listing_ttl),
            leaderboard_ids: ExpiringCache::new("leaderboard_ids", leaderboard_id_ttl),
        }
    }

    /// All official campaigns, in upstream order.
    pub async fn official_campaigns(&self) -> Result<Arc<[Campaign]>> {
        if let Some(campaigns) = self.listing.get(&()) {
            return Ok(campaigns);
        }

        let listing: CampaignListing = fetch_as(self.fetcher.as_ref(), LISTING_PATH, &[]).await?;
        let campaigns: Arc<[Campaign]> = listing.into_official().into();
        log::info!("Fetched {} official campaigns", campaigns.len());

        // An empty listing is treated as a hiccup and fetched again next time.
        if !campaigns.is_empty() {
            self.listing.put((), Arc::clone(&campaigns));
        }
        Ok(campaigns)
    }

    /// Official campaigns whose name equals `name`, ignoring case.
    ///
    /// No match is an empty result, not an error.
    pub async fn find_campaigns(&self, name: &str) -> Result<Vec<Campaign>> {
        let campaigns = self.official_campaigns().await?;
        Ok(campaigns
            .iter()
            .filter(|campaign| campaign.name_matches(name))
            .cloned()
            .collect())
    }

    /// Leaderboard ID of an official campaign.
    pub async fn resolve_leaderboard_id(&self, campaign_id: u64) -> Result<String> {
        self.leaderboard_ids
            .get_or_try_insert_with(campaign_id, || async move {
                let path = format!("officialcampaign/{campaign_id}");
                let detail: OfficialCampaign = fetch_as(self.fetcher.as_ref(), &path, &[]).await?;
                log::info!(
                    "Campaign {} ({}) uses leaderboard {}",
                    detail.id,
                    detail.name,
                    detail.leaderboard_id
                );
                Ok(detail.leaderboard_id)
            })
            .await
    }

    pub fn listing_cache(&self) -> &ExpiringCache<(), Arc<[Campaign]>> {
        &self.listing
    }

    pub fn leaderboard_id_cache(&self) -> &ExpiringCache<u64, String> {
        &self.leaderboard_ids
    }
}
