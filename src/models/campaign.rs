//! Campaign listing and official campaign detail records.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A campaign as it appears in the campaign listing.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Campaign {
    pub id: u64,

    pub name: String,

    /// First-party campaign (as opposed to club/community)
    #[serde(rename = "official", default)]
    pub is_official: bool,

    #[serde(rename = "clubid", default)]
    pub club_id: u64,

    #[serde(rename = "clubname", default)]
    pub club_name: String,

    /// Publication time, Unix seconds
    #[serde(default)]
    pub timestamp: i64,

    #[serde(rename = "mapcount", default)]
    pub map_count: u32,
}

impl Campaign {
    /// Publication time, if the timestamp is in range.
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp, 0)
    }

    /// Case-insensitive exact name comparison.
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// One page of the campaign listing.
#[derive(Debug, Clone, Deserialize)]
pub struct CampaignListing {
    #[serde(default)]
    pub page: u32,

    #[serde(rename = "pageCount", default)]
    pub page_count: u32,

    #[serde(default)]
    pub campaigns: Vec<Campaign>,
}

impl CampaignListing {
    /// Keep only official campaigns, preserving upstream order.
    pub fn into_official(self) -> Vec<Campaign> {
        self.campaigns.into_iter().filter(|c| c.is_official).collect()
    }
}

/// Detail record of an official campaign.
#[derive(Debug, Clone, Deserialize)]
pub struct OfficialCampaign {
    pub id: u64,

    #[serde(default)]
    pub name: String,

    /// Identifier of the campaign's ranking table
    #[serde(rename = "leaderboarduid")]
    pub leaderboard_id: String,
}
