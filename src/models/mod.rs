// src/models/mod.rs

//! Domain models for campaign standing lookups.
//!
//! Wire records decoded from the upstream service and the configuration
//! structures, re-exported from here.

mod campaign;
mod config;
mod leaderboard;
mod player;

// Re-export all public types
pub use campaign::{Campaign, CampaignListing, OfficialCampaign};
pub use config::{
    ApiConfig, BASE_URL_ENV, CONTACT_ENV, CacheConfig, Config, LeaderboardConfig, MAX_PAGE_SIZE,
};
pub use leaderboard::{LeaderboardEntry, LeaderboardPage, LeaderboardPlayer, PageKey};
pub use player::{PlayerIdentity, PlayerProfile, PlayerSearchResult};
