//! Service layer for standing lookups.
//!
//! Each service owns the caches of the entity it resolves:
//! - Player identity lookup (`PlayerDirectory`)
//! - Official campaign search and leaderboard IDs (`CampaignResolver`)
//! - Leaderboard page scanning (`LeaderboardScanner`)

mod campaigns;
mod leaderboards;
mod players;

pub use campaigns::CampaignResolver;
pub use leaderboards::LeaderboardScanner;
pub use players::PlayerDirectory;
