//! Pipeline entry points for standing lookups.
//!
//! - `get_player_campaign_rank`: leaderboard position of a player in a campaign
//! - `get_player_campaign_points`: campaign points of a player in a campaign

pub mod standing;

pub use standing::StandingPipeline;
