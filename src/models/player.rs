//! Player search records and the cached identity.

use serde::Deserialize;

/// One result of the player search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerSearchResult {
    pub player: PlayerProfile,
}

/// Player profile as returned by the upstream service.
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerProfile {
    /// Display name, possibly with formatting codes
    pub name: String,

    /// Stable account identifier
    pub id: String,
}

/// Resolved player identity. `id` is the join key for leaderboard entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerIdentity {
    pub id: String,
    pub display_name: String,
}

impl From<PlayerProfile> for PlayerIdentity {
    fn from(profile: PlayerProfile) -> Self {
        Self {
            id: profile.id,
            display_name: profile.name,
        }
    }
}
