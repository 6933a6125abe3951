//! Leaderboard pages.

use serde::Deserialize;

/// Cache key of a leaderboard page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageKey {
    pub leaderboard_id: String,
    pub offset: u32,
}

impl PageKey {
    pub fn new(leaderboard_id: impl Into<String>, offset: u32) -> Self {
        Self {
            leaderboard_id: leaderboard_id.into(),
            offset,
        }
    }
}

/// A block of consecutive leaderboard entries, in rank order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeaderboardPage {
    #[serde(rename = "tops", default)]
    pub entries: Vec<LeaderboardEntry>,
}

impl LeaderboardPage {
    /// First entry belonging to `player_id`.
    pub fn find_player(&self, player_id: &str) -> Option<&LeaderboardEntry> {
        self.entries.iter().find(|entry| entry.player.id == player_id)
    }
}

/// One ranked player on a campaign leaderboard.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub player: LeaderboardPlayer,

    /// 1-based rank
    pub position: u32,

    #[serde(default)]
    pub points: u32,

    /// Summed record time in milliseconds
    #[serde(default)]
    pub time: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LeaderboardPlayer {
    pub id: String,

    #[serde(default)]
    pub name: String,
}
