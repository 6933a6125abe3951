// src/error.rs

//! Unified error handling for campaign standing lookups.

use std::fmt;

use thiserror::Error;

/// Result type alias for lookup operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// HTTP request failed (connect, timeout, non-2xx status)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL construction failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Player search returned no results
    #[error("player not found: {name}")]
    PlayerNotFound { name: String },

    /// No official campaign carries the requested name
    #[error("campaign not found: {name}")]
    CampaignNotFound { name: String },

    /// The player is not within the scanned part of the leaderboard
    #[error("player not found in leaderboard top {horizon} ({player} in {campaign})")]
    NotInLeaderboard {
        player: String,
        campaign: String,
        horizon: u32,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// A lookup panicked and was stopped at the public boundary
    #[error("internal error in {operation}: {message}")]
    Internal { operation: String, message: String },
}

impl AppError {
    /// Create a player-not-found error.
    pub fn player_not_found(name: impl Into<String>) -> Self {
        Self::PlayerNotFound { name: name.into() }
    }

    /// Create a campaign-not-found error.
    pub fn campaign_not_found(name: impl Into<String>) -> Self {
        Self::CampaignNotFound { name: name.into() }
    }

    /// Create an error for a player missing from the scanned leaderboard pages.
    pub fn not_in_leaderboard(
        player: impl Into<String>,
        campaign: impl Into<String>,
        horizon: u32,
    ) -> Self {
        Self::NotInLeaderboard {
            player: player.into(),
            campaign: campaign.into(),
            horizon,
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an internal error for a caught fault.
    pub fn internal(operation: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Internal {
            operation: operation.into(),
            message: message.to_string(),
        }
    }

    /// True when the remote fetch failed at the network or decoding layer.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Json(_) | Self::Url(_))
    }

    /// True for any of the "entity not found" conditions.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::PlayerNotFound { .. } | Self::CampaignNotFound { .. } | Self::NotInLeaderboard { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_in_leaderboard_message() {
        let err = AppError::not_in_leaderboard("Alice", "Summer 2024", 500);
        assert!(
            err.to_string()
                .starts_with("player not found in leaderboard top 500")
        );
        assert!(err.is_not_found());
        assert!(!err.is_transport());
    }

    #[test]
    fn test_classification() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        assert!(AppError::from(json_err).is_transport());
        assert!(AppError::player_not_found("x").is_not_found());
        assert!(AppError::campaign_not_found("x").is_not_found());
        assert!(!AppError::internal("get_rank", "boom").is_not_found());
    }
}
