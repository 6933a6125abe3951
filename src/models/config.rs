//! Application configuration structures.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Environment variable overriding `api.contact`.
pub const CONTACT_ENV: &str = "TRACKRANK_CONTACT";

/// Environment variable overriding `api.base_url`.
pub const BASE_URL_ENV: &str = "TRACKRANK_BASE_URL";

/// Largest page the leaderboard endpoint serves in one request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Upstream API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Cache lifetimes
    #[serde(default)]
    pub cache: CacheConfig,

    /// Leaderboard scan window
    #[serde(default)]
    pub leaderboard: LeaderboardConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(contact) = lookup(CONTACT_ENV) {
            self.api.contact = contact;
        }
        if let Some(base_url) = lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.api.base_url = base_url;
        }
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.api.base_url)
            .map_err(|e| AppError::validation(format!("api.base_url is invalid: {e}")))?;
        if self.api.timeout_secs == 0 {
            return Err(AppError::validation("api.timeout_secs must be > 0"));
        }
        let ttls = [
            ("cache.player_ttl_secs", self.cache.player_ttl_secs),
            ("cache.campaign_ttl_secs", self.cache.campaign_ttl_secs),
            ("cache.leaderboard_id_ttl_secs", self.cache.leaderboard_id_ttl_secs),
            (
                "cache.leaderboard_page_ttl_secs",
                self.cache.leaderboard_page_ttl_secs,
            ),
        ];
        for (name, secs) in ttls {
            if secs == 0 {
                return Err(AppError::validation(format!("{name} must be > 0")));
            }
        }
        if self.leaderboard.page_size == 0 {
            return Err(AppError::validation("leaderboard.page_size must be > 0"));
        }
        if self.leaderboard.page_size > MAX_PAGE_SIZE {
            return Err(AppError::validation(format!(
                "leaderboard.page_size must be <= {MAX_PAGE_SIZE}"
            )));
        }
        if self.leaderboard.max_pages == 0 {
            return Err(AppError::validation("leaderboard.max_pages must be > 0"));
        }
        if self
            .leaderboard
            .page_size
            .checked_mul(self.leaderboard.max_pages)
            .is_none()
        {
            return Err(AppError::validation(
                "leaderboard.page_size * leaderboard.max_pages overflows",
            ));
        }
        Ok(())
    }
}

/// Upstream API and HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every resource path is resolved against
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Contact handle sent in the User-Agent header
    #[serde(default)]
    pub contact: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// User-Agent identifying this client to the upstream service.
    pub fn user_agent(&self) -> String {
        let contact = self.contact.trim();
        if contact.is_empty() {
            defaults::user_agent()
        } else {
            format!("For questions about this project, contact me on Discord: {contact}")
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            contact: String::new(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Time-to-live of each cache, in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "defaults::player_ttl")]
    pub player_ttl_secs: u64,

    #[serde(default = "defaults::short_ttl")]
    pub campaign_ttl_secs: u64,

    #[serde(default = "defaults::short_ttl")]
    pub leaderboard_id_ttl_secs: u64,

    #[serde(default = "defaults::short_ttl")]
    pub leaderboard_page_ttl_secs: u64,
}

impl CacheConfig {
    pub fn player_ttl(&self) -> Duration {
        Duration::from_secs(self.player_ttl_secs)
    }

    pub fn campaign_ttl(&self) -> Duration {
        Duration::from_secs(self.campaign_ttl_secs)
    }

    pub fn leaderboard_id_ttl(&self) -> Duration {
        Duration::from_secs(self.leaderboard_id_ttl_secs)
    }

    pub fn leaderboard_page_ttl(&self) -> Duration {
        Duration::from_secs(self.leaderboard_page_ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            player_ttl_secs: defaults::player_ttl(),
            campaign_ttl_secs: defaults::short_ttl(),
            leaderboard_id_ttl_secs: defaults::short_ttl(),
            leaderboard_page_ttl_secs: defaults::short_ttl(),
        }
    }
}

/// Leaderboard paging. Only the first `page_size * max_pages` ranks are searched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardConfig {
    /// Entries requested per page
    #[serde(default = "defaults::page_size")]
    pub page_size: u32,

    /// Number of pages scanned before giving up
    #[serde(default = "defaults::max_pages")]
    pub max_pages: u32,
}

impl LeaderboardConfig {
    /// Deepest rank the scan can reach.
    pub fn horizon(&self) -> u32 {
        self.page_size.saturating_mul(self.max_pages)
    }

    /// Page offsets in scan order. Offsets that would not fit a `u32` are dropped.
    pub fn offsets(&self) -> impl Iterator<Item = u32> + use<> {
        let page_size = self.page_size;
        (0..self.max_pages).map_while(move |page| page.checked_mul(page_size))
    }
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            page_size: defaults::page_size(),
            max_pages: defaults::max_pages(),
        }
    }
}

mod defaults {
    // API defaults
    pub fn base_url() -> String {
        "https://trackmania.io/api/".into()
    }
    pub fn user_agent() -> String {
        concat!("trackrank/", env!("CARGO_PKG_VERSION")).into()
    }
    pub fn timeout() -> u64 {
        30
    }

    // Cache defaults
    pub fn player_ttl() -> u64 {
        48 * 60 * 60
    }
    pub fn short_ttl() -> u64 {
        5 * 60
    }

    // Leaderboard defaults
    pub fn page_size() -> u32 {
        100
    }
    pub fn max_pages() -> u32 {
        5
    }
}
