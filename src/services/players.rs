// src/services/players.rs

//! Player identity lookup.

use std::sync::Arc;
use std::time::Duration;

use crate::cache::ExpiringCache;
use crate::error::{AppError, Result};
use crate::models::{PlayerIdentity, PlayerSearchResult};
use crate::utils::{Fetcher, fetch_as};

/// Resolves player names to identities through the player search endpoint.
pub struct PlayerDirectory {
    fetcher: Arc<dyn Fetcher>,
    cache: ExpiringCache<String, PlayerIdentity>,
}

impl PlayerDirectory {
    pub fn new(fetcher: Arc<dyn Fetcher>, ttl: Duration) -> Self {
        Self {
            fetcher,
            cache: ExpiringCache::new("players", ttl),
        }
    }

    /// Identity of the first search result for `name`.
    ///
    /// An empty search result is `PlayerNotFound` and is not cached.
    pub async fn resolve(&self, name: &str) -> Result<PlayerIdentity> {
        self.cache
            .get_or_try_insert_with(name.to_string(), || self.search(name))
            .await
    }

    async fn search(&self, name: &str) -> Result<PlayerIdentity> {
        let query = [("search", name.to_string())];
        let results: Vec<PlayerSearchResult> =
            fetch_as(self.fetcher.as_ref(), "players/find", &query).await?;

        let identity: PlayerIdentity = results
            .into_iter()
            .next()
            .map(|result| result.player.into())
            .ok_or_else(|| AppError::player_not_found(name))?;

        log::info!("Resolved player {} -> {}", name, identity.id);
        Ok(identity)
    }

    pub fn cache(&self) -> &ExpiringCache<String, PlayerIdentity> {
        &self.cache
    }
}
