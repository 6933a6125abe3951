// src/lib.rs

//! trackrank: player standings in official Trackmania campaigns.
//!
//! ```no_run
//! use trackrank::{Config, StandingPipeline};
//!
//! # async fn example() -> trackrank::error::Result<()> {
//! let mut config = Config::load_or_default("trackrank.toml");
//! config.apply_env();
//!
//! let pipeline = StandingPipeline::from_config(&config)?;
//! let rank = pipeline.get_player_campaign_rank("Alice", "Summer 2024").await?;
//! println!("rank {rank}");
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod utils;

#[cfg(test)]
mod testing;

pub use error::{AppError, Result};
pub use models::Config;
pub use pipeline::StandingPipeline;
