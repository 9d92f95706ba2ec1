//! # Profile Matching Engine
//!
//! Player recruitment ranking with:
//! - Gap-to-weight scoring against an ideal reference table
//! - Configurable core/secondary factor groups and group weights
//! - SQLite storage for players and the settings singleton
//! - Async/await architecture
//! - Multiple interfaces: Rust library, HTTP API, CLI
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use profile_matching_engine::{NewPlayer, RecruitmentEngine};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let engine = RecruitmentEngine::open("profile_matching.db").await?;
//!
//!     engine
//!         .create_player(NewPlayer::new("Rizky", "Jungler", 78.0, 510.0, 5.1))
//!         .await?;
//!
//!     for ranked in engine.get_ranking().await? {
//!         println!("{} - {:.2}", ranked.full_name, ranked.scores.total);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod ranking;
pub mod scoring;
pub mod settings;
pub mod store;

// Re-export primary types
pub use config::EngineConfig;
pub use crate::core::{
    FactorKey, NewPlayer, Player, PlayerUpdate, RankedPlayer, RankingReport, RankingSummary, ScoreKey, Scores,
};
pub use engine::RecruitmentEngine;
pub use error::{EngineError, Result};
pub use settings::{ProfileMatchingSettings, SettingsUpdate};
pub use store::SqliteStore;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
