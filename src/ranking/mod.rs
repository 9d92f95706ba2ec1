pub mod profile_matching;

use crate::core::{Player, RankedPlayer};
use crate::error::Result;
use crate::settings::ProfileMatchingSettings;

pub use profile_matching::ProfileMatchingRanker;

/// Trait for player scoring/ranking implementations
pub trait Ranker: Send + Sync {
    /// Score every player and return them sorted by total (highest first)
    fn rank(&self, settings: &ProfileMatchingSettings, players: &[Player]) -> Result<Vec<RankedPlayer>>;

    /// Get ranker name for logging
    fn name(&self) -> &str;
}
