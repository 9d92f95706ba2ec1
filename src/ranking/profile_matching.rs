use crate::core::{FactorKey, Player, RankedPlayer, ScoreKey, Scores};
use crate::error::Result;
use crate::ranking::Ranker;
use crate::scoring::{average, gap_to_weight, round2};
use crate::settings::ProfileMatchingSettings;

/// Weighted profile matching against the ideal reference table
pub struct ProfileMatchingRanker;

impl ProfileMatchingRanker {
    pub fn new() -> Self {
        Self
    }

    /// Score a single player. Any non-finite stat fails the whole call.
    pub fn score(&self, settings: &ProfileMatchingSettings, player: &Player) -> Result<Scores> {
        let core_avg = group_average(&settings.core_factors, player)?;
        let secondary_avg = group_average(&settings.secondary_factors, player)?;

        let total = if settings.has_no_factors() {
            0.0
        } else {
            core_avg * settings.weight_core + secondary_avg * settings.weight_secondary
        };

        Ok(Scores {
            core: round2(core_avg),
            secondary: round2(secondary_avg),
            total: round2(total),
        })
    }
}

impl Default for ProfileMatchingRanker {
    fn default() -> Self {
        Self::new()
    }
}

fn group_average(factors: &[FactorKey], player: &Player) -> Result<f64> {
    let weights = factors
        .iter()
        .map(|key| key.gap(player).map(gap_to_weight))
        .collect::<Result<Vec<f64>>>()?;

    Ok(average(&weights))
}

impl Ranker for ProfileMatchingRanker {
    fn rank(&self, settings: &ProfileMatchingSettings, players: &[Player]) -> Result<Vec<RankedPlayer>> {
        let mut ranked = players
            .iter()
            .map(|player| {
                Ok(RankedPlayer {
                    player_id: player.id,
                    full_name: player.full_name.clone(),
                    position: player.position.clone(),
                    scores: self.score(settings, player)?,
                })
            })
            .collect::<Result<Vec<RankedPlayer>>>()?;

        // Stable: ties keep fetch order
        ranked.sort_by(|a, b| RankedPlayer::cmp_desc(a, b, ScoreKey::Total));

        Ok(ranked)
    }

    fn name(&self) -> &str {
        "profile_matching"
    }
}
