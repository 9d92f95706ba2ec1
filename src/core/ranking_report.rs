use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{RankedPlayer, ScoreKey};
use crate::scoring::round2;

/// Ranking result with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingReport {
    /// Players ordered by total score, highest first
    pub players: Vec<RankedPlayer>,

    /// Ranker used (profile_matching)
    pub ranking_method: String,

    pub player_count: usize,

    /// Computation latency in milliseconds
    pub latency_ms: f64,

    pub generated_at: DateTime<Utc>,
}

/// Dashboard-style aggregate over a ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingSummary {
    pub total_players: usize,
    pub avg_core: f64,
    pub avg_secondary: f64,
    pub top_player: Option<RankedPlayer>,
}

impl RankingReport {
    pub fn new(players: Vec<RankedPlayer>, ranking_method: impl Into<String>, latency_ms: f64) -> Self {
        Self {
            player_count: players.len(),
            players,
            ranking_method: ranking_method.into(),
            latency_ms,
            generated_at: Utc::now(),
        }
    }

    pub fn summary(&self) -> RankingSummary {
        let total_players = self.players.len();
        let mean = |key: ScoreKey| {
            if total_players == 0 {
                0.0
            } else {
                let sum: f64 = self.players.iter().map(|p| p.scores.get(key)).sum();
                round2(sum / total_players as f64)
            }
        };

        RankingSummary {
            total_players,
            avg_core: mean(ScoreKey::Core),
            avg_secondary: mean(ScoreKey::Secondary),
            top_player: self.players.first().cloned(),
        }
    }

    /// Keep only one position, preserving order
    pub fn filter_position(mut self, position: &str) -> Self {
        self.players.retain(|p| p.position == position);
        self.player_count = self.players.len();
        self
    }

    /// Re-sort by another score (stable, highest first)
    pub fn sorted_by(mut self, key: ScoreKey) -> Self {
        self.players.sort_by(|a, b| RankedPlayer::cmp_desc(a, b, key));
        self
    }

    /// First `n` players
    pub fn top(&self, n: usize) -> &[RankedPlayer] {
        &self.players[..n.min(self.players.len())]
    }

    /// Distinct positions in first-seen order
    pub fn positions(&self) -> Vec<String> {
        let mut positions: Vec<String> = Vec::new();
        for player in &self.players {
            if !positions.contains(&player.position) {
                positions.push(player.position.clone());
            }
        }
        positions
    }

    /// Get display string for logging
    pub fn display(&self) -> String {
        format!(
            "{} players ranked [{}] in {:.2}ms",
            self.player_count, self.ranking_method, self.latency_ms
        )
    }
}
