use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

/// Group averages and weighted total, each rounded to 2 decimal places
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Scores {
    pub core: f64,
    pub secondary: f64,
    pub total: f64,
}

impl Scores {
    pub fn get(&self, key: ScoreKey) -> f64 {
        match key {
            ScoreKey::Core => self.core,
            ScoreKey::Secondary => self.secondary,
            ScoreKey::Total => self.total,
        }
    }
}

/// Which score to order a ranking by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreKey {
    Core,
    Secondary,
    #[default]
    Total,
}

impl FromStr for ScoreKey {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "core" => Ok(ScoreKey::Core),
            "secondary" => Ok(ScoreKey::Secondary),
            "total" => Ok(ScoreKey::Total),
            other => Err(EngineError::validation(format!("unknown score key: {}", other))),
        }
    }
}

impl fmt::Display for ScoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScoreKey::Core => "core",
            ScoreKey::Secondary => "secondary",
            ScoreKey::Total => "total",
        };
        f.write_str(name)
    }
}

/// Player with computed profile matching scores (derived, never stored)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedPlayer {
    pub player_id: i64,
    pub full_name: String,
    pub position: String,
    pub scores: Scores,
}

impl RankedPlayer {
    /// Descending by the chosen score. Equal scores compare `Equal`, so a
    /// stable sort keeps input order for ties.
    pub fn cmp_desc(a: &RankedPlayer, b: &RankedPlayer, key: ScoreKey) -> Ordering {
        b.scores.get(key).total_cmp(&a.scores.get(key))
    }

    pub fn display(&self) -> String {
        format!(
            "{} [{}] core={:.2} secondary={:.2} total={:.2}",
            self.full_name, self.position, self.scores.core, self.scores.secondary, self.scores.total
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(id: i64, total: f64) -> RankedPlayer {
        RankedPlayer {
            player_id: id,
            full_name: format!("Player {}", id),
            position: "Mid".to_string(),
            scores: Scores { core: total, secondary: 0.0, total },
        }
    }

    #[test]
    fn test_cmp_desc() {
        let mut players = vec![ranked(1, 1.5), ranked(2, 4.0), ranked(3, 1.5)];
        players.sort_by(|a, b| RankedPlayer::cmp_desc(a, b, ScoreKey::Total));
        let ids: Vec<i64> = players.iter().map(|p| p.player_id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_score_key_parse() {
        assert_eq!("Core".parse::<ScoreKey>().unwrap(), ScoreKey::Core);
        assert_eq!("total".parse::<ScoreKey>().unwrap(), ScoreKey::Total);
        assert!("kda".parse::<ScoreKey>().is_err());
    }

    #[test]
    fn test_serialize_shape() {
        let json = serde_json::to_value(ranked(9, 2.7)).unwrap();
        assert_eq!(json["playerId"], 9);
        assert_eq!(json["scores"]["total"], 2.7);
    }
}
