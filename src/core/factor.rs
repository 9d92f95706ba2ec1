use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::Player;
use crate::error::{EngineError, Result};
use crate::scoring::cert_to_number;

/// Player attribute that can be assigned to a profile matching group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FactorKey {
    WinRate,
    Kda,
    Rank,
    TournamentCertificate,
    TournamentExperienceCount,
}

impl FactorKey {
    /// Every factor, in canonical order
    pub const ALL: [FactorKey; 5] = [
        FactorKey::WinRate,
        FactorKey::Kda,
        FactorKey::Rank,
        FactorKey::TournamentCertificate,
        FactorKey::TournamentExperienceCount,
    ];

    /// Reference target the player's value is compared against
    pub fn ideal(self) -> f64 {
        match self {
            FactorKey::WinRate => 80.0,
            FactorKey::Kda => 5.5,
            FactorKey::Rank => 500.0,
            FactorKey::TournamentCertificate => 3.0,
            FactorKey::TournamentExperienceCount => 20.0,
        }
    }

    /// Numeric value of this factor for a player.
    ///
    /// The certificate goes through [`cert_to_number`], a missing
    /// experience count counts as 0.
    pub fn raw_value(self, player: &Player) -> f64 {
        match self {
            FactorKey::WinRate => player.win_rate,
            FactorKey::Kda => player.kda,
            FactorKey::Rank => player.rank,
            FactorKey::TournamentCertificate => {
                cert_to_number(player.tournament_certificate.as_deref())
            }
            FactorKey::TournamentExperienceCount => {
                player.tournament_experience_count.unwrap_or(0) as f64
            }
        }
    }

    /// Signed distance from the ideal, rejecting non-finite stats
    pub fn gap(self, player: &Player) -> Result<f64> {
        let value = self.raw_value(player);
        if !value.is_finite() {
            return Err(EngineError::Computation(format!(
                "player {} has non-finite {}: {}",
                player.id, self, value
            )));
        }
        Ok(value - self.ideal())
    }

    /// Wire name (camelCase)
    pub fn as_str(self) -> &'static str {
        match self {
            FactorKey::WinRate => "winRate",
            FactorKey::Kda => "kda",
            FactorKey::Rank => "rank",
            FactorKey::TournamentCertificate => "tournamentCertificate",
            FactorKey::TournamentExperienceCount => "tournamentExperienceCount",
        }
    }
}

impl fmt::Display for FactorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FactorKey {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        FactorKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| EngineError::validation(format!("unknown factor key: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        let mut player = Player::new(1, "Rizky", "Jungler", 72.5, 480.0, 4.0);
        player.tournament_certificate = Some("Provinsi".to_string());
        player
    }

    #[test]
    fn test_ideal_table() {
        assert_eq!(FactorKey::WinRate.ideal(), 80.0);
        assert_eq!(FactorKey::Kda.ideal(), 5.5);
        assert_eq!(FactorKey::Rank.ideal(), 500.0);
        assert_eq!(FactorKey::TournamentCertificate.ideal(), 3.0);
        assert_eq!(FactorKey::TournamentExperienceCount.ideal(), 20.0);
    }

    #[test]
    fn test_raw_values() {
        let p = player();
        assert_eq!(FactorKey::WinRate.raw_value(&p), 72.5);
        assert_eq!(FactorKey::Rank.raw_value(&p), 480.0);
        assert_eq!(FactorKey::TournamentCertificate.raw_value(&p), 2.0);
        assert_eq!(FactorKey::TournamentExperienceCount.raw_value(&p), 0.0);
    }

    #[test]
    fn test_gap_rejects_nan() {
        let mut p = player();
        p.kda = f64::NAN;
        assert!(matches!(FactorKey::Kda.gap(&p), Err(EngineError::Computation(_))));
        assert_eq!(FactorKey::WinRate.gap(&p).unwrap(), -7.5);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&FactorKey::TournamentExperienceCount).unwrap();
        assert_eq!(json, "\"tournamentExperienceCount\"");

        let key: FactorKey = serde_json::from_str("\"winRate\"").unwrap();
        assert_eq!(key, FactorKey::WinRate);

        assert!(serde_json::from_str::<FactorKey>("\"height\"").is_err());
    }

    #[test]
    fn test_from_str_matches_display() {
        for key in FactorKey::ALL {
            assert_eq!(key.to_string().parse::<FactorKey>().unwrap(), key);
        }
        assert!("WINRATE".parse::<FactorKey>().is_err());
    }
}
