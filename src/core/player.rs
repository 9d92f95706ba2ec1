use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Stored player record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Store-assigned id
    pub id: i64,

    pub full_name: String,

    /// Role on the team (free-form label)
    pub position: String,

    /// Win rate percentage (0-100)
    pub win_rate: f64,

    /// Ladder rank points, compared against an ideal rather than ordered
    pub rank: f64,

    pub kda: f64,

    /// "Nasional" | "Provinsi" | "Kota" | anything else
    #[serde(default)]
    pub tournament_certificate: Option<String>,

    #[serde(default)]
    pub tournament_experience_count: Option<u32>,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Player {
    /// Create a player with the required stats and no tournament history
    pub fn new(
        id: i64,
        full_name: impl Into<String>,
        position: impl Into<String>,
        win_rate: f64,
        rank: f64,
        kda: f64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            full_name: full_name.into(),
            position: position.into(),
            win_rate,
            rank,
            kda,
            tournament_certificate: None,
            tournament_experience_count: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Get display name (for logging/UI)
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.full_name, self.position)
    }

    /// Case-insensitive substring match on name or position.
    /// A blank query matches everyone.
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.full_name.to_lowercase().contains(&query)
            || self.position.to_lowercase().contains(&query)
    }
}

/// Payload for inserting a player
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewPlayer {
    pub full_name: String,
    pub position: String,
    pub win_rate: f64,
    pub rank: f64,
    pub kda: f64,
    #[serde(default)]
    pub tournament_certificate: Option<String>,
    #[serde(default)]
    pub tournament_experience_count: Option<u32>,
}

impl NewPlayer {
    pub fn new(
        full_name: impl Into<String>,
        position: impl Into<String>,
        win_rate: f64,
        rank: f64,
        kda: f64,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            position: position.into(),
            win_rate,
            rank,
            kda,
            tournament_certificate: None,
            tournament_experience_count: None,
        }
    }

    pub fn with_tournaments(mut self, certificate: Option<&str>, experience_count: Option<u32>) -> Self {
        self.tournament_certificate = certificate.map(str::to_string);
        self.tournament_experience_count = experience_count;
        self
    }

    /// Trim text fields and check the stat ranges
    pub fn validated(self) -> Result<Self> {
        let full_name = required_text("fullName", &self.full_name)?;
        let position = required_text("position", &self.position)?;
        check_stats(self.win_rate, self.rank, self.kda)?;

        Ok(Self {
            full_name,
            position,
            tournament_certificate: optional_text(self.tournament_certificate.as_deref()),
            ..self
        })
    }
}

/// Partial update; `None` leaves the stored value untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerUpdate {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub win_rate: Option<f64>,
    #[serde(default)]
    pub rank: Option<f64>,
    #[serde(default)]
    pub kda: Option<f64>,
    #[serde(default)]
    pub tournament_certificate: Option<String>,
    #[serde(default)]
    pub tournament_experience_count: Option<u32>,
}

impl PlayerUpdate {
    /// Merge onto an existing record and re-validate the result
    pub fn apply(&self, current: &Player) -> Result<Player> {
        let mut player = current.clone();

        if let Some(name) = &self.full_name {
            player.full_name = required_text("fullName", name)?;
        }
        if let Some(position) = &self.position {
            player.position = required_text("position", position)?;
        }
        if let Some(win_rate) = self.win_rate {
            player.win_rate = win_rate;
        }
        if let Some(rank) = self.rank {
            player.rank = rank;
        }
        if let Some(kda) = self.kda {
            player.kda = kda;
        }
        if let Some(cert) = &self.tournament_certificate {
            player.tournament_certificate = optional_text(Some(cert));
        }
        if let Some(count) = self.tournament_experience_count {
            player.tournament_experience_count = Some(count);
        }

        check_stats(player.win_rate, player.rank, player.kda)?;
        player.updated_at = Utc::now();

        Ok(player)
    }
}

fn required_text(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::validation(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn check_stats(win_rate: f64, rank: f64, kda: f64) -> Result<()> {
    if !win_rate.is_finite() || !(0.0..=100.0).contains(&win_rate) {
        return Err(EngineError::validation(format!(
            "winRate must be between 0 and 100, got {}",
            win_rate
        )));
    }
    if !rank.is_finite() || rank < 0.0 {
        return Err(EngineError::validation(format!("rank must be >= 0, got {}", rank)));
    }
    if !kda.is_finite() || kda < 0.0 {
        return Err(EngineError::validation(format!("kda must be >= 0, got {}", kda)));
    }
    Ok(())
}
