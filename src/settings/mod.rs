//! Profile matching settings: which factors are core vs secondary and how
//! much each group weighs in the total score.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::core::FactorKey;
use crate::error::{EngineError, Result};

/// Id of the one and only settings record
pub const SETTINGS_ID: i64 = 1;

/// Allowed drift of `weight_core + weight_secondary` from 1
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

pub const DEFAULT_WEIGHT_CORE: f64 = 0.6;
pub const DEFAULT_WEIGHT_SECONDARY: f64 = 0.4;

/// Singleton profile matching configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileMatchingSettings {
    pub id: i64,
    pub core_factors: Vec<FactorKey>,
    pub secondary_factors: Vec<FactorKey>,
    pub weight_core: f64,
    pub weight_secondary: f64,
    pub updated_at: DateTime<Utc>,
}

impl Default for ProfileMatchingSettings {
    fn default() -> Self {
        Self {
            id: SETTINGS_ID,
            core_factors: vec![FactorKey::WinRate, FactorKey::Kda, FactorKey::Rank],
            secondary_factors: vec![
                FactorKey::TournamentCertificate,
                FactorKey::TournamentExperienceCount,
            ],
            weight_core: DEFAULT_WEIGHT_CORE,
            weight_secondary: DEFAULT_WEIGHT_SECONDARY,
            updated_at: Utc::now(),
        }
    }
}

impl ProfileMatchingSettings {
    /// Both groups empty: every player scores 0
    pub fn has_no_factors(&self) -> bool {
        self.core_factors.is_empty() && self.secondary_factors.is_empty()
    }

    /// Factors assigned to neither group
    pub fn unassigned_factors(&self) -> Vec<FactorKey> {
        FactorKey::ALL
            .into_iter()
            .filter(|key| !self.core_factors.contains(key) && !self.secondary_factors.contains(key))
            .collect()
    }

    /// Validate and apply an update, returning the new settings value.
    ///
    /// Nothing is written here; the caller persists the result.
    pub fn apply(&self, update: &SettingsUpdate) -> Result<Self> {
        let weight_core = update.weight_core.unwrap_or(self.weight_core);
        let weight_secondary = update.weight_secondary.unwrap_or(self.weight_secondary);

        validate_groups(&update.core_factors, &update.secondary_factors)?;
        validate_weights(weight_core, weight_secondary)?;

        Ok(Self {
            id: self.id,
            core_factors: update.core_factors.clone(),
            secondary_factors: update.secondary_factors.clone(),
            weight_core,
            weight_secondary,
            updated_at: Utc::now(),
        })
    }
}

/// Replacement group assignment; omitted weights keep their stored values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub core_factors: Vec<FactorKey>,
    pub secondary_factors: Vec<FactorKey>,
    #[serde(default)]
    pub weight_core: Option<f64>,
    #[serde(default)]
    pub weight_secondary: Option<f64>,
}

impl SettingsUpdate {
    pub fn new(
        core_factors: Vec<FactorKey>,
        secondary_factors: Vec<FactorKey>,
        weight_core: f64,
        weight_secondary: f64,
    ) -> Self {
        Self {
            core_factors,
            secondary_factors,
            weight_core: Some(weight_core),
            weight_secondary: Some(weight_secondary),
        }
    }
}

fn validate_groups(core: &[FactorKey], secondary: &[FactorKey]) -> Result<()> {
    let core_set = unique_set("coreFactors", core)?;
    let secondary_set = unique_set("secondaryFactors", secondary)?;

    let mut shared: Vec<FactorKey> = core_set.intersection(&secondary_set).copied().collect();
    if !shared.is_empty() {
        shared.sort();
        let names: Vec<&str> = shared.iter().map(|key| key.as_str()).collect();
        return Err(EngineError::validation(format!(
            "factors assigned to both groups: {}",
            names.join(", ")
        )));
    }

    Ok(())
}

fn unique_set(field: &str, factors: &[FactorKey]) -> Result<HashSet<FactorKey>> {
    let mut set = HashSet::with_capacity(factors.len());
    for key in factors {
        if !set.insert(*key) {
            return Err(EngineError::validation(format!("{} lists {} twice", field, key)));
        }
    }
    Ok(set)
}

fn validate_weights(weight_core: f64, weight_secondary: f64) -> Result<()> {
    for (field, weight) in [("weightCore", weight_core), ("weightSecondary", weight_secondary)] {
        if !weight.is_finite() || !(0.0..=1.0).contains(&weight) {
            return Err(EngineError::validation(format!(
                "{} must be between 0 and 1, got {}",
                field, weight
            )));
        }
    }

    let sum = weight_core + weight_secondary;
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(EngineError::validation(format!(
            "weightCore + weightSecondary must equal 1, got {}",
            sum
        )));
    }

    Ok(())
}
