use crate::core::{NewPlayer, Player, PlayerUpdate, RankedPlayer, RankingReport};
use crate::error::{EngineError, Result};
use crate::ranking::{ProfileMatchingRanker, Ranker};
use crate::settings::{ProfileMatchingSettings, SettingsUpdate};
use crate::store::{PlayerRepository, SettingsRepository, SqliteStore};
use std::sync::Arc;
use std::time::Instant;

/// Main recruitment engine orchestrator
///
/// Settings are read from the store on every call and passed explicitly
/// into the ranker; nothing is cached in-process.
pub struct RecruitmentEngine {
    players: Arc<dyn PlayerRepository>,
    settings: Arc<dyn SettingsRepository>,
    ranker: Arc<dyn Ranker>,
}

impl RecruitmentEngine {
    /// Create engine backed by a SQLite database
    pub async fn open(db_path: impl AsRef<str>) -> Result<Self> {
        let store = Arc::new(SqliteStore::new(db_path.as_ref()).await?);
        Ok(Self::with_store(store))
    }

    /// Create engine over any store implementing both repositories
    pub fn with_store<S>(store: Arc<S>) -> Self
    where
        S: PlayerRepository + SettingsRepository + 'static,
    {
        Self {
            players: store.clone(),
            settings: store,
            ranker: Arc::new(ProfileMatchingRanker::new()),
        }
    }

    /// Current settings, created with defaults on first access
    pub async fn get_settings(&self) -> Result<ProfileMatchingSettings> {
        if let Some(settings) = self.settings.find_one().await? {
            return Ok(settings);
        }

        let settings = self.settings.create(&ProfileMatchingSettings::default()).await?;
        tracing::info!(
            "Initialized profile matching settings (core={:?}, secondary={:?})",
            settings.core_factors,
            settings.secondary_factors
        );
        Ok(settings)
    }

    /// Validate and persist new group assignments / weights
    pub async fn update_settings(&self, update: SettingsUpdate) -> Result<ProfileMatchingSettings> {
        let current = self.get_settings().await?;

        let next = current.apply(&update).map_err(|e| {
            tracing::warn!("Rejected settings update: {}", e);
            e
        })?;

        let saved = self.settings.save(&next).await?;
        tracing::info!(
            "Updated profile matching settings: core={:?} ({}), secondary={:?} ({})",
            saved.core_factors,
            saved.weight_core,
            saved.secondary_factors,
            saved.weight_secondary
        );
        Ok(saved)
    }

    /// All players ranked by total score, highest first
    pub async fn get_ranking(&self) -> Result<Vec<RankedPlayer>> {
        Ok(self.ranking_report().await?.players)
    }

    /// Ranking with timing metadata
    pub async fn ranking_report(&self) -> Result<RankingReport> {
        let start = Instant::now();

        let settings = self.get_settings().await?;
        let players = self.players.find_all().await?;

        let ranked = self.ranker.rank(&settings, &players).map_err(|e| {
            tracing::error!("Ranking failed: {}", e);
            e
        })?;

        let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
        let report = RankingReport::new(ranked, self.ranker.name(), latency_ms);
        tracing::debug!("{}", report.display());

        Ok(report)
    }

    pub async fn list_players(&self) -> Result<Vec<Player>> {
        self.players.find_all().await
    }

    /// Players whose name or position contains `query` (case-insensitive)
    pub async fn search_players(&self, query: &str) -> Result<Vec<Player>> {
        let mut players = self.players.find_all().await?;
        players.retain(|p| p.matches_search(query));
        tracing::debug!("Player search '{}' matched {}", query, players.len());
        Ok(players)
    }

    pub async fn get_player(&self, id: i64) -> Result<Player> {
        self.players
            .find_by_id(id)
            .await?
            .ok_or_else(|| EngineError::player_not_found(id))
    }

    pub async fn create_player(&self, player: NewPlayer) -> Result<Player> {
        let player = player.validated().map_err(|e| {
            tracing::warn!("Rejected player: {}", e);
            e
        })?;

        let created = self.players.insert(&player).await?;
        tracing::info!("Added player #{} {}", created.id, created.display_name());
        Ok(created)
    }

    pub async fn update_player(&self, id: i64, update: PlayerUpdate) -> Result<Player> {
        let updated = self
            .players
            .update_by_id(id, &update)
            .await?
            .ok_or_else(|| EngineError::player_not_found(id))?;

        tracing::info!("Updated player #{} {}", updated.id, updated.display_name());
        Ok(updated)
    }

    pub async fn delete_player(&self, id: i64) -> Result<()> {
        if !self.players.delete_by_id(id).await? {
            return Err(EngineError::player_not_found(id));
        }

        tracing::info!("Deleted player #{}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_engine_creation() {
        let result = RecruitmentEngine::open(":memory:").await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_settings_lazily_created() {
        let engine = RecruitmentEngine::open(":memory:").await.unwrap();

        let first = engine.get_settings().await.unwrap();
        let second = engine.get_settings().await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(first.updated_at, second.updated_at);
    }

    #[tokio::test]
    async fn test_search_players() {
        let engine = RecruitmentEngine::open(":memory:").await.unwrap();
        engine.create_player(NewPlayer::new("Andi Wijaya", "Jungler", 70.0, 450.0, 6.2)).await.unwrap();
        engine.create_player(NewPlayer::new("Budi", "Roamer", 55.0, 320.0, 3.1)).await.unwrap();
        engine.create_player(NewPlayer::new("Citra", "jungler", 62.0, 480.0, 4.4)).await.unwrap();

        let junglers: Vec<String> = engine
            .search_players("JUNGLER")
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.full_name)
            .collect();
        assert_eq!(junglers, vec!["Andi Wijaya", "Citra"]);

        let by_name = engine.search_players("wijaya").await.unwrap();
        assert_eq!(by_name.len(), 1);

        assert_eq!(engine.search_players("").await.unwrap().len(), 3);
        assert!(engine.search_players("mage").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_player_not_found() {
        let engine = RecruitmentEngine::open(":memory:").await.unwrap();

        assert!(matches!(engine.get_player(42).await, Err(EngineError::NotFound(_))));
        assert!(matches!(
            engine.update_player(42, PlayerUpdate::default()).await,
            Err(EngineError::NotFound(_))
        ));
        assert!(matches!(engine.delete_player(42).await, Err(EngineError::NotFound(_))));
    }
}
