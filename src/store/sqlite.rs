use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::core::{FactorKey, NewPlayer, Player, PlayerUpdate};
use crate::error::{EngineError, Result};
use crate::settings::{ProfileMatchingSettings, SETTINGS_ID};
use crate::store::{PlayerRepository, SettingsRepository};

const PLAYER_COLUMNS: &str = "id, full_name, position, win_rate, rank, kda,
    tournament_certificate, tournament_experience_count, created_at, updated_at";

/// SQLite-backed player and settings store
///
/// Schema:
/// ```sql
/// CREATE TABLE players (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     full_name TEXT NOT NULL,
///     position TEXT NOT NULL,
///     win_rate REAL NOT NULL,
///     rank REAL NOT NULL,
///     kda REAL NOT NULL,
///     tournament_certificate TEXT,
///     tournament_experience_count INTEGER,
///     created_at TEXT NOT NULL,
///     updated_at TEXT NOT NULL
/// );
/// CREATE TABLE profile_matching_settings (
///     id INTEGER PRIMARY KEY CHECK (id = 1),
///     core_factors TEXT NOT NULL,      -- JSON array of factor keys
///     secondary_factors TEXT NOT NULL, -- JSON array of factor keys
///     weight_core REAL NOT NULL,
///     weight_secondary REAL NOT NULL,
///     updated_at TEXT NOT NULL
/// );
/// ```
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) the database and its tables
    pub async fn new(db_path: &str) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS players (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                full_name TEXT NOT NULL,
                position TEXT NOT NULL,
                win_rate REAL NOT NULL,
                rank REAL NOT NULL,
                kda REAL NOT NULL,
                tournament_certificate TEXT,
                tournament_experience_count INTEGER,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS profile_matching_settings (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                core_factors TEXT NOT NULL,
                secondary_factors TEXT NOT NULL,
                weight_core REAL NOT NULL,
                weight_secondary REAL NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;

        tracing::debug!("Opened player store at {}", db_path);

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| EngineError::Other("player store connection poisoned".to_string()))
    }
}

fn parse_timestamp(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

fn player_from_row(row: &Row<'_>) -> rusqlite::Result<Player> {
    let created_at: String = row.get(8)?;
    let updated_at: String = row.get(9)?;

    Ok(Player {
        id: row.get(0)?,
        full_name: row.get(1)?,
        position: row.get(2)?,
        win_rate: row.get(3)?,
        rank: row.get(4)?,
        kda: row.get(5)?,
        tournament_certificate: row.get(6)?,
        tournament_experience_count: row.get(7)?,
        created_at: parse_timestamp(&created_at),
        updated_at: parse_timestamp(&updated_at),
    })
}

fn factors_from_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Vec<FactorKey>> {
    let json: String = row.get(idx)?;
    serde_json::from_str(&json)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn settings_from_row(row: &Row<'_>) -> rusqlite::Result<ProfileMatchingSettings> {
    let updated_at: String = row.get(5)?;

    Ok(ProfileMatchingSettings {
        id: row.get(0)?,
        core_factors: factors_from_column(row, 1)?,
        secondary_factors: factors_from_column(row, 2)?,
        weight_core: row.get(3)?,
        weight_secondary: row.get(4)?,
        updated_at: parse_timestamp(&updated_at),
    })
}

fn fetch_player(conn: &Connection, id: i64) -> Result<Option<Player>> {
    let player = conn
        .query_row(
            &format!("SELECT {} FROM players WHERE id = ?", PLAYER_COLUMNS),
            params![id],
            player_from_row,
        )
        .optional()?;

    Ok(player)
}

fn fetch_settings(conn: &Connection) -> Result<Option<ProfileMatchingSettings>> {
    let settings = conn
        .query_row(
            "SELECT id, core_factors, secondary_factors, weight_core, weight_secondary, updated_at
             FROM profile_matching_settings
             WHERE id = ?",
            params![SETTINGS_ID],
            settings_from_row,
        )
        .optional()?;

    Ok(settings)
}

#[async_trait]
impl PlayerRepository for SqliteStore {
    async fn find_all(&self) -> Result<Vec<Player>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(&format!("SELECT {} FROM players ORDER BY id", PLAYER_COLUMNS))?;
        let players = stmt
            .query_map([], player_from_row)?
            .collect::<rusqlite::Result<Vec<Player>>>()?;

        Ok(players)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Player>> {
        let conn = self.conn()?;
        fetch_player(&conn, id)
    }

    async fn insert(&self, player: &NewPlayer) -> Result<Player> {
        let conn = self.conn()?;
        let now = Utc::now();

        conn.execute(
            "INSERT INTO players (full_name, position, win_rate, rank, kda,
                tournament_certificate, tournament_experience_count, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
            params![
                player.full_name,
                player.position,
                player.win_rate,
                player.rank,
                player.kda,
                player.tournament_certificate,
                player.tournament_experience_count,
                now.to_rfc3339(),
            ],
        )?;

        Ok(Player {
            id: conn.last_insert_rowid(),
            full_name: player.full_name.clone(),
            position: player.position.clone(),
            win_rate: player.win_rate,
            rank: player.rank,
            kda: player.kda,
            tournament_certificate: player.tournament_certificate.clone(),
            tournament_experience_count: player.tournament_experience_count,
            created_at: now,
            updated_at: now,
        })
    }

    async fn update_by_id(&self, id: i64, update: &PlayerUpdate) -> Result<Option<Player>> {
        let conn = self.conn()?;

        let Some(current) = fetch_player(&conn, id)? else {
            return Ok(None);
        };
        let updated = update.apply(&current)?;

        conn.execute(
            "UPDATE players SET full_name = ?2, position = ?3, win_rate = ?4, rank = ?5, kda = ?6,
                tournament_certificate = ?7, tournament_experience_count = ?8, updated_at = ?9
             WHERE id = ?1",
            params![
                id,
                updated.full_name,
                updated.position,
                updated.win_rate,
                updated.rank,
                updated.kda,
                updated.tournament_certificate,
                updated.tournament_experience_count,
                updated.updated_at.to_rfc3339(),
            ],
        )?;

        Ok(Some(updated))
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM players WHERE id = ?", params![id])?;
        Ok(deleted > 0)
    }
}

#[async_trait]
impl SettingsRepository for SqliteStore {
    async fn find_one(&self) -> Result<Option<ProfileMatchingSettings>> {
        let conn = self.conn()?;
        fetch_settings(&conn)
    }

    async fn create(&self, settings: &ProfileMatchingSettings) -> Result<ProfileMatchingSettings> {
        let conn = self.conn()?;

        let inserted = conn.execute(
            "INSERT OR IGNORE INTO profile_matching_settings
                (id, core_factors, secondary_factors, weight_core, weight_secondary, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                SETTINGS_ID,
                serde_json::to_string(&settings.core_factors)?,
                serde_json::to_string(&settings.secondary_factors)?,
                settings.weight_core,
                settings.weight_secondary,
                settings.updated_at.to_rfc3339(),
            ],
        )?;

        if inserted == 0 {
            tracing::debug!("Settings already present, keeping stored record");
        }

        fetch_settings(&conn)?
            .ok_or_else(|| EngineError::Other("settings vanished after insert".to_string()))
    }

    async fn save(&self, settings: &ProfileMatchingSettings) -> Result<ProfileMatchingSettings> {
        let conn = self.conn()?;

        conn.execute(
            "INSERT INTO profile_matching_settings
                (id, core_factors, secondary_factors, weight_core, weight_secondary, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(id) DO UPDATE SET
                core_factors = excluded.core_factors,
                secondary_factors = excluded.secondary_factors,
                weight_core = excluded.weight_core,
                weight_secondary = excluded.weight_secondary,
                updated_at = excluded.updated_at",
            params![
                SETTINGS_ID,
                serde_json::to_string(&settings.core_factors)?,
                serde_json::to_string(&settings.secondary_factors)?,
                settings.weight_core,
                settings.weight_secondary,
                settings.updated_at.to_rfc3339(),
            ],
        )?;

        Ok(ProfileMatchingSettings {
            id: SETTINGS_ID,
            ..settings.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_create() {
        let store = SqliteStore::new(":memory:").await.unwrap();
        assert!(store.find_all().await.unwrap().is_empty());
        assert!(store.find_one().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let store = SqliteStore::new(":memory:").await.unwrap();

        let new = NewPlayer::new("Andi", "Jungler", 70.0, 450.0, 6.2).with_tournaments(Some("Kota"), Some(5));
        let inserted = store.insert(&new).await.unwrap();

        let found = store.find_by_id(inserted.id).await.unwrap().unwrap();
        assert_eq!(found.full_name, "Andi");
        assert_eq!(found.tournament_certificate.as_deref(), Some("Kota"));
        assert_eq!(found.tournament_experience_count, Some(5));
        assert!(store.find_by_id(inserted.id + 100).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_all_keeps_insertion_order() {
        let store = SqliteStore::new(":memory:").await.unwrap();

        for name in ["Citra", "Agus", "Bayu"] {
            store.insert(&NewPlayer::new(name, "Mid", 50.0, 100.0, 2.0)).await.unwrap();
        }

        let names: Vec<String> = store.find_all().await.unwrap().into_iter().map(|p| p.full_name).collect();
        assert_eq!(names, vec!["Citra", "Agus", "Bayu"]);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let store = SqliteStore::new(":memory:").await.unwrap();
        let player = store.insert(&NewPlayer::new("Eka", "Roamer", 40.0, 300.0, 1.5)).await.unwrap();

        let update = PlayerUpdate {
            position: Some("Gold Laner".to_string()),
            ..Default::default()
        };
        let updated = store.update_by_id(player.id, &update).await.unwrap().unwrap();
        assert_eq!(updated.position, "Gold Laner");
        assert_eq!(store.find_by_id(player.id).await.unwrap().unwrap().position, "Gold Laner");

        assert!(store.update_by_id(999, &update).await.unwrap().is_none());

        assert!(store.delete_by_id(player.id).await.unwrap());
        assert!(!store.delete_by_id(player.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_invalid_update_leaves_record_untouched() {
        let store = SqliteStore::new(":memory:").await.unwrap();
        let player = store.insert(&NewPlayer::new("Eka", "Roamer", 40.0, 300.0, 1.5)).await.unwrap();

        let update = PlayerUpdate {
            win_rate: Some(140.0),
            ..Default::default()
        };
        assert!(store.update_by_id(player.id, &update).await.is_err());
        assert_eq!(store.find_by_id(player.id).await.unwrap().unwrap().win_rate, 40.0);
    }

    #[tokio::test]
    async fn test_settings_create_is_idempotent() {
        let store = SqliteStore::new(":memory:").await.unwrap();

        let first = store.create(&ProfileMatchingSettings::default()).await.unwrap();

        let mut other = ProfileMatchingSettings::default();
        other.weight_core = 0.9;
        other.weight_secondary = 0.1;
        let second = store.create(&other).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.weight_core, 0.6);
    }

    #[tokio::test]
    async fn test_settings_save_overwrites() {
        let store = SqliteStore::new(":memory:").await.unwrap();
        store.create(&ProfileMatchingSettings::default()).await.unwrap();

        let mut settings = ProfileMatchingSettings::default();
        settings.core_factors = vec![FactorKey::Rank];
        settings.secondary_factors = vec![];
        store.save(&settings).await.unwrap();

        let stored = store.find_one().await.unwrap().unwrap();
        assert_eq!(stored.core_factors, vec![FactorKey::Rank]);
        assert!(stored.secondary_factors.is_empty());
    }
}
