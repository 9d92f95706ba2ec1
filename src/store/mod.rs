pub mod sqlite;

use async_trait::async_trait;

use crate::core::{NewPlayer, Player, PlayerUpdate};
use crate::error::Result;
use crate::settings::ProfileMatchingSettings;

pub use sqlite::SqliteStore;

/// Trait for player record storage
#[async_trait]
pub trait PlayerRepository: Send + Sync {
    /// All players in insertion order
    async fn find_all(&self) -> Result<Vec<Player>>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Player>>;

    /// Insert an already validated player
    async fn insert(&self, player: &NewPlayer) -> Result<Player>;

    /// Apply a partial update, `None` if the id does not exist
    async fn update_by_id(&self, id: i64, update: &PlayerUpdate) -> Result<Option<Player>>;

    /// `true` if a record was removed
    async fn delete_by_id(&self, id: i64) -> Result<bool>;
}

/// Trait for the singleton settings record
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn find_one(&self) -> Result<Option<ProfileMatchingSettings>>;

    /// Create the record unless one already exists; returns whichever is stored
    async fn create(&self, settings: &ProfileMatchingSettings) -> Result<ProfileMatchingSettings>;

    /// Overwrite the stored record (last writer wins)
    async fn save(&self, settings: &ProfileMatchingSettings) -> Result<ProfileMatchingSettings>;
}
