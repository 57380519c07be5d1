use async_trait::async_trait;
use gamevault_model::{Game, GameFields, GameId};

use crate::error::Result;
use crate::validation::GameFilter;

/// Persistence port for catalog entries.
///
/// Implementations own identifier assignment and must enforce
/// case-insensitive uniqueness of `(name, platform)` on every write,
/// reporting a violation as [`CatalogError::Conflict`](crate::CatalogError::Conflict).
#[async_trait]
pub trait GameRepository: Send + Sync {
    /// Every record in insertion order.
    async fn list(&self) -> Result<Vec<Game>>;

    /// Records whose fields contain the filter terms, ignoring case.
    async fn search(&self, filter: &GameFilter) -> Result<Vec<Game>>;

    async fn get(&self, id: GameId) -> Result<Option<Game>>;

    /// Case-insensitive exact match on both fields.
    async fn find_by_name_and_platform(&self, name: &str, platform: &str) -> Result<Option<Game>>;

    async fn insert(&self, fields: GameFields) -> Result<Game>;

    /// Overwrite all mutable fields. Returns `None` when no record has `id`.
    async fn update(&self, id: GameId, fields: GameFields) -> Result<Option<Game>>;

    /// Remove one record. Returns `false` when no record has `id`.
    async fn delete(&self, id: GameId) -> Result<bool>;
}
