use async_trait::async_trait;
use gamevault_model::{Game, GameFields, GameId};
use sqlx::{PgPool, Postgres, QueryBuilder, Row, postgres::PgRow};
use tracing::debug;
use uuid::Uuid;

use crate::database::ports::games::GameRepository;
use crate::error::{CatalogError, Result};
use crate::validation::{GameFilter, contains_pattern};

const GAME_COLUMNS: &str = "id, name, platform, image_url";

#[derive(Debug, Clone)]
pub struct PostgresGameRepository {
    pool: PgPool,
}

impl PostgresGameRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn map_row(row: &PgRow) -> Result<Game> {
        let id: Uuid = row
            .try_get("id")
            .map_err(|e| CatalogError::Store(format!("Failed to read game id: {e}")))?;
        let name: String = row
            .try_get("name")
            .map_err(|e| CatalogError::Store(format!("Failed to read game name: {e}")))?;
        let platform: String = row
            .try_get("platform")
            .map_err(|e| CatalogError::Store(format!("Failed to read game platform: {e}")))?;
        let image_url: Option<String> = row
            .try_get("image_url")
            .map_err(|e| CatalogError::Store(format!("Failed to read image_url: {e}")))?;

        Ok(Game {
            id: GameId(id),
            name,
            platform,
            image_url,
        })
    }

    /// Unique-index violations become `Conflict`; anything else is a store
    /// failure described by `context`.
    fn map_write_error(err: sqlx::Error, context: &str) -> CatalogError {
        if let sqlx::Error::Database(db_err) = &err {
            let code = db_err.code().map(|c| c.to_string());
            if code.as_deref() == Some("23505") {
                return CatalogError::duplicate();
            }
        }
        CatalogError::Store(format!("{context}: {err}"))
    }
}

#[async_trait]
impl GameRepository for PostgresGameRepository {
    async fn list(&self) -> Result<Vec<Game>> {
        let rows = sqlx::query(&format!(
            "SELECT {GAME_COLUMNS} FROM games ORDER BY created_at, id"
        ))
        .fetch_all(self.pool())
        .await
        .map_err(|e| CatalogError::Store(format!("Failed to list games: {e}")))?;

        rows.iter().map(Self::map_row).collect()
    }

    async fn search(&self, filter: &GameFilter) -> Result<Vec<Game>> {
        let mut builder =
            QueryBuilder::<Postgres>::new(format!("SELECT {GAME_COLUMNS} FROM games WHERE 1=1"));

        if let Some(name) = filter.name.as_deref() {
            builder.push(" AND name ILIKE ");
            builder.push_bind(contains_pattern(name));
            builder.push(r" ESCAPE '\'");
        }

        if let Some(platform) = filter.platform.as_deref() {
            builder.push(" AND platform ILIKE ");
            builder.push_bind(contains_pattern(platform));
            builder.push(r" ESCAPE '\'");
        }

        builder.push(" ORDER BY created_at, id");

        debug!(sql = builder.sql(), "executing game search");

        let rows = builder
            .build()
            .fetch_all(self.pool())
            .await
            .map_err(|e| CatalogError::Store(format!("Failed to search games: {e}")))?;

        rows.iter().map(Self::map_row).collect()
    }

    async fn get(&self, id: GameId) -> Result<Option<Game>> {
        let row = sqlx::query(&format!("SELECT {GAME_COLUMNS} FROM games WHERE id = $1"))
            .bind(id.to_uuid())
            .fetch_optional(self.pool())
            .await
            .map_err(|e| CatalogError::Store(format!("Failed to load game: {e}")))?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn find_by_name_and_platform(&self, name: &str, platform: &str) -> Result<Option<Game>> {
        let row = sqlx::query(&format!(
            r#"
            SELECT {GAME_COLUMNS}
            FROM games
            WHERE lower(name) = lower($1)
              AND lower(platform) = lower($2)
            LIMIT 1
            "#
        ))
        .bind(name)
        .bind(platform)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| CatalogError::Store(format!("Failed to check for duplicates: {e}")))?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn insert(&self, fields: GameFields) -> Result<Game> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO games (id, name, platform, image_url)
            VALUES ($1, $2, $3, $4)
            RETURNING {GAME_COLUMNS}
            "#
        ))
        .bind(GameId::new().to_uuid())
        .bind(fields.name)
        .bind(fields.platform)
        .bind(fields.image_url)
        .fetch_one(self.pool())
        .await
        .map_err(|e| Self::map_write_error(e, "Failed to insert game"))?;

        Self::map_row(&row)
    }

    async fn update(&self, id: GameId, fields: GameFields) -> Result<Option<Game>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE games
            SET name = $2,
                platform = $3,
                image_url = $4
            WHERE id = $1
            RETURNING {GAME_COLUMNS}
            "#
        ))
        .bind(id.to_uuid())
        .bind(fields.name)
        .bind(fields.platform)
        .bind(fields.image_url)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| Self::map_write_error(e, "Failed to update game"))?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn delete(&self, id: GameId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM games WHERE id = $1")
            .bind(id.to_uuid())
            .execute(self.pool())
            .await
            .map_err(|e| CatalogError::Store(format!("Failed to delete game: {e}")))?;

        Ok(result.rows_affected() == 1)
    }
}
