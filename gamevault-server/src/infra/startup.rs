//! Resource wiring shared by the binary and the integration tests.

use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use gamevault_core::{
    CatalogService, GameRepository, ImageLookup, PostgresDatabase, RawgImageLookup,
};
use tracing::{error, info};

use crate::infra::{app_state::AppState, config::Config};

/// Connect to PostgreSQL and apply pending migrations.
pub async fn connect_postgres(config: &Config) -> Result<PostgresDatabase> {
    let url = config.database.url.as_deref().ok_or_else(|| {
        error!("DATABASE_URL must be provided for PostgreSQL connections");
        anyhow!("No PostgreSQL connection configuration found")
    })?;

    let postgres = PostgresDatabase::new(url, config.database.max_connections)
        .await
        .context("failed to connect to PostgreSQL")?;
    info!("Successfully connected to PostgreSQL");

    postgres
        .initialize_schema()
        .await
        .context("database migration failed")?;
    info!("Database schema initialized successfully");

    Ok(postgres)
}

/// Build handler state around `games`, using the configured RAWG client for
/// cover art.
pub fn build_state(config: Arc<Config>, games: Arc<dyn GameRepository>) -> Result<AppState> {
    let images = RawgImageLookup::new(config.rawg())
        .context("failed to build RAWG HTTP client")?;
    Ok(build_state_with(config, games, Arc::new(images)))
}

pub fn build_state_with(
    config: Arc<Config>,
    games: Arc<dyn GameRepository>,
    images: Arc<dyn ImageLookup>,
) -> AppState {
    let catalog = CatalogService::new(games, images)
        .with_deletion_code(config.catalog.deletion_code.clone());
    AppState::new(catalog, config)
}
