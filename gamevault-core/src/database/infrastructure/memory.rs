//! Process-local repository used by tests and by `--in-memory` runs.

use async_trait::async_trait;
use gamevault_model::{Game, GameFields, GameId};
use tokio::sync::RwLock;

use crate::database::ports::games::GameRepository;
use crate::error::{CatalogError, Result};
use crate::validation::GameFilter;

/// Keeps records in insertion order and enforces the same case-insensitive
/// `(name, platform)` uniqueness as the PostgreSQL unique index.
#[derive(Debug, Default)]
pub struct InMemoryGameRepository {
    games: RwLock<Vec<Game>>,
}

impl InMemoryGameRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.games.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.games.read().await.is_empty()
    }
}

fn same_key(game: &Game, name: &str, platform: &str) -> bool {
    game.name.to_lowercase() == name.to_lowercase()
        && game.platform.to_lowercase() == platform.to_lowercase()
}

#[async_trait]
impl GameRepository for InMemoryGameRepository {
    async fn list(&self) -> Result<Vec<Game>> {
        Ok(self.games.read().await.clone())
    }

    async fn search(&self, filter: &GameFilter) -> Result<Vec<Game>> {
        let games = self.games.read().await;
        Ok(games
            .iter()
            .filter(|game| filter.matches(&game.name, &game.platform))
            .cloned()
            .collect())
    }

    async fn get(&self, id: GameId) -> Result<Option<Game>> {
        let games = self.games.read().await;
        Ok(games.iter().find(|game| game.id == id).cloned())
    }

    async fn find_by_name_and_platform(&self, name: &str, platform: &str) -> Result<Option<Game>> {
        let games = self.games.read().await;
        Ok(games
            .iter()
            .find(|game| same_key(game, name, platform))
            .cloned())
    }

    async fn insert(&self, fields: GameFields) -> Result<Game> {
        let mut games = self.games.write().await;
        if games
            .iter()
            .any(|game| same_key(game, &fields.name, &fields.platform))
        {
            return Err(CatalogError::duplicate());
        }

        let game = Game {
            id: GameId::new(),
            name: fields.name,
            platform: fields.platform,
            image_url: fields.image_url,
        };
        games.push(game.clone());
        Ok(game)
    }

    async fn update(&self, id: GameId, fields: GameFields) -> Result<Option<Game>> {
        let mut games = self.games.write().await;
        let Some(index) = games.iter().position(|game| game.id == id) else {
            return Ok(None);
        };
        if games
            .iter()
            .any(|game| game.id != id && same_key(game, &fields.name, &fields.platform))
        {
            return Err(CatalogError::duplicate());
        }

        let game = &mut games[index];
        game.name = fields.name;
        game.platform = fields.platform;
        game.image_url = fields.image_url;
        Ok(Some(game.clone()))
    }

    async fn delete(&self, id: GameId) -> Result<bool> {
        let mut games = self.games.write().await;
        let before = games.len();
        games.retain(|game| game.id != id);
        Ok(games.len() < before)
    }
}
