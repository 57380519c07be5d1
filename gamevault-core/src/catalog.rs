//! Request-level catalog operations.
//!
//! Each operation validates its input, performs at most one store write and
//! reports failures through [`CatalogError`].

use std::{fmt, sync::Arc};

use constant_time_eq::constant_time_eq;
use gamevault_model::{Game, GameId, GameInput, SearchParams};
use tracing::{info, warn};

use crate::{
    database::GameRepository,
    error::{CatalogError, Result},
    providers::ImageLookup,
    validation::{GameFilter, normalize_input},
};

#[derive(Clone)]
pub struct CatalogService {
    games: Arc<dyn GameRepository>,
    images: Arc<dyn ImageLookup>,
    deletion_code: Option<String>,
}

impl fmt::Debug for CatalogService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogService")
            .field("deletion_code_required", &self.deletion_code.is_some())
            .finish_non_exhaustive()
    }
}

impl CatalogService {
    pub fn new(games: Arc<dyn GameRepository>, images: Arc<dyn ImageLookup>) -> Self {
        Self {
            games,
            images,
            deletion_code: None,
        }
    }

    /// Require this secret on every delete. Blank secrets are ignored.
    pub fn with_deletion_code(mut self, code: Option<String>) -> Self {
        self.deletion_code = code.filter(|c| !c.is_empty());
        self
    }

    pub fn requires_deletion_code(&self) -> bool {
        self.deletion_code.is_some()
    }

    pub async fn list(&self) -> Result<Vec<Game>> {
        self.games.list().await
    }

    pub async fn search(&self, params: SearchParams) -> Result<Vec<Game>> {
        let filter = GameFilter::from(params);
        if filter.is_unconstrained() {
            return self.games.list().await;
        }
        self.games.search(&filter).await
    }

    pub async fn get(&self, raw_id: &str) -> Result<Game> {
        let id = parse_id(raw_id)?;
        self.games
            .get(id)
            .await?
            .ok_or_else(CatalogError::not_found)
    }

    pub async fn add(&self, input: GameInput) -> Result<Game> {
        let fields = normalize_input(input)?;

        if self
            .games
            .find_by_name_and_platform(&fields.name, &fields.platform)
            .await?
            .is_some()
        {
            info!(name = %fields.name, platform = %fields.platform, "rejected duplicate game");
            return Err(CatalogError::duplicate());
        }

        let game = self.games.insert(fields).await?;
        info!(id = %game.id, name = %game.name, platform = %game.platform, "game added");
        Ok(game)
    }

    /// Full overwrite of name, platform and image URL.
    pub async fn edit(&self, raw_id: &str, input: GameInput) -> Result<Game> {
        let id = parse_id(raw_id)?;
        let fields = normalize_input(input)?;

        let game = self
            .games
            .update(id, fields)
            .await?
            .ok_or_else(CatalogError::not_found)?;
        info!(id = %game.id, name = %game.name, platform = %game.platform, "game updated");
        Ok(game)
    }

    /// The deletion code is checked before the identifier so unauthorized
    /// callers learn nothing about which ids exist.
    pub async fn delete(&self, raw_id: &str, supplied_code: Option<&str>) -> Result<()> {
        self.authorize_delete(supplied_code)?;
        let id = parse_id(raw_id)?;

        if !self.games.delete(id).await? {
            return Err(CatalogError::not_found());
        }
        info!(%id, "game deleted");
        Ok(())
    }

    pub async fn cover_image(&self, name: Option<&str>) -> Result<Option<String>> {
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| CatalogError::Validation("Missing game name".to_string()))?;

        self.images.cover_image(name).await.map_err(|err| {
            warn!(game = name, error = %err, "cover image lookup failed");
            CatalogError::ExternalService(err.to_string())
        })
    }

    fn authorize_delete(&self, supplied_code: Option<&str>) -> Result<()> {
        let Some(expected) = self.deletion_code.as_deref() else {
            return Ok(());
        };

        match supplied_code {
            Some(code) if constant_time_eq(code.as_bytes(), expected.as_bytes()) => Ok(()),
            _ => {
                warn!("delete rejected: missing or invalid deletion code");
                Err(CatalogError::bad_deletion_code())
            }
        }
    }
}

fn parse_id(raw: &str) -> Result<GameId> {
    GameId::parse_str(raw).map_err(|_| CatalogError::invalid_id())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::InMemoryGameRepository;
    use crate::providers::ProviderError;
    use async_trait::async_trait;

    struct FixedLookup(Option<&'static str>);

    #[async_trait]
    impl ImageLookup for FixedLookup {
        async fn cover_image(&self, _name: &str) -> std::result::Result<Option<String>, ProviderError> {
            Ok(self.0.map(str::to_string))
        }
    }

    struct FailingLookup;

    #[async_trait]
    impl ImageLookup for FailingLookup {
        async fn cover_image(&self, _name: &str) -> std::result::Result<Option<String>, ProviderError> {
            Err(ProviderError::ApiError("RAWG responded with 503".into()))
        }
    }

    fn service() -> (CatalogService, Arc<InMemoryGameRepository>) {
        let repo = Arc::new(InMemoryGameRepository::new());
        let service = CatalogService::new(repo.clone(), Arc::new(FixedLookup(None)))
            .with_deletion_code(Some("letmein".into()));
        (service, repo)
    }

    #[tokio::test]
    async fn add_then_get_round_trips() {
        let (service, _) = service();
        let added = service
            .add(GameInput::new(" Zelda ", "Switch").with_image_url("http://img/zelda.png"))
            .await
            .unwrap();

        let fetched = service.get(&added.id.to_string()).await.unwrap();
        assert_eq!(fetched, added);
        assert_eq!(fetched.name, "Zelda");
        assert_eq!(fetched.image_url.as_deref(), Some("http://img/zelda.png"));
    }

    #[tokio::test]
    async fn add_rejects_case_insensitive_duplicates() {
        let (service, repo) = service();
        service.add(GameInput::new("Zelda", "Switch")).await.unwrap();

        let err = service.add(GameInput::new("ZELDA", "switch")).await.unwrap_err();
        assert_eq!(err.to_string(), "Game already exists for this platform.");
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn get_distinguishes_malformed_and_missing_ids() {
        let (service, _) = service();
        assert!(matches!(
            service.get("not-an-id").await,
            Err(CatalogError::InvalidIdentifier(_))
        ));
        assert!(matches!(
            service.get(&GameId::new().to_string()).await,
            Err(CatalogError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn edit_overwrites_every_field() {
        let (service, _) = service();
        let game = service
            .add(GameInput::new("Halo", "Xbox").with_image_url("http://img/halo.png"))
            .await
            .unwrap();

        let edited = service
            .edit(&game.id.to_string(), GameInput::new("Halo 2", "PC"))
            .await
            .unwrap();
        assert_eq!(edited.id, game.id);
        assert_eq!(edited.name, "Halo 2");
        assert_eq!(edited.platform, "PC");
        assert_eq!(edited.image_url, None);
    }

    #[tokio::test]
    async fn delete_requires_the_configured_code() {
        let (service, repo) = service();
        let game = service.add(GameInput::new("Halo", "Xbox")).await.unwrap();
        let id = game.id.to_string();

        assert!(matches!(
            service.delete(&id, None).await,
            Err(CatalogError::Forbidden(_))
        ));
        assert!(matches!(
            service.delete(&id, Some("wrong")).await,
            Err(CatalogError::Forbidden(_))
        ));
        assert_eq!(repo.len().await, 1);

        service.delete(&id, Some("letmein")).await.unwrap();
        assert!(matches!(
            service.delete(&id, Some("letmein")).await,
            Err(CatalogError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn delete_without_configured_code_is_open() {
        let repo = Arc::new(InMemoryGameRepository::new());
        let service = CatalogService::new(repo.clone(), Arc::new(FixedLookup(None)))
            .with_deletion_code(Some(String::new()));
        assert!(!service.requires_deletion_code());

        let game = service.add(GameInput::new("Halo", "Xbox")).await.unwrap();
        service.delete(&game.id.to_string(), None).await.unwrap();
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn search_without_terms_lists_everything() {
        let (service, _) = service();
        service.add(GameInput::new("game of thrones", "PC")).await.unwrap();
        service.add(GameInput::new("Halo", "Xbox")).await.unwrap();

        assert_eq!(service.search(SearchParams::default()).await.unwrap().len(), 2);

        let hits = service
            .search(SearchParams {
                query: Some("Game".into()),
                platform: None,
            })
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "game of thrones");
    }

    #[tokio::test]
    async fn cover_image_validates_and_maps_failures() {
        let (service, _) = service();
        assert!(matches!(
            service.cover_image(Some("  ")).await,
            Err(CatalogError::Validation(_))
        ));
        assert_eq!(service.cover_image(Some("Halo")).await.unwrap(), None);

        let failing = CatalogService::new(
            Arc::new(InMemoryGameRepository::new()),
            Arc::new(FailingLookup),
        );
        let err = failing.cover_image(Some("Halo")).await.unwrap_err();
        assert!(matches!(err, CatalogError::ExternalService(_)));
        assert!(err.to_string().contains("503"));
    }
}
