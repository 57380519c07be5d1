use std::sync::Arc;

use async_trait::async_trait;
use axum_test::TestServer;
use gamevault_core::{ImageLookup, InMemoryGameRepository, ProviderError};
use gamevault_server::{
    AppState, create_app,
    infra::{
        config::{CatalogConfig, Config},
        startup::build_state_with,
    },
};

pub const DELETION_CODE: &str = "let-me-delete";

/// Image lookup double returning a canned answer.
#[derive(Debug, Clone)]
pub enum StubLookup {
    Found(&'static str),
    Missing,
    Failing(&'static str),
}

#[async_trait]
impl ImageLookup for StubLookup {
    async fn cover_image(&self, _name: &str) -> Result<Option<String>, ProviderError> {
        match self {
            StubLookup::Found(url) => Ok(Some((*url).to_string())),
            StubLookup::Missing => Ok(None),
            StubLookup::Failing(reason) => Err(ProviderError::ApiError((*reason).to_string())),
        }
    }
}

// Code is used by test modules, but not in this scope
#[allow(unused)]
pub struct TestApp {
    pub server: TestServer,
    pub games: Arc<InMemoryGameRepository>,
    pub state: AppState,
}

#[allow(unused)]
pub fn test_config(deletion_code: Option<&str>) -> Config {
    Config {
        catalog: CatalogConfig {
            deletion_code: deletion_code.map(str::to_string),
        },
        ..Config::default()
    }
}

#[allow(unused)]
pub fn build_test_app_with(deletion_code: Option<&str>, lookup: StubLookup) -> TestApp {
    let games = Arc::new(InMemoryGameRepository::new());
    let state = build_state_with(
        Arc::new(test_config(deletion_code)),
        games.clone(),
        Arc::new(lookup),
    );
    let server = TestServer::new(create_app(state.clone())).expect("failed to start test server");

    TestApp {
        server,
        games,
        state,
    }
}

#[allow(unused)]
pub fn build_test_app() -> TestApp {
    build_test_app_with(Some(DELETION_CODE), StubLookup::Missing)
}
