use std::{fmt, sync::Arc};

use gamevault_core::CatalogService;

use crate::infra::config::Config;

/// Shared handler state. Everything inside is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(catalog: CatalogService, config: Arc<Config>) -> Self {
        Self { catalog, config }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
