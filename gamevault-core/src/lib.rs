//! # Gamevault Core
//!
//! Domain logic for the Gamevault catalog service.
//!
//! - [`validation`]: trimming and required-field rules for writes, search filters
//! - [`database`]: the [`GameRepository`] port with PostgreSQL and in-memory adapters
//! - [`providers`]: the [`ImageLookup`] port and its RAWG adapter
//! - [`catalog`]: [`CatalogService`], the operations the HTTP layer exposes

pub mod catalog;
pub mod database;
pub mod error;
pub mod providers;
pub mod validation;

pub use catalog::CatalogService;
pub use database::{GameRepository, InMemoryGameRepository, PostgresDatabase, PostgresGameRepository};
pub use error::{CatalogError, Result};
pub use providers::{ImageLookup, ProviderError, RawgConfig, RawgImageLookup};

pub use gamevault_model as model;
