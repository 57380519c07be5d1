//! # Gamevault Server
//!
//! HTTP surface of the Gamevault game catalog: list, search, add, edit and
//! delete entries, plus cover art lookup against RAWG.
//!
//! The server is built on Axum and uses PostgreSQL (via `gamevault-core`) as
//! its document store.

pub mod handlers;
pub mod infra;
pub mod routes;

pub use infra::app_state::AppState;
pub use routes::create_app;
