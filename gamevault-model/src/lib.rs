//! Data model definitions shared across Gamevault crates.

pub mod error;
pub mod game;
pub mod ids;

pub use error::ModelError;
pub use game::{
    DeleteRequest, Game, GameFields, GameInput, ImageQuery, ImageResponse,
    MessageResponse, SearchParams, StatusResponse,
};
pub use ids::GameId;
