use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

use crate::{
    handlers::{games, health, images},
    infra::app_state::AppState,
};

/// Every catalog route, without state attached.
pub fn create_catalog_router() -> Router<AppState> {
    Router::new()
        .route("/ping", get(health::ping_handler))
        .route("/games", get(games::list_games_handler))
        .route("/search", get(games::search_games_handler))
        .route("/game-image", get(images::game_image_handler))
        .route(
            "/game/{id}",
            get(games::get_game_handler).post(games::edit_game_handler),
        )
        .route("/game/{id}/delete", post(games::delete_game_form_handler))
        .route("/add", post(games::add_game_handler))
        .route("/delete/{id}", delete(games::delete_game_handler))
}

/// The complete application with tracing and state attached.
pub fn create_app(state: AppState) -> Router {
    create_catalog_router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
