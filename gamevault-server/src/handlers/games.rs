use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::Redirect,
};
use gamevault_model::{Game, GameInput, MessageResponse, SearchParams, StatusResponse};
use tracing::debug;

use crate::infra::{
    app_state::AppState,
    errors::AppResult,
    extract::{AppJson, AppQuery, DeleteBody},
};

/// Every game, oldest first
pub async fn list_games_handler(State(state): State<AppState>) -> AppResult<Json<Vec<Game>>> {
    let games = state.catalog.list().await?;
    debug!(count = games.len(), "listed games");
    Ok(Json(games))
}

/// Case-insensitive substring search on name and/or platform
pub async fn search_games_handler(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<SearchParams>,
) -> AppResult<Json<Vec<Game>>> {
    let games = state.catalog.search(params).await?;
    Ok(Json(games))
}

pub async fn get_game_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Game>> {
    let game = state.catalog.get(&id).await?;
    Ok(Json(game))
}

pub async fn add_game_handler(
    State(state): State<AppState>,
    AppJson(input): AppJson<GameInput>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    state.catalog.add(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Game added successfully!")),
    ))
}

pub async fn edit_game_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<GameInput>,
) -> AppResult<Json<MessageResponse>> {
    state.catalog.edit(&id, input).await?;
    Ok(Json(MessageResponse::new("Game updated successfully!")))
}

/// `DELETE /delete/{id}`. The body carrying `deletion_code` may be omitted
/// entirely, which counts as an absent code.
pub async fn delete_game_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    DeleteBody(request): DeleteBody,
) -> AppResult<Json<StatusResponse>> {
    state
        .catalog
        .delete(&id, request.deletion_code.as_deref())
        .await?;
    Ok(Json(StatusResponse::success()))
}

/// Form-post variant of delete used by plain HTML forms; redirects to the
/// index on success.
pub async fn delete_game_form_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    DeleteBody(request): DeleteBody,
) -> AppResult<Redirect> {
    state
        .catalog
        .delete(&id, request.deletion_code.as_deref())
        .await?;
    Ok(Redirect::to("/"))
}
