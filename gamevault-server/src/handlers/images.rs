use axum::{Json, extract::State};
use gamevault_model::{ImageQuery, ImageResponse};

use crate::infra::{app_state::AppState, errors::AppResult, extract::AppQuery};

/// Cover art for a game title from the external lookup service
pub async fn game_image_handler(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ImageQuery>,
) -> AppResult<Json<ImageResponse>> {
    let image = state.catalog.cover_image(query.name.as_deref()).await?;
    Ok(Json(ImageResponse { image }))
}
