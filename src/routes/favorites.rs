use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use platebook_recipe::{read_model, Recipe};

use crate::error::AppError;
use crate::middleware::Auth;
use crate::routes::AppState;

/// POST /recipes/{id}/save - Idempotent save
#[tracing::instrument(skip(state, auth), fields(user_id = %auth.user_id))]
pub async fn save(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.saved_recipes.save(&auth.user_id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /recipes/{id}/save - Remove a save
#[tracing::instrument(skip(state, auth), fields(user_id = %auth.user_id))]
pub async fn unsave(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.saved_recipes.unsave(&auth.user_id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /saved-recipes - The caller's saved recipes
#[tracing::instrument(skip(state, auth), fields(user_id = %auth.user_id))]
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
) -> Result<Json<Vec<Recipe>>, AppError> {
    let ids = state.saved_recipes.list(&auth.user_id).await?;
    let recipes = read_model::list_recipes_by_ids(&ids, &state.pool).await?;
    Ok(Json(recipes))
}
