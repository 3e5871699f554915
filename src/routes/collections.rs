use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use platebook_recipe::collections::{
    add_recipe_to_collection, create_collection, delete_collection, find_visible_collection,
    list_collection_recipe_ids, list_visible_collections, remove_recipe_from_collection,
    CreateCollectionCommand,
};
use platebook_recipe::{read_model, Collection, Recipe, RecipeError};
use serde::Serialize;

use crate::error::AppError;
use crate::middleware::Auth;
use crate::routes::AppState;

#[derive(Debug, Serialize)]
pub struct CollectionDetailResponse {
    #[serde(flatten)]
    pub collection: Collection,
    pub recipes: Vec<Recipe>,
}

/// POST /collections - Create a collection owned by the caller
#[tracing::instrument(skip(state, auth, command), fields(user_id = %auth.user_id))]
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Json(command): Json<CreateCollectionCommand>,
) -> Result<Response, AppError> {
    let collection = create_collection(&auth.user_id, command, &state.pool).await?;

    Ok((StatusCode::CREATED, Json(collection)).into_response())
}

/// GET /collections - Own collections plus other users' public ones
#[tracing::instrument(skip(state, auth), fields(user_id = %auth.user_id))]
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
) -> Result<Json<Vec<Collection>>, AppError> {
    let collections = list_visible_collections(&auth.user_id, &state.pool).await?;
    Ok(Json(collections))
}

/// GET /collections/{id} - A visible collection with its recipes
#[tracing::instrument(skip(state, auth), fields(user_id = %auth.user_id))]
pub async fn detail(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Path(id): Path<String>,
) -> Result<Json<CollectionDetailResponse>, AppError> {
    let collection = find_visible_collection(&id, &auth.user_id, &state.pool)
        .await?
        .ok_or(RecipeError::CollectionNotFound)?;

    let recipe_ids = list_collection_recipe_ids(&id, &state.pool).await?;
    let recipes = read_model::list_recipes_by_ids(&recipe_ids, &state.pool).await?;

    Ok(Json(CollectionDetailResponse {
        collection,
        recipes,
    }))
}

/// DELETE /collections/{id} - Remove a collection and its memberships, owner only
#[tracing::instrument(skip(state, auth), fields(user_id = %auth.user_id))]
pub async fn remove(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    delete_collection(&id, &auth.user_id, &state.pool).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /collections/{id}/recipes/{recipe_id} - Idempotent membership add, owner only
#[tracing::instrument(skip(state, auth), fields(user_id = %auth.user_id))]
pub async fn add_recipe(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Path((id, recipe_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    add_recipe_to_collection(&id, &recipe_id, &auth.user_id, &state.pool).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /collections/{id}/recipes/{recipe_id} - Membership removal, owner only
#[tracing::instrument(skip(state, auth), fields(user_id = %auth.user_id))]
pub async fn remove_recipe(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Path((id, recipe_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    remove_recipe_from_collection(&id, &recipe_id, &auth.user_id, &state.pool).await?;
    Ok(StatusCode::NO_CONTENT)
}
