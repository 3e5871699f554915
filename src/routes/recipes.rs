use std::io::Cursor;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use platebook_recipe::{
    read_model, scale_ingredients, CreateRecipeCommand, DietaryType, Difficulty, FilterSpec,
    RangeFilter, Recipe, RecipeError, SortKey, SortOrder, UpdateRecipeCommand,
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::middleware::Auth;
use crate::routes::AppState;

/// Longest edge of a stored recipe image
const MAX_IMAGE_DIMENSION: u32 = 1024;

const ALLOWED_IMAGE_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/webp"];

/// A recipe as returned to clients, with its derived dietary type
#[derive(Debug, Serialize)]
pub struct RecipeResponse {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub dietary: Option<DietaryType>,
}

impl RecipeResponse {
    fn new(recipe: Recipe, state: &AppState) -> Self {
        let dietary = state.filter_engine.classifier().classify(&recipe.tags);
        Self { recipe, dietary }
    }
}

/// POST /recipes - Create a recipe owned by the caller
#[tracing::instrument(skip(state, auth, command), fields(user_id = %auth.user_id))]
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Json(command): Json<CreateRecipeCommand>,
) -> Result<Response, AppError> {
    let recipe = command.into_recipe(&auth.user_id)?;
    read_model::insert_recipe(&recipe, &state.pool).await?;

    tracing::info!(recipe_id = %recipe.id, "Recipe created");

    Ok((StatusCode::CREATED, Json(RecipeResponse::new(recipe, &state))).into_response())
}

/// GET /recipes/{id} - Full recipe with derived dietary type
#[tracing::instrument(skip(state))]
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RecipeResponse>, AppError> {
    let recipe = read_model::find_recipe(&id, &state.pool)
        .await?
        .ok_or(RecipeError::NotFound)?;

    Ok(Json(RecipeResponse::new(recipe, &state)))
}

/// Query-string form of a FilterSpec
///
/// Every field is free-typed in the UI, so each one deserializes as text
/// and converts leniently: anything unparseable means "filter not
/// applied" for that field, never a request failure.
#[derive(Debug, Default, Deserialize)]
pub struct ListRecipesQuery {
    #[serde(default)]
    pub q: Option<String>,
    pub difficulty: Option<String>,
    pub cuisine: Option<String>,
    pub dietary: Option<String>,
    pub min_rating: Option<String>,
    pub min_servings: Option<String>,
    pub max_servings: Option<String>,
    pub min_cook_time: Option<String>,
    pub max_cook_time: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
}

impl ListRecipesQuery {
    fn into_spec(self) -> FilterSpec {
        FilterSpec {
            text_query: self.q.unwrap_or_default(),
            difficulty: parse_lenient::<Difficulty>(self.difficulty),
            cuisine: self.cuisine.filter(|c| !c.trim().is_empty()),
            dietary: parse_lenient::<DietaryType>(self.dietary),
            min_rating: self.min_rating.and_then(|v| v.trim().parse().ok()),
            servings_range: RangeFilter {
                min: self.min_servings.and_then(|v| v.trim().parse().ok()),
                max: self.max_servings.and_then(|v| v.trim().parse().ok()),
            },
            cook_time_range: RangeFilter {
                min: self.min_cook_time.and_then(|v| v.trim().parse().ok()),
                max: self.max_cook_time.and_then(|v| v.trim().parse().ok()),
            },
            sort_key: parse_lenient::<SortKey>(self.sort).unwrap_or_default(),
            sort_order: parse_lenient::<SortOrder>(self.order).unwrap_or_default(),
        }
    }
}

fn parse_lenient<T: std::str::FromStr>(value: Option<String>) -> Option<T> {
    value.and_then(|v| v.trim().parse().ok())
}

/// GET /recipes - Search, filter and sort the recent-recipe page
#[tracing::instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListRecipesQuery>,
) -> Result<Json<Vec<RecipeResponse>>, AppError> {
    let spec = query.into_spec();
    let page = read_model::list_recent_recipes(state.page_limit, &state.pool).await?;

    let results = state
        .filter_engine
        .apply(&page, &spec)
        .into_iter()
        .cloned()
        .map(|recipe| RecipeResponse::new(recipe, &state))
        .collect();

    Ok(Json(results))
}

/// Load a recipe and confirm the caller owns it
async fn find_owned_recipe(id: &str, user_id: &str, state: &AppState) -> Result<Recipe, AppError> {
    let recipe = read_model::find_recipe(id, &state.pool)
        .await?
        .ok_or(RecipeError::NotFound)?;

    if recipe.user_id != user_id {
        return Err(RecipeError::PermissionDenied.into());
    }

    Ok(recipe)
}

/// PUT /recipes/{id} - Partial update, author only
#[tracing::instrument(skip(state, auth, command), fields(user_id = %auth.user_id))]
pub async fn update(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Path(id): Path<String>,
    Json(command): Json<UpdateRecipeCommand>,
) -> Result<Json<RecipeResponse>, AppError> {
    find_owned_recipe(&id, &auth.user_id, &state).await?;

    let command = command.validated()?;
    read_model::update_recipe_fields(&id, &command, &state.pool).await?;

    let updated = read_model::find_recipe(&id, &state.pool)
        .await?
        .ok_or(RecipeError::NotFound)?;

    Ok(Json(RecipeResponse::new(updated, &state)))
}

/// DELETE /recipes/{id} - Remove the recipe and its dependents, author only
#[tracing::instrument(skip(state, auth), fields(user_id = %auth.user_id))]
pub async fn remove(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    find_owned_recipe(&id, &auth.user_id, &state).await?;

    read_model::delete_recipe(&id, &state.pool).await?;
    tracing::info!(recipe_id = %id, "Recipe deleted");

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct ScaleQuery {
    pub servings: i64,
}

#[derive(Debug, Serialize)]
pub struct ScaleResponse {
    pub original_servings: i64,
    pub servings: i64,
    pub ingredients: Vec<String>,
}

/// GET /recipes/{id}/scale?servings=N - Rescale the ingredient list from
/// the stored serving count to N
#[tracing::instrument(skip(state))]
pub async fn scale(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ScaleQuery>,
) -> Result<Json<ScaleResponse>, AppError> {
    let recipe = read_model::find_recipe(&id, &state.pool)
        .await?
        .ok_or(RecipeError::NotFound)?;

    let ingredients = scale_ingredients(&recipe.ingredients, recipe.servings, query.servings)?;

    Ok(Json(ScaleResponse {
        original_servings: recipe.servings,
        servings: query.servings,
        ingredients,
    }))
}

/// POST /recipes/{id}/image - Upload and downscale a recipe image, author only
#[tracing::instrument(skip(state, auth, multipart), fields(user_id = %auth.user_id))]
pub async fn upload_image(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Result<StatusCode, AppError> {
    find_owned_recipe(&id, &auth.user_id, &state).await?;

    let field = multipart
        .next_field()
        .await
        .map_err(|e| AppError::ValidationError(format!("Invalid multipart payload: {e}")))?
        .ok_or_else(|| AppError::ValidationError("No file provided".to_string()))?;

    let content_type = field.content_type().unwrap_or("").to_string();
    if !ALLOWED_IMAGE_TYPES.contains(&content_type.as_str()) {
        return Err(AppError::ValidationError(format!(
            "Invalid file type: {content_type}"
        )));
    }

    let data = field
        .bytes()
        .await
        .map_err(|e| AppError::ValidationError(format!("Failed to read upload: {e}")))?;

    let decoded = image::load_from_memory(&data)
        .map_err(|e| AppError::ValidationError(format!("Unreadable image: {e}")))?;

    // Bound the stored size; thumbnail preserves aspect ratio
    let thumbnail = decoded.thumbnail(MAX_IMAGE_DIMENSION, MAX_IMAGE_DIMENSION);
    let mut encoded = Vec::new();
    thumbnail
        .write_to(&mut Cursor::new(&mut encoded), image::ImageFormat::Jpeg)
        .map_err(|e| AppError::InternalError(format!("Failed to encode thumbnail: {e}")))?;

    read_model::upsert_recipe_image(&id, "image/jpeg", &encoded, &state.pool).await?;
    tracing::info!(recipe_id = %id, bytes = encoded.len(), "Recipe image stored");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /recipes/{id}/image - Serve the stored image bytes
#[tracing::instrument(skip(state))]
pub async fn serve_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let image = read_model::find_recipe_image(&id, &state.pool)
        .await?
        .ok_or(RecipeError::NotFound)?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, image.content_type)],
        image.data,
    )
        .into_response())
}
