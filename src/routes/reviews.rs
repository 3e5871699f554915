use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use platebook_recipe::reviews::{list_reviews, upsert_review, AddReviewCommand};
use platebook_recipe::Review;

use crate::error::AppError;
use crate::middleware::Auth;
use crate::routes::AppState;

/// POST /recipes/{id}/reviews - Add or replace the caller's review
#[tracing::instrument(skip(state, auth, command), fields(user_id = %auth.user_id))]
pub async fn add(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Path(id): Path<String>,
    Json(command): Json<AddReviewCommand>,
) -> Result<Response, AppError> {
    let review = upsert_review(&id, &auth.user_id, command, &state.pool).await?;

    Ok((StatusCode::CREATED, Json(review)).into_response())
}

/// GET /recipes/{id}/reviews - Reviews newest first with author names
#[tracing::instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Review>>, AppError> {
    let reviews = list_reviews(&id, &state.pool).await?;
    Ok(Json(reviews))
}
