use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use platebook_recipe::RecipeError;
use platebook_user::UserError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid credentials")]
    Unauthorized,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Recipe error: {0}")]
    RecipeError(#[from] RecipeError),

    #[error("User error: {0}")]
    UserError(#[from] UserError),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Internal server error")]
    InternalError(String),
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalError(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, message) = match self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string()),
            AppError::ValidationError(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::RecipeError(e) => match e {
                RecipeError::ValidationError(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
                RecipeError::InvalidArgument(msg) => (StatusCode::BAD_REQUEST, msg),
                RecipeError::NotFound => (StatusCode::NOT_FOUND, "Recipe not found".to_string()),
                RecipeError::CollectionNotFound => {
                    (StatusCode::NOT_FOUND, "Collection not found".to_string())
                }
                RecipeError::PermissionDenied => (
                    StatusCode::FORBIDDEN,
                    "You do not own this resource".to_string(),
                ),
                RecipeError::DatabaseError(e) => {
                    tracing::error!("Database error: {:?}", e);
                    internal()
                }
                RecipeError::SerializationError(e) => {
                    tracing::error!("Serialization error: {:?}", e);
                    internal()
                }
                RecipeError::InvalidTimestamp(e) => {
                    tracing::error!("Invalid stored timestamp: {:?}", e);
                    internal()
                }
            },
            AppError::UserError(e) => match e {
                UserError::EmailAlreadyExists => {
                    (StatusCode::CONFLICT, "Email already registered".to_string())
                }
                UserError::InvalidCredentials => {
                    (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string())
                }
                UserError::ValidationError(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
                UserError::NotFound => (StatusCode::NOT_FOUND, "User not found".to_string()),
                UserError::TokenError(e) => {
                    tracing::error!("Token error: {}", e);
                    internal()
                }
                UserError::HashingError(e) => {
                    tracing::error!("Password hashing error: {}", e);
                    internal()
                }
                UserError::DatabaseError(e) => {
                    tracing::error!("Database error: {:?}", e);
                    internal()
                }
            },
            AppError::DatabaseError(e) => {
                tracing::error!("Database error: {:?}", e);
                internal()
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                internal()
            }
        };

        (status_code, Json(json!({ "error": message }))).into_response()
    }
}

fn internal() -> (StatusCode, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "An unexpected error occurred. Please try again later.".to_string(),
    )
}
