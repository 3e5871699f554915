use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::routes::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct ContactForm {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, max = 200, message = "Subject is required"))]
    pub subject: String,

    #[validate(length(min = 1, max = 5000, message = "Message is required"))]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub id: String,
}

/// POST /contact - Persist the message, then notify by email
///
/// Email failures are logged inside the service, never surfaced; the
/// stored row is the source of truth.
#[tracing::instrument(skip(state, form), fields(email = %form.email))]
pub async fn submit(
    State(state): State<AppState>,
    Json(form): Json<ContactForm>,
) -> Result<Response, AppError> {
    form.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let id = Uuid::new_v4().to_string();
    sqlx::query(
        r#"
        INSERT INTO contact_messages (id, name, email, subject, message, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(&id)
    .bind(&form.name)
    .bind(&form.email)
    .bind(&form.subject)
    .bind(&form.message)
    .bind(Utc::now().to_rfc3339())
    .execute(&state.pool)
    .await?;

    state
        .email
        .send_contact_emails(&form.name, &form.email, &form.subject, &form.message);

    tracing::info!(contact_id = %id, "Contact message received");

    Ok((StatusCode::CREATED, Json(ContactResponse { id })).into_response())
}
