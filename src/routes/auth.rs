use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use platebook_user::{
    find_user_by_email, find_user_by_id, generate_jwt, register_user, verify_password,
    LoginCommand, RegisterUserCommand, UserError,
};
use serde::Serialize;
use validator::Validate;

use crate::error::AppError;
use crate::middleware::Auth;
use crate::routes::AppState;

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub display_name: String,
}

fn auth_cookie(token: &str) -> String {
    format!(
        "auth_token={}; HttpOnly; Secure; SameSite=Lax; Max-Age={}; Path=/",
        token,
        7 * 24 * 60 * 60 // 7 days in seconds
    )
}

/// POST /register - Create an account and start a session
#[tracing::instrument(skip(state, command), fields(email = %command.email))]
pub async fn register(
    State(state): State<AppState>,
    Json(command): Json<RegisterUserCommand>,
) -> Result<Response, AppError> {
    let user = register_user(command, &state.pool).await?;

    let token = generate_jwt(
        user.id.clone(),
        user.email.clone(),
        user.display_name.clone(),
        &state.jwt_secret,
    )?;

    let body = UserResponse {
        id: user.id,
        email: user.email,
        display_name: user.display_name,
    };

    Ok((
        StatusCode::CREATED,
        [("Set-Cookie", auth_cookie(&token))],
        Json(body),
    )
        .into_response())
}

/// POST /login - Verify credentials and start a session
///
/// Unknown email and wrong password produce the same generic error so
/// accounts cannot be enumerated.
#[tracing::instrument(skip(state, command), fields(email = %command.email))]
pub async fn login(
    State(state): State<AppState>,
    Json(command): Json<LoginCommand>,
) -> Result<Response, AppError> {
    command
        .validate()
        .map_err(|e| AppError::UserError(UserError::ValidationError(e.to_string())))?;

    let email = command.email.trim().to_lowercase();
    let Some(user) = find_user_by_email(&email, &state.pool).await? else {
        tracing::warn!("Failed login attempt: unknown email");
        return Err(AppError::Unauthorized);
    };

    if !verify_password(&command.password, &user.password_hash)? {
        tracing::warn!("Failed login attempt: incorrect password");
        return Err(AppError::Unauthorized);
    }

    let token = generate_jwt(
        user.id.clone(),
        user.email.clone(),
        user.display_name.clone(),
        &state.jwt_secret,
    )?;

    let body = UserResponse {
        id: user.id,
        email: user.email,
        display_name: user.display_name,
    };

    Ok((
        StatusCode::OK,
        [("Set-Cookie", auth_cookie(&token))],
        Json(body),
    )
        .into_response())
}

/// POST /logout - Clear the session cookie
#[tracing::instrument]
pub async fn logout() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(
            "Set-Cookie",
            "auth_token=; HttpOnly; Secure; SameSite=Lax; Max-Age=0; Path=/",
        )],
        Json(serde_json::json!({"status": "logged_out"})),
    )
}

/// GET /me - The authenticated user's profile
#[tracing::instrument(skip(state, auth), fields(user_id = %auth.user_id))]
pub async fn me(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
) -> Result<Json<UserResponse>, AppError> {
    let user = find_user_by_id(&auth.user_id, &state.pool)
        .await?
        .ok_or(AppError::UserError(UserError::NotFound))?;

    Ok(Json(UserResponse {
        id: user.id,
        email: user.email,
        display_name: user.display_name,
    }))
}
