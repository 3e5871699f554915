use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::CookieJar;
use platebook_user::validate_jwt;
use serde_json::json;

use crate::routes::AppState;

/// Auth extension containing the identity extracted from the JWT
#[derive(Clone, Debug)]
pub struct Auth {
    pub user_id: String,
}

fn unauthorized(reason: &str) -> Response {
    tracing::warn!("Rejecting request: {reason}");
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "Authentication required" })),
    )
        .into_response()
}

/// Authentication middleware that validates the JWT from the auth cookie
///
/// Extracts the auth_token cookie, validates the JWT, verifies the user
/// still exists, and inserts an [`Auth`] extension with the user id.
/// Failures are 401 JSON responses.
pub async fn auth_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let Some(cookie) = jar.get("auth_token") else {
        return unauthorized("missing auth_token cookie");
    };

    let claims = match validate_jwt(cookie.value(), &state.jwt_secret) {
        Ok(c) => c,
        Err(e) => {
            return unauthorized(&format!("invalid JWT: {e}"));
        }
    };

    // The token may outlive the account; confirm the user still exists
    let user_exists = sqlx::query("SELECT id FROM users WHERE id = ?1")
        .bind(&claims.sub)
        .fetch_optional(&state.pool)
        .await;

    match user_exists {
        Ok(Some(_)) => {
            req.extensions_mut().insert(Auth {
                user_id: claims.sub,
            });
            next.run(req).await
        }
        Ok(None) => unauthorized(&format!("user {} no longer exists", claims.sub)),
        Err(e) => {
            tracing::error!("Database error checking user existence: {:?}", e);
            unauthorized("database error during auth check")
        }
    }
}
