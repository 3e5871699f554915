use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{UserError, UserResult};

/// Session lifetime: 7 days
const TOKEN_EXPIRATION_SECONDS: u64 = 7 * 24 * 60 * 60;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // user_id
    pub email: String,
    pub name: String,
    pub exp: usize, // Expiration time (as UTC timestamp)
    pub iat: usize, // Issued at (as UTC timestamp)
}

/// Generate a JWT token for a user
/// Token expires in 7 days
/// Uses HS256 algorithm with secret from config
pub fn generate_jwt(
    user_id: String,
    email: String,
    name: String,
    secret: &str,
) -> UserResult<String> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| UserError::TokenError(e.to_string()))?
        .as_secs() as usize;

    let claims = Claims {
        sub: user_id,
        email,
        name,
        exp: now + TOKEN_EXPIRATION_SECONDS as usize,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| UserError::TokenError(e.to_string()))
}

/// Validate and decode a JWT token
pub fn validate_jwt(token: &str, secret: &str) -> UserResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| UserError::TokenError(e.to_string()))?;

    Ok(token_data.claims)
}
