use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::password::hash_password;
use crate::read_model::{insert_user, User};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterUserCommand {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[validate(length(
        min = 1,
        max = 100,
        message = "Display name must be between 1 and 100 characters"
    ))]
    pub display_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginCommand {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Register a new user and return the stored record
///
/// The password is hashed with Argon2id before it touches the database.
/// A duplicate email surfaces as [`UserError::EmailAlreadyExists`].
pub async fn register_user(command: RegisterUserCommand, pool: &SqlitePool) -> UserResult<User> {
    command
        .validate()
        .map_err(|e| UserError::ValidationError(e.to_string()))?;

    let user = User {
        id: Uuid::new_v4().to_string(),
        email: command.email.trim().to_lowercase(),
        display_name: command.display_name.trim().to_string(),
        password_hash: hash_password(&command.password)?,
        created_at: Utc::now(),
    };

    insert_user(&user, pool).await?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok(user)
}
