//! User persistence
//!
//! Raw sqlx queries against the users table. Password hashes never leave
//! this crate except inside [`User`] for verification at login.

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::error::{UserError, UserResult};

#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

fn user_from_row(row: &SqliteRow) -> UserResult<User> {
    let created_at = DateTime::parse_from_rfc3339(row.get::<String, _>("created_at").as_str())
        .map_err(|e| UserError::ValidationError(format!("Invalid timestamp in user row: {e}")))?
        .with_timezone(&Utc);

    Ok(User {
        id: row.get("id"),
        email: row.get("email"),
        display_name: row.get("display_name"),
        password_hash: row.get("password_hash"),
        created_at,
    })
}

pub async fn insert_user(user: &User, pool: &SqlitePool) -> UserResult<()> {
    let result = sqlx::query(
        r#"
        INSERT INTO users (id, email, display_name, password_hash, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(&user.id)
    .bind(&user.email)
    .bind(&user.display_name)
    .bind(&user.password_hash)
    .bind(user.created_at.to_rfc3339())
    .execute(pool)
    .await;

    match result {
        Ok(_) => Ok(()),
        // The unique index on email reports duplicates as a constraint hit
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            Err(UserError::EmailAlreadyExists)
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn find_user_by_email(email: &str, pool: &SqlitePool) -> UserResult<Option<User>> {
    let row = sqlx::query(
        "SELECT id, email, display_name, password_hash, created_at FROM users WHERE email = ?1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(user_from_row).transpose()
}

pub async fn find_user_by_id(user_id: &str, pool: &SqlitePool) -> UserResult<Option<User>> {
    let row = sqlx::query(
        "SELECT id, email, display_name, password_hash, created_at FROM users WHERE id = ?1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(user_from_row).transpose()
}
