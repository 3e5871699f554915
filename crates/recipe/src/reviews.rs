//! Reviews and denormalized rating aggregates
//!
//! One review per user per recipe; reposting replaces the previous one.
//! The recipe row carries the average rating and review count, updated in
//! the same transaction as the review itself so list sorting never joins.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;
use validator::Validate;

use crate::error::{RecipeError, RecipeResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub recipe_id: String,
    pub user_id: String,
    pub author_name: String,
    pub rating: i64,
    pub title: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddReviewCommand {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i64,

    #[validate(length(max = 200, message = "Title must be at most 200 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 2000, message = "Content is required"))]
    pub content: String,
}

fn review_from_row(row: &SqliteRow) -> RecipeResult<Review> {
    let created_at = DateTime::parse_from_rfc3339(row.get::<String, _>("created_at").as_str())?
        .with_timezone(&Utc);

    Ok(Review {
        id: row.get("id"),
        recipe_id: row.get("recipe_id"),
        user_id: row.get("user_id"),
        author_name: row.get("author_name"),
        rating: row.get("rating"),
        title: row.get("title"),
        content: row.get("content"),
        created_at,
    })
}

/// Insert or replace the caller's review and refresh the recipe's
/// denormalized rating/review_count in the same transaction
pub async fn upsert_review(
    recipe_id: &str,
    user_id: &str,
    command: AddReviewCommand,
    pool: &SqlitePool,
) -> RecipeResult<Review> {
    command
        .validate()
        .map_err(|e| RecipeError::ValidationError(e.to_string()))?;

    let mut tx = pool.begin().await?;

    let exists = sqlx::query("SELECT id FROM recipes WHERE id = ?1")
        .bind(recipe_id)
        .fetch_optional(&mut *tx)
        .await?;
    if exists.is_none() {
        return Err(RecipeError::NotFound);
    }

    let author_name: String = sqlx::query("SELECT display_name FROM users WHERE id = ?1")
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?
        .map(|row| row.get("display_name"))
        .unwrap_or_default();

    let review = Review {
        id: Uuid::new_v4().to_string(),
        recipe_id: recipe_id.to_string(),
        user_id: user_id.to_string(),
        author_name,
        rating: command.rating,
        title: command.title,
        content: command.content,
        created_at: Utc::now(),
    };

    sqlx::query(
        r#"
        INSERT INTO reviews (id, recipe_id, user_id, rating, title, content, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        ON CONFLICT(recipe_id, user_id) DO UPDATE SET
            id = excluded.id,
            rating = excluded.rating,
            title = excluded.title,
            content = excluded.content,
            created_at = excluded.created_at
        "#,
    )
    .bind(&review.id)
    .bind(&review.recipe_id)
    .bind(&review.user_id)
    .bind(review.rating)
    .bind(&review.title)
    .bind(&review.content)
    .bind(review.created_at.to_rfc3339())
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        UPDATE recipes SET
            rating = (SELECT AVG(rating) FROM reviews WHERE recipe_id = ?1),
            review_count = (SELECT COUNT(*) FROM reviews WHERE recipe_id = ?1)
        WHERE id = ?1
        "#,
    )
    .bind(recipe_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(review)
}

/// Reviews for a recipe, newest first, with author display names
pub async fn list_reviews(recipe_id: &str, pool: &SqlitePool) -> RecipeResult<Vec<Review>> {
    let rows = sqlx::query(
        r#"
        SELECT r.id, r.recipe_id, r.user_id, r.rating, r.title, r.content, r.created_at,
            COALESCE(u.display_name, '') AS author_name
        FROM reviews r
        LEFT JOIN users u ON u.id = r.user_id
        WHERE r.recipe_id = ?1
        ORDER BY r.created_at DESC
        "#,
    )
    .bind(recipe_id)
    .fetch_all(pool)
    .await?;

    rows.iter().map(review_from_row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_review_command_bounds_rating() {
        let command = AddReviewCommand {
            rating: 0,
            title: None,
            content: "Too bland.".to_string(),
        };
        assert!(command.validate().is_err());

        let command = AddReviewCommand {
            rating: 6,
            title: None,
            content: "Off the chart.".to_string(),
        };
        assert!(command.validate().is_err());

        let command = AddReviewCommand {
            rating: 5,
            title: Some("Perfect".to_string()),
            content: "Made it twice already.".to_string(),
        };
        assert!(command.validate().is_ok());
    }

    #[test]
    fn test_add_review_command_requires_content() {
        let command = AddReviewCommand {
            rating: 4,
            title: None,
            content: String::new(),
        };
        assert!(command.validate().is_err());
    }
}
