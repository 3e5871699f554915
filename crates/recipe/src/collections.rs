//! Collections and saved recipes
//!
//! Collections group recipes under a name with an optional public flag;
//! memberships are idempotent. Saved recipes go through the
//! [`SavedRecipeStore`] trait so callers depend on an injected store, not
//! an ambient one.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;
use validator::Validate;

use crate::error::{RecipeError, RecipeResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub is_public: bool,
    pub recipe_count: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCollectionCommand {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Name must be between 1 and 100 characters"
    ))]
    pub name: String,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,

    #[serde(default)]
    pub is_public: bool,
}

fn collection_from_row(row: &SqliteRow) -> RecipeResult<Collection> {
    let created_at = DateTime::parse_from_rfc3339(row.get::<String, _>("created_at").as_str())?
        .with_timezone(&Utc);

    Ok(Collection {
        id: row.get("id"),
        user_id: row.get("user_id"),
        name: row.get("name"),
        description: row.get("description"),
        is_public: row.get("is_public"),
        recipe_count: row.get("recipe_count"),
        created_at,
    })
}

const COLLECTION_COLUMNS: &str = "c.id, c.user_id, c.name, c.description, c.is_public, \
     c.created_at, (SELECT COUNT(*) FROM collection_recipes m WHERE m.collection_id = c.id) \
     AS recipe_count";

pub async fn create_collection(
    user_id: &str,
    command: CreateCollectionCommand,
    pool: &SqlitePool,
) -> RecipeResult<Collection> {
    command
        .validate()
        .map_err(|e| RecipeError::ValidationError(e.to_string()))?;

    let collection = Collection {
        id: Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        name: command.name.trim().to_string(),
        description: command.description,
        is_public: command.is_public,
        recipe_count: 0,
        created_at: Utc::now(),
    };

    sqlx::query(
        r#"
        INSERT INTO collections (id, user_id, name, description, is_public, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(&collection.id)
    .bind(&collection.user_id)
    .bind(&collection.name)
    .bind(&collection.description)
    .bind(collection.is_public)
    .bind(collection.created_at.to_rfc3339())
    .execute(pool)
    .await?;

    Ok(collection)
}

/// Collections visible to a user: their own plus everyone's public ones
pub async fn list_visible_collections(
    user_id: &str,
    pool: &SqlitePool,
) -> RecipeResult<Vec<Collection>> {
    let rows = sqlx::query(&format!(
        "SELECT {COLLECTION_COLUMNS} FROM collections c \
         WHERE c.user_id = ?1 OR c.is_public = 1 ORDER BY c.created_at DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    rows.iter().map(collection_from_row).collect()
}

/// Fetch a collection the viewer may see; a private collection owned by
/// someone else reads as absent
pub async fn find_visible_collection(
    collection_id: &str,
    viewer_id: &str,
    pool: &SqlitePool,
) -> RecipeResult<Option<Collection>> {
    let row = sqlx::query(&format!(
        "SELECT {COLLECTION_COLUMNS} FROM collections c \
         WHERE c.id = ?1 AND (c.user_id = ?2 OR c.is_public = 1)"
    ))
    .bind(collection_id)
    .bind(viewer_id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(collection_from_row).transpose()
}

async fn find_owned_collection(
    collection_id: &str,
    user_id: &str,
    pool: &SqlitePool,
) -> RecipeResult<()> {
    let row = sqlx::query("SELECT id, user_id FROM collections WHERE id = ?1")
        .bind(collection_id)
        .fetch_optional(pool)
        .await?;

    match row {
        None => Err(RecipeError::CollectionNotFound),
        Some(row) if row.get::<String, _>("user_id") != user_id => {
            Err(RecipeError::PermissionDenied)
        }
        Some(_) => Ok(()),
    }
}

/// Idempotent: adding a recipe that is already in the collection is a no-op
pub async fn add_recipe_to_collection(
    collection_id: &str,
    recipe_id: &str,
    user_id: &str,
    pool: &SqlitePool,
) -> RecipeResult<()> {
    find_owned_collection(collection_id, user_id, pool).await?;

    let recipe = sqlx::query("SELECT id FROM recipes WHERE id = ?1")
        .bind(recipe_id)
        .fetch_optional(pool)
        .await?;
    if recipe.is_none() {
        return Err(RecipeError::NotFound);
    }

    sqlx::query(
        r#"
        INSERT OR IGNORE INTO collection_recipes (collection_id, recipe_id, added_at)
        VALUES (?1, ?2, ?3)
        "#,
    )
    .bind(collection_id)
    .bind(recipe_id)
    .bind(Utc::now().to_rfc3339())
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn remove_recipe_from_collection(
    collection_id: &str,
    recipe_id: &str,
    user_id: &str,
    pool: &SqlitePool,
) -> RecipeResult<()> {
    find_owned_collection(collection_id, user_id, pool).await?;

    sqlx::query("DELETE FROM collection_recipes WHERE collection_id = ?1 AND recipe_id = ?2")
        .bind(collection_id)
        .bind(recipe_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Remove a collection and its memberships
pub async fn delete_collection(
    collection_id: &str,
    user_id: &str,
    pool: &SqlitePool,
) -> RecipeResult<()> {
    find_owned_collection(collection_id, user_id, pool).await?;

    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM collection_recipes WHERE collection_id = ?1")
        .bind(collection_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM collections WHERE id = ?1")
        .bind(collection_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}

pub async fn list_collection_recipe_ids(
    collection_id: &str,
    pool: &SqlitePool,
) -> RecipeResult<Vec<String>> {
    let rows = sqlx::query(
        "SELECT recipe_id FROM collection_recipes WHERE collection_id = ?1 ORDER BY added_at",
    )
    .bind(collection_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(|row| row.get("recipe_id")).collect())
}

/// Per-user saved-recipe store, injected rather than ambient
#[async_trait]
pub trait SavedRecipeStore: Send + Sync {
    async fn list(&self, user_id: &str) -> RecipeResult<Vec<String>>;
    async fn save(&self, user_id: &str, recipe_id: &str) -> RecipeResult<()>;
    async fn unsave(&self, user_id: &str, recipe_id: &str) -> RecipeResult<()>;
    async fn is_saved(&self, user_id: &str, recipe_id: &str) -> RecipeResult<bool>;
}

#[derive(Debug, Clone)]
pub struct SqliteSavedRecipeStore {
    pool: SqlitePool,
}

impl SqliteSavedRecipeStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SavedRecipeStore for SqliteSavedRecipeStore {
    async fn list(&self, user_id: &str) -> RecipeResult<Vec<String>> {
        let rows =
            sqlx::query("SELECT recipe_id FROM saved_recipes WHERE user_id = ?1 ORDER BY saved_at")
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.iter().map(|row| row.get("recipe_id")).collect())
    }

    async fn save(&self, user_id: &str, recipe_id: &str) -> RecipeResult<()> {
        let recipe = sqlx::query("SELECT id FROM recipes WHERE id = ?1")
            .bind(recipe_id)
            .fetch_optional(&self.pool)
            .await?;
        if recipe.is_none() {
            return Err(RecipeError::NotFound);
        }

        sqlx::query(
            "INSERT OR IGNORE INTO saved_recipes (user_id, recipe_id, saved_at) VALUES (?1, ?2, ?3)",
        )
        .bind(user_id)
        .bind(recipe_id)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn unsave(&self, user_id: &str, recipe_id: &str) -> RecipeResult<()> {
        sqlx::query("DELETE FROM saved_recipes WHERE user_id = ?1 AND recipe_id = ?2")
            .bind(user_id)
            .bind(recipe_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn is_saved(&self, user_id: &str, recipe_id: &str) -> RecipeResult<bool> {
        let row = sqlx::query("SELECT 1 FROM saved_recipes WHERE user_id = ?1 AND recipe_id = ?2")
            .bind(user_id)
            .bind(recipe_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.is_some())
    }
}
