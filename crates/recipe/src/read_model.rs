//! Recipe persistence
//!
//! Raw sqlx queries against the recipes table. Ingredients, instructions
//! and tags live in JSON text columns and are converted to the typed
//! [`Recipe`](crate::model::Recipe) here, never downstream.

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::commands::UpdateRecipeCommand;
use crate::error::{RecipeError, RecipeResult};
use crate::model::{Difficulty, Recipe};

const RECIPE_COLUMNS: &str = "id, user_id, title, description, tags, difficulty, \
     cook_time_minutes, servings, ingredients, instructions, rating, review_count, created_at";

/// Stored recipe image, downscaled at upload time
#[derive(Debug, Clone)]
pub struct RecipeImage {
    pub content_type: String,
    pub data: Vec<u8>,
}

fn recipe_from_row(row: &SqliteRow) -> RecipeResult<Recipe> {
    let tags: Vec<String> = serde_json::from_str(row.get::<String, _>("tags").as_str())?;
    let ingredients: Vec<String> =
        serde_json::from_str(row.get::<String, _>("ingredients").as_str())?;
    let instructions: Vec<String> =
        serde_json::from_str(row.get::<String, _>("instructions").as_str())?;

    let difficulty: Difficulty = row
        .get::<String, _>("difficulty")
        .parse()
        .map_err(|_| RecipeError::ValidationError("Unknown difficulty in recipe row".to_string()))?;

    let created_at = DateTime::parse_from_rfc3339(row.get::<String, _>("created_at").as_str())?
        .with_timezone(&Utc);

    Ok(Recipe {
        id: row.get("id"),
        user_id: row.get("user_id"),
        title: row.get("title"),
        description: row.get("description"),
        tags,
        difficulty,
        cook_time_minutes: row.get("cook_time_minutes"),
        servings: row.get("servings"),
        ingredients,
        instructions,
        rating: row.get("rating"),
        review_count: row.get("review_count"),
        created_at,
    })
}

pub async fn insert_recipe(recipe: &Recipe, pool: &SqlitePool) -> RecipeResult<()> {
    sqlx::query(
        r#"
        INSERT INTO recipes (id, user_id, title, description, tags, difficulty,
            cook_time_minutes, servings, ingredients, instructions, rating, review_count, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
        "#,
    )
    .bind(&recipe.id)
    .bind(&recipe.user_id)
    .bind(&recipe.title)
    .bind(&recipe.description)
    .bind(serde_json::to_string(&recipe.tags)?)
    .bind(recipe.difficulty.to_string())
    .bind(recipe.cook_time_minutes)
    .bind(recipe.servings)
    .bind(serde_json::to_string(&recipe.ingredients)?)
    .bind(serde_json::to_string(&recipe.instructions)?)
    .bind(recipe.rating)
    .bind(recipe.review_count)
    .bind(recipe.created_at.to_rfc3339())
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn find_recipe(recipe_id: &str, pool: &SqlitePool) -> RecipeResult<Option<Recipe>> {
    let row = sqlx::query(&format!(
        "SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = ?1"
    ))
    .bind(recipe_id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(recipe_from_row).transpose()
}

/// The most recent recipes, newest first. Search and filtering run over
/// this bounded page in memory.
pub async fn list_recent_recipes(limit: i64, pool: &SqlitePool) -> RecipeResult<Vec<Recipe>> {
    let rows = sqlx::query(&format!(
        "SELECT {RECIPE_COLUMNS} FROM recipes ORDER BY created_at DESC LIMIT ?1"
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;

    rows.iter().map(recipe_from_row).collect()
}

pub async fn list_recipes_by_ids(ids: &[String], pool: &SqlitePool) -> RecipeResult<Vec<Recipe>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    // Column names are hardcoded; only placeholders are generated
    let placeholders = vec!["?"; ids.len()].join(", ");
    let sql = format!("SELECT {RECIPE_COLUMNS} FROM recipes WHERE id IN ({placeholders})");

    let mut query = sqlx::query(&sql);
    for id in ids {
        query = query.bind(id);
    }

    let rows = query.fetch_all(pool).await?;
    rows.iter().map(recipe_from_row).collect()
}

/// Apply the fields present in the command, leaving the rest untouched
pub async fn update_recipe_fields(
    recipe_id: &str,
    command: &UpdateRecipeCommand,
    pool: &SqlitePool,
) -> RecipeResult<()> {
    let mut updates = Vec::new();
    let mut update_query = String::from("UPDATE recipes SET ");

    if command.title.is_some() {
        updates.push("title = ?");
    }
    if command.description.is_some() {
        updates.push("description = ?");
    }
    if command.tags.is_some() {
        updates.push("tags = ?");
    }
    if command.difficulty.is_some() {
        updates.push("difficulty = ?");
    }
    if command.cook_time_minutes.is_some() {
        updates.push("cook_time_minutes = ?");
    }
    if command.servings.is_some() {
        updates.push("servings = ?");
    }
    if command.ingredients.is_some() {
        updates.push("ingredients = ?");
    }
    if command.instructions.is_some() {
        updates.push("instructions = ?");
    }

    if updates.is_empty() {
        return Ok(());
    }

    update_query.push_str(&updates.join(", "));
    update_query.push_str(" WHERE id = ?");

    // Bind parameters in the same order as the updates
    let mut query = sqlx::query(&update_query);

    if let Some(ref title) = command.title {
        query = query.bind(title);
    }
    if let Some(ref description) = command.description {
        query = query.bind(description);
    }
    if let Some(ref tags) = command.tags {
        query = query.bind(serde_json::to_string(tags)?);
    }
    if let Some(difficulty) = command.difficulty {
        query = query.bind(difficulty.to_string());
    }
    if let Some(cook_time_minutes) = command.cook_time_minutes {
        query = query.bind(cook_time_minutes);
    }
    if let Some(servings) = command.servings {
        query = query.bind(servings);
    }
    if let Some(ref ingredients) = command.ingredients {
        query = query.bind(serde_json::to_string(ingredients)?);
    }
    if let Some(ref instructions) = command.instructions {
        query = query.bind(serde_json::to_string(instructions)?);
    }

    query = query.bind(recipe_id);
    query.execute(pool).await?;

    Ok(())
}

/// Remove a recipe and everything hanging off it
pub async fn delete_recipe(recipe_id: &str, pool: &SqlitePool) -> RecipeResult<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM reviews WHERE recipe_id = ?1")
        .bind(recipe_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM collection_recipes WHERE recipe_id = ?1")
        .bind(recipe_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM saved_recipes WHERE recipe_id = ?1")
        .bind(recipe_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM recipe_images WHERE recipe_id = ?1")
        .bind(recipe_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM recipes WHERE id = ?1")
        .bind(recipe_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}

pub async fn upsert_recipe_image(
    recipe_id: &str,
    content_type: &str,
    data: &[u8],
    pool: &SqlitePool,
) -> RecipeResult<()> {
    sqlx::query(
        r#"
        INSERT INTO recipe_images (recipe_id, content_type, data, updated_at)
        VALUES (?1, ?2, ?3, ?4)
        ON CONFLICT(recipe_id) DO UPDATE SET
            content_type = excluded.content_type,
            data = excluded.data,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(recipe_id)
    .bind(content_type)
    .bind(data)
    .bind(Utc::now().to_rfc3339())
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn find_recipe_image(
    recipe_id: &str,
    pool: &SqlitePool,
) -> RecipeResult<Option<RecipeImage>> {
    let row = sqlx::query("SELECT content_type, data FROM recipe_images WHERE recipe_id = ?1")
        .bind(recipe_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| RecipeImage {
        content_type: row.get("content_type"),
        data: row.get("data"),
    }))
}
