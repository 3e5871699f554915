#![allow(dead_code)]

use chrono::Utc;
use platebook_recipe::commands::CreateRecipeCommand;
use platebook_recipe::model::Recipe;
use platebook_recipe::read_model::insert_recipe;
use sqlx::SqlitePool;

/// In-memory database with the workspace migrations applied
pub async fn setup_pool() -> SqlitePool {
    let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
    sqlx::migrate!("../../migrations").run(&pool).await.unwrap();
    pool
}

/// Recipes reference users, so tests need author rows first
pub async fn insert_test_user(user_id: &str, pool: &SqlitePool) {
    sqlx::query(
        "INSERT INTO users (id, email, display_name, password_hash, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(user_id)
    .bind(format!("{user_id}@example.com"))
    .bind(format!("Cook {user_id}"))
    .bind("$argon2id$stub")
    .bind(Utc::now().to_rfc3339())
    .execute(pool)
    .await
    .unwrap();
}

pub fn create_command(title: &str) -> CreateRecipeCommand {
    CreateRecipeCommand {
        title: title.to_string(),
        description: format!("A test recipe named {title}."),
        tags: vec!["dinner".to_string()],
        difficulty: None,
        cook_time_minutes: None,
        servings: None,
        ingredients: vec!["2 cups flour".to_string(), "1/2 cup sugar".to_string()],
        instructions: vec!["Mix.".to_string(), "Bake.".to_string()],
    }
}

pub async fn insert_test_recipe(title: &str, user_id: &str, pool: &SqlitePool) -> Recipe {
    let recipe = create_command(title).into_recipe(user_id).unwrap();
    insert_recipe(&recipe, pool).await.unwrap();
    recipe
}
