use std::sync::Arc;

use platebook_recipe::{RecipeFilterEngine, SqliteSavedRecipeStore};

pub mod config;
pub mod email;
pub mod error;
pub mod middleware;
pub mod observability;
pub mod routes;

pub use routes::AppState;

/// Create app router for testing
///
/// This function creates the Axum router with all routes configured,
/// useful for integration testing without starting the full server.
pub async fn create_app(db_pool: sqlx::SqlitePool) -> anyhow::Result<axum::Router> {
    let email_config = config::EmailConfig::default();
    let dietary = config::DietaryConfig::default();

    let state = AppState {
        pool: db_pool.clone(),
        jwt_secret: "test-secret-key-minimum-32-bytes!!".to_string(),
        page_limit: config::CatalogConfig::default().page_limit,
        filter_engine: RecipeFilterEngine::new(dietary.classifier()),
        email: email::EmailService::new_mock(&email_config),
        saved_recipes: Arc::new(SqliteSavedRecipeStore::new(db_pool)),
    };

    Ok(routes::router(state))
}
