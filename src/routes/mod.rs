use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post},
    Router,
};
use platebook_recipe::{RecipeFilterEngine, SavedRecipeStore};
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

use crate::email::EmailService;
use crate::middleware::auth_middleware;

mod auth;
mod collections;
mod contact;
mod favorites;
mod health;
mod recipes;
mod reviews;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub jwt_secret: String,
    pub page_limit: i64,
    pub filter_engine: RecipeFilterEngine,
    pub email: EmailService,
    pub saved_recipes: Arc<dyn SavedRecipeStore>,
}

pub fn router(state: AppState) -> Router {
    // Routes behind the auth middleware
    let protected_routes = Router::new()
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
        .route("/recipes", post(recipes::create))
        .route("/recipes/{id}", axum::routing::put(recipes::update))
        .route("/recipes/{id}", delete(recipes::remove))
        .route("/recipes/{id}/image", post(recipes::upload_image))
        .route("/recipes/{id}/reviews", post(reviews::add))
        .route("/recipes/{id}/save", post(favorites::save))
        .route("/recipes/{id}/save", delete(favorites::unsave))
        .route("/saved-recipes", get(favorites::list))
        .route(
            "/collections",
            get(collections::list).post(collections::create),
        )
        .route("/collections/{id}", get(collections::detail))
        .route("/collections/{id}", delete(collections::remove))
        .route(
            "/collections/{id}/recipes/{recipe_id}",
            post(collections::add_recipe),
        )
        .route(
            "/collections/{id}/recipes/{recipe_id}",
            delete(collections::remove_recipe),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        // Health check endpoints (no auth required)
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(state.pool.clone())
        .merge(
            Router::new()
                // Public routes
                .route("/register", post(auth::register))
                .route("/login", post(auth::login))
                .route("/contact", post(contact::submit))
                .route("/recipes", get(recipes::list))
                .route("/recipes/{id}", get(recipes::detail))
                .route("/recipes/{id}/scale", get(recipes::scale))
                .route("/recipes/{id}/image", get(recipes::serve_image))
                .route("/recipes/{id}/reviews", get(reviews::list))
                .merge(protected_routes)
                .with_state(state),
        )
        .layer(TraceLayer::new_for_http())
}
