#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    response::Response,
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tower::ServiceExt;

pub async fn setup_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    sqlx::migrate!("./migrations").run(&pool).await.unwrap();

    pool
}

pub async fn create_test_app(pool: SqlitePool) -> Router {
    platebook::create_app(pool).await.unwrap()
}

/// A registered user plus the session cookie returned at registration
pub struct TestUser {
    pub id: String,
    pub email: String,
    pub cookie: String,
}

/// Send a request, optionally with a JSON body and a session cookie
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(cookie) = cookie {
        builder = builder.header("cookie", cookie);
    }

    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    router.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Extract the auth_token cookie pair from a Set-Cookie header
pub fn session_cookie(response: &Response) -> String {
    let set_cookie = response
        .headers()
        .get("set-cookie")
        .expect("response carries no Set-Cookie header")
        .to_str()
        .unwrap();

    set_cookie
        .split(';')
        .next()
        .unwrap()
        .trim()
        .to_string()
}

/// Register an account and return its id together with the session cookie
pub async fn register_user(router: &Router, email: &str) -> TestUser {
    let response = send(
        router,
        Method::POST,
        "/register",
        None,
        Some(json!({
            "email": email,
            "password": "password123",
            "display_name": "Test Cook",
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let cookie = session_cookie(&response);
    let body = body_json(response).await;

    TestUser {
        id: body["id"].as_str().unwrap().to_string(),
        email: body["email"].as_str().unwrap().to_string(),
        cookie,
    }
}

/// A minimal valid recipe payload tests can override per field
pub fn recipe_payload(title: &str) -> Value {
    json!({
        "title": title,
        "description": "A recipe used by the integration tests.",
        "ingredients": ["2 cups flour", "1/2 cup sugar", "3 eggs"],
        "instructions": ["Mix everything.", "Bake."],
    })
}

/// Create a recipe through the API and return its JSON representation
pub async fn create_recipe(router: &Router, user: &TestUser, payload: Value) -> Value {
    let response = send(
        router,
        Method::POST,
        "/recipes",
        Some(&user.cookie),
        Some(payload),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

/// Post a review as `user` and assert it was accepted
pub async fn add_review(router: &Router, user: &TestUser, recipe_id: &str, rating: i64) {
    let response = send(
        router,
        Method::POST,
        &format!("/recipes/{recipe_id}/reviews"),
        Some(&user.cookie),
        Some(json!({
            "rating": rating,
            "content": "Review left by an integration test.",
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
}
