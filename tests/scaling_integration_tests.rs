use axum::http::{Method, StatusCode};
use serde_json::json;

mod common;

async fn create_scalable_recipe(
    app: &axum::Router,
    user: &common::TestUser,
    servings: i64,
    ingredients: &[&str],
) -> String {
    let mut payload = common::recipe_payload("Scalable Recipe");
    payload["servings"] = json!(servings);
    payload["ingredients"] = json!(ingredients);

    let body = common::create_recipe(app, user, payload).await;
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_scaling_up_a_recipe() {
    let pool = common::setup_test_db().await;
    let app = common::create_test_app(pool).await;
    let user = common::register_user(&app, "cook@example.com").await;

    let id = create_scalable_recipe(
        &app,
        &user,
        4,
        &["2 cups flour", "1/2 cup sugar", "3 eggs"],
    )
    .await;

    let response = common::send(
        &app,
        Method::GET,
        &format!("/recipes/{id}/scale?servings=6"),
        None,
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["original_servings"], 4);
    assert_eq!(body["servings"], 6);
    assert_eq!(
        body["ingredients"],
        json!(["3 cups flour", "3/4 cup sugar", "4.5 eggs"])
    );
}

#[tokio::test]
async fn test_scaling_down_a_mixed_fraction() {
    let pool = common::setup_test_db().await;
    let app = common::create_test_app(pool).await;
    let user = common::register_user(&app, "cook@example.com").await;

    let id = create_scalable_recipe(&app, &user, 3, &["1 1/2 cups milk"]).await;

    let response = common::send(
        &app,
        Method::GET,
        &format!("/recipes/{id}/scale?servings=1"),
        None,
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["ingredients"], json!(["1/2 cups milk"]));
}

#[tokio::test]
async fn test_scaling_to_the_same_servings_is_identity() {
    let pool = common::setup_test_db().await;
    let app = common::create_test_app(pool).await;
    let user = common::register_user(&app, "cook@example.com").await;

    let ingredients = ["2 cups flour", "1/2 cup sugar", "Salt to taste"];
    let id = create_scalable_recipe(&app, &user, 4, &ingredients).await;

    let response = common::send(
        &app,
        Method::GET,
        &format!("/recipes/{id}/scale?servings=4"),
        None,
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["ingredients"], json!(ingredients));
}

#[tokio::test]
async fn test_lines_without_quantities_pass_through() {
    let pool = common::setup_test_db().await;
    let app = common::create_test_app(pool).await;
    let user = common::register_user(&app, "cook@example.com").await;

    let id = create_scalable_recipe(
        &app,
        &user,
        2,
        &["1 onion", "a pinch of saffron", "2/3 cup stock"],
    )
    .await;

    let response = common::send(
        &app,
        Method::GET,
        &format!("/recipes/{id}/scale?servings=6"),
        None,
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(
        body["ingredients"],
        json!(["3 onion", "a pinch of saffron", "2 cup stock"])
    );
}

#[tokio::test]
async fn test_scaling_rejects_non_positive_servings() {
    let pool = common::setup_test_db().await;
    let app = common::create_test_app(pool).await;
    let user = common::register_user(&app, "cook@example.com").await;

    let id = create_scalable_recipe(&app, &user, 4, &["2 cups flour"]).await;

    let response = common::send(
        &app,
        Method::GET,
        &format!("/recipes/{id}/scale?servings=0"),
        None,
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = common::send(
        &app,
        Method::GET,
        &format!("/recipes/{id}/scale?servings=-2"),
        None,
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_scaling_an_unknown_recipe_is_not_found() {
    let pool = common::setup_test_db().await;
    let app = common::create_test_app(pool).await;

    let response = common::send(
        &app,
        Method::GET,
        "/recipes/no-such-id/scale?servings=2",
        None,
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
