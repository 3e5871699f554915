use axum::http::{Method, StatusCode};
use axum::Router;
use serde_json::{json, Value};

mod common;

async fn create_collection(app: &Router, user: &common::TestUser, body: Value) -> Value {
    let response = common::send(app, Method::POST, "/collections", Some(&user.cookie), Some(body)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    common::body_json(response).await
}

#[tokio::test]
async fn test_create_collection_defaults_to_private() {
    let pool = common::setup_test_db().await;
    let app = common::create_test_app(pool).await;
    let user = common::register_user(&app, "cook@example.com").await;

    let collection = create_collection(&app, &user, json!({ "name": "Weeknight Dinners" })).await;

    assert_eq!(collection["name"], "Weeknight Dinners");
    assert_eq!(collection["is_public"], false);
    assert_eq!(collection["recipe_count"], 0);
    assert_eq!(collection["user_id"], user.id.as_str());
}

#[tokio::test]
async fn test_adding_recipes_is_idempotent_and_counted() {
    let pool = common::setup_test_db().await;
    let app = common::create_test_app(pool).await;
    let user = common::register_user(&app, "cook@example.com").await;

    let recipe = common::create_recipe(&app, &user, common::recipe_payload("Pancakes")).await;
    let recipe_id = recipe["id"].as_str().unwrap();
    let collection = create_collection(&app, &user, json!({ "name": "Breakfast" })).await;
    let collection_id = collection["id"].as_str().unwrap();

    for _ in 0..2 {
        let response = common::send(
            &app,
            Method::POST,
            &format!("/collections/{collection_id}/recipes/{recipe_id}"),
            Some(&user.cookie),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    let response = common::send(
        &app,
        Method::GET,
        &format!("/collections/{collection_id}"),
        Some(&user.cookie),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let detail = common::body_json(response).await;

    assert_eq!(detail["recipe_count"], 1);
    assert_eq!(detail["recipes"].as_array().unwrap().len(), 1);
    assert_eq!(detail["recipes"][0]["title"], "Pancakes");
}

#[tokio::test]
async fn test_private_collections_are_hidden_from_other_users() {
    let pool = common::setup_test_db().await;
    let app = common::create_test_app(pool).await;
    let owner = common::register_user(&app, "owner@example.com").await;
    let other = common::register_user(&app, "other@example.com").await;

    let private = create_collection(&app, &owner, json!({ "name": "Secret Recipes" })).await;
    let public = create_collection(
        &app,
        &owner,
        json!({ "name": "Shared Favorites", "is_public": true }),
    )
    .await;

    // The owner sees both in the listing, the other user only the public one
    let response = common::send(&app, Method::GET, "/collections", Some(&owner.cookie), None).await;
    let body = common::body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    let response = common::send(&app, Method::GET, "/collections", Some(&other.cookie), None).await;
    let body = common::body_json(response).await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Shared Favorites"]);

    // Detail follows the same visibility rule
    let private_id = private["id"].as_str().unwrap();
    let response = common::send(
        &app,
        Method::GET,
        &format!("/collections/{private_id}"),
        Some(&other.cookie),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let public_id = public["id"].as_str().unwrap();
    let response = common::send(
        &app,
        Method::GET,
        &format!("/collections/{public_id}"),
        Some(&other.cookie),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_only_the_owner_can_modify_a_collection() {
    let pool = common::setup_test_db().await;
    let app = common::create_test_app(pool).await;
    let owner = common::register_user(&app, "owner@example.com").await;
    let other = common::register_user(&app, "other@example.com").await;

    let recipe = common::create_recipe(&app, &owner, common::recipe_payload("Pancakes")).await;
    let recipe_id = recipe["id"].as_str().unwrap();
    let collection = create_collection(
        &app,
        &owner,
        json!({ "name": "Shared Favorites", "is_public": true }),
    )
    .await;
    let collection_id = collection["id"].as_str().unwrap();

    let response = common::send(
        &app,
        Method::POST,
        &format!("/collections/{collection_id}/recipes/{recipe_id}"),
        Some(&other.cookie),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = common::send(
        &app,
        Method::DELETE,
        &format!("/collections/{collection_id}"),
        Some(&other.cookie),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_deleting_a_collection_preserves_its_recipes() {
    let pool = common::setup_test_db().await;
    let app = common::create_test_app(pool).await;
    let user = common::register_user(&app, "cook@example.com").await;

    let recipe = common::create_recipe(&app, &user, common::recipe_payload("Pancakes")).await;
    let recipe_id = recipe["id"].as_str().unwrap();
    let collection = create_collection(&app, &user, json!({ "name": "Breakfast" })).await;
    let collection_id = collection["id"].as_str().unwrap();

    common::send(
        &app,
        Method::POST,
        &format!("/collections/{collection_id}/recipes/{recipe_id}"),
        Some(&user.cookie),
        None,
    )
    .await;

    let response = common::send(
        &app,
        Method::DELETE,
        &format!("/collections/{collection_id}"),
        Some(&user.cookie),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = common::send(
        &app,
        Method::GET,
        &format!("/collections/{collection_id}"),
        Some(&user.cookie),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The recipe itself survives
    let response = common::send(
        &app,
        Method::GET,
        &format!("/recipes/{recipe_id}"),
        None,
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_removing_a_recipe_from_a_collection() {
    let pool = common::setup_test_db().await;
    let app = common::create_test_app(pool).await;
    let user = common::register_user(&app, "cook@example.com").await;

    let recipe = common::create_recipe(&app, &user, common::recipe_payload("Pancakes")).await;
    let recipe_id = recipe["id"].as_str().unwrap();
    let collection = create_collection(&app, &user, json!({ "name": "Breakfast" })).await;
    let collection_id = collection["id"].as_str().unwrap();

    common::send(
        &app,
        Method::POST,
        &format!("/collections/{collection_id}/recipes/{recipe_id}"),
        Some(&user.cookie),
        None,
    )
    .await;

    let response = common::send(
        &app,
        Method::DELETE,
        &format!("/collections/{collection_id}/recipes/{recipe_id}"),
        Some(&user.cookie),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = common::send(
        &app,
        Method::GET,
        &format!("/collections/{collection_id}"),
        Some(&user.cookie),
        None,
    )
    .await;
    let detail = common::body_json(response).await;
    assert_eq!(detail["recipe_count"], 0);
    assert!(detail["recipes"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_collection_name_is_required() {
    let pool = common::setup_test_db().await;
    let app = common::create_test_app(pool).await;
    let user = common::register_user(&app, "cook@example.com").await;

    let response = common::send(
        &app,
        Method::POST,
        "/collections",
        Some(&user.cookie),
        Some(json!({ "name": "" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
