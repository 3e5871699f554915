use platebook_recipe::collections::{
    add_recipe_to_collection, create_collection, delete_collection, find_visible_collection,
    list_collection_recipe_ids, list_visible_collections, remove_recipe_from_collection,
    CreateCollectionCommand, SavedRecipeStore, SqliteSavedRecipeStore,
};
use platebook_recipe::error::RecipeError;

mod helpers;

fn collection(name: &str, is_public: bool) -> CreateCollectionCommand {
    CreateCollectionCommand {
        name: name.to_string(),
        description: None,
        is_public,
    }
}

#[tokio::test]
async fn test_membership_add_remove_and_counts() {
    let pool = helpers::setup_pool().await;
    helpers::insert_test_user("owner", &pool).await;

    let recipe = helpers::insert_test_recipe("Collected", "owner", &pool).await;
    let created = create_collection("owner", collection("Weeknight", false), &pool)
        .await
        .unwrap();

    add_recipe_to_collection(&created.id, &recipe.id, "owner", &pool)
        .await
        .unwrap();
    // Adding twice is a no-op
    add_recipe_to_collection(&created.id, &recipe.id, "owner", &pool)
        .await
        .unwrap();

    let ids = list_collection_recipe_ids(&created.id, &pool).await.unwrap();
    assert_eq!(ids, vec![recipe.id.clone()]);

    let visible = find_visible_collection(&created.id, "owner", &pool)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(visible.recipe_count, 1);

    remove_recipe_from_collection(&created.id, &recipe.id, "owner", &pool)
        .await
        .unwrap();
    assert!(list_collection_recipe_ids(&created.id, &pool)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_visibility_covers_own_and_public() {
    let pool = helpers::setup_pool().await;
    helpers::insert_test_user("owner", &pool).await;
    helpers::insert_test_user("viewer", &pool).await;

    let private = create_collection("owner", collection("Private", false), &pool)
        .await
        .unwrap();
    let public = create_collection("owner", collection("Public", true), &pool)
        .await
        .unwrap();

    let for_viewer = list_visible_collections("viewer", &pool).await.unwrap();
    let names: Vec<&str> = for_viewer.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Public"]);

    // A private collection owned by someone else reads as absent
    assert!(find_visible_collection(&private.id, "viewer", &pool)
        .await
        .unwrap()
        .is_none());
    assert!(find_visible_collection(&public.id, "viewer", &pool)
        .await
        .unwrap()
        .is_some());

    let for_owner = list_visible_collections("owner", &pool).await.unwrap();
    assert_eq!(for_owner.len(), 2);
}

#[tokio::test]
async fn test_only_the_owner_mutates_memberships() {
    let pool = helpers::setup_pool().await;
    helpers::insert_test_user("owner", &pool).await;
    helpers::insert_test_user("intruder", &pool).await;

    let recipe = helpers::insert_test_recipe("Guarded", "owner", &pool).await;
    let created = create_collection("owner", collection("Mine", true), &pool)
        .await
        .unwrap();

    let result = add_recipe_to_collection(&created.id, &recipe.id, "intruder", &pool).await;
    assert!(matches!(result, Err(RecipeError::PermissionDenied)));

    let result = delete_collection(&created.id, "intruder", &pool).await;
    assert!(matches!(result, Err(RecipeError::PermissionDenied)));
}

#[tokio::test]
async fn test_delete_collection_removes_memberships() {
    let pool = helpers::setup_pool().await;
    helpers::insert_test_user("owner", &pool).await;

    let recipe = helpers::insert_test_recipe("Orphaned", "owner", &pool).await;
    let created = create_collection("owner", collection("Doomed", false), &pool)
        .await
        .unwrap();
    add_recipe_to_collection(&created.id, &recipe.id, "owner", &pool)
        .await
        .unwrap();

    delete_collection(&created.id, "owner", &pool).await.unwrap();

    assert!(find_visible_collection(&created.id, "owner", &pool)
        .await
        .unwrap()
        .is_none());
    assert!(list_collection_recipe_ids(&created.id, &pool)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_saved_recipe_store_round_trip() {
    let pool = helpers::setup_pool().await;
    helpers::insert_test_user("saver", &pool).await;

    let recipe = helpers::insert_test_recipe("Kept", "saver", &pool).await;
    let store = SqliteSavedRecipeStore::new(pool.clone());

    assert!(!store.is_saved("saver", &recipe.id).await.unwrap());

    store.save("saver", &recipe.id).await.unwrap();
    // Saving twice is idempotent
    store.save("saver", &recipe.id).await.unwrap();

    assert!(store.is_saved("saver", &recipe.id).await.unwrap());
    assert_eq!(store.list("saver").await.unwrap(), vec![recipe.id.clone()]);

    store.unsave("saver", &recipe.id).await.unwrap();
    assert!(store.list("saver").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_saving_unknown_recipe_is_not_found() {
    let pool = helpers::setup_pool().await;
    helpers::insert_test_user("saver", &pool).await;

    let store = SqliteSavedRecipeStore::new(pool);
    let result = store.save("saver", "missing").await;
    assert!(matches!(result, Err(RecipeError::NotFound)));
}
