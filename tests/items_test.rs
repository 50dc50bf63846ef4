mod common;

use axum::http::StatusCode;
use serde_json::json;

use pokedex_api::services::item_service::DEFAULT_ITEM_IMAGES;

#[tokio::test]
async fn create_item_without_image_gets_default_sprite() {
    let app = common::test_app().await;
    let id = common::create_pokemon(&app, 25, "Pikachu").await;

    for _ in 0..5 {
        let (status, json) = common::post_json(
            &app,
            &format!("/api/pokemon/{id}/items"),
            &json!({ "name": "Berry", "price": 5, "happiness": 10 }),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED, "{json}");
        let image = json["imageUrl"].as_str().unwrap_or_default();
        assert!(DEFAULT_ITEM_IMAGES.contains(&image), "unexpected image {image}");
    }
}

#[tokio::test]
async fn create_item_keeps_given_image_and_path_owner() {
    let app = common::test_app().await;
    let id = common::create_pokemon(&app, 25, "Pikachu").await;
    let other = common::create_pokemon(&app, 26, "Raichu").await;

    let (status, json) = common::post_json(
        &app,
        &format!("/api/pokemon/{id}/items"),
        &json!({
            "item": {
                "name": "Thunder Stone",
                "price": 300,
                "happiness": 0,
                "imageUrl": "thunder_stone.svg",
                "pokemonId": other,
            }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "{json}");
    assert_eq!(json["imageUrl"], "thunder_stone.svg");
    assert_eq!(json["pokemonId"], id);
}

#[tokio::test]
async fn create_item_validation_errors() {
    let app = common::test_app().await;
    let id = common::create_pokemon(&app, 25, "Pikachu").await;

    let (status, json) = common::post_json(
        &app,
        &format!("/api/pokemon/{id}/items"),
        &json!({ "name": "", "price": -3, "happiness": "sad" }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["errors"]["name"], json!(["can't be blank"]));
    assert_eq!(
        json["errors"]["price"],
        json!(["'-3' must be greater than or equal to 0"])
    );
    assert_eq!(json["errors"]["happiness"], json!(["'sad' is not a number"]));
}

#[tokio::test]
async fn create_item_for_missing_pokemon_is_404() {
    let app = common::test_app().await;
    let (status, _) = common::post_json(
        &app,
        "/api/pokemon/77/items",
        &json!({ "name": "Potion", "price": 1, "happiness": 1 }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_items_for_pokemon() {
    let app = common::test_app().await;
    let id = common::create_pokemon(&app, 25, "Pikachu").await;
    let other = common::create_pokemon(&app, 26, "Raichu").await;

    for (owner, name) in [(id, "Potion"), (other, "Elixir"), (id, "Berry")] {
        common::post_json(
            &app,
            &format!("/api/pokemon/{owner}/items"),
            &json!({ "name": name, "price": 1, "happiness": 1 }),
        )
        .await;
    }

    let (status, json) = common::get(&app, &format!("/api/pokemon/{id}/items")).await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = json
        .as_array()
        .map(|a| a.iter().filter_map(|i| i["name"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(names, ["Potion", "Berry"]);

    let (status, _) = common::get(&app, "/api/pokemon/999/items").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_item_partially() {
    let app = common::test_app().await;
    let id = common::create_pokemon(&app, 25, "Pikachu").await;
    let (_, item) = common::post_json(
        &app,
        &format!("/api/pokemon/{id}/items"),
        &json!({ "name": "Potion", "price": 20, "happiness": 5, "imageUrl": "potion.svg" }),
    )
    .await;
    let item_id = item["id"].as_i64().unwrap_or_default();

    let (status, json) = common::patch_json(
        &app,
        &format!("/api/items/{item_id}"),
        &json!({ "price": "35" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "{json}");
    assert_eq!(json["price"], 35);
    assert_eq!(json["name"], "Potion");
    assert_eq!(json["imageUrl"], "potion.svg");
}

#[tokio::test]
async fn update_item_to_missing_owner_fails_validation() {
    let app = common::test_app().await;
    let id = common::create_pokemon(&app, 25, "Pikachu").await;
    let (_, item) = common::post_json(
        &app,
        &format!("/api/pokemon/{id}/items"),
        &json!({ "name": "Potion", "price": 20, "happiness": 5 }),
    )
    .await;
    let item_id = item["id"].as_i64().unwrap_or_default();

    let (status, json) = common::put_json(
        &app,
        &format!("/api/items/{item_id}"),
        &json!({ "pokemonId": 4040 }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["errors"]["pokemon"], json!(["must exist"]));
}

#[tokio::test]
async fn update_missing_item_is_404() {
    let app = common::test_app().await;
    let (status, _) = common::patch_json(&app, "/api/items/5", &json!({ "price": 1 })).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_item_returns_id() {
    let app = common::test_app().await;
    let id = common::create_pokemon(&app, 25, "Pikachu").await;
    let (_, item) = common::post_json(
        &app,
        &format!("/api/pokemon/{id}/items"),
        &json!({ "name": "Potion", "price": 20, "happiness": 5 }),
    )
    .await;
    let item_id = item["id"].as_i64().unwrap_or_default();

    let (status, json) = common::delete(&app, &format!("/api/items/{item_id}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "id": item_id }));

    let (_, detail) = common::get(&app, &format!("/api/pokemon/{id}")).await;
    assert_eq!(detail["items"], json!([]));
}

#[tokio::test]
async fn unparseable_item_id_is_404_json() {
    let app = common::test_app().await;

    let (status, json) = common::patch_json(&app, "/api/items/potion", &json!({ "price": 1 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "NOT_FOUND");

    let (status, json) = common::delete(&app, "/api/items/-").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "NOT_FOUND");
}
