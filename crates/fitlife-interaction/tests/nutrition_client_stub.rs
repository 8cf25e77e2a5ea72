//! Runs `HttpNutritionClient` against a local axum stub of the nutrition-data
//! endpoint.

use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use fitlife_core::account::ApiFailure;
use fitlife_core::config::NutritionConfig;
use fitlife_core::nutrition::NutritionApi;
use fitlife_interaction::HttpNutritionClient;
use serde_json::json;
use std::collections::HashMap;

async fn nutrition_data(Query(params): Query<HashMap<String, String>>) -> Response {
    if params.get("app_id").map(String::as_str) != Some("test-id")
        || params.get("app_key").map(String::as_str) != Some("test-key")
    {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if params.get("nutrition-type").map(String::as_str) != Some("logging") {
        return StatusCode::BAD_REQUEST.into_response();
    }

    match params.get("ingr").map(String::as_str) {
        Some("100g chicken breast") => Json(json!({
            "calories": 165,
            "totalWeight": 100.0,
            "totalNutrients": {
                "ENERC_KCAL": { "label": "Energy", "quantity": 165.0, "unit": "kcal" },
                "PROCNT": { "label": "Protein", "quantity": 31.0, "unit": "g" },
                "FAT": { "label": "Fat", "quantity": 3.6, "unit": "g" }
            }
        }))
        .into_response(),
        Some("boom") => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        _ => Json(json!({ "calories": 0, "totalWeight": 0.0, "totalNutrients": {} }))
            .into_response(),
    }
}

async fn spawn_stub() -> String {
    let router = Router::new().route("/api/nutrition-data", get(nutrition_data));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{addr}/")
}

fn client(base_url: &str, app_key: &str) -> HttpNutritionClient {
    HttpNutritionClient::new(&NutritionConfig {
        base_url: base_url.to_string(),
        app_id: Some("test-id".to_string()),
        app_key: Some(app_key.to_string()),
        ..NutritionConfig::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_lookup_returns_macros() {
    let base_url = spawn_stub().await;

    let facts = client(&base_url, "test-key")
        .lookup("100g chicken breast")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(facts.food, "100g chicken breast");
    assert_eq!(facts.calories, 165);
    assert_eq!(facts.protein, 31.0);
    assert_eq!(facts.fat, 3.6);
    assert_eq!(facts.carbs, 0.0);
}

#[tokio::test]
async fn test_unknown_food_has_no_facts() {
    let base_url = spawn_stub().await;

    let facts = client(&base_url, "test-key").lookup("xyzzy").await.unwrap();

    assert!(facts.is_none());
}

#[tokio::test]
async fn test_http_errors_keep_their_status() {
    let base_url = spawn_stub().await;

    let err = client(&base_url, "wrong-key").lookup("apple").await.unwrap_err();
    assert_eq!(err, ApiFailure::Unauthorized);

    let err = client(&base_url, "test-key").lookup("boom").await.unwrap_err();
    assert_eq!(err, ApiFailure::Server { status: 500 });
}

#[tokio::test]
async fn test_unreachable_server_does_not_leak_key() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{addr}/"), "secret-key")
        .lookup("apple")
        .await
        .unwrap_err();

    assert!(matches!(err, ApiFailure::NoConnectivity { .. }), "got {err:?}");
    assert!(!err.to_string().contains("secret-key"));
}
