//! Runs `HttpAccountClient` against a local axum stub of the account service.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use fitlife_core::account::{AccountApi, ApiFailure, Registration};
use fitlife_core::config::ApiConfig;
use fitlife_core::credential::{CredentialField, CredentialStore};
use fitlife_infrastructure::InMemoryCredentialStore;
use fitlife_interaction::{HttpAccountClient, RequestPipeline};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

/// Authorization headers seen by the stub, in request order.
type SeenAuth = Arc<Mutex<Vec<Option<String>>>>;

fn seen(headers: &HeaderMap, log: &SeenAuth) -> Option<String> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    log.lock().unwrap().push(value.clone());
    value
}

async fn login(Json(body): Json<Value>) -> Response {
    match (body["username"].as_str(), body["password"].as_str()) {
        (Some("emilys"), Some("emilyspass")) => Json(json!({
            "id": 1,
            "username": "emilys",
            "email": "emily.johnson@x.dummyjson.com",
            "firstName": "Emily",
            "lastName": "Johnson",
            "accessToken": format!("tok-{}", body["expiresInMins"]),
            "refreshToken": "refresh"
        }))
        .into_response(),
        (Some("forbidden"), _) => StatusCode::FORBIDDEN.into_response(),
        (Some("crash"), _) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        (Some("garbled"), _) => "not json".into_response(),
        _ => (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Invalid credentials" })))
            .into_response(),
    }
}

async fn register(
    State(log): State<SeenAuth>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    seen(&headers, &log);
    match body["email"].as_str() {
        Some("taken@x.com") => StatusCode::CONFLICT.into_response(),
        Some("bad") => StatusCode::BAD_REQUEST.into_response(),
        email => (
            StatusCode::CREATED,
            Json(json!({
                "message": "registered",
                "user": { "id": "u-42", "name": body["name"], "email": email },
                "token": "reg-token"
            })),
        )
            .into_response(),
    }
}

async fn profile(State(log): State<SeenAuth>, headers: HeaderMap) -> Response {
    match seen(&headers, &log).as_deref() {
        Some("Bearer good") => Json(json!({
            "id": 1,
            "firstName": "Emily",
            "lastName": "Johnson",
            "email": "emily.johnson@x.dummyjson.com",
            "role": "admin",
            "image": "https://dummyjson.com/icon/emilys/128"
        }))
        .into_response(),
        _ => StatusCode::UNAUTHORIZED.into_response(),
    }
}

async fn user(Path(id): Path<String>) -> Response {
    match id.as_str() {
        "missing" => StatusCode::NOT_FOUND.into_response(),
        "teapot" => StatusCode::IM_A_TEAPOT.into_response(),
        _ => Json(json!({ "id": id, "name": "Ana", "role": "TRAINER" })).into_response(),
    }
}

async fn users(State(log): State<SeenAuth>, headers: HeaderMap) -> Response {
    seen(&headers, &log);
    Json(json!({
        "users": [{ "id": 1, "firstName": "Emily" }, { "id": "2", "name": "Ana" }],
        "total": 208,
        "skip": 0,
        "limit": 2
    }))
    .into_response()
}

struct Stub {
    base_url: String,
    seen: SeenAuth,
}

async fn spawn_stub() -> Stub {
    let log = SeenAuth::default();
    let router = Router::new()
        .route("/users/login", post(login))
        .route("/users/register", post(register))
        .route("/users/profile", get(profile))
        .route("/users/{id}", get(user))
        .route("/users", get(users))
        .with_state(log.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    Stub {
        base_url: format!("http://{addr}/"),
        seen: log,
    }
}

fn client(base_url: &str, store: Arc<dyn CredentialStore>) -> HttpAccountClient {
    let config = ApiConfig {
        base_url: base_url.to_string(),
        ..ApiConfig::default()
    };
    HttpAccountClient::new(&config, RequestPipeline::authenticated(store)).unwrap()
}

fn anonymous_client(base_url: &str) -> HttpAccountClient {
    client(base_url, Arc::new(InMemoryCredentialStore::new()))
}

#[tokio::test]
async fn test_login_success_sends_token_lifetime() {
    let stub = spawn_stub().await;
    let client = anonymous_client(&stub.base_url);

    let session = client.login("emilys", "emilyspass").await.unwrap();

    assert_eq!(session.access_token.as_deref(), Some("tok-30"));
    assert_eq!(session.display_name().as_deref(), Some("Emily Johnson"));
    assert_eq!(session.email.as_deref(), Some("emily.johnson@x.dummyjson.com"));
}

#[tokio::test]
async fn test_login_status_buckets() {
    let stub = spawn_stub().await;
    let client = anonymous_client(&stub.base_url);

    assert_eq!(
        client.login("emilys", "wrong").await.unwrap_err(),
        ApiFailure::Unauthorized
    );
    assert_eq!(
        client.login("forbidden", "x").await.unwrap_err(),
        ApiFailure::Forbidden
    );
    assert_eq!(
        client.login("crash", "x").await.unwrap_err(),
        ApiFailure::Server { status: 500 }
    );
}

#[tokio::test]
async fn test_undecodable_body_is_unknown() {
    let stub = spawn_stub().await;
    let client = anonymous_client(&stub.base_url);

    let err = client.login("garbled", "x").await.unwrap_err();
    assert!(matches!(err, ApiFailure::Unknown { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_register_success_and_conflicts() {
    let stub = spawn_stub().await;
    let client = anonymous_client(&stub.base_url);

    let account = client
        .register(&Registration {
            email: "new@x.com".to_string(),
            password: "pw".to_string(),
            name: Some("New User".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(account.token.as_deref(), Some("reg-token"));
    let user = account.user.unwrap();
    assert_eq!(user.id.as_deref(), Some("u-42"));
    assert_eq!(user.name.as_deref(), Some("New User"));

    let taken = Registration {
        email: "taken@x.com".to_string(),
        password: "pw".to_string(),
        name: None,
    };
    assert_eq!(
        client.register(&taken).await.unwrap_err(),
        ApiFailure::Status { status: 409 }
    );
}

#[tokio::test]
async fn test_register_never_sends_stored_token() {
    let stub = spawn_stub().await;
    let store = Arc::new(InMemoryCredentialStore::new());
    store
        .save(CredentialField::Token, "stale".into())
        .await
        .unwrap();
    let client = client(&stub.base_url, store);

    client
        .register(&Registration {
            email: "new@x.com".to_string(),
            password: "pw".to_string(),
            name: None,
        })
        .await
        .unwrap();

    assert_eq!(stub.seen.lock().unwrap().as_slice(), &[None]);
}

#[tokio::test]
async fn test_profile_uses_explicit_token() {
    let stub = spawn_stub().await;
    let store = Arc::new(InMemoryCredentialStore::new());
    store
        .save(CredentialField::Token, "stale".into())
        .await
        .unwrap();
    let client = client(&stub.base_url, store);

    let user = client.fetch_profile("good").await.unwrap();

    assert_eq!(user.id, "1");
    assert_eq!(user.role.as_deref(), Some("admin"));
    assert_eq!(user.avatar.as_deref(), Some("https://dummyjson.com/icon/emilys/128"));
    assert_eq!(
        stub.seen.lock().unwrap().as_slice(),
        &[Some("Bearer good".to_string())]
    );

    assert_eq!(
        client.fetch_profile("expired").await.unwrap_err(),
        ApiFailure::Unauthorized
    );
}

#[tokio::test]
async fn test_stored_token_is_attached_to_plain_requests() {
    let stub = spawn_stub().await;
    let store = Arc::new(InMemoryCredentialStore::new());
    let client = client(&stub.base_url, store.clone());

    client.list_users().await.unwrap();
    store
        .save(CredentialField::Token, "abc123".into())
        .await
        .unwrap();
    let page = client.list_users().await.unwrap();

    assert_eq!(page.total, 208);
    assert_eq!(page.users.len(), 2);
    assert_eq!(page.users[0].id, "1");
    assert_eq!(page.users[1].display_name().as_deref(), Some("Ana"));
    assert_eq!(
        stub.seen.lock().unwrap().as_slice(),
        &[None, Some("Bearer abc123".to_string())]
    );
}

#[tokio::test]
async fn test_fetch_user_statuses() {
    let stub = spawn_stub().await;
    let client = anonymous_client(&stub.base_url);

    let user = client.fetch_user("17").await.unwrap();
    assert_eq!(user.id, "17");
    assert_eq!(user.role.as_deref(), Some("TRAINER"));

    assert_eq!(
        client.fetch_user("missing").await.unwrap_err(),
        ApiFailure::NotFound
    );
    assert_eq!(
        client.fetch_user("teapot").await.unwrap_err(),
        ApiFailure::Status { status: 418 }
    );
}

#[tokio::test]
async fn test_unreachable_server_is_no_connectivity() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = anonymous_client(&format!("http://{addr}/"));
    let err = client.login("emilys", "emilyspass").await.unwrap_err();

    assert!(matches!(err, ApiFailure::NoConnectivity { .. }), "got {err:?}");
}
