//! Router-level tests for the user API and the normalized error shape.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use stackpilot::config::AppConfig;
use stackpilot::http::{AppState, HttpServer};
use stackpilot::users::Role;

fn test_state() -> Arc<AppState> {
    let mut config = AppConfig::default();
    config.auth.jwt_secret = "integration-test-secret".to_string();
    Arc::new(AppState::new(&config))
}

fn test_router(state: Arc<AppState>) -> Router {
    HttpServer::with_state(AppConfig::default(), state).router()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn create_user(router: &Router, name: &str, email: &str) -> Value {
    let response = router
        .clone()
        .oneshot(post_json(
            "/api/users",
            json!({"name": name, "email": email, "password": "correct-horse"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[tokio::test]
async fn create_and_list_users() {
    let router = test_router(test_state());

    let created = create_user(&router, "Alice", "alice@example.com").await;
    assert_eq!(created["data"]["name"], "Alice");
    // Hashed password never leaves the server
    assert!(created["data"].get("password").is_none());

    create_user(&router, "Bob", "bob@example.com").await;

    let response = router
        .clone()
        .oneshot(Request::get("/api/users").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["count"], 2);
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 10);
    for doc in body["data"].as_array().unwrap() {
        assert!(doc.get("password").is_none());
        assert!(doc.get("__v").is_none());
    }
}

#[tokio::test]
async fn list_supports_search_and_pagination() {
    let router = test_router(test_state());
    create_user(&router, "Alice Johnson", "alice@example.com").await;
    create_user(&router, "Bob Smith", "bob@example.com").await;
    create_user(&router, "Carol Jones", "carol@sample.org").await;

    let response = router
        .clone()
        .oneshot(
            Request::get("/api/users?searchTerm=jo&sort=name&fields=name")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_json(response).await;

    assert_eq!(body["count"], 2);
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Alice Johnson", "Carol Jones"]);

    let response = router
        .clone()
        .oneshot(
            Request::get("/api/users?sort=name&page=2&limit=2")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_json(response).await;
    // count is the total match count; this page holds the one leftover
    assert_eq!(body["count"], 3);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["page"], 2);
}

#[tokio::test]
async fn invalid_payload_returns_normalized_validation_error() {
    let router = test_router(test_state());

    let response = router
        .clone()
        .oneshot(post_json(
            "/api/users",
            json!({"name": "", "email": "nope", "password": "short"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["statusCode"], 400);
    assert_eq!(body["message"], "Validation failed");

    let sources = body["errorSources"].as_array().unwrap();
    assert_eq!(sources.len(), 3);
    let paths: Vec<&str> = sources
        .iter()
        .map(|s| s["path"].as_str().unwrap())
        .collect();
    assert_eq!(paths, vec!["name", "email", "password"]);
}

#[tokio::test]
async fn malformed_body_returns_normalized_schema_error() {
    let router = test_router(test_state());

    let response = router
        .clone()
        .oneshot(post_json("/api/users", json!({"name": "Alice"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Request body validation failed");
    let sources = body["errorSources"].as_array().unwrap();
    assert_eq!(sources.len(), 1);
    assert_eq!(sources[0]["path"], "body");
}

#[tokio::test]
async fn malformed_id_returns_normalized_cast_error() {
    let router = test_router(test_state());

    let response = router
        .clone()
        .oneshot(
            Request::get("/api/users/not-a-uuid")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Invalid value");
    let sources = body["errorSources"].as_array().unwrap();
    assert_eq!(sources.len(), 1);
    assert_eq!(sources[0]["path"], "_id");
}

#[tokio::test]
async fn duplicate_email_conflicts() {
    let router = test_router(test_state());
    create_user(&router, "Alice", "alice@example.com").await;

    let response = router
        .clone()
        .oneshot(post_json(
            "/api/users",
            json!({"name": "Other", "email": "alice@example.com", "password": "correct-horse"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn delete_requires_admin_token() {
    let state = test_state();
    let router = test_router(state.clone());
    let created = create_user(&router, "Alice", "alice@example.com").await;
    let id = created["data"]["_id"].as_str().unwrap().to_string();

    // No token: fixed unauthorized message, cause never leaks
    let response = router
        .clone()
        .oneshot(
            Request::delete(format!("/api/users/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "You are not authorized");

    // Non-admin token: forbidden
    let user_token = state.verifier.sign(&id, "alice@example.com", Role::User).unwrap();
    let response = router
        .clone()
        .oneshot(
            Request::delete(format!("/api/users/{}", id))
                .header(header::AUTHORIZATION, format!("Bearer {}", user_token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Admin token succeeds
    let admin_token = state
        .verifier
        .sign("admin-1", "root@example.com", Role::Admin)
        .unwrap();
    let response = router
        .clone()
        .oneshot(
            Request::delete(format!("/api/users/{}", id))
                .header(header::AUTHORIZATION, format!("Bearer {}", admin_token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["deleted"], true);
}

#[tokio::test]
async fn users_can_update_themselves_but_not_their_role() {
    let state = test_state();
    let router = test_router(state.clone());
    let created = create_user(&router, "Alice", "alice@example.com").await;
    let id = created["data"]["_id"].as_str().unwrap().to_string();
    let token = state.verifier.sign(&id, "alice@example.com", Role::User).unwrap();

    let patch = |body: Value, token: &str| {
        Request::builder()
            .method("PATCH")
            .uri(format!("/api/users/{}", id))
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::from(body.to_string()))
            .unwrap()
    };

    let response = router
        .clone()
        .oneshot(patch(json!({"name": "Alice B"}), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["name"], "Alice B");

    let response = router
        .clone()
        .oneshot(patch(json!({"role": "admin"}), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn landing_page_and_health() {
    let router = test_router(test_state());

    let response = router
        .clone()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let page = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(page.contains("Ship your side project faster"));
    assert!(page.contains(r#"id="footer""#));

    let response = router
        .clone()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}
