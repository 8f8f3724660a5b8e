use std::env;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value as JsonValue};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use clinic_backend::utils::crypto::hash_password;
use clinic_backend::AppState;

async fn setup() -> AppState {
    env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    env::set_var("DB_PATH", ":memory:");
    env::set_var("JWT_SECRET", "test_secret_key");
    env::set_var("TOKEN_TTL_MINUTES", "60");
    env::set_var("PUBLIC_RPS", "100");
    env::set_var("API_RPS", "100");
    let _ = clinic_backend::config::init_config();

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("pool");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");
    AppState::new(pool)
}

async fn seed_user(state: &AppState, email: &str, password: &str) {
    let hash = hash_password(password).expect("hash");
    sqlx::query("INSERT INTO users (name, email, password_hash) VALUES (?, ?, ?)")
        .bind("Patient 1")
        .bind(email)
        .bind(hash)
        .execute(&state.pool)
        .await
        .expect("seed user");
}

fn app(state: AppState) -> Router {
    let protected = Router::new()
        .route("/api/auth/me", get(clinic_backend::routes::auth::me))
        .layer(axum::middleware::from_fn(
            clinic_backend::middleware::auth::require_bearer_auth,
        ));
    Router::new()
        .route("/api/auth/login", post(clinic_backend::routes::auth::login))
        .merge(protected)
        .with_state(state)
}

async fn body_json(resp: axum::response::Response) -> JsonValue {
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn login_success_issues_token_usable_on_protected_route() {
    let state = setup().await;
    seed_user(&state, "patient1@example.com", "test123").await;
    let app = app(state);

    let req = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({"email": "patient1@example.com", "password": "test123"}).to_string(),
        ))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let token = body["token"].as_str().expect("token").to_string();
    assert!(!token.is_empty());
    assert_eq!(body["user"]["email"], "patient1@example.com");

    let req = Request::builder()
        .method("GET")
        .uri("/api/auth/me")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["email"], "patient1@example.com");
}

#[tokio::test]
async fn login_wrong_password_is_rejected() {
    let state = setup().await;
    seed_user(&state, "patient1@example.com", "test123").await;
    let app = app(state);

    let req = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({"email": "patient1@example.com", "password": "nope"}).to_string(),
        ))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(resp).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn login_unknown_email_is_rejected() {
    let state = setup().await;
    let app = app(state);

    let req = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({"email": "ghost@example.com", "password": "test123"}).to_string(),
        ))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_malformed_email_is_a_validation_error() {
    let state = setup().await;
    let app = app(state);

    let req = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({"email": "not-an-email", "password": "test123"}).to_string(),
        ))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn protected_route_requires_token() {
    let state = setup().await;
    let app = app(state);

    let req = Request::builder()
        .method("GET")
        .uri("/api/auth/me")
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = Request::builder()
        .method("GET")
        .uri("/api/auth/me")
        .header("authorization", "Bearer garbage")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
