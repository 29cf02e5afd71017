//! Router tests that need neither Postgres nor Redis
//!
//! Authentication and permission checks run before any store is touched,
//! so the state is built on a lazy pool and a lazy session store.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use tower::util::ServiceExt;

use library_catalog::{
    api,
    models::user::{Permission, UserClaims},
    repository::Repository,
    services::{sessions::SessionStore, Services},
    AppConfig, AppState,
};

fn setup_app() -> (Router, AppConfig) {
    let config = AppConfig::default();
    let pool = PgPoolOptions::new()
        .connect_lazy(&config.database.url)
        .expect("lazy pool");
    let sessions =
        SessionStore::lazy(&config.redis.url, config.session.ttl_seconds).expect("lazy session store");
    let services = Services::new(Repository::new(pool), config.auth.clone(), sessions);

    let state = AppState {
        config: Arc::new(config.clone()),
        services: Arc::new(services),
    };
    (api::router(state), config)
}

fn token_with(config: &AppConfig, permissions: Vec<Permission>) -> String {
    let now = chrono::Utc::now().timestamp();
    UserClaims {
        sub: "reader".to_string(),
        user_id: 7,
        is_superuser: false,
        permissions,
        exp: now + 3600,
        iat: now,
    }
    .create_token(&config.auth.jwt_secret)
    .expect("token")
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

fn post_json(uri: &str, token: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_needs_no_backing_store() {
    let (app, _) = setup_app();

    let (status, body) = send(app, get("/api/v1/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn my_books_requires_login() {
    let (app, _) = setup_app();

    let (status, body) = send(app, get("/api/v1/mybooks", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn garbage_token_is_rejected() {
    let (app, _) = setup_app();

    let (status, _) = send(app, get("/api/v1/mybooks", Some("not.a.token"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_signed_with_another_secret_is_rejected() {
    let (app, config) = setup_app();
    let mut other = config.clone();
    other.auth.jwt_secret = "some-other-secret".to_string();
    let token = token_with(&other, Permission::ALL.to_vec());

    let (status, _) = send(app, get("/api/v1/borrowed", Some(&token))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn huge_page_numbers_are_not_found() {
    let (app, config) = setup_app();
    let token = token_with(&config, vec![Permission::CanMarkReturned]);

    for uri in [
        "/api/v1/books?page=9223372036854775807",
        "/api/v1/authors?page=1844674407370955163",
        "/api/v1/borrowed?page=9223372036854775807",
    ] {
        let (status, _) = send(app.clone(), get(uri, Some(&token))).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "GET {}", uri);
    }

    let (status, _) = send(app, get("/api/v1/books?page=0", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn librarian_pages_are_forbidden_without_permission() {
    let (app, config) = setup_app();
    let token = token_with(&config, vec![]);
    let copy = uuid::Uuid::new_v4();

    for uri in [
        "/api/v1/borrowed".to_string(),
        format!("/api/v1/book/{}/renew", copy),
        "/api/v1/author/create".to_string(),
        "/api/v1/author/1/update".to_string(),
        "/api/v1/author/1/delete".to_string(),
        "/api/v1/book/create".to_string(),
        "/api/v1/book/1/update".to_string(),
        "/api/v1/book/1/delete".to_string(),
    ] {
        let (status, _) = send(app.clone(), get(&uri, Some(&token))).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "GET {}", uri);
    }
}

#[tokio::test]
async fn one_permission_does_not_grant_another() {
    let (app, config) = setup_app();
    let token = token_with(&config, vec![Permission::AddAuthor, Permission::CanMarkReturned]);

    let (status, _) = send(app.clone(), get("/api/v1/book/create", Some(&token))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(app, get("/api/v1/author/1/delete", Some(&token))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn author_create_form_offers_initial_death_date() {
    let (app, config) = setup_app();
    let token = token_with(&config, vec![Permission::AddAuthor]);

    let (status, body) = send(app, get("/api/v1/author/create", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["date_of_death"], "2018-05-01");
    assert_eq!(body["first_name"], "");
}

#[tokio::test]
async fn renewal_post_without_permission_changes_nothing() {
    let (app, config) = setup_app();
    let token = token_with(&config, vec![]);
    let uri = format!("/api/v1/book/{}/renew", uuid::Uuid::new_v4());

    let (status, body) = send(app, post_json(&uri, &token, json!({ "renewal_date": "2030-01-01" }))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["message"].as_str().unwrap().contains("catalog.can_mark_returned"));
}

#[tokio::test]
async fn management_posts_without_permission_are_forbidden() {
    let (app, config) = setup_app();
    let token = token_with(&config, vec![]);

    let author = json!({ "first_name": "Ursula", "last_name": "Le Guin" });
    let (status, _) = send(app.clone(), post_json("/api/v1/author/create", &token, author)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(app.clone(), post_json("/api/v1/author/1/delete", &token, json!({}))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(app, post_json("/api/v1/book/1/delete", &token, json!({}))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let (app, _) = setup_app();

    let (status, body) = send(app, get("/api-docs/openapi.json", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/book/{id}/renew"].is_object());
}
