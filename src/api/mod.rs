//! HTTP handlers and routing

pub mod auth;
pub mod authors;
pub mod books;
pub mod dashboard;
pub mod genres;
pub mod health;
pub mod loans;
pub mod openapi;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
    response::Redirect,
    routing::get,
    routing::post,
    Router,
};
use chrono::{NaiveDate, Utc};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::AppError, models::user::UserClaims, AppState};

/// Mount point of every endpoint
pub const API_PREFIX: &str = "/api/v1";

/// Extractor for authenticated user from JWT token
pub struct AuthenticatedUser(pub UserClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Authentication("Invalid authorization header format".to_string())
        })?;

        let claims = UserClaims::from_token(token, &state.config.auth.jwt_secret)
            .map_err(|e| AppError::Authentication(e.to_string()))?;

        Ok(AuthenticatedUser(claims))
    }
}

/// 303 to another endpoint of this API
pub fn see_other(path: &str) -> Redirect {
    Redirect::to(&format!("{}{}", API_PREFIX, path))
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Authentication
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
        // Home page
        .route("/", get(dashboard::index))
        // Books
        .route("/books", get(books::list_books))
        .route("/books/:id", get(books::get_book))
        .route("/book/create", get(books::create_form).post(books::create_book))
        .route("/book/:id/update", get(books::update_form).post(books::update_book))
        .route("/book/:id/delete", get(books::delete_confirmation).post(books::delete_book))
        // Authors
        .route("/authors", get(authors::list_authors))
        .route("/authors/:id", get(authors::get_author))
        .route("/author/create", get(authors::create_form).post(authors::create_author))
        .route("/author/:id/update", get(authors::update_form).post(authors::update_author))
        .route("/author/:id/delete", get(authors::delete_confirmation).post(authors::delete_author))
        // Genres
        .route("/genres", get(genres::list_genres))
        // Loans
        .route("/mybooks", get(loans::my_borrowed))
        .route("/borrowed", get(loans::all_borrowed))
        .route("/book/:id/renew", get(loans::renewal_form).post(loans::renew_book))
        .with_state(state);

    Router::new()
        .nest(API_PREFIX, api_v1)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
