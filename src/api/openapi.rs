//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, authors, books, dashboard, genres, health, loans};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Library Catalog API",
        version = "1.0.0",
        description = "Local library catalog: books, authors, copies and loans"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::me,
        // Home page
        dashboard::index,
        // Books
        books::list_books,
        books::get_book,
        books::create_form,
        books::create_book,
        books::update_form,
        books::update_book,
        books::delete_confirmation,
        books::delete_book,
        // Authors
        authors::list_authors,
        authors::get_author,
        authors::create_form,
        authors::create_author,
        authors::update_form,
        authors::update_author,
        authors::delete_confirmation,
        authors::delete_author,
        // Genres
        genres::list_genres,
        // Loans
        loans::my_borrowed,
        loans::all_borrowed,
        loans::renewal_form,
        loans::renew_book,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::UserInfo,
            crate::models::user::Permission,
            // Home page
            crate::models::dashboard::DashboardPage,
            crate::models::dashboard::CatalogCounts,
            // Catalog
            crate::models::book::Book,
            crate::models::book::BookSummary,
            crate::models::book::BookDetail,
            crate::models::book::BookForm,
            crate::models::author::Author,
            crate::models::author::AuthorDetail,
            crate::models::author::AuthorForm,
            crate::models::genre::Genre,
            crate::models::pagination::BookPage,
            crate::models::pagination::AuthorPage,
            // Copies and loans
            crate::models::book_instance::BookInstance,
            crate::models::book_instance::LoanStatus,
            crate::models::book_instance::LoanedCopy,
            crate::models::book_instance::RenewBookForm,
            crate::models::book_instance::RenewalPage,
            crate::models::pagination::LoanPage,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "catalog", description = "Home page figures"),
        (name = "books", description = "Books in the catalog"),
        (name = "authors", description = "Authors in the catalog"),
        (name = "genres", description = "Book genres"),
        (name = "loans", description = "Borrowed copies and renewals")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_catalog_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/",
            "/books",
            "/books/{id}",
            "/book/create",
            "/book/{id}/renew",
            "/author/{id}/delete",
            "/mybooks",
            "/borrowed",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
