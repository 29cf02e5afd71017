//! Book endpoints: listing, detail and management

use axum::{
    extract::{Path, Query, State},
    response::Redirect,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        book::{Book, BookDetail, BookForm, BookSummary},
        pagination::{PageQuery, Paginated},
        user::Permission,
    },
    AppState,
};

use super::{see_other, AuthenticatedUser};

/// List books, five per page
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of books", body = crate::models::pagination::BookPage),
        (status = 404, description = "Page out of range", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Paginated<BookSummary>>> {
    let page = state.services.catalog.list_books(query.page).await?;
    Ok(Json(page))
}

/// Book details with author, genres and copies
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = BookDetail),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BookDetail>> {
    let book = state.services.catalog.get_book(id).await?;
    Ok(Json(book))
}

/// Empty book form
#[utoipa::path(
    get,
    path = "/book/create",
    tag = "books",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Book form", body = BookForm),
        (status = 403, description = "Missing catalog.add_book", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_form(AuthenticatedUser(claims): AuthenticatedUser) -> AppResult<Json<BookForm>> {
    claims.require(Permission::AddBook)?;
    Ok(Json(BookForm::default()))
}

/// Create a book
#[utoipa::path(
    post,
    path = "/book/create",
    tag = "books",
    security(("bearer_auth" = [])),
    request_body = BookForm,
    responses(
        (status = 303, description = "Created; redirects to the book list"),
        (status = 400, description = "Form errors", body = crate::error::ErrorResponse),
        (status = 403, description = "Missing catalog.add_book", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(form): Json<BookForm>,
) -> AppResult<Redirect> {
    claims.require(Permission::AddBook)?;
    state.services.books.create(form).await?;
    Ok(see_other("/books"))
}

/// Book form filled from the stored book
#[utoipa::path(
    get,
    path = "/book/{id}/update",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book form", body = BookForm),
        (status = 403, description = "Missing catalog.change_book", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_form(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<BookForm>> {
    claims.require(Permission::ChangeBook)?;
    let form = state.services.books.edit_form(id).await?;
    Ok(Json(form))
}

/// Update every field of a book
#[utoipa::path(
    post,
    path = "/book/{id}/update",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    request_body = BookForm,
    responses(
        (status = 303, description = "Updated; redirects to the book list"),
        (status = 400, description = "Form errors", body = crate::error::ErrorResponse),
        (status = 403, description = "Missing catalog.change_book", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(form): Json<BookForm>,
) -> AppResult<Redirect> {
    claims.require(Permission::ChangeBook)?;
    state.services.books.update(id, form).await?;
    Ok(see_other("/books"))
}

/// The book about to be deleted
#[utoipa::path(
    get,
    path = "/book/{id}/delete",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book to confirm deletion of", body = Book),
        (status = 403, description = "Missing catalog.delete_book", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_confirmation(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Book>> {
    claims.require(Permission::DeleteBook)?;
    let book = state.services.books.get(id).await?;
    Ok(Json(book))
}

/// Delete a book
#[utoipa::path(
    post,
    path = "/book/{id}/delete",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 303, description = "Deleted; redirects to the book list"),
        (status = 403, description = "Missing catalog.delete_book", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Copies of the book still exist", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Redirect> {
    claims.require(Permission::DeleteBook)?;
    state.services.books.delete(id).await?;
    Ok(see_other("/books"))
}
