//! Author endpoints: listing, detail and management

use axum::{
    extract::{Path, Query, State},
    response::Redirect,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        author::{Author, AuthorDetail, AuthorForm},
        pagination::{PageQuery, Paginated},
        user::Permission,
    },
    AppState,
};

use super::{see_other, AuthenticatedUser};

/// List authors, five per page
#[utoipa::path(
    get,
    path = "/authors",
    tag = "authors",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of authors", body = crate::models::pagination::AuthorPage),
        (status = 404, description = "Page out of range", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_authors(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Paginated<Author>>> {
    let page = state.services.catalog.list_authors(query.page).await?;
    Ok(Json(page))
}

/// Author details with their books
#[utoipa::path(
    get,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author details", body = AuthorDetail),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_author(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<AuthorDetail>> {
    let author = state.services.catalog.get_author(id).await?;
    Ok(Json(author))
}

/// Author form with its initial values
#[utoipa::path(
    get,
    path = "/author/create",
    tag = "authors",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Author form", body = AuthorForm),
        (status = 403, description = "Missing catalog.add_author", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_form(AuthenticatedUser(claims): AuthenticatedUser) -> AppResult<Json<AuthorForm>> {
    claims.require(Permission::AddAuthor)?;
    Ok(Json(AuthorForm::initial()))
}

/// Create an author
#[utoipa::path(
    post,
    path = "/author/create",
    tag = "authors",
    security(("bearer_auth" = [])),
    request_body = AuthorForm,
    responses(
        (status = 303, description = "Created; redirects to the author list"),
        (status = 400, description = "Form errors", body = crate::error::ErrorResponse),
        (status = 403, description = "Missing catalog.add_author", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_author(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(form): Json<AuthorForm>,
) -> AppResult<Redirect> {
    claims.require(Permission::AddAuthor)?;
    state.services.authors.create(form).await?;
    Ok(see_other("/authors"))
}

/// Author form filled from the stored author
#[utoipa::path(
    get,
    path = "/author/{id}/update",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author form", body = AuthorForm),
        (status = 403, description = "Missing catalog.change_author", body = crate::error::ErrorResponse),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_form(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<AuthorForm>> {
    claims.require(Permission::ChangeAuthor)?;
    let form = state.services.authors.edit_form(id).await?;
    Ok(Json(form))
}

/// Update an author's names and dates
#[utoipa::path(
    post,
    path = "/author/{id}/update",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Author ID")),
    request_body = AuthorForm,
    responses(
        (status = 303, description = "Updated; redirects to the author list"),
        (status = 400, description = "Form errors", body = crate::error::ErrorResponse),
        (status = 403, description = "Missing catalog.change_author", body = crate::error::ErrorResponse),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_author(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(form): Json<AuthorForm>,
) -> AppResult<Redirect> {
    claims.require(Permission::ChangeAuthor)?;
    state.services.authors.update(id, form).await?;
    Ok(see_other("/authors"))
}

/// The author about to be deleted
#[utoipa::path(
    get,
    path = "/author/{id}/delete",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author to confirm deletion of", body = Author),
        (status = 403, description = "Missing catalog.delete_author", body = crate::error::ErrorResponse),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_confirmation(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Author>> {
    claims.require(Permission::DeleteAuthor)?;
    let author = state.services.authors.get(id).await?;
    Ok(Json(author))
}

/// Delete an author; their books stay in the catalog without an author
#[utoipa::path(
    post,
    path = "/author/{id}/delete",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 303, description = "Deleted; redirects to the author list"),
        (status = 403, description = "Missing catalog.delete_author", body = crate::error::ErrorResponse),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_author(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Redirect> {
    claims.require(Permission::DeleteAuthor)?;
    state.services.authors.delete(id).await?;
    Ok(see_other("/authors"))
}
