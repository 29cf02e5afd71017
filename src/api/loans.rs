//! Loan endpoints: borrowed-copy listings and renewal

use axum::{
    extract::{Path, Query, State},
    response::Redirect,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        book_instance::{LoanedCopy, RenewBookForm, RenewalPage},
        pagination::{PageQuery, Paginated},
        user::Permission,
    },
    AppState,
};

use super::{see_other, today, AuthenticatedUser};

/// Copies on loan to the current user, soonest due first
#[utoipa::path(
    get,
    path = "/mybooks",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "One page of the user's loans", body = crate::models::pagination::LoanPage),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    )
)]
pub async fn my_borrowed(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Paginated<LoanedCopy>>> {
    let page = state
        .services
        .loans
        .borrowed_by(claims.user_id, query.page, today())
        .await?;
    Ok(Json(page))
}

/// Every copy on loan, soonest due first
#[utoipa::path(
    get,
    path = "/borrowed",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "One page of all loans", body = crate::models::pagination::LoanPage),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse),
        (status = 403, description = "Missing catalog.can_mark_returned", body = crate::error::ErrorResponse)
    )
)]
pub async fn all_borrowed(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Paginated<LoanedCopy>>> {
    claims.require(Permission::CanMarkReturned)?;

    let page = state.services.loans.all_borrowed(query.page, today()).await?;
    Ok(Json(page))
}

/// Renewal form proposing a due date three weeks from today
#[utoipa::path(
    get,
    path = "/book/{id}/renew",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Book instance ID")),
    responses(
        (status = 200, description = "Copy and renewal form", body = RenewalPage),
        (status = 403, description = "Missing catalog.can_mark_returned", body = crate::error::ErrorResponse),
        (status = 404, description = "Book instance not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn renewal_form(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<RenewalPage>> {
    claims.require(Permission::CanMarkReturned)?;

    let page = state.services.loans.renewal_page(id, today()).await?;
    Ok(Json(page))
}

/// Set a copy's due-back date
#[utoipa::path(
    post,
    path = "/book/{id}/renew",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Book instance ID")),
    request_body = RenewBookForm,
    responses(
        (status = 303, description = "Renewed; redirects to the list of all loans"),
        (status = 400, description = "Date in the past or more than 4 weeks ahead", body = crate::error::ErrorResponse),
        (status = 403, description = "Missing catalog.can_mark_returned", body = crate::error::ErrorResponse),
        (status = 404, description = "Book instance not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn renew_book(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(form): Json<RenewBookForm>,
) -> AppResult<Redirect> {
    claims.require(Permission::CanMarkReturned)?;

    state.services.loans.renew(id, &form, today()).await?;
    Ok(see_other("/borrowed"))
}
