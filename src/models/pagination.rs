//! Page-number pagination for list endpoints

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::{author::Author, book::BookSummary, book_instance::LoanedCopy};
use crate::error::{AppError, AppResult};

/// Page size of the book and author listings
pub const CATALOG_PAGE_SIZE: i64 = 5;
/// Page size of the loan listings
pub const LOANS_PAGE_SIZE: i64 = 10;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct PageQuery {
    /// Page number, starting at 1
    pub page: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub per_page: i64,
}

impl Pagination {
    pub fn new(page: Option<i64>, per_page: i64) -> AppResult<Self> {
        let page = page.unwrap_or(1);
        // Pages whose first row lies beyond i64 cannot hold any results
        if page < 1 || (page - 1).checked_mul(per_page).is_none() {
            return Err(AppError::NotFound(format!("Invalid page ({})", page)));
        }
        Ok(Self { page, per_page })
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }

    /// An empty listing still has one (empty) page
    pub fn num_pages(&self, total: i64) -> i64 {
        ((total + self.per_page - 1) / self.per_page).max(1)
    }

    pub fn ensure_in_range(&self, total: i64) -> AppResult<()> {
        if self.page > self.num_pages(total) {
            return Err(AppError::NotFound(format!(
                "Invalid page ({}): that page contains no results",
                self.page
            )));
        }
        Ok(())
    }
}

/// Paginated response wrapper
#[derive(Debug, Serialize, ToSchema)]
#[aliases(BookPage = Paginated<BookSummary>, AuthorPage = Paginated<Author>, LoanPage = Paginated<LoanedCopy>)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    /// Total number of rows across all pages
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub num_pages: i64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, total: i64, pagination: Pagination) -> Self {
        let num_pages = pagination.num_pages(total);
        Self {
            items,
            total,
            page: pagination.page,
            per_page: pagination.per_page,
            num_pages,
            has_next: pagination.page < num_pages,
            has_previous: pagination.page > 1,
        }
    }
}
