//! Book instances (copies) repository for database operations

use chrono::NaiveDate;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        book_instance::{BookInstance, LoanStatus, LoanedCopy},
        pagination::Pagination,
    },
};

const LOANED_COPY_COLUMNS: &str = r#"
    SELECT bi.id, bi.book_id, b.title AS book_title, bi.imprint, bi.due_back,
           bi.status, bi.borrower_id, u.username AS borrower_username
    FROM book_instances bi
    JOIN books b ON b.id = bi.book_id
    LEFT JOIN users u ON u.id = bi.borrower_id
"#;

#[derive(Clone)]
pub struct BookInstancesRepository {
    pool: Pool<Postgres>,
}

impl BookInstancesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get copy by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<BookInstance> {
        sqlx::query_as::<_, BookInstance>(
            r#"
            SELECT id, book_id, imprint, due_back, status, borrower_id
            FROM book_instances
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book instance {} not found", id)))
    }

    /// Copies of a book
    pub async fn for_book(&self, book_id: i32) -> AppResult<Vec<BookInstance>> {
        let instances = sqlx::query_as::<_, BookInstance>(
            r#"
            SELECT id, book_id, imprint, due_back, status, borrower_id
            FROM book_instances
            WHERE book_id = $1
            ORDER BY due_back, id
            "#,
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(instances)
    }

    /// Copies on loan to one borrower, soonest due first
    pub async fn on_loan_to(
        &self,
        borrower_id: i32,
        pagination: &Pagination,
    ) -> AppResult<(Vec<LoanedCopy>, i64)> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM book_instances WHERE borrower_id = $1 AND status = $2",
        )
        .bind(borrower_id)
        .bind(LoanStatus::OnLoan)
        .fetch_one(&self.pool)
        .await?;

        let query = format!(
            "{} WHERE bi.borrower_id = $1 AND bi.status = $2 ORDER BY bi.due_back, bi.id LIMIT $3 OFFSET $4",
            LOANED_COPY_COLUMNS
        );
        let copies = sqlx::query_as::<_, LoanedCopy>(&query)
            .bind(borrower_id)
            .bind(LoanStatus::OnLoan)
            .bind(pagination.per_page)
            .bind(pagination.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok((copies, total))
    }

    /// Every copy on loan, soonest due first
    pub async fn on_loan(&self, pagination: &Pagination) -> AppResult<(Vec<LoanedCopy>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book_instances WHERE status = $1")
            .bind(LoanStatus::OnLoan)
            .fetch_one(&self.pool)
            .await?;

        let query = format!(
            "{} WHERE bi.status = $1 ORDER BY bi.due_back, bi.id LIMIT $2 OFFSET $3",
            LOANED_COPY_COLUMNS
        );
        let copies = sqlx::query_as::<_, LoanedCopy>(&query)
            .bind(LoanStatus::OnLoan)
            .bind(pagination.per_page)
            .bind(pagination.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok((copies, total))
    }

    pub async fn set_due_back(&self, id: Uuid, due_back: NaiveDate) -> AppResult<()> {
        let result = sqlx::query("UPDATE book_instances SET due_back = $1 WHERE id = $2")
            .bind(due_back)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book instance {} not found", id)));
        }
        Ok(())
    }
}
