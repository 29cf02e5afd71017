//! Catalog-wide aggregate queries

use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{book_instance::LoanStatus, dashboard::CatalogCounts},
};

#[derive(Clone)]
pub struct CatalogRepository {
    pool: Pool<Postgres>,
}

impl CatalogRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Home page figures; `title_pattern` is an ILIKE pattern matched once per book
    pub async fn counts(&self, title_pattern: &str) -> AppResult<CatalogCounts> {
        let counts = sqlx::query_as::<_, CatalogCounts>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM books) AS num_books,
                (SELECT COUNT(*) FROM book_instances) AS num_instances,
                (SELECT COUNT(*) FROM book_instances WHERE status = $1) AS num_instances_available,
                (SELECT COUNT(*) FROM authors) AS num_authors,
                (SELECT COUNT(*) FROM genres) AS num_genres,
                (SELECT COUNT(*) FROM books WHERE title ILIKE $2) AS books_containing_word
            "#,
        )
        .bind(LoanStatus::Available)
        .bind(title_pattern)
        .fetch_one(&self.pool)
        .await?;

        Ok(counts)
    }

    /// Round trip to the database, for readiness probes
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
