//! Books repository for database operations

use sqlx::{Pool, Postgres, Transaction};

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookForm, BookSummary},
        pagination::Pagination,
    },
};

use super::is_foreign_key_violation;

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            "SELECT id, title, author_id, summary, isbn FROM books WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// One page of books, by title
    pub async fn list(&self, pagination: &Pagination) -> AppResult<(Vec<BookSummary>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;

        let books = sqlx::query_as::<_, BookSummary>(
            r#"
            SELECT b.id, b.title, b.author_id,
                   a.last_name || ', ' || a.first_name AS author_name
            FROM books b
            LEFT JOIN authors a ON a.id = b.author_id
            ORDER BY b.title, b.id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(pagination.per_page)
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok((books, total))
    }

    pub async fn genre_ids(&self, book_id: i32) -> AppResult<Vec<i32>> {
        let ids: Vec<i32> = sqlx::query_scalar(
            "SELECT genre_id FROM book_genres WHERE book_id = $1 ORDER BY genre_id",
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(ids)
    }

    /// Insert a book and its genre links
    pub async fn create(&self, form: &BookForm) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author_id, summary, isbn)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, author_id, summary, isbn
            "#,
        )
        .bind(&form.title)
        .bind(form.author_id)
        .bind(&form.summary)
        .bind(&form.isbn)
        .fetch_one(&mut *tx)
        .await?;

        Self::link_genres(&mut tx, book.id, &form.genre_ids).await?;
        tx.commit().await?;

        Ok(book)
    }

    /// Replace every field of a book, genre links included
    pub async fn update(&self, id: i32, form: &BookForm) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let book = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = $1, author_id = $2, summary = $3, isbn = $4
            WHERE id = $5
            RETURNING id, title, author_id, summary, isbn
            "#,
        )
        .bind(&form.title)
        .bind(form.author_id)
        .bind(&form.summary)
        .bind(&form.isbn)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;

        sqlx::query("DELETE FROM book_genres WHERE book_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        Self::link_genres(&mut tx, id, &form.genre_ids).await?;
        tx.commit().await?;

        Ok(book)
    }

    async fn link_genres(
        tx: &mut Transaction<'_, Postgres>,
        book_id: i32,
        genre_ids: &[i32],
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO book_genres (book_id, genre_id)
            SELECT $1, genre_id FROM UNNEST($2::int4[]) AS g(genre_id)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(book_id)
        .bind(genre_ids)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Delete a book; refused while copies of it exist
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    AppError::Conflict(format!(
                        "Book with id {} still has copies and cannot be deleted",
                        id
                    ))
                } else {
                    AppError::Database(e)
                }
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }
        Ok(())
    }
}
