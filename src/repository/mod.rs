//! Repository layer for database operations

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod catalog;
pub mod genres;
pub mod users;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub authors: authors::AuthorsRepository,
    pub books: books::BooksRepository,
    pub book_instances: book_instances::BookInstancesRepository,
    pub genres: genres::GenresRepository,
    pub catalog: catalog::CatalogRepository,
    pub users: users::UsersRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            authors: authors::AuthorsRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            book_instances: book_instances::BookInstancesRepository::new(pool.clone()),
            genres: genres::GenresRepository::new(pool.clone()),
            catalog: catalog::CatalogRepository::new(pool.clone()),
            users: users::UsersRepository::new(pool.clone()),
            pool,
        }
    }
}

fn has_sqlstate(e: &sqlx::Error, sqlstate: &str) -> bool {
    e.as_database_error()
        .and_then(|d| d.code())
        .map(|code| code == sqlstate)
        .unwrap_or(false)
}

pub(crate) fn is_foreign_key_violation(e: &sqlx::Error) -> bool {
    has_sqlstate(e, "23503")
}

pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    has_sqlstate(e, "23505")
}
