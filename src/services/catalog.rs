//! Catalog read side: home page figures, listings and detail pages

use crate::{
    error::AppResult,
    models::{
        author::{Author, AuthorDetail},
        book::{BookDetail, BookSummary},
        dashboard::{contains_pattern, CatalogCounts},
        genre::Genre,
        pagination::{Paginated, Pagination, CATALOG_PAGE_SIZE},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Catalog totals plus the count of titles containing `word`
    pub async fn counts(&self, word: &str) -> AppResult<CatalogCounts> {
        self.repository.catalog.counts(&contains_pattern(word)).await
    }

    pub async fn ping(&self) -> AppResult<()> {
        self.repository.catalog.ping().await
    }

    pub async fn list_books(&self, page: Option<i64>) -> AppResult<Paginated<BookSummary>> {
        let pagination = Pagination::new(page, CATALOG_PAGE_SIZE)?;
        let (books, total) = self.repository.books.list(&pagination).await?;
        pagination.ensure_in_range(total)?;
        Ok(Paginated::new(books, total, pagination))
    }

    pub async fn get_book(&self, id: i32) -> AppResult<BookDetail> {
        let book = self.repository.books.get_by_id(id).await?;

        let author = match book.author_id {
            Some(author_id) => Some(self.repository.authors.get_by_id(author_id).await?),
            None => None,
        };
        let genres = self.repository.genres.for_book(id).await?;
        let instances = self.repository.book_instances.for_book(id).await?;

        Ok(BookDetail {
            book,
            author,
            genres,
            instances,
        })
    }

    pub async fn list_authors(&self, page: Option<i64>) -> AppResult<Paginated<Author>> {
        let pagination = Pagination::new(page, CATALOG_PAGE_SIZE)?;
        let (authors, total) = self.repository.authors.list(&pagination).await?;
        pagination.ensure_in_range(total)?;
        Ok(Paginated::new(authors, total, pagination))
    }

    pub async fn get_author(&self, id: i32) -> AppResult<AuthorDetail> {
        let author = self.repository.authors.get_by_id(id).await?;
        let books = self.repository.authors.books(id).await?;
        Ok(AuthorDetail { author, books })
    }

    pub async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        self.repository.genres.list().await
    }
}
