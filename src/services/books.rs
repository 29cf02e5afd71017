//! Book management: create, update, delete

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookForm},
        form::FieldErrors,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn get(&self, id: i32) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// Update form pre-filled from the stored book and its genres
    pub async fn edit_form(&self, id: i32) -> AppResult<BookForm> {
        let book = self.repository.books.get_by_id(id).await?;
        let genre_ids = self.repository.books.genre_ids(id).await?;
        Ok(BookForm::from_book(&book, genre_ids))
    }

    pub async fn create(&self, form: BookForm) -> AppResult<Book> {
        self.clean(&form).await?;
        let book = self.repository.books.create(&form).await?;
        tracing::info!(book_id = book.id, title = %book.title, "Created book");
        Ok(book)
    }

    pub async fn update(&self, id: i32, form: BookForm) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await?;
        self.clean(&form).await?;
        let book = self.repository.books.update(id, &form).await?;
        tracing::info!(book_id = id, title = %book.title, "Updated book");
        Ok(book)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.books.delete(id).await?;
        tracing::info!(book_id = id, "Deleted book");
        Ok(())
    }

    /// Field checks, then checks that the referenced author and genres exist
    async fn clean(&self, form: &BookForm) -> AppResult<()> {
        form.clean().map_err(AppError::InvalidForm)?;

        let mut errors = FieldErrors::default();
        if let Some(author_id) = form.author_id {
            if !self.repository.authors.exists(author_id).await? {
                errors.add("author_id", format!("Author {} does not exist", author_id));
            }
        }
        for genre_id in self.repository.genres.missing(&form.genre_ids).await? {
            errors.add("genre_ids", format!("Genre {} does not exist", genre_id));
        }
        errors.into_result()
    }
}
