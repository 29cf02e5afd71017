//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::{
    author::Author,
    book_instance::BookInstance,
    form::{FieldErrors, REQUIRED},
    genre::Genre,
};

/// Book row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author_id: Option<i32>,
    pub summary: String,
    pub isbn: String,
}

/// Short book representation for lists
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookSummary {
    pub id: i32,
    pub title: String,
    pub author_id: Option<i32>,
    /// "Last, First" of the credited author
    pub author_name: Option<String>,
}

/// Book with its author, genres and physical copies
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookDetail {
    pub book: Book,
    pub author: Option<Author>,
    pub genres: Vec<Genre>,
    pub instances: Vec<BookInstance>,
}

/// Book create/update form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct BookForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "Title must be 1 to 200 characters"))]
    pub title: String,
    pub author_id: Option<i32>,
    #[serde(default)]
    #[validate(length(min = 1, max = 1000, message = "Summary must be 1 to 1000 characters"))]
    pub summary: String,
    #[serde(default)]
    #[validate(length(equal = 13, message = "ISBN must be exactly 13 characters"))]
    pub isbn: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "This field is required."))]
    pub genre_ids: Vec<i32>,
}

impl BookForm {
    /// Field checks that need no database access
    pub fn clean(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::from_validation(self);
        if self.author_id.is_none() {
            errors.add("author_id", REQUIRED);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn from_book(book: &Book, genre_ids: Vec<i32>) -> Self {
        Self {
            title: book.title.clone(),
            author_id: book.author_id,
            summary: book.summary.clone(),
            isbn: book.isbn.clone(),
            genre_ids,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> BookForm {
        BookForm {
            title: "The Left Hand of Darkness".to_string(),
            author_id: Some(1),
            summary: "A human envoy visits the planet Gethen.".to_string(),
            isbn: "9780441478125".to_string(),
            genre_ids: vec![1],
        }
    }

    #[test]
    fn accepts_complete_book() {
        assert!(form().clean().is_ok());
    }

    #[test]
    fn isbn_must_have_thirteen_characters() {
        let errors = BookForm {
            isbn: "978044147812".to_string(),
            ..form()
        }
        .clean()
        .unwrap_err();
        assert!(errors.get("isbn").is_some());
    }

    #[test]
    fn author_and_genres_are_required() {
        let errors = BookForm {
            author_id: None,
            genre_ids: Vec::new(),
            ..form()
        }
        .clean()
        .unwrap_err();
        assert_eq!(errors.get("author_id"), Some(&[REQUIRED.to_string()][..]));
        assert_eq!(errors.get("genre_ids"), Some(&[REQUIRED.to_string()][..]));
    }

    #[test]
    fn update_form_mirrors_the_row() {
        let book = Book {
            id: 7,
            title: "Dune".to_string(),
            author_id: Some(3),
            summary: "Spice.".to_string(),
            isbn: "9780441172719".to_string(),
        };
        let form = BookForm::from_book(&book, vec![2, 5]);
        assert_eq!(form.title, "Dune");
        assert_eq!(form.author_id, Some(3));
        assert_eq!(form.genre_ids, vec![2, 5]);
    }
}
