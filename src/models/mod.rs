//! Data models for the catalog

pub mod author;
pub mod book;
pub mod book_instance;
pub mod dashboard;
pub mod form;
pub mod genre;
pub mod pagination;
pub mod user;

// Re-export commonly used types
pub use author::{Author, AuthorDetail, AuthorForm};
pub use book::{Book, BookDetail, BookForm, BookSummary};
pub use book_instance::{BookInstance, LoanStatus, LoanedCopy, RenewBookForm, RenewalPage};
pub use dashboard::{CatalogCounts, DashboardPage};
pub use form::FieldErrors;
pub use genre::Genre;
pub use pagination::{Paginated, Pagination};
pub use user::{Permission, User, UserClaims};
