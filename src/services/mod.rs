//! Business logic services

pub mod authors;
pub mod books;
pub mod catalog;
pub mod loans;
pub mod sessions;
pub mod users;

use crate::{config::AuthConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub authors: authors::AuthorsService,
    pub books: books::BooksService,
    pub loans: loans::LoansService,
    pub users: users::UsersService,
    pub sessions: sessions::SessionStore,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(
        repository: Repository,
        auth_config: AuthConfig,
        sessions: sessions::SessionStore,
    ) -> Self {
        Self {
            catalog: catalog::CatalogService::new(repository.clone()),
            authors: authors::AuthorsService::new(repository.clone()),
            books: books::BooksService::new(repository.clone()),
            loans: loans::LoansService::new(repository.clone()),
            users: users::UsersService::new(repository, auth_config),
            sessions,
        }
    }
}
