//! Author management: create, update, delete

use crate::{
    error::{AppError, AppResult},
    models::author::{Author, AuthorForm},
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn get(&self, id: i32) -> AppResult<Author> {
        self.repository.authors.get_by_id(id).await
    }

    /// Update form pre-filled from the stored author
    pub async fn edit_form(&self, id: i32) -> AppResult<AuthorForm> {
        let author = self.repository.authors.get_by_id(id).await?;
        Ok(AuthorForm::from(&author))
    }

    pub async fn create(&self, form: AuthorForm) -> AppResult<Author> {
        form.clean().map_err(AppError::InvalidForm)?;
        let author = self.repository.authors.create(&form).await?;
        tracing::info!(author_id = author.id, name = %author.display_name(), "Created author");
        Ok(author)
    }

    pub async fn update(&self, id: i32, form: AuthorForm) -> AppResult<Author> {
        // Unknown ids are reported before form errors
        self.repository.authors.get_by_id(id).await?;
        form.clean().map_err(AppError::InvalidForm)?;
        let author = self.repository.authors.update(id, &form).await?;
        tracing::info!(author_id = id, name = %author.display_name(), "Updated author");
        Ok(author)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.authors.delete(id).await?;
        tracing::info!(author_id = id, "Deleted author");
        Ok(())
    }
}
