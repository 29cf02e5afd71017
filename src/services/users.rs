//! Authentication and user accounts

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{User, UserClaims},
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    config: AuthConfig,
}

impl UsersService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Authenticate by username and password, returning a bearer token
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<(String, User)> {
        let user = self
            .repository
            .users
            .get_by_username(username)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid username or password".to_string()))?;

        if !verify_password(&user.password_hash, password)? {
            tracing::info!(username, "Rejected login");
            return Err(AppError::Authentication("Invalid username or password".to_string()));
        }

        let token = self.create_token_for_user(&user)?;
        tracing::info!(user_id = user.id, "User logged in");
        Ok((token, user))
    }

    fn create_token_for_user(&self, user: &User) -> AppResult<String> {
        UserClaims::for_user(user, self.config.jwt_expiration_hours)
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    /// The account a bearer token was issued for
    pub async fn current_user(&self, id: i32) -> AppResult<User> {
        self.repository.users.get_by_id(id).await.map_err(account_gone)
    }

    /// Create the configured superuser if a password is set and the account is missing
    pub async fn ensure_bootstrap_admin(&self) -> AppResult<()> {
        let Some(password) = self.config.bootstrap_admin_password.as_deref() else {
            return Ok(());
        };
        let username = &self.config.bootstrap_admin_username;

        if self.repository.users.get_by_username(username).await?.is_some() {
            return Ok(());
        }

        let hash = hash_password(password)?;
        let user = self.repository.users.create(username, &hash, true, &[]).await?;
        tracing::info!(user_id = user.id, username = %user.username, "Created bootstrap superuser");
        Ok(())
    }
}

/// A token that outlived its account no longer authenticates anyone
fn account_gone(e: AppError) -> AppError {
    match e {
        AppError::NotFound(_) => AppError::Authentication("User no longer exists".to_string()),
        other => other,
    }
}

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

fn verify_password(hash: &str, password: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_verifies() {
        let hash = hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password(&hash, "correct horse").unwrap());
        assert!(!verify_password(&hash, "battery staple").unwrap());
    }

    #[test]
    fn deleted_account_is_unauthenticated() {
        let e = account_gone(AppError::NotFound("User with id 7 not found".to_string()));
        assert!(matches!(e, AppError::Authentication(_)));

        let e = account_gone(AppError::Database(sqlx::Error::PoolTimedOut));
        assert!(matches!(e, AppError::Database(_)));
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(verify_password("plaintext", "plaintext").is_err());
    }
}
