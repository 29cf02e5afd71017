//! User model, permissions and bearer-token claims

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::error::AppError;

/// Named capability a user may hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Permission {
    /// Manage loans: see every borrowed copy, renew copies
    #[serde(rename = "catalog.can_mark_returned")]
    CanMarkReturned,
    #[serde(rename = "catalog.add_author")]
    AddAuthor,
    #[serde(rename = "catalog.change_author")]
    ChangeAuthor,
    #[serde(rename = "catalog.delete_author")]
    DeleteAuthor,
    #[serde(rename = "catalog.add_book")]
    AddBook,
    #[serde(rename = "catalog.change_book")]
    ChangeBook,
    #[serde(rename = "catalog.delete_book")]
    DeleteBook,
}

impl Permission {
    pub const ALL: [Permission; 7] = [
        Permission::CanMarkReturned,
        Permission::AddAuthor,
        Permission::ChangeAuthor,
        Permission::DeleteAuthor,
        Permission::AddBook,
        Permission::ChangeBook,
        Permission::DeleteBook,
    ];

    pub fn codename(&self) -> &'static str {
        match self {
            Permission::CanMarkReturned => "catalog.can_mark_returned",
            Permission::AddAuthor => "catalog.add_author",
            Permission::ChangeAuthor => "catalog.change_author",
            Permission::DeleteAuthor => "catalog.delete_author",
            Permission::AddBook => "catalog.add_book",
            Permission::ChangeBook => "catalog.change_book",
            Permission::DeleteBook => "catalog.delete_book",
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.codename())
    }
}

impl std::str::FromStr for Permission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .iter()
            .copied()
            .find(|p| p.codename() == s)
            .ok_or_else(|| format!("Unknown permission: {}", s))
    }
}

/// User row
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub is_superuser: bool,
    /// Permission codenames as stored
    pub permissions: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Stored codenames that name a known permission
    pub fn permissions(&self) -> Vec<Permission> {
        self.permissions
            .iter()
            .filter_map(|codename| match codename.parse() {
                Ok(p) => Some(p),
                Err(e) => {
                    tracing::warn!(user_id = self.id, "{}", e);
                    None
                }
            })
            .collect()
    }
}

/// JWT Claims for authenticated users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub user_id: i32,
    pub is_superuser: bool,
    pub permissions: Vec<Permission>,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    pub fn for_user(user: &User, lifetime_hours: u64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub: user.username.clone(),
            user_id: user.id,
            is_superuser: user.is_superuser,
            permissions: user.permissions(),
            exp: now + lifetime_hours as i64 * 3600,
            iat: now,
        }
    }

    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    /// Superusers hold every permission
    pub fn has_perm(&self, permission: Permission) -> bool {
        self.is_superuser || self.permissions.contains(&permission)
    }

    pub fn require(&self, permission: Permission) -> Result<(), AppError> {
        if self.has_perm(permission) {
            Ok(())
        } else {
            Err(AppError::Authorization(format!(
                "Permission {} required",
                permission
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(is_superuser: bool, permissions: &[&str]) -> User {
        User {
            id: 42,
            username: "librarian".to_string(),
            password_hash: String::new(),
            first_name: "Lib".to_string(),
            last_name: "Rarian".to_string(),
            email: None,
            is_superuser,
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn codenames_parse_back() {
        for p in Permission::ALL {
            assert_eq!(p.codename().parse::<Permission>(), Ok(p));
        }
        assert!("catalog.fly".parse::<Permission>().is_err());
    }

    #[test]
    fn unknown_stored_permissions_are_ignored() {
        let u = user(false, &["catalog.can_mark_returned", "catalog.fly"]);
        assert_eq!(u.permissions(), vec![Permission::CanMarkReturned]);
    }

    #[test]
    fn require_checks_held_permissions() {
        let claims = UserClaims::for_user(&user(false, &["catalog.add_book"]), 1);
        assert!(claims.require(Permission::AddBook).is_ok());
        assert!(matches!(
            claims.require(Permission::CanMarkReturned),
            Err(AppError::Authorization(_))
        ));
        assert!(!claims.has_perm(Permission::DeleteAuthor));
    }

    #[test]
    fn superuser_holds_everything() {
        let claims = UserClaims::for_user(&user(true, &[]), 1);
        for p in Permission::ALL {
            assert!(claims.has_perm(p));
        }
    }

    #[test]
    fn token_round_trip() {
        let claims = UserClaims::for_user(&user(false, &["catalog.can_mark_returned"]), 1);
        let token = claims.create_token("secret").unwrap();

        let decoded = UserClaims::from_token(&token, "secret").unwrap();
        assert_eq!(decoded.user_id, 42);
        assert_eq!(decoded.sub, "librarian");
        assert_eq!(decoded.permissions, vec![Permission::CanMarkReturned]);

        assert!(UserClaims::from_token(&token, "other-secret").is_err());
    }
}
