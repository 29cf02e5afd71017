//! Author model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::{book::BookSummary, form::FieldErrors};

/// Author row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    /// "Last, First", as shown in listings
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.last_name, self.first_name)
    }
}

/// Author with the books credited to them
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthorDetail {
    pub author: Author,
    pub books: Vec<BookSummary>,
}

/// Author create/update form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct AuthorForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "First name must be 1 to 100 characters"))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Last name must be 1 to 100 characters"))]
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl AuthorForm {
    /// Initial values offered by the create form
    pub fn initial() -> Self {
        Self {
            date_of_death: NaiveDate::from_ymd_opt(2018, 5, 1),
            ..Self::default()
        }
    }

    pub fn clean(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::from_validation(self);
        if let (Some(born), Some(died)) = (self.date_of_birth, self.date_of_death) {
            if died < born {
                errors.add("date_of_death", "Date of death cannot precede date of birth");
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl From<&Author> for AuthorForm {
    fn from(author: &Author) -> Self {
        Self {
            first_name: author.first_name.clone(),
            last_name: author.last_name.clone(),
            date_of_birth: author.date_of_birth,
            date_of_death: author.date_of_death,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> AuthorForm {
        AuthorForm {
            first_name: "Ursula".to_string(),
            last_name: "Le Guin".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1929, 10, 21),
            date_of_death: NaiveDate::from_ymd_opt(2018, 1, 22),
        }
    }

    #[test]
    fn accepts_complete_author() {
        assert!(form().clean().is_ok());
    }

    #[test]
    fn names_are_required() {
        let errors = AuthorForm {
            first_name: String::new(),
            ..form()
        }
        .clean()
        .unwrap_err();
        assert!(errors.get("first_name").is_some());
        assert!(errors.get("last_name").is_none());
    }

    #[test]
    fn death_cannot_precede_birth() {
        let errors = AuthorForm {
            date_of_death: NaiveDate::from_ymd_opt(1900, 1, 1),
            ..form()
        }
        .clean()
        .unwrap_err();
        assert!(errors.get("date_of_death").is_some());
    }

    #[test]
    fn create_form_starts_with_death_date() {
        let initial = AuthorForm::initial();
        assert_eq!(initial.date_of_death, NaiveDate::from_ymd_opt(2018, 5, 1));
        assert!(initial.first_name.is_empty());
    }

    #[test]
    fn display_name_is_last_first() {
        let author = Author {
            id: 1,
            first_name: "Ursula".to_string(),
            last_name: "Le Guin".to_string(),
            date_of_birth: None,
            date_of_death: None,
        };
        assert_eq!(author.display_name(), "Le Guin, Ursula");
        assert_eq!(AuthorForm::from(&author).last_name, "Le Guin");
    }
}
