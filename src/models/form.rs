//! Form error collection shared by every submitted form

use std::collections::BTreeMap;

use serde::Serialize;
use validator::{Validate, ValidationErrors};

use crate::error::{AppError, AppResult};

pub const REQUIRED: &str = "This field is required.";

/// Messages keyed by field name, in field-name order
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Run the derived field checks of `form` and collect their messages
    pub fn from_validation<T: Validate>(form: &T) -> Self {
        match form.validate() {
            Ok(()) => Self::default(),
            Err(e) => e.into(),
        }
    }

    pub fn into_result(self) -> AppResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AppError::InvalidForm(self))
        }
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = FieldErrors::default();
        for (field, errs) in errors.field_errors() {
            for err in errs.iter() {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                out.add(field.to_string(), message);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, max = 5, message = "Too long"))]
        name: String,
    }

    #[test]
    fn collects_derived_messages() {
        let errors = FieldErrors::from_validation(&Sample {
            name: "abcdefgh".to_string(),
        });
        assert_eq!(errors.get("name"), Some(&["Too long".to_string()][..]));
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn valid_form_has_no_errors() {
        let errors = FieldErrors::from_validation(&Sample {
            name: "abc".to_string(),
        });
        assert!(errors.is_empty());
        assert!(errors.into_result().is_ok());
    }
}
