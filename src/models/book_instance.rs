//! Book instance (physical copy) model, loan status and the renewal form

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;
use uuid::Uuid;

use super::form::{FieldErrors, REQUIRED};

/// Renewal date proposed by the renewal form, in days from today
pub const PROPOSED_RENEWAL_DAYS: i64 = 21;
/// Latest renewal date accepted, in days from today
pub const MAX_RENEWAL_AHEAD_DAYS: i64 = 28;

/// Copy availability, stored as a one-letter code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    #[default]
    Maintenance,
    OnLoan,
    Available,
    Reserved,
}

impl LoanStatus {
    pub fn code(&self) -> &'static str {
        match self {
            LoanStatus::Maintenance => "m",
            LoanStatus::OnLoan => "o",
            LoanStatus::Available => "a",
            LoanStatus::Reserved => "r",
        }
    }
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for LoanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "m" => Ok(LoanStatus::Maintenance),
            "o" => Ok(LoanStatus::OnLoan),
            "a" => Ok(LoanStatus::Available),
            "r" => Ok(LoanStatus::Reserved),
            _ => Err(format!("Invalid loan status code: {}", s)),
        }
    }
}

// Stored as CHAR(1)
impl sqlx::Type<Postgres> for LoanStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<Postgres>>::compatible(ty)
    }
}

impl<'r> Decode<'r, Postgres> for LoanStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <&str as Decode<Postgres>>::decode(value)?;
        s.trim().parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for LoanStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <&str as Encode<Postgres>>::encode(self.code(), buf)
    }
}

/// A copy is overdue once its due-back date has passed
pub fn is_overdue(due_back: Option<NaiveDate>, today: NaiveDate) -> bool {
    due_back.map(|d| d < today).unwrap_or(false)
}

/// Book instance row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookInstance {
    pub id: Uuid,
    pub book_id: i32,
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    pub status: LoanStatus,
    pub borrower_id: Option<i32>,
}

/// Copy currently on loan, as shown in the loan listings
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LoanedCopy {
    pub id: Uuid,
    pub book_id: i32,
    pub book_title: String,
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    pub status: LoanStatus,
    pub borrower_id: Option<i32>,
    pub borrower_username: Option<String>,
    #[sqlx(skip)]
    #[serde(default)]
    pub is_overdue: bool,
}

/// Renewal form; the date stays a string so a malformed value is a field error
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RenewBookForm {
    /// Date between now and 4 weeks (default 3), as YYYY-MM-DD
    pub renewal_date: Option<String>,
}

impl RenewBookForm {
    /// Form offered on the first visit
    pub fn proposed(today: NaiveDate) -> Self {
        Self {
            renewal_date: Some((today + Duration::days(PROPOSED_RENEWAL_DAYS)).format("%Y-%m-%d").to_string()),
        }
    }

    /// Validated renewal date: not in the past, at most 4 weeks ahead
    pub fn clean(&self, today: NaiveDate) -> Result<NaiveDate, FieldErrors> {
        let mut errors = FieldErrors::default();

        let raw = match self.renewal_date.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => raw,
            _ => {
                errors.add("renewal_date", REQUIRED);
                return Err(errors);
            }
        };

        let date = match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => date,
            Err(_) => {
                errors.add("renewal_date", "Enter a valid date.");
                return Err(errors);
            }
        };

        if date < today {
            errors.add("renewal_date", "Invalid date - renewal in past");
        }
        if date > today + Duration::days(MAX_RENEWAL_AHEAD_DAYS) {
            errors.add("renewal_date", "Invalid date - renewal more than 4 weeks ahead");
        }

        if errors.is_empty() {
            Ok(date)
        } else {
            Err(errors)
        }
    }
}

/// Renewal page: the copy being renewed and the form
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RenewalPage {
    pub book_instance: BookInstance,
    pub book_title: String,
    pub form: RenewBookForm,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    fn form(date: &str) -> RenewBookForm {
        RenewBookForm {
            renewal_date: Some(date.to_string()),
        }
    }

    #[test]
    fn proposes_three_weeks_from_today() {
        let proposed = RenewBookForm::proposed(today());
        assert_eq!(proposed.renewal_date.as_deref(), Some("2024-03-31"));
        assert_eq!(
            proposed.clean(today()),
            Ok(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap())
        );
    }

    #[test]
    fn accepts_two_weeks_ahead() {
        assert_eq!(
            form("2024-03-24").clean(today()),
            Ok(NaiveDate::from_ymd_opt(2024, 3, 24).unwrap())
        );
    }

    #[test]
    fn accepts_both_boundaries() {
        assert!(form("2024-03-10").clean(today()).is_ok());
        assert!(form("2024-04-07").clean(today()).is_ok());
    }

    #[test]
    fn rejects_past_dates() {
        let errors = form("2024-03-09").clean(today()).unwrap_err();
        assert_eq!(
            errors.get("renewal_date"),
            Some(&["Invalid date - renewal in past".to_string()][..])
        );
    }

    #[test]
    fn rejects_more_than_four_weeks_ahead() {
        let errors = form("2024-04-08").clean(today()).unwrap_err();
        assert_eq!(
            errors.get("renewal_date"),
            Some(&["Invalid date - renewal more than 4 weeks ahead".to_string()][..])
        );
    }

    #[test]
    fn missing_or_malformed_dates_are_field_errors() {
        let missing = RenewBookForm::default().clean(today()).unwrap_err();
        assert_eq!(missing.get("renewal_date"), Some(&[REQUIRED.to_string()][..]));

        let malformed = form("10/03/2024").clean(today()).unwrap_err();
        assert_eq!(
            malformed.get("renewal_date"),
            Some(&["Enter a valid date.".to_string()][..])
        );
    }

    #[test]
    fn status_codes_round_trip() {
        for status in [
            LoanStatus::Maintenance,
            LoanStatus::OnLoan,
            LoanStatus::Available,
            LoanStatus::Reserved,
        ] {
            assert_eq!(status.code().parse::<LoanStatus>(), Ok(status));
        }
        assert!("x".parse::<LoanStatus>().is_err());
    }

    #[test]
    fn overdue_only_after_due_date() {
        let today = today();
        assert!(is_overdue(NaiveDate::from_ymd_opt(2024, 3, 9), today));
        assert!(!is_overdue(Some(today), today));
        assert!(!is_overdue(None, today));
    }
}
