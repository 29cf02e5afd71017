//! Loan listings and the renewal workflow

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        book_instance::{is_overdue, LoanedCopy, RenewBookForm, RenewalPage},
        pagination::{Paginated, Pagination, LOANS_PAGE_SIZE},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
}

impl LoansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Copies on loan to `user_id`, soonest due first
    pub async fn borrowed_by(
        &self,
        user_id: i32,
        page: Option<i64>,
        today: NaiveDate,
    ) -> AppResult<Paginated<LoanedCopy>> {
        let pagination = Pagination::new(page, LOANS_PAGE_SIZE)?;
        let (copies, total) = self
            .repository
            .book_instances
            .on_loan_to(user_id, &pagination)
            .await?;
        pagination.ensure_in_range(total)?;
        Ok(Paginated::new(flag_overdue(copies, today), total, pagination))
    }

    /// Every copy on loan, soonest due first
    pub async fn all_borrowed(
        &self,
        page: Option<i64>,
        today: NaiveDate,
    ) -> AppResult<Paginated<LoanedCopy>> {
        let pagination = Pagination::new(page, LOANS_PAGE_SIZE)?;
        let (copies, total) = self.repository.book_instances.on_loan(&pagination).await?;
        pagination.ensure_in_range(total)?;
        Ok(Paginated::new(flag_overdue(copies, today), total, pagination))
    }

    /// The copy to renew and a form proposing a new due date
    pub async fn renewal_page(&self, id: Uuid, today: NaiveDate) -> AppResult<RenewalPage> {
        let book_instance = self.repository.book_instances.get_by_id(id).await?;
        let book = self.repository.books.get_by_id(book_instance.book_id).await?;
        Ok(RenewalPage {
            book_instance,
            book_title: book.title,
            form: RenewBookForm::proposed(today),
        })
    }

    /// Validate the submitted date and store it as the copy's due-back date
    pub async fn renew(&self, id: Uuid, form: &RenewBookForm, today: NaiveDate) -> AppResult<NaiveDate> {
        self.repository.book_instances.get_by_id(id).await?;
        let due_back = form.clean(today).map_err(AppError::InvalidForm)?;

        self.repository.book_instances.set_due_back(id, due_back).await?;
        tracing::info!(book_instance = %id, %due_back, "Renewed book instance");
        Ok(due_back)
    }
}

fn flag_overdue(mut copies: Vec<LoanedCopy>, today: NaiveDate) -> Vec<LoanedCopy> {
    for copy in &mut copies {
        copy.is_overdue = is_overdue(copy.due_back, today);
    }
    copies
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::book_instance::LoanStatus;

    fn copy(due_back: Option<NaiveDate>) -> LoanedCopy {
        LoanedCopy {
            id: Uuid::new_v4(),
            book_id: 1,
            book_title: "Dune".to_string(),
            imprint: "Ace, 1990".to_string(),
            due_back,
            status: LoanStatus::OnLoan,
            borrower_id: Some(1),
            borrower_username: Some("reader".to_string()),
            is_overdue: false,
        }
    }

    #[test]
    fn flags_copies_past_due() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let copies = flag_overdue(
            vec![
                copy(NaiveDate::from_ymd_opt(2024, 5, 31)),
                copy(Some(today)),
                copy(None),
            ],
            today,
        );
        let flags: Vec<bool> = copies.iter().map(|c| c.is_overdue).collect();
        assert_eq!(flags, vec![true, false, false]);
    }
}
