//! Borrow record (lending movement) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::book::BookBrief;

/// Loan lifecycle state. ACTIVE transitions to RETURNED exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BorrowStatus {
    Active,
    Returned,
}

/// Borrow record row from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BorrowRecord {
    pub id: i32,
    pub book_id: i32,
    pub borrower_name: String,
    pub borrow_date: DateTime<Utc>,
    /// Null while the loan is outstanding
    pub return_date: Option<DateTime<Utc>>,
}

impl BorrowRecord {
    pub fn status(&self) -> BorrowStatus {
        if self.return_date.is_some() {
            BorrowStatus::Returned
        } else {
            BorrowStatus::Active
        }
    }
}

/// Borrow record with resolved book
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BorrowRecordDetails {
    pub id: i32,
    pub borrower_name: String,
    pub borrow_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
    pub status: BorrowStatus,
    pub book: BookBrief,
}

/// Create borrow record request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBorrowRecord {
    pub book_id: i32,
    #[validate(length(min = 1, message = "Borrower name must not be empty"))]
    pub borrower_name: String,
    /// Defaults to the current time when omitted
    pub borrow_date: Option<DateTime<Utc>>,
}

/// Update borrow record request (partial).
///
/// There is deliberately no way to clear `return_date`: a returned loan
/// stays returned.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBorrowRecord {
    #[validate(length(min = 1, message = "Borrower name must not be empty"))]
    pub borrower_name: Option<String>,
    pub return_date: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(return_date: Option<DateTime<Utc>>) -> BorrowRecord {
        BorrowRecord {
            id: 1,
            book_id: 1,
            borrower_name: "Ada".to_string(),
            borrow_date: Utc::now(),
            return_date,
        }
    }

    #[test]
    fn null_return_date_is_active() {
        assert_eq!(record(None).status(), BorrowStatus::Active);
    }

    #[test]
    fn set_return_date_is_returned() {
        assert_eq!(record(Some(Utc::now())).status(), BorrowStatus::Returned);
    }
}
