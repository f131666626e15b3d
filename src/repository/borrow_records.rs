//! Borrow records repository for database operations.
//!
//! Borrow creation locks the book row before counting active loans, so
//! concurrent borrows of the same book serialize and the active count can
//! never exceed total_copies.

use chrono::Utc;
use sqlx::{postgres::PgRow, Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::{
        book::BookBrief,
        borrow_record::{
            BorrowRecord, BorrowRecordDetails, CreateBorrowRecord, UpdateBorrowRecord,
        },
    },
};

const DETAILS_QUERY: &str = r#"
    SELECT r.id, r.borrower_name, r.borrow_date, r.return_date,
           b.id AS book_id, b.title AS book_title,
           b.publication_year AS book_publication_year
    FROM borrow_records r
    JOIN books b ON b.id = r.book_id
"#;

fn row_to_details(row: &PgRow) -> BorrowRecordDetails {
    let record = BorrowRecord {
        id: row.get("id"),
        book_id: row.get("book_id"),
        borrower_name: row.get("borrower_name"),
        borrow_date: row.get("borrow_date"),
        return_date: row.get("return_date"),
    };
    let status = record.status();

    BorrowRecordDetails {
        id: record.id,
        borrower_name: record.borrower_name,
        borrow_date: record.borrow_date,
        return_date: record.return_date,
        status,
        book: BookBrief {
            id: row.get("book_id"),
            title: row.get("book_title"),
            publication_year: row.get("book_publication_year"),
        },
    }
}

#[derive(Clone)]
pub struct BorrowRecordsRepository {
    pool: Pool<Postgres>,
}

impl BorrowRecordsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get borrow record by ID with resolved book
    pub async fn get_by_id(&self, id: i32) -> AppResult<BorrowRecordDetails> {
        let row = sqlx::query(&format!("{} WHERE r.id = $1", DETAILS_QUERY))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Borrow record with id {} not found", id))
            })?;

        Ok(row_to_details(&row))
    }

    /// List borrow records with pagination
    pub async fn list(&self, skip: i64, limit: i64) -> AppResult<Vec<BorrowRecordDetails>> {
        let rows = sqlx::query(&format!(
            "{} ORDER BY r.id OFFSET $1 LIMIT $2",
            DETAILS_QUERY
        ))
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(row_to_details).collect())
    }

    /// Create a new borrow record. The book row is locked for the duration
    /// of the capacity check, then the insert and the check commit or roll
    /// back together.
    pub async fn create(&self, record: &CreateBorrowRecord) -> AppResult<BorrowRecordDetails> {
        let mut tx = self.pool.begin().await?;

        let book = sqlx::query(
            "SELECT id, title, total_copies FROM books WHERE id = $1 FOR UPDATE",
        )
        .bind(record.book_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Book with id {} not found", record.book_id))
        })?;

        let title: String = book.get("title");
        let total_copies: i32 = book.get("total_copies");

        let active: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM borrow_records WHERE book_id = $1 AND return_date IS NULL",
        )
        .bind(record.book_id)
        .fetch_one(&mut *tx)
        .await?;

        if active >= total_copies as i64 {
            return Err(AppError::Validation(format!(
                "No copies of '{}' available ({} of {} on loan)",
                title, active, total_copies
            )));
        }

        let borrow_date = record.borrow_date.unwrap_or_else(Utc::now);
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO borrow_records (book_id, borrower_name, borrow_date, return_date)
            VALUES ($1, $2, $3, NULL)
            RETURNING id
            "#,
        )
        .bind(record.book_id)
        .bind(&record.borrower_name)
        .bind(borrow_date)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        self.get_by_id(id).await
    }

    /// Update a borrow record (partial). Setting return_date on an already
    /// returned record is rejected; the record row stays locked from the
    /// check to the write, so concurrent updates serialize and the
    /// transition stays one-way.
    pub async fn update(&self, id: i32, record: &UpdateBorrowRecord) -> AppResult<BorrowRecordDetails> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, BorrowRecord>(
            r#"
            SELECT id, book_id, borrower_name, borrow_date, return_date
            FROM borrow_records
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Borrow record with id {} not found", id)))?;

        if record.return_date.is_some() && existing.return_date.is_some() {
            return Err(AppError::Validation(format!(
                "Borrow record {} is already returned",
                id
            )));
        }

        sqlx::query(
            r#"
            UPDATE borrow_records
            SET borrower_name = COALESCE($2, borrower_name),
                return_date = COALESCE($3, return_date)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&record.borrower_name)
        .bind(record.return_date)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        self.get_by_id(id).await
    }

    /// Mark a record returned now
    pub async fn return_record(&self, id: i32) -> AppResult<BorrowRecordDetails> {
        let result = sqlx::query(
            "UPDATE borrow_records SET return_date = $2 WHERE id = $1 AND return_date IS NULL",
        )
        .bind(id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            // Distinguish a missing record from one already returned
            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM borrow_records WHERE id = $1)")
                    .bind(id)
                    .fetch_one(&self.pool)
                    .await?;
            if exists {
                return Err(AppError::Validation(format!(
                    "Borrow record {} is already returned",
                    id
                )));
            }
            return Err(AppError::NotFound(format!(
                "Borrow record with id {} not found",
                id
            )));
        }

        self.get_by_id(id).await
    }

    /// Delete a borrow record
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM borrow_records WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Borrow record with id {} not found",
                id
            )));
        }

        Ok(())
    }
}
