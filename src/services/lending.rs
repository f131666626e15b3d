//! Lending ledger service: authors, genres, books, borrow records.

use crate::{
    error::{AppError, AppResult},
    models::{
        author::{Author, CreateAuthor, UpdateAuthor},
        book::{BookAvailability, BookDetails, CreateBook, UpdateBook},
        borrow_record::{BorrowRecordDetails, CreateBorrowRecord, UpdateBorrowRecord},
        genre::{CreateGenre, Genre, UpdateGenre},
    },
    repository::Repository,
};

const DEFAULT_TOTAL_COPIES: i32 = 1;

fn validate_total_copies(total_copies: i32) -> AppResult<()> {
    if total_copies >= 1 {
        Ok(())
    } else {
        Err(AppError::Validation(
            "Total copies must be at least 1".to_string(),
        ))
    }
}

#[derive(Clone)]
pub struct LendingService {
    repository: Repository,
}

impl LendingService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    // --- Authors ---

    pub async fn list_authors(&self, skip: i64, limit: i64) -> AppResult<Vec<Author>> {
        self.repository.authors.list(skip, limit).await
    }

    pub async fn get_author(&self, id: i32) -> AppResult<Author> {
        self.repository.authors.get_by_id(id).await
    }

    pub async fn create_author(&self, author: CreateAuthor) -> AppResult<Author> {
        self.repository.authors.create(&author).await
    }

    pub async fn update_author(&self, id: i32, author: UpdateAuthor) -> AppResult<Author> {
        self.repository.authors.update(id, &author).await
    }

    pub async fn delete_author(&self, id: i32) -> AppResult<()> {
        self.repository.authors.delete(id).await
    }

    // --- Genres ---

    pub async fn list_genres(&self, skip: i64, limit: i64) -> AppResult<Vec<Genre>> {
        self.repository.genres.list(skip, limit).await
    }

    pub async fn get_genre(&self, id: i32) -> AppResult<Genre> {
        self.repository.genres.get_by_id(id).await
    }

    pub async fn create_genre(&self, genre: CreateGenre) -> AppResult<Genre> {
        self.repository.genres.create(&genre).await
    }

    pub async fn update_genre(&self, id: i32, genre: UpdateGenre) -> AppResult<Genre> {
        self.repository.genres.update(id, &genre).await
    }

    pub async fn delete_genre(&self, id: i32) -> AppResult<()> {
        self.repository.genres.delete(id).await
    }

    // --- Books ---

    pub async fn list_books(&self, skip: i64, limit: i64) -> AppResult<Vec<BookDetails>> {
        self.repository.books.list(skip, limit).await
    }

    pub async fn get_book(&self, id: i32) -> AppResult<BookDetails> {
        self.repository.books.get_by_id(id).await
    }

    pub async fn create_book(&self, book: CreateBook) -> AppResult<BookDetails> {
        let total_copies = book.total_copies.unwrap_or(DEFAULT_TOTAL_COPIES);
        validate_total_copies(total_copies)?;
        self.repository.books.create(&book, total_copies).await
    }

    pub async fn update_book(&self, id: i32, book: UpdateBook) -> AppResult<BookDetails> {
        if let Some(total_copies) = book.total_copies {
            validate_total_copies(total_copies)?;
        }
        self.repository.books.update(id, &book).await
    }

    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.repository.books.delete(id).await
    }

    pub async fn book_availability(&self, id: i32) -> AppResult<BookAvailability> {
        self.repository.books.availability(id).await
    }

    // --- Borrow records ---

    pub async fn list_borrow_records(&self, skip: i64, limit: i64) -> AppResult<Vec<BorrowRecordDetails>> {
        self.repository.borrow_records.list(skip, limit).await
    }

    pub async fn get_borrow_record(&self, id: i32) -> AppResult<BorrowRecordDetails> {
        self.repository.borrow_records.get_by_id(id).await
    }

    pub async fn create_borrow_record(&self, record: CreateBorrowRecord) -> AppResult<BorrowRecordDetails> {
        self.repository.borrow_records.create(&record).await
    }

    pub async fn update_borrow_record(&self, id: i32, record: UpdateBorrowRecord) -> AppResult<BorrowRecordDetails> {
        self.repository.borrow_records.update(id, &record).await
    }

    pub async fn return_borrow_record(&self, id: i32) -> AppResult<BorrowRecordDetails> {
        self.repository.borrow_records.return_record(id).await
    }

    pub async fn delete_borrow_record(&self, id: i32) -> AppResult<()> {
        self.repository.borrow_records.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_copies_must_be_at_least_one() {
        assert!(validate_total_copies(0).is_err());
        assert!(validate_total_copies(-2).is_err());
        assert!(validate_total_copies(1).is_ok());
        assert!(validate_total_copies(12).is_ok());
    }
}
