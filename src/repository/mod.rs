//! Repository layer for database operations

pub mod authors;
pub mod books;
pub mod borrow_records;
pub mod categories;
pub mod genres;
pub mod products;
pub mod stock_entries;
pub mod suppliers;

use sqlx::{Pool, Postgres};

use crate::error::AppError;

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub categories: categories::CategoriesRepository,
    pub suppliers: suppliers::SuppliersRepository,
    pub products: products::ProductsRepository,
    pub stock_entries: stock_entries::StockEntriesRepository,
    pub authors: authors::AuthorsRepository,
    pub genres: genres::GenresRepository,
    pub books: books::BooksRepository,
    pub borrow_records: borrow_records::BorrowRecordsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            categories: categories::CategoriesRepository::new(pool.clone()),
            suppliers: suppliers::SuppliersRepository::new(pool.clone()),
            products: products::ProductsRepository::new(pool.clone()),
            stock_entries: stock_entries::StockEntriesRepository::new(pool.clone()),
            authors: authors::AuthorsRepository::new(pool.clone()),
            genres: genres::GenresRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            borrow_records: borrow_records::BorrowRecordsRepository::new(pool.clone()),
            pool,
        }
    }
}

/// Map a unique-constraint violation to a Conflict with the given message;
/// any other database error propagates unchanged.
pub(crate) fn conflict_on_unique(err: sqlx::Error, message: &str) -> AppError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Conflict(message.to_string())
        }
        _ => AppError::Database(err),
    }
}
