//! Data models for the ledger server

pub mod author;
pub mod book;
pub mod borrow_record;
pub mod category;
pub mod genre;
pub mod product;
pub mod stock_entry;
pub mod supplier;

// Re-export commonly used types
pub use author::Author;
pub use book::{Book, BookAvailability, BookBrief, BookDetails};
pub use borrow_record::{BorrowRecord, BorrowRecordDetails, BorrowStatus};
pub use category::Category;
pub use genre::Genre;
pub use product::{Product, ProductBrief, ProductDetails};
pub use stock_entry::{LowStockProduct, StockEntry, StockEntryDetails};
pub use supplier::Supplier;
