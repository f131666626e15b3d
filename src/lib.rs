//! Ledger Server
//!
//! A REST JSON API for two relational ledgers: an inventory ledger
//! (categories, suppliers, products, stock entries) and a lending ledger
//! (authors, genres, books, borrow records). Stock totals and available
//! copies are derived from movement rows at read time; deletes are guarded
//! against dependent records.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
