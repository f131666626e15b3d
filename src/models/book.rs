//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::author::Author;
use super::genre::Genre;

/// Book row from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub publication_year: i32,
    pub total_copies: i32,
    pub author_id: i32,
    pub genre_id: i32,
}

/// Book with resolved author/genre and derived availability
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookDetails {
    pub id: i32,
    pub title: String,
    pub publication_year: i32,
    pub total_copies: i32,
    /// total_copies minus active borrow records, computed at read time
    pub available_copies: i64,
    pub is_available: bool,
    pub author: Author,
    pub genre: Genre,
}

/// Short book shape for embedding in borrow record responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookBrief {
    pub id: i32,
    pub title: String,
    pub publication_year: i32,
}

/// Availability report for one book
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookAvailability {
    pub book_id: i32,
    pub title: String,
    pub total_copies: i32,
    pub active_loans: i64,
    pub available_copies: i64,
    pub is_available: bool,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    pub publication_year: i32,
    /// Static capacity, defaults to 1
    pub total_copies: Option<i32>,
    pub author_id: i32,
    pub genre_id: i32,
}

/// Update book request (partial)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: Option<String>,
    pub publication_year: Option<i32>,
    pub total_copies: Option<i32>,
    pub author_id: Option<i32>,
    pub genre_id: Option<i32>,
}
