//! Books repository for database operations.
//!
//! Availability is computed from borrow records at read time:
//! total_copies minus the count of records with a null return date.

use sqlx::{postgres::PgRow, Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::{
        author::Author,
        book::{Book, BookAvailability, BookDetails, CreateBook, UpdateBook},
        genre::Genre,
    },
};

const DETAILS_QUERY: &str = r#"
    SELECT b.id, b.title, b.publication_year, b.total_copies, b.author_id, b.genre_id,
           a.name AS author_name, a.country AS author_country,
           g.name AS genre_name,
           COALESCE((
               SELECT COUNT(*)
               FROM borrow_records r
               WHERE r.book_id = b.id AND r.return_date IS NULL
           ), 0)::bigint AS active_loans
    FROM books b
    JOIN authors a ON a.id = b.author_id
    JOIN genres g ON g.id = b.genre_id
"#;

fn row_to_details(row: &PgRow) -> BookDetails {
    let total_copies: i32 = row.get("total_copies");
    let active_loans: i64 = row.get("active_loans");
    let available = (total_copies as i64 - active_loans).max(0);

    BookDetails {
        id: row.get("id"),
        title: row.get("title"),
        publication_year: row.get("publication_year"),
        total_copies,
        available_copies: available,
        is_available: available > 0,
        author: Author {
            id: row.get("author_id"),
            name: row.get("author_name"),
            country: row.get("author_country"),
        },
        genre: Genre {
            id: row.get("genre_id"),
            name: row.get("genre_name"),
        },
    }
}

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get book by ID with resolved author/genre and derived availability
    pub async fn get_by_id(&self, id: i32) -> AppResult<BookDetails> {
        let row = sqlx::query(&format!("{} WHERE b.id = $1", DETAILS_QUERY))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;

        Ok(row_to_details(&row))
    }

    /// List books with pagination
    pub async fn list(&self, skip: i64, limit: i64) -> AppResult<Vec<BookDetails>> {
        let rows = sqlx::query(&format!(
            "{} ORDER BY b.id OFFSET $1 LIMIT $2",
            DETAILS_QUERY
        ))
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(row_to_details).collect())
    }

    /// Create a new book. Author and genre must both exist; the first
    /// missing reference is reported before any write.
    pub async fn create(&self, book: &CreateBook, total_copies: i32) -> AppResult<BookDetails> {
        let author_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM authors WHERE id = $1)")
                .bind(book.author_id)
                .fetch_one(&self.pool)
                .await?;
        if !author_exists {
            return Err(AppError::NotFound(format!(
                "Author with id {} not found",
                book.author_id
            )));
        }

        let genre_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM genres WHERE id = $1)")
                .bind(book.genre_id)
                .fetch_one(&self.pool)
                .await?;
        if !genre_exists {
            return Err(AppError::NotFound(format!(
                "Genre with id {} not found",
                book.genre_id
            )));
        }

        let created = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, publication_year, total_copies, author_id, genre_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, publication_year, total_copies, author_id, genre_id
            "#,
        )
        .bind(&book.title)
        .bind(book.publication_year)
        .bind(total_copies)
        .bind(book.author_id)
        .bind(book.genre_id)
        .fetch_one(&self.pool)
        .await?;

        self.get_by_id(created.id).await
    }

    /// Update a book (partial), re-validating any moved reference
    pub async fn update(&self, id: i32, book: &UpdateBook) -> AppResult<BookDetails> {
        if let Some(author_id) = book.author_id {
            let author_exists: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM authors WHERE id = $1)")
                    .bind(author_id)
                    .fetch_one(&self.pool)
                    .await?;
            if !author_exists {
                return Err(AppError::NotFound(format!(
                    "Author with id {} not found",
                    author_id
                )));
            }
        }
        if let Some(genre_id) = book.genre_id {
            let genre_exists: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM genres WHERE id = $1)")
                    .bind(genre_id)
                    .fetch_one(&self.pool)
                    .await?;
            if !genre_exists {
                return Err(AppError::NotFound(format!(
                    "Genre with id {} not found",
                    genre_id
                )));
            }
        }

        let updated = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = COALESCE($2, title),
                publication_year = COALESCE($3, publication_year),
                total_copies = COALESCE($4, total_copies),
                author_id = COALESCE($5, author_id),
                genre_id = COALESCE($6, genre_id)
            WHERE id = $1
            RETURNING id, title, publication_year, total_copies, author_id, genre_id
            "#,
        )
        .bind(id)
        .bind(&book.title)
        .bind(book.publication_year)
        .bind(book.total_copies)
        .bind(book.author_id)
        .bind(book.genre_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;

        self.get_by_id(updated.id).await
    }

    /// Delete a book. Active loans block the delete and are reported by
    /// borrower name; returned history rows go with the book.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE id = $1)")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        if !exists {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }

        let dependents: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT borrower_name FROM borrow_records
            WHERE book_id = $1 AND return_date IS NULL
            ORDER BY borrower_name
            "#,
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;
        if !dependents.is_empty() {
            return Err(AppError::HasDependents {
                entity: "Book".to_string(),
                dependents,
            });
        }

        sqlx::query("DELETE FROM borrow_records WHERE book_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(())
    }

    /// Availability report for one book
    pub async fn availability(&self, id: i32) -> AppResult<BookAvailability> {
        let row = sqlx::query(
            r#"
            SELECT b.id, b.title, b.total_copies,
                   COALESCE((
                       SELECT COUNT(*)
                       FROM borrow_records r
                       WHERE r.book_id = b.id AND r.return_date IS NULL
                   ), 0)::bigint AS active_loans
            FROM books b
            WHERE b.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;

        let total_copies: i32 = row.get("total_copies");
        let active_loans: i64 = row.get("active_loans");
        let available = (total_copies as i64 - active_loans).max(0);

        Ok(BookAvailability {
            book_id: row.get("id"),
            title: row.get("title"),
            total_copies,
            active_loans,
            available_copies: available,
            is_available: available > 0,
        })
    }
}
