//! API handlers for the ledger REST endpoints

pub mod authors;
pub mod books;
pub mod borrow_records;
pub mod categories;
pub mod genres;
pub mod health;
pub mod openapi;
pub mod products;
pub mod stock_entries;
pub mod suppliers;

use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::error::{AppError, AppResult};

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// Offset/limit pagination query parameters, shared by all listing endpoints
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct Pagination {
    /// Number of rows to skip (default 0)
    pub skip: Option<i64>,
    /// Maximum number of rows to return (default 10, capped at 100)
    pub limit: Option<i64>,
}

impl Pagination {
    /// Resolve to concrete (skip, limit), flooring skip at 0 and capping
    /// limit so no request can force an unbounded scan
    pub fn clamp(&self) -> (i64, i64) {
        let skip = self.skip.unwrap_or(0).max(0);
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        (skip, limit)
    }
}

/// Run payload shape validation, surfacing failures as a 400
pub(crate) fn check<T: Validate>(payload: &T) -> AppResult<()> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let p = Pagination::default();
        assert_eq!(p.clamp(), (0, DEFAULT_LIMIT));
    }

    #[test]
    fn negative_skip_is_floored() {
        let p = Pagination {
            skip: Some(-5),
            limit: None,
        };
        assert_eq!(p.clamp(), (0, DEFAULT_LIMIT));
    }

    #[test]
    fn oversized_limit_is_capped() {
        let p = Pagination {
            skip: Some(20),
            limit: Some(10_000),
        };
        assert_eq!(p.clamp(), (20, MAX_LIMIT));
    }

    #[test]
    fn zero_limit_is_raised_to_one() {
        let p = Pagination {
            skip: None,
            limit: Some(0),
        };
        assert_eq!(p.clamp(), (0, 1));
    }
}
