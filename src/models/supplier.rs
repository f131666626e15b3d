//! Supplier model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Supplier row from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Supplier {
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub contact_info: String,
}

/// Create supplier request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSupplier {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    pub phone: String,
    pub contact_info: String,
}

/// Update supplier request (partial)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateSupplier {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,
    pub phone: Option<String>,
    pub contact_info: Option<String>,
}
