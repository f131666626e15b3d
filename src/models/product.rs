//! Product model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::category::Category;

/// Product row from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub sku: String,
    pub description: Option<String>,
    pub unit_price: f64,
    pub category_id: i32,
}

/// Product with resolved category and derived stock total
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductDetails {
    pub id: i32,
    pub name: String,
    pub sku: String,
    pub description: Option<String>,
    pub unit_price: f64,
    /// Sum of all stock entry quantities, computed at read time
    pub total_stock: i64,
    pub category: Category,
}

/// Short product shape for embedding in movement responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductBrief {
    pub id: i32,
    pub name: String,
    pub sku: String,
    pub unit_price: f64,
}

/// Create product request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "SKU must not be empty"))]
    pub sku: String,
    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,
    pub unit_price: f64,
    pub category_id: i32,
}

/// Update product request (partial)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "SKU must not be empty"))]
    pub sku: Option<String>,
    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,
    pub unit_price: Option<f64>,
    pub category_id: Option<i32>,
}
