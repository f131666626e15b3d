//! Stock entry (inventory movement) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::product::ProductBrief;
use super::supplier::Supplier;

/// Stock entry row from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct StockEntry {
    pub id: i32,
    pub product_id: i32,
    pub supplier_id: i32,
    pub quantity: i32,
    pub unit_price: f64,
    pub date_added: DateTime<Utc>,
}

/// Stock entry with resolved product and supplier
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StockEntryDetails {
    pub id: i32,
    pub quantity: i32,
    pub unit_price: f64,
    pub date_added: DateTime<Utc>,
    pub product: ProductBrief,
    pub supplier: Supplier,
}

/// Create stock entry request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateStockEntry {
    pub product_id: i32,
    pub supplier_id: i32,
    pub quantity: i32,
    pub unit_price: f64,
    /// Defaults to the current time when omitted
    pub date_added: Option<DateTime<Utc>>,
}

/// Update stock entry request (partial)
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStockEntry {
    pub product_id: Option<i32>,
    pub supplier_id: Option<i32>,
    pub quantity: Option<i32>,
    pub unit_price: Option<f64>,
    pub date_added: Option<DateTime<Utc>>,
}

/// Stock entries for one product with the computed total
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductStockReport {
    pub product_id: i32,
    pub product_name: String,
    pub total_stock: i64,
    pub stock_entries: Vec<StockEntry>,
}

/// Stock entries recorded against one supplier
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SupplierStockReport {
    pub supplier_id: i32,
    pub supplier_name: String,
    pub stock_entries: Vec<StockEntry>,
}

/// One row of the low-stock report
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LowStockProduct {
    pub product_id: i32,
    pub product_name: String,
    pub sku: String,
    pub unit_price: f64,
    pub current_stock: i64,
    pub threshold: i64,
    pub status: String,
}
