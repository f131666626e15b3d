//! Stock entry endpoints, including the aggregate reports

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::AppResult,
    models::stock_entry::{
        CreateStockEntry, LowStockProduct, ProductStockReport, StockEntryDetails,
        SupplierStockReport, UpdateStockEntry,
    },
};

use super::Pagination;

const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 10;

#[derive(Debug, Deserialize, IntoParams)]
pub struct LowStockParams {
    /// Stock level at or below which a product is reported (default 10)
    pub threshold: Option<i64>,
}

/// List stock entries with resolved products and suppliers
#[utoipa::path(
    get,
    path = "/stock-entries",
    tag = "stock-entries",
    params(Pagination),
    responses(
        (status = 200, description = "List of stock entries", body = Vec<StockEntryDetails>)
    )
)]
pub async fn list_stock_entries(
    State(state): State<crate::AppState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<Vec<StockEntryDetails>>> {
    let (skip, limit) = pagination.clamp();
    let entries = state.services.inventory.list_stock_entries(skip, limit).await?;
    Ok(Json(entries))
}

/// Get stock entry by ID
#[utoipa::path(
    get,
    path = "/stock-entries/{id}",
    tag = "stock-entries",
    params(("id" = i32, Path, description = "Stock entry ID")),
    responses(
        (status = 200, description = "Stock entry details", body = StockEntryDetails),
        (status = 404, description = "Stock entry not found")
    )
)]
pub async fn get_stock_entry(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<StockEntryDetails>> {
    let entry = state.services.inventory.get_stock_entry(id).await?;
    Ok(Json(entry))
}

/// Record a stock entry against a product
#[utoipa::path(
    post,
    path = "/stock-entries",
    tag = "stock-entries",
    request_body = CreateStockEntry,
    responses(
        (status = 201, description = "Stock entry created", body = StockEntryDetails),
        (status = 400, description = "Non-positive quantity or unit price"),
        (status = 404, description = "Product or supplier not found")
    )
)]
pub async fn create_stock_entry(
    State(state): State<crate::AppState>,
    Json(entry): Json<CreateStockEntry>,
) -> AppResult<(StatusCode, Json<StockEntryDetails>)> {
    let created = state.services.inventory.create_stock_entry(entry).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a stock entry
#[utoipa::path(
    put,
    path = "/stock-entries/{id}",
    tag = "stock-entries",
    params(("id" = i32, Path, description = "Stock entry ID")),
    request_body = UpdateStockEntry,
    responses(
        (status = 200, description = "Stock entry updated", body = StockEntryDetails),
        (status = 404, description = "Stock entry, product or supplier not found")
    )
)]
pub async fn update_stock_entry(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(entry): Json<UpdateStockEntry>,
) -> AppResult<Json<StockEntryDetails>> {
    let updated = state.services.inventory.update_stock_entry(id, entry).await?;
    Ok(Json(updated))
}

/// Delete a stock entry
#[utoipa::path(
    delete,
    path = "/stock-entries/{id}",
    tag = "stock-entries",
    params(("id" = i32, Path, description = "Stock entry ID")),
    responses(
        (status = 204, description = "Stock entry deleted"),
        (status = 404, description = "Stock entry not found")
    )
)]
pub async fn delete_stock_entry(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.inventory.delete_stock_entry(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Stock entries and computed total for one product
#[utoipa::path(
    get,
    path = "/stock-entries/by-product/{product_id}",
    tag = "stock-entries",
    params(("product_id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Stock report for the product", body = ProductStockReport),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_stock_by_product(
    State(state): State<crate::AppState>,
    Path(product_id): Path<i32>,
) -> AppResult<Json<ProductStockReport>> {
    let report = state.services.inventory.stock_by_product(product_id).await?;
    Ok(Json(report))
}

/// Stock entries recorded against one supplier
#[utoipa::path(
    get,
    path = "/stock-entries/by-supplier/{supplier_id}",
    tag = "stock-entries",
    params(("supplier_id" = i32, Path, description = "Supplier ID")),
    responses(
        (status = 200, description = "Stock report for the supplier", body = SupplierStockReport),
        (status = 404, description = "Supplier not found")
    )
)]
pub async fn get_stock_by_supplier(
    State(state): State<crate::AppState>,
    Path(supplier_id): Path<i32>,
) -> AppResult<Json<SupplierStockReport>> {
    let report = state.services.inventory.stock_by_supplier(supplier_id).await?;
    Ok(Json(report))
}

/// Products whose total stock is at or below the threshold
#[utoipa::path(
    get,
    path = "/stock-entries/low-stock",
    tag = "stock-entries",
    params(LowStockParams),
    responses(
        (status = 200, description = "Low stock products, lowest first", body = Vec<LowStockProduct>)
    )
)]
pub async fn get_low_stock(
    State(state): State<crate::AppState>,
    Query(params): Query<LowStockParams>,
) -> AppResult<Json<Vec<LowStockProduct>>> {
    let threshold = params.threshold.unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD);
    let report = state.services.inventory.low_stock_report(threshold).await?;
    Ok(Json(report))
}
