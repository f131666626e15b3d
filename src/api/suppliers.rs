//! Supplier endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::supplier::{CreateSupplier, Supplier, UpdateSupplier},
};

use super::{check, Pagination};

/// List suppliers
#[utoipa::path(
    get,
    path = "/suppliers",
    tag = "suppliers",
    params(Pagination),
    responses(
        (status = 200, description = "List of suppliers", body = Vec<Supplier>)
    )
)]
pub async fn list_suppliers(
    State(state): State<crate::AppState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<Vec<Supplier>>> {
    let (skip, limit) = pagination.clamp();
    let suppliers = state.services.inventory.list_suppliers(skip, limit).await?;
    Ok(Json(suppliers))
}

/// Get supplier by ID
#[utoipa::path(
    get,
    path = "/suppliers/{id}",
    tag = "suppliers",
    params(("id" = i32, Path, description = "Supplier ID")),
    responses(
        (status = 200, description = "Supplier details", body = Supplier),
        (status = 404, description = "Supplier not found")
    )
)]
pub async fn get_supplier(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Supplier>> {
    let supplier = state.services.inventory.get_supplier(id).await?;
    Ok(Json(supplier))
}

/// Create a new supplier
#[utoipa::path(
    post,
    path = "/suppliers",
    tag = "suppliers",
    request_body = CreateSupplier,
    responses(
        (status = 201, description = "Supplier created", body = Supplier),
        (status = 400, description = "Invalid phone number"),
        (status = 409, description = "Supplier already exists")
    )
)]
pub async fn create_supplier(
    State(state): State<crate::AppState>,
    Json(supplier): Json<CreateSupplier>,
) -> AppResult<(StatusCode, Json<Supplier>)> {
    check(&supplier)?;
    let created = state.services.inventory.create_supplier(supplier).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a supplier
#[utoipa::path(
    put,
    path = "/suppliers/{id}",
    tag = "suppliers",
    params(("id" = i32, Path, description = "Supplier ID")),
    request_body = UpdateSupplier,
    responses(
        (status = 200, description = "Supplier updated", body = Supplier),
        (status = 404, description = "Supplier not found")
    )
)]
pub async fn update_supplier(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(supplier): Json<UpdateSupplier>,
) -> AppResult<Json<Supplier>> {
    check(&supplier)?;
    let updated = state.services.inventory.update_supplier(id, supplier).await?;
    Ok(Json(updated))
}

/// Delete a supplier
#[utoipa::path(
    delete,
    path = "/suppliers/{id}",
    tag = "suppliers",
    params(("id" = i32, Path, description = "Supplier ID")),
    responses(
        (status = 204, description = "Supplier deleted"),
        (status = 404, description = "Supplier not found"),
        (status = 409, description = "Supplier has stock entries")
    )
)]
pub async fn delete_supplier(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.inventory.delete_supplier(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
