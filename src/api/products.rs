//! Product endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::product::{CreateProduct, ProductDetails, UpdateProduct},
};

use super::{check, Pagination};

/// List products with resolved categories and stock totals
#[utoipa::path(
    get,
    path = "/products",
    tag = "products",
    params(Pagination),
    responses(
        (status = 200, description = "List of products", body = Vec<ProductDetails>)
    )
)]
pub async fn list_products(
    State(state): State<crate::AppState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<Vec<ProductDetails>>> {
    let (skip, limit) = pagination.clamp();
    let products = state.services.inventory.list_products(skip, limit).await?;
    Ok(Json(products))
}

/// Get product by ID
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "products",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product details", body = ProductDetails),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ProductDetails>> {
    let product = state.services.inventory.get_product(id).await?;
    Ok(Json(product))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "/products",
    tag = "products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created", body = ProductDetails),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Product already exists")
    )
)]
pub async fn create_product(
    State(state): State<crate::AppState>,
    Json(product): Json<CreateProduct>,
) -> AppResult<(StatusCode, Json<ProductDetails>)> {
    check(&product)?;
    let created = state.services.inventory.create_product(product).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a product
#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "products",
    params(("id" = i32, Path, description = "Product ID")),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = ProductDetails),
        (status = 404, description = "Product or category not found")
    )
)]
pub async fn update_product(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(product): Json<UpdateProduct>,
) -> AppResult<Json<ProductDetails>> {
    check(&product)?;
    let updated = state.services.inventory.update_product(id, product).await?;
    Ok(Json(updated))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "products",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Product has stock entries")
    )
)]
pub async fn delete_product(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.inventory.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
