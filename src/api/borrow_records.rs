//! Borrow record endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::borrow_record::{
        BorrowRecordDetails, CreateBorrowRecord, UpdateBorrowRecord,
    },
};

use super::{check, Pagination};

/// List borrow records with resolved books
#[utoipa::path(
    get,
    path = "/borrow-records",
    tag = "borrow-records",
    params(Pagination),
    responses(
        (status = 200, description = "List of borrow records", body = Vec<BorrowRecordDetails>)
    )
)]
pub async fn list_borrow_records(
    State(state): State<crate::AppState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<Vec<BorrowRecordDetails>>> {
    let (skip, limit) = pagination.clamp();
    let records = state.services.lending.list_borrow_records(skip, limit).await?;
    Ok(Json(records))
}

/// Get borrow record by ID
#[utoipa::path(
    get,
    path = "/borrow-records/{id}",
    tag = "borrow-records",
    params(("id" = i32, Path, description = "Borrow record ID")),
    responses(
        (status = 200, description = "Borrow record details", body = BorrowRecordDetails),
        (status = 404, description = "Borrow record not found")
    )
)]
pub async fn get_borrow_record(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BorrowRecordDetails>> {
    let record = state.services.lending.get_borrow_record(id).await?;
    Ok(Json(record))
}

/// Borrow a book. Fails when every copy is already on loan.
#[utoipa::path(
    post,
    path = "/borrow-records",
    tag = "borrow-records",
    request_body = CreateBorrowRecord,
    responses(
        (status = 201, description = "Borrow record created", body = BorrowRecordDetails),
        (status = 400, description = "No copies available"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn create_borrow_record(
    State(state): State<crate::AppState>,
    Json(record): Json<CreateBorrowRecord>,
) -> AppResult<(StatusCode, Json<BorrowRecordDetails>)> {
    check(&record)?;
    let created = state.services.lending.create_borrow_record(record).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a borrow record
#[utoipa::path(
    put,
    path = "/borrow-records/{id}",
    tag = "borrow-records",
    params(("id" = i32, Path, description = "Borrow record ID")),
    request_body = UpdateBorrowRecord,
    responses(
        (status = 200, description = "Borrow record updated", body = BorrowRecordDetails),
        (status = 400, description = "Record already returned"),
        (status = 404, description = "Borrow record not found")
    )
)]
pub async fn update_borrow_record(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(record): Json<UpdateBorrowRecord>,
) -> AppResult<Json<BorrowRecordDetails>> {
    check(&record)?;
    let updated = state.services.lending.update_borrow_record(id, record).await?;
    Ok(Json(updated))
}

/// Return a borrowed book
#[utoipa::path(
    post,
    path = "/borrow-records/{id}/return",
    tag = "borrow-records",
    params(("id" = i32, Path, description = "Borrow record ID")),
    responses(
        (status = 200, description = "Record marked returned", body = BorrowRecordDetails),
        (status = 400, description = "Record already returned"),
        (status = 404, description = "Borrow record not found")
    )
)]
pub async fn return_borrow_record(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BorrowRecordDetails>> {
    let returned = state.services.lending.return_borrow_record(id).await?;
    Ok(Json(returned))
}

/// Delete a borrow record
#[utoipa::path(
    delete,
    path = "/borrow-records/{id}",
    tag = "borrow-records",
    params(("id" = i32, Path, description = "Borrow record ID")),
    responses(
        (status = 204, description = "Borrow record deleted"),
        (status = 404, description = "Borrow record not found")
    )
)]
pub async fn delete_borrow_record(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.lending.delete_borrow_record(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
