//! Suppliers repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::supplier::{CreateSupplier, Supplier, UpdateSupplier},
};

use super::conflict_on_unique;

#[derive(Clone)]
pub struct SuppliersRepository {
    pool: Pool<Postgres>,
}

impl SuppliersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get supplier by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Supplier> {
        sqlx::query_as::<_, Supplier>(
            "SELECT id, name, phone, contact_info FROM suppliers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Supplier with id {} not found", id)))
    }

    /// List suppliers with pagination
    pub async fn list(&self, skip: i64, limit: i64) -> AppResult<Vec<Supplier>> {
        let suppliers = sqlx::query_as::<_, Supplier>(
            "SELECT id, name, phone, contact_info FROM suppliers ORDER BY id OFFSET $1 LIMIT $2",
        )
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(suppliers)
    }

    /// Create a new supplier
    pub async fn create(&self, supplier: &CreateSupplier) -> AppResult<Supplier> {
        sqlx::query_as::<_, Supplier>(
            r#"
            INSERT INTO suppliers (name, phone, contact_info)
            VALUES ($1, $2, $3)
            RETURNING id, name, phone, contact_info
            "#,
        )
        .bind(&supplier.name)
        .bind(&supplier.phone)
        .bind(&supplier.contact_info)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "Supplier with this phone already exists"))
    }

    /// Update a supplier (partial)
    pub async fn update(&self, id: i32, supplier: &UpdateSupplier) -> AppResult<Supplier> {
        sqlx::query_as::<_, Supplier>(
            r#"
            UPDATE suppliers
            SET name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                contact_info = COALESCE($4, contact_info)
            WHERE id = $1
            RETURNING id, name, phone, contact_info
            "#,
        )
        .bind(id)
        .bind(&supplier.name)
        .bind(&supplier.phone)
        .bind(&supplier.contact_info)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "Supplier with this phone already exists"))?
        .ok_or_else(|| AppError::NotFound(format!("Supplier with id {} not found", id)))
    }

    /// Delete a supplier, refusing while stock entries reference it
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM suppliers WHERE id = $1)")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;
        if !exists {
            return Err(AppError::NotFound(format!(
                "Supplier with id {} not found",
                id
            )));
        }

        // Report blocking entries by the product they stocked
        let dependents: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT DISTINCT p.name
            FROM stock_entries s
            JOIN products p ON p.id = s.product_id
            WHERE s.supplier_id = $1
            ORDER BY p.name
            "#,
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;
        if !dependents.is_empty() {
            return Err(AppError::HasDependents {
                entity: "Supplier".to_string(),
                dependents,
            });
        }

        sqlx::query("DELETE FROM suppliers WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(())
    }
}
