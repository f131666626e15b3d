//! Stock entries repository for database operations.
//!
//! Creation validates both references inside one transaction so a failed
//! check never leaves a partial write. Aggregate reports (per-product
//! totals, low stock) are computed with SUM over movement rows.

use chrono::Utc;
use sqlx::{postgres::PgRow, Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::{
        product::ProductBrief,
        stock_entry::{
            CreateStockEntry, LowStockProduct, ProductStockReport, StockEntry,
            StockEntryDetails, SupplierStockReport, UpdateStockEntry,
        },
        supplier::Supplier,
    },
};

const DETAILS_QUERY: &str = r#"
    SELECT s.id, s.quantity, s.unit_price, s.date_added,
           p.id AS product_id, p.name AS product_name, p.sku AS product_sku,
           p.unit_price AS product_unit_price,
           su.id AS supplier_id, su.name AS supplier_name, su.phone AS supplier_phone,
           su.contact_info AS supplier_contact_info
    FROM stock_entries s
    JOIN products p ON p.id = s.product_id
    JOIN suppliers su ON su.id = s.supplier_id
"#;

fn row_to_details(row: &PgRow) -> StockEntryDetails {
    StockEntryDetails {
        id: row.get("id"),
        quantity: row.get("quantity"),
        unit_price: row.get("unit_price"),
        date_added: row.get("date_added"),
        product: ProductBrief {
            id: row.get("product_id"),
            name: row.get("product_name"),
            sku: row.get("product_sku"),
            unit_price: row.get("product_unit_price"),
        },
        supplier: Supplier {
            id: row.get("supplier_id"),
            name: row.get("supplier_name"),
            phone: row.get("supplier_phone"),
            contact_info: row.get("supplier_contact_info"),
        },
    }
}

#[derive(Clone)]
pub struct StockEntriesRepository {
    pool: Pool<Postgres>,
}

impl StockEntriesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get stock entry by ID with resolved product and supplier
    pub async fn get_by_id(&self, id: i32) -> AppResult<StockEntryDetails> {
        let row = sqlx::query(&format!("{} WHERE s.id = $1", DETAILS_QUERY))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Stock entry with id {} not found", id))
            })?;

        Ok(row_to_details(&row))
    }

    /// List stock entries with pagination
    pub async fn list(&self, skip: i64, limit: i64) -> AppResult<Vec<StockEntryDetails>> {
        let rows = sqlx::query(&format!(
            "{} ORDER BY s.id OFFSET $1 LIMIT $2",
            DETAILS_QUERY
        ))
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(row_to_details).collect())
    }

    /// Create a new stock entry. Product and supplier existence are checked
    /// in the same transaction as the insert.
    pub async fn create(&self, entry: &CreateStockEntry) -> AppResult<StockEntryDetails> {
        let mut tx = self.pool.begin().await?;

        let product_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
                .bind(entry.product_id)
                .fetch_one(&mut *tx)
                .await?;
        if !product_exists {
            return Err(AppError::NotFound(format!(
                "Product with id {} not found",
                entry.product_id
            )));
        }

        let supplier_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM suppliers WHERE id = $1)")
                .bind(entry.supplier_id)
                .fetch_one(&mut *tx)
                .await?;
        if !supplier_exists {
            return Err(AppError::NotFound(format!(
                "Supplier with id {} not found",
                entry.supplier_id
            )));
        }

        let date_added = entry.date_added.unwrap_or_else(Utc::now);
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO stock_entries (product_id, supplier_id, quantity, unit_price, date_added)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(entry.product_id)
        .bind(entry.supplier_id)
        .bind(entry.quantity)
        .bind(entry.unit_price)
        .bind(date_added)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        self.get_by_id(id).await
    }

    /// Update a stock entry (partial), re-validating any moved reference
    pub async fn update(&self, id: i32, entry: &UpdateStockEntry) -> AppResult<StockEntryDetails> {
        let mut tx = self.pool.begin().await?;

        if let Some(product_id) = entry.product_id {
            let product_exists: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
                    .bind(product_id)
                    .fetch_one(&mut *tx)
                    .await?;
            if !product_exists {
                return Err(AppError::NotFound(format!(
                    "Product with id {} not found",
                    product_id
                )));
            }
        }
        if let Some(supplier_id) = entry.supplier_id {
            let supplier_exists: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM suppliers WHERE id = $1)")
                    .bind(supplier_id)
                    .fetch_one(&mut *tx)
                    .await?;
            if !supplier_exists {
                return Err(AppError::NotFound(format!(
                    "Supplier with id {} not found",
                    supplier_id
                )));
            }
        }

        let updated: Option<i32> = sqlx::query_scalar(
            r#"
            UPDATE stock_entries
            SET product_id = COALESCE($2, product_id),
                supplier_id = COALESCE($3, supplier_id),
                quantity = COALESCE($4, quantity),
                unit_price = COALESCE($5, unit_price),
                date_added = COALESCE($6, date_added)
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(entry.product_id)
        .bind(entry.supplier_id)
        .bind(entry.quantity)
        .bind(entry.unit_price)
        .bind(entry.date_added)
        .fetch_optional(&mut *tx)
        .await?;

        let id = updated.ok_or_else(|| {
            AppError::NotFound(format!("Stock entry with id {} not found", id))
        })?;

        tx.commit().await?;

        self.get_by_id(id).await
    }

    /// Delete a stock entry
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM stock_entries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Stock entry with id {} not found",
                id
            )));
        }

        Ok(())
    }

    /// All entries for one product with the computed total; 0 total when
    /// the product has no entries. The total is summed from the returned
    /// rows so the two can never disagree.
    pub async fn by_product(&self, product_id: i32) -> AppResult<ProductStockReport> {
        let product_name: String = sqlx::query_scalar("SELECT name FROM products WHERE id = $1")
            .bind(product_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Product with id {} not found", product_id))
            })?;

        let stock_entries = sqlx::query_as::<_, StockEntry>(
            r#"
            SELECT id, product_id, supplier_id, quantity, unit_price, date_added
            FROM stock_entries
            WHERE product_id = $1
            ORDER BY date_added
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        let total_stock: i64 = stock_entries.iter().map(|e| i64::from(e.quantity)).sum();

        Ok(ProductStockReport {
            product_id,
            product_name,
            total_stock,
            stock_entries,
        })
    }

    /// All entries recorded against one supplier
    pub async fn by_supplier(&self, supplier_id: i32) -> AppResult<SupplierStockReport> {
        let supplier_name: String = sqlx::query_scalar("SELECT name FROM suppliers WHERE id = $1")
            .bind(supplier_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Supplier with id {} not found", supplier_id))
            })?;

        let stock_entries = sqlx::query_as::<_, StockEntry>(
            r#"
            SELECT id, product_id, supplier_id, quantity, unit_price, date_added
            FROM stock_entries
            WHERE supplier_id = $1
            ORDER BY date_added
            "#,
        )
        .bind(supplier_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(SupplierStockReport {
            supplier_id,
            supplier_name,
            stock_entries,
        })
    }

    /// Products whose summed stock is at or below the threshold, lowest
    /// first. Products with no entries have no group and do not appear.
    pub async fn low_stock(&self, threshold: i64) -> AppResult<Vec<LowStockProduct>> {
        let rows = sqlx::query(
            r#"
            SELECT p.id, p.name, p.sku, p.unit_price,
                   SUM(s.quantity)::bigint AS current_stock
            FROM products p
            JOIN stock_entries s ON s.product_id = p.id
            GROUP BY p.id, p.name, p.sku, p.unit_price
            HAVING SUM(s.quantity) <= $1
            ORDER BY current_stock, p.id
            "#,
        )
        .bind(threshold)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| LowStockProduct {
                product_id: row.get("id"),
                product_name: row.get("name"),
                sku: row.get("sku"),
                unit_price: row.get("unit_price"),
                current_stock: row.get("current_stock"),
                threshold,
                status: "LOW_STOCK".to_string(),
            })
            .collect())
    }
}
