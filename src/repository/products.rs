//! Products repository for database operations.
//!
//! Reads resolve the owning category in one query and compute the stock
//! total as a subselect over stock entries; the total is never stored.

use sqlx::{postgres::PgRow, Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::{
        category::Category,
        product::{CreateProduct, Product, ProductDetails, UpdateProduct},
    },
};

use super::conflict_on_unique;

const DETAILS_QUERY: &str = r#"
    SELECT p.id, p.name, p.sku, p.description, p.unit_price, p.category_id,
           c.name AS category_name, c.description AS category_description,
           COALESCE((
               SELECT SUM(s.quantity)
               FROM stock_entries s
               WHERE s.product_id = p.id
           ), 0)::bigint AS total_stock
    FROM products p
    JOIN categories c ON c.id = p.category_id
"#;

fn row_to_details(row: &PgRow) -> ProductDetails {
    ProductDetails {
        id: row.get("id"),
        name: row.get("name"),
        sku: row.get("sku"),
        description: row.get("description"),
        unit_price: row.get("unit_price"),
        total_stock: row.get("total_stock"),
        category: Category {
            id: row.get("category_id"),
            name: row.get("category_name"),
            description: row.get("category_description"),
        },
    }
}

#[derive(Clone)]
pub struct ProductsRepository {
    pool: Pool<Postgres>,
}

impl ProductsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get product by ID with resolved category and computed stock
    pub async fn get_by_id(&self, id: i32) -> AppResult<ProductDetails> {
        let row = sqlx::query(&format!("{} WHERE p.id = $1", DETAILS_QUERY))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Product with id {} not found", id)))?;

        Ok(row_to_details(&row))
    }

    /// List products with pagination
    pub async fn list(&self, skip: i64, limit: i64) -> AppResult<Vec<ProductDetails>> {
        let rows = sqlx::query(&format!(
            "{} ORDER BY p.id OFFSET $1 LIMIT $2",
            DETAILS_QUERY
        ))
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(row_to_details).collect())
    }

    /// Create a new product. The category must exist; checked here so no
    /// write is attempted against a dangling reference.
    pub async fn create(&self, product: &CreateProduct) -> AppResult<ProductDetails> {
        let category_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
                .bind(product.category_id)
                .fetch_one(&self.pool)
                .await?;
        if !category_exists {
            return Err(AppError::NotFound(format!(
                "Category with id {} not found",
                product.category_id
            )));
        }

        let created = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, sku, description, unit_price, category_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, sku, description, unit_price, category_id
            "#,
        )
        .bind(&product.name)
        .bind(&product.sku)
        .bind(&product.description)
        .bind(product.unit_price)
        .bind(product.category_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "Product with this SKU already exists"))?;

        self.get_by_id(created.id).await
    }

    /// Update a product (partial). Moving it to another category
    /// re-validates the new category first.
    pub async fn update(&self, id: i32, product: &UpdateProduct) -> AppResult<ProductDetails> {
        if let Some(category_id) = product.category_id {
            let category_exists: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
                    .bind(category_id)
                    .fetch_one(&self.pool)
                    .await?;
            if !category_exists {
                return Err(AppError::NotFound(format!(
                    "Category with id {} not found",
                    category_id
                )));
            }
        }

        let updated = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = COALESCE($2, name),
                sku = COALESCE($3, sku),
                description = COALESCE($4, description),
                unit_price = COALESCE($5, unit_price),
                category_id = COALESCE($6, category_id)
            WHERE id = $1
            RETURNING id, name, sku, description, unit_price, category_id
            "#,
        )
        .bind(id)
        .bind(&product.name)
        .bind(&product.sku)
        .bind(&product.description)
        .bind(product.unit_price)
        .bind(product.category_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "Product with this SKU already exists"))?
        .ok_or_else(|| AppError::NotFound(format!("Product with id {} not found", id)))?;

        self.get_by_id(updated.id).await
    }

    /// Delete a product, refusing while stock entries reference it
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;
        if !exists {
            return Err(AppError::NotFound(format!(
                "Product with id {} not found",
                id
            )));
        }

        // Report blocking entries by the supplier that recorded them
        let dependents: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT DISTINCT su.name
            FROM stock_entries s
            JOIN suppliers su ON su.id = s.supplier_id
            WHERE s.product_id = $1
            ORDER BY su.name
            "#,
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;
        if !dependents.is_empty() {
            return Err(AppError::HasDependents {
                entity: "Product".to_string(),
                dependents,
            });
        }

        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(())
    }
}
