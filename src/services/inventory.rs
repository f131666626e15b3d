//! Inventory ledger service: categories, suppliers, products, stock entries.
//!
//! Business-rule validation (phone format, strictly positive quantities and
//! prices) happens here before any repository write; referential checks run
//! inside the repository transactions.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    error::{AppError, AppResult},
    models::{
        category::{Category, CreateCategory, UpdateCategory},
        product::{CreateProduct, ProductDetails, UpdateProduct},
        stock_entry::{
            CreateStockEntry, LowStockProduct, ProductStockReport, StockEntryDetails,
            SupplierStockReport, UpdateStockEntry,
        },
        supplier::{CreateSupplier, Supplier, UpdateSupplier},
    },
    repository::Repository,
};

static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?\d{10,15}$").expect("phone pattern is valid"));

fn validate_phone(phone: &str) -> AppResult<()> {
    if PHONE_PATTERN.is_match(phone) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "Invalid phone number '{}': expected 10-15 digits with optional leading +",
            phone
        )))
    }
}

fn validate_positive_price(unit_price: f64) -> AppResult<()> {
    if unit_price > 0.0 {
        Ok(())
    } else {
        Err(AppError::Validation(
            "Unit price must be positive".to_string(),
        ))
    }
}

fn validate_positive_quantity(quantity: i32) -> AppResult<()> {
    if quantity > 0 {
        Ok(())
    } else {
        Err(AppError::Validation("Quantity must be positive".to_string()))
    }
}

#[derive(Clone)]
pub struct InventoryService {
    repository: Repository,
}

impl InventoryService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    // --- Categories ---

    pub async fn list_categories(&self, skip: i64, limit: i64) -> AppResult<Vec<Category>> {
        self.repository.categories.list(skip, limit).await
    }

    pub async fn get_category(&self, id: i32) -> AppResult<Category> {
        self.repository.categories.get_by_id(id).await
    }

    pub async fn create_category(&self, category: CreateCategory) -> AppResult<Category> {
        self.repository.categories.create(&category).await
    }

    pub async fn update_category(&self, id: i32, category: UpdateCategory) -> AppResult<Category> {
        self.repository.categories.update(id, &category).await
    }

    pub async fn delete_category(&self, id: i32) -> AppResult<()> {
        self.repository.categories.delete(id).await
    }

    // --- Suppliers ---

    pub async fn list_suppliers(&self, skip: i64, limit: i64) -> AppResult<Vec<Supplier>> {
        self.repository.suppliers.list(skip, limit).await
    }

    pub async fn get_supplier(&self, id: i32) -> AppResult<Supplier> {
        self.repository.suppliers.get_by_id(id).await
    }

    pub async fn create_supplier(&self, supplier: CreateSupplier) -> AppResult<Supplier> {
        validate_phone(&supplier.phone)?;
        self.repository.suppliers.create(&supplier).await
    }

    pub async fn update_supplier(&self, id: i32, supplier: UpdateSupplier) -> AppResult<Supplier> {
        if let Some(ref phone) = supplier.phone {
            validate_phone(phone)?;
        }
        self.repository.suppliers.update(id, &supplier).await
    }

    pub async fn delete_supplier(&self, id: i32) -> AppResult<()> {
        self.repository.suppliers.delete(id).await
    }

    // --- Products ---

    pub async fn list_products(&self, skip: i64, limit: i64) -> AppResult<Vec<ProductDetails>> {
        self.repository.products.list(skip, limit).await
    }

    pub async fn get_product(&self, id: i32) -> AppResult<ProductDetails> {
        self.repository.products.get_by_id(id).await
    }

    pub async fn create_product(&self, product: CreateProduct) -> AppResult<ProductDetails> {
        validate_positive_price(product.unit_price)?;
        self.repository.products.create(&product).await
    }

    pub async fn update_product(&self, id: i32, product: UpdateProduct) -> AppResult<ProductDetails> {
        if let Some(unit_price) = product.unit_price {
            validate_positive_price(unit_price)?;
        }
        self.repository.products.update(id, &product).await
    }

    pub async fn delete_product(&self, id: i32) -> AppResult<()> {
        self.repository.products.delete(id).await
    }

    // --- Stock entries ---

    pub async fn list_stock_entries(&self, skip: i64, limit: i64) -> AppResult<Vec<StockEntryDetails>> {
        self.repository.stock_entries.list(skip, limit).await
    }

    pub async fn get_stock_entry(&self, id: i32) -> AppResult<StockEntryDetails> {
        self.repository.stock_entries.get_by_id(id).await
    }

    pub async fn create_stock_entry(&self, entry: CreateStockEntry) -> AppResult<StockEntryDetails> {
        validate_positive_quantity(entry.quantity)?;
        validate_positive_price(entry.unit_price)?;
        self.repository.stock_entries.create(&entry).await
    }

    pub async fn update_stock_entry(&self, id: i32, entry: UpdateStockEntry) -> AppResult<StockEntryDetails> {
        if let Some(quantity) = entry.quantity {
            validate_positive_quantity(quantity)?;
        }
        if let Some(unit_price) = entry.unit_price {
            validate_positive_price(unit_price)?;
        }
        self.repository.stock_entries.update(id, &entry).await
    }

    pub async fn delete_stock_entry(&self, id: i32) -> AppResult<()> {
        self.repository.stock_entries.delete(id).await
    }

    pub async fn stock_by_product(&self, product_id: i32) -> AppResult<ProductStockReport> {
        self.repository.stock_entries.by_product(product_id).await
    }

    pub async fn stock_by_supplier(&self, supplier_id: i32) -> AppResult<SupplierStockReport> {
        self.repository.stock_entries.by_supplier(supplier_id).await
    }

    pub async fn low_stock_report(&self, threshold: i64) -> AppResult<Vec<LowStockProduct>> {
        self.repository.stock_entries.low_stock(threshold).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_and_prefixed_phones() {
        assert!(validate_phone("0123456789").is_ok());
        assert!(validate_phone("+33123456789").is_ok());
        assert!(validate_phone("123456789012345").is_ok());
    }

    #[test]
    fn rejects_malformed_phones() {
        assert!(validate_phone("123").is_err());
        assert!(validate_phone("1234567890123456").is_err());
        assert!(validate_phone("+33 1 23 45 67 89").is_err());
        assert!(validate_phone("phone").is_err());
    }

    #[test]
    fn rejects_non_positive_amounts() {
        assert!(validate_positive_quantity(0).is_err());
        assert!(validate_positive_quantity(-3).is_err());
        assert!(validate_positive_quantity(1).is_ok());
        assert!(validate_positive_price(0.0).is_err());
        assert!(validate_positive_price(-1.5).is_err());
        assert!(validate_positive_price(0.01).is_ok());
    }
}
