//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{
    authors, books, borrow_records, categories, genres, health, products, stock_entries,
    suppliers,
};
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ledger API",
        version = "0.3.0",
        description = "Inventory and lending ledger REST API",
        license(name = "MIT")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        // Categories
        categories::list_categories,
        categories::get_category,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        // Suppliers
        suppliers::list_suppliers,
        suppliers::get_supplier,
        suppliers::create_supplier,
        suppliers::update_supplier,
        suppliers::delete_supplier,
        // Products
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        // Stock entries
        stock_entries::list_stock_entries,
        stock_entries::get_stock_entry,
        stock_entries::create_stock_entry,
        stock_entries::update_stock_entry,
        stock_entries::delete_stock_entry,
        stock_entries::get_stock_by_product,
        stock_entries::get_stock_by_supplier,
        stock_entries::get_low_stock,
        // Authors
        authors::list_authors,
        authors::get_author,
        authors::create_author,
        authors::update_author,
        authors::delete_author,
        // Genres
        genres::list_genres,
        genres::get_genre,
        genres::create_genre,
        genres::update_genre,
        genres::delete_genre,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        books::get_book_availability,
        // Borrow records
        borrow_records::list_borrow_records,
        borrow_records::get_borrow_record,
        borrow_records::create_borrow_record,
        borrow_records::update_borrow_record,
        borrow_records::return_borrow_record,
        borrow_records::delete_borrow_record,
    ),
    components(schemas(
        health::HealthResponse,
        crate::error::ErrorResponse,
        models::category::Category,
        models::category::CreateCategory,
        models::category::UpdateCategory,
        models::supplier::Supplier,
        models::supplier::CreateSupplier,
        models::supplier::UpdateSupplier,
        models::product::ProductDetails,
        models::product::ProductBrief,
        models::product::CreateProduct,
        models::product::UpdateProduct,
        models::stock_entry::StockEntry,
        models::stock_entry::StockEntryDetails,
        models::stock_entry::CreateStockEntry,
        models::stock_entry::UpdateStockEntry,
        models::stock_entry::ProductStockReport,
        models::stock_entry::SupplierStockReport,
        models::stock_entry::LowStockProduct,
        models::author::Author,
        models::author::CreateAuthor,
        models::author::UpdateAuthor,
        models::genre::Genre,
        models::genre::CreateGenre,
        models::genre::UpdateGenre,
        models::book::BookDetails,
        models::book::BookBrief,
        models::book::BookAvailability,
        models::book::CreateBook,
        models::book::UpdateBook,
        models::borrow_record::BorrowRecord,
        models::borrow_record::BorrowRecordDetails,
        models::borrow_record::BorrowStatus,
        models::borrow_record::CreateBorrowRecord,
        models::borrow_record::UpdateBorrowRecord,
    )),
    tags(
        (name = "health", description = "Service health"),
        (name = "categories", description = "Product categories"),
        (name = "suppliers", description = "Suppliers"),
        (name = "products", description = "Product catalog"),
        (name = "stock-entries", description = "Stock movements and reports"),
        (name = "authors", description = "Authors"),
        (name = "genres", description = "Genres"),
        (name = "books", description = "Book catalog"),
        (name = "borrow-records", description = "Loan movements")
    )
)]
pub struct ApiDoc;

/// Create the Swagger UI router serving the OpenAPI document
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
