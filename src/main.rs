//! Ledger Server
//!
//! REST API server for the inventory and lending ledgers.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ledger_server::{api, config::AppConfig, repository::Repository, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("ledger_server={},tower_http=debug", config.logging.level).into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Ledger Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository);

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(server_host.parse().expect("Invalid host address"), server_port);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        // Categories
        .route("/categories", get(api::categories::list_categories))
        .route("/categories", post(api::categories::create_category))
        .route("/categories/:id", get(api::categories::get_category))
        .route("/categories/:id", put(api::categories::update_category))
        .route("/categories/:id", delete(api::categories::delete_category))
        // Suppliers
        .route("/suppliers", get(api::suppliers::list_suppliers))
        .route("/suppliers", post(api::suppliers::create_supplier))
        .route("/suppliers/:id", get(api::suppliers::get_supplier))
        .route("/suppliers/:id", put(api::suppliers::update_supplier))
        .route("/suppliers/:id", delete(api::suppliers::delete_supplier))
        // Products
        .route("/products", get(api::products::list_products))
        .route("/products", post(api::products::create_product))
        .route("/products/:id", get(api::products::get_product))
        .route("/products/:id", put(api::products::update_product))
        .route("/products/:id", delete(api::products::delete_product))
        // Stock entries
        .route("/stock-entries", get(api::stock_entries::list_stock_entries))
        .route("/stock-entries", post(api::stock_entries::create_stock_entry))
        .route("/stock-entries/low-stock", get(api::stock_entries::get_low_stock))
        .route(
            "/stock-entries/by-product/:product_id",
            get(api::stock_entries::get_stock_by_product),
        )
        .route(
            "/stock-entries/by-supplier/:supplier_id",
            get(api::stock_entries::get_stock_by_supplier),
        )
        .route("/stock-entries/:id", get(api::stock_entries::get_stock_entry))
        .route("/stock-entries/:id", put(api::stock_entries::update_stock_entry))
        .route("/stock-entries/:id", delete(api::stock_entries::delete_stock_entry))
        // Authors
        .route("/authors", get(api::authors::list_authors))
        .route("/authors", post(api::authors::create_author))
        .route("/authors/:id", get(api::authors::get_author))
        .route("/authors/:id", put(api::authors::update_author))
        .route("/authors/:id", delete(api::authors::delete_author))
        // Genres
        .route("/genres", get(api::genres::list_genres))
        .route("/genres", post(api::genres::create_genre))
        .route("/genres/:id", get(api::genres::get_genre))
        .route("/genres/:id", put(api::genres::update_genre))
        .route("/genres/:id", delete(api::genres::delete_genre))
        // Books
        .route("/books", get(api::books::list_books))
        .route("/books", post(api::books::create_book))
        .route("/books/:id", get(api::books::get_book))
        .route("/books/:id", put(api::books::update_book))
        .route("/books/:id", delete(api::books::delete_book))
        .route("/books/:id/availability", get(api::books::get_book_availability))
        // Borrow records
        .route("/borrow-records", get(api::borrow_records::list_borrow_records))
        .route("/borrow-records", post(api::borrow_records::create_borrow_record))
        .route("/borrow-records/:id", get(api::borrow_records::get_borrow_record))
        .route("/borrow-records/:id", put(api::borrow_records::update_borrow_record))
        .route("/borrow-records/:id", delete(api::borrow_records::delete_borrow_record))
        .route(
            "/borrow-records/:id/return",
            post(api::borrow_records::return_borrow_record),
        )
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
