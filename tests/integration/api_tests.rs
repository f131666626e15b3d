//! API integration tests

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Unique suffix so repeated runs do not trip uniqueness constraints
fn unique(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    format!("{}-{}", prefix, nanos)
}

async fn create_category(client: &Client, name: &str) -> Value {
    let response = client
        .post(format!("{}/categories", BASE_URL))
        .json(&json!({ "name": name }))
        .send()
        .await
        .expect("Failed to create category");
    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse category")
}

async fn create_supplier(client: &Client, name: &str) -> Value {
    // Phone must be unique; derive digits from the clock
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    let phone = format!("+{:014}", nanos % 100_000_000_000_000);
    let response = client
        .post(format!("{}/suppliers", BASE_URL))
        .json(&json!({ "name": name, "phone": phone, "contact_info": "test@example.com" }))
        .send()
        .await
        .expect("Failed to create supplier");
    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse supplier")
}

async fn create_product(client: &Client, category_id: i64, name: &str) -> Value {
    let response = client
        .post(format!("{}/products", BASE_URL))
        .json(&json!({
            "name": name,
            "sku": unique("SKU"),
            "unit_price": 9.99,
            "category_id": category_id
        }))
        .send()
        .await
        .expect("Failed to create product");
    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse product")
}

async fn create_stock_entry(
    client: &Client,
    product: &Value,
    supplier: &Value,
    quantity: i64,
) -> Value {
    let response = client
        .post(format!("{}/stock-entries", BASE_URL))
        .json(&json!({
            "product_id": product["id"],
            "supplier_id": supplier["id"],
            "quantity": quantity,
            "unit_price": 2.5
        }))
        .send()
        .await
        .expect("Failed to create stock entry");
    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse stock entry")
}

async fn create_author(client: &Client) -> Value {
    let response = client
        .post(format!("{}/authors", BASE_URL))
        .json(&json!({ "name": unique("Author"), "country": "FR" }))
        .send()
        .await
        .expect("Failed to create author");
    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse author")
}

async fn create_genre(client: &Client) -> Value {
    let response = client
        .post(format!("{}/genres", BASE_URL))
        .json(&json!({ "name": unique("Genre") }))
        .send()
        .await
        .expect("Failed to create genre");
    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse genre")
}

async fn create_book_for(
    client: &Client,
    author_id: &Value,
    genre_id: &Value,
    total_copies: i64,
) -> Value {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": unique("Book"),
            "publication_year": 2001,
            "total_copies": total_copies,
            "author_id": author_id,
            "genre_id": genre_id
        }))
        .send()
        .await
        .expect("Failed to create book");
    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse book")
}

async fn create_book(client: &Client, total_copies: i64) -> Value {
    let author = create_author(client).await;
    let genre = create_genre(client).await;
    create_book_for(client, &author["id"], &genre["id"], total_copies).await
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_category_round_trip() {
    let client = Client::new();
    let name = unique("Fiction");

    let created = create_category(&client, &name).await;
    let id = created["id"].as_i64().expect("No id in response");
    assert_eq!(created["name"], name.as_str());

    // Read back
    let fetched: Value = client
        .get(format!("{}/categories/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to get category")
        .json()
        .await
        .expect("Failed to parse category");
    assert_eq!(fetched["name"], name.as_str());

    // Rename
    let renamed = unique("Fantasy");
    let updated: Value = client
        .put(format!("{}/categories/{}", BASE_URL, id))
        .json(&json!({ "name": renamed }))
        .send()
        .await
        .expect("Failed to update category")
        .json()
        .await
        .expect("Failed to parse category");
    assert_eq!(updated["name"], renamed.as_str());

    // Delete, then the get must 404
    let response = client
        .delete(format!("{}/categories/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to delete category");
    assert_eq!(response.status(), 204);

    let response = client
        .get(format!("{}/categories/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_category_name_conflicts() {
    let client = Client::new();
    let name = unique("Duplicated");

    create_category(&client, &name).await;

    let response = client
        .post(format!("{}/categories", BASE_URL))
        .json(&json!({ "name": name }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_list_returns_empty_array_not_404() {
    let client = Client::new();

    let response = client
        .get(format!("{}/categories?skip=1000000&limit=5", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body.as_array().expect("Expected array").len(), 0);
}

#[tokio::test]
#[ignore]
async fn test_category_delete_blocked_by_products() {
    let client = Client::new();
    let category = create_category(&client, &unique("Blocked")).await;
    let category_id = category["id"].as_i64().expect("No id");
    let product = create_product(&client, category_id, "Blocking product").await;

    let response = client
        .delete(format!("{}/categories/{}", BASE_URL, category_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    let body: Value = response.json().await.expect("Failed to parse response");
    let dependents = body["dependents"].as_array().expect("No dependents list");
    assert!(dependents.iter().any(|d| d == &product["name"]));
}

#[tokio::test]
#[ignore]
async fn test_product_delete_blocked_by_stock_entries() {
    let client = Client::new();
    let category = create_category(&client, &unique("Guarded")).await;
    let product = create_product(&client, category["id"].as_i64().unwrap(), "Guarded product").await;
    let supplier = create_supplier(&client, "Guarding supplier").await;
    let entry = create_stock_entry(&client, &product, &supplier, 4).await;

    let response = client
        .delete(format!("{}/products/{}", BASE_URL, product["id"]))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    let body: Value = response.json().await.expect("Failed to parse response");
    let dependents = body["dependents"].as_array().expect("No dependents list");
    assert!(dependents.iter().any(|d| d == &supplier["name"]));

    // Removing the blocking entry unblocks the delete
    let response = client
        .delete(format!("{}/stock-entries/{}", BASE_URL, entry["id"]))
        .send()
        .await
        .expect("Failed to delete stock entry");
    assert_eq!(response.status(), 204);

    let response = client
        .delete(format!("{}/products/{}", BASE_URL, product["id"]))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_supplier_delete_blocked_by_stock_entries() {
    let client = Client::new();
    let category = create_category(&client, &unique("Sourced")).await;
    let product = create_product(&client, category["id"].as_i64().unwrap(), "Sourced product").await;
    let supplier = create_supplier(&client, "Blocked supplier").await;
    let entry = create_stock_entry(&client, &product, &supplier, 2).await;

    let response = client
        .delete(format!("{}/suppliers/{}", BASE_URL, supplier["id"]))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    // Blocking entries are reported by the product they stocked
    let body: Value = response.json().await.expect("Failed to parse response");
    let dependents = body["dependents"].as_array().expect("No dependents list");
    assert!(dependents.iter().any(|d| d == &product["name"]));

    let response = client
        .delete(format!("{}/stock-entries/{}", BASE_URL, entry["id"]))
        .send()
        .await
        .expect("Failed to delete stock entry");
    assert_eq!(response.status(), 204);

    let response = client
        .delete(format!("{}/suppliers/{}", BASE_URL, supplier["id"]))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_author_delete_blocked_by_books() {
    let client = Client::new();
    let author = create_author(&client).await;
    let genre = create_genre(&client).await;
    let book = create_book_for(&client, &author["id"], &genre["id"], 1).await;

    let response = client
        .delete(format!("{}/authors/{}", BASE_URL, author["id"]))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    let body: Value = response.json().await.expect("Failed to parse response");
    let dependents = body["dependents"].as_array().expect("No dependents list");
    assert!(dependents.iter().any(|d| d == &book["title"]));

    let response = client
        .delete(format!("{}/books/{}", BASE_URL, book["id"]))
        .send()
        .await
        .expect("Failed to delete book");
    assert_eq!(response.status(), 204);

    let response = client
        .delete(format!("{}/authors/{}", BASE_URL, author["id"]))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_genre_delete_blocked_by_books() {
    let client = Client::new();
    let author = create_author(&client).await;
    let genre = create_genre(&client).await;
    let book = create_book_for(&client, &author["id"], &genre["id"], 1).await;

    let response = client
        .delete(format!("{}/genres/{}", BASE_URL, genre["id"]))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    let body: Value = response.json().await.expect("Failed to parse response");
    let dependents = body["dependents"].as_array().expect("No dependents list");
    assert!(dependents.iter().any(|d| d == &book["title"]));

    let response = client
        .delete(format!("{}/books/{}", BASE_URL, book["id"]))
        .send()
        .await
        .expect("Failed to delete book");
    assert_eq!(response.status(), 204);

    let response = client
        .delete(format!("{}/genres/{}", BASE_URL, genre["id"]))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_supplier_phone_validation() {
    let client = Client::new();

    let response = client
        .post(format!("{}/suppliers", BASE_URL))
        .json(&json!({ "name": "Bad Phone Co", "phone": "123", "contact_info": "x" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_stock_entry_rejects_bad_references_and_values() {
    let client = Client::new();
    let category = create_category(&client, &unique("Stockable")).await;
    let product = create_product(&client, category["id"].as_i64().unwrap(), "Widget").await;
    let supplier = create_supplier(&client, "Widget Co").await;

    // Nonexistent product
    let response = client
        .post(format!("{}/stock-entries", BASE_URL))
        .json(&json!({
            "product_id": 999_999_999,
            "supplier_id": supplier["id"],
            "quantity": 5,
            "unit_price": 1.0
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);

    // Non-positive quantity
    let response = client
        .post(format!("{}/stock-entries", BASE_URL))
        .json(&json!({
            "product_id": product["id"],
            "supplier_id": supplier["id"],
            "quantity": 0,
            "unit_price": 1.0
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    // Non-positive price
    let response = client
        .post(format!("{}/stock-entries", BASE_URL))
        .json(&json!({
            "product_id": product["id"],
            "supplier_id": supplier["id"],
            "quantity": 5,
            "unit_price": -1.0
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_stock_total_is_sum_of_entries() {
    let client = Client::new();
    let category = create_category(&client, &unique("Summable")).await;
    let product = create_product(&client, category["id"].as_i64().unwrap(), "Gadget").await;
    let supplier = create_supplier(&client, "Gadget Co").await;

    for quantity in [3, 7, 5] {
        let response = client
            .post(format!("{}/stock-entries", BASE_URL))
            .json(&json!({
                "product_id": product["id"],
                "supplier_id": supplier["id"],
                "quantity": quantity,
                "unit_price": 2.5
            }))
            .send()
            .await
            .expect("Failed to create stock entry");
        assert_eq!(response.status(), 201);
    }

    let fetched: Value = client
        .get(format!("{}/products/{}", BASE_URL, product["id"]))
        .send()
        .await
        .expect("Failed to get product")
        .json()
        .await
        .expect("Failed to parse product");
    assert_eq!(fetched["total_stock"], 15);

    let report: Value = client
        .get(format!("{}/stock-entries/by-product/{}", BASE_URL, product["id"]))
        .send()
        .await
        .expect("Failed to get report")
        .json()
        .await
        .expect("Failed to parse report");
    assert_eq!(report["total_stock"], 15);
    let entries = report["stock_entries"].as_array().unwrap();
    assert_eq!(entries.len(), 3);
    // The reported total must be the sum of exactly the entries returned
    let summed: i64 = entries
        .iter()
        .map(|e| e["quantity"].as_i64().unwrap())
        .sum();
    assert_eq!(report["total_stock"].as_i64().unwrap(), summed);
}

#[tokio::test]
#[ignore]
async fn test_low_stock_report_threshold() {
    let client = Client::new();
    let category = create_category(&client, &unique("Thresholds")).await;
    let category_id = category["id"].as_i64().unwrap();
    let low = create_product(&client, category_id, "Low runner").await;
    let high = create_product(&client, category_id, "High runner").await;
    let supplier = create_supplier(&client, "Runner Co").await;

    for (product, quantity) in [(&low, 5), (&high, 15)] {
        let response = client
            .post(format!("{}/stock-entries", BASE_URL))
            .json(&json!({
                "product_id": product["id"],
                "supplier_id": supplier["id"],
                "quantity": quantity,
                "unit_price": 4.0
            }))
            .send()
            .await
            .expect("Failed to create stock entry");
        assert_eq!(response.status(), 201);
    }

    let report: Value = client
        .get(format!("{}/stock-entries/low-stock?threshold=10", BASE_URL))
        .send()
        .await
        .expect("Failed to get report")
        .json()
        .await
        .expect("Failed to parse report");
    let rows = report.as_array().expect("Expected array");

    let low_row = rows
        .iter()
        .find(|r| r["product_id"] == low["id"])
        .expect("Low-stock product missing from report");
    assert_eq!(low_row["current_stock"], 5);
    assert_eq!(low_row["threshold"], 10);
    assert_eq!(low_row["status"], "LOW_STOCK");

    assert!(rows.iter().all(|r| r["product_id"] != high["id"]));
    // Lowest stock first
    let stocks: Vec<i64> = rows
        .iter()
        .map(|r| r["current_stock"].as_i64().unwrap())
        .collect();
    let mut sorted = stocks.clone();
    sorted.sort();
    assert_eq!(stocks, sorted);
}

#[tokio::test]
#[ignore]
async fn test_book_availability_tracks_active_loans() {
    let client = Client::new();
    let book = create_book(&client, 3).await;
    assert_eq!(book["available_copies"], 3);
    assert_eq!(book["is_available"], true);

    let record: Value = client
        .post(format!("{}/borrow-records", BASE_URL))
        .json(&json!({ "book_id": book["id"], "borrower_name": "Ada" }))
        .send()
        .await
        .expect("Failed to create borrow record")
        .json()
        .await
        .expect("Failed to parse borrow record");
    assert_eq!(record["status"], "ACTIVE");

    let availability: Value = client
        .get(format!("{}/books/{}/availability", BASE_URL, book["id"]))
        .send()
        .await
        .expect("Failed to get availability")
        .json()
        .await
        .expect("Failed to parse availability");
    assert_eq!(availability["active_loans"], 1);
    assert_eq!(availability["available_copies"], 2);

    // available_copies + active loans == total_copies, and the embedded
    // derived fields agree with the availability endpoint
    let fetched: Value = client
        .get(format!("{}/books/{}", BASE_URL, book["id"]))
        .send()
        .await
        .expect("Failed to get book")
        .json()
        .await
        .expect("Failed to parse book");
    assert_eq!(fetched["available_copies"], availability["available_copies"]);
    assert_eq!(
        fetched["available_copies"].as_i64().unwrap() + availability["active_loans"].as_i64().unwrap(),
        fetched["total_copies"].as_i64().unwrap()
    );
}

#[tokio::test]
#[ignore]
async fn test_borrow_rejected_at_capacity() {
    let client = Client::new();
    let book = create_book(&client, 1).await;

    let response = client
        .post(format!("{}/borrow-records", BASE_URL))
        .json(&json!({ "book_id": book["id"], "borrower_name": "First" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/borrow-records", BASE_URL))
        .json(&json!({ "book_id": book["id"], "borrower_name": "Second" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_concurrent_borrows_one_copy() {
    let client = Client::new();
    let book = create_book(&client, 1).await;

    let first = client
        .post(format!("{}/borrow-records", BASE_URL))
        .json(&json!({ "book_id": book["id"], "borrower_name": "Racer A" }))
        .send();
    let second = client
        .post(format!("{}/borrow-records", BASE_URL))
        .json(&json!({ "book_id": book["id"], "borrower_name": "Racer B" }))
        .send();

    let (first, second) = tokio::join!(first, second);
    let statuses = [
        first.expect("Failed to send request").status().as_u16(),
        second.expect("Failed to send request").status().as_u16(),
    ];

    assert!(statuses.contains(&201), "one borrow must succeed: {:?}", statuses);
    assert!(statuses.contains(&400), "one borrow must fail: {:?}", statuses);
}

#[tokio::test]
#[ignore]
async fn test_book_delete_blocked_by_active_loan() {
    let client = Client::new();
    let book = create_book(&client, 2).await;

    let record: Value = client
        .post(format!("{}/borrow-records", BASE_URL))
        .json(&json!({ "book_id": book["id"], "borrower_name": "Keeper" }))
        .send()
        .await
        .expect("Failed to create borrow record")
        .json()
        .await
        .expect("Failed to parse borrow record");

    let response = client
        .delete(format!("{}/books/{}", BASE_URL, book["id"]))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    let body: Value = response.json().await.expect("Failed to parse response");
    let dependents = body["dependents"].as_array().expect("No dependents list");
    assert!(dependents.iter().any(|d| d == "Keeper"));

    // Book and record remain intact
    let response = client
        .get(format!("{}/books/{}", BASE_URL, book["id"]))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    // After returning, the delete goes through
    let response = client
        .post(format!("{}/borrow-records/{}/return", BASE_URL, record["id"]))
        .send()
        .await
        .expect("Failed to return record");
    assert_eq!(response.status(), 200);

    let response = client
        .delete(format!("{}/books/{}", BASE_URL, book["id"]))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_return_is_one_way() {
    let client = Client::new();
    let book = create_book(&client, 1).await;

    let record: Value = client
        .post(format!("{}/borrow-records", BASE_URL))
        .json(&json!({ "book_id": book["id"], "borrower_name": "Onetime" }))
        .send()
        .await
        .expect("Failed to create borrow record")
        .json()
        .await
        .expect("Failed to parse borrow record");

    let returned: Value = client
        .post(format!("{}/borrow-records/{}/return", BASE_URL, record["id"]))
        .send()
        .await
        .expect("Failed to return record")
        .json()
        .await
        .expect("Failed to parse record");
    assert_eq!(returned["status"], "RETURNED");

    let response = client
        .post(format!("{}/borrow-records/{}/return", BASE_URL, record["id"]))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_concurrent_return_updates_one_wins() {
    let client = Client::new();
    let book = create_book(&client, 1).await;

    let record: Value = client
        .post(format!("{}/borrow-records", BASE_URL))
        .json(&json!({ "book_id": book["id"], "borrower_name": "Twice" }))
        .send()
        .await
        .expect("Failed to create borrow record")
        .json()
        .await
        .expect("Failed to parse borrow record");

    // Two updates both setting return_date: whichever commits first wins,
    // the other must see the record as already returned
    let url = format!("{}/borrow-records/{}", BASE_URL, record["id"]);
    let first = client
        .put(&url)
        .json(&json!({ "return_date": "2026-08-01T10:00:00Z" }))
        .send();
    let second = client
        .put(&url)
        .json(&json!({ "return_date": "2026-08-02T10:00:00Z" }))
        .send();

    let (first, second) = tokio::join!(first, second);
    let statuses = [
        first.expect("Failed to send request").status().as_u16(),
        second.expect("Failed to send request").status().as_u16(),
    ];

    assert!(statuses.contains(&200), "one update must succeed: {:?}", statuses);
    assert!(statuses.contains(&400), "one update must fail: {:?}", statuses);

    let fetched: Value = client
        .get(&url)
        .send()
        .await
        .expect("Failed to get borrow record")
        .json()
        .await
        .expect("Failed to parse borrow record");
    assert_eq!(fetched["status"], "RETURNED");
}

#[tokio::test]
#[ignore]
async fn test_book_create_rejects_missing_references() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "Orphan",
            "publication_year": 1999,
            "author_id": 999_999_999,
            "genre_id": 999_999_999
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}
