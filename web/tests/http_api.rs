//! End-to-end HTTP tests against the in-memory store.
//!
//! Exercises the full request path: router, extractors, error mapping, and
//! the order workflow behind it.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use axum_test::TestServer;
use pos_core::{Money, Product, Transaction};
use pos_testing::{MemoryStore, fixtures, test_clock};
use pos_web::{AppState, build_router};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: String,
    message: String,
}

#[derive(Debug, Deserialize)]
struct OrderReceipt {
    transaction_id: Uuid,
    total: i64,
}

fn bearer() -> String {
    Uuid::new_v4().to_string()
}

/// Server over a seeded in-memory store, pinned to 2025-01-01 UTC.
async fn seeded_server() -> (TestServer, Vec<Product>) {
    let store = Arc::new(MemoryStore::with_clock(Arc::new(test_clock())));
    let products = fixtures::seed_catalog(store.as_ref()).await.unwrap();
    let state = AppState::from_store(store, Arc::new(test_clock()));
    let server = TestServer::new(build_router(state)).unwrap();
    (server, products)
}

fn empty_server() -> TestServer {
    let store = Arc::new(MemoryStore::with_clock(Arc::new(test_clock())));
    let state = AppState::from_store(store, Arc::new(test_clock()));
    TestServer::new(build_router(state)).unwrap()
}

fn fries(products: &[Product]) -> &Product {
    products
        .iter()
        .find(|p| p.name == "French Fries")
        .expect("seed data includes French Fries")
}

#[tokio::test]
async fn health_and_readiness_respond_ok() {
    let server = empty_server();
    server.get("/health").await.assert_status_ok();
    server.get("/ready").await.assert_status_ok();
}

#[tokio::test]
async fn every_api_route_requires_a_bearer_token() {
    let (server, products) = seeded_server().await;
    let body = json!({
        "name": "Iced Tea",
        "price": 15_000,
        "stock": 40,
        "unit": "cup",
        "category_id": products[0].category_id,
    });

    let res = server.post("/api/products").json(&body).await;
    assert_eq!(res.status_code(), 401);

    let res = server
        .post("/api/products")
        .authorization_bearer("not-a-uuid")
        .json(&body)
        .await;
    assert_eq!(res.status_code(), 401);

    // Reads are behind the same token as writes
    for path in [
        "/api/products",
        &format!("/api/products/{}", products[0].id),
        "/api/categories",
        "/api/transactions",
        "/api/dashboard",
        "/api/recommendations",
    ] {
        let res = server.get(path).await;
        assert_eq!(res.status_code(), 401, "expected 401 for {path}");
        assert_eq!(res.json::<ErrorBody>().code, "UNAUTHORIZED");
    }

    // Health checks stay open
    server.get("/health").await.assert_status_ok();
    server.get("/ready").await.assert_status_ok();
}

#[tokio::test]
async fn product_crud_roundtrip() {
    let (server, products) = seeded_server().await;
    let token = bearer();

    let created: Product = server
        .post("/api/products")
        .authorization_bearer(&token)
        .json(&json!({
            "name": "Iced Tea",
            "price": 15_000,
            "stock": 40,
            "unit": "cup",
            "category_id": products[0].category_id,
        }))
        .await
        .json();
    assert_eq!(created.price, Money::from_minor(15_000));

    // Listing is newest first
    let listed: Vec<Product> = server
        .get("/api/products")
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(listed.first().map(|p| p.id), Some(created.id));

    let updated: Product = server
        .put(&format!("/api/products/{}", created.id))
        .authorization_bearer(&token)
        .json(&json!({"price": 17_000}))
        .await
        .json();
    assert_eq!(updated.price, Money::from_minor(17_000));
    assert_eq!(updated.name, "Iced Tea");

    let res = server
        .delete(&format!("/api/products/{}", created.id))
        .authorization_bearer(&token)
        .await;
    assert_eq!(res.status_code(), 204);

    let res = server
        .get(&format!("/api/products/{}", created.id))
        .authorization_bearer(&token)
        .await;
    assert_eq!(res.status_code(), 404);
    assert_eq!(res.json::<ErrorBody>().code, "NOT_FOUND");
}

#[tokio::test]
async fn negative_price_is_rejected_with_validation_code() {
    let (server, products) = seeded_server().await;

    let res = server
        .post("/api/products")
        .authorization_bearer(&bearer())
        .json(&json!({
            "name": "Bad Price",
            "price": -1,
            "stock": 1,
            "unit": "pcs",
            "category_id": products[0].category_id,
        }))
        .await;
    assert_eq!(res.status_code(), 422);

    let body: ErrorBody = res.json();
    assert_eq!(body.code, "VALIDATION_ERROR");
    assert_eq!(body.message, "price must not be negative");
}

#[tokio::test]
async fn order_returns_201_with_computed_total() {
    let (server, products) = seeded_server().await;
    let fries = fries(&products);
    let token = bearer();

    // 25000 * 3 + 5000 - 2000 = 78000
    let res = server
        .post("/api/transactions")
        .authorization_bearer(&token)
        .json(&json!({
            "items": [{"product_id": fries.id, "quantity": 3}],
            "payment_method": "cash",
            "tax": 5_000,
            "discount": 2_000,
        }))
        .await;
    assert_eq!(res.status_code(), 201);

    let receipt: OrderReceipt = res.json();
    assert_eq!(receipt.total, 78_000);

    // Stock decremented from 100 to 97
    let after: Product = server
        .get(&format!("/api/products/{}", fries.id))
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(after.stock, 97);
    let _ = receipt.transaction_id;
}

#[tokio::test]
async fn empty_order_is_rejected_with_validation_code() {
    let (server, _) = seeded_server().await;

    let res = server
        .post("/api/transactions")
        .authorization_bearer(&bearer())
        .json(&json!({"items": []}))
        .await;
    assert_eq!(res.status_code(), 422);
    assert_eq!(res.json::<ErrorBody>().code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn oversized_order_is_rejected_and_stock_untouched() {
    let (server, products) = seeded_server().await;
    let fries = fries(&products);
    let token = bearer();

    let res = server
        .post("/api/transactions")
        .authorization_bearer(&token)
        .json(&json!({
            "items": [{"product_id": fries.id, "quantity": 101}],
        }))
        .await;
    assert_eq!(res.status_code(), 422);

    let body: ErrorBody = res.json();
    assert_eq!(body.code, "INSUFFICIENT_STOCK");
    assert_eq!(body.message, "Insufficient stock for French Fries");

    let after: Product = server
        .get(&format!("/api/products/{}", fries.id))
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(after.stock, 100);
}

#[tokio::test]
async fn order_for_unknown_product_is_404() {
    let (server, _) = seeded_server().await;

    let res = server
        .post("/api/transactions")
        .authorization_bearer(&bearer())
        .json(&json!({
            "items": [{"product_id": Uuid::new_v4(), "quantity": 1}],
        }))
        .await;
    assert_eq!(res.status_code(), 404);
    assert_eq!(res.json::<ErrorBody>().code, "NOT_FOUND");
}

#[tokio::test]
async fn foreign_transaction_is_forbidden() {
    let (server, products) = seeded_server().await;
    let fries = fries(&products);
    let owner = bearer();
    let stranger = bearer();

    let receipt: OrderReceipt = server
        .post("/api/transactions")
        .authorization_bearer(&owner)
        .json(&json!({"items": [{"product_id": fries.id, "quantity": 1}]}))
        .await
        .json();

    let res = server
        .get(&format!("/api/transactions/{}", receipt.transaction_id))
        .authorization_bearer(&stranger)
        .await;
    assert_eq!(res.status_code(), 403);
    assert_eq!(res.json::<ErrorBody>().code, "FORBIDDEN");

    // The owner still reads it fine
    let res = server
        .get(&format!("/api/transactions/{}", receipt.transaction_id))
        .authorization_bearer(&owner)
        .await;
    res.assert_status_ok();
}

#[tokio::test]
async fn transaction_listing_is_owner_scoped_and_newest_first() {
    let (server, products) = seeded_server().await;
    let fries = fries(&products);
    let alice = bearer();
    let bob = bearer();

    for quantity in [1, 2] {
        server
            .post("/api/transactions")
            .authorization_bearer(&alice)
            .json(&json!({"items": [{"product_id": fries.id, "quantity": quantity}]}))
            .await
            .assert_status(axum::http::StatusCode::CREATED);
    }
    server
        .post("/api/transactions")
        .authorization_bearer(&bob)
        .json(&json!({"items": [{"product_id": fries.id, "quantity": 5}]}))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let own: Vec<Transaction> = server
        .get("/api/transactions")
        .authorization_bearer(&alice)
        .await
        .json();
    assert_eq!(own.len(), 2);
    // Newest first: the quantity-2 order came last
    assert_eq!(own[0].items[0].quantity, 2);
    assert_eq!(own[1].items[0].quantity, 1);
}

#[tokio::test]
async fn dashboard_aggregates_todays_sales() {
    let (server, products) = seeded_server().await;
    let fries = fries(&products);
    let espresso = products
        .iter()
        .find(|p| p.name == "Espresso")
        .expect("seed data includes Espresso");
    let token = bearer();

    // 2 * 25000 + 3 * 18000 = 104000 across two transactions
    server
        .post("/api/transactions")
        .authorization_bearer(&token)
        .json(&json!({"items": [{"product_id": fries.id, "quantity": 2}]}))
        .await
        .assert_status(axum::http::StatusCode::CREATED);
    server
        .post("/api/transactions")
        .authorization_bearer(&token)
        .json(&json!({"items": [{"product_id": espresso.id, "quantity": 3}]}))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let res = server
        .get("/api/dashboard")
        .authorization_bearer(&token)
        .await;
    res.assert_status_ok();

    let summary: serde_json::Value = res.json();
    assert_eq!(summary["total_revenue_today"], 104_000);
    assert_eq!(summary["total_transactions_today"], 2);
    let top = summary["top_products"].as_array().unwrap();
    assert_eq!(top[0]["name"], "Espresso");
    assert_eq!(top[0]["total_sold"], 3);
    assert_eq!(top[1]["name"], "French Fries");
}

#[tokio::test]
async fn recommendations_rank_bestsellers_with_fallback() {
    let (server, products) = seeded_server().await;
    let espresso = products
        .iter()
        .find(|p| p.name == "Espresso")
        .expect("seed data includes Espresso");
    let token = bearer();

    // Before any sale: newest products
    let cold: Vec<Product> = server
        .get("/api/recommendations?limit=2")
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(cold.len(), 2);
    assert_eq!(cold[0].name, "Cappuccino");

    server
        .post("/api/transactions")
        .authorization_bearer(&token)
        .json(&json!({"items": [{"product_id": espresso.id, "quantity": 4}]}))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let warm: Vec<Product> = server
        .get("/api/recommendations")
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(warm[0].name, "Espresso");
}

#[tokio::test]
async fn category_listing_is_sorted_by_name() {
    let (server, _) = seeded_server().await;

    let res = server
        .get("/api/categories")
        .authorization_bearer(&bearer())
        .await;
    res.assert_status_ok();

    let names: Vec<String> = res
        .json::<Vec<serde_json::Value>>()
        .iter()
        .map(|c| c["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Appetizers", "Coffee", "Main Courses"]);
}
