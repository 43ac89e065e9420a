//! Integration tests for the public storefront pages.

use axum::http::StatusCode;
use customcraft_integration_tests::TestClient;

#[tokio::test]
async fn test_health() {
    let mut client = TestClient::new();
    let resp = client.get("/health").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, "ok");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let mut client = TestClient::new();
    let resp = client.get("/health").await;
    let id = resp.header("x-request-id").unwrap_or_default();
    assert_eq!(id.len(), 36);
}

#[tokio::test]
async fn test_home_shows_featured_products() {
    let mut client = TestClient::new();
    let resp = client.get("/").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Featured Products"));
    assert!(resp.body.contains("Premium Cotton T-Shirt"));
    assert!(resp.body.contains("Ceramic Coffee Mug"));
    assert!(resp.body.contains("Protective Phone Case"));
    assert!(resp.body.contains("Sarah Johnson"));
}

#[tokio::test]
async fn test_catalog_filters_by_category() {
    let mut client = TestClient::new();
    let resp = client.get("/products?category=mugs").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("2 products found"));
    assert!(resp.body.contains("Ceramic Coffee Mug"));
    assert!(resp.body.contains("Travel Mug with Handle"));
    assert!(!resp.body.contains("Slim Phone Case"));
}

#[tokio::test]
async fn test_catalog_search_and_price_range() {
    let mut client = TestClient::new();
    let resp = client.get("/products?q=case&price=under-20").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("2 products found"));
    assert!(resp.body.contains("Slim Phone Case"));

    let resp = client.get("/products?price=over-30").await;
    assert!(resp.body.contains("No products match your filters."));
}

#[tokio::test]
async fn test_catalog_ignores_unknown_parameters() {
    let mut client = TestClient::new();
    let resp = client.get("/products?category=hats&sort=newest").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("6 products found"));
}

#[tokio::test]
async fn test_product_detail() {
    let mut client = TestClient::new();
    let resp = client.get("/products/2").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Ceramic Coffee Mug"));
    assert!(resp.body.contains("$16.99"));
    assert!(resp.body.contains(r#"value="11oz" checked"#));
}

#[tokio::test]
async fn test_unknown_product_is_not_found() {
    let mut client = TestClient::new();
    assert_eq!(client.get("/products/7").await.status, StatusCode::NOT_FOUND);
    assert_eq!(
        client.get("/products/abc").await.status,
        StatusCode::NOT_FOUND
    );
}
