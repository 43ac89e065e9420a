//! Integration tests for the session cart.

#![allow(clippy::indexing_slicing)]

use axum::http::StatusCode;
use customcraft_integration_tests::{TestClient, line_ids};

#[tokio::test]
async fn test_empty_cart() {
    let mut client = TestClient::new();
    let resp = client.get("/cart").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_add_redirects_to_cart_and_prices_it() {
    let mut client = TestClient::new();
    let resp = client.add_to_cart(1, 2).await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/cart"));

    let resp = client.get("/cart").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Premium Cotton T-Shirt"));
    assert!(resp.body.contains("$49.98"));
    assert!(resp.body.contains("$5.99"));
    assert!(resp.body.contains("$4.00"));
    assert!(resp.body.contains("$59.97"));
    assert!(resp.body.contains("Add $0.02 more for free shipping!"));
}

#[tokio::test]
async fn test_htmx_add_returns_count_fragment() {
    let mut client = TestClient::new();
    let resp = client
        .post_htmx(
            "/cart/add",
            &[
                ("product_id", "2"),
                ("color", "black"),
                ("size", "15oz"),
                ("text", "Best Dad"),
                ("quantity", "3"),
            ],
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.header("hx-trigger"), Some("cart-updated"));
    assert!(resp.body.contains(r#"<span class="badge">3</span>"#));

    let resp = client.get("/cart/count").await;
    assert!(resp.body.contains(r#"<span class="badge">3</span>"#));
}

#[tokio::test]
async fn test_add_rejects_unknown_product_and_options() {
    let mut client = TestClient::new();
    let resp = client.add_to_cart(42, 1).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);

    let resp = client
        .post_form("/cart/add", &[("product_id", "1"), ("color", "purple")])
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    let resp = client
        .post_form("/cart/add", &[("product_id", "2"), ("size", "XL")])
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    assert!(client.get("/cart").await.body.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_identical_adds_stay_separate_lines() {
    let mut client = TestClient::new();
    client.add_to_cart(1, 1).await;
    client.add_to_cart(1, 2).await;
    client.add_to_cart(2, 1).await;

    let body = client.get("/cart").await.body;
    assert_eq!(line_ids(&body).len(), 3);
    assert!(body.contains("Subtotal (4 items)"));
}

#[tokio::test]
async fn test_update_and_remove_lines() {
    let mut client = TestClient::new();
    client.add_to_cart(1, 1).await;
    client.add_to_cart(2, 1).await;

    let body = client.get("/cart").await.body;
    let ids = line_ids(&body);
    assert_eq!(ids.len(), 2);
    let (first, second) = (ids[0].as_str(), ids[1].as_str());

    let resp = client
        .post_form("/cart/update", &[("line_id", first), ("quantity", "4")])
        .await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert!(client.get("/cart").await.body.contains("Subtotal (5 items)"));

    client
        .post_form("/cart/update", &[("line_id", first), ("quantity", "0")])
        .await;
    let body = client.get("/cart").await.body;
    assert_eq!(line_ids(&body), [second]);

    let resp = client.post_form("/cart/remove", &[("line_id", second)]).await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert!(client.get("/cart").await.body.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_oversized_quantity_is_rejected_and_cart_still_renders() {
    let mut client = TestClient::new();
    client.add_to_cart(1, 1).await;
    let body = client.get("/cart").await.body;
    let ids = line_ids(&body);
    let line = ids[0].as_str();

    for quantity in ["1000", "4294967295", "9999999999"] {
        let resp = client
            .post_form("/cart/update", &[("line_id", line), ("quantity", quantity)])
            .await;
        assert_eq!(resp.status, StatusCode::BAD_REQUEST, "quantity {quantity}");
    }

    let resp = client.get("/cart").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Subtotal (1 items)"));
    assert!(resp.body.contains("Increase quantity"));
}

#[tokio::test]
async fn test_add_rejects_quantity_above_cap() {
    let mut client = TestClient::new();
    let resp = client.add_to_cart(1, 4_294_967_295).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    let resp = client.add_to_cart(1, 1000).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    let resp = client.get("/cart").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_line_at_cap_renders_without_increase_button() {
    let mut client = TestClient::new();
    let resp = client.add_to_cart(1, 999).await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);

    let resp = client.get("/cart").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Subtotal (999 items)"));
    assert!(resp.body.contains(r#"name="quantity" value="998""#));
    assert!(!resp.body.contains("Increase quantity"));
}

#[tokio::test]
async fn test_malformed_line_id_is_bad_request() {
    let mut client = TestClient::new();
    let resp = client
        .post_form("/cart/remove", &[("line_id", "not-a-uuid")])
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_clear_cart() {
    let mut client = TestClient::new();
    client.add_to_cart(3, 2).await;
    let resp = client.post_form("/cart/clear", &[]).await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert!(client.get("/cart").await.body.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_valid_coupon_discounts_cart() {
    let mut client = TestClient::new();
    client.add_to_cart(1, 3).await;

    let resp = client.post_form("/cart/coupon", &[("code", " save10 ")]).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Coupon SAVE10 applied: 10% off"));
    assert!(resp.body.contains("-$7.50"));
    assert!(resp.body.contains("Free"));

    // The coupon survives a reload.
    assert!(client.get("/cart").await.body.contains("-$7.50"));
}

#[tokio::test]
async fn test_invalid_coupon_keeps_previous_one() {
    let mut client = TestClient::new();
    client.add_to_cart(1, 3).await;
    client.post_form("/cart/coupon", &[("code", "WELCOME20")]).await;

    let resp = client.post_form("/cart/coupon", &[("code", "BOGUS")]).await;
    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp.body.contains("Invalid coupon code"));
    assert!(resp.body.contains("-$14.99"));

    let resp = client.post_form("/cart/coupon", &[("code", "  ")]).await;
    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp.body.contains("Please enter a coupon code"));
}

#[tokio::test]
async fn test_carts_are_per_session() {
    let mut client = TestClient::new();
    client.add_to_cart(1, 1).await;

    let mut other = client.fresh_visitor();
    assert!(other.get("/cart").await.body.contains("Your cart is empty"));
}
