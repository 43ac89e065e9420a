//! Integration tests for CustomCraft.
//!
//! The storefront router is driven in-process with `tower::ServiceExt::oneshot`;
//! no listener or network is involved.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p customcraft-integration-tests
//! ```
//!
//! # Test Files
//!
//! - `storefront` - Health, catalog and product pages
//! - `cart` - Cart mutations, HTMX responses and coupons
//! - `checkout` - Guest and signed-in checkout
//! - `access` - Sign-in, registration and dashboard gating

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Request, StatusCode, header},
};
use customcraft_storefront::{app, config::StorefrontConfig, state::AppState};
use tower::ServiceExt;

/// Largest response body the harness will buffer.
const BODY_LIMIT: usize = 1024 * 1024;

/// A buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The `Location` header of a redirect.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    /// A response header as a string.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// A browser-like client that carries the session cookie between requests.
pub struct TestClient {
    router: Router,
    cookie: Option<String>,
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClient {
    /// A client against a freshly built storefront with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_state(AppState::new(StorefrontConfig::default()))
    }

    /// A client against a storefront built from `state`.
    #[must_use]
    pub fn with_state(state: AppState) -> Self {
        Self {
            router: app(state),
            cookie: None,
        }
    }

    /// A second visitor on the same storefront, with no session.
    #[must_use]
    pub fn fresh_visitor(&self) -> Self {
        Self {
            router: self.router.clone(),
            cookie: None,
        }
    }

    /// `GET path`.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the router fails.
    pub async fn get(&mut self, path: &str) -> TestResponse {
        let request = self
            .request("GET", path)
            .body(Body::empty())
            .expect("valid request");
        self.send(request).await
    }

    /// `POST path` with a urlencoded form body.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the router fails.
    pub async fn post_form(&mut self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let request = self
            .request("POST", path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(encode(fields)))
            .expect("valid request");
        self.send(request).await
    }

    /// `POST path` as an HTMX request.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the router fails.
    pub async fn post_htmx(&mut self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let request = self
            .request("POST", path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header("hx-request", "true")
            .body(Body::from(encode(fields)))
            .expect("valid request");
        self.send(request).await
    }

    /// Sign in through the login form.
    pub async fn sign_in(&mut self, email: &str, password: &str) -> TestResponse {
        self.post_form("/auth/login", &[("email", email), ("password", password)])
            .await
    }

    /// Add a product with its default options.
    pub async fn add_to_cart(&mut self, product_id: u32, quantity: u32) -> TestResponse {
        let product_id = product_id.to_string();
        let quantity = quantity.to_string();
        self.post_form(
            "/cart/add",
            &[("product_id", &product_id), ("quantity", &quantity)],
        )
        .await
    }

    fn request(&self, method: &str, path: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(path);
        match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        }
    }

    async fn send(&mut self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        if let Some(cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
        {
            self.cookie = Some(cookie.to_owned());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), BODY_LIMIT)
            .await
            .expect("body fits in the limit");
        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

fn encode(fields: &[(&str, &str)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields)
        .finish()
}

/// Line IDs in a rendered cart page, in display order.
#[must_use]
pub fn line_ids(body: &str) -> Vec<String> {
    const MARKER: &str = r#"name="line_id" value=""#;
    let mut ids: Vec<String> = Vec::new();
    let mut rest = body;
    while let Some(start) = rest.find(MARKER) {
        rest = rest.get(start + MARKER.len()..).unwrap_or_default();
        let Some(end) = rest.find('"') else { break };
        let id = rest.get(..end).unwrap_or_default().to_owned();
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_ids_deduplicates_forms() {
        let body = r#"
            <input type="hidden" name="line_id" value="a">
            <input type="hidden" name="line_id" value="a">
            <input type="hidden" name="line_id" value="b">
        "#;
        assert_eq!(line_ids(body), ["a", "b"]);
    }

    #[test]
    fn test_encode_escapes_values() {
        assert_eq!(
            encode(&[("email", "a+b@example.com"), ("text", "hi there")]),
            "email=a%2Bb%40example.com&text=hi+there"
        );
    }
}
