//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /products               - Catalog (?category=&price=&q=&sort=&view=)
//! GET  /products/{id}          - Product detail and customizer
//!
//! # Cart
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add a customized line
//! POST /cart/update            - Set a line's quantity (<= 0 removes)
//! POST /cart/remove            - Remove a line
//! POST /cart/clear             - Empty the cart
//! POST /cart/coupon            - Apply a coupon code
//! GET  /cart/count             - Cart count badge (HTMX fragment)
//!
//! # Checkout
//! GET  /checkout               - Order summary and customer form
//! POST /checkout               - Place the order
//! GET  /checkout/confirmation/{id} - Placed order (guests)
//!
//! # Account (capability-gated)
//! GET  /dashboard              - Customer dashboard (?tab=&order=)
//! GET  /admin                  - Admin panel (?tab=)
//!
//! # Auth
//! GET  /auth/login             - Login page
//! POST /auth/login             - Login action
//! GET  /auth/register          - Register page
//! POST /auth/register          - Register action
//! POST /auth/logout            - Logout action
//! ```

pub mod admin;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod dashboard;
pub mod home;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};
use customcraft_core::{Capability, Cart, User};
use tower_sessions::Session;

use crate::models::session;
use crate::state::AppState;

/// Navbar display data shared by every page.
#[derive(Debug, Clone, Default)]
pub struct NavView {
    pub user_name: Option<String>,
    pub is_admin: bool,
    pub cart_count: u32,
}

impl NavView {
    #[must_use]
    pub fn new(user: Option<&User>, cart: &Cart) -> Self {
        Self {
            user_name: user.map(|u| u.name.clone()),
            is_admin: user.is_some_and(|u| u.can(Capability::ViewAdminDashboard)),
            cart_count: cart.item_count(),
        }
    }

    /// Build the navbar from what is stored in `session`.
    pub async fn load(session: &Session) -> Self {
        let user = session::current_user(session).await;
        let cart = session::cart(session).await;
        Self::new(user.as_ref(), &cart)
    }

    #[must_use]
    pub const fn is_signed_in(&self) -> bool {
        self.user_name.is_some()
    }
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/coupon", post(cart::apply_coupon))
        .route("/count", get(cart::count))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/health", get(health))
        .route("/products", get(products::index))
        .route("/products/{id}", get(products::show))
        .nest("/cart", cart_routes())
        .route("/checkout", get(checkout::show).post(checkout::submit))
        .route("/checkout/confirmation/{id}", get(checkout::confirmation))
        .route("/dashboard", get(dashboard::show))
        .route("/admin", get(admin::show))
        .nest("/auth", auth_routes())
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Validate a post-login redirect target.
///
/// Only same-site absolute paths are accepted.
pub(crate) fn safe_next(next: Option<&str>) -> Option<&str> {
    next.filter(|n| n.starts_with('/') && !n.starts_with("//") && !n.contains('\\'))
}
