//! Session-stored state.
//!
//! Everything a visitor owns lives in their session: the signed-in user, the
//! cart and the applied coupon code. Reads that fail are logged and treated
//! as absent so a broken session never blocks browsing.

use customcraft_core::{Cart, OrderId, User};
use serde::de::DeserializeOwned;
use tower_sessions::Session;

/// Session keys.
pub mod keys {
    /// Key for the signed-in [`User`](customcraft_core::User).
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the visitor's [`Cart`](customcraft_core::Cart).
    pub const CART: &str = "cart";

    /// Key for the applied coupon code (normalized, uppercase).
    pub const COUPON: &str = "coupon";

    /// Key for IDs of orders placed from this session.
    pub const PLACED_ORDERS: &str = "placed_orders";
}

async fn read<T: DeserializeOwned>(session: &Session, key: &str) -> Option<T> {
    match session.get::<T>(key).await {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read session value");
            None
        }
    }
}

/// The signed-in user, if any.
pub async fn current_user(session: &Session) -> Option<User> {
    read(session, keys::CURRENT_USER).await
}

/// The visitor's cart, empty if none was stored.
pub async fn cart(session: &Session) -> Cart {
    read(session, keys::CART).await.unwrap_or_default()
}

/// The applied coupon code, if any.
pub async fn coupon_code(session: &Session) -> Option<String> {
    read(session, keys::COUPON).await
}

/// IDs of orders placed from this session, oldest first.
pub async fn placed_orders(session: &Session) -> Vec<OrderId> {
    read(session, keys::PLACED_ORDERS).await.unwrap_or_default()
}

/// Remember that `id` was placed from this session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn record_placed_order(
    session: &Session,
    id: OrderId,
) -> Result<(), tower_sessions::session::Error> {
    let mut placed = placed_orders(session).await;
    placed.push(id);
    session.insert(keys::PLACED_ORDERS, placed).await
}
