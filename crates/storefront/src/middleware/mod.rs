//! HTTP middleware and extractors for the storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. Session layer (tower-sessions with the in-memory store)
//! 3. `TraceLayer` (request spans)
//! 4. Request ID (add unique ID to each request)

pub mod auth;
pub mod cart;
pub mod request_id;
pub mod session;

pub use auth::{
    AccessDenied, OptionalAuth, RequireAccount, RequireAdmin, clear_current_user,
    set_current_user,
};
pub use cart::SessionCart;
pub use request_id::{RequestId, request_id_middleware};
pub use session::create_session_layer;
