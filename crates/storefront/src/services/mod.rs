//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `identity` - Demo sign-in and registration behind [`IdentityProvider`]
//! - `orders` - In-memory order book for checkout submissions
//! - `demo_data` - Fixed content for the account and admin dashboards
//!
//! [`IdentityProvider`]: customcraft_core::IdentityProvider

pub mod demo_data;
pub mod identity;
pub mod orders;

pub use identity::DemoIdentityProvider;
pub use orders::OrderBook;
