//! CustomCraft Core - Domain library for the CustomCraft storefront.
//!
//! This crate holds everything the storefront knows about its business and is
//! shared by:
//! - `storefront` - Public-facing shop, customer dashboard and admin dashboard
//! - `integration-tests` - In-process HTTP tests against the storefront router
//!
//! # Architecture
//!
//! The core crate contains only types, pure functions and traits - no I/O,
//! no HTTP, no session handling. Cart mutations and price derivation can be
//! exercised directly without a running server.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and statuses
//! - [`cart`] - Cart line items and the operations that mutate them
//! - [`pricing`] - Price breakdown derivation (discount, shipping, tax, total)
//! - [`coupon`] - Static coupon code book
//! - [`catalog`] - Product fixtures, filtering and sorting
//! - [`identity`] - Users, roles, capabilities and the identity provider seam
//! - [`order`] - Placed orders and customer checkout details

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod coupon;
pub mod identity;
pub mod order;
pub mod pricing;
pub mod types;

pub use cart::{Cart, CartError, CartLineItem, Customization, MAX_QUANTITY, QuantityUpdate};
pub use catalog::{Catalog, CatalogQuery, Category, PriceRange, Product, SortBy};
pub use coupon::{Coupon, CouponBook, CouponError};
pub use identity::{AuthError, Capability, IdentityProvider, Role, User};
pub use order::{CustomerDetails, CustomerDetailsError, Order};
pub use pricing::{PriceBreakdown, PricingPolicy};
pub use types::*;
