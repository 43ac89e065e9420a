//! Application state shared across handlers.

use std::sync::Arc;

use customcraft_core::{Catalog, CouponBook, IdentityProvider, PricingPolicy};

use crate::config::StorefrontConfig;
use crate::services::{DemoIdentityProvider, OrderBook};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The catalog, coupon book and pricing policy
/// are read-only; the order book synchronizes internally.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    coupons: CouponBook,
    identity: Arc<dyn IdentityProvider>,
    orders: OrderBook,
}

impl AppState {
    /// Create state with the built-in catalog, standard coupons and the demo
    /// identity provider.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let identity = Arc::new(DemoIdentityProvider::new(config.identity.clone()));
        Self::with_parts(config, Catalog::fixtures(), CouponBook::standard(), identity)
    }

    /// Create state from explicit collaborators.
    #[must_use]
    pub fn with_parts(
        config: StorefrontConfig,
        catalog: Catalog,
        coupons: CouponBook,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                coupons,
                identity,
                orders: OrderBook::new(),
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    #[must_use]
    pub fn coupons(&self) -> &CouponBook {
        &self.inner.coupons
    }

    /// Shipping and tax constants from configuration.
    #[must_use]
    pub fn pricing(&self) -> &PricingPolicy {
        &self.inner.config.pricing
    }

    #[must_use]
    pub fn identity(&self) -> &dyn IdentityProvider {
        self.inner.identity.as_ref()
    }

    #[must_use]
    pub fn orders(&self) -> &OrderBook {
        &self.inner.orders
    }
}
