//! In-memory order book.
//!
//! Orders are kept for the lifetime of the process. IDs continue after the
//! demo history shown on the dashboard, so the first order placed is `ORD-004`.

use std::sync::Arc;

use chrono::Utc;
use customcraft_core::{
    Cart, Coupon, CustomerDetails, Email, Order, OrderId, OrderStatus, PricingPolicy,
};
use tokio::sync::RwLock;
use tracing::instrument;

use super::demo_data::DEMO_ORDER_COUNT;

/// Shared store of submitted orders.
#[derive(Clone, Default)]
pub struct OrderBook {
    orders: Arc<RwLock<Vec<Order>>>,
}

impl OrderBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Price `cart` and record it as a new order.
    ///
    /// The caller is responsible for clearing the cart afterwards.
    #[instrument(skip_all, fields(customer = %customer.email))]
    pub async fn submit(
        &self,
        customer: CustomerDetails,
        cart: &Cart,
        coupon: Option<&Coupon>,
        pricing: &PricingPolicy,
    ) -> Order {
        let breakdown = pricing.compute_totals(cart, coupon);
        let mut orders = self.orders.write().await;
        let placed = u32::try_from(orders.len()).unwrap_or(u32::MAX);
        let sequence = DEMO_ORDER_COUNT.saturating_add(placed).saturating_add(1);

        let order = Order {
            id: OrderId::new(sequence),
            placed_at: Utc::now(),
            customer,
            items: cart.items().to_vec(),
            breakdown,
            coupon_code: coupon.map(|c| c.code.clone()),
            status: OrderStatus::Processing,
        };
        orders.push(order.clone());

        tracing::info!(order_id = %order.id, total = %order.breakdown.total, "Order placed");
        order
    }

    /// Look up an order by ID.
    pub async fn get(&self, id: OrderId) -> Option<Order> {
        self.orders
            .read()
            .await
            .iter()
            .find(|order| order.id == id)
            .cloned()
    }

    /// Orders placed with `email`, newest first.
    pub async fn for_customer(&self, email: &Email) -> Vec<Order> {
        self.orders
            .read()
            .await
            .iter()
            .rev()
            .filter(|order| order.customer.email.matches(email))
            .cloned()
            .collect()
    }

    /// Every order placed, newest first.
    pub async fn all(&self) -> Vec<Order> {
        self.orders.read().await.iter().rev().cloned().collect()
    }
}
