//! Admin panel route handler.
//!
//! Read-only. Headline statistics, stock and coupon usage are demo figures;
//! the orders and customers tabs also include orders placed in this process.

use std::collections::BTreeMap;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use customcraft_core::{Order, Price};
use serde::Deserialize;
use tracing::instrument;

use super::NavView;
use crate::middleware::{RequireAdmin, SessionCart};
use crate::services::demo_data::{self, RecentOrder};
use crate::state::AppState;

/// Admin panel tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminTab {
    #[default]
    Dashboard,
    Orders,
    Products,
    Customers,
    Discounts,
}

impl AdminTab {
    pub const ALL: [Self; 5] = [
        Self::Dashboard,
        Self::Orders,
        Self::Products,
        Self::Customers,
        Self::Discounts,
    ];

    /// Parse a `?tab=` value; unknown values select the dashboard tab.
    #[must_use]
    pub fn from_slug(slug: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|t| t.slug() == slug)
            .unwrap_or_default()
    }

    #[must_use]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Orders => "orders",
            Self::Products => "products",
            Self::Customers => "customers",
            Self::Discounts => "discounts",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Orders => "Orders",
            Self::Products => "Products",
            Self::Customers => "Customers",
            Self::Discounts => "Discount Codes",
        }
    }
}

/// A tab link in the sidebar.
#[derive(Clone)]
pub struct AdminTabView {
    pub slug: &'static str,
    pub label: &'static str,
    pub active: bool,
}

/// Headline figures.
#[derive(Clone)]
pub struct StatsView {
    pub total_orders: u32,
    pub total_revenue: String,
    pub total_customers: u32,
    pub pending_orders: u32,
}

/// One row of the orders table.
#[derive(Clone)]
pub struct AdminOrderView {
    pub id: String,
    pub customer: String,
    pub product: String,
    pub amount: String,
    pub status: &'static str,
    pub status_label: &'static str,
    pub date: String,
}

impl From<&Order> for AdminOrderView {
    fn from(order: &Order) -> Self {
        let product = match order.items.as_slice() {
            [] => String::new(),
            [only] => only.name.clone(),
            [first, rest @ ..] => format!("{} +{} more", first.name, rest.len()),
        };
        Self {
            id: order.id.to_string(),
            customer: order.customer.name.clone(),
            product,
            amount: order.breakdown.total.display(),
            status: order.status.as_str(),
            status_label: order.status.label(),
            date: order.placed_at.format("%Y-%m-%d").to_string(),
        }
    }
}

impl From<&RecentOrder> for AdminOrderView {
    fn from(order: &RecentOrder) -> Self {
        Self {
            id: order.id.to_string(),
            customer: order.customer.to_string(),
            product: order.product.to_string(),
            amount: order.amount.display(),
            status: order.status.as_str(),
            status_label: order.status.label(),
            date: order.date.to_string(),
        }
    }
}

/// One row of the stock table.
#[derive(Clone)]
pub struct StockView {
    pub id: u32,
    pub name: String,
    pub category: &'static str,
    pub price: String,
    pub stock: u32,
    pub sales: u32,
}

/// A customer who placed orders in this process.
#[derive(Clone)]
pub struct CustomerView {
    pub name: String,
    pub email: String,
    pub orders: usize,
    pub spent: String,
}

/// One row of the discount code table.
#[derive(Clone)]
pub struct DiscountView {
    pub code: String,
    pub percent: String,
    pub uses: u32,
    pub max_uses: u32,
    pub expires: &'static str,
}

/// Admin query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct AdminParams {
    pub tab: Option<String>,
}

/// Admin panel template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/index.html")]
pub struct AdminTemplate {
    pub nav: NavView,
    pub tabs: Vec<AdminTabView>,
    pub tab: &'static str,
    pub stats: StatsView,
    pub recent_orders: Vec<AdminOrderView>,
    pub orders: Vec<AdminOrderView>,
    pub products: Vec<StockView>,
    pub customers: Vec<CustomerView>,
    pub discounts: Vec<DiscountView>,
}

/// Group placed orders by customer email, in first-seen order of the input.
fn customers(orders: &[Order]) -> Vec<CustomerView> {
    let mut by_email: BTreeMap<String, (usize, String, usize, Price)> = BTreeMap::new();
    for (position, order) in orders.iter().enumerate() {
        let key = order.customer.email.as_str().to_lowercase();
        let entry = by_email.entry(key).or_insert_with(|| {
            (
                position,
                order.customer.name.clone(),
                0,
                Price::zero(order.breakdown.total.currency_code),
            )
        });
        entry.2 += 1;
        entry.3 = entry.3 + order.breakdown.total;
    }

    let mut rows: Vec<_> = by_email.into_iter().collect();
    rows.sort_by_key(|(_, (position, ..))| *position);
    rows.into_iter()
        .map(|(email, (_, name, count, spent))| CustomerView {
            name,
            email,
            orders: count,
            spent: spent.display(),
        })
        .collect()
}

/// Display the admin panel.
#[instrument(skip(state, session_cart, admin))]
pub async fn show(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    session_cart: SessionCart,
    Query(params): Query<AdminParams>,
) -> impl IntoResponse {
    let tab = params
        .tab
        .as_deref()
        .map(AdminTab::from_slug)
        .unwrap_or_default();

    let stats = demo_data::store_stats();
    let recent: Vec<AdminOrderView> = demo_data::recent_orders()
        .iter()
        .map(AdminOrderView::from)
        .collect();
    let placed = state.orders().all().await;

    let mut orders: Vec<AdminOrderView> = placed.iter().map(AdminOrderView::from).collect();
    orders.extend(recent.iter().cloned());

    AdminTemplate {
        nav: NavView::new(Some(&admin), &session_cart.cart),
        tabs: AdminTab::ALL
            .iter()
            .map(|t| AdminTabView {
                slug: t.slug(),
                label: t.label(),
                active: *t == tab,
            })
            .collect(),
        tab: tab.slug(),
        stats: StatsView {
            total_orders: stats.total_orders,
            total_revenue: stats.total_revenue.display(),
            total_customers: stats.total_customers,
            pending_orders: stats.pending_orders,
        },
        recent_orders: recent,
        orders,
        products: demo_data::product_stock(state.catalog())
            .into_iter()
            .map(|row| StockView {
                id: row.product_id.as_u32(),
                name: row.name,
                category: row.category,
                price: row.price.display(),
                stock: row.stock,
                sales: row.sales,
            })
            .collect(),
        customers: customers(&placed),
        discounts: demo_data::coupon_usage(state.coupons())
            .into_iter()
            .map(|u| DiscountView {
                code: u.code,
                percent: format!("{}%", u.percent),
                uses: u.uses,
                max_uses: u.max_uses,
                expires: u.expires,
            })
            .collect(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use chrono::Utc;
    use customcraft_core::{
        CustomerDetails, OrderId, OrderStatus, PriceBreakdown, PricingPolicy,
    };
    use rust_decimal::Decimal;

    use super::*;

    fn order(seq: u32, name: &str, email: &str, cents: i64) -> Order {
        let breakdown: PriceBreakdown =
            PricingPolicy::default().breakdown(Price::from_cents(cents), Decimal::ZERO);
        Order {
            id: OrderId::new(seq),
            placed_at: Utc::now(),
            customer: CustomerDetails::parse(name, email, "1 Main St", "Springfield", "1")
                .unwrap(),
            items: Vec::new(),
            breakdown,
            coupon_code: None,
            status: OrderStatus::Processing,
        }
    }

    #[test]
    fn test_tab_from_slug() {
        assert_eq!(AdminTab::from_slug("discounts"), AdminTab::Discounts);
        assert_eq!(AdminTab::from_slug(""), AdminTab::Dashboard);
    }

    #[test]
    fn test_customers_grouped_by_email() {
        let orders = [
            order(6, "Zed", "zed@example.com", 10_000),
            order(5, "Ann", "ann@example.com", 10_000),
            order(4, "Zed", "ZED@example.com", 10_000),
        ];
        let rows = customers(&orders);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Zed");
        assert_eq!(rows[0].orders, 2);
        assert_eq!(rows[0].spent, "$216.00");
        assert_eq!(rows[1].email, "ann@example.com");
    }

    #[test]
    fn test_recent_order_row() {
        let recent = demo_data::recent_orders();
        let row = AdminOrderView::from(&recent[1]);
        assert_eq!(row.customer, "Jane Smith");
        assert_eq!(row.amount, "$16.99");
        assert_eq!(row.status_label, "Shipped");
    }
}
