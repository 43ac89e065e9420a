//! Customer dashboard route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use customcraft_core::{Order, OrderId};
use serde::Deserialize;
use tracing::instrument;

use super::NavView;
use crate::middleware::{RequireAccount, SessionCart};
use crate::models::session;
use crate::services::demo_data::{self, HistoricalOrder, SavedDesign};
use crate::state::AppState;

/// Dashboard tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardTab {
    #[default]
    Orders,
    Designs,
    Wishlist,
    Profile,
}

impl DashboardTab {
    pub const ALL: [Self; 4] = [Self::Orders, Self::Designs, Self::Wishlist, Self::Profile];

    /// Parse a `?tab=` value; unknown values select the orders tab.
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
            Self::Orders => "orders",
            Self::Designs => "designs",
            Self::Wishlist => "wishlist",
            Self::Profile => "profile",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Orders => "My Orders",
            Self::Designs => "Saved Designs",
            Self::Wishlist => "Wishlist",
            Self::Profile => "Profile Settings",
        }
    }
}

/// A tab link in the sidebar.
#[derive(Clone)]
pub struct TabView {
    pub slug: &'static str,
    pub label: &'static str,
    pub active: bool,
}

/// One row in the order history.
#[derive(Clone)]
pub struct OrderRowView {
    pub id: String,
    pub date: String,
    pub status: &'static str,
    pub status_label: &'static str,
    pub total: String,
    pub lines: Vec<String>,
}

impl From<&Order> for OrderRowView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.to_string(),
            date: order.placed_at.format("%Y-%m-%d").to_string(),
            status: order.status.as_str(),
            status_label: order.status.label(),
            total: order.breakdown.total.display(),
            lines: order
                .items
                .iter()
                .map(|item| format!("{} × {}", item.name, item.quantity))
                .collect(),
        }
    }
}

impl From<&HistoricalOrder> for OrderRowView {
    fn from(order: &HistoricalOrder) -> Self {
        Self {
            id: order.id.to_string(),
            date: order.date.to_string(),
            status: order.status.as_str(),
            status_label: order.status.label(),
            total: order.total.display(),
            lines: vec![format!(
                "{} × {} ({})",
                order.product, order.quantity, order.customization
            )],
        }
    }
}

/// A wishlist card.
#[derive(Clone)]
pub struct WishlistView {
    pub id: &'static str,
    pub name: &'static str,
    pub price: String,
    pub image: &'static str,
}

/// Profile form prefill.
#[derive(Clone)]
pub struct ProfileView {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Dashboard query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardParams {
    pub tab: Option<String>,
    /// Set after checkout to show the success banner.
    pub order: Option<String>,
}

/// Dashboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/dashboard.html")]
pub struct DashboardTemplate {
    pub nav: NavView,
    pub tabs: Vec<TabView>,
    pub tab: &'static str,
    pub placed_order: Option<String>,
    pub orders: Vec<OrderRowView>,
    pub designs: Vec<SavedDesign>,
    pub wishlist: Vec<WishlistView>,
    pub profile: ProfileView,
}

/// Display the customer dashboard.
#[instrument(skip(state, session_cart, user))]
pub async fn show(
    State(state): State<AppState>,
    RequireAccount(user): RequireAccount,
    session_cart: SessionCart,
    Query(params): Query<DashboardParams>,
) -> impl IntoResponse {
    let tab = params
        .tab
        .as_deref()
        .map(DashboardTab::from_slug)
        .unwrap_or_default();

    // The banner only names orders placed from this session.
    let placed_order = match params.order.as_deref().map(str::parse::<OrderId>) {
        Some(Ok(id)) => session::placed_orders(session_cart.session())
            .await
            .contains(&id)
            .then(|| id.to_string()),
        _ => None,
    };

    let mut orders: Vec<OrderRowView> = state
        .orders()
        .for_customer(&user.email)
        .await
        .iter()
        .map(OrderRowView::from)
        .collect();
    orders.extend(demo_data::order_history().iter().map(OrderRowView::from));

    let (first_name, last_name) = user
        .name
        .split_once(' ')
        .unwrap_or((user.name.as_str(), ""));

    DashboardTemplate {
        nav: NavView::new(Some(&user), &session_cart.cart),
        tabs: DashboardTab::ALL
            .iter()
            .map(|t| TabView {
                slug: t.slug(),
                label: t.label(),
                active: *t == tab,
            })
            .collect(),
        tab: tab.slug(),
        placed_order,
        orders,
        designs: demo_data::saved_designs(),
        wishlist: demo_data::wishlist()
            .into_iter()
            .map(|w| WishlistView {
                id: w.id,
                name: w.name,
                price: w.price.display(),
                image: w.image,
            })
            .collect(),
        profile: ProfileView {
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            email: user.email.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_from_slug() {
        assert_eq!(DashboardTab::from_slug("wishlist"), DashboardTab::Wishlist);
        assert_eq!(DashboardTab::from_slug("bogus"), DashboardTab::Orders);
    }

    #[test]
    fn test_history_row() {
        let history = demo_data::order_history();
        let Some(first) = history.first() else {
            panic!("demo history is empty");
        };
        let row = OrderRowView::from(first);
        assert_eq!(row.id, "ORD-001");
        assert_eq!(row.total, "$49.98");
        assert_eq!(row.status, "delivered");
        assert_eq!(row.lines, ["Custom T-Shirt × 2 (Logo Design)"]);
    }
}
