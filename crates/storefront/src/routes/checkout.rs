//! Checkout route handlers.
//!
//! Checkout prices the session cart, validates the customer form and submits
//! the order to the in-memory order book. There is no payment step.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use customcraft_core::{CustomerDetails, Order, OrderId, User};
use serde::Deserialize;
use tracing::instrument;

use super::NavView;
use super::cart::{CartLineView, SummaryView};
use crate::error::{AppError, Result};
use crate::middleware::{OptionalAuth, SessionCart};
use crate::models::session;
use crate::state::AppState;

/// Checkout form data. Missing fields arrive as empty strings.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct CheckoutForm {
    pub name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
}

impl CheckoutForm {
    /// Prefill from the signed-in user.
    fn for_user(user: Option<&User>) -> Self {
        user.map_or_else(Self::default, |u| Self {
            name: u.name.clone(),
            email: u.email.to_string(),
            ..Self::default()
        })
    }
}

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub nav: NavView,
    pub items: Vec<CartLineView>,
    pub summary: SummaryView,
    pub form: CheckoutForm,
    pub error: Option<String>,
}

/// Placed order display data.
#[derive(Clone)]
pub struct PlacedOrderView {
    pub id: String,
    pub placed_at: String,
    pub customer_name: String,
    pub email: String,
    pub shipping_address: String,
    pub status: &'static str,
    pub item_count: u32,
    pub total: String,
}

impl From<&Order> for PlacedOrderView {
    fn from(order: &Order) -> Self {
        let c = &order.customer;
        Self {
            id: order.id.to_string(),
            placed_at: order.placed_at.format("%Y-%m-%d").to_string(),
            customer_name: c.name.clone(),
            email: c.email.to_string(),
            shipping_address: format!("{}, {} {}", c.address, c.city, c.postal_code),
            status: order.status.label(),
            item_count: order.item_count(),
            total: order.breakdown.total.display(),
        }
    }
}

/// Guest order confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/confirmation.html")]
pub struct ConfirmationTemplate {
    pub nav: NavView,
    pub order: PlacedOrderView,
    pub items: Vec<CartLineView>,
    pub summary: SummaryView,
}

fn render(
    state: &AppState,
    session_cart: &SessionCart,
    user: Option<&User>,
    form: CheckoutForm,
    error: Option<String>,
) -> CheckoutTemplate {
    let cart = &session_cart.cart;
    let coupon = session_cart.coupon(state.coupons());
    let breakdown = state.pricing().compute_totals(cart, coupon);

    CheckoutTemplate {
        nav: NavView::new(user, cart),
        items: cart.items().iter().map(CartLineView::from).collect(),
        summary: SummaryView::new(cart.item_count(), &breakdown, coupon, state.pricing()),
        form,
        error,
    }
}

/// Display the checkout page. An empty cart goes back to `/cart`.
#[instrument(skip(state, session_cart, user))]
pub async fn show(
    State(state): State<AppState>,
    session_cart: SessionCart,
    OptionalAuth(user): OptionalAuth,
) -> Response {
    if session_cart.cart.is_empty() {
        return Redirect::to("/cart").into_response();
    }
    let form = CheckoutForm::for_user(user.as_ref());
    render(&state, &session_cart, user.as_ref(), form, None).into_response()
}

/// Place the order.
///
/// On success the cart and coupon are cleared. Signed-in visitors land on
/// their dashboard with a success banner; guests see the confirmation page.
#[instrument(skip(state, session_cart, user, form))]
pub async fn submit(
    State(state): State<AppState>,
    mut session_cart: SessionCart,
    OptionalAuth(user): OptionalAuth,
    Form(form): Form<CheckoutForm>,
) -> Result<Response> {
    if session_cart.cart.is_empty() {
        return Ok(Redirect::to("/cart").into_response());
    }

    let details = match CustomerDetails::parse(
        &form.name,
        &form.email,
        &form.address,
        &form.city,
        &form.postal_code,
    ) {
        Ok(details) => details,
        Err(e) => {
            let message = format!("Please check your details: {e}");
            return Ok((
                StatusCode::BAD_REQUEST,
                render(&state, &session_cart, user.as_ref(), form, Some(message)),
            )
                .into_response());
        }
    };

    // The emptied cart is stored before the order exists.
    let cart = std::mem::take(&mut session_cart.cart);
    let coupon = session_cart.coupon(state.coupons());
    session_cart.clear();
    session_cart.save().await?;

    let order = state
        .orders()
        .submit(details, &cart, coupon, state.pricing())
        .await;

    if let Err(e) = session::record_placed_order(session_cart.session(), order.id).await {
        tracing::error!(
            order_id = %order.id,
            error = %e,
            "Order placed but not recorded in session"
        );
        return Err(e.into());
    }

    let target = if user.is_some() {
        format!("/dashboard?order={}", order.id)
    } else {
        format!("/checkout/confirmation/{}", order.id)
    };
    Ok(Redirect::to(&target).into_response())
}

/// Show a placed order.
#[instrument(skip(state, session_cart, user))]
pub async fn confirmation(
    State(state): State<AppState>,
    session_cart: SessionCart,
    OptionalAuth(user): OptionalAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let not_found = || AppError::NotFound(format!("order {id}"));
    let order_id = id.parse::<OrderId>().map_err(|_| not_found())?;

    // Only orders placed from this session are visible.
    if !session::placed_orders(session_cart.session())
        .await
        .contains(&order_id)
    {
        return Err(not_found());
    }
    let order = state.orders().get(order_id).await.ok_or_else(not_found)?;

    let coupon = order
        .coupon_code
        .as_deref()
        .and_then(|code| state.coupons().lookup(code).ok());
    let summary = SummaryView {
        free_shipping_remaining: None,
        ..SummaryView::new(order.item_count(), &order.breakdown, coupon, state.pricing())
    };

    Ok(ConfirmationTemplate {
        nav: NavView::new(user.as_ref(), &session_cart.cart),
        order: PlacedOrderView::from(&order),
        items: order.items.iter().map(CartLineView::from).collect(),
        summary,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use customcraft_core::{Email, Role, UserId};

    use super::*;

    #[test]
    fn test_form_prefills_signed_in_user() {
        let user = User {
            id: UserId::new(2),
            name: "John Doe".to_string(),
            email: Email::parse("john@example.com").unwrap(),
            role: Role::Customer,
        };
        let form = CheckoutForm::for_user(Some(&user));
        assert_eq!(form.name, "John Doe");
        assert_eq!(form.email, "john@example.com");
        assert!(form.address.is_empty());

        let guest = CheckoutForm::for_user(None);
        assert!(guest.name.is_empty());
    }
}
