//! Cart route handlers.
//!
//! The cart lives in the visitor's session. Plain form posts redirect back to
//! the cart page; `POST /cart/add` from HTMX answers with the count badge and
//! an `HX-Trigger: cart-updated` header instead.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use customcraft_core::{
    CartError, CartLineItem, Coupon, CouponError, Customization, LineItemId, MAX_QUANTITY,
    PriceBreakdown, PricingPolicy, ProductId, QuantityUpdate, User,
};
use serde::Deserialize;
use tracing::instrument;

use super::NavView;
use crate::error::{AppError, Result};
use crate::middleware::{OptionalAuth, SessionCart};
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartLineView {
    pub id: String,
    pub product_id: u32,
    pub name: String,
    pub thumbnail: String,
    pub unit_price: String,
    pub line_total: String,
    pub quantity: u32,
    /// Value posted by the "-" button; zero removes the line.
    pub decrement_quantity: u32,
    /// Value posted by the "+" button, absent once the line is at the cap.
    pub increment_quantity: Option<u32>,
    pub color: String,
    pub size: String,
    pub text: Option<String>,
    pub font: Option<String>,
    pub has_image: bool,
}

impl From<&CartLineItem> for CartLineView {
    fn from(item: &CartLineItem) -> Self {
        let c = &item.customization;
        Self {
            id: item.id.to_string(),
            product_id: item.product_id.as_u32(),
            name: item.name.clone(),
            thumbnail: item.thumbnail_ref.clone(),
            unit_price: item.unit_price.display(),
            line_total: item.line_total().display(),
            quantity: item.quantity.get(),
            decrement_quantity: item.quantity.get() - 1,
            increment_quantity: Some(item.quantity.get().saturating_add(1))
                .filter(|next| *next <= MAX_QUANTITY),
            color: c.color.clone(),
            size: c.size.clone(),
            text: c.text.clone(),
            font: c.font.clone(),
            has_image: c.image_ref.is_some(),
        }
    }
}

/// Order summary display data, shared by the cart and checkout pages.
#[derive(Clone)]
pub struct SummaryView {
    pub item_count: u32,
    pub subtotal: String,
    pub coupon_code: Option<String>,
    pub discount_percent: String,
    pub discount: Option<String>,
    pub shipping: String,
    pub tax: String,
    pub total: String,
    /// Spend needed to reach free shipping, when not yet reached.
    pub free_shipping_remaining: Option<String>,
}

impl SummaryView {
    #[must_use]
    pub fn new(
        item_count: u32,
        breakdown: &PriceBreakdown,
        coupon: Option<&Coupon>,
        pricing: &PricingPolicy,
    ) -> Self {
        Self {
            item_count,
            subtotal: breakdown.subtotal.display(),
            coupon_code: coupon.map(|c| c.code.clone()),
            discount_percent: coupon.map(|c| c.percent().to_string()).unwrap_or_default(),
            discount: breakdown
                .has_discount()
                .then(|| format!("-{}", breakdown.discount.display())),
            shipping: if breakdown.free_shipping() {
                "Free".to_string()
            } else {
                breakdown.shipping.display()
            },
            tax: breakdown.tax.display(),
            total: breakdown.total.display(),
            free_shipping_remaining: pricing
                .remaining_for_free_shipping(breakdown.subtotal)
                .map(|p| p.display()),
        }
    }
}

/// An inline message above the cart.
#[derive(Clone)]
pub struct Notice {
    pub success: bool,
    pub message: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub nav: NavView,
    pub items: Vec<CartLineView>,
    pub summary: SummaryView,
    pub notice: Option<Notice>,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
    pub color: Option<String>,
    pub size: Option<String>,
    pub text: Option<String>,
    pub font: Option<String>,
    pub image_ref: Option<String>,
    pub quantity: Option<u32>,
}

/// Update quantity form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub line_id: String,
    pub quantity: i64,
}

/// Remove line form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub line_id: String,
}

/// Coupon form data.
#[derive(Debug, Deserialize)]
pub struct CouponForm {
    #[serde(default)]
    pub code: String,
}

fn render(
    state: &AppState,
    session_cart: &SessionCart,
    user: Option<&User>,
    notice: Option<Notice>,
) -> CartShowTemplate {
    let cart = &session_cart.cart;
    let coupon = session_cart.coupon(state.coupons());
    let breakdown = state.pricing().compute_totals(cart, coupon);

    CartShowTemplate {
        nav: NavView::new(user, cart),
        items: cart.items().iter().map(CartLineView::from).collect(),
        summary: SummaryView::new(cart.item_count(), &breakdown, coupon, state.pricing()),
        notice,
    }
}

fn parse_line_id(raw: &str) -> Result<LineItemId> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("invalid line id {raw}")))
}

/// Display the cart page.
#[instrument(skip(state, session_cart, user))]
pub async fn show(
    State(state): State<AppState>,
    session_cart: SessionCart,
    OptionalAuth(user): OptionalAuth,
) -> impl IntoResponse {
    render(&state, &session_cart, user.as_ref(), None)
}

/// Add a customized line to the cart.
///
/// Unknown products are 404; a color, size or font the product does not
/// offer is 400.
#[instrument(skip(state, session_cart, headers))]
pub async fn add(
    State(state): State<AppState>,
    mut session_cart: SessionCart,
    headers: HeaderMap,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let product = form
        .product_id
        .parse::<ProductId>()
        .ok()
        .and_then(|id| state.catalog().get(id))
        .ok_or_else(|| AppError::NotFound(format!("product {}", form.product_id)))?;

    let color = form
        .color
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| product.default_color().to_owned());
    if !product.offers_color(&color) {
        return Err(AppError::BadRequest(format!(
            "{} is not available in {color}",
            product.name
        )));
    }

    let size = form
        .size
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| product.default_size().to_owned());
    if !product.offers_size(&size) {
        return Err(AppError::BadRequest(format!(
            "{} is not available in size {size}",
            product.name
        )));
    }

    let text = form.text.filter(|t| !t.trim().is_empty());
    let font = match (&text, form.font) {
        (None, _) => None,
        (Some(_), Some(font)) if !font.trim().is_empty() => {
            if !product.offers_font(&font) {
                return Err(AppError::BadRequest(format!("unknown font {font}")));
            }
            Some(font)
        }
        (Some(_), _) => product.fonts.first().cloned(),
    };

    let quantity = form.quantity.unwrap_or(1).max(1);
    let customization = Customization::new(color, size, text, font, form.image_ref);
    let line = CartLineItem::new(product, quantity, customization)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let line_id = session_cart.cart.add_item(line);
    session_cart.save().await?;

    tracing::info!(%line_id, product_id = %product.id, quantity, "Added to cart");

    if headers.contains_key("hx-request") {
        return Ok((
            AppendHeaders([("HX-Trigger", "cart-updated")]),
            CartCountTemplate {
                count: session_cart.cart.item_count(),
            },
        )
            .into_response());
    }
    Ok(Redirect::to("/cart").into_response())
}

/// Set the quantity of a line. Zero or less removes it.
#[instrument(skip(session_cart))]
pub async fn update(
    mut session_cart: SessionCart,
    Form(form): Form<UpdateCartForm>,
) -> Result<Redirect> {
    let id = parse_line_id(&form.line_id)?;
    match session_cart.cart.update_quantity(id, form.quantity) {
        QuantityUpdate::NotFound => {
            tracing::debug!(line_id = %id, "Quantity update for unknown line");
        }
        QuantityUpdate::TooLarge => {
            return Err(AppError::BadRequest(
                CartError::QuantityTooLarge.to_string(),
            ));
        }
        QuantityUpdate::Updated | QuantityUpdate::Removed => session_cart.save().await?,
    }
    Ok(Redirect::to("/cart"))
}

/// Remove a line.
#[instrument(skip(session_cart))]
pub async fn remove(
    mut session_cart: SessionCart,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Redirect> {
    let id = parse_line_id(&form.line_id)?;
    if session_cart.cart.remove_item(id) {
        session_cart.save().await?;
    }
    Ok(Redirect::to("/cart"))
}

/// Remove every line. The applied coupon stays.
#[instrument(skip(session_cart))]
pub async fn clear(mut session_cart: SessionCart) -> Result<Redirect> {
    session_cart.cart.clear();
    session_cart.save().await?;
    Ok(Redirect::to("/cart"))
}

/// Apply a coupon code.
///
/// A rejected code leaves the applied coupon untouched and re-renders the
/// cart with the rejection (422).
#[instrument(skip(state, session_cart, user))]
pub async fn apply_coupon(
    State(state): State<AppState>,
    mut session_cart: SessionCart,
    OptionalAuth(user): OptionalAuth,
    Form(form): Form<CouponForm>,
) -> Result<Response> {
    match state.coupons().lookup(&form.code) {
        Ok(coupon) => {
            let message = format!("Coupon {} applied: {}% off", coupon.code, coupon.percent());
            session_cart.coupon_code = Some(coupon.code.clone());
            session_cart.save().await?;
            let notice = Notice {
                success: true,
                message,
            };
            Ok(render(&state, &session_cart, user.as_ref(), Some(notice)).into_response())
        }
        Err(e) => {
            let message = match e {
                CouponError::Empty => "Please enter a coupon code".to_string(),
                CouponError::Unknown(_) => "Invalid coupon code".to_string(),
            };
            tracing::info!(code = %form.code, "Coupon rejected");
            let notice = Notice {
                success: false,
                message,
            };
            Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                render(&state, &session_cart, user.as_ref(), Some(notice)),
            )
                .into_response())
        }
    }
}

/// Cart count badge (HTMX).
#[instrument(skip(session_cart))]
pub async fn count(session_cart: SessionCart) -> impl IntoResponse {
    CartCountTemplate {
        count: session_cart.cart.item_count(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use customcraft_core::{Cart, Catalog, CouponBook};

    use super::*;

    fn cart_with(quantity: u32) -> Cart {
        let catalog = Catalog::fixtures();
        let product = catalog.get(ProductId::new(1)).unwrap();
        let mut cart = Cart::new();
        let customization = Customization::new(
            "navy",
            "L",
            Some("Team".to_string()),
            Some("Georgia".to_string()),
            None,
        );
        cart.add_item(CartLineItem::new(product, quantity, customization).unwrap());
        cart
    }

    #[test]
    fn test_summary_without_coupon() {
        let pricing = PricingPolicy::default();
        let cart = cart_with(2);
        let breakdown = pricing.compute_totals(&cart, None);
        let summary = SummaryView::new(cart.item_count(), &breakdown, None, &pricing);

        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.subtotal, "$49.98");
        assert_eq!(summary.shipping, "$5.99");
        assert_eq!(summary.tax, "$4.00");
        assert_eq!(summary.total, "$59.97");
        assert!(summary.discount.is_none());
        assert_eq!(summary.free_shipping_remaining.as_deref(), Some("$0.02"));
    }

    #[test]
    fn test_summary_with_coupon_and_free_shipping() {
        let pricing = PricingPolicy::default();
        let coupons = CouponBook::standard();
        let coupon = coupons.lookup("SAVE10").unwrap();
        let cart = cart_with(3);
        let breakdown = pricing.compute_totals(&cart, Some(coupon));
        let summary = SummaryView::new(cart.item_count(), &breakdown, Some(coupon), &pricing);

        assert_eq!(summary.shipping, "Free");
        assert_eq!(summary.discount.as_deref(), Some("-$7.50"));
        assert_eq!(summary.discount_percent, "10");
        assert_eq!(summary.coupon_code.as_deref(), Some("SAVE10"));
        assert!(summary.free_shipping_remaining.is_none());
    }

    #[test]
    fn test_line_view_step_values() {
        let cart = cart_with(1);
        let view = CartLineView::from(&cart.items()[0]);
        assert_eq!(view.decrement_quantity, 0);
        assert_eq!(view.increment_quantity, Some(2));

        let cart = cart_with(MAX_QUANTITY);
        let view = CartLineView::from(&cart.items()[0]);
        assert_eq!(view.decrement_quantity, MAX_QUANTITY - 1);
        assert_eq!(view.increment_quantity, None);
    }

    #[test]
    fn test_line_view_shows_customization() {
        let cart = cart_with(1);
        let view = CartLineView::from(&cart.items()[0]);
        assert_eq!(view.color, "navy");
        assert_eq!(view.text.as_deref(), Some("Team"));
        assert_eq!(view.font.as_deref(), Some("Georgia"));
        assert!(!view.has_image);
        assert_eq!(view.line_total, "$24.99");
    }
}
