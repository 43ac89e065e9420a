//! Shopping cart state.
//!
//! A [`Cart`] is an ordered list of customized line items. It is owned by a
//! single visitor and only changes through [`Cart::add_item`],
//! [`Cart::update_quantity`], [`Cart::remove_item`] and [`Cart::clear`].
//! The subtotal is derived from the lines on every call and never stored.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Product;
use crate::types::{CurrencyCode, LineItemId, Price, ProductId};

/// Most units a single line may hold.
pub const MAX_QUANTITY: u32 = 999;

/// Errors building cart lines.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// Lines are created with at least one unit.
    #[error("quantity must be at least 1")]
    ZeroQuantity,
    #[error("quantity must be at most {}", MAX_QUANTITY)]
    QuantityTooLarge,
}

/// Shopper-chosen attributes attached to a line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customization {
    pub color: String,
    pub size: String,
    pub text: Option<String>,
    pub font: Option<String>,
    /// Reference to an uploaded design image.
    pub image_ref: Option<String>,
}

impl Customization {
    /// Build a customization from raw form values.
    ///
    /// Blank optional values are stored as `None` so the cart never shows an
    /// empty "Custom Text" row.
    #[must_use]
    pub fn new(
        color: impl Into<String>,
        size: impl Into<String>,
        text: Option<String>,
        font: Option<String>,
        image_ref: Option<String>,
    ) -> Self {
        Self {
            color: color.into(),
            size: size.into(),
            text: non_blank(text),
            font: non_blank(font),
            image_ref: non_blank(image_ref),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// One customized product entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub id: LineItemId,
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Price,
    pub quantity: NonZeroU32,
    pub customization: Customization,
    pub thumbnail_ref: String,
}

impl CartLineItem {
    /// Create a new line for `product` with a fresh line ID.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ZeroQuantity`] if `quantity` is zero and
    /// [`CartError::QuantityTooLarge`] if it exceeds [`MAX_QUANTITY`].
    pub fn new(
        product: &Product,
        quantity: u32,
        customization: Customization,
    ) -> Result<Self, CartError> {
        if quantity > MAX_QUANTITY {
            return Err(CartError::QuantityTooLarge);
        }
        let quantity = NonZeroU32::new(quantity).ok_or(CartError::ZeroQuantity)?;
        Ok(Self {
            id: LineItemId::new_v4(),
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.price,
            quantity,
            customization,
            thumbnail_ref: product.image_ref.clone(),
        })
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity.get())
    }
}

/// Outcome of [`Cart::update_quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityUpdate {
    /// The line now has the requested quantity.
    Updated,
    /// The requested quantity was zero or negative, so the line was removed.
    Removed,
    /// No line has this ID; the cart is unchanged.
    NotFound,
    /// The requested quantity exceeds [`MAX_QUANTITY`]; the cart is unchanged.
    TooLarge,
}

/// A visitor's cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Look up a line by ID.
    #[must_use]
    pub fn get(&self, id: LineItemId) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines (the navbar badge).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .map(|item| item.quantity.get())
            .fold(0, u32::saturating_add)
    }

    /// Sum of unit price times quantity over all lines.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        let currency = self
            .items
            .first()
            .map_or_else(CurrencyCode::default, |item| item.unit_price.currency_code);
        self.items
            .iter()
            .map(CartLineItem::line_total)
            .fold(Price::zero(currency), |acc, line| acc + line)
    }

    /// Append a line. Identical lines are not merged.
    pub fn add_item(&mut self, item: CartLineItem) -> LineItemId {
        let id = item.id;
        self.items.push(item);
        id
    }

    /// Set the quantity of a line; zero or less removes it.
    ///
    /// Quantities above [`MAX_QUANTITY`] are refused without touching the
    /// cart.
    pub fn update_quantity(&mut self, id: LineItemId, new_quantity: i64) -> QuantityUpdate {
        if new_quantity > i64::from(MAX_QUANTITY) {
            return QuantityUpdate::TooLarge;
        }

        let quantity = u32::try_from(new_quantity)
            .ok()
            .and_then(NonZeroU32::new);

        let Some(quantity) = quantity else {
            return if self.remove_item(id) {
                QuantityUpdate::Removed
            } else {
                QuantityUpdate::NotFound
            };
        };

        self.set_quantity(id, quantity)
    }

    fn set_quantity(&mut self, id: LineItemId, quantity: NonZeroU32) -> QuantityUpdate {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.quantity = quantity;
                QuantityUpdate::Updated
            }
            None => QuantityUpdate::NotFound,
        }
    }

    /// Remove a line. Returns `false` if no line had this ID.
    pub fn remove_item(&mut self, id: LineItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}
