//! Price breakdown derivation.
//!
//! [`PricingPolicy::compute_totals`] is a pure function of the cart, the
//! applied coupon and the policy constants:
//!
//! ```text
//! subtotal = Σ unit_price × quantity
//! discount = subtotal × coupon fraction          (0 without a coupon)
//! shipping = 0 if subtotal > threshold else fee
//! tax      = (subtotal − discount) × tax rate    (shipping is not taxed)
//! total    = subtotal − discount + shipping + tax
//! ```
//!
//! No intermediate value is rounded.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::coupon::Coupon;
use crate::types::Price;

/// Business constants used to price a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingPolicy {
    /// Subtotals strictly above this ship free.
    pub free_shipping_threshold: Decimal,
    /// Flat fee charged at or below the threshold.
    pub shipping_fee: Decimal,
    /// Sales tax rate applied to the discounted subtotal.
    pub tax_rate: Decimal,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            free_shipping_threshold: Decimal::from(50),
            shipping_fee: Decimal::new(599, 2),
            tax_rate: Decimal::new(8, 2),
        }
    }
}

/// Derived totals for a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub subtotal: Price,
    /// Fraction taken off the subtotal; zero without a coupon.
    pub discount_fraction: Decimal,
    pub discount: Price,
    pub shipping: Price,
    pub tax: Price,
    pub total: Price,
}

impl PriceBreakdown {
    /// Whether a discount applies.
    #[must_use]
    pub fn has_discount(&self) -> bool {
        !self.discount_fraction.is_zero()
    }

    /// Whether shipping is free.
    #[must_use]
    pub fn free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }
}

impl PricingPolicy {
    /// Price a cart with an optional coupon.
    #[must_use]
    pub fn compute_totals(&self, cart: &Cart, coupon: Option<&Coupon>) -> PriceBreakdown {
        let fraction = coupon.map_or(Decimal::ZERO, |c| c.fraction);
        self.breakdown(cart.subtotal(), fraction)
    }

    /// Price a subtotal with a discount fraction.
    #[must_use]
    pub fn breakdown(&self, subtotal: Price, discount_fraction: Decimal) -> PriceBreakdown {
        let currency = subtotal.currency_code;
        let discount = subtotal.scaled(discount_fraction);
        let shipping = if subtotal.amount > self.free_shipping_threshold {
            Price::zero(currency)
        } else {
            Price::new(self.shipping_fee, currency)
        };
        let taxable = subtotal - discount;
        let tax = taxable.scaled(self.tax_rate);
        let total = taxable + shipping + tax;

        PriceBreakdown {
            subtotal,
            discount_fraction,
            discount,
            shipping,
            tax,
            total,
        }
    }

    /// Amount left to spend before shipping becomes free, if any.
    #[must_use]
    pub fn remaining_for_free_shipping(&self, subtotal: Price) -> Option<Price> {
        (subtotal.amount <= self.free_shipping_threshold).then(|| {
            Price::new(
                self.free_shipping_threshold - subtotal.amount,
                subtotal.currency_code,
            )
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cart::{CartLineItem, Customization};
    use crate::catalog::Catalog;
    use crate::coupon::CouponBook;
    use crate::types::ProductId;

    fn cart_with_tshirts(quantity: u32) -> Cart {
        let catalog = Catalog::fixtures();
        let product = catalog.get(ProductId::new(1)).unwrap();
        let mut cart = Cart::new();
        cart.add_item(
            CartLineItem::new(
                product,
                quantity,
                Customization::new("white", "M", None, None, None),
            )
            .unwrap(),
        );
        cart
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_no_coupon_under_threshold() {
        let totals = PricingPolicy::default().compute_totals(&cart_with_tshirts(2), None);
        assert_eq!(totals.subtotal.amount, dec("49.98"));
        assert!(totals.discount.is_zero());
        assert_eq!(totals.shipping.amount, dec("5.99"));
        assert_eq!(totals.tax.amount, dec("3.9984"));
        assert_eq!(totals.total.amount, dec("59.9684"));
        assert!(!totals.has_discount());
    }

    #[test]
    fn test_save10_coupon() {
        let book = CouponBook::standard();
        let coupon = book.lookup("SAVE10").unwrap();
        let totals = PricingPolicy::default().compute_totals(&cart_with_tshirts(2), Some(coupon));
        assert_eq!(totals.discount.amount, dec("4.998"));
        assert_eq!(totals.tax.amount, dec("3.59856"));
        assert_eq!(totals.total.amount, dec("54.57056"));
        assert!(totals.has_discount());
    }

    #[test]
    fn test_free_shipping_above_threshold() {
        let totals = PricingPolicy::default().compute_totals(&cart_with_tshirts(3), None);
        assert_eq!(totals.subtotal.amount, dec("74.97"));
        assert!(totals.free_shipping());
    }

    #[test]
    fn test_threshold_itself_pays_shipping() {
        let policy = PricingPolicy::default();
        let totals = policy.breakdown(Price::usd(dec("50")), Decimal::ZERO);
        assert_eq!(totals.shipping.amount, dec("5.99"));
        let totals = policy.breakdown(Price::usd(dec("50.01")), Decimal::ZERO);
        assert!(totals.free_shipping());
    }

    #[test]
    fn test_shipping_judged_on_pre_discount_subtotal() {
        let totals = PricingPolicy::default().breakdown(Price::usd(dec("60")), dec("0.20"));
        assert_eq!(totals.discount.amount, dec("12"));
        assert!(totals.free_shipping());
        assert_eq!(totals.tax.amount, dec("3.84"));
    }

    #[test]
    fn test_reapplying_coupon_is_idempotent() {
        let book = CouponBook::standard();
        let cart = cart_with_tshirts(2);
        let policy = PricingPolicy::default();
        let once = policy.compute_totals(&cart, book.lookup("save10").ok());
        let twice = policy.compute_totals(&cart, book.lookup("SAVE10").ok());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_custom_policy() {
        let policy = PricingPolicy {
            free_shipping_threshold: dec("100"),
            shipping_fee: dec("10"),
            tax_rate: dec("0.2"),
        };
        let totals = policy.compute_totals(&cart_with_tshirts(3), None);
        assert_eq!(totals.shipping.amount, dec("10"));
        assert_eq!(totals.tax.amount, dec("14.994"));
        assert_eq!(totals.total.amount, dec("99.964"));
    }

    #[test]
    fn test_remaining_for_free_shipping() {
        let policy = PricingPolicy::default();
        assert_eq!(
            policy
                .remaining_for_free_shipping(Price::usd(dec("49.98")))
                .map(|p| p.amount),
            Some(dec("0.02"))
        );
        assert_eq!(policy.remaining_for_free_shipping(Price::usd(dec("74.97"))), None);
    }
}
